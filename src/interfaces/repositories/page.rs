use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    entities::{
        common::{like_pattern, ContentStatus},
        page::{Page, PageWrite},
    },
    errors::{is_unique_violation, AppError},
    repositories::sqlx_repo::SqlxPageRepo,
};

const PAGE_COLUMNS: &str = "id, title, slug, content, meta_description, meta_keywords, featured_image, \
    parent_id, status, sort_order, author_id, created_at, updated_at";

#[async_trait]
pub trait PageRepository: Send + Sync {
    /// Admin list ordered by `sort_order`, filtered on title or slug.
    async fn list(&self, search: Option<&str>) -> Result<Vec<Page>, AppError>;
    /// Every row, for export.
    async fn list_all(&self) -> Result<Vec<Page>, AppError>;
    async fn get(&self, id: &Uuid) -> Result<Option<Page>, AppError>;
    async fn get_published_by_slug(&self, slug: &str) -> Result<Option<Page>, AppError>;
    async fn create(&self, page: &PageWrite, author_id: Option<Uuid>) -> Result<Page, AppError>;
    async fn update(&self, id: &Uuid, page: &PageWrite) -> Result<Page, AppError>;
    async fn delete(&self, id: &Uuid) -> Result<(), AppError>;
    async fn count(&self) -> Result<i64, AppError>;
}

impl SqlxPageRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxPageRepo { pool }
    }
}

fn map_write_error(e: sqlx::Error) -> AppError {
    if is_unique_violation(&e) {
        AppError::Conflict("Page with this slug already exists".to_string())
    } else {
        AppError::from(e)
    }
}

#[async_trait]
impl PageRepository for SqlxPageRepo {
    async fn list(&self, search: Option<&str>) -> Result<Vec<Page>, AppError> {
        let sql = format!(
            "SELECT {PAGE_COLUMNS} FROM pages
            WHERE $1::text IS NULL OR title ILIKE $1 OR slug ILIKE $1
            ORDER BY sort_order ASC NULLS LAST, created_at DESC"
        );
        sqlx::query_as::<_, Page>(&sql)
            .bind(search.map(like_pattern))
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn list_all(&self) -> Result<Vec<Page>, AppError> {
        let sql = format!("SELECT {PAGE_COLUMNS} FROM pages ORDER BY sort_order ASC NULLS LAST, created_at ASC");
        sqlx::query_as::<_, Page>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn get(&self, id: &Uuid) -> Result<Option<Page>, AppError> {
        let sql = format!("SELECT {PAGE_COLUMNS} FROM pages WHERE id = $1");
        sqlx::query_as::<_, Page>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn get_published_by_slug(&self, slug: &str) -> Result<Option<Page>, AppError> {
        let sql = format!("SELECT {PAGE_COLUMNS} FROM pages WHERE slug = $1 AND status = $2");
        sqlx::query_as::<_, Page>(&sql)
            .bind(slug)
            .bind(ContentStatus::Published)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn create(&self, page: &PageWrite, author_id: Option<Uuid>) -> Result<Page, AppError> {
        let sql = format!(
            r#"INSERT INTO pages (
                title, slug, content, meta_description, meta_keywords,
                featured_image, parent_id, status, sort_order, author_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {PAGE_COLUMNS}"#
        );
        sqlx::query_as::<_, Page>(&sql)
            .bind(&page.title)
            .bind(&page.slug)
            .bind(&page.content)
            .bind(&page.meta_description)
            .bind(&page.meta_keywords)
            .bind(&page.featured_image)
            .bind(page.parent_id)
            .bind(page.status)
            .bind(page.sort_order)
            .bind(author_id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_write_error)
    }

    async fn update(&self, id: &Uuid, page: &PageWrite) -> Result<Page, AppError> {
        let sql = format!(
            r#"UPDATE pages SET
                title = $2, slug = $3, content = $4, meta_description = $5,
                meta_keywords = $6, featured_image = $7, parent_id = $8,
                status = $9, sort_order = $10, updated_at = NOW()
            WHERE id = $1
            RETURNING {PAGE_COLUMNS}"#
        );
        sqlx::query_as::<_, Page>(&sql)
            .bind(id)
            .bind(&page.title)
            .bind(&page.slug)
            .bind(&page.content)
            .bind(&page.meta_description)
            .bind(&page.meta_keywords)
            .bind(&page.featured_image)
            .bind(page.parent_id)
            .bind(page.status)
            .bind(page.sort_order)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_write_error)?
            .ok_or_else(|| AppError::NotFound(format!("Page with ID {} not found", id)))
    }

    async fn delete(&self, id: &Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM pages WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Page with ID {} not found", id)));
        }
        Ok(())
    }

    async fn count(&self) -> Result<i64, AppError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM pages")
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::from)
    }
}
