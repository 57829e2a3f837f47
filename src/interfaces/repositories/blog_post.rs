use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    entities::{
        blog_post::{BlogPost, BlogPostWrite},
        common::{like_pattern, ContentStatus},
    },
    errors::{is_unique_violation, AppError},
    repositories::sqlx_repo::SqlxBlogPostRepo,
};

const POST_COLUMNS: &str = "id, title, slug, excerpt, content, category, tags, status, read_time, \
    featured_image, published_at, author_id, created_at, updated_at";

#[async_trait]
pub trait BlogPostRepository: Send + Sync {
    /// Admin list, newest first, filtered on title or category.
    async fn list(&self, search: Option<&str>) -> Result<Vec<BlogPost>, AppError>;
    /// Every row, for export.
    async fn list_all(&self) -> Result<Vec<BlogPost>, AppError>;
    async fn list_published(&self) -> Result<Vec<BlogPost>, AppError>;
    async fn get(&self, id: &Uuid) -> Result<Option<BlogPost>, AppError>;
    async fn get_published_by_slug(&self, slug: &str) -> Result<Option<BlogPost>, AppError>;
    async fn create(&self, post: &BlogPostWrite, author_id: Option<Uuid>) -> Result<BlogPost, AppError>;
    async fn update(&self, id: &Uuid, post: &BlogPostWrite) -> Result<BlogPost, AppError>;
    async fn delete(&self, id: &Uuid) -> Result<(), AppError>;
    async fn count(&self) -> Result<i64, AppError>;
}

impl SqlxBlogPostRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxBlogPostRepo { pool }
    }
}

fn map_write_error(e: sqlx::Error) -> AppError {
    if is_unique_violation(&e) {
        AppError::Conflict("Blog post with this slug already exists".to_string())
    } else {
        AppError::from(e)
    }
}

#[async_trait]
impl BlogPostRepository for SqlxBlogPostRepo {
    async fn list(&self, search: Option<&str>) -> Result<Vec<BlogPost>, AppError> {
        let sql = format!(
            "SELECT {POST_COLUMNS} FROM blog_posts
            WHERE $1::text IS NULL OR title ILIKE $1 OR category ILIKE $1
            ORDER BY created_at DESC NULLS LAST"
        );
        sqlx::query_as::<_, BlogPost>(&sql)
            .bind(search.map(like_pattern))
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn list_all(&self) -> Result<Vec<BlogPost>, AppError> {
        let sql = format!("SELECT {POST_COLUMNS} FROM blog_posts ORDER BY created_at ASC NULLS LAST");
        sqlx::query_as::<_, BlogPost>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn list_published(&self) -> Result<Vec<BlogPost>, AppError> {
        let sql = format!(
            "SELECT {POST_COLUMNS} FROM blog_posts
            WHERE status = $1
            ORDER BY published_at DESC NULLS LAST, created_at DESC"
        );
        sqlx::query_as::<_, BlogPost>(&sql)
            .bind(ContentStatus::Published)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn get(&self, id: &Uuid) -> Result<Option<BlogPost>, AppError> {
        let sql = format!("SELECT {POST_COLUMNS} FROM blog_posts WHERE id = $1");
        sqlx::query_as::<_, BlogPost>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn get_published_by_slug(&self, slug: &str) -> Result<Option<BlogPost>, AppError> {
        let sql = format!("SELECT {POST_COLUMNS} FROM blog_posts WHERE slug = $1 AND status = $2");
        sqlx::query_as::<_, BlogPost>(&sql)
            .bind(slug)
            .bind(ContentStatus::Published)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn create(&self, post: &BlogPostWrite, author_id: Option<Uuid>) -> Result<BlogPost, AppError> {
        let sql = format!(
            r#"INSERT INTO blog_posts (
                title, slug, excerpt, content, category, tags, status,
                read_time, featured_image, published_at, author_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {POST_COLUMNS}"#
        );
        sqlx::query_as::<_, BlogPost>(&sql)
            .bind(&post.title)
            .bind(&post.slug)
            .bind(&post.excerpt)
            .bind(&post.content)
            .bind(&post.category)
            .bind(&post.tags)
            .bind(post.status)
            .bind(post.read_time)
            .bind(&post.featured_image)
            .bind(post.published_at)
            .bind(author_id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_write_error)
    }

    async fn update(&self, id: &Uuid, post: &BlogPostWrite) -> Result<BlogPost, AppError> {
        let sql = format!(
            r#"UPDATE blog_posts SET
                title = $2, slug = $3, excerpt = $4, content = $5, category = $6,
                tags = $7, status = $8, read_time = $9, featured_image = $10,
                published_at = $11, updated_at = NOW()
            WHERE id = $1
            RETURNING {POST_COLUMNS}"#
        );
        sqlx::query_as::<_, BlogPost>(&sql)
            .bind(id)
            .bind(&post.title)
            .bind(&post.slug)
            .bind(&post.excerpt)
            .bind(&post.content)
            .bind(&post.category)
            .bind(&post.tags)
            .bind(post.status)
            .bind(post.read_time)
            .bind(&post.featured_image)
            .bind(post.published_at)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_write_error)?
            .ok_or_else(|| AppError::NotFound(format!("Blog post with ID {} not found", id)))
    }

    async fn delete(&self, id: &Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM blog_posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Blog post with ID {} not found", id)));
        }
        Ok(())
    }

    async fn count(&self) -> Result<i64, AppError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM blog_posts")
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::from)
    }
}
