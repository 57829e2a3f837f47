use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    entities::{
        common::{like_pattern, ContentStatus},
        project::{Project, ProjectWrite},
    },
    errors::AppError,
    repositories::sqlx_repo::SqlxProjectRepo,
};

const PROJECT_COLUMNS: &str = "id, title, title_en, description, description_en, category, category_en, \
    image, tags, link, featured, sort_order, status, author_id, created_at, updated_at";

#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Admin list ordered by `sort_order`, filtered on title or category.
    async fn list(&self, search: Option<&str>) -> Result<Vec<Project>, AppError>;
    async fn list_published(&self, featured_only: bool) -> Result<Vec<Project>, AppError>;
    async fn get(&self, id: &Uuid) -> Result<Option<Project>, AppError>;
    async fn create(&self, project: &ProjectWrite, author_id: Option<Uuid>) -> Result<Project, AppError>;
    async fn update(&self, id: &Uuid, project: &ProjectWrite) -> Result<Project, AppError>;
    async fn delete(&self, id: &Uuid) -> Result<(), AppError>;
}

impl SqlxProjectRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxProjectRepo { pool }
    }
}

#[async_trait]
impl ProjectRepository for SqlxProjectRepo {
    async fn list(&self, search: Option<&str>) -> Result<Vec<Project>, AppError> {
        let sql = format!(
            "SELECT {PROJECT_COLUMNS} FROM projects
            WHERE $1::text IS NULL OR title ILIKE $1 OR category ILIKE $1
            ORDER BY sort_order ASC NULLS LAST, created_at DESC"
        );
        sqlx::query_as::<_, Project>(&sql)
            .bind(search.map(like_pattern))
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn list_published(&self, featured_only: bool) -> Result<Vec<Project>, AppError> {
        let sql = format!(
            "SELECT {PROJECT_COLUMNS} FROM projects
            WHERE status = $1 AND (NOT $2 OR featured IS TRUE)
            ORDER BY sort_order ASC NULLS LAST, created_at DESC"
        );
        sqlx::query_as::<_, Project>(&sql)
            .bind(ContentStatus::Published)
            .bind(featured_only)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn get(&self, id: &Uuid) -> Result<Option<Project>, AppError> {
        let sql = format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn create(&self, project: &ProjectWrite, author_id: Option<Uuid>) -> Result<Project, AppError> {
        let sql = format!(
            r#"INSERT INTO projects (
                title, title_en, description, description_en, category, category_en,
                image, tags, link, featured, sort_order, status, author_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING {PROJECT_COLUMNS}"#
        );
        sqlx::query_as::<_, Project>(&sql)
            .bind(&project.title)
            .bind(&project.title_en)
            .bind(&project.description)
            .bind(&project.description_en)
            .bind(&project.category)
            .bind(&project.category_en)
            .bind(&project.image)
            .bind(&project.tags)
            .bind(&project.link)
            .bind(project.featured)
            .bind(project.sort_order)
            .bind(project.status)
            .bind(author_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn update(&self, id: &Uuid, project: &ProjectWrite) -> Result<Project, AppError> {
        let sql = format!(
            r#"UPDATE projects SET
                title = $2, title_en = $3, description = $4, description_en = $5,
                category = $6, category_en = $7, image = $8, tags = $9, link = $10,
                featured = $11, sort_order = $12, status = $13, updated_at = NOW()
            WHERE id = $1
            RETURNING {PROJECT_COLUMNS}"#
        );
        sqlx::query_as::<_, Project>(&sql)
            .bind(id)
            .bind(&project.title)
            .bind(&project.title_en)
            .bind(&project.description)
            .bind(&project.description_en)
            .bind(&project.category)
            .bind(&project.category_en)
            .bind(&project.image)
            .bind(&project.tags)
            .bind(&project.link)
            .bind(project.featured)
            .bind(project.sort_order)
            .bind(project.status)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Project with ID {} not found", id)))
    }

    async fn delete(&self, id: &Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Project with ID {} not found", id)));
        }
        Ok(())
    }
}
