use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    entities::{
        common::like_pattern,
        media::{MediaInsert, MediaItem},
    },
    errors::AppError,
    repositories::sqlx_repo::SqlxMediaRepo,
};

const MEDIA_COLUMNS: &str = "id, name, file_path, file_type, file_size, alt_text, uploaded_by, created_at";

#[async_trait]
pub trait MediaRepository: Send + Sync {
    /// Newest first, filtered on name.
    async fn list(&self, search: Option<&str>) -> Result<Vec<MediaItem>, AppError>;
    async fn get(&self, id: &Uuid) -> Result<Option<MediaItem>, AppError>;
    async fn insert(&self, item: &MediaInsert) -> Result<MediaItem, AppError>;
    async fn update_details(&self, id: &Uuid, name: &str, alt_text: Option<&str>) -> Result<MediaItem, AppError>;
    async fn delete(&self, id: &Uuid) -> Result<(), AppError>;
    async fn count(&self) -> Result<i64, AppError>;
}

impl SqlxMediaRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxMediaRepo { pool }
    }
}

#[async_trait]
impl MediaRepository for SqlxMediaRepo {
    async fn list(&self, search: Option<&str>) -> Result<Vec<MediaItem>, AppError> {
        let sql = format!(
            "SELECT {MEDIA_COLUMNS} FROM media
            WHERE $1::text IS NULL OR name ILIKE $1
            ORDER BY created_at DESC NULLS LAST"
        );
        sqlx::query_as::<_, MediaItem>(&sql)
            .bind(search.map(like_pattern))
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn get(&self, id: &Uuid) -> Result<Option<MediaItem>, AppError> {
        let sql = format!("SELECT {MEDIA_COLUMNS} FROM media WHERE id = $1");
        sqlx::query_as::<_, MediaItem>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn insert(&self, item: &MediaInsert) -> Result<MediaItem, AppError> {
        let sql = format!(
            r#"INSERT INTO media (name, file_path, file_type, file_size, uploaded_by)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {MEDIA_COLUMNS}"#
        );
        sqlx::query_as::<_, MediaItem>(&sql)
            .bind(&item.name)
            .bind(&item.file_path)
            .bind(&item.file_type)
            .bind(item.file_size)
            .bind(item.uploaded_by)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn update_details(&self, id: &Uuid, name: &str, alt_text: Option<&str>) -> Result<MediaItem, AppError> {
        let sql = format!(
            "UPDATE media SET name = $2, alt_text = $3 WHERE id = $1 RETURNING {MEDIA_COLUMNS}"
        );
        sqlx::query_as::<_, MediaItem>(&sql)
            .bind(id)
            .bind(name)
            .bind(alt_text)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Media with ID {} not found", id)))
    }

    async fn delete(&self, id: &Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM media WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Media with ID {} not found", id)));
        }
        Ok(())
    }

    async fn count(&self) -> Result<i64, AppError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM media")
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::from)
    }
}
