use async_trait::async_trait;
use serde_json::Value;

use crate::{
    entities::site_setting::SiteSettingRow,
    errors::AppError,
    repositories::sqlx_repo::SqlxSiteSettingRepo,
};

#[async_trait]
pub trait SiteSettingRepository: Send + Sync {
    async fn list_all(&self) -> Result<Vec<SiteSettingRow>, AppError>;
    async fn get(&self, key: &str) -> Result<Option<SiteSettingRow>, AppError>;
    /// Inserts the key or replaces its value.
    async fn upsert(&self, key: &str, value: &Value) -> Result<SiteSettingRow, AppError>;
}

impl SqlxSiteSettingRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxSiteSettingRepo { pool }
    }
}

#[async_trait]
impl SiteSettingRepository for SqlxSiteSettingRepo {
    async fn list_all(&self) -> Result<Vec<SiteSettingRow>, AppError> {
        sqlx::query_as::<_, SiteSettingRow>(
            "SELECT id, key, value, updated_at FROM site_settings ORDER BY key"
        )
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)
    }

    async fn get(&self, key: &str) -> Result<Option<SiteSettingRow>, AppError> {
        sqlx::query_as::<_, SiteSettingRow>(
            "SELECT id, key, value, updated_at FROM site_settings WHERE key = $1"
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)
    }

    async fn upsert(&self, key: &str, value: &Value) -> Result<SiteSettingRow, AppError> {
        sqlx::query_as::<_, SiteSettingRow>(
            r#"INSERT INTO site_settings (key, value)
            VALUES ($1, $2)
            ON CONFLICT (key) DO UPDATE
            SET value = EXCLUDED.value, updated_at = NOW()
            RETURNING id, key, value, updated_at"#
        )
        .bind(key)
        .bind(value)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)
    }
}
