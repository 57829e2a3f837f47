use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    entities::user::{AppRole, Profile, User, UserInsert},
    errors::{is_unique_violation, AppError},
    repositories::sqlx_repo::SqlxUserRepo,
};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn check_connection(&self) -> Result<(), AppError>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn get_user_by_id(&self, id: &Uuid) -> Result<Option<User>, AppError>;
    async fn get_profile(&self, id: &Uuid) -> Result<Option<Profile>, AppError>;
    async fn get_roles(&self, user_id: &Uuid) -> Result<Vec<AppRole>, AppError>;
    /// Fresh role check through the `has_role` database function.
    async fn has_role(&self, user_id: &Uuid, role: AppRole) -> Result<bool, AppError>;
    /// Creates the account and profile and redeems `code` in one transaction.
    /// Returns `None`, with nothing persisted, when the code cannot be used.
    async fn create_user_with_invitation(&self, user: &UserInsert, code: &str) -> Result<Option<Uuid>, AppError>;
}

impl SqlxUserRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxUserRepo { pool }
    }
}

#[async_trait]
impl UserRepository for SqlxUserRepo {
    async fn check_connection(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(AppError::from)
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, created_at, updated_at FROM users WHERE email = $1"
        )
        .bind(email.trim().to_lowercase())
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)
    }

    async fn get_user_by_id(&self, id: &Uuid) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, created_at, updated_at FROM users WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)
    }

    async fn get_profile(&self, id: &Uuid) -> Result<Option<Profile>, AppError> {
        sqlx::query_as::<_, Profile>(
            "SELECT id, email, full_name, avatar_url, created_at, updated_at FROM profiles WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)
    }

    async fn get_roles(&self, user_id: &Uuid) -> Result<Vec<AppRole>, AppError> {
        sqlx::query_scalar::<_, AppRole>(
            "SELECT role FROM user_roles WHERE user_id = $1 ORDER BY role"
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)
    }

    async fn has_role(&self, user_id: &Uuid, role: AppRole) -> Result<bool, AppError> {
        sqlx::query_scalar::<_, bool>("SELECT public.has_role($1, $2)")
            .bind(user_id)
            .bind(role)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn create_user_with_invitation(&self, user: &UserInsert, code: &str) -> Result<Option<Uuid>, AppError> {
        let mut tx = self.pool.begin().await?;

        let user_id: Uuid = sqlx::query_scalar(
            r#"INSERT INTO users (email, password_hash)
            VALUES ($1, $2)
            RETURNING id
            "#
        )
        .bind(&user.email)
        .bind(&user.password_hash)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict("User with this email already exists".to_string())
            } else {
                AppError::from(e)
            }
        })?;

        sqlx::query("INSERT INTO profiles (id, email, full_name) VALUES ($1, $2, $3)")
            .bind(user_id)
            .bind(&user.email)
            .bind(&user.full_name)
            .execute(&mut *tx)
            .await?;

        let redeemed: bool = sqlx::query_scalar("SELECT public.use_invitation_code($1, $2)")
            .bind(code)
            .bind(user_id)
            .fetch_one(&mut *tx)
            .await?;

        if !redeemed {
            tx.rollback().await?;
            return Ok(None);
        }

        tx.commit().await?;
        Ok(Some(user_id))
    }
}
