use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    entities::invitation::{normalize_code, InvitationCode, InvitationInsert},
    errors::{is_unique_violation, AppError},
    repositories::sqlx_repo::SqlxInvitationRepo,
};

const INVITATION_COLUMNS: &str = "id, code, role, max_uses, current_uses, expires_at, created_by, \
    used_at, used_by, created_at";

#[async_trait]
pub trait InvitationRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<InvitationCode>, AppError>;
    /// Looks a code up after trimming and upper-casing it.
    async fn find_by_code(&self, code: &str) -> Result<Option<InvitationCode>, AppError>;
    async fn create(&self, invitation: &InvitationInsert) -> Result<InvitationCode, AppError>;
    async fn delete(&self, id: &Uuid) -> Result<(), AppError>;
}

impl SqlxInvitationRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxInvitationRepo { pool }
    }
}

#[async_trait]
impl InvitationRepository for SqlxInvitationRepo {
    async fn list(&self) -> Result<Vec<InvitationCode>, AppError> {
        let sql = format!(
            "SELECT {INVITATION_COLUMNS} FROM invitation_codes ORDER BY created_at DESC NULLS LAST"
        );
        sqlx::query_as::<_, InvitationCode>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<InvitationCode>, AppError> {
        let sql = format!("SELECT {INVITATION_COLUMNS} FROM invitation_codes WHERE code = $1");
        sqlx::query_as::<_, InvitationCode>(&sql)
            .bind(normalize_code(code))
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn create(&self, invitation: &InvitationInsert) -> Result<InvitationCode, AppError> {
        let sql = format!(
            r#"INSERT INTO invitation_codes (code, role, max_uses, current_uses, expires_at, created_by)
            VALUES ($1, $2, $3, 0, $4, $5)
            RETURNING {INVITATION_COLUMNS}"#
        );
        sqlx::query_as::<_, InvitationCode>(&sql)
            .bind(&invitation.code)
            .bind(invitation.role)
            .bind(invitation.max_uses)
            .bind(invitation.expires_at)
            .bind(invitation.created_by)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AppError::Conflict("Invitation code already exists".to_string())
                } else {
                    AppError::from(e)
                }
            })
    }

    async fn delete(&self, id: &Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM invitation_codes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Invitation with ID {} not found", id)));
        }
        Ok(())
    }
}
