use chrono::Utc;
use uuid::Uuid;

use crate::{
    entities::invitation::{InvitationResponse, NewInvitationRequest},
    errors::AppError,
    repositories::invitation::InvitationRepository,
    utils::valid_uuid::valid_uuid,
};

pub struct InvitationHandler<R>
where
    R: InvitationRepository,
{
    pub invitation_repo: R,
}

impl<R> InvitationHandler<R>
where
    R: InvitationRepository,
{
    pub fn new(invitation_repo: R) -> Self {
        InvitationHandler { invitation_repo }
    }

    /// All codes, newest first, with their status as of now
    pub async fn list(&self) -> Result<Vec<InvitationResponse>, AppError> {
        let now = Utc::now();
        let codes = self.invitation_repo.list().await?;
        Ok(codes.into_iter().map(|c| InvitationResponse::at(c, now)).collect())
    }

    pub async fn create(
        &self,
        request: NewInvitationRequest,
        created_by: Option<Uuid>,
    ) -> Result<InvitationResponse, AppError> {
        let now = Utc::now();
        let insert = request.into_insert(created_by, now, &mut rand::thread_rng())?;
        let created = self.invitation_repo.create(&insert).await?;

        tracing::info!(code = %created.code, role = created.role.as_str(), "Invitation code created");
        Ok(InvitationResponse::at(created, now))
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        let valid_id = valid_uuid(id)?;
        self.invitation_repo.delete(&valid_id).await
    }
}
