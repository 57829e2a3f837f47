use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::invitation::NewInvitationRequest,
    errors::AppError,
    use_cases::extractors::AdminClaims,
    AppState,
};

#[instrument(skip(_claims, state))]
pub async fn list_invitations(
    _claims: AdminClaims,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let invitations = state.invitation_handler.list().await?;
    Ok(HttpResponse::Ok().json(invitations))
}

#[instrument(skip(claims, state, data))]
pub async fn create_invitation(
    claims: AdminClaims,
    state: web::Data<AppState>,
    data: web::Json<NewInvitationRequest>,
) -> Result<impl Responder, AppError> {
    let invitation = state.invitation_handler
        .create(data.into_inner(), claims.user_id())
        .await?;
    Ok(HttpResponse::Created().json(invitation))
}

#[instrument(skip(_claims, state))]
pub async fn delete_invitation(
    _claims: AdminClaims,
    invitation_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    state.invitation_handler.delete(&invitation_id).await?;
    Ok(HttpResponse::NoContent().finish())
}
