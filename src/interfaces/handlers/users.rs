use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;
use uuid::Uuid;

use crate::{errors::{AppError, AuthError}, use_cases::extractors::AuthClaims, AppState};

#[instrument(skip(claims, state))]
pub async fn me(
    claims: AuthClaims,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let user_id = Uuid::parse_str(&claims.0.sub).map_err(|_| AuthError::InvalidUserId)?;
    let profile = state.auth_handler.me(&user_id).await?;
    Ok(HttpResponse::Ok().json(profile))
}
