use actix_web::{web, HttpRequest, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::{
        token::RefreshTokenRequest,
        user::{LoginUser, LogoutRequest, RegisterRequest},
    },
    errors::{AppError, AuthError},
    middlewares::auth::bearer_token,
    AppState,
};

#[instrument(skip(state, request))]
pub async fn register(
    state: web::Data<AppState>,
    request: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    let response = state.auth_handler.register(request.into_inner()).await?;
    Ok(HttpResponse::Created().json(response))
}

#[instrument(skip(state, request))]
pub async fn login(
    state: web::Data<AppState>,
    request: web::Json<LoginUser>,
) -> Result<impl Responder, AuthError> {
    let response = state.auth_handler.login(request.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[instrument(skip(state, request))]
pub async fn refresh_token(
    state: web::Data<AppState>,
    request: web::Json<RefreshTokenRequest>,
) -> Result<impl Responder, AuthError> {
    let response = state.auth_handler.refresh_token(&request.refresh_token).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[instrument(skip(req, state, body))]
pub async fn logout(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<LogoutRequest>,
) -> Result<impl Responder, AuthError> {
    let access_token = bearer_token(&req).ok_or(AuthError::MissingCredentials)?;

    state.auth_handler.logout(&access_token, &body.refresh_token).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Logged out successfully" })))
}
