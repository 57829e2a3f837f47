use actix_web::{web, HttpResponse, Responder};
use serde_json::Value;
use tracing::instrument;

use crate::{entities::site_setting::SettingError, use_cases::extractors::AdminClaims, AppState};

/// Public read; unknown keys are 404 and missing rows fall back to defaults.
#[instrument(skip(state))]
pub async fn get_setting(
    key: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, SettingError> {
    let setting = state.settings_handler.get(&key).await?;
    Ok(HttpResponse::Ok().json(setting))
}

#[instrument(skip(_claims, state))]
pub async fn list_settings(
    _claims: AdminClaims,
    state: web::Data<AppState>,
) -> Result<impl Responder, SettingError> {
    let settings = state.settings_handler.list().await?;
    Ok(HttpResponse::Ok().json(settings))
}

#[instrument(skip(_claims, state, value))]
pub async fn update_setting(
    _claims: AdminClaims,
    key: web::Path<String>,
    state: web::Data<AppState>,
    value: web::Json<Value>,
) -> Result<impl Responder, SettingError> {
    let setting = state.settings_handler.save(&key, value.into_inner()).await?;
    Ok(HttpResponse::Ok().json(setting))
}
