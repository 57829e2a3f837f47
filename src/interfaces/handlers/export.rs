use actix_web::{
    http::header::{self, ContentDisposition, DispositionParam, DispositionType},
    web, HttpResponse, Responder,
};
use chrono::Utc;
use tracing::instrument;

use crate::{
    errors::AppError,
    use_cases::{export::export_filename, extractors::AdminClaims},
    AppState,
};

/// Downloads the whole-site XML snapshot as an attachment.
#[instrument(skip(_claims, state))]
pub async fn export_website(
    _claims: AdminClaims,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let now = Utc::now();
    let document = state.export_handler.export_at(now).await.map_err(|e| {
        tracing::error!("Website export failed: {}", e);
        AppError::InternalError("Website export failed".to_string())
    })?;

    Ok(HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, "application/xml; charset=utf-8"))
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(export_filename(now))],
        })
        .body(document))
}

