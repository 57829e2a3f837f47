use actix_multipart::form::MultipartForm;
use actix_web::{http::header, web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::{
        common::SearchQuery,
        media::{IncomingFile, MediaUpdateRequest, MediaUploadForm},
    },
    errors::AppError,
    use_cases::extractors::AdminClaims,
    AppState,
};

#[instrument(skip(_claims, state))]
pub async fn list_media(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> Result<impl Responder, AppError> {
    let items = state.media_handler.list(&query).await?;
    Ok(HttpResponse::Ok().json(items))
}

/// Accepts one or more `files` parts. Per-file failures are reported in
/// the body, so the response is 200 whenever the form itself parsed.
#[instrument(skip(claims, state, form))]
pub async fn upload_media(
    claims: AdminClaims,
    state: web::Data<AppState>,
    form: MultipartForm<MediaUploadForm>,
) -> Result<impl Responder, AppError> {
    if form.files.is_empty() {
        return Err(AppError::field("files", "At least one file is required"));
    }

    let files: Vec<IncomingFile> = form.files.iter().map(|f| IncomingFile {
        original_name: f.file_name.clone().unwrap_or_else(|| "upload".to_string()),
        content_type: f.content_type.as_ref().map(|m| m.to_string()),
        size: f.size,
        temp_path: f.file.path().to_path_buf(),
    }).collect();

    let report = state.media_handler.upload(files, claims.user_id()).await;

    Ok(HttpResponse::Ok().json(report))
}

#[instrument(skip(_claims, state, data))]
pub async fn update_media(
    _claims: AdminClaims,
    media_id: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<MediaUpdateRequest>,
) -> Result<impl Responder, AppError> {
    let item = state.media_handler.update(&media_id, data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(item))
}

#[instrument(skip(_claims, state))]
pub async fn delete_media(
    _claims: AdminClaims,
    media_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    state.media_handler.delete(&media_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Serves a stored object from the public media bucket.
#[instrument(skip(state))]
pub async fn serve_media(
    object_path: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let (bytes, mime) = state.media_handler.fetch_object(&object_path).await?;
    Ok(HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, mime))
        .insert_header((header::CACHE_CONTROL, "public, max-age=3600"))
        .body(bytes))
}
