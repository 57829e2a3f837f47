use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::{common::SearchQuery, page::PageRequest},
    errors::AppError,
    use_cases::extractors::AdminClaims,
    AppState,
};

#[instrument(skip(_claims, state))]
pub async fn list_pages(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> Result<impl Responder, AppError> {
    let pages = state.page_handler.list(&query).await?;
    Ok(HttpResponse::Ok().json(pages))
}

#[instrument(skip(_claims, state))]
pub async fn get_page(
    _claims: AdminClaims,
    page_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let page = state.page_handler.get(&page_id).await?;
    Ok(HttpResponse::Ok().json(page))
}

#[instrument(skip(claims, state, data))]
pub async fn create_page(
    claims: AdminClaims,
    state: web::Data<AppState>,
    data: web::Json<PageRequest>,
) -> Result<impl Responder, AppError> {
    let page = state.page_handler.create(data.into_inner(), claims.user_id()).await?;
    Ok(HttpResponse::Created().json(page))
}

#[instrument(skip(_claims, state, data))]
pub async fn update_page(
    _claims: AdminClaims,
    page_id: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<PageRequest>,
) -> Result<impl Responder, AppError> {
    let page = state.page_handler.update(&page_id, data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(page))
}

#[instrument(skip(_claims, state))]
pub async fn delete_page(
    _claims: AdminClaims,
    page_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    state.page_handler.delete(&page_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[instrument(skip(state))]
pub async fn get_published_page(
    slug: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let page = state.page_handler.get_published(&slug).await?;
    Ok(HttpResponse::Ok().json(page))
}
