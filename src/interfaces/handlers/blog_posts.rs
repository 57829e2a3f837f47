use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::{blog_post::BlogPostRequest, common::SearchQuery},
    errors::AppError,
    use_cases::extractors::AdminClaims,
    AppState,
};

#[instrument(skip(_claims, state))]
pub async fn list_blog_posts(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> Result<impl Responder, AppError> {
    let posts = state.blog_handler.list(&query).await?;
    Ok(HttpResponse::Ok().json(posts))
}

#[instrument(skip(_claims, state))]
pub async fn get_blog_post(
    _claims: AdminClaims,
    post_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let post = state.blog_handler.get(&post_id).await?;
    Ok(HttpResponse::Ok().json(post))
}

#[instrument(skip(claims, state, data))]
pub async fn create_blog_post(
    claims: AdminClaims,
    state: web::Data<AppState>,
    data: web::Json<BlogPostRequest>,
) -> Result<impl Responder, AppError> {
    let post = state.blog_handler.create(data.into_inner(), claims.user_id()).await?;
    Ok(HttpResponse::Created().json(post))
}

#[instrument(skip(_claims, state, data))]
pub async fn update_blog_post(
    _claims: AdminClaims,
    post_id: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<BlogPostRequest>,
) -> Result<impl Responder, AppError> {
    let post = state.blog_handler.update(&post_id, data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(post))
}

#[instrument(skip(_claims, state))]
pub async fn delete_blog_post(
    _claims: AdminClaims,
    post_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    state.blog_handler.delete(&post_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[instrument(skip(state))]
pub async fn list_published_posts(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let posts = state.blog_handler.list_published().await?;
    Ok(HttpResponse::Ok().json(posts))
}

#[instrument(skip(state))]
pub async fn get_published_post(
    slug: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let post = state.blog_handler.get_published(&slug).await?;
    Ok(HttpResponse::Ok().json(post))
}
