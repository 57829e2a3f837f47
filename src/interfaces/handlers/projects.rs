use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::{common::SearchQuery, project::{ProjectQuery, ProjectRequest}},
    errors::AppError,
    use_cases::extractors::AdminClaims,
    AppState,
};

#[instrument(skip(_claims, state))]
pub async fn list_projects(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> Result<impl Responder, AppError> {
    let projects = state.project_handler.list(&query).await?;
    Ok(HttpResponse::Ok().json(projects))
}

#[instrument(skip(_claims, state))]
pub async fn get_project(
    _claims: AdminClaims,
    project_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let project = state.project_handler.get(&project_id).await?;
    Ok(HttpResponse::Ok().json(project))
}

#[instrument(skip(claims, state, data))]
pub async fn create_project(
    claims: AdminClaims,
    state: web::Data<AppState>,
    data: web::Json<ProjectRequest>,
) -> Result<impl Responder, AppError> {
    let project = state.project_handler.create(data.into_inner(), claims.user_id()).await?;
    Ok(HttpResponse::Created().json(project))
}

#[instrument(skip(_claims, state, data))]
pub async fn update_project(
    _claims: AdminClaims,
    project_id: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<ProjectRequest>,
) -> Result<impl Responder, AppError> {
    let project = state.project_handler.update(&project_id, data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(project))
}

#[instrument(skip(_claims, state))]
pub async fn delete_project(
    _claims: AdminClaims,
    project_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    state.project_handler.delete(&project_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[instrument(skip(state))]
pub async fn list_published_projects(
    state: web::Data<AppState>,
    query: web::Query<ProjectQuery>,
) -> Result<impl Responder, AppError> {
    let projects = state.project_handler.list_published(&query).await?;
    Ok(HttpResponse::Ok().json(projects))
}
