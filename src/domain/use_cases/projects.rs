use uuid::Uuid;

use crate::{
    entities::{
        common::SearchQuery,
        project::{Project, ProjectQuery, ProjectRequest},
    },
    errors::AppError,
    repositories::project::ProjectRepository,
    utils::valid_uuid::valid_uuid,
};

pub struct ProjectHandler<R>
where
    R: ProjectRepository,
{
    pub project_repo: R,
}

impl<R> ProjectHandler<R>
where
    R: ProjectRepository,
{
    pub fn new(project_repo: R) -> Self {
        ProjectHandler { project_repo }
    }

    pub async fn list(&self, query: &SearchQuery) -> Result<Vec<Project>, AppError> {
        self.project_repo.list(query.term()).await
    }

    pub async fn list_published(&self, query: &ProjectQuery) -> Result<Vec<Project>, AppError> {
        self.project_repo.list_published(query.featured).await
    }

    pub async fn get(&self, id: &str) -> Result<Project, AppError> {
        let valid_id = valid_uuid(id)?;
        self.project_repo.get(&valid_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Project with ID {} not found", valid_id)))
    }

    pub async fn create(&self, request: ProjectRequest, author_id: Option<Uuid>) -> Result<Project, AppError> {
        let write = request.into_write()?;
        let project = self.project_repo.create(&write, author_id).await?;

        tracing::info!(project_id = %project.id, "Project created");
        Ok(project)
    }

    pub async fn update(&self, id: &str, request: ProjectRequest) -> Result<Project, AppError> {
        let valid_id = valid_uuid(id)?;
        let write = request.into_write()?;
        self.project_repo.update(&valid_id, &write).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        let valid_id = valid_uuid(id)?;
        self.project_repo.delete(&valid_id).await
    }
}
