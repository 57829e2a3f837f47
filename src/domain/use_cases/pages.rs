use uuid::Uuid;

use crate::{
    entities::{common::SearchQuery, page::{Page, PageRequest}},
    errors::AppError,
    repositories::page::PageRepository,
    utils::valid_uuid::valid_uuid,
};

pub struct PageHandler<R>
where
    R: PageRepository,
{
    pub page_repo: R,
}

impl<R> PageHandler<R>
where
    R: PageRepository,
{
    pub fn new(page_repo: R) -> Self {
        PageHandler { page_repo }
    }

    pub async fn list(&self, query: &SearchQuery) -> Result<Vec<Page>, AppError> {
        self.page_repo.list(query.term()).await
    }

    pub async fn get(&self, id: &str) -> Result<Page, AppError> {
        let valid_id = valid_uuid(id)?;
        self.page_repo.get(&valid_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Page with ID {} not found", valid_id)))
    }

    /// Published page for the public site
    pub async fn get_published(&self, slug: &str) -> Result<Page, AppError> {
        self.page_repo.get_published_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Page '{}' not found", slug)))
    }

    pub async fn create(&self, request: PageRequest, author_id: Option<Uuid>) -> Result<Page, AppError> {
        let write = request.into_write(None)?;
        let page = self.page_repo.create(&write, author_id).await?;

        tracing::info!(page_id = %page.id, slug = %page.slug, "Page created");
        Ok(page)
    }

    /// Overwrites every field of the page
    pub async fn update(&self, id: &str, request: PageRequest) -> Result<Page, AppError> {
        let valid_id = valid_uuid(id)?;
        let write = request.into_write(Some(valid_id))?;
        self.page_repo.update(&valid_id, &write).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        let valid_id = valid_uuid(id)?;
        self.page_repo.delete(&valid_id).await
    }
}
