use chrono::Utc;
use uuid::Uuid;

use crate::{
    entities::{
        blog_post::{BlogPost, BlogPostRequest, BlogPostSummary},
        common::SearchQuery,
    },
    errors::AppError,
    repositories::blog_post::BlogPostRepository,
    utils::valid_uuid::valid_uuid,
};

pub struct BlogPostHandler<R>
where
    R: BlogPostRepository,
{
    pub blog_post_repo: R,
}

impl<R> BlogPostHandler<R>
where
    R: BlogPostRepository,
{
    pub fn new(blog_post_repo: R) -> Self {
        BlogPostHandler { blog_post_repo }
    }

    pub async fn list(&self, query: &SearchQuery) -> Result<Vec<BlogPost>, AppError> {
        self.blog_post_repo.list(query.term()).await
    }

    /// Published posts, newest first
    pub async fn list_published(&self) -> Result<Vec<BlogPostSummary>, AppError> {
        let posts = self.blog_post_repo.list_published().await?;
        Ok(posts.into_iter().map(BlogPostSummary::from).collect())
    }

    pub async fn get(&self, id: &str) -> Result<BlogPost, AppError> {
        let valid_id = valid_uuid(id)?;
        self.blog_post_repo.get(&valid_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Blog post with ID {} not found", valid_id)))
    }

    pub async fn get_published(&self, slug: &str) -> Result<BlogPost, AppError> {
        self.blog_post_repo.get_published_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Blog post '{}' not found", slug)))
    }

    /// Creates a post; publishing it stamps `published_at`
    pub async fn create(&self, request: BlogPostRequest, author_id: Option<Uuid>) -> Result<BlogPost, AppError> {
        let write = request.into_write(None, Utc::now())?;
        let post = self.blog_post_repo.create(&write, author_id).await?;

        tracing::info!(post_id = %post.id, slug = %post.slug, "Blog post created");
        Ok(post)
    }

    /// Overwrites the post, keeping an existing `published_at`
    pub async fn update(&self, id: &str, request: BlogPostRequest) -> Result<BlogPost, AppError> {
        let valid_id = valid_uuid(id)?;
        let existing = self.blog_post_repo.get(&valid_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Blog post with ID {} not found", valid_id)))?;

        let write = request.into_write(existing.published_at, Utc::now())?;
        self.blog_post_repo.update(&valid_id, &write).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        let valid_id = valid_uuid(id)?;
        self.blog_post_repo.delete(&valid_id).await
    }
}
