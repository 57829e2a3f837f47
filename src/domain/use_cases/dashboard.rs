use futures::try_join;
use serde::Serialize;
use uuid::Uuid;

use crate::{
    entities::user::AppRole,
    errors::AppError,
    repositories::{
        blog_post::BlogPostRepository, media::MediaRepository, page::PageRepository,
        user::UserRepository,
    },
};

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct DashboardStats {
    pub pages: i64,
    pub posts: i64,
    pub media: i64,
}

pub struct DashboardHandler<U, P, B, M>
where
    U: UserRepository,
    P: PageRepository,
    B: BlogPostRepository,
    M: MediaRepository,
{
    pub user_repo: U,
    pub page_repo: P,
    pub blog_post_repo: B,
    pub media_repo: M,
}

impl<U, P, B, M> DashboardHandler<U, P, B, M>
where
    U: UserRepository,
    P: PageRepository,
    B: BlogPostRepository,
    M: MediaRepository,
{
    pub fn new(user_repo: U, page_repo: P, blog_post_repo: B, media_repo: M) -> Self {
        DashboardHandler { user_repo, page_repo, blog_post_repo, media_repo }
    }

    /// Content counts. The admin role is re-checked in the database rather
    /// than trusted from the token.
    pub async fn stats(&self, user_id: &Uuid) -> Result<DashboardStats, AppError> {
        if !self.user_repo.has_role(user_id, AppRole::Admin).await? {
            tracing::warn!(%user_id, "Dashboard requested without admin role");
            return Err(AppError::ForbiddenAccess);
        }

        let (pages, posts, media) = try_join!(
            self.page_repo.count(),
            self.blog_post_repo.count(),
            self.media_repo.count(),
        )?;

        Ok(DashboardStats { pages, posts, media })
    }
}
