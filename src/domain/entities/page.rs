use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::entities::common::{
    new_validation_error, non_blank, resolve_slug, validate_not_blank, validate_optional_url,
    ContentStatus, MAX_SLUG_LENGTH, MAX_TITLE_LENGTH,
};

const MAX_META_DESCRIPTION_LENGTH: u64 = 300;
const MAX_META_KEYWORDS_LENGTH: u64 = 300;

// ───── Database Models ───────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Page {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub content: Option<Value>,
    pub meta_description: Option<String>,
    pub meta_keywords: Option<String>,
    pub featured_image: Option<String>,
    pub parent_id: Option<Uuid>,
    pub status: Option<ContentStatus>,
    pub sort_order: Option<i32>,
    pub author_id: Option<Uuid>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Fully resolved values written on create and on update.
#[derive(Debug, Clone, PartialEq)]
pub struct PageWrite {
    pub title: String,
    pub slug: String,
    pub content: Option<Value>,
    pub meta_description: Option<String>,
    pub meta_keywords: Option<String>,
    pub featured_image: Option<String>,
    pub parent_id: Option<Uuid>,
    pub status: ContentStatus,
    pub sort_order: i32,
}

// ───── Input & Validation Requests ──────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PageRequest {
    #[validate(
        length(min = 1, max = MAX_TITLE_LENGTH, message = "Title must be between 1 and 200 characters"),
        custom(function = "validate_not_blank")
    )]
    pub title: String,

    #[validate(length(max = MAX_SLUG_LENGTH))]
    #[serde(default)]
    pub slug: Option<String>,

    #[serde(default)]
    pub content: Option<Value>,

    #[validate(length(max = MAX_META_DESCRIPTION_LENGTH))]
    #[serde(default)]
    pub meta_description: Option<String>,

    #[validate(length(max = MAX_META_KEYWORDS_LENGTH))]
    #[serde(default)]
    pub meta_keywords: Option<String>,

    #[validate(custom(function = "validate_optional_url"))]
    #[serde(default)]
    pub featured_image: Option<String>,

    #[serde(default)]
    pub parent_id: Option<Uuid>,

    #[serde(default)]
    pub status: ContentStatus,

    #[serde(default)]
    pub sort_order: i32,
}

impl PageRequest {
    /// Validates the form and resolves the slug. `page_id` is the id being
    /// updated, used to reject a page that names itself as parent.
    pub fn into_write(self, page_id: Option<Uuid>) -> Result<PageWrite, ValidationErrors> {
        self.validate()?;

        if page_id.is_some() && self.parent_id == page_id {
            let mut errors = ValidationErrors::new();
            errors.add(
                "parent_id",
                new_validation_error("parent_is_self", "A page cannot be its own parent"),
            );
            return Err(errors);
        }

        let slug = resolve_slug(self.slug.as_deref(), &self.title)?;

        Ok(PageWrite {
            title: self.title.trim().to_string(),
            slug,
            content: self.content.filter(|c| !c.is_null()),
            meta_description: non_blank(self.meta_description),
            meta_keywords: non_blank(self.meta_keywords),
            featured_image: non_blank(self.featured_image),
            parent_id: self.parent_id,
            status: self.status,
            sort_order: self.sort_order,
        })
    }
}
