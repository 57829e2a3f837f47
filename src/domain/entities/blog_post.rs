use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::{
    entities::common::{
        clean_tags, non_blank, resolve_slug, validate_not_blank, validate_optional_url,
        ContentStatus, MAX_SLUG_LENGTH, MAX_TITLE_LENGTH,
    },
    utils::markdown::sanitize_html,
};

// ───── Constants ──────────────────────────────────────────────────────
pub const DEFAULT_READ_TIME: i32 = 5;
const MAX_EXCERPT_LENGTH: u64 = 500;
const MAX_CATEGORY_LENGTH: u64 = 100;
const MAX_READ_TIME: i32 = 600;

// ───── Database Models ───────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct BlogPost {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub content: Option<Value>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub status: Option<ContentStatus>,
    pub read_time: Option<i32>,
    pub featured_image: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub author_id: Option<Uuid>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl BlogPost {
    /// HTML body stored under `content.html`, empty when absent.
    pub fn content_html(&self) -> &str {
        self.content
            .as_ref()
            .and_then(|c| c.get("html"))
            .and_then(Value::as_str)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlogPostWrite {
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub content: Option<Value>,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub status: ContentStatus,
    pub read_time: i32,
    pub featured_image: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

// ───── API Response Models ──────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct BlogPostSummary {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub read_time: i32,
    pub featured_image: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

impl From<BlogPost> for BlogPostSummary {
    fn from(post: BlogPost) -> Self {
        BlogPostSummary {
            id: post.id,
            title: post.title,
            slug: post.slug,
            excerpt: post.excerpt,
            category: post.category,
            tags: post.tags.unwrap_or_default(),
            read_time: post.read_time.unwrap_or(DEFAULT_READ_TIME),
            featured_image: post.featured_image,
            published_at: post.published_at,
        }
    }
}

// ───── Input & Validation Requests ──────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BlogPostRequest {
    #[validate(
        length(min = 1, max = MAX_TITLE_LENGTH, message = "Title must be between 1 and 200 characters"),
        custom(function = "validate_not_blank")
    )]
    pub title: String,

    #[validate(length(max = MAX_SLUG_LENGTH))]
    #[serde(default)]
    pub slug: Option<String>,

    #[validate(length(max = MAX_EXCERPT_LENGTH))]
    #[serde(default)]
    pub excerpt: Option<String>,

    /// Editor HTML; sanitized before it is stored.
    #[serde(default)]
    pub content: Option<String>,

    #[validate(length(max = MAX_CATEGORY_LENGTH))]
    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub status: ContentStatus,

    #[validate(range(min = 1, max = MAX_READ_TIME, message = "Read time must be between 1 and 600 minutes"))]
    #[serde(default = "default_read_time")]
    pub read_time: i32,

    #[validate(custom(function = "validate_optional_url"))]
    #[serde(default)]
    pub featured_image: Option<String>,
}

fn default_read_time() -> i32 {
    DEFAULT_READ_TIME
}

impl BlogPostRequest {
    /// Resolves the stored values. `existing_published_at` is the current
    /// value on update; it is kept once set.
    pub fn into_write(
        self,
        existing_published_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Result<BlogPostWrite, ValidationErrors> {
        self.validate()?;

        let slug = resolve_slug(self.slug.as_deref(), &self.title)?;

        let content = self
            .content
            .filter(|html| !html.trim().is_empty())
            .map(|html| json!({ "html": sanitize_html(&html) }));

        let published_at = existing_published_at.or_else(|| {
            (self.status == ContentStatus::Published).then_some(now)
        });

        Ok(BlogPostWrite {
            title: self.title.trim().to_string(),
            slug,
            excerpt: non_blank(self.excerpt),
            content,
            category: non_blank(self.category),
            tags: clean_tags(&self.tags),
            status: self.status,
            read_time: self.read_time,
            featured_image: non_blank(self.featured_image),
            published_at,
        })
    }
}
