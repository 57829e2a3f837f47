use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::entities::common::{
    clean_tags, non_blank, validate_not_blank, validate_optional_url, ContentStatus, MAX_TITLE_LENGTH,
};

const MAX_CATEGORY_LENGTH: u64 = 100;
const MAX_DESCRIPTION_LENGTH: u64 = 5000;

// ───── Database Models ───────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub title_en: Option<String>,
    pub description: Option<String>,
    pub description_en: Option<String>,
    pub category: Option<String>,
    pub category_en: Option<String>,
    pub image: Option<String>,
    pub tags: Option<Vec<String>>,
    pub link: Option<String>,
    pub featured: Option<bool>,
    pub sort_order: Option<i32>,
    pub status: Option<ContentStatus>,
    pub author_id: Option<Uuid>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectWrite {
    pub title: String,
    pub title_en: Option<String>,
    pub description: Option<String>,
    pub description_en: Option<String>,
    pub category: Option<String>,
    pub category_en: Option<String>,
    pub image: Option<String>,
    pub tags: Vec<String>,
    pub link: Option<String>,
    pub featured: bool,
    pub sort_order: i32,
    pub status: ContentStatus,
}

/// Tags arrive either as a JSON array or as one comma-separated string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum TagsInput {
    List(Vec<String>),
    Csv(String),
}

impl Default for TagsInput {
    fn default() -> Self {
        TagsInput::List(Vec::new())
    }
}

impl TagsInput {
    pub fn into_tags(self) -> Vec<String> {
        match self {
            TagsInput::List(tags) => clean_tags(&tags),
            TagsInput::Csv(raw) => {
                let parts: Vec<String> = raw.split(',').map(str::to_string).collect();
                clean_tags(&parts)
            }
        }
    }
}

// ───── Input & Validation Requests ──────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProjectRequest {
    #[validate(
        length(min = 1, max = MAX_TITLE_LENGTH, message = "Title must be between 1 and 200 characters"),
        custom(function = "validate_not_blank")
    )]
    pub title: String,

    #[validate(length(max = MAX_TITLE_LENGTH))]
    #[serde(default)]
    pub title_en: Option<String>,

    #[validate(length(max = MAX_DESCRIPTION_LENGTH))]
    #[serde(default)]
    pub description: Option<String>,

    #[validate(length(max = MAX_DESCRIPTION_LENGTH))]
    #[serde(default)]
    pub description_en: Option<String>,

    #[validate(length(max = MAX_CATEGORY_LENGTH))]
    #[serde(default)]
    pub category: Option<String>,

    #[validate(length(max = MAX_CATEGORY_LENGTH))]
    #[serde(default)]
    pub category_en: Option<String>,

    #[validate(custom(function = "validate_optional_url"))]
    #[serde(default)]
    pub image: Option<String>,

    #[serde(default)]
    pub tags: TagsInput,

    #[validate(custom(function = "validate_optional_url"))]
    #[serde(default)]
    pub link: Option<String>,

    #[serde(default)]
    pub featured: bool,

    #[serde(default)]
    pub sort_order: i32,

    #[serde(default)]
    pub status: ContentStatus,
}

impl ProjectRequest {
    pub fn into_write(self) -> Result<ProjectWrite, ValidationErrors> {
        self.validate()?;

        Ok(ProjectWrite {
            title: self.title.trim().to_string(),
            title_en: non_blank(self.title_en),
            description: non_blank(self.description),
            description_en: non_blank(self.description_en),
            category: non_blank(self.category),
            category_en: non_blank(self.category_en),
            image: non_blank(self.image),
            tags: self.tags.into_tags(),
            link: non_blank(self.link),
            featured: self.featured,
            sort_order: self.sort_order,
            status: self.status,
        })
    }
}

/// `?featured=true` filter on the public project list.
#[derive(Debug, Default, Deserialize)]
pub struct ProjectQuery {
    #[serde(default)]
    pub featured: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn comma_separated_tags_are_split() {
        let req: ProjectRequest = serde_json::from_value(json!({
            "title": "Kampania Facebook Ads",
            "tags": "Facebook Ads, Marketing, ,ROI "
        }))
        .unwrap();

        let write = req.into_write().unwrap();
        assert_eq!(write.tags, vec!["Facebook Ads", "Marketing", "ROI"]);
        assert!(!write.featured);
        assert_eq!(write.status, ContentStatus::Draft);
    }

    #[test]
    fn array_tags_are_cleaned() {
        let req: ProjectRequest = serde_json::from_value(json!({
            "title": "Strona WordPress",
            "tags": [" WordPress", "", "UX/UI"],
            "featured": true
        }))
        .unwrap();

        let write = req.into_write().unwrap();
        assert_eq!(write.tags, vec!["WordPress", "UX/UI"]);
        assert!(write.featured);
    }

    #[test]
    fn invalid_link_is_rejected() {
        let req: ProjectRequest = serde_json::from_value(json!({
            "title": "Projekt",
            "link": "javascript:alert(1)"
        }))
        .unwrap();
        assert!(req.into_write().is_err());
    }
}
