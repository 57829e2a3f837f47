use std::path::Path;

use anyhow::Context;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::utils::markdown::safe_markdown_to_html;

const BUNDLED_CONTENT: &str = include_str!("../../../content/portfolio.json");

// ───── Localization ─────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalizedText {
    pub pl: String,
    pub en: String,
}

impl LocalizedText {
    pub fn get(&self, language: Language) -> &str {
        match language {
            Language::Pl => &self.pl,
            Language::En => &self.en,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Pl,
    En,
}

#[derive(Debug, Default, Deserialize)]
pub struct LanguageQuery {
    #[serde(default)]
    pub lang: Language,
}

// ───── Static Records ───────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticProject {
    pub id: String,
    pub title: LocalizedText,
    pub description: LocalizedText,
    pub category: LocalizedText,
    pub image: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticBlogPost {
    pub id: String,
    pub title: LocalizedText,
    pub excerpt: LocalizedText,
    /// Markdown body.
    pub content: LocalizedText,
    pub category: String,
    pub category_label: LocalizedText,
    pub image: String,
    pub date: NaiveDate,
    pub read_time: LocalizedText,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub features: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogCategory {
    pub id: String,
    pub label: LocalizedText,
    pub slug: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectCategory {
    pub id: String,
    pub label: LocalizedText,
}

/// Hard-coded bilingual portfolio content shipped with the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticContent {
    pub projects: Vec<StaticProject>,
    pub project_categories: Vec<ProjectCategory>,
    pub blog_posts: Vec<StaticBlogPost>,
    pub services: Vec<Service>,
    pub blog_categories: Vec<BlogCategory>,
}

impl StaticContent {
    /// Content compiled into the binary.
    pub fn bundled() -> Result<Self, serde_json::Error> {
        serde_json::from_str(BUNDLED_CONTENT)
    }

    /// Reads `path` when given, otherwise falls back to the bundled copy.
    pub async fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => {
                let raw = tokio::fs::read_to_string(path)
                    .await
                    .with_context(|| format!("reading static content from {}", path.display()))?;
                serde_json::from_str(&raw)
                    .with_context(|| format!("parsing static content from {}", path.display()))
            }
            None => Self::bundled().context("parsing bundled static content"),
        }
    }

    pub fn localized(&self, language: Language) -> LocalizedContent {
        LocalizedContent {
            language,
            projects: self.projects.iter().map(|p| LocalizedProject {
                id: p.id.clone(),
                title: p.title.get(language).to_string(),
                description: p.description.get(language).to_string(),
                category: p.category.get(language).to_string(),
                image: p.image.clone(),
                tags: p.tags.clone(),
            }).collect(),
            services: self.services.clone(),
            blog_posts: self.blog_posts.iter().map(|b| LocalizedBlogPost {
                id: b.id.clone(),
                title: b.title.get(language).to_string(),
                excerpt: b.excerpt.get(language).to_string(),
                content_html: safe_markdown_to_html(b.content.get(language)),
                category: b.category.clone(),
                category_label: b.category_label.get(language).to_string(),
                image: b.image.clone(),
                date: b.date,
                read_time: b.read_time.get(language).to_string(),
            }).collect(),
            blog_categories: self.blog_categories.iter().map(|c| LocalizedCategory {
                id: c.id.clone(),
                slug: Some(c.slug.clone()),
                label: c.label.get(language).to_string(),
            }).collect(),
            project_categories: self.project_categories.iter().map(|c| LocalizedCategory {
                id: c.id.clone(),
                slug: None,
                label: c.label.get(language).to_string(),
            }).collect(),
        }
    }
}

// ───── API Response Models ──────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedContent {
    pub language: Language,
    pub projects: Vec<LocalizedProject>,
    pub services: Vec<Service>,
    pub blog_posts: Vec<LocalizedBlogPost>,
    pub blog_categories: Vec<LocalizedCategory>,
    pub project_categories: Vec<LocalizedCategory>,
}

#[derive(Debug, Serialize)]
pub struct LocalizedProject {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub image: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedBlogPost {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub content_html: String,
    pub category: String,
    pub category_label: String,
    pub image: String,
    pub date: NaiveDate,
    pub read_time: String,
}

#[derive(Debug, Serialize)]
pub struct LocalizedCategory {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    pub label: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_content_parses() {
        let content = StaticContent::bundled().unwrap();
        assert_eq!(content.projects.len(), 4);
        assert_eq!(content.services.len(), 5);
        assert_eq!(content.blog_posts.len(), 4);
        assert_eq!(content.blog_categories.len(), 5);
        assert_eq!(content.project_categories.len(), 5);
    }

    #[test]
    fn english_view_uses_english_text() {
        let content = StaticContent::bundled().unwrap();
        let en = content.localized(Language::En);
        assert_eq!(en.projects[0].title, "WordPress Website for Creativity Embassy");
        assert_eq!(en.blog_categories[2].label, "Security");
        assert!(en.blog_posts[0].content_html.starts_with("<p>"));
    }

    #[test]
    fn language_defaults_to_polish() {
        let query: LanguageQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.lang, Language::Pl);
    }

    #[tokio::test]
    async fn load_reads_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("content.json");
        tokio::fs::write(
            &path,
            r#"{"projects":[],"projectCategories":[],"blogPosts":[],"services":[],"blogCategories":[]}"#,
        )
        .await
        .unwrap();

        let content = StaticContent::load(Some(&path)).await.unwrap();
        assert!(content.projects.is_empty());
        assert!(StaticContent::load(Some(&dir.path().join("missing.json"))).await.is_err());
    }
}
