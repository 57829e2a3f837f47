//! Whole-site XML snapshot for manual backup.
//!
//! Static content comes from memory, dynamic content from three concurrent
//! repository reads. A failed read exports that section empty.

use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use futures::future::join3;
use serde_json::Value;

use crate::{
    entities::{
        blog_post::BlogPost,
        page::Page,
        site_setting::SiteSettingRow,
        static_content::{LocalizedText, StaticContent},
    },
    errors::AppError,
    repositories::{
        blog_post::BlogPostRepository, page::PageRepository, site_setting::SiteSettingRepository,
    },
    utils::xml::XmlWriter,
};

/// Everything that goes into one export document.
pub struct ExportSnapshot<'a> {
    pub site_name: &'a str,
    pub site_description: &'a str,
    pub static_content: &'a StaticContent,
    pub blog_posts: &'a [BlogPost],
    pub pages: &'a [Page],
    pub settings: &'a [SiteSettingRow],
}

pub struct ExportHandler<B, P, S>
where
    B: BlogPostRepository,
    P: PageRepository,
    S: SiteSettingRepository,
{
    pub blog_post_repo: B,
    pub page_repo: P,
    pub settings_repo: S,
    pub static_content: Arc<StaticContent>,
    pub site_name: String,
    pub site_description: String,
}

impl<B, P, S> ExportHandler<B, P, S>
where
    B: BlogPostRepository,
    P: PageRepository,
    S: SiteSettingRepository,
{
    pub fn new(
        blog_post_repo: B,
        page_repo: P,
        settings_repo: S,
        static_content: Arc<StaticContent>,
        site_name: String,
        site_description: String,
    ) -> Self {
        ExportHandler {
            blog_post_repo,
            page_repo,
            settings_repo,
            static_content,
            site_name,
            site_description,
        }
    }

    /// Builds the export document as of `now`.
    pub async fn export_at(&self, now: DateTime<Utc>) -> Result<String, AppError> {
        let (posts, pages, settings) = join3(
            self.blog_post_repo.list_all(),
            self.page_repo.list_all(),
            self.settings_repo.list_all(),
        )
        .await;

        let posts = posts
            .inspect_err(|e| tracing::warn!("Export skipping blog posts: {}", e))
            .unwrap_or_default();
        let pages = pages
            .inspect_err(|e| tracing::warn!("Export skipping pages: {}", e))
            .unwrap_or_default();
        let settings = settings
            .inspect_err(|e| tracing::warn!("Export skipping site settings: {}", e))
            .unwrap_or_default();

        let document = build_document(
            &ExportSnapshot {
                site_name: &self.site_name,
                site_description: &self.site_description,
                static_content: &self.static_content,
                blog_posts: &posts,
                pages: &pages,
                settings: &settings,
            },
            now,
        );

        tracing::info!(
            posts = posts.len(),
            pages = pages.len(),
            settings = settings.len(),
            bytes = document.len(),
            "Website export generated"
        );
        Ok(document)
    }
}

/// `website-export-YYYY-MM-DD.xml` for the UTC date of `now`.
pub fn export_filename(now: DateTime<Utc>) -> String {
    format!("website-export-{}.xml", now.format("%Y-%m-%d"))
}

pub fn build_document(snapshot: &ExportSnapshot<'_>, now: DateTime<Utc>) -> String {
    let mut xml = XmlWriter::new();
    xml.open("website");

    xml.open("siteInfo");
    xml.text_element("name", snapshot.site_name);
    xml.text_element("description", snapshot.site_description);
    xml.text_element("exportDate", &now.to_rfc3339_opts(SecondsFormat::Millis, true));
    xml.close("siteInfo");

    write_static_content(&mut xml, snapshot.static_content);

    xml.open("dynamicContent");
    xml.open("databaseBlogPosts");
    for post in snapshot.blog_posts {
        write_blog_post(&mut xml, post);
    }
    xml.close("databaseBlogPosts");

    xml.open("pages");
    for page in snapshot.pages {
        write_page(&mut xml, page);
    }
    xml.close("pages");

    xml.open("siteSettings");
    for setting in snapshot.settings {
        xml.open("setting");
        xml.text_element("key", &setting.key);
        xml.cdata_element("value", &setting.value.to_string());
        xml.close("setting");
    }
    xml.close("siteSettings");
    xml.close("dynamicContent");

    xml.close("website");
    xml.finish()
}

fn write_static_content(xml: &mut XmlWriter, content: &StaticContent) {
    xml.open("projects");
    for project in &content.projects {
        xml.open("project");
        xml.text_element("id", &project.id);
        localized(xml, "title", &project.title);
        localized(xml, "description", &project.description);
        localized(xml, "category", &project.category);
        xml.text_element("image", &project.image);
        tag_list(xml, "tags", "tag", &project.tags);
        xml.close("project");
    }
    xml.close("projects");

    xml.open("services");
    for service in &content.services {
        xml.open("service");
        xml.text_element("id", &service.id);
        xml.text_element("title", &service.title);
        xml.text_element("description", &service.description);
        xml.text_element("icon", &service.icon);
        tag_list(xml, "features", "feature", &service.features);
        xml.close("service");
    }
    xml.close("services");

    xml.open("staticBlogPosts");
    for post in &content.blog_posts {
        xml.open("blogPost");
        xml.text_element("id", &post.id);
        localized(xml, "title", &post.title);
        localized(xml, "excerpt", &post.excerpt);
        localized(xml, "content", &post.content);
        xml.text_element("category", &post.category);
        localized(xml, "categoryLabel", &post.category_label);
        xml.text_element("image", &post.image);
        xml.text_element("date", &post.date.format("%Y-%m-%d").to_string());
        localized(xml, "readTime", &post.read_time);
        xml.close("blogPost");
    }
    xml.close("staticBlogPosts");

    xml.open("categories");
    xml.open("blogCategories");
    for category in &content.blog_categories {
        xml.open_with_attrs("category", &[("id", category.id.as_str()), ("slug", category.slug.as_str())]);
        localized_children(xml, &category.label);
        xml.close("category");
    }
    xml.close("blogCategories");

    xml.open("projectCategories");
    for category in &content.project_categories {
        xml.open_with_attrs("category", &[("id", category.id.as_str())]);
        localized_children(xml, &category.label);
        xml.close("category");
    }
    xml.close("projectCategories");
    xml.close("categories");
}

fn write_blog_post(xml: &mut XmlWriter, post: &BlogPost) {
    xml.open("blogPost");
    xml.text_element("id", &post.id.to_string());
    xml.text_element("title", &post.title);
    xml.text_element("slug", &post.slug);
    xml.text_element("excerpt", opt(&post.excerpt));
    xml.cdata_element("content", &json_or_null(post.content.as_ref()));
    xml.text_element("category", opt(&post.category));
    xml.text_element("status", post.status.map(|s| s.as_str()).unwrap_or_default());
    xml.text_element("featuredImage", opt(&post.featured_image));
    xml.text_element("readTime", &post.read_time.unwrap_or(0).to_string());
    xml.text_element("publishedAt", &timestamp(post.published_at));
    xml.text_element("createdAt", &timestamp(post.created_at));
    if let Some(tags) = post.tags.as_ref().filter(|t| !t.is_empty()) {
        tag_list(xml, "tags", "tag", tags);
    }
    xml.close("blogPost");
}

fn write_page(xml: &mut XmlWriter, page: &Page) {
    xml.open("page");
    xml.text_element("id", &page.id.to_string());
    xml.text_element("title", &page.title);
    xml.text_element("slug", &page.slug);
    xml.cdata_element("content", &json_or_null(page.content.as_ref()));
    xml.text_element("metaDescription", opt(&page.meta_description));
    xml.text_element("metaKeywords", opt(&page.meta_keywords));
    xml.text_element("status", page.status.map(|s| s.as_str()).unwrap_or_default());
    xml.text_element("featuredImage", opt(&page.featured_image));
    xml.text_element("sortOrder", &page.sort_order.unwrap_or(0).to_string());
    xml.text_element("createdAt", &timestamp(page.created_at));
    xml.close("page");
}

fn localized(xml: &mut XmlWriter, name: &str, text: &LocalizedText) {
    xml.open(name);
    localized_children(xml, text);
    xml.close(name);
}

fn localized_children(xml: &mut XmlWriter, text: &LocalizedText) {
    xml.text_element("pl", &text.pl);
    xml.text_element("en", &text.en);
}

fn tag_list(xml: &mut XmlWriter, list: &str, item: &str, values: &[String]) {
    xml.open(list);
    for value in values {
        xml.text_element(item, value);
    }
    xml.close(list);
}

fn opt(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or_default()
}

fn json_or_null(value: Option<&Value>) -> String {
    value.map_or_else(|| "null".to_string(), Value::to_string)
}

fn timestamp(value: Option<DateTime<Utc>>) -> String {
    value.map(|t| t.to_rfc3339()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;
    use uuid::Uuid;

    fn page_with_content(content: Option<Value>) -> Page {
        Page {
            id: Uuid::nil(),
            title: "O mnie".into(),
            slug: "o-mnie".into(),
            content,
            meta_description: None,
            meta_keywords: None,
            featured_image: None,
            parent_id: None,
            status: None,
            sort_order: None,
            author_id: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn filename_uses_utc_date() {
        let now = Utc.with_ymd_and_hms(2024, 3, 9, 23, 59, 59).unwrap();
        assert_eq!(export_filename(now), "website-export-2024-03-09.xml");
    }

    #[test]
    fn missing_page_fields_fall_back() {
        let mut xml = XmlWriter::new();
        write_page(&mut xml, &page_with_content(None));
        let out = xml.finish();

        assert!(out.contains("<content><![CDATA[null]]></content>"));
        assert!(out.contains("<sortOrder>0</sortOrder>"));
        assert!(out.contains("<status></status>"));
    }

    #[test]
    fn json_content_is_wrapped_in_cdata() {
        let mut xml = XmlWriter::new();
        write_page(&mut xml, &page_with_content(Some(json!({ "html": "<p>a]]>b</p>" }))));
        let out = xml.finish();

        assert!(out.contains(r#"<content><![CDATA[{"html":"<p>a]]]]><![CDATA[>b</p>"}]]></content>"#));
    }

    #[test]
    fn export_date_has_millis_and_z() {
        let now = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let content = StaticContent::bundled().unwrap();
        let doc = build_document(
            &ExportSnapshot {
                site_name: "Site",
                site_description: "Desc",
                static_content: &content,
                blog_posts: &[],
                pages: &[],
                settings: &[],
            },
            now,
        );
        assert!(doc.contains("<exportDate>2024-01-02T03:04:05.000Z</exportDate>"));
    }
}
