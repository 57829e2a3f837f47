mod common;

use std::{collections::HashMap, sync::Arc};

use chrono::{TimeZone, Utc};
use quick_xml::{events::Event, Reader};
use serde_json::json;
use uuid::Uuid;

use portfolio_cms::{
    entities::{blog_post::BlogPost, common::ContentStatus, static_content::StaticContent},
    use_cases::export::{export_filename, ExportHandler},
};

use common::{setting_row, FixedSettings, InMemoryPages, InMemoryPosts};

/// Flattened view of a parsed document: element counts and text per path.
#[derive(Default)]
struct Parsed {
    counts: HashMap<String, usize>,
    texts: HashMap<String, Vec<String>>,
}

impl Parsed {
    fn count(&self, path: &str) -> usize {
        self.counts.get(path).copied().unwrap_or(0)
    }

    fn texts(&self, path: &str) -> Vec<String> {
        self.texts.get(path).cloned().unwrap_or_default()
    }
}

fn parse(xml: &str) -> Parsed {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<String> = Vec::new();
    let mut parsed = Parsed::default();
    // CDATA may be split into adjacent sections; join them per element.
    let mut pending = String::new();

    loop {
        match reader.read_event().expect("well-formed xml") {
            Event::Start(e) => {
                stack.push(String::from_utf8(e.name().as_ref().to_vec()).unwrap());
                *parsed.counts.entry(stack.join("/")).or_default() += 1;
                pending.clear();
            }
            Event::Text(t) => pending.push_str(&t.unescape().unwrap()),
            Event::CData(c) => pending.push_str(std::str::from_utf8(&c.into_inner()).unwrap()),
            Event::End(_) => {
                parsed.texts.entry(stack.join("/")).or_default().push(std::mem::take(&mut pending));
                stack.pop();
            }
            Event::Eof => break,
            _ => {}
        }
    }
    assert!(stack.is_empty(), "unbalanced document");
    parsed
}

fn post(title: &str, content: serde_json::Value) -> BlogPost {
    BlogPost {
        id: Uuid::new_v4(),
        title: title.to_string(),
        slug: "wpis".into(),
        excerpt: None,
        content: Some(content),
        category: Some("web".into()),
        tags: Some(vec!["rust".into(), "actix".into()]),
        status: Some(ContentStatus::Published),
        read_time: None,
        featured_image: None,
        published_at: None,
        author_id: None,
        created_at: Some(Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap()),
        updated_at: None,
    }
}

fn handler(
    posts: InMemoryPosts,
    pages: InMemoryPages,
    settings: FixedSettings,
    content: StaticContent,
) -> ExportHandler<InMemoryPosts, InMemoryPages, FixedSettings> {
    ExportHandler::new(
        posts,
        pages,
        settings,
        Arc::new(content),
        "Portfolio CMS - Grzegorz Rogala".into(),
        "Strona portfolio z systemem zarządzania treścią".into(),
    )
}

#[actix_rt::test]
async fn empty_database_still_exports_static_content() {
    let handler = handler(
        InMemoryPosts::default(),
        InMemoryPages::default(),
        FixedSettings(Ok(Vec::new())),
        StaticContent::bundled().unwrap(),
    );
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 30, 0).unwrap();

    let xml = handler.export_at(now).await.unwrap();
    let doc = parse(&xml);

    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert_eq!(doc.count("website/projects/project"), 4);
    assert_eq!(doc.count("website/services/service"), 5);
    assert_eq!(doc.count("website/staticBlogPosts/blogPost"), 4);
    assert_eq!(doc.count("website/categories/blogCategories/category"), 5);
    assert_eq!(doc.count("website/categories/projectCategories/category"), 5);

    assert_eq!(doc.count("website/dynamicContent/databaseBlogPosts"), 1);
    assert_eq!(doc.count("website/dynamicContent/databaseBlogPosts/blogPost"), 0);
    assert_eq!(doc.count("website/dynamicContent/pages/page"), 0);
    assert_eq!(doc.count("website/dynamicContent/siteSettings/setting"), 0);

    assert_eq!(doc.texts("website/siteInfo/exportDate"), vec!["2024-06-01T12:30:00.000Z"]);
    assert_eq!(doc.texts("website/siteInfo/name"), vec!["Portfolio CMS - Grzegorz Rogala"]);
}

#[actix_rt::test]
async fn special_characters_survive_a_parse() {
    let mut content = StaticContent::bundled().unwrap();
    content.projects[0].title.pl = r#"Test & "Special" <Chars>"#.into();

    let tricky = json!({ "html": "<p>koniec ]]> sekcji</p>" });
    let handler = handler(
        InMemoryPosts::with(vec![post("Rock & Roll <3", tricky.clone())]),
        InMemoryPages::default(),
        FixedSettings(Ok(vec![setting_row("hero", json!({ "title": "A & B" }))])),
        content,
    );

    let xml = handler.export_at(Utc::now()).await.unwrap();
    let doc = parse(&xml);

    assert_eq!(doc.texts("website/projects/project/title/pl")[0], r#"Test & "Special" <Chars>"#);
    assert!(xml.contains("Test &amp; &quot;Special&quot; &lt;Chars&gt;"));

    let posts = "website/dynamicContent/databaseBlogPosts/blogPost";
    assert_eq!(doc.texts(&format!("{posts}/title")), vec!["Rock & Roll <3"]);
    let content: serde_json::Value =
        serde_json::from_str(&doc.texts(&format!("{posts}/content"))[0]).unwrap();
    assert_eq!(content, tricky);
    assert_eq!(doc.texts(&format!("{posts}/tags/tag")), vec!["rust", "actix"]);
    assert_eq!(doc.texts(&format!("{posts}/readTime")), vec!["0"]);
    assert_eq!(doc.texts(&format!("{posts}/status")), vec!["published"]);

    let value: serde_json::Value = serde_json::from_str(
        &doc.texts("website/dynamicContent/siteSettings/setting/value")[0],
    )
    .unwrap();
    assert_eq!(value, json!({ "title": "A & B" }));
}

#[actix_rt::test]
async fn control_characters_are_dropped_from_text() {
    let handler = handler(
        InMemoryPosts::with(vec![post("Zły\u{1}tytuł\u{1F}", json!({ "t": "a\u{7}b" }))]),
        InMemoryPages::default(),
        FixedSettings(Ok(Vec::new())),
        StaticContent::bundled().unwrap(),
    );

    let xml = handler.export_at(Utc::now()).await.unwrap();
    let doc = parse(&xml);

    let posts = "website/dynamicContent/databaseBlogPosts/blogPost";
    assert_eq!(doc.texts(&format!("{posts}/title")), vec!["Złytytuł"]);
    let content: serde_json::Value =
        serde_json::from_str(&doc.texts(&format!("{posts}/content"))[0]).unwrap();
    assert_eq!(content, json!({ "t": "a\u{7}b" }));
}

#[actix_rt::test]
async fn failed_reads_export_empty_sections() {
    let pages_down = handler(
        InMemoryPosts::with(vec![post("Zostaje", json!("<p>x</p>"))]),
        InMemoryPages::failing(),
        FixedSettings(Ok(Vec::new())),
        StaticContent::bundled().unwrap(),
    );

    let doc = parse(&pages_down.export_at(Utc::now()).await.unwrap());
    assert_eq!(doc.count("website/dynamicContent/pages"), 1);
    assert_eq!(doc.count("website/dynamicContent/pages/page"), 0);
    assert_eq!(doc.count("website/dynamicContent/databaseBlogPosts/blogPost"), 1);

    let all_down = handler(
        InMemoryPosts::failing(),
        InMemoryPages::failing(),
        FixedSettings(Err("settings unavailable".into())),
        StaticContent::bundled().unwrap(),
    );
    let doc = parse(&all_down.export_at(Utc::now()).await.unwrap());

    assert_eq!(doc.count("website/projects/project"), 4);
    assert_eq!(doc.count("website/dynamicContent/databaseBlogPosts"), 1);
    assert_eq!(doc.count("website/dynamicContent/databaseBlogPosts/blogPost"), 0);
    assert_eq!(doc.count("website/dynamicContent/pages/page"), 0);
    assert_eq!(doc.count("website/dynamicContent/siteSettings"), 1);
    assert_eq!(doc.count("website/dynamicContent/siteSettings/setting"), 0);
}

#[actix_rt::test]
async fn same_instant_gives_same_document() {
    let handler = handler(
        InMemoryPosts::with(vec![post("Stały", json!("<p>x</p>"))]),
        InMemoryPages::default(),
        FixedSettings(Ok(Vec::new())),
        StaticContent::bundled().unwrap(),
    );
    let now = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();

    let first = handler.export_at(now).await.unwrap();
    let second = handler.export_at(now).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(export_filename(now), "website-export-2025-01-02.xml");
}
