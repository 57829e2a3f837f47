use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use validator::{ValidationError, ValidationErrors};

// ───── Constants ──────────────────────────────────────────────────────
pub const MAX_TITLE_LENGTH: u64 = 200;
pub const MAX_SLUG_LENGTH: u64 = 200;
pub const MIN_SLUG_LENGTH: usize = 1;
const LINK_SCHEMES: [&str; 4] = ["http", "https", "mailto", "tel"];

/// Publication state shared by pages, blog posts and projects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "page_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ContentStatus {
    #[default]
    Draft,
    Published,
    Archived,
}

impl ContentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentStatus::Draft => "draft",
            ContentStatus::Published => "published",
            ContentStatus::Archived => "archived",
        }
    }
}

/// `?search=` query used by the admin list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub search: Option<String>,
}

impl SearchQuery {
    /// Trimmed search term, `None` when blank.
    pub fn term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// `ILIKE` pattern for a case-insensitive substring match.
pub fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

// ───── Validation Helpers ───────────────────────────────────────────

pub fn new_validation_error(code: &'static str, msg: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(msg));
    err
}

pub fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    if slug.is_empty() {
        return Err(new_validation_error("slug_empty", "Slug cannot be empty"));
    }
    if !slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-') {
        return Err(new_validation_error("slug_invalid_chars", "Slug must contain only lowercase letters, digits, or hyphens"));
    }
    if slug.starts_with('-') || slug.ends_with('-') {
        return Err(new_validation_error("slug_edge_hyphen", "Slug must not start or end with a hyphen"));
    }
    Ok(())
}

pub fn validate_url(url: &str) -> Result<(), ValidationError> {
    // Site-relative links are allowed
    if url.starts_with('/') {
        return Ok(());
    }
    match url::Url::parse(url) {
        Ok(parsed) => {
            if parsed.scheme() == "http" || parsed.scheme() == "https" {
                Ok(())
            } else {
                Err(new_validation_error("invalid_url_scheme", "URL must start with http:// or https://"))
            }
        }
        Err(_) => Err(new_validation_error("invalid_url", "Invalid URL format")),
    }
}

/// Empty strings count as "no URL".
pub fn validate_optional_url(url: &str) -> Result<(), ValidationError> {
    if url.trim().is_empty() {
        return Ok(());
    }
    validate_url(url)
}

/// Navigation links: site paths, `#` anchors, http(s), `mailto:` and `tel:`.
/// Blank counts as a placeholder link.
pub fn validate_link(href: &str) -> Result<(), ValidationError> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('/') || href.starts_with('#') {
        return Ok(());
    }
    match url::Url::parse(href) {
        Ok(parsed) if LINK_SCHEMES.contains(&parsed.scheme()) => Ok(()),
        Ok(_) => Err(new_validation_error("invalid_link_scheme", "Link must be http(s), mailto, tel or a site path")),
        Err(_) => Err(new_validation_error("invalid_link", "Invalid link format")),
    }
}

pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(new_validation_error("blank", "Value cannot be blank"));
    }
    Ok(())
}

/// Uses the given slug when present, otherwise derives one from the title.
pub fn resolve_slug(slug: Option<&str>, title: &str) -> Result<String, ValidationErrors> {
    let slug = match slug.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => s.to_string(),
        None => slug::slugify(title),
    };

    let result = if slug.len() < MIN_SLUG_LENGTH {
        Err(new_validation_error("slug_too_short", "Generated slug is empty; please provide a custom slug"))
    } else {
        validate_slug(&slug)
    };

    result.map(|_| slug).map_err(|e| {
        let mut errors = ValidationErrors::new();
        errors.add("slug", e);
        errors
    })
}

/// Trims every tag and drops blank ones.
pub fn clean_tags(tags: &[String]) -> Vec<String> {
    tags.iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Maps blank optional strings to `None`.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_is_generated_from_polish_title() {
        let slug = resolve_slug(None, "Bezpieczeństwo danych w marketingu").unwrap();
        assert_eq!(slug, "bezpieczenstwo-danych-w-marketingu");
    }

    #[test]
    fn blank_slug_falls_back_to_title() {
        assert_eq!(resolve_slug(Some("  "), "O mnie").unwrap(), "o-mnie");
    }

    #[test]
    fn explicit_slug_must_be_well_formed() {
        assert!(resolve_slug(Some("Zła Wartość"), "x").is_err());
        assert_eq!(resolve_slug(Some("kontakt"), "x").unwrap(), "kontakt");
    }

    #[test]
    fn untitled_symbols_cannot_produce_a_slug() {
        assert!(resolve_slug(None, "!!!").is_err());
    }

    #[test]
    fn tags_are_trimmed_and_blanks_dropped() {
        let tags = vec![" Canva ".to_string(), "".to_string(), "  ".to_string(), "SEO".to_string()];
        assert_eq!(clean_tags(&tags), vec!["Canva", "SEO"]);
    }

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
    }

    #[test]
    fn links_accept_anchors_mail_and_phone() {
        for href in ["#", "#kontakt", "/o-mnie", "mailto:kontakt@example.com", "tel:+48123456789", "https://x.pl", ""] {
            assert!(validate_link(href).is_ok(), "{href}");
        }
        assert!(validate_link("javascript:alert(1)").is_err());
        assert!(validate_link("not a link").is_err());
    }

    #[test]
    fn urls_accept_relative_and_http() {
        assert!(validate_optional_url("").is_ok());
        assert!(validate_optional_url("/kontakt").is_ok());
        assert!(validate_optional_url("https://example.pl/a.png").is_ok());
        assert!(validate_optional_url("ftp://example.pl").is_err());
        assert!(validate_optional_url("not a url").is_err());
    }
}
