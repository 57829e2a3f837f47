use std::{fmt, str::FromStr};

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::{entities::common::validate_link, errors::AppError};

// ───── Database Models ───────────────────────────────────────────────

/// Raw `site_settings` row. Kept untyped so unknown keys survive export.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SiteSettingRow {
    pub id: Uuid,
    pub key: String,
    pub value: Value,
    pub updated_at: Option<DateTime<Utc>>,
}

// ───── Typed Settings ───────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKey {
    Header,
    Footer,
    Hero,
}

impl SettingKey {
    pub const ALL: [SettingKey; 3] = [SettingKey::Header, SettingKey::Footer, SettingKey::Hero];

    pub fn as_str(&self) -> &'static str {
        match self {
            SettingKey::Header => "header",
            SettingKey::Footer => "footer",
            SettingKey::Hero => "hero",
        }
    }
}

impl FromStr for SettingKey {
    type Err = SettingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "header" => Ok(SettingKey::Header),
            "footer" => Ok(SettingKey::Footer),
            "hero" => Ok(SettingKey::Hero),
            other => Err(SettingError::UnknownKey(other.to_string())),
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavLink {
    pub href: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialLink {
    pub icon: String,
    pub href: String,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonVariant {
    Primary,
    Secondary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroButton {
    pub href: String,
    pub label: String,
    pub variant: ButtonVariant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderSettings {
    pub logo: String,
    pub nav_links: Vec<NavLink>,
    pub cta_button: NavLink,
}

impl Default for HeaderSettings {
    fn default() -> Self {
        HeaderSettings {
            logo: "GO".to_string(),
            nav_links: Vec::new(),
            cta_button: NavLink {
                href: "/kontakt".to_string(),
                label: "Kontakt".to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FooterSettings {
    pub copyright: String,
    pub footer_links: Vec<NavLink>,
    pub social_links: Vec<SocialLink>,
}

impl Default for FooterSettings {
    fn default() -> Self {
        FooterSettings {
            copyright: "Grzegorz Olszowik".to_string(),
            footer_links: Vec::new(),
            social_links: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroSettings {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub cta_buttons: Vec<HeroButton>,
}

/// A site setting, typed by its key.
#[derive(Debug, Clone, PartialEq)]
pub enum SiteSetting {
    Header(HeaderSettings),
    Footer(FooterSettings),
    Hero(HeroSettings),
}

impl SiteSetting {
    pub fn key(&self) -> SettingKey {
        match self {
            SiteSetting::Header(_) => SettingKey::Header,
            SiteSetting::Footer(_) => SettingKey::Footer,
            SiteSetting::Hero(_) => SettingKey::Hero,
        }
    }

    pub fn default_for(key: SettingKey) -> Self {
        match key {
            SettingKey::Header => SiteSetting::Header(HeaderSettings::default()),
            SettingKey::Footer => SiteSetting::Footer(FooterSettings::default()),
            SettingKey::Hero => SiteSetting::Hero(HeroSettings::default()),
        }
    }

    /// Decodes a stored value. A mismatch means the row is corrupt.
    pub fn from_stored(key: SettingKey, value: Value) -> Result<Self, SettingError> {
        Self::decode(key, value).map_err(|e| SettingError::ShapeMismatch {
            key: key.to_string(),
            reason: e.to_string(),
        })
    }

    /// Decodes and validates a value submitted by an admin.
    pub fn from_submitted(key: SettingKey, value: Value) -> Result<Self, SettingError> {
        let setting = Self::decode(key, value).map_err(|e| SettingError::InvalidValue(e.to_string()))?;
        setting.validate()?;
        Ok(setting)
    }

    fn decode(key: SettingKey, value: Value) -> Result<Self, serde_json::Error> {
        Ok(match key {
            SettingKey::Header => SiteSetting::Header(serde_json::from_value(value)?),
            SettingKey::Footer => SiteSetting::Footer(serde_json::from_value(value)?),
            SettingKey::Hero => SiteSetting::Hero(serde_json::from_value(value)?),
        })
    }

    fn validate(&self) -> Result<(), SettingError> {
        let hrefs: Vec<&str> = match self {
            SiteSetting::Header(h) => h.nav_links.iter()
                .map(|l| l.href.as_str())
                .chain(std::iter::once(h.cta_button.href.as_str()))
                .collect(),
            SiteSetting::Footer(f) => f.footer_links.iter()
                .map(|l| l.href.as_str())
                .chain(f.social_links.iter().map(|l| l.href.as_str()))
                .collect(),
            SiteSetting::Hero(h) => h.cta_buttons.iter().map(|b| b.href.as_str()).collect(),
        };

        match hrefs.into_iter().find(|href| validate_link(href).is_err()) {
            Some(bad) => Err(SettingError::InvalidValue(format!("Invalid link: {}", bad))),
            None => Ok(()),
        }
    }

    pub fn to_value(&self) -> Result<Value, SettingError> {
        let value = match self {
            SiteSetting::Header(h) => serde_json::to_value(h),
            SiteSetting::Footer(f) => serde_json::to_value(f),
            SiteSetting::Hero(h) => serde_json::to_value(h),
        };
        value.map_err(|e| SettingError::Repository(AppError::InternalError(e.to_string())))
    }
}

#[derive(Debug, Serialize)]
pub struct SettingResponse {
    pub key: String,
    pub value: Value,
    pub is_default: bool,
}

// ───── Errors ───────────────────────────────────────────────────────

#[derive(Debug, Display)]
pub enum SettingError {
    #[display("Unknown setting key: {_0}")]
    UnknownKey(String),

    #[display("Stored value for '{key}' has an unexpected shape: {reason}")]
    ShapeMismatch { key: String, reason: String },

    #[display("Invalid setting value: {_0}")]
    InvalidValue(String),

    #[display("{_0}")]
    Repository(AppError),
}

impl std::error::Error for SettingError {}

impl From<AppError> for SettingError {
    fn from(err: AppError) -> Self {
        SettingError::Repository(err)
    }
}

impl ResponseError for SettingError {
    fn status_code(&self) -> StatusCode {
        match self {
            SettingError::UnknownKey(_) => StatusCode::NOT_FOUND,
            SettingError::ShapeMismatch { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            SettingError::InvalidValue(_) => StatusCode::BAD_REQUEST,
            SettingError::Repository(e) => e.status_code(),
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            SettingError::Repository(e) => e.error_response(),
            SettingError::ShapeMismatch { .. } => {
                tracing::error!("{}", self);
                HttpResponse::build(self.status_code())
                    .json(serde_json::json!({"error": self.to_string()}))
            }
            _ => HttpResponse::build(self.status_code())
                .json(serde_json::json!({"error": self.to_string()})),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn header_default_matches_site_defaults() {
        let value = SiteSetting::default_for(SettingKey::Header).to_value().unwrap();
        assert_eq!(
            value,
            json!({"logo": "GO", "navLinks": [], "ctaButton": {"href": "/kontakt", "label": "Kontakt"}})
        );
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(matches!("theme".parse::<SettingKey>(), Err(SettingError::UnknownKey(_))));
        assert_eq!("hero".parse::<SettingKey>().unwrap(), SettingKey::Hero);
    }

    #[test]
    fn mismatched_stored_value_is_reported() {
        let err = SiteSetting::from_stored(SettingKey::Footer, json!({"logo": "GO"})).unwrap_err();
        assert!(matches!(err, SettingError::ShapeMismatch { .. }));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn hero_buttons_round_trip_with_variants() {
        let value = json!({
            "title": "Marketing, który działa",
            "subtitle": "Wirtualna asystentka",
            "description": "Pomagam firmom rosnąć",
            "ctaButtons": [
                {"href": "/kontakt", "label": "Kontakt", "variant": "primary"},
                {"href": "/projekty", "label": "Projekty", "variant": "secondary"}
            ]
        });
        let setting = SiteSetting::from_submitted(SettingKey::Hero, value.clone()).unwrap();
        assert_eq!(setting.key(), SettingKey::Hero);
        assert_eq!(setting.to_value().unwrap(), value);
    }

    #[test]
    fn unknown_variant_is_invalid() {
        let value = json!({
            "title": "", "subtitle": "", "description": "",
            "ctaButtons": [{"href": "/", "label": "x", "variant": "tertiary"}]
        });
        let err = SiteSetting::from_submitted(SettingKey::Hero, value).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn submitted_links_must_be_urls() {
        let value = json!({
            "copyright": "GO",
            "footerLinks": [],
            "socialLinks": [{"icon": "facebook", "href": "javascript:void(0)", "label": "FB"}]
        });
        assert!(matches!(
            SiteSetting::from_submitted(SettingKey::Footer, value),
            Err(SettingError::InvalidValue(_))
        ));
    }
}
