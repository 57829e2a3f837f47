mod common;

use serde_json::json;

use portfolio_cms::{
    entities::site_setting::{SettingError, SiteSetting, SettingKey},
    use_cases::settings::SettingsHandler,
};

use common::{setting_row, MockSettingsRepo};

#[actix_rt::test]
async fn missing_row_yields_default() {
    let mut repo = MockSettingsRepo::new();
    repo.expect_get().returning(|_| Ok(None));

    let handler = SettingsHandler::new(repo);
    let response = handler.get("hero").await.unwrap();

    assert!(response.is_default);
    assert_eq!(response.key, "hero");
    assert_eq!(
        response.value,
        SiteSetting::default_for(SettingKey::Hero).to_value().unwrap()
    );
}

#[actix_rt::test]
async fn unknown_key_is_rejected_without_a_lookup() {
    let handler = SettingsHandler::new(MockSettingsRepo::new());
    let err = handler.get("sidebar").await.err().unwrap();

    assert!(matches!(err, SettingError::UnknownKey(ref k) if k == "sidebar"));
}

#[actix_rt::test]
async fn malformed_stored_value_is_a_shape_mismatch() {
    let mut repo = MockSettingsRepo::new();
    repo.expect_get()
        .returning(|key| Ok(Some(setting_row(key, json!({ "logo": 42 })))));

    let handler = SettingsHandler::new(repo);
    let err = handler.get("header").await.err().unwrap();

    assert!(matches!(err, SettingError::ShapeMismatch { .. }));
}

#[actix_rt::test]
async fn save_upserts_the_validated_value() {
    let hero = SiteSetting::default_for(SettingKey::Hero).to_value().unwrap();
    let mut repo = MockSettingsRepo::new();
    repo.expect_upsert()
        .withf(|key, _| key == "hero")
        .times(1)
        .returning(|key, value| Ok(setting_row(key, value.clone())));

    let handler = SettingsHandler::new(repo);
    let response = handler.save("hero", hero.clone()).await.unwrap();

    assert!(!response.is_default);
    assert_eq!(response.value, hero);
}

#[actix_rt::test]
async fn save_rejects_wrong_shape() {
    let handler = SettingsHandler::new(MockSettingsRepo::new());
    let err = handler.save("footer", json!(["not", "an", "object"])).await.err().unwrap();

    assert!(matches!(err, SettingError::InvalidValue(_)));
}

#[actix_rt::test]
async fn list_covers_every_key() {
    let mut repo = MockSettingsRepo::new();
    repo.expect_get().returning(|_| Ok(None));

    let handler = SettingsHandler::new(repo);
    let keys: Vec<String> = handler.list().await.unwrap().into_iter().map(|s| s.key).collect();

    assert_eq!(keys, vec!["header", "footer", "hero"]);
}

#[actix_rt::test]
async fn save_accepts_anchor_mail_and_phone_links() {
    let footer = json!({
        "copyright": "GO",
        "footerLinks": [{ "href": "#", "label": "Góra" }, { "href": "#kontakt", "label": "Kontakt" }],
        "socialLinks": [
            { "icon": "mail", "href": "mailto:kontakt@example.com", "label": "E-mail" },
            { "icon": "phone", "href": "tel:+48123456789", "label": "Telefon" }
        ]
    });
    let mut repo = MockSettingsRepo::new();
    repo.expect_upsert()
        .times(1)
        .returning(|key, value| Ok(setting_row(key, value.clone())));

    let handler = SettingsHandler::new(repo);
    let response = handler.save("footer", footer.clone()).await.unwrap();

    assert_eq!(response.value, footer);
}

#[actix_rt::test]
async fn save_rejects_script_links() {
    let header = json!({
        "logo": "GO",
        "navLinks": [{ "href": "javascript:alert(1)", "label": "x" }],
        "ctaButton": { "href": "#kontakt", "label": "Kontakt" }
    });
    let handler = SettingsHandler::new(MockSettingsRepo::new());
    let err = handler.save("header", header).await.err().unwrap();

    assert!(matches!(err, SettingError::InvalidValue(ref m) if m.contains("javascript:")));
}
