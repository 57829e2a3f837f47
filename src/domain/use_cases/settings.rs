use serde_json::Value;

use crate::{
    entities::site_setting::{SettingKey, SettingResponse, SiteSetting, SettingError},
    repositories::site_setting::SiteSettingRepository,
};

pub struct SettingsHandler<R>
where
    R: SiteSettingRepository,
{
    pub settings_repo: R,
}

impl<R> SettingsHandler<R>
where
    R: SiteSettingRepository,
{
    pub fn new(settings_repo: R) -> Self {
        SettingsHandler { settings_repo }
    }

    /// Stored value for `key`, or its default when no row exists.
    pub async fn get(&self, key: &str) -> Result<SettingResponse, SettingError> {
        let key: SettingKey = key.parse()?;

        match self.settings_repo.get(key.as_str()).await? {
            Some(row) => {
                let setting = SiteSetting::from_stored(key, row.value).inspect_err(|e| {
                    tracing::error!("{}", e);
                })?;
                Ok(SettingResponse {
                    key: key.to_string(),
                    value: setting.to_value()?,
                    is_default: false,
                })
            }
            None => Ok(SettingResponse {
                key: key.to_string(),
                value: SiteSetting::default_for(key).to_value()?,
                is_default: true,
            }),
        }
    }

    pub async fn list(&self) -> Result<Vec<SettingResponse>, SettingError> {
        let mut settings = Vec::with_capacity(SettingKey::ALL.len());
        for key in SettingKey::ALL {
            settings.push(self.get(key.as_str()).await?);
        }
        Ok(settings)
    }

    /// Validates `value` against the shape for `key` and upserts it.
    pub async fn save(&self, key: &str, value: Value) -> Result<SettingResponse, SettingError> {
        let key: SettingKey = key.parse()?;
        let setting = SiteSetting::from_submitted(key, value)?;
        let row = self.settings_repo.upsert(key.as_str(), &setting.to_value()?).await?;

        tracing::info!(key = %key, "Site setting saved");
        Ok(SettingResponse {
            key: row.key,
            value: row.value,
            is_default: false,
        })
    }
}
