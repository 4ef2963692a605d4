use crate::course_catalog::domain::PlatformSettings;
use crate::ports::outbound::SettingsStore;
use crate::shared::error::AdminError;
use crate::shared::Result;
use tracing::info;

/// ConfigureSettingsUseCase - reads and replaces the platform connection settings
pub struct ConfigureSettingsUseCase<S> {
    settings_store: S,
}

impl<S: SettingsStore> ConfigureSettingsUseCase<S> {
    pub fn new(settings_store: S) -> Self {
        Self { settings_store }
    }

    pub fn show(&self) -> Result<PlatformSettings> {
        self.settings_store.read_settings()
    }

    /// Stores new settings after checking that they describe a reachable endpoint.
    ///
    /// # Errors
    /// Fails when the api key or base URL is empty, or the URL does not parse.
    /// Nothing is written in that case.
    pub fn set(
        &self,
        api_key: &str,
        site_base_url: &str,
        default_category_id: Option<&str>,
    ) -> Result<PlatformSettings> {
        if api_key.trim().is_empty() {
            return Err(AdminError::invalid_input("api key", "must not be empty").into());
        }
        if site_base_url.trim().is_empty() {
            return Err(AdminError::invalid_input("base URL", "must not be empty").into());
        }

        let settings = PlatformSettings {
            api_key: api_key.trim().to_string(),
            site_base_url: site_base_url.trim().to_string(),
            default_category_id: default_category_id.unwrap_or_default().trim().to_string(),
        };
        let endpoint = settings.endpoint()?;

        self.settings_store.write_settings(&settings)?;
        info!(target = %endpoint.target(), category = %settings.default_category_id, "settings saved");
        Ok(settings)
    }
}
