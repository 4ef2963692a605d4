use crate::shared::error::AdminError;
use crate::shared::Result;
use reqwest::Url;
use serde::{Deserialize, Serialize};

/// Fixed REST root of the platform API, relative to the site base URL
pub const PLATFORM_API_BASE_PATH: &str = "/DesktopModules/Hotcakes/API/rest/v1";

/// Connection settings for the commerce platform, persisted as `settings.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PlatformSettings {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub site_base_url: String,
    #[serde(default)]
    pub default_category_id: String,
}

impl PlatformSettings {
    /// Resolves host, port and API root; fails if key or URL is missing.
    pub fn endpoint(&self) -> Result<PlatformEndpoint> {
        if self.api_key.trim().is_empty() {
            return Err(AdminError::SettingsIncomplete {
                missing: "apiKey".to_string(),
            }
            .into());
        }
        if self.site_base_url.trim().is_empty() {
            return Err(AdminError::SettingsIncomplete {
                missing: "siteBaseUrl".to_string(),
            }
            .into());
        }

        let url = Url::parse(self.site_base_url.trim()).map_err(|e| AdminError::InvalidBaseUrl {
            url: self.site_base_url.clone(),
            reason: e.to_string(),
        })?;

        let host = url
            .host_str()
            .filter(|host| !host.is_empty())
            .ok_or_else(|| AdminError::InvalidBaseUrl {
                url: self.site_base_url.clone(),
                reason: "URL has no host".to_string(),
            })?
            .to_string();

        let port = url
            .port_or_known_default()
            .unwrap_or(if url.scheme() == "https" { 443 } else { 80 });
        let host_header = match url.port() {
            Some(explicit) => format!("{}:{}", host, explicit),
            None => host.clone(),
        };

        let site_path = url.path().trim_end_matches('/');
        let api_root = format!("{}{}", site_path, PLATFORM_API_BASE_PATH);

        Ok(PlatformEndpoint {
            scheme: url.scheme().to_string(),
            host,
            port,
            host_header,
            api_root,
            api_key: self.api_key.trim().to_string(),
        })
    }

    /// The configured default category, or an error if none is set.
    pub fn require_category(&self) -> Result<&str> {
        let category = self.default_category_id.trim();
        if category.is_empty() {
            return Err(AdminError::NoDefaultCategory.into());
        }
        Ok(category)
    }

    pub fn default_category(&self) -> Option<&str> {
        Some(self.default_category_id.trim()).filter(|c| !c.is_empty())
    }
}

/// Resolved connection target derived from [`PlatformSettings`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformEndpoint {
    pub scheme: String,
    pub host: String,
    pub port: u16,
    /// Value for the `Host` header; carries the port only when the URL named one
    pub host_header: String,
    /// Path prefix every endpoint is appended to
    pub api_root: String,
    pub api_key: String,
}

impl PlatformEndpoint {
    /// `host:port`, used in log and error messages
    pub fn target(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
