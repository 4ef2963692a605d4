//! Configuration file support for course-admin.
//!
//! Tool settings come from `course-admin.config.yml` (auto-discovered in
//! the working directory or named with `--config`). Platform credentials
//! are not part of it; they live in the data directory's `settings.json`.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

use crate::adapters::outbound::filesystem::DEFAULT_DATA_DIR;
use crate::adapters::outbound::network::{DEFAULT_TIMEOUT, DEFAULT_VERIFICATION_DELAY};
use crate::application::dto::TransportKind;
use crate::application::use_cases::DEFAULT_STOCK_CONCURRENCY;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "course-admin.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub data_dir: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
    pub verification_delay_ms: Option<u64>,
    pub transport: Option<TransportKind>,
    pub stock_concurrency: Option<usize>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Effective settings after applying the config file and CLI overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolConfig {
    pub data_dir: PathBuf,
    pub timeout: Duration,
    pub verification_delay: Duration,
    pub transport: TransportKind,
    pub stock_concurrency: usize,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            timeout: DEFAULT_TIMEOUT,
            verification_delay: DEFAULT_VERIFICATION_DELAY,
            transport: TransportKind::default(),
            stock_concurrency: DEFAULT_STOCK_CONCURRENCY,
        }
    }
}

impl ToolConfig {
    /// Defaults overlaid with whatever the file sets.
    pub fn from_file(file: Option<ConfigFile>) -> Self {
        let defaults = Self::default();
        let Some(file) = file else {
            return defaults;
        };
        Self {
            data_dir: file.data_dir.unwrap_or(defaults.data_dir),
            timeout: file
                .timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
            verification_delay: file
                .verification_delay_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.verification_delay),
            transport: file.transport.unwrap_or(defaults.transport),
            stock_concurrency: file.stock_concurrency.unwrap_or(defaults.stock_concurrency),
        }
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if config.timeout_secs == Some(0) {
        bail!(
            "Invalid config: timeout_secs must be greater than 0.\n\n\
             💡 Hint: The default is {} seconds.",
            DEFAULT_TIMEOUT.as_secs()
        );
    }
    if config.stock_concurrency == Some(0) {
        bail!(
            "Invalid config: stock_concurrency must be at least 1.\n\n\
             💡 Hint: The default is {}.",
            DEFAULT_STOCK_CONCURRENCY
        );
    }
    if let Some(ref data_dir) = config.data_dir {
        if data_dir.as_os_str().is_empty() {
            bail!("Invalid config: data_dir must not be empty.");
        }
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        warn!(field = %key, "unknown config field will be ignored");
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}
