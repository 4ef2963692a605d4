use crate::course_catalog::domain::{validate_templates, CourseTemplate, PlatformSettings};
use crate::ports::outbound::{InventoryMap, InventoryMapStore, SettingsStore, TemplateStore};
use crate::shared::error::AdminError;
use crate::shared::security::{validate_store_file, validate_write_target};
use crate::shared::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

pub const SETTINGS_FILE: &str = "settings.json";
pub const TEMPLATES_FILE: &str = "templates.json";
pub const INVENTORY_MAP_FILE: &str = "inventoryMap.json";

/// Default data directory, relative to the working directory
pub const DEFAULT_DATA_DIR: &str = "course-admin-data";

/// JsonFileStore adapter: settings, templates and the inventory map as JSON files
///
/// Every read and write covers a whole file. Writes go to a temporary file
/// in the same directory that then replaces the target, so a crash never
/// leaves a half-written store behind. There is no locking between
/// processes; the last writer wins.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    data_dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn path_of(&self, file_name: &str) -> PathBuf {
        self.data_dir.join(file_name)
    }

    /// Reads and parses `file_name`; `None` if it does not exist.
    fn read_json<T: DeserializeOwned>(&self, file_name: &str, description: &str) -> Result<Option<T>> {
        let path = self.path_of(file_name);
        if fs::symlink_metadata(&path).is_err() {
            return Ok(None);
        }
        validate_store_file(&path, description)?;

        let content = fs::read_to_string(&path).map_err(|e| AdminError::StoreReadError {
            path: path.clone(),
            details: e.to_string(),
        })?;
        let parsed = serde_json::from_str(&content).map_err(|e| AdminError::StoreReadError {
            path: path.clone(),
            details: format!("invalid JSON: {}", e),
        })?;
        Ok(Some(parsed))
    }

    fn write_json<T: Serialize + ?Sized>(&self, file_name: &str, value: &T) -> Result<()> {
        let path = self.path_of(file_name);
        let write_error = |details: String| AdminError::StoreWriteError {
            path: path.clone(),
            details,
        };

        fs::create_dir_all(&self.data_dir).map_err(|e| write_error(e.to_string()))?;
        validate_write_target(&path)?;

        let mut content =
            serde_json::to_string_pretty(value).map_err(|e| write_error(e.to_string()))?;
        content.push('\n');

        let mut temp = NamedTempFile::new_in(&self.data_dir).map_err(|e| write_error(e.to_string()))?;
        temp.write_all(content.as_bytes())
            .and_then(|_| temp.flush())
            .map_err(|e| write_error(e.to_string()))?;
        temp.persist(&path)
            .map_err(|e| write_error(e.error.to_string()))?;

        debug!(path = %path.display(), bytes = content.len(), "store file written");
        Ok(())
    }
}

impl SettingsStore for JsonFileStore {
    fn read_settings(&self) -> Result<PlatformSettings> {
        match self.read_json(SETTINGS_FILE, "settings file")? {
            Some(settings) => Ok(settings),
            None => {
                let settings = PlatformSettings::default();
                self.write_settings(&settings)?;
                Ok(settings)
            }
        }
    }

    fn write_settings(&self, settings: &PlatformSettings) -> Result<()> {
        self.write_json(SETTINGS_FILE, settings)
    }
}

impl TemplateStore for JsonFileStore {
    fn read_templates(&self) -> Result<Vec<CourseTemplate>> {
        match self.read_json::<Vec<CourseTemplate>>(TEMPLATES_FILE, "templates file")? {
            Some(templates) => Ok(templates),
            None => {
                let templates = vec![CourseTemplate::example()];
                self.write_templates(&templates)?;
                Ok(templates)
            }
        }
    }

    fn write_templates(&self, templates: &[CourseTemplate]) -> Result<()> {
        validate_templates(templates)?;
        self.write_json(TEMPLATES_FILE, templates)
    }
}

impl InventoryMapStore for JsonFileStore {
    fn read_mapping(&self) -> Result<InventoryMap> {
        match self.read_json::<InventoryMap>(INVENTORY_MAP_FILE, "inventory map") {
            Ok(mapping) => Ok(mapping.unwrap_or_default()),
            Err(e) if matches!(e.downcast_ref::<AdminError>(), Some(AdminError::StoreReadError { .. })) => {
                warn!(error = %e, "inventory map is unreadable, starting from an empty map");
                Ok(InventoryMap::new())
            }
            Err(e) => Err(e),
        }
    }

    fn write_mapping(&self, mapping: &InventoryMap) -> Result<()> {
        self.write_json(INVENTORY_MAP_FILE, mapping)
    }
}
