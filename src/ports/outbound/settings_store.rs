use crate::course_catalog::domain::PlatformSettings;
use crate::shared::Result;

/// SettingsStore port for the platform connection settings
pub trait SettingsStore: Send + Sync {
    /// Reads the settings, creating defaults when none exist yet
    fn read_settings(&self) -> Result<PlatformSettings>;

    fn write_settings(&self, settings: &PlatformSettings) -> Result<()>;
}
