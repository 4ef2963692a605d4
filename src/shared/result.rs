use super::error::PlatformError;

/// Result with anyhow::Error, used by the application layer and adapters.
pub type Result<T> = std::result::Result<T, anyhow::Error>;

/// Result of a single exchange with the commerce platform.
///
/// Kept typed (not anyhow) so the compensation policy can inspect the failure class.
pub type PlatformResult<T> = std::result::Result<T, PlatformError>;
