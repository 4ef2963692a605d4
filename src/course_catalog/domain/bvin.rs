use crate::shared::error::AdminError;
use crate::shared::Result;

/// Maximum length accepted for a platform identifier
const MAX_BVIN_LENGTH: usize = 100;

/// Opaque platform identifier of a product or inventory record.
///
/// Ids are interpolated into request paths, so only URL-safe
/// characters are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Bvin(String);

impl Bvin {
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        let trimmed = value.trim();

        if trimmed.is_empty() {
            return Err(AdminError::invalid_input("id", "must not be empty").into());
        }

        if trimmed.len() > MAX_BVIN_LENGTH {
            return Err(AdminError::invalid_input(
                "id",
                format!(
                    "is too long ({} bytes, maximum {})",
                    trimmed.len(),
                    MAX_BVIN_LENGTH
                ),
            )
            .into());
        }

        if !trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(AdminError::invalid_input(
                "id",
                format!("'{}' contains characters other than letters, digits, '-' and '_'", trimmed),
            )
            .into());
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Bvin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
