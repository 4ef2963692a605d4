use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Largest store file (settings, templates, inventory map) we are willing to load (10 MB)
pub const MAX_STORE_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Validates that an existing store file can be read safely.
///
/// Uses `symlink_metadata()` so the link itself is inspected, not its target.
///
/// # Errors
/// Returns an error if:
/// - Metadata cannot be read
/// - The path is a symbolic link
/// - The path is not a regular file
/// - The file is larger than [`MAX_STORE_FILE_SIZE`]
pub fn validate_store_file(path: &Path, description: &str) -> Result<()> {
    let metadata = fs::symlink_metadata(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {} metadata: {}", description, e))?;

    if metadata.is_symlink() {
        anyhow::bail!(
            "Security: {} is a symbolic link. Store files must be regular files.",
            path.display()
        );
    }

    if !metadata.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }

    validate_file_size(metadata.len(), path, MAX_STORE_FILE_SIZE)
}

/// Rejects a write target that already exists as a symbolic link.
///
/// A missing target is fine; it will be created.
pub fn validate_write_target(path: &Path) -> Result<()> {
    match fs::symlink_metadata(path) {
        Ok(metadata) if metadata.is_symlink() => anyhow::bail!(
            "Security: {} is a symbolic link. Writing through symbolic links is not allowed.",
            path.display()
        ),
        Ok(metadata) if metadata.is_dir() => {
            anyhow::bail!("{} is a directory, expected a file", path.display())
        }
        _ => Ok(()),
    }
}

pub fn validate_file_size(file_size: u64, path: &Path, max_size: u64) -> Result<()> {
    if file_size > max_size {
        anyhow::bail!(
            "Security: {} is too large ({} bytes). Maximum allowed size is {} bytes.",
            path.display(),
            file_size,
            max_size
        );
    }
    Ok(())
}
