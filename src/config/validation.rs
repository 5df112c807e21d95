//! Location input validation.

use std::path::Path;

use crate::domain::{ConfigError, Result};

/// Validate the folder and name given to a handler.
pub fn validate_location(folderpath: &Path, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(ConfigError::InvalidLocation(
            "file name cannot be empty".to_string(),
        ));
    }

    if name.contains('\0') {
        return Err(ConfigError::InvalidLocation(format!(
            "file name '{}' contains null character",
            name.escape_debug()
        )));
    }

    if folderpath.to_string_lossy().contains('\0') {
        return Err(ConfigError::InvalidLocation(
            "folder path contains null character".to_string(),
        ));
    }

    Ok(())
}
