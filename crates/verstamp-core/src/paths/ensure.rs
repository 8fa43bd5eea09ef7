use std::fs;
use std::path::Path;

use super::error::PathError;

/// Create the directory that will contain `file`, including its parents.
///
/// A bare file name (no parent component) refers to the current directory,
/// which needs no preparation. Nothing is written inside the directory.
pub fn ensure_parent_dir(file: &Path) -> Result<(), PathError> {
    if file.as_os_str().is_empty() {
        return Err(PathError::EmptyPath);
    }
    let Some(parent) = file.parent().filter(|p| !p.as_os_str().is_empty()) else {
        return Ok(());
    };

    if parent.exists() {
        if !parent.is_dir() {
            return Err(PathError::NotADirectory(parent.to_path_buf()));
        }
        return Ok(());
    }

    fs::create_dir_all(parent).map_err(|e| PathError::CreateFailed {
        path: parent.to_path_buf(),
        reason: e.to_string(),
    })?;
    tracing::debug!(path = %parent.display(), "created output directory");
    Ok(())
}
