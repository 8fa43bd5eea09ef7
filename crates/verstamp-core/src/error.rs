//! Top-level error type for stamping operations.

use std::path::PathBuf;

use thiserror::Error;

use crate::metadata::MetadataError;
use crate::paths::PathError;

/// Errors that abort a stamping run.
///
/// Source-control problems never appear here; they degrade the version
/// string instead.
#[derive(Debug, Error)]
pub enum StampError {
    /// Package metadata was missing or malformed.
    #[error(transparent)]
    Metadata(#[from] MetadataError),

    /// The output location could not be prepared.
    #[error(transparent)]
    Path(#[from] PathError),

    /// A constant or environment variable name is not a valid identifier.
    #[error(
        "Invalid identifier `{0}`: use ASCII letters, digits and underscores, not starting with a digit"
    )]
    InvalidIdentifier(String),

    /// Writing the generated file failed.
    #[error("Failed to write {path}: {reason}")]
    Write { path: PathBuf, reason: String },
}

/// Check that `name` is usable as a constant or environment variable name.
pub fn validate_identifier(name: &str) -> Result<(), StampError> {
    let mut chars = name.chars();
    let valid = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

    if valid {
        Ok(())
    } else {
        tracing::warn!(name, "rejected identifier");
        Err(StampError::InvalidIdentifier(name.to_string()))
    }
}
