//! Generated version file.
//!
//! Renders a source file with a single exported constant bound to the
//! resolved version and writes it, creating the parent directory first.
//! Existing files are overwritten without comparison.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{StampError, validate_identifier};
use crate::paths::ensure_parent_dir;
use crate::resolver::ResolvedVersion;

/// Constant name used when none is configured.
pub const DEFAULT_CONST_NAME: &str = "VERSION";

/// Language of the generated file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmitLanguage {
    /// `pub const NAME: &str = "...";`
    #[default]
    Rust,
    /// `export const NAME = "..." as const;`
    TypeScript,
}

impl EmitLanguage {
    /// Guess the language from an output path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "rs" => Some(Self::Rust),
            "ts" | "mts" | "cts" => Some(Self::TypeScript),
            _ => None,
        }
    }
}

/// How to render the generated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOptions {
    pub language: EmitLanguage,
    pub const_name: String,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            language: EmitLanguage::default(),
            const_name: DEFAULT_CONST_NAME.to_string(),
        }
    }
}

impl EmitOptions {
    pub fn new(language: EmitLanguage, const_name: impl Into<String>) -> Self {
        Self {
            language,
            const_name: const_name.into(),
        }
    }
}

/// Render the file contents without touching the filesystem.
pub fn render_version_file(
    options: &EmitOptions,
    version: &ResolvedVersion,
) -> Result<String, StampError> {
    validate_identifier(&options.const_name)?;
    let name = &options.const_name;

    Ok(match options.language {
        EmitLanguage::Rust => {
            let literal = format!("{:?}", version.as_str());
            format!(
                "// @generated by verstamp. Do not edit.\n\n\
                 /// Version string resolved at build time.\n\
                 pub const {name}: &str = {literal};\n"
            )
        }
        EmitLanguage::TypeScript => {
            let literal = serde_json::Value::String(version.as_str().to_string());
            format!(
                "/** Auto-generated by verstamp. Do not edit. */\n\
                 export const {name} = {literal} as const;\n"
            )
        }
    })
}

/// Render and write the version file, returning the path written.
pub fn emit_version_file(
    path: &Path,
    options: &EmitOptions,
    version: &ResolvedVersion,
) -> Result<PathBuf, StampError> {
    let contents = render_version_file(options, version)?;
    ensure_parent_dir(path)?;

    fs::write(path, contents).map_err(|e| StampError::Write {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    tracing::debug!(path = %path.display(), %version, "wrote version file");
    Ok(path.to_path_buf())
}
