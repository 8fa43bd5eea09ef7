//! Package metadata loading.
//!
//! Two manifest shapes are understood:
//! - `package.json`-style JSON with a `version` and an optional `gitHead`
//! - `Cargo.toml`, reading `[package].version` or `[workspace.package].version`
//!   (parsed with `toml`)
//!
//! The manifest kind is chosen from the file name. Anything that is not
//! named `Cargo.toml` is parsed as JSON.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Errors raised while loading package metadata.
///
/// These are always fatal: without a version nothing can be stamped.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// The manifest could not be read.
    #[error("Failed to read manifest {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    /// The manifest was read but could not be parsed.
    #[error("Failed to parse manifest {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    /// The manifest has no usable `version` field.
    #[error("Manifest {0} does not declare a version")]
    MissingVersion(PathBuf),

    /// A version string was empty or whitespace.
    #[error("Package version cannot be empty")]
    EmptyVersion,
}

/// Which manifest format a file holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestKind {
    /// `package.json` and friends.
    Json,
    /// `Cargo.toml`.
    Cargo,
}

impl ManifestKind {
    /// Pick the manifest kind from a path's file name.
    pub fn detect(path: &Path) -> Self {
        match path.file_name().and_then(|n| n.to_str()) {
            Some("Cargo.toml") => Self::Cargo,
            _ => Self::Json,
        }
    }
}

/// Version information for the package being stamped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageMetadata {
    version: String,
    git_head: Option<String>,
}

impl PackageMetadata {
    /// Create metadata with a required, non-empty version.
    pub fn new(version: impl Into<String>) -> Result<Self, MetadataError> {
        let version = version.into().trim().to_string();
        if version.is_empty() {
            return Err(MetadataError::EmptyVersion);
        }
        Ok(Self {
            version,
            git_head: None,
        })
    }

    /// Attach the commit id recorded by the package manager at publish time.
    #[must_use]
    pub fn with_git_head(mut self, git_head: impl Into<String>) -> Self {
        self.git_head = Some(git_head.into());
        self
    }

    /// The declared package version.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// The recorded commit id, if the manifest carries one.
    pub fn git_head(&self) -> Option<&str> {
        self.git_head.as_deref()
    }

    /// Load metadata from a manifest on disk.
    pub fn load(path: &Path) -> Result<Self, MetadataError> {
        let content = fs::read_to_string(path).map_err(|e| MetadataError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let kind = ManifestKind::detect(path);
        let metadata = Self::parse(&content, kind, path)?;
        tracing::debug!(
            path = %path.display(),
            ?kind,
            version = metadata.version(),
            git_head = ?metadata.git_head(),
            "loaded package metadata"
        );
        Ok(metadata)
    }

    /// Parse manifest text. `path` is only used in error messages.
    pub fn parse(content: &str, kind: ManifestKind, path: &Path) -> Result<Self, MetadataError> {
        match kind {
            ManifestKind::Json => parse_json(content, path),
            ManifestKind::Cargo => parse_cargo(content, path),
        }
    }
}

#[derive(Deserialize)]
struct RawPackageJson {
    version: Option<String>,
    #[serde(rename = "gitHead")]
    git_head: Option<String>,
}

fn parse_json(content: &str, path: &Path) -> Result<PackageMetadata, MetadataError> {
    let raw: RawPackageJson = serde_json::from_str(content).map_err(|e| MetadataError::Parse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let version = raw
        .version
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| MetadataError::MissingVersion(path.to_path_buf()))?;

    let metadata = PackageMetadata::new(version)?;
    Ok(match raw.git_head {
        Some(head) if !head.trim().is_empty() => metadata.with_git_head(head.trim()),
        _ => metadata,
    })
}

#[derive(Deserialize)]
struct RawCargoManifest {
    package: Option<RawCargoPackage>,
    workspace: Option<RawCargoWorkspace>,
}

#[derive(Deserialize)]
struct RawCargoPackage {
    /// A string, or `{ workspace = true }` when inherited.
    version: Option<toml::Value>,
}

#[derive(Deserialize)]
struct RawCargoWorkspace {
    package: Option<RawWorkspacePackage>,
}

#[derive(Deserialize)]
struct RawWorkspacePackage {
    version: Option<String>,
}

/// Read `[package].version`, falling back to `[workspace.package].version`
/// when the package inherits it or is a virtual workspace root.
fn parse_cargo(content: &str, path: &Path) -> Result<PackageMetadata, MetadataError> {
    let raw: RawCargoManifest = toml::from_str(content).map_err(|e| MetadataError::Parse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let workspace_version = raw
        .workspace
        .and_then(|w| w.package)
        .and_then(|p| p.version);

    let version = match raw.package.and_then(|p| p.version) {
        Some(toml::Value::String(version)) => Some(version),
        Some(toml::Value::Table(table)) if inherits_workspace(&table) => workspace_version,
        Some(other) => {
            return Err(MetadataError::Parse {
                path: path.to_path_buf(),
                reason: format!("unsupported `package.version` value: {other}"),
            });
        }
        None => workspace_version,
    };

    let version = version
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| MetadataError::MissingVersion(path.to_path_buf()))?;
    PackageMetadata::new(version)
}

fn inherits_workspace(table: &toml::Table) -> bool {
    matches!(table.get("workspace"), Some(toml::Value::Boolean(true)))
}
