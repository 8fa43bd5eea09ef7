//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where process state is read and adapters
//! are wired together:
//! - Package metadata from the manifest on disk
//! - Environment hints from the process environment
//! - Source-control state through the git probe (via verstamp-git)
//!
//! Command handlers receive the composed `StampContext` and never touch
//! the environment or spawn processes themselves.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use verstamp_core::{
    EnvironmentHints, PackageMetadata, SourceControlProbe, SourceControlState, collect_state,
};
use verstamp_git::{GitProbe, find_repo_root};

use crate::parser::Cli;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Manifest to read the package version from.
    pub manifest: PathBuf,
    /// Explicit directory for git queries.
    pub repo_dir: Option<PathBuf>,
    /// Whether to query git at all.
    pub use_git: bool,
}

impl CliConfig {
    /// Build config from parsed global arguments.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            manifest: cli.manifest.clone(),
            repo_dir: cli.repo_dir.clone(),
            use_git: !cli.no_git,
        }
    }

    /// Directory git is queried in: `--repo-dir`, else the manifest's directory.
    pub fn effective_repo_dir(&self) -> PathBuf {
        if let Some(dir) = &self.repo_dir {
            return dir.clone();
        }
        match self.manifest.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }
}

/// Everything a command needs to resolve and stamp a version.
#[derive(Debug, Clone)]
pub struct StampContext {
    pub package: PackageMetadata,
    pub scm: Option<SourceControlState>,
    pub hints: EnvironmentHints,
    /// Repository root, when the queried directory is inside one.
    pub repo_root: Option<PathBuf>,
}

/// Compose a `StampContext` using the real environment and git.
pub fn bootstrap(config: &CliConfig) -> Result<StampContext> {
    let repo_dir = config.effective_repo_dir();
    let probe = config.use_git.then(|| GitProbe::new(&repo_dir));
    bootstrap_with(
        config,
        EnvironmentHints::from_process_env(),
        probe.as_ref().map(|p| p as &dyn SourceControlProbe),
    )
}

/// Compose a `StampContext` from explicit hints and an optional probe.
pub fn bootstrap_with(
    config: &CliConfig,
    hints: EnvironmentHints,
    probe: Option<&dyn SourceControlProbe>,
) -> Result<StampContext> {
    let package = load_package(&config.manifest)?;

    let scm = match probe {
        Some(probe) => collect_state(probe),
        None => {
            tracing::debug!("git probing disabled");
            None
        }
    };

    let repo_root = if config.use_git {
        find_repo_root(&absolute(&config.effective_repo_dir()))
    } else {
        None
    };

    Ok(StampContext {
        package,
        scm,
        hints,
        repo_root,
    })
}

fn load_package(manifest: &Path) -> Result<PackageMetadata> {
    PackageMetadata::load(manifest)
        .with_context(|| format!("cannot determine package version from {}", manifest.display()))
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
