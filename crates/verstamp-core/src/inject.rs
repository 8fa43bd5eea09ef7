//! Build-time injection through Cargo build-script directives.
//!
//! A build script resolves the version once and exports it with
//! `cargo:rustc-env`, so crate code reads it with `env!`. Builds running
//! under CI get the bare package version so release artifacts do not depend
//! on checkout state.

use std::path::PathBuf;

use crate::error::{StampError, validate_identifier};
use crate::hints::{EnvironmentHints, HINT_VARS};
use crate::metadata::PackageMetadata;
use crate::resolver::{ResolvedVersion, resolve};
use crate::scm::SourceControlState;

/// Environment variable name used when none is configured.
pub const DEFAULT_ENV_NAME: &str = "VERSTAMP_VERSION";

/// Produces the directives that expose a resolved version to `rustc`.
#[derive(Debug, Clone)]
pub struct BuildInjector {
    env_name: String,
    version: ResolvedVersion,
    repo_root: Option<PathBuf>,
}

impl BuildInjector {
    /// Resolve the version to inject, applying the CI policy.
    pub fn new(
        env_name: impl Into<String>,
        pkg: &PackageMetadata,
        scm: Option<&SourceControlState>,
        hints: &EnvironmentHints,
    ) -> Result<Self, StampError> {
        let env_name = env_name.into();
        validate_identifier(&env_name)?;

        let version = if hints.ci {
            tracing::debug!("CI build, injecting bare package version");
            ResolvedVersion::bare(pkg)
        } else {
            resolve(pkg, scm, hints)
        };

        Ok(Self {
            env_name,
            version,
            repo_root: None,
        })
    }

    /// Watch the repository at `root` so the build script reruns on commit,
    /// checkout or staging.
    ///
    /// Only a plain `.git` directory is watched. In a worktree or submodule
    /// `.git` is a file pointing elsewhere, and no git watches are emitted.
    #[must_use]
    pub fn with_repo_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.repo_root = Some(root.into());
        self
    }

    pub fn env_name(&self) -> &str {
        &self.env_name
    }

    pub fn version(&self) -> &ResolvedVersion {
        &self.version
    }

    /// The `cargo:` lines to print, in order.
    pub fn directives(&self) -> Vec<String> {
        let mut lines = vec![format!(
            "cargo:rustc-env={}={}",
            self.env_name, self.version
        )];

        lines.extend(
            HINT_VARS
                .iter()
                .map(|var| format!("cargo:rerun-if-env-changed={var}")),
        );

        if let Some(root) = &self.repo_root {
            let git_dir = root.join(".git");
            if git_dir.is_dir() {
                for watched in ["HEAD", "index"] {
                    lines.push(format!(
                        "cargo:rerun-if-changed={}",
                        git_dir.join(watched).display()
                    ));
                }
            } else {
                tracing::debug!(
                    path = %git_dir.display(),
                    "no .git directory, skipping git watches"
                );
            }
        }

        lines
    }

    /// Print the directives to stdout, where Cargo reads them.
    pub fn emit(&self) {
        for line in self.directives() {
            println!("{line}");
        }
    }
}
