//! Environment hints left by an invoking package manager.
//!
//! When a package is installed from a git tarball the working copy is gone,
//! but npm/pnpm still export the commit and ref they fetched. These values
//! only fill gaps the direct source-control query could not answer.
//!
//! Hints are built from a lookup function so callers decide where values come
//! from; [`EnvironmentHints::from_process_env`] is the production wiring.

use std::env;

/// Commit recorded in the package being built.
pub const NPM_PACKAGE_GIT_HEAD: &str = "npm_package_gitHead";
/// Commit of a git dependency being installed.
pub const NPM_CONFIG_GIT_HEAD: &str = "npm_config_git_head";
/// Branch or other committish of a git dependency being installed.
pub const NPM_CONFIG_GIT_COMMITTISH: &str = "npm_config_git_committish";
/// Tag of a git dependency being installed.
pub const NPM_CONFIG_GIT_TAG: &str = "npm_config_git_tag";
/// Set by most CI providers.
pub const CI: &str = "CI";

/// Every variable [`EnvironmentHints`] reads, in lookup order.
pub const HINT_VARS: [&str; 5] = [
    NPM_PACKAGE_GIT_HEAD,
    NPM_CONFIG_GIT_HEAD,
    NPM_CONFIG_GIT_COMMITTISH,
    NPM_CONFIG_GIT_TAG,
    CI,
];

/// Values supplied by the invoking process environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentHints {
    /// Commit id, from `npm_package_gitHead` or `npm_config_git_head`.
    pub commit: Option<String>,
    /// Branch or committish, from `npm_config_git_committish`.
    pub committish: Option<String>,
    /// Tag, from `npm_config_git_tag`.
    pub tag: Option<String>,
    /// Whether the build runs under continuous integration.
    pub ci: bool,
}

impl EnvironmentHints {
    /// Build hints from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            commit: get(NPM_PACKAGE_GIT_HEAD).or_else(|| get(NPM_CONFIG_GIT_HEAD)),
            committish: get(NPM_CONFIG_GIT_COMMITTISH),
            tag: get(NPM_CONFIG_GIT_TAG),
            ci: get(CI).is_some_and(|v| is_truthy(&v)),
        }
    }

    /// Build hints from the current process environment.
    pub fn from_process_env() -> Self {
        let hints = Self::from_lookup(|key| env::var(key).ok());
        tracing::debug!(?hints, "read environment hints");
        hints
    }
}

fn is_truthy(value: &str) -> bool {
    !(value == "0" || value.eq_ignore_ascii_case("false"))
}
