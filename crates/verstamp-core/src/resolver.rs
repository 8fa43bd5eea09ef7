//! Version resolution.
//!
//! Combines the package version with whatever commit and branch information
//! is available into a single string. Resolution never fails: with nothing
//! but a package version the result is that version.
//!
//! Commit precedence:
//! 1. `gitHead` recorded in the package metadata
//! 2. commit hint from the package manager environment
//! 3. short commit reported by source control
//!
//! Branch precedence:
//! 1. branch reported by source control
//! 2. committish hint, then tag hint
//!
//! Output shapes:
//! - `<version>-<branch>@<commit>`
//! - `<version>@<commit>`
//! - `<version>-<branch>`
//! - `<version>`
//!
//! followed by `-dirty` when source control reports uncommitted changes.

use std::fmt;

use crate::hints::EnvironmentHints;
use crate::metadata::PackageMetadata;
use crate::scm::SourceControlState;

/// Commit ids are cut to this many characters.
pub const SHORT_SHA_LEN: usize = 9;

/// Branch name reported for a detached head.
pub const DETACHED_HEAD: &str = "HEAD";

/// Appended when the working tree has uncommitted changes.
pub const DIRTY_SUFFIX: &str = "-dirty";

/// Separator between the version (or branch) and the commit id.
pub const COMMIT_SEPARATOR: char = '@';

/// Where the commit id came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitSource {
    /// `gitHead` in the package manifest.
    PackageMetadata,
    /// A package-manager environment variable.
    EnvironmentHint,
    /// A direct source-control query.
    SourceControl,
}

/// Where the branch name came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchSource {
    /// A direct source-control query.
    SourceControl,
    /// The committish hint.
    Committish,
    /// The tag hint.
    Tag,
}

/// The final version string. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedVersion(String);

impl ResolvedVersion {
    /// The bare package version with no suffixes.
    pub fn bare(pkg: &PackageMetadata) -> Self {
        Self(pkg.version().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ResolvedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ResolvedVersion {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A resolved version together with the inputs that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub version: ResolvedVersion,
    pub commit: Option<String>,
    pub commit_source: Option<CommitSource>,
    /// The winning branch, including a detached-head marker.
    pub branch: Option<String>,
    pub branch_source: Option<BranchSource>,
    pub dirty: bool,
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "version = {}", self.version)?;
        match (&self.commit, self.commit_source) {
            (Some(commit), Some(source)) => writeln!(f, "commit = {commit} ({source:?})")?,
            _ => writeln!(f, "commit = (none)")?,
        }
        match (&self.branch, self.branch_source) {
            (Some(branch), Some(source)) => writeln!(f, "branch = {branch} ({source:?})")?,
            _ => writeln!(f, "branch = (none)")?,
        }
        write!(f, "dirty = {}", self.dirty)
    }
}

/// Resolve the version string.
pub fn resolve(
    pkg: &PackageMetadata,
    scm: Option<&SourceControlState>,
    hints: &EnvironmentHints,
) -> ResolvedVersion {
    explain(pkg, scm, hints).version
}

/// Resolve the version string and report which source won each slot.
pub fn explain(
    pkg: &PackageMetadata,
    scm: Option<&SourceControlState>,
    hints: &EnvironmentHints,
) -> Resolution {
    let commit = pick_commit(pkg, scm, hints);
    let branch = pick_branch(scm, hints);
    let dirty = scm.and_then(|s| s.dirty).unwrap_or(false);

    let commit_id = commit.as_ref().map(|(id, _)| id.as_str());
    let branch_name = branch
        .as_ref()
        .map(|(name, _)| name.as_str())
        .filter(|name| *name != DETACHED_HEAD);

    let mut version = pkg.version().to_string();
    if let Some(name) = branch_name {
        version.push('-');
        version.push_str(name);
    }
    if let Some(id) = commit_id {
        version.push(COMMIT_SEPARATOR);
        version.push_str(id);
    }
    if dirty {
        version.push_str(DIRTY_SUFFIX);
    }

    tracing::debug!(
        %version,
        commit = ?commit,
        branch = ?branch,
        dirty,
        "resolved version"
    );

    let (commit, commit_source) = commit.map_or((None, None), |(id, src)| (Some(id), Some(src)));
    let (branch, branch_source) =
        branch.map_or((None, None), |(name, src)| (Some(name), Some(src)));

    Resolution {
        version: ResolvedVersion(version),
        commit,
        commit_source,
        branch,
        branch_source,
        dirty,
    }
}

fn pick_commit(
    pkg: &PackageMetadata,
    scm: Option<&SourceControlState>,
    hints: &EnvironmentHints,
) -> Option<(String, CommitSource)> {
    let candidates = [
        (pkg.git_head(), CommitSource::PackageMetadata),
        (hints.commit.as_deref(), CommitSource::EnvironmentHint),
        (
            scm.and_then(|s| s.commit_short.as_deref()),
            CommitSource::SourceControl,
        ),
    ];

    candidates
        .into_iter()
        .find_map(|(value, source)| present(value).map(|v| (shorten(v), source)))
}

fn pick_branch(
    scm: Option<&SourceControlState>,
    hints: &EnvironmentHints,
) -> Option<(String, BranchSource)> {
    let candidates = [
        (
            scm.and_then(|s| s.branch.as_deref()),
            BranchSource::SourceControl,
        ),
        (hints.committish.as_deref(), BranchSource::Committish),
        (hints.tag.as_deref(), BranchSource::Tag),
    ];

    candidates
        .into_iter()
        .find_map(|(value, source)| present(value).map(|v| (v.to_string(), source)))
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn shorten(commit: &str) -> String {
    commit.chars().take(SHORT_SHA_LEN).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pkg() -> PackageMetadata {
        PackageMetadata::new("1.2.3").unwrap()
    }

    fn scm(commit: Option<&str>, branch: Option<&str>, dirty: Option<bool>) -> SourceControlState {
        SourceControlState {
            commit_short: commit.map(str::to_string),
            branch: branch.map(str::to_string),
            dirty,
        }
    }

    #[test]
    fn nothing_known_yields_bare_version() {
        let v = resolve(&pkg(), None, &EnvironmentHints::default());
        assert_eq!(v.as_str(), "1.2.3");
    }

    #[test]
    fn empty_scm_state_yields_bare_version() {
        let state = SourceControlState::default();
        let v = resolve(&pkg(), Some(&state), &EnvironmentHints::default());
        assert_eq!(v.as_str(), "1.2.3");
    }

    #[test]
    fn branch_and_commit() {
        let state = scm(Some("abc1234"), Some("main"), Some(false));
        let v = resolve(&pkg(), Some(&state), &EnvironmentHints::default());
        assert_eq!(v.as_str(), "1.2.3-main@abc1234");
    }

    #[test]
    fn detached_head_drops_branch_segment() {
        let state = scm(Some("abc1234"), Some(DETACHED_HEAD), None);
        let v = resolve(&pkg(), Some(&state), &EnvironmentHints::default());
        assert_eq!(v.as_str(), "1.2.3@abc1234");
    }

    #[test]
    fn detached_head_is_not_replaced_by_hint() {
        let state = scm(Some("abc1234"), Some(DETACHED_HEAD), None);
        let hints = EnvironmentHints {
            committish: Some("feature".to_string()),
            ..EnvironmentHints::default()
        };
        let r = explain(&pkg(), Some(&state), &hints);
        assert_eq!(r.version.as_str(), "1.2.3@abc1234");
        assert_eq!(r.branch_source, Some(BranchSource::SourceControl));
    }

    #[test]
    fn branch_only() {
        let state = scm(None, Some("develop"), None);
        let v = resolve(&pkg(), Some(&state), &EnvironmentHints::default());
        assert_eq!(v.as_str(), "1.2.3-develop");
    }

    #[test]
    fn dirty_suffix_is_last() {
        let state = scm(Some("abc1234"), Some("main"), Some(true));
        let v = resolve(&pkg(), Some(&state), &EnvironmentHints::default());
        assert_eq!(v.as_str(), "1.2.3-main@abc1234-dirty");
        assert!(v.as_str().ends_with(DIRTY_SUFFIX));
    }

    #[test]
    fn dirty_applies_without_commit() {
        let state = scm(None, None, Some(true));
        let v = resolve(&pkg(), Some(&state), &EnvironmentHints::default());
        assert_eq!(v.as_str(), "1.2.3-dirty");
    }

    #[test]
    fn metadata_git_head_beats_everything() {
        let meta = pkg().with_git_head("1111111111111111");
        let state = scm(Some("333333333"), None, None);
        let hints = EnvironmentHints {
            commit: Some("222222222222".to_string()),
            ..EnvironmentHints::default()
        };

        let r = explain(&meta, Some(&state), &hints);
        assert_eq!(r.commit.as_deref(), Some("111111111"));
        assert_eq!(r.commit_source, Some(CommitSource::PackageMetadata));
    }

    #[test]
    fn commit_hint_beats_scm_commit() {
        let state = scm(Some("333333333"), None, None);
        let hints = EnvironmentHints {
            commit: Some("222222222".to_string()),
            ..EnvironmentHints::default()
        };

        let r = explain(&pkg(), Some(&state), &hints);
        assert_eq!(r.version.as_str(), "1.2.3@222222222");
        assert_eq!(r.commit_source, Some(CommitSource::EnvironmentHint));
    }

    #[test]
    fn scm_branch_never_overridden_by_hints() {
        let state = scm(Some("abc1234"), Some("main"), None);
        let hints = EnvironmentHints {
            committish: Some("other".to_string()),
            tag: Some("v9".to_string()),
            ..EnvironmentHints::default()
        };
        let v = resolve(&pkg(), Some(&state), &hints);
        assert_eq!(v.as_str(), "1.2.3-main@abc1234");
    }

    #[test]
    fn hints_fill_in_without_scm() {
        let hints = EnvironmentHints {
            commit: Some("0123456789abcdef".to_string()),
            tag: Some("v1.2.3".to_string()),
            ..EnvironmentHints::default()
        };
        let r = explain(&pkg(), None, &hints);
        assert_eq!(r.version.as_str(), "1.2.3-v1.2.3@012345678");
        assert_eq!(r.branch_source, Some(BranchSource::Tag));
    }

    #[test]
    fn committish_beats_tag() {
        let hints = EnvironmentHints {
            committish: Some("main".to_string()),
            tag: Some("v1".to_string()),
            ..EnvironmentHints::default()
        };
        let r = explain(&pkg(), None, &hints);
        assert_eq!(r.branch.as_deref(), Some("main"));
        assert_eq!(r.branch_source, Some(BranchSource::Committish));
    }

    #[test]
    fn blank_values_are_absent() {
        let meta = pkg().with_git_head("   ");
        let state = scm(Some(""), Some(" "), None);
        let v = resolve(&meta, Some(&state), &EnvironmentHints::default());
        assert_eq!(v.as_str(), "1.2.3");
    }

    #[test]
    fn commit_is_truncated() {
        let state = scm(Some("abcdef0123456789"), None, None);
        let v = resolve(&pkg(), Some(&state), &EnvironmentHints::default());
        assert_eq!(v.as_str(), "1.2.3@abcdef012");
    }

    #[test]
    fn explanation_lists_sources() {
        let state = scm(Some("abc1234"), Some("main"), Some(false));
        let text = explain(&pkg(), Some(&state), &EnvironmentHints::default()).to_string();
        assert!(text.contains("version = 1.2.3-main@abc1234"));
        assert!(text.contains("commit = abc1234 (SourceControl)"));
        assert!(text.contains("branch = main (SourceControl)"));
        assert!(text.contains("dirty = false"));
    }
}
