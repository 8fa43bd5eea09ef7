//! Source-control port.
//!
//! The core never runs a version-control tool itself. Adapters (for example
//! `verstamp-git`) implement [`SourceControlProbe`], and [`collect_state`]
//! turns whatever they manage to answer into a [`SourceControlState`].
//! Every query is best-effort: failures are logged and become "unknown".

use std::path::PathBuf;

use thiserror::Error;

/// Errors a probe may report. None of them is ever propagated past
/// [`collect_state`].
#[derive(Debug, Error)]
pub enum ScmError {
    /// The version-control tool is not installed or not on `PATH`.
    #[error("{0} is not installed or not on PATH")]
    ToolUnavailable(String),

    /// The directory is not inside a repository.
    #[error("{0} is not inside a repository")]
    NotARepository(PathBuf),

    /// The tool ran but the query failed.
    #[error("`{command}` failed: {reason}")]
    CommandFailed { command: String, reason: String },
}

impl ScmError {
    /// Whether further queries against the same probe are pointless.
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::ToolUnavailable(_) | Self::NotARepository(_))
    }
}

/// Result type for probe queries.
pub type ScmResult<T> = Result<T, ScmError>;

/// Port for querying the working copy.
pub trait SourceControlProbe {
    /// Abbreviated id of the checked-out commit.
    fn commit_short(&self) -> ScmResult<String>;

    /// Current branch name, or the detached-head marker.
    fn branch(&self) -> ScmResult<String>;

    /// Whether tracked files differ from the checked-out commit.
    fn is_dirty(&self) -> ScmResult<bool>;
}

/// What the working copy reported. Every field is independently optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceControlState {
    pub commit_short: Option<String>,
    pub branch: Option<String>,
    pub dirty: Option<bool>,
}

impl SourceControlState {
    /// True when no field carries information.
    pub const fn is_empty(&self) -> bool {
        self.commit_short.is_none() && self.branch.is_none() && self.dirty.is_none()
    }
}

/// Query a probe and collect what it answers.
///
/// Returns `None` when the tool is missing, the directory is not a
/// repository, or no query produced a value.
pub fn collect_state(probe: &dyn SourceControlProbe) -> Option<SourceControlState> {
    let commit_short = match probe.commit_short() {
        Ok(commit) => non_blank(commit),
        Err(err) if err.is_terminal() => {
            tracing::debug!(error = %err, "source control unavailable");
            return None;
        }
        Err(err) => {
            tracing::debug!(error = %err, "commit query failed");
            None
        }
    };

    let branch = probe
        .branch()
        .map_err(|err| tracing::debug!(error = %err, "branch query failed"))
        .ok()
        .and_then(non_blank);

    let dirty = probe
        .is_dirty()
        .map_err(|err| tracing::debug!(error = %err, "dirty query failed"))
        .ok();

    let state = SourceControlState {
        commit_short,
        branch,
        dirty,
    };
    tracing::debug!(?state, "collected source control state");

    (!state.is_empty()).then_some(state)
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
