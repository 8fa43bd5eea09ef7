#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_GENERATED.md"))]
#![deny(unused_crate_dependencies)]

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use verstamp_core::resolver::SHORT_SHA_LEN;
use verstamp_core::{ScmError, ScmResult, SourceControlProbe};

const GIT: &str = "git";

/// Queries a working copy through the `git` command line.
#[derive(Debug, Clone)]
pub struct GitProbe {
    repo_dir: PathBuf,
    program: OsString,
}

impl GitProbe {
    /// Probe the repository containing `repo_dir`.
    pub fn new(repo_dir: impl Into<PathBuf>) -> Self {
        Self {
            repo_dir: repo_dir.into(),
            program: OsString::from(GIT),
        }
    }

    /// Use a different executable instead of `git` from `PATH`.
    #[must_use]
    pub fn with_program(mut self, program: impl Into<OsString>) -> Self {
        self.program = program.into();
        self
    }

    pub fn repo_dir(&self) -> &Path {
        &self.repo_dir
    }

    fn run(&self, args: &[&str]) -> ScmResult<String> {
        let command = format!("git {}", args.join(" "));
        let output = Command::new(&self.program)
            .arg("-C")
            .arg(&self.repo_dir)
            .args(args)
            .env("LC_ALL", "C")
            .stdin(Stdio::null())
            .output()
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => {
                    ScmError::ToolUnavailable(self.program.to_string_lossy().into_owned())
                }
                _ => ScmError::CommandFailed {
                    command: command.clone(),
                    reason: e.to_string(),
                },
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if stderr.contains("not a git repository") {
                return Err(ScmError::NotARepository(self.repo_dir.clone()));
            }
            return Err(ScmError::CommandFailed {
                command,
                reason: stderr.trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        tracing::trace!(%command, %stdout, "git query");
        Ok(stdout)
    }

    fn run_non_empty(&self, args: &[&str]) -> ScmResult<String> {
        let out = self.run(args)?;
        if out.is_empty() {
            return Err(ScmError::CommandFailed {
                command: format!("git {}", args.join(" ")),
                reason: "empty output".to_string(),
            });
        }
        Ok(out)
    }
}

impl SourceControlProbe for GitProbe {
    fn commit_short(&self) -> ScmResult<String> {
        let short = format!("--short={SHORT_SHA_LEN}");
        self.run_non_empty(&["rev-parse", &short, "HEAD"])
    }

    fn branch(&self) -> ScmResult<String> {
        self.run_non_empty(&["rev-parse", "--abbrev-ref", "HEAD"])
    }

    fn is_dirty(&self) -> ScmResult<bool> {
        let status = self.run(&["status", "--porcelain", "--untracked-files=no"])?;
        Ok(!status.is_empty())
    }
}

/// Walk up from `start` to the first directory containing `.git`.
pub fn find_repo_root(start: &Path) -> Option<PathBuf> {
    let mut current = Some(start);
    while let Some(dir) = current {
        if dir.join(".git").exists() {
            return Some(dir.to_path_buf());
        }
        current = dir.parent();
    }
    None
}
