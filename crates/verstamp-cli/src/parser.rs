//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use std::path::PathBuf;

use clap::Parser;

use crate::commands::Commands;

/// Manifest looked up when `--manifest` is not given.
pub const DEFAULT_MANIFEST: &str = "package.json";

/// Command-line interface for the version stamping tool.
///
/// Global options locate the package and control the git probe; the
/// subcommand decides what to do with the resolved version.
#[derive(Parser)]
#[command(name = "verstamp")]
#[command(about = "Resolve a build version from package metadata and git, then stamp it")]
#[command(version = verstamp_build_info::LONG_VERSION)]
pub struct Cli {
    /// Package manifest to read the version from (package.json or Cargo.toml)
    #[arg(
        long,
        global = true,
        env = "VERSTAMP_MANIFEST",
        default_value = DEFAULT_MANIFEST
    )]
    pub manifest: PathBuf,

    /// Directory to query git in (defaults to the manifest's directory)
    #[arg(long = "repo-dir", global = true, env = "VERSTAMP_REPO_DIR")]
    pub repo_dir: Option<PathBuf>,

    /// Do not query git; only metadata and environment hints are used
    #[arg(long = "no-git", global = true, env = "VERSTAMP_NO_GIT")]
    pub no_git: bool,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::LanguageArg;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parser_builds() {
        // Verify the CLI parser can be constructed
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_args() {
        let cli = Cli::parse_from([
            "verstamp",
            "--manifest",
            "web/package.json",
            "--no-git",
            "resolve",
            "-v",
        ]);
        assert!(cli.verbose);
        assert!(cli.no_git);
        assert_eq!(cli.manifest, PathBuf::from("web/package.json"));
        assert!(matches!(cli.command, Commands::Resolve { explain: false }));
    }

    #[test]
    fn test_write_args() {
        let cli = Cli::parse_from([
            "verstamp",
            "write",
            "lib/version.ts",
            "--lang",
            "typescript",
            "--name",
            "APP_VERSION",
        ]);
        let Commands::Write { output, lang, name } = cli.command else {
            panic!("expected write command");
        };
        assert_eq!(output, PathBuf::from("lib/version.ts"));
        assert_eq!(lang, Some(LanguageArg::Typescript));
        assert_eq!(name, "APP_VERSION");
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["verstamp", "cargo-env"]);
        assert_eq!(cli.manifest, PathBuf::from(DEFAULT_MANIFEST));
        assert!(cli.repo_dir.is_none());
        let Commands::CargoEnv { name } = cli.command else {
            panic!("expected cargo-env command");
        };
        assert_eq!(name, verstamp_core::DEFAULT_ENV_NAME);
    }
}
