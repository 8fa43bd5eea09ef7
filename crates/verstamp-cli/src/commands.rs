//! Commands enum and per-command argument types.

use std::path::PathBuf;

use clap::{Subcommand, ValueEnum};
use verstamp_core::{DEFAULT_CONST_NAME, DEFAULT_ENV_NAME, EmitLanguage};

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Print the resolved version
    Resolve {
        /// Also show which source supplied the commit and branch
        #[arg(long)]
        explain: bool,
    },

    /// Write a generated source file declaring the version constant
    Write {
        /// File to write; parent directories are created
        output: PathBuf,
        /// Output language (inferred from the file extension when omitted)
        #[arg(long, value_enum)]
        lang: Option<LanguageArg>,
        /// Name of the generated constant
        #[arg(long, default_value = DEFAULT_CONST_NAME)]
        name: String,
    },

    /// Print cargo:rustc-env directives for use from a build script
    CargoEnv {
        /// Environment variable exposed to rustc
        #[arg(long, default_value = DEFAULT_ENV_NAME)]
        name: String,
    },
}

/// `--lang` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LanguageArg {
    Rust,
    Typescript,
}

impl From<LanguageArg> for EmitLanguage {
    fn from(arg: LanguageArg) -> Self {
        match arg {
            LanguageArg::Rust => Self::Rust,
            LanguageArg::Typescript => Self::TypeScript,
        }
    }
}
