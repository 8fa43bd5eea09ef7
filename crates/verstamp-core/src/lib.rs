#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_GENERATED.md"))]
#![deny(unused_crate_dependencies)]

pub mod emit;
pub mod error;
pub mod hints;
pub mod inject;
pub mod metadata;
pub mod paths;
pub mod resolver;
pub mod scm;

// Re-export commonly used types for convenience
pub use emit::{DEFAULT_CONST_NAME, EmitLanguage, EmitOptions, emit_version_file, render_version_file};
pub use error::{StampError, validate_identifier};
pub use hints::EnvironmentHints;
pub use inject::{BuildInjector, DEFAULT_ENV_NAME};
pub use metadata::{ManifestKind, MetadataError, PackageMetadata};
pub use paths::PathError;
pub use resolver::{
    BranchSource, CommitSource, DETACHED_HEAD, DIRTY_SUFFIX, Resolution, ResolvedVersion,
    SHORT_SHA_LEN, explain, resolve,
};
pub use scm::{ScmError, ScmResult, SourceControlProbe, SourceControlState, collect_state};
