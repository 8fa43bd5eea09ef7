//! Exit code mapping for handler errors.
//!
//! Handlers return `anyhow::Result`; [`exit_code_for`] walks the error
//! chain to find the domain error underneath any added context.
//!
//! Exit codes follow Unix conventions:
//! - 1: General error
//! - 2: Misuse of shell command (invalid arguments)
//! - 74, 78: sysexits.h categories

use verstamp_core::{MetadataError, PathError, StampError};

/// Unexpected failure.
pub const EXIT_FAILURE: u8 = 1;
/// Invalid arguments, including invalid identifiers.
pub const EXIT_USAGE: u8 = 2;
/// Output directory uncreatable or file unwritable.
pub const EXIT_IOERR: u8 = 74;
/// Manifest missing or malformed.
pub const EXIT_CONFIG: u8 = 78;

const fn stamp_exit_code(err: &StampError) -> u8 {
    match err {
        StampError::Metadata(_) => EXIT_CONFIG,
        StampError::Path(_) | StampError::Write { .. } => EXIT_IOERR,
        StampError::InvalidIdentifier(_) => EXIT_USAGE,
    }
}

/// Exit code for an error returned from a handler.
pub fn exit_code_for(err: &anyhow::Error) -> u8 {
    for cause in err.chain() {
        if let Some(stamp) = cause.downcast_ref::<StampError>() {
            return stamp_exit_code(stamp);
        }
        if cause.is::<MetadataError>() {
            return EXIT_CONFIG;
        }
        if cause.is::<PathError>() || cause.is::<std::io::Error>() {
            return EXIT_IOERR;
        }
    }
    EXIT_FAILURE
}
