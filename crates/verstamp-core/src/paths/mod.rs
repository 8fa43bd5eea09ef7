//! Output directory preparation for the emitter.

mod ensure;
mod error;

pub use ensure::ensure_parent_dir;
pub use error::PathError;
