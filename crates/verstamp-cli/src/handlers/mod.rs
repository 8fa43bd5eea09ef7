//! Command handlers.
//!
//! Handlers follow one pattern:
//! - Signature: `pub fn execute(ctx: &StampContext, ..., out: &mut impl Write) -> Result<()>`
//! - Resolve through verstamp-core, then print to `out`
//!
//! Handlers should NOT read the environment or run git; bootstrap does that.

pub mod cargo_env;
pub mod resolve;
pub mod write;
