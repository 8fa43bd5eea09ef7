//! Resolve command handler.

use std::io::Write;

use anyhow::Result;
use verstamp_core::explain;

use crate::bootstrap::StampContext;

/// Print the resolved version, or the full explanation with `--explain`.
pub fn execute(ctx: &StampContext, show_sources: bool, out: &mut impl Write) -> Result<()> {
    let resolution = explain(&ctx.package, ctx.scm.as_ref(), &ctx.hints);
    if show_sources {
        writeln!(out, "{resolution}")?;
    } else {
        writeln!(out, "{}", resolution.version)?;
    }
    Ok(())
}
