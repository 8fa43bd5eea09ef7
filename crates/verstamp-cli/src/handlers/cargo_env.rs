//! Cargo-env command handler.
//!
//! Build scripts can shell out to `verstamp cargo-env` instead of
//! depending on verstamp-core.

use std::io::Write;

use anyhow::Result;
use verstamp_core::BuildInjector;

use crate::bootstrap::StampContext;

/// Print the build-time injector directives.
pub fn execute(ctx: &StampContext, env_name: &str, out: &mut impl Write) -> Result<()> {
    let mut injector = BuildInjector::new(env_name, &ctx.package, ctx.scm.as_ref(), &ctx.hints)?;
    if let Some(root) = &ctx.repo_root {
        injector = injector.with_repo_root(root);
    }

    for line in injector.directives() {
        writeln!(out, "{line}")?;
    }
    Ok(())
}
