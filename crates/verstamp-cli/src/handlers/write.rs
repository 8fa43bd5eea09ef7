//! Write command handler.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use verstamp_core::{EmitLanguage, EmitOptions, emit_version_file, resolve};

use crate::bootstrap::StampContext;
use crate::commands::LanguageArg;

/// Resolve the version, write the generated file and print a summary line.
///
/// Language precedence: `--lang`, then the output extension, then Rust.
pub fn execute(
    ctx: &StampContext,
    output: &Path,
    lang: Option<LanguageArg>,
    const_name: &str,
    out: &mut impl Write,
) -> Result<()> {
    let language = lang
        .map(EmitLanguage::from)
        .or_else(|| EmitLanguage::from_path(output))
        .unwrap_or_default();
    let options = EmitOptions::new(language, const_name);

    let version = resolve(&ctx.package, ctx.scm.as_ref(), &ctx.hints);
    let written = emit_version_file(output, &options, &version)
        .with_context(|| format!("failed to write version file {}", output.display()))?;

    writeln!(out, "wrote {} → {version}", written.display())?;
    Ok(())
}
