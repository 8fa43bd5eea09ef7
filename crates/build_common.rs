// Shared build script utilities for verstamp crates.
// Include this in build.rs files with: include!("../build_common.rs");
//
// Required imports in the including file:
//   use std::env;
//   use std::fs;
//   use std::path::Path;

/// Render a crate's README.md into `OUT_DIR/README_GENERATED.md` for rustdoc.
///
/// Links are rewritten so they resolve inside rustdoc:
/// 1. `](src/foo.rs)` becomes `](foo)` (module links)
/// 2. `](../../README.md` becomes the workspace repository URL
///
/// A crate without a README still gets a one-line stub so that
/// `include_str!` in `lib.rs` always has a file to read.
fn process_readme_for_rustdoc(crate_dir: &str) {
    println!("cargo:rerun-if-changed=README.md");
    println!("cargo:rerun-if-changed=../../Cargo.toml");

    let readme_path = Path::new(crate_dir).join("README.md");
    let rustdoc_content = match fs::read_to_string(&readme_path) {
        Ok(content) => {
            let mut rendered = content.replace("](src/", "](").replace(".rs)", ")");
            if let Some(url) = workspace_value(crate_dir, "repository") {
                rendered = rendered.replace("](../../README.md", &format!("]({url}"));
            }
            rendered
        }
        Err(_) => {
            let name = env::var("CARGO_PKG_NAME").unwrap_or_default();
            format!("`{name}`\n")
        }
    };

    let out_dir = env::var("OUT_DIR").unwrap();
    let dest_path = Path::new(&out_dir).join("README_GENERATED.md");
    fs::write(dest_path, rustdoc_content).unwrap();
}

/// Read a quoted `key = "value"` entry from the workspace Cargo.toml.
fn workspace_value(crate_dir: &str, key: &str) -> Option<String> {
    let workspace_toml = Path::new(crate_dir)
        .parent()? // crates/
        .parent()? // workspace root
        .join("Cargo.toml");

    let content = fs::read_to_string(workspace_toml).ok()?;

    content.lines().find_map(|line| {
        let (lhs, rhs) = line.trim().split_once('=')?;
        if lhs.trim() != key {
            return None;
        }
        let value = rhs.trim().strip_prefix('"')?.strip_suffix('"')?;
        Some(value.to_string())
    })
}
