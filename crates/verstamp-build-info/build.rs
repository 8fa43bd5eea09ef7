use std::{env, fs, path::Path};

use verstamp_core::{BuildInjector, EnvironmentHints, PackageMetadata, collect_state};
use verstamp_git::{GitProbe, find_repo_root};

include!("../build_common.rs");

/// Name read by `lib.rs` through `env!`.
const BUILD_VERSION_ENV: &str = "VERSTAMP_BUILD_VERSION";

fn main() {
    // Always rerun when this build script changes.
    println!("cargo:rerun-if-changed=build.rs");

    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    process_readme_for_rustdoc(&manifest_dir);

    let semver = env::var("CARGO_PKG_VERSION").unwrap();
    let pkg = match PackageMetadata::new(&semver) {
        Ok(pkg) => pkg,
        Err(err) => {
            println!("cargo:warning=verstamp-build-info: {err}");
            emit_fallback(&semver);
            return;
        }
    };

    // Best-effort git probing; a tarball build simply has no repository.
    let repo_root = find_repo_root(Path::new(&manifest_dir));
    let scm = repo_root
        .as_deref()
        .and_then(|root| collect_state(&GitProbe::new(root)));
    let hints = EnvironmentHints::from_process_env();

    match BuildInjector::new(BUILD_VERSION_ENV, &pkg, scm.as_ref(), &hints) {
        Ok(injector) => match repo_root {
            Some(root) => injector.with_repo_root(root).emit(),
            None => injector.emit(),
        },
        Err(err) => {
            println!("cargo:warning=verstamp-build-info: {err}");
            emit_fallback(&semver);
        }
    }
}

// `env!` in lib.rs fails to compile if the variable is missing.
fn emit_fallback(semver: &str) {
    println!("cargo:rustc-env={BUILD_VERSION_ENV}={semver}");
}
