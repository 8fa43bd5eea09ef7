//! End-to-end tests for load → resolve → emit.
//!
//! Source control is faked through the probe port so results do not depend
//! on the checkout these tests run in.

use std::fs;
use std::path::PathBuf;

use tempfile::tempdir;
use verstamp_core::{
    BuildInjector, EmitLanguage, EmitOptions, EnvironmentHints, PackageMetadata, ScmError,
    ScmResult, SourceControlProbe, collect_state, emit_version_file, resolve,
};

struct CheckedOut {
    commit: &'static str,
    branch: &'static str,
    dirty: bool,
}

impl SourceControlProbe for CheckedOut {
    fn commit_short(&self) -> ScmResult<String> {
        Ok(self.commit.to_string())
    }

    fn branch(&self) -> ScmResult<String> {
        Ok(self.branch.to_string())
    }

    fn is_dirty(&self) -> ScmResult<bool> {
        Ok(self.dirty)
    }
}

struct NoRepository;

impl SourceControlProbe for NoRepository {
    fn commit_short(&self) -> ScmResult<String> {
        Err(ScmError::NotARepository(PathBuf::from(".")))
    }

    fn branch(&self) -> ScmResult<String> {
        Err(ScmError::NotARepository(PathBuf::from(".")))
    }

    fn is_dirty(&self) -> ScmResult<bool> {
        Err(ScmError::NotARepository(PathBuf::from(".")))
    }
}

#[test]
fn package_json_to_typescript_file() {
    let tmp = tempdir().unwrap();
    let manifest = tmp.path().join("package.json");
    fs::write(&manifest, r#"{"name": "demo-app", "version": "2.4.1"}"#).unwrap();

    let pkg = PackageMetadata::load(&manifest).unwrap();
    let probe = CheckedOut {
        commit: "9f8e7d6c5",
        branch: "main",
        dirty: false,
    };
    let scm = collect_state(&probe);
    let version = resolve(&pkg, scm.as_ref(), &EnvironmentHints::default());

    let out = tmp.path().join("lib").join("version.ts");
    let opts = EmitOptions::new(EmitLanguage::TypeScript, "APP_VERSION");
    emit_version_file(&out, &opts, &version).unwrap();

    let written = fs::read_to_string(&out).unwrap();
    assert!(written.contains("export const APP_VERSION = \"2.4.1-main@9f8e7d6c5\" as const;"));
}

#[test]
fn installed_tarball_uses_hints() {
    let tmp = tempdir().unwrap();
    let manifest = tmp.path().join("package.json");
    fs::write(&manifest, r#"{"version": "2.4.1"}"#).unwrap();

    let pkg = PackageMetadata::load(&manifest).unwrap();
    let scm = collect_state(&NoRepository);
    assert!(scm.is_none());

    let hints = EnvironmentHints::from_lookup(|key| match key {
        "npm_config_git_head" => Some("0a1b2c3d4e5f".to_string()),
        "npm_config_git_tag" => Some("v2.4.1".to_string()),
        _ => None,
    });

    assert_eq!(resolve(&pkg, scm.as_ref(), &hints).as_str(), "2.4.1-v2.4.1@0a1b2c3d4");
}

#[test]
fn cargo_manifest_without_anything_else_is_bare() {
    let tmp = tempdir().unwrap();
    let manifest = tmp.path().join("Cargo.toml");
    fs::write(&manifest, "[package]\nname = \"demo\"\nversion = \"0.1.0\"\n").unwrap();

    let pkg = PackageMetadata::load(&manifest).unwrap();
    let version = resolve(&pkg, collect_state(&NoRepository).as_ref(), &EnvironmentHints::default());
    assert_eq!(version.as_str(), "0.1.0");
}

#[test]
fn injector_and_emitter_agree_outside_ci() {
    let pkg = PackageMetadata::new("1.0.0").unwrap();
    let probe = CheckedOut {
        commit: "abc1234",
        branch: "HEAD",
        dirty: true,
    };
    let scm = collect_state(&probe);
    let hints = EnvironmentHints::default();

    let injector = BuildInjector::new("APP_VERSION", &pkg, scm.as_ref(), &hints).unwrap();
    assert_eq!(injector.version(), &resolve(&pkg, scm.as_ref(), &hints));
    assert_eq!(injector.version().as_str(), "1.0.0@abc1234-dirty");
}
