//! Build/version metadata for the `verstamp` binary.
#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_GENERATED.md"))]

/// The `SemVer` version of the build (from Cargo).
pub const SEMVER: &str = env!("CARGO_PKG_VERSION");

/// The version resolved by this crate's build script.
///
/// Examples:
/// - `0.3.0-main@1a2b3c4d5`
/// - `0.3.0@1a2b3c4d5-dirty` (detached head, local edits)
/// - `0.3.0` (CI builds, or no git data)
pub const LONG_VERSION: &str = env!("VERSTAMP_BUILD_VERSION");

/// Whether the build carried any source-control suffix.
pub const IS_STAMPED: bool = !str_eq(LONG_VERSION, SEMVER);

/// Whether the working tree had uncommitted changes at build time.
pub const GIT_DIRTY: bool = ends_with(LONG_VERSION, "-dirty");

const fn str_eq(a: &str, b: &str) -> bool {
    a.len() == b.len() && ends_with(a, b)
}

const fn ends_with(value: &str, suffix: &str) -> bool {
    let v = value.as_bytes();
    let s = suffix.as_bytes();
    if s.len() > v.len() {
        return false;
    }

    let offset = v.len() - s.len();
    let mut i = 0;
    while i < s.len() {
        if v[offset + i] != s[i] {
            return false;
        }
        i += 1;
    }
    true
}
