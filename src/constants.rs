//! Global constants used throughout the tldeps codebase.
//!
//! This module contains the TeX Live layout conventions, file-name defaults and
//! parallelism parameters that are used across multiple modules. Defining them
//! centrally keeps the magic strings of the tlpdb format discoverable.

/// Location tag of relocatable runfiles in `texlive.tlpdb`.
pub const RELOC_TAG: &str = "RELOC";

/// Location tag of runfiles stored with an explicit `texmf-dist/` prefix.
pub const TEXMF_DIST_TAG: &str = "texmf-dist";

/// First path component of the font tree inside `texmf-dist`.
///
/// Files below it never become ownership-index entries and are never scanned.
pub const FONTS_DIR: &str = "fonts";

/// Suffix of development packages, which are left out of the ownership index.
pub const DEV_PACKAGE_SUFFIX: &str = "-dev";

/// Prefix of tlpdb metadata records such as `00texlive.config`.
pub const METADATA_PREFIX: &str = "00";

/// Extensions scanned as TeX sources.
pub const TEX_EXTENSIONS: &[&str] = &["tex", "ltx", "cls", "sty", "def", "clo"];

/// Extensions scanned as Lua sources.
pub const LUA_EXTENSIONS: &[&str] = &["lua"];

/// Default location of the package database, relative to the working directory.
pub const DEFAULT_TLPDB_PATH: &str = "data/texlive.tlpdb";

/// Default location of the dependency report, relative to the working directory.
pub const DEFAULT_REPORT_PATH: &str = "data/tl-dependencies.json";

/// Minimum number of parallel scans regardless of CPU count.
pub const MIN_PARALLELISM: usize = 10;

/// Multiplier applied to CPU core count for default parallelism.
///
/// Scanning is mostly file I/O, so running more tasks than cores keeps the
/// blocking pool busy while reads are pending.
pub const PARALLELISM_CORE_MULTIPLIER: usize = 2;

/// Default CPU core count when detection fails.
pub const FALLBACK_CORE_COUNT: usize = 4;

/// Default number of packages resolved concurrently.
pub fn default_max_parallel() -> usize {
    let cores = std::thread::available_parallelism()
        .map(std::num::NonZeroUsize::get)
        .unwrap_or(FALLBACK_CORE_COUNT);
    (cores * PARALLELISM_CORE_MULTIPLIER).max(MIN_PARALLELISM)
}
