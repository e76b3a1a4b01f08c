//! tldeps - TeX Live package dependencies from shipped sources
//!
//! TeX Live's package database lists the files each package ships and a set of
//! hand-maintained `depend` entries. Those entries describe collections and
//! schemes well, but say little about what a `.sty` or `.lua` file actually
//! loads. tldeps recovers that by scanning every shipped TeX and Lua file for
//! inclusion directives and mapping each referenced file back to its package.
//!
//! # Pipeline
//!
//! 1. [`tlpdb`] parses `texlive.tlpdb` into [`PackageRecord`](tlpdb::PackageRecord)s
//! 2. [`resolver::FileOwnershipIndex`] maps every shipped base name to its package
//! 3. [`scanner`] extracts referenced filenames (`\usepackage{amsmath}` →
//!    `amsmath.sty`, `require("lualibs")` → `lualibs.lua`)
//! 4. [`resolver`] turns those names into per-package dependency sets
//! 5. [`report`] writes the result as JSON
//!
//! # Core Modules
//!
//! - [`cli`] - `resolve`, `scan` and `tree` commands
//! - [`config`] - `~/.tldeps/config.toml` and locating `texmf-dist`
//! - [`constants`] - File extensions, path tags and defaults
//! - [`core`] - Error types and non-fatal diagnostics
//! - [`report`] - The JSON dependency report
//! - [`resolver`] - Ownership index, resolution and the dependency graph
//! - [`scanner`] - Directive recognition for TeX and Lua sources
//! - [`tlpdb`] - Package database parsing
//! - [`utils`] - Atomic writes, text decoding and progress bars
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tldeps::core::Diagnostics;
//! use tldeps::report::DependencyReport;
//! use tldeps::resolver::{DependencyResolver, FileOwnershipIndex, SelfDependencyPolicy};
//! use tldeps::scanner::{ScanOptions, SourceScanner};
//! use tldeps::tlpdb::load_tlpdb;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let mut diagnostics = Diagnostics::new();
//! let mut packages = load_tlpdb("texlive.tlpdb".as_ref(), &mut diagnostics).await?;
//! let index = FileOwnershipIndex::build(&packages, &mut diagnostics);
//!
//! let resolver = DependencyResolver::new(
//!     "/usr/local/texlive/2025/texmf-dist",
//!     Arc::new(index),
//!     SourceScanner::new(ScanOptions::default())?,
//!     SelfDependencyPolicy::Include,
//! );
//! resolver.resolve_all_parallel(&mut packages, &mut diagnostics, 16, None).await?;
//!
//! DependencyReport::from_packages(&packages).save("tl-dependencies.json".as_ref())?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod report;
pub mod resolver;
pub mod scanner;
pub mod tlpdb;
pub mod utils;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
