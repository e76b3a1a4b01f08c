//! Package dependency resolution.
//!
//! Resolution turns the package list into a package → dependency-set mapping:
//!
//! 1. [`FileOwnershipIndex::build`] maps every shipped base name to its package.
//! 2. For each package, every non-font runfile inside the distribution tree is
//!    scanned by the [`SourceScanner`].
//! 3. Each referenced filename is looked up in the index. Hits add the owning
//!    package; misses are recorded as [`Diagnostic::DependencyNotFound`] and
//!    resolution continues.
//!
//! Packages are independent of each other once the index is built, so
//! [`DependencyResolver::resolve_all_parallel`] fans the work out over tokio's
//! blocking pool. Results are merged back in database order and match
//! [`DependencyResolver::resolve_all`] exactly.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tldeps::core::Diagnostics;
//! use tldeps::resolver::{DependencyResolver, FileOwnershipIndex, SelfDependencyPolicy};
//! use tldeps::scanner::{ScanOptions, SourceScanner};
//! use tldeps::tlpdb::parse_tlpdb;
//!
//! # fn example() -> anyhow::Result<()> {
//! let mut diagnostics = Diagnostics::new();
//! let mut packages = parse_tlpdb(&std::fs::read_to_string("texlive.tlpdb")?, &mut diagnostics);
//! let index = FileOwnershipIndex::build(&packages, &mut diagnostics);
//!
//! let resolver = DependencyResolver::new(
//!     "/usr/local/texlive/2025/texmf-dist",
//!     Arc::new(index),
//!     SourceScanner::new(ScanOptions::default())?,
//!     SelfDependencyPolicy::Include,
//! );
//! resolver.resolve_all(&mut packages, &mut diagnostics);
//! # Ok(())
//! # }
//! ```

pub mod dependency_graph;
pub mod file_index;

pub use dependency_graph::{DependencyGraph, TreeDirection, TreeNode};
pub use file_index::FileOwnershipIndex;

use anyhow::{Result, anyhow};
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::core::{Diagnostic, Diagnostics};
use crate::scanner::SourceScanner;
use crate::tlpdb::PackageRecord;
use crate::utils::progress::ProgressBar;

/// Whether a package referencing its own files lists itself as a dependency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelfDependencyPolicy {
    /// Keep self-references (`amsmath` depends on `amsmath`)
    #[default]
    Include,
    /// Drop the package's own name from its dependency set
    Exclude,
}

/// Resolves package dependencies against a frozen ownership index.
///
/// Cloning is cheap: the index is shared and compiled directives are
/// reference-counted by `regex`.
#[derive(Debug, Clone)]
pub struct DependencyResolver {
    texmf_dist: PathBuf,
    index: Arc<FileOwnershipIndex>,
    scanner: SourceScanner,
    policy: SelfDependencyPolicy,
}

impl DependencyResolver {
    /// Create a resolver reading sources below `texmf_dist`.
    pub fn new(
        texmf_dist: impl Into<PathBuf>,
        index: Arc<FileOwnershipIndex>,
        scanner: SourceScanner,
        policy: SelfDependencyPolicy,
    ) -> Self {
        Self {
            texmf_dist: texmf_dist.into(),
            index,
            scanner,
            policy,
        }
    }

    /// Root of the distribution tree.
    #[must_use]
    pub fn texmf_dist(&self) -> &Path {
        &self.texmf_dist
    }

    /// Compute the sorted dependency list of one package.
    ///
    /// Diagnostics are returned rather than pushed into a shared list so
    /// packages can be resolved concurrently and merged in a fixed order.
    pub fn resolve_package(&self, package: &PackageRecord) -> (Vec<String>, Diagnostics) {
        let mut diagnostics = Diagnostics::new();
        let mut referenced = BTreeSet::new();

        for (_, path) in package.distribution_files() {
            let local = self.texmf_dist.join(path);
            referenced.extend(self.scanner.scan_file(&local, &mut diagnostics));
        }

        let mut dependencies = BTreeSet::new();
        for file in referenced {
            match self.index.owner(&file) {
                Some(owner) => {
                    dependencies.insert(owner.to_string());
                }
                None => diagnostics.push(Diagnostic::DependencyNotFound {
                    file,
                    package: package.name.clone(),
                }),
            }
        }

        if self.policy == SelfDependencyPolicy::Exclude {
            dependencies.remove(&package.name);
        }

        tracing::debug!("Resolved {}: {} dependencies", package.name, dependencies.len());
        (dependencies.into_iter().collect(), diagnostics)
    }

    /// Resolve every package in order, storing results in `dependencies`.
    pub fn resolve_all(&self, packages: &mut [PackageRecord], diagnostics: &mut Diagnostics) {
        for package in packages.iter_mut() {
            let (dependencies, package_diagnostics) = self.resolve_package(package);
            package.dependencies = dependencies;
            diagnostics.extend(package_diagnostics);
        }
    }

    /// Resolve every package on the blocking pool with bounded concurrency.
    ///
    /// At most `max_parallel` packages are scanned at once (a value of 0 is
    /// treated as 1). Output order and diagnostics order match
    /// [`resolve_all`](Self::resolve_all).
    ///
    /// # Errors
    ///
    /// Fails only if a resolution task panics or is cancelled.
    pub async fn resolve_all_parallel(
        &self,
        packages: &mut [PackageRecord],
        diagnostics: &mut Diagnostics,
        max_parallel: usize,
        progress: Option<&ProgressBar>,
    ) -> Result<()> {
        let tasks: Vec<_> = packages
            .iter()
            .map(|package| {
                let resolver = self.clone();
                let package = package.clone();
                let progress = progress.cloned();
                async move {
                    let name = package.name.clone();
                    let result =
                        tokio::task::spawn_blocking(move || resolver.resolve_package(&package))
                            .await
                            .map_err(|e| anyhow!("Task join error while resolving {name}: {e}"));
                    if let Some(progress) = &progress {
                        progress.inc(1);
                        progress.set_message(name);
                    }
                    result
                }
            })
            .collect();

        // `buffered` keeps input order, so merging is deterministic
        let results: Vec<Result<(Vec<String>, Diagnostics)>> =
            stream::iter(tasks).buffered(max_parallel.max(1)).collect().await;

        for (package, result) in packages.iter_mut().zip(results) {
            let (dependencies, package_diagnostics) = result?;
            package.dependencies = dependencies;
            diagnostics.extend(package_diagnostics);
        }

        Ok(())
    }
}
