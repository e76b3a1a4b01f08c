//! Base-name ownership index.
//!
//! Directives reference files by base name only (`amsmath.sty`, `luaotfload.lua`),
//! so resolution needs a map from base name back to the package that ships the
//! file. Names are expected to be unique across the distribution; when they are
//! not, the first package in database order keeps the claim.

use crate::core::{Diagnostic, Diagnostics};
use crate::tlpdb::{PackageRecord, base_name};
use std::collections::HashMap;

/// Maps shipped base names to their owning package.
///
/// Built once from the full package list and read-only afterwards, so it can be
/// shared between resolver tasks behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct FileOwnershipIndex {
    owners: HashMap<String, String>,
}

impl FileOwnershipIndex {
    /// Build the index from packages in database order.
    ///
    /// Development packages are skipped; font files and files outside the
    /// distribution tree are never indexed. A base name claimed twice keeps its
    /// first owner and records a [`Diagnostic::DuplicateFile`].
    pub fn build(packages: &[PackageRecord], diagnostics: &mut Diagnostics) -> Self {
        let mut owners: HashMap<String, String> = HashMap::new();

        for package in packages {
            if package.is_dev_package() {
                diagnostics.push(Diagnostic::SkippedDevPackage {
                    package: package.name.clone(),
                });
                continue;
            }

            for (entry, path) in package.distribution_files() {
                let name = base_name(path);
                match owners.get(name) {
                    Some(owner) => diagnostics.push(Diagnostic::DuplicateFile {
                        file: entry.to_string(),
                        package: package.name.clone(),
                        owner: owner.clone(),
                    }),
                    None => {
                        owners.insert(name.to_string(), package.name.clone());
                    }
                }
            }
        }

        tracing::info!("Indexed {} files from {} packages", owners.len(), packages.len());
        Self { owners }
    }

    /// Package owning `file`, if any.
    #[must_use]
    pub fn owner(&self, file: &str) -> Option<&str> {
        self.owners.get(file).map(String::as_str)
    }

    /// Number of indexed base names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.owners.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}
