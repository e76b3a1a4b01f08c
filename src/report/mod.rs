//! The dependency report written by `tldeps resolve`.
//!
//! The report is a JSON array with one object per package, in database order:
//!
//! ```json
//! [
//!   {
//!     "name": "beta",
//!     "depend": [
//!       "alpha"
//!     ],
//!     "tl_depend": [
//!       "latex"
//!     ]
//!   }
//! ]
//! ```
//!
//! `depend` holds the computed dependencies, `tl_depend` the dependencies
//! declared in the package database. Output is deterministic, so resolving the
//! same inputs twice produces byte-identical files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::TldepsError;
use crate::tlpdb::PackageRecord;
use crate::utils::fs::safe_write;

/// Report entry for one package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageReport {
    /// Package name
    pub name: String,
    /// Computed dependencies, sorted
    pub depend: Vec<String>,
    /// Dependencies declared in the database
    pub tl_depend: Vec<String>,
}

impl From<&PackageRecord> for PackageReport {
    fn from(record: &PackageRecord) -> Self {
        Self {
            name: record.name.clone(),
            depend: record.dependencies.clone(),
            tl_depend: record.declared_dependencies.clone(),
        }
    }
}

/// Dependency report for a whole distribution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DependencyReport {
    packages: Vec<PackageReport>,
}

impl DependencyReport {
    /// Build a report from resolved packages, keeping their order.
    pub fn from_packages(packages: &[PackageRecord]) -> Self {
        Self {
            packages: packages.iter().map(PackageReport::from).collect(),
        }
    }

    /// All entries in order.
    #[must_use]
    pub fn packages(&self) -> &[PackageReport] {
        &self.packages
    }

    /// Look up a package by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PackageReport> {
        self.packages.iter().find(|p| p.name == name)
    }

    /// Total number of computed dependency edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.packages.iter().map(|p| p.depend.len()).sum()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Serialize as pretty JSON with a trailing newline.
    pub fn to_json(&self) -> Result<String> {
        let mut json = serde_json::to_string_pretty(self).context("Failed to serialize dependency report")?;
        json.push('\n');
        Ok(json)
    }

    /// Write the report atomically, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        safe_write(path, &json)
            .with_context(|| format!("Failed to write dependency report to {}", path.display()))?;
        tracing::info!("Wrote {} packages to {}", self.len(), path.display());
        Ok(())
    }

    /// Read a report written by [`save`](Self::save).
    ///
    /// # Errors
    ///
    /// Returns [`TldepsError::ReportParseError`] if the file is missing or is not
    /// a valid report.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| TldepsError::ReportParseError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let report = serde_json::from_str(&content).map_err(|e| TldepsError::ReportParseError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(report)
    }
}
