//! Resolve dependencies for a whole distribution.
//!
//! Runs the full pipeline: parse the package database, build the file
//! ownership index, scan every package's runfiles and write the report.
//!
//! # Examples
//!
//! ```bash
//! # Use an installed TeX Live, located through kpsewhich
//! tldeps resolve --tlpdb /usr/local/texlive/2025/tlpkg/texlive.tlpdb
//!
//! # Point at an unpacked tree and write elsewhere
//! tldeps resolve --texmf-dist ./texmf-dist --output deps.json --exclude-self
//! ```

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;

use crate::cli::CliConfig;
use crate::config::{Config, resolve_texmf_dist};
use crate::constants::{DEFAULT_REPORT_PATH, DEFAULT_TLPDB_PATH, default_max_parallel};
use crate::core::Diagnostics;
use crate::report::DependencyReport;
use crate::resolver::{DependencyResolver, FileOwnershipIndex, SelfDependencyPolicy};
use crate::scanner::{ScanOptions, SourceScanner};
use crate::tlpdb::load_tlpdb;
use crate::utils::progress::ProgressBar;

/// Command to resolve all package dependencies.
#[derive(Args, Debug, Default)]
pub struct ResolveCommand {
    /// Package database to read [default: data/texlive.tlpdb]
    #[arg(long, value_name = "PATH")]
    tlpdb: Option<PathBuf>,

    /// Root of the distribution tree [default: $TEXMFDIST or kpsewhich]
    #[arg(long, value_name = "PATH")]
    texmf_dist: Option<PathBuf>,

    /// Where to write the report [default: data/tl-dependencies.json]
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Maximum number of packages scanned concurrently
    #[arg(long, value_name = "N")]
    max_parallel: Option<usize>,

    /// Do not list a package among its own dependencies
    #[arg(long)]
    exclude_self: bool,

    /// Only recognize class, package, font-definition and require directives
    #[arg(long)]
    basic_directives: bool,
}

/// Effective settings after merging flags, config file and defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ResolveSettings {
    tlpdb: PathBuf,
    texmf_dist: Option<PathBuf>,
    output: PathBuf,
    max_parallel: usize,
    policy: SelfDependencyPolicy,
    extended_directives: bool,
}

impl ResolveCommand {
    fn settings(&self, config: &Config) -> ResolveSettings {
        ResolveSettings {
            tlpdb: self
                .tlpdb
                .clone()
                .or_else(|| config.tlpdb.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_TLPDB_PATH)),
            texmf_dist: self.texmf_dist.clone().or_else(|| config.texmf_dist.clone()),
            output: self
                .output
                .clone()
                .or_else(|| config.output.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_REPORT_PATH)),
            max_parallel: self.max_parallel.or(config.max_parallel).unwrap_or_else(default_max_parallel),
            policy: if self.exclude_self {
                SelfDependencyPolicy::Exclude
            } else {
                config.self_dependencies.unwrap_or_default()
            },
            extended_directives: !self.basic_directives && config.extended_directives.unwrap_or(true),
        }
    }

    /// Run the pipeline and write the report.
    pub async fn execute(self, cli: &CliConfig) -> Result<()> {
        let config = Config::load(cli.config_path.as_deref()).await?;
        let settings = self.settings(&config);
        tracing::debug!("Resolve settings: {settings:?}");

        let mut diagnostics = Diagnostics::new();
        let mut packages = load_tlpdb(&settings.tlpdb, &mut diagnostics).await?;
        let texmf_dist = resolve_texmf_dist(settings.texmf_dist.as_deref()).await?;

        let index = FileOwnershipIndex::build(&packages, &mut diagnostics);
        let scanner = SourceScanner::new(ScanOptions {
            extended_directives: settings.extended_directives,
        })?;
        let resolver = DependencyResolver::new(texmf_dist, Arc::new(index), scanner, settings.policy);

        let progress = if cli.show_progress() {
            ProgressBar::new(packages.len() as u64)
        } else {
            ProgressBar::hidden()
        };
        progress.set_prefix("Scanning");

        let result = resolver
            .resolve_all_parallel(&mut packages, &mut diagnostics, settings.max_parallel, Some(&progress))
            .await;
        progress.finish_and_clear();
        result?;

        let report = DependencyReport::from_packages(&packages);
        report.save(&settings.output)?;

        if !cli.quiet {
            println!(
                "{} Resolved {} packages ({} dependencies, {} diagnostics) -> {}",
                "✓".green(),
                report.len(),
                report.edge_count(),
                diagnostics.len(),
                settings.output.display()
            );
        }

        Ok(())
    }
}
