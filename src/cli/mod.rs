//! Command-line interface for tldeps.
//!
//! # Available Commands
//!
//! - `resolve` - Build the dependency report for a whole TeX Live tree
//! - `scan` - Print the files referenced by individual source files
//! - `tree` - Show a package's dependency tree from a saved report
//!
//! # Typical Workflow
//!
//! ```bash
//! # Resolve against the installed distribution (located with kpsewhich)
//! tldeps resolve --tlpdb /usr/local/texlive/2025/tlpkg/texlive.tlpdb
//!
//! # Inspect the result
//! tldeps tree amsmath
//! tldeps tree --reverse l3kernel --depth 1
//!
//! # Check what a single file pulls in
//! tldeps scan mypaper.cls
//! ```
//!
//! # Global Options
//!
//! All subcommands accept `--verbose`, `--quiet`, `--config <path>` and
//! `--no-progress`. Diagnostics and logs go to stderr; command output goes to
//! stdout, so `tldeps scan foo.sty > deps.txt` captures only the file list.

mod resolve;
mod scan;
mod tree;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Settings derived from the global flags, handed to every subcommand.
///
/// Kept separate from [`Cli`] so tests can run commands with an explicit
/// configuration instead of parsing arguments.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Default log level when `RUST_LOG` is unset
    pub log_level: Option<String>,

    /// Hide progress bars.
    pub no_progress: bool,

    /// Suppress summaries on stdout.
    pub quiet: bool,

    /// Configuration file overriding the default location
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether long operations should draw a progress bar.
    #[must_use]
    pub fn show_progress(&self) -> bool {
        !self.no_progress && !self.quiet
    }

    /// Install the global `tracing` subscriber writing to stderr.
    ///
    /// `RUST_LOG` wins over `log_level` when set. Calling this twice is harmless.
    pub fn init_logging(&self) {
        let level = self.log_level.as_deref().unwrap_or("error");
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

/// Compute TeX Live package dependencies from shipped sources.
#[derive(Parser)]
#[command(
    name = "tldeps",
    about = "Compute TeX Live package dependencies",
    version,
    long_about = "tldeps scans the TeX and Lua files shipped by every TeX Live package for \
                  \\usepackage, \\documentclass, require() and similar directives, and maps \
                  each referenced file back to the package that ships it."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only print errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to a custom configuration file (default: ~/.tldeps/config.toml)
    #[arg(short, long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Disable progress bars
    #[arg(long, global = true)]
    no_progress: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve dependencies for every package in the database.
    ///
    /// See [`resolve::ResolveCommand`] for options.
    Resolve(resolve::ResolveCommand),

    /// Print the files referenced by TeX or Lua source files.
    ///
    /// See [`scan::ScanCommand`] for options.
    Scan(scan::ScanCommand),

    /// Display a package's dependency tree from a saved report.
    ///
    /// See [`tree::TreeCommand`] for options.
    Tree(tree::TreeCommand),
}

impl Cli {
    /// Execute the parsed command line.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        config.init_logging();
        self.execute_with_config(config).await
    }

    /// Translate the global flags into a [`CliConfig`].
    ///
    /// `--verbose` selects debug logging, `--quiet` errors only, and the
    /// default shows warnings and phase summaries.
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "info"
        };

        CliConfig {
            log_level: Some(log_level.to_string()),
            no_progress: self.no_progress,
            quiet: self.quiet,
            config_path: self.config.clone(),
        }
    }

    /// Execute with an explicit configuration.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        match self.command {
            Commands::Resolve(cmd) => cmd.execute(&config).await,
            Commands::Scan(cmd) => cmd.execute(&config).await,
            Commands::Tree(cmd) => cmd.execute(&config).await,
        }
    }
}
