//! Scan individual source files.
//!
//! Prints the sorted, deduplicated set of filenames referenced by the given
//! files, one per line. Useful for checking what a class or package would pull
//! in without resolving a whole distribution.
//!
//! ```bash
//! tldeps scan mythesis.cls chapters/setup.sty
//! tldeps scan --basic-directives luaotfload-main.lua
//! ```

use anyhow::Result;
use clap::Args;
use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::cli::CliConfig;
use crate::config::Config;
use crate::core::Diagnostics;
use crate::scanner::{ScanOptions, SourceScanner};

/// Command to scan source files for inclusion directives.
#[derive(Args, Debug)]
pub struct ScanCommand {
    /// TeX (.tex, .ltx, .cls, .sty, .def, .clo) or Lua (.lua) files
    #[arg(required = true, value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Only recognize class, package, font-definition and require directives
    #[arg(long)]
    basic_directives: bool,
}

impl ScanCommand {
    /// Scan the files and print the referenced names.
    ///
    /// Missing or unreadable files are reported as diagnostics on stderr and
    /// do not fail the command.
    pub async fn execute(self, cli: &CliConfig) -> Result<()> {
        let config = Config::load(cli.config_path.as_deref()).await?;
        let scanner = SourceScanner::new(ScanOptions {
            extended_directives: !self.basic_directives && config.extended_directives.unwrap_or(true),
        })?;

        let mut diagnostics = Diagnostics::new();
        let referenced = scan_files(&scanner, &self.files, &mut diagnostics);

        for name in &referenced {
            println!("{name}");
        }
        tracing::debug!(
            "Scanned {} files: {} references, {} diagnostics",
            self.files.len(),
            referenced.len(),
            diagnostics.len()
        );
        Ok(())
    }
}

fn scan_files(scanner: &SourceScanner, files: &[PathBuf], diagnostics: &mut Diagnostics) -> BTreeSet<String> {
    files.iter().flat_map(|file| scanner.scan_file(file, diagnostics)).collect()
}
