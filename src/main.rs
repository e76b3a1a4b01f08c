//! tldeps CLI entry point
//!
//! Parses the command line, runs the selected command and turns any failure into
//! a colored error report with exit code 1:
//! - `resolve` - Build the dependency report for a TeX Live tree
//! - `scan` - Print the files referenced by source files
//! - `tree` - Show a package's dependency tree

use anyhow::Result;
use clap::Parser;
use tldeps::cli;
use tldeps::core::error::user_friendly_error;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
