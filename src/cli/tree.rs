//! Display dependency trees from a saved report.
//!
//! ```text
//! $ tldeps tree beta
//! beta
//! ├── alpha
//! │   └── gamma
//! └── gamma (*)
//!
//! (*) = already shown above
//! ```
//!
//! `--reverse` walks from a package to the packages that depend on it, and
//! `--format json` prints the same tree as nested objects.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use crate::cli::CliConfig;
use crate::config::Config;
use crate::constants::DEFAULT_REPORT_PATH;
use crate::core::TldepsError;
use crate::report::DependencyReport;
use crate::resolver::{DependencyGraph, TreeDirection, TreeNode};

/// Command to display a package's dependency tree.
#[derive(Args, Debug)]
pub struct TreeCommand {
    /// Package to start from
    package: String,

    /// Report written by `tldeps resolve` [default: data/tl-dependencies.json]
    #[arg(short, long, value_name = "PATH")]
    report: Option<PathBuf>,

    /// Maximum depth to display (unlimited if not specified)
    #[arg(short = 'd', long)]
    depth: Option<usize>,

    /// Show packages depending on PACKAGE instead
    #[arg(short = 'i', long)]
    reverse: bool,

    /// Output format: tree or json
    #[arg(short = 'f', long, default_value = "tree")]
    format: String,
}

impl TreeCommand {
    /// Load the report and print the tree.
    pub async fn execute(self, cli: &CliConfig) -> Result<()> {
        self.validate_arguments()?;

        let config = Config::load(cli.config_path.as_deref()).await?;
        let report_path = self
            .report
            .clone()
            .or(config.output)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_REPORT_PATH));

        let report = DependencyReport::load(&report_path)?;
        let graph = DependencyGraph::from_report(&report);
        let tree = self.build(&graph)?;

        match self.format.as_str() {
            "json" => println!("{}", serde_json::to_string_pretty(&tree)?),
            _ => self.output_tree(&tree),
        }
        Ok(())
    }

    fn validate_arguments(&self) -> Result<()> {
        match self.format.as_str() {
            "tree" | "json" => {}
            _ => {
                return Err(anyhow::anyhow!(
                    "Invalid format '{}'. Valid formats are: tree, json",
                    self.format
                ));
            }
        }

        if let Some(depth) = self.depth
            && depth == 0
        {
            return Err(anyhow::anyhow!("Depth must be at least 1"));
        }

        Ok(())
    }

    fn build(&self, graph: &DependencyGraph) -> Result<TreeNode> {
        let direction = if self.reverse {
            TreeDirection::Dependents
        } else {
            TreeDirection::Dependencies
        };
        graph.tree(&self.package, direction, self.depth).ok_or_else(|| {
            TldepsError::PackageNotFound {
                name: self.package.clone(),
            }
            .into()
        })
    }

    fn output_tree(&self, tree: &TreeNode) {
        print!("{}", tree.render());
        if tree.has_repeated() {
            println!();
            println!("{}", "(*) = already shown above".bright_black());
        }
    }
}
