//! Locating the `texmf-dist` tree.
//!
//! Runfile paths in the package database are relative to the distribution
//! root. The root is taken from, in order:
//!
//! 1. an explicit setting (`--texmf-dist` or `texmf_dist` in the config file)
//! 2. the `TEXMFDIST` environment variable
//! 3. `kpsewhich -var-value TEXMFDIST` from an installed TeX Live

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::process::Command;

use crate::core::TldepsError;

/// Environment variable naming the distribution root.
pub const TEXMFDIST_ENV: &str = "TEXMFDIST";

/// Resolve the distribution root and check that it is a directory.
///
/// # Errors
///
/// - [`TldepsError::KpsewhichNotFound`] when nothing is configured and
///   `kpsewhich` is not on `PATH`
/// - [`TldepsError::KpsewhichFailed`] when `kpsewhich` fails or prints nothing
/// - [`TldepsError::TexmfDistNotFound`] when the resolved path is not a directory
pub async fn resolve_texmf_dist(explicit: Option<&Path>) -> Result<PathBuf> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match std::env::var_os(TEXMFDIST_ENV).filter(|v| !v.is_empty()) {
            Some(value) => PathBuf::from(value),
            None => query_kpsewhich().await?,
        },
    };

    if !path.is_dir() {
        return Err(TldepsError::TexmfDistNotFound {
            path: path.display().to_string(),
        }
        .into());
    }

    tracing::debug!("Using TEXMFDIST {}", path.display());
    Ok(path)
}

async fn query_kpsewhich() -> Result<PathBuf> {
    let kpsewhich = which::which("kpsewhich").map_err(|_| TldepsError::KpsewhichNotFound)?;
    tracing::debug!("Querying {} for TEXMFDIST", kpsewhich.display());

    let output = Command::new(&kpsewhich)
        .args(["-var-value", "TEXMFDIST"])
        .output()
        .await
        .with_context(|| format!("Failed to run {}", kpsewhich.display()))?;

    parse_kpsewhich_output(output.status.success(), &output.stdout, &output.stderr)
}

fn parse_kpsewhich_output(success: bool, stdout: &[u8], stderr: &[u8]) -> Result<PathBuf> {
    let value = String::from_utf8_lossy(stdout).trim().to_string();
    if !success || value.is_empty() {
        let stderr = String::from_utf8_lossy(stderr).trim().to_string();
        return Err(TldepsError::KpsewhichFailed {
            stderr: if stderr.is_empty() {
                "no output".to_string()
            } else {
                stderr
            },
        }
        .into());
    }
    Ok(PathBuf::from(value))
}
