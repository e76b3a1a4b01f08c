//! User configuration for tldeps.
//!
//! Settings live in a TOML file so that a TeX Live installation only has to be
//! described once. Every key is optional; command-line flags override the file
//! and the file overrides built-in defaults.
//!
//! # Location
//!
//! - Unix/macOS: `~/.tldeps/config.toml`
//! - Windows: `%LOCALAPPDATA%\tldeps\config.toml`
//! - Override: `TLDEPS_CONFIG_PATH` environment variable, or `--config <path>`
//!
//! A missing file is not an error; an unparsable one is.
//!
//! # Format
//!
//! ```toml
//! tlpdb = "~/texlive/2025/tlpkg/texlive.tlpdb"
//! texmf_dist = "$TEXLIVE_ROOT/texmf-dist"
//! output = "data/tl-dependencies.json"
//! self_dependencies = "exclude"   # or "include" (default)
//! extended_directives = true
//! max_parallel = 16
//! ```
//!
//! `~` and environment variables in path values are expanded when loading.
//!
//! # Modules
//!
//! - [`texmf`] - locating the `texmf-dist` tree

pub mod texmf;

pub use texmf::resolve_texmf_dist;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::core::TldepsError;
use crate::resolver::SelfDependencyPolicy;

/// Environment variable overriding the configuration file location.
pub const CONFIG_PATH_ENV: &str = "TLDEPS_CONFIG_PATH";

/// Contents of `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Package database to read
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tlpdb: Option<PathBuf>,

    /// Root of the distribution tree; located automatically when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub texmf_dist: Option<PathBuf>,

    /// Where `resolve` writes its report
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,

    /// Whether packages list themselves as dependencies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub self_dependencies: Option<SelfDependencyPolicy>,

    /// Recognize outline-font selection and `loadmodule` calls
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extended_directives: Option<bool>,

    /// Concurrency limit for resolution
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_parallel: Option<usize>,
}

impl Config {
    /// Load configuration, honoring an explicit path, then
    /// `TLDEPS_CONFIG_PATH`, then the default location.
    ///
    /// Returns the default configuration when the file does not exist.
    ///
    /// # Errors
    ///
    /// Fails if the file exists but cannot be read or parsed, or if a path value
    /// references an undefined environment variable.
    pub async fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match std::env::var_os(CONFIG_PATH_ENV) {
                Some(path) => PathBuf::from(path),
                None => Self::default_path()?,
            },
        };

        if path.exists() {
            Self::load_from(&path).await
        } else {
            tracing::debug!("No config file at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let config: Self = toml::from_str(&content).map_err(|e| TldepsError::ConfigParseError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        tracing::debug!("Loaded config from {}", path.display());
        config.expanded()
    }

    /// Default configuration file location.
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "windows") {
            dirs::data_local_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine local data directory"))?
                .join("tldeps")
        } else {
            dirs::home_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine home directory"))?
                .join(".tldeps")
        };

        Ok(config_dir.join("config.toml"))
    }

    fn expanded(self) -> Result<Self> {
        Ok(Self {
            tlpdb: self.tlpdb.as_deref().map(expand_path).transpose()?,
            texmf_dist: self.texmf_dist.as_deref().map(expand_path).transpose()?,
            output: self.output.as_deref().map(expand_path).transpose()?,
            ..self
        })
    }
}

/// Expand `~` and environment variables in a path.
///
/// # Errors
///
/// Fails if the path references an undefined variable.
pub fn expand_path(path: &Path) -> Result<PathBuf> {
    let raw = path.to_string_lossy();
    let expanded = shellexpand::full(&raw).with_context(|| {
        format!(
            "Failed to expand path: {raw}\n\n\
            Check that every referenced environment variable is set (use $VAR or ${{VAR}})"
        )
    })?;
    Ok(PathBuf::from(expanded.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_load_full_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
tlpdb = "/opt/texlive/tlpkg/texlive.tlpdb"
texmf_dist = "/opt/texlive/texmf-dist"
output = "out/deps.json"
self_dependencies = "exclude"
extended_directives = false
max_parallel = 3
"#,
        )
        .unwrap();

        let config = Config::load(Some(&path)).await.unwrap();
        assert_eq!(config.tlpdb, Some(PathBuf::from("/opt/texlive/tlpkg/texlive.tlpdb")));
        assert_eq!(config.texmf_dist, Some(PathBuf::from("/opt/texlive/texmf-dist")));
        assert_eq!(config.output, Some(PathBuf::from("out/deps.json")));
        assert_eq!(config.self_dependencies, Some(SelfDependencyPolicy::Exclude));
        assert_eq!(config.extended_directives, Some(false));
        assert_eq!(config.max_parallel, Some(3));
    }

    #[tokio::test]
    async fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load(Some(&dir.path().join("absent.toml"))).await.unwrap();
        assert_eq!(config, Config::default());
    }

    #[tokio::test]
    async fn test_invalid_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "self_dependencies = \"sometimes\"\n").unwrap();

        let err = Config::load_from(&path).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TldepsError>(),
            Some(TldepsError::ConfigParseError { .. })
        ));
    }

    #[tokio::test]
    async fn test_unknown_key_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "tlpbd = \"typo\"\n").unwrap();
        assert!(Config::load_from(&path).await.is_err());
    }

    #[test]
    fn test_expand_home() {
        let home = dirs::home_dir().unwrap();
        assert_eq!(expand_path(Path::new("~/texlive")).unwrap(), home.join("texlive"));
        assert_eq!(expand_path(Path::new("/plain/path")).unwrap(), PathBuf::from("/plain/path"));
    }

    #[test]
    fn test_expand_undefined_variable() {
        assert!(expand_path(Path::new("$TLDEPS_SURELY_UNDEFINED_VAR/x")).is_err());
    }

    #[test]
    fn test_serialize_skips_unset_keys() {
        let config = Config {
            max_parallel: Some(4),
            ..Config::default()
        };
        assert_eq!(toml::to_string(&config).unwrap(), "max_parallel = 4\n");
    }
}
