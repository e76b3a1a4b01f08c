//! Static scanning of shipped source files for inclusion directives.
//!
//! The scanner answers one question per file: which other files would be loaded
//! when this one is used? It does so without parsing TeX or Lua. Each line is
//! matched against the table in [`directives`]; TeX directives whose argument
//! list runs over several lines are stitched together by a
//! [`BalanceTracker`](balance::BalanceTracker).
//!
//! # Languages
//!
//! | Extension | Language |
//! |-----------|----------|
//! | `.tex`, `.ltx`, `.cls`, `.sty`, `.def`, `.clo` | [`SourceLanguage::Tex`] |
//! | `.lua` | [`SourceLanguage::Lua`] |
//!
//! Files with any other extension are not read; scanning them records a
//! [`Diagnostic::UnknownFileType`] and yields nothing.
//!
//! # Example
//!
//! ```rust
//! use tldeps::scanner::{ScanOptions, SourceLanguage, SourceScanner};
//!
//! # fn example() -> anyhow::Result<()> {
//! let scanner = SourceScanner::new(ScanOptions::default())?;
//! let files = scanner.scan_source(SourceLanguage::Tex, "\\documentclass{article}\n\\usepackage{amsmath}\n");
//! assert_eq!(files.into_iter().collect::<Vec<_>>(), vec!["amsmath.sty", "article.cls"]);
//! # Ok(())
//! # }
//! ```

pub mod balance;
pub mod directives;
mod lua;
mod tex;

use anyhow::Result;
use std::collections::BTreeSet;
use std::path::Path;

use crate::constants::{LUA_EXTENSIONS, TEX_EXTENSIONS};
use crate::core::{Diagnostic, Diagnostics};
use crate::utils::fs::read_text_with_fallback;
use directives::DirectiveSet;

/// Source language of a shipped file, decided by its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceLanguage {
    /// TeX, LaTeX and docstrip-generated macro files
    Tex,
    /// Lua modules loaded by LuaTeX
    Lua,
}

impl SourceLanguage {
    /// Classify a path by extension; `None` for anything not scanned.
    ///
    /// Matching is case-sensitive, like kpathsea's suffix handling.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        if TEX_EXTENSIONS.contains(&ext) {
            Some(Self::Tex)
        } else if LUA_EXTENSIONS.contains(&ext) {
            Some(Self::Lua)
        } else {
            None
        }
    }
}

/// Scanner configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
    /// Recognize outline-font selection and `loadmodule` calls.
    pub extended_directives: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            extended_directives: true,
        }
    }
}

/// Extracts referenced filenames from source files.
///
/// The compiled recognizers are shared by clones, so one scanner can be handed
/// to every worker of a parallel run. Each call to [`scan_source`](Self::scan_source)
/// starts from fresh scan state.
#[derive(Debug, Clone)]
pub struct SourceScanner {
    directives: DirectiveSet,
}

impl SourceScanner {
    /// Build a scanner, compiling the directive table.
    pub fn new(options: ScanOptions) -> Result<Self> {
        Ok(Self {
            directives: DirectiveSet::new(options.extended_directives)?,
        })
    }

    /// Scan in-memory source text.
    #[must_use]
    pub fn scan_source(&self, language: SourceLanguage, content: &str) -> BTreeSet<String> {
        match language {
            SourceLanguage::Tex => tex::scan(content, &self.directives),
            SourceLanguage::Lua => lua::scan(content, &self.directives),
        }
    }

    /// Read and scan one file.
    ///
    /// Never fails: unknown extensions, missing files, unreadable files and
    /// non-UTF-8 content are recorded in `diagnostics`, and the scan carries on
    /// with whatever could be read.
    pub fn scan_file(&self, path: &Path, diagnostics: &mut Diagnostics) -> BTreeSet<String> {
        let Some(language) = SourceLanguage::from_path(path) else {
            diagnostics.push(Diagnostic::UnknownFileType {
                path: path.to_path_buf(),
            });
            return BTreeSet::new();
        };

        let content = match read_text_with_fallback(path) {
            Ok((content, lossless)) => {
                if !lossless {
                    diagnostics.push(Diagnostic::DecodingFallback {
                        path: path.to_path_buf(),
                    });
                }
                content
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                diagnostics.push(Diagnostic::FileNotFound {
                    path: path.to_path_buf(),
                });
                return BTreeSet::new();
            }
            Err(e) => {
                diagnostics.push(Diagnostic::ReadFailed {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                });
                return BTreeSet::new();
            }
        };

        let files = self.scan_source(language, &content);
        tracing::debug!("Scanned {} ({} references)", path.display(), files.len());
        files
    }
}
