//! TeX Live package database (`texlive.tlpdb`) parsing.
//!
//! The database is a plain-text file of records separated by blank lines. Each
//! record starts with `name <package>` and continues with `key value` fields.
//! A `runfiles` field is followed by an indented list of file entries, one per
//! line, each starting with a location tag (`RELOC/` or `texmf-dist/`):
//!
//! ```text
//! name amsmath
//! category Package
//! revision 72779
//! depend latex
//! runfiles size=80
//!  RELOC/tex/latex/amsmath/amsmath.sty
//!  RELOC/tex/latex/amsmath/amstext.sty
//! ```
//!
//! Only the fields needed to build the dependency graph are kept. Records whose
//! name starts with `00` (distribution metadata such as `00texlive.config`) or
//! contains a `.` (platform binary packages such as `luatex.x86_64-linux`) are
//! skipped.

mod record;

pub use record::{PackageRecord, base_name, distribution_path};

use crate::constants::METADATA_PREFIX;
use crate::core::{Diagnostic, Diagnostics, TldepsError};
use crate::utils::fs::decode_text;
use anyhow::Result;
use std::path::Path;

/// Parse database text into package records, in database order.
///
/// Lines may end in `\n` or `\r\n`. Any number of blank lines separate records.
/// A block whose first line has no package name is skipped with a
/// [`Diagnostic::MalformedRecord`]; an unparsable `revision` becomes -1.
///
/// ```rust
/// use tldeps::core::Diagnostics;
/// use tldeps::tlpdb::parse_tlpdb;
///
/// let text = "name foo\ncategory Package\nrevision 12\ndepend bar\nrunfiles size=1\n RELOC/tex/latex/foo/foo.sty\n";
/// let mut diagnostics = Diagnostics::new();
/// let packages = parse_tlpdb(text, &mut diagnostics);
///
/// assert_eq!(packages.len(), 1);
/// assert_eq!(packages[0].name, "foo");
/// assert_eq!(packages[0].revision, 12);
/// assert_eq!(packages[0].declared_dependencies, vec!["bar"]);
/// assert_eq!(packages[0].runfiles, vec!["RELOC/tex/latex/foo/foo.sty"]);
/// ```
pub fn parse_tlpdb(text: &str, diagnostics: &mut Diagnostics) -> Vec<PackageRecord> {
    let mut packages = Vec::new();
    let mut block: Vec<&str> = Vec::new();

    for line in text.lines() {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.trim().is_empty() {
            if !block.is_empty() {
                packages.extend(parse_block(&block, diagnostics));
                block.clear();
            }
        } else {
            block.push(line);
        }
    }
    if !block.is_empty() {
        packages.extend(parse_block(&block, diagnostics));
    }

    tracing::debug!("Parsed {} packages from database", packages.len());
    packages
}

fn is_skipped_name(name: &str) -> bool {
    name.starts_with(METADATA_PREFIX) || name.contains('.')
}

fn parse_block(lines: &[&str], diagnostics: &mut Diagnostics) -> Option<PackageRecord> {
    let first = lines.first()?;
    let Some(name) = first.split_whitespace().nth(1) else {
        diagnostics.push(Diagnostic::MalformedRecord {
            record: first.trim().to_string(),
            reason: "missing package name".to_string(),
        });
        return None;
    };
    if is_skipped_name(name) {
        return None;
    }

    let mut record = PackageRecord::new(name);
    let mut in_runfiles = false;

    for line in &lines[1..] {
        if in_runfiles {
            if line.starts_with(' ') {
                record.runfiles.push(line.trim().to_string());
                continue;
            }
            in_runfiles = false;
        }

        let trimmed = line.trim();
        let (key, value) = match trimmed.split_once(char::is_whitespace) {
            Some((key, value)) => (key, value.trim()),
            None => (trimmed, ""),
        };

        match key {
            "category" => record.category = value.to_string(),
            "revision" => {
                record.revision = match value.parse() {
                    Ok(revision) => revision,
                    Err(_) => {
                        if !value.is_empty() {
                            diagnostics.push(Diagnostic::MalformedRecord {
                                record: record.name.clone(),
                                reason: format!("invalid revision '{value}'"),
                            });
                        }
                        -1
                    }
                };
            }
            "depend" if !value.is_empty() => record.declared_dependencies.push(value.to_string()),
            "runfiles" => in_runfiles = true,
            _ => {}
        }
    }

    Some(record)
}

/// Read and parse a database file.
///
/// Content that is not valid UTF-8 is decoded as Latin-1.
///
/// # Errors
///
/// Returns [`TldepsError::DatabaseNotFound`] if the file does not exist and
/// [`TldepsError::DatabaseReadError`] for any other read failure.
pub async fn load_tlpdb(path: &Path, diagnostics: &mut Diagnostics) -> Result<Vec<PackageRecord>> {
    let bytes = tokio::fs::read(path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            TldepsError::DatabaseNotFound {
                path: path.display().to_string(),
            }
        } else {
            TldepsError::DatabaseReadError {
                path: path.display().to_string(),
                reason: e.to_string(),
            }
        }
    })?;

    let (text, lossless) = decode_text(bytes);
    if !lossless {
        diagnostics.push(Diagnostic::DecodingFallback {
            path: path.to_path_buf(),
        });
    }

    tracing::info!("Loading package database from {}", path.display());
    Ok(parse_tlpdb(&text, diagnostics))
}
