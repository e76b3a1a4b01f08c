//! Non-fatal diagnostics collected during a run.
//!
//! Every [`Diagnostic`] is logged through `tracing` the moment it is recorded, and
//! kept in a [`Diagnostics`] list so callers can summarize or count them. Parallel
//! resolution gives each package its own list and merges them back in database
//! order, which keeps the collected sequence deterministic.

use std::fmt;
use std::path::PathBuf;

/// A recoverable condition met while parsing, indexing or scanning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A runfile has an extension the scanner has no recognizers for.
    UnknownFileType {
        /// Local path of the file
        path: PathBuf,
    },

    /// A runfile listed in the database is missing from the distribution tree.
    FileNotFound {
        /// Local path of the file
        path: PathBuf,
    },

    /// A runfile exists but could not be read.
    ReadFailed {
        /// Local path of the file
        path: PathBuf,
        /// I/O error message
        reason: String,
    },

    /// Content was not valid UTF-8 and was decoded as Latin-1 instead.
    DecodingFallback {
        /// Local path of the file
        path: PathBuf,
    },

    /// A second package ships a file whose base name is already claimed.
    DuplicateFile {
        /// Runfile entry as recorded in the database
        file: String,
        /// Package that tried to claim it
        package: String,
        /// Package holding the first claim
        owner: String,
    },

    /// A referenced filename is not shipped by any indexed package.
    DependencyNotFound {
        /// The referenced filename
        file: String,
        /// Package whose sources referenced it
        package: String,
    },

    /// A development package was left out of the ownership index.
    SkippedDevPackage {
        /// Package name
        package: String,
    },

    /// A database record was malformed; the affected field fell back to a default.
    MalformedRecord {
        /// Package name, or the first line of the block if no name was found
        record: String,
        /// What was wrong
        reason: String,
    },
}

impl Diagnostic {
    /// Emit the diagnostic to the `tracing` stream.
    ///
    /// Unknown file types are expected for most runfiles (fonts maps, images,
    /// configuration files), so they are only visible at debug level.
    pub fn emit(&self) {
        match self {
            Self::UnknownFileType { .. } => tracing::debug!(target: "tldeps::diagnostics", "{self}"),
            Self::SkippedDevPackage { .. } => tracing::info!(target: "tldeps::diagnostics", "{self}"),
            _ => tracing::warn!(target: "tldeps::diagnostics", "{self}"),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownFileType { path } => write!(f, "Unknown file type: {}", path.display()),
            Self::FileNotFound { path } => write!(f, "File not found: {}", path.display()),
            Self::ReadFailed { path, reason } => {
                write!(f, "Failed to read {}: {reason}", path.display())
            }
            Self::DecodingFallback { path } => {
                write!(f, "Invalid UTF-8 in {}, decoded as Latin-1", path.display())
            }
            Self::DuplicateFile { file, package, owner } => {
                write!(f, "Duplicate file: {file} (in {package}, already owned by {owner})")
            }
            Self::DependencyNotFound { file, package } => {
                write!(f, "Dependency not found: {file} (referenced by {package})")
            }
            Self::SkippedDevPackage { package } => write!(f, "Skip dev package: {package}"),
            Self::MalformedRecord { record, reason } => {
                write!(f, "Malformed database record '{record}': {reason}")
            }
        }
    }
}

/// Ordered collection of diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Create an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic and emit it to the log.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        diagnostic.emit();
        self.entries.push(diagnostic);
    }

    /// Append diagnostics that were already emitted elsewhere.
    pub fn extend(&mut self, other: Self) {
        self.entries.extend(other.entries);
    }

    /// All recorded diagnostics, in order.
    #[must_use]
    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    /// Number of recorded diagnostics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Count the diagnostics matching a predicate.
    pub fn count(&self, predicate: impl Fn(&Diagnostic) -> bool) -> usize {
        self.entries.iter().filter(|d| predicate(d)).count()
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
