//! Error handling for tldeps
//!
//! This module provides the fatal error types and user-friendly error reporting for
//! tldeps. Non-fatal conditions met while scanning (missing files, unresolved
//! references, duplicate file claims) are not errors; they are collected as
//! [`Diagnostic`](crate::core::Diagnostic)s and never abort a run.
//!
//! # Architecture
//!
//! - [`TldepsError`] - Enumerated error types for the conditions that do stop a command
//! - [`ErrorContext`] - Wrapper that adds user-friendly messages and suggestions
//!
//! Use [`user_friendly_error`] to convert any [`anyhow::Error`] into an
//! [`ErrorContext`] for display by the CLI.
//!
//! # Examples
//!
//! ```rust,no_run
//! use tldeps::core::{ErrorContext, TldepsError, user_friendly_error};
//!
//! fn locate() -> Result<(), TldepsError> {
//!     Err(TldepsError::KpsewhichNotFound)
//! }
//!
//! if let Err(e) = locate() {
//!     let ctx = user_friendly_error(anyhow::Error::from(e));
//!     ctx.display();
//! }
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for tldeps operations
///
/// Each variant describes one condition that prevents a command from producing
/// its output. Variants carry owned strings rather than source errors so the type
/// stays [`Clone`] and can be re-wrapped in an [`ErrorContext`].
#[derive(Error, Debug, Clone)]
pub enum TldepsError {
    /// The package database file does not exist
    #[error("Package database not found: {path}")]
    DatabaseNotFound {
        /// Path that was looked up
        path: String,
    },

    /// The package database exists but could not be read
    #[error("Failed to read package database {path}: {reason}")]
    DatabaseReadError {
        /// Path of the database file
        path: String,
        /// Underlying I/O failure
        reason: String,
    },

    /// `kpsewhich` is not available to locate the distribution tree
    #[error("kpsewhich is not installed or not found in PATH")]
    KpsewhichNotFound,

    /// `kpsewhich` ran but did not produce a usable TEXMFDIST value
    #[error("kpsewhich failed to report TEXMFDIST: {stderr}")]
    KpsewhichFailed {
        /// Error output of the command
        stderr: String,
    },

    /// The configured distribution root is not a directory
    #[error("TEXMFDIST directory not found: {path}")]
    TexmfDistNotFound {
        /// The configured or discovered path
        path: String,
    },

    /// Configuration file could not be parsed
    #[error("Invalid configuration file {path}: {reason}")]
    ConfigParseError {
        /// Path of the configuration file
        path: String,
        /// Parser message
        reason: String,
    },

    /// A saved dependency report could not be read back
    #[error("Invalid dependency report {path}: {reason}")]
    ReportParseError {
        /// Path of the report
        path: String,
        /// Parser message
        reason: String,
    },

    /// A package name was not present in the report being queried
    #[error("Package '{name}' not found in dependency report")]
    PackageNotFound {
        /// The requested package name
        name: String,
    },

    /// File system operation failed
    #[error("File system error during {operation}: {path}")]
    FileSystemError {
        /// What was being done
        operation: String,
        /// Affected path
        path: String,
    },

    /// Anything else, already formatted for display
    #[error("{message}")]
    Other {
        /// Formatted message including the cause chain
        message: String,
    },
}

/// Error context wrapper that provides user-friendly error information
///
/// Pairs a [`TldepsError`] with an optional suggestion (printed in green) and
/// optional details (printed in yellow).
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: TldepsError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context without suggestion or details.
    #[must_use]
    pub const fn new(error: TldepsError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    ///
    /// - Error message: Red and bold
    /// - Details: Yellow
    /// - Suggestion: Green
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`] with actionable suggestions
///
/// The whole `anyhow` chain is searched for a [`TldepsError`], so errors wrapped
/// with `.context(...)` still get their tailored suggestion. I/O and TOML errors
/// get generic guidance; everything else is shown with its cause chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(tldeps_error) = error.chain().find_map(|e| e.downcast_ref::<TldepsError>()) {
        return create_error_context(tldeps_error.clone());
    }

    if let Some(io_error) = error.chain().find_map(|e| e.downcast_ref::<std::io::Error>()) {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(TldepsError::Other {
                    message: format_chain(&error),
                })
                .with_suggestion("Check file ownership and permissions of the input and output paths")
                .with_details("tldeps needs read access to the distribution tree and write access to the report directory");
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(TldepsError::Other {
                    message: format_chain(&error),
                })
                .with_suggestion("Check that the file or directory exists and the path is correct");
            }
            _ => {}
        }
    }

    if error.chain().any(|e| e.downcast_ref::<toml::de::Error>().is_some()) {
        return ErrorContext::new(TldepsError::Other {
            message: format_chain(&error),
        })
        .with_suggestion("Check the TOML syntax of your tldeps configuration file")
        .with_details("Known keys: tlpdb, texmf_dist, output, self_dependencies, extended_directives, max_parallel");
    }

    ErrorContext::new(TldepsError::Other {
        message: format_chain(&error),
    })
}

/// Render an error with its numbered cause chain.
fn format_chain(error: &anyhow::Error) -> String {
    let mut message = error.to_string();
    let chain: Vec<String> = error.chain().skip(1).map(ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    message
}

/// Map each [`TldepsError`] variant to a context with tailored suggestions.
fn create_error_context(error: TldepsError) -> ErrorContext {
    match error {
        TldepsError::DatabaseNotFound { .. } => ErrorContext::new(error)
            .with_suggestion("Pass --tlpdb or set `tlpdb` in the config file. The database ships as tlpkg/texlive.tlpdb in a TeX Live installation")
            .with_details("tldeps reads the flat TeX Live package database to learn which files each package ships"),

        TldepsError::KpsewhichNotFound => ErrorContext::new(error)
            .with_suggestion("Install TeX Live, or pass --texmf-dist / set TEXMFDIST to the texmf-dist directory")
            .with_details("Without an explicit root, tldeps asks `kpsewhich -var-value TEXMFDIST` where the shipped files live"),

        TldepsError::KpsewhichFailed { .. } => ErrorContext::new(error)
            .with_suggestion("Run `kpsewhich -var-value TEXMFDIST` manually, or pass --texmf-dist explicitly"),

        TldepsError::TexmfDistNotFound { .. } => ErrorContext::new(error)
            .with_suggestion("Point --texmf-dist at the texmf-dist directory of a TeX Live installation"),

        TldepsError::ConfigParseError { .. } => ErrorContext::new(error)
            .with_suggestion("Fix the TOML syntax, or move the file aside to fall back to defaults")
            .with_details("Known keys: tlpdb, texmf_dist, output, self_dependencies, extended_directives, max_parallel"),

        TldepsError::ReportParseError { .. } => ErrorContext::new(error)
            .with_suggestion("Regenerate the report with `tldeps resolve`"),

        TldepsError::PackageNotFound { .. } => ErrorContext::new(error)
            .with_suggestion("Check the package name; names are the tlpdb `name` fields, e.g. 'amsmath' or 'l3kernel'"),

        TldepsError::DatabaseReadError { .. }
        | TldepsError::FileSystemError { .. }
        | TldepsError::Other { .. } => ErrorContext::new(error),
    }
}
