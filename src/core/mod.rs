//! Core types for tldeps
//!
//! This module holds the two halves of the crate's error model:
//!
//! - [`error`] - fatal errors ([`TldepsError`]) and their user-facing rendering
//!   ([`ErrorContext`], [`user_friendly_error`])
//! - [`diagnostics`] - non-fatal conditions ([`Diagnostic`]) collected while
//!   parsing, indexing and scanning, and emitted to the `tracing` stream
//!
//! A run over a full TeX Live tree always meets some malformed or unusual input,
//! so everything the scanner and resolver can recover from is a diagnostic. Only
//! problems that leave a command without usable input become errors.

pub mod diagnostics;
pub mod error;

pub use diagnostics::{Diagnostic, Diagnostics};
pub use error::{ErrorContext, TldepsError, user_friendly_error};
