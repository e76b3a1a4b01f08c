//! File system utilities.
//!
//! - [`atomic`] - write-then-rename output so a crashed run never leaves a
//!   half-written report behind
//! - [`dirs`] - directory creation
//! - [`read`] - best-effort text decoding for source files of unknown encoding
//!
//! # Examples
//!
//! ```rust,no_run
//! use tldeps::utils::fs::{read_text_with_fallback, safe_write};
//! use std::path::Path;
//!
//! # fn example() -> anyhow::Result<()> {
//! safe_write(Path::new("data/out.json"), "[]\n")?;
//! let (text, lossless) = read_text_with_fallback(Path::new("data/out.json"))?;
//! assert!(lossless);
//! # Ok(())
//! # }
//! ```

pub mod atomic;
pub mod dirs;
pub mod read;

pub use atomic::{atomic_write, safe_write};
pub use dirs::{ensure_dir, ensure_parent_dir};
pub use read::{decode_text, read_text_with_fallback};
