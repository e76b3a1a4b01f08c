//! Utilities shared by the pipeline and the CLI
//!
//! - [`fs`] - atomic writes, directory creation and best-effort text decoding
//! - [`progress`] - progress bar for long scans

pub mod fs;
pub mod progress;

pub use fs::{atomic_write, ensure_dir, read_text_with_fallback, safe_write};
pub use progress::ProgressBar;
