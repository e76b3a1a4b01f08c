//! Progress indicators for long-running resolution.
//!
//! A full TeX Live tree has several thousand packages and well over a hundred
//! thousand runfiles, so `tldeps resolve` shows a bar while scanning. The bar is
//! hidden when `TLDEPS_NO_PROGRESS` is set and when stderr is not a terminal,
//! which indicatif detects on its own. `--no-progress` and `--quiet` use
//! [`ProgressBar::hidden`] directly.
//!
//! # Environment Variables
//!
//! - `TLDEPS_NO_PROGRESS`: Set to any value to disable all progress indicators
//!
//! # Examples
//!
//! ```rust
//! use tldeps::utils::progress::ProgressBar;
//!
//! let progress = ProgressBar::new(100);
//! progress.set_prefix("Scanning");
//! for _ in 0..100 {
//!     progress.inc(1);
//! }
//! progress.finish_and_clear();
//! ```

use indicatif::{ProgressBar as IndicatifBar, ProgressStyle as IndicatifStyle};

/// Environment variable disabling progress output.
pub const NO_PROGRESS_ENV: &str = "TLDEPS_NO_PROGRESS";

fn is_progress_disabled() -> bool {
    std::env::var(NO_PROGRESS_ENV).is_ok()
}

fn default_style() -> IndicatifStyle {
    IndicatifStyle::default_bar()
        .template("{prefix:.bold} [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
        .unwrap_or_else(|_| IndicatifStyle::default_bar())
        .progress_chars("━╸━")
}

/// A progress bar with consistent styling.
///
/// Cloning shares the underlying bar, so clones can be moved into parallel tasks.
#[derive(Clone)]
pub struct ProgressBar {
    inner: IndicatifBar,
}

impl ProgressBar {
    /// Creates a new progress bar tracking `len` work units.
    ///
    /// Returns a hidden bar that ignores all updates when progress output is
    /// disabled.
    pub fn new(len: u64) -> Self {
        let bar = if is_progress_disabled() {
            IndicatifBar::hidden()
        } else {
            let bar = IndicatifBar::new(len);
            bar.set_style(default_style());
            bar
        };
        Self { inner: bar }
    }

    /// Creates a bar that never draws.
    pub fn hidden() -> Self {
        Self {
            inner: IndicatifBar::hidden(),
        }
    }

    /// Sets the trailing message.
    pub fn set_message(&self, msg: impl Into<String>) {
        self.inner.set_message(msg.into());
    }

    /// Sets the leading prefix.
    pub fn set_prefix(&self, prefix: impl Into<String>) {
        self.inner.set_prefix(prefix.into());
    }

    /// Advances the bar.
    pub fn inc(&self, delta: u64) {
        self.inner.inc(delta);
    }

    /// Current position.
    pub fn position(&self) -> u64 {
        self.inner.position()
    }

    /// Finishes and removes the bar from the terminal.
    pub fn finish_and_clear(&self) {
        self.inner.finish_and_clear();
    }
}
