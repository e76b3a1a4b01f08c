//! Delimiter balance tracking for directives spanning several lines.
//!
//! A directive such as
//!
//! ```tex
//! \usepackage[
//!   colorlinks=true,
//! ]{
//!   geometry,
//!   hyperref
//! }
//! ```
//!
//! is only complete once every `{` has been closed, at least one `{` has been
//! seen, and no `[` option group is still open. [`BalanceTracker`] accumulates the
//! comment-stripped fragments and answers that question after each line.
//!
//! The tracker is purely mechanical: braces inside quoted strings or escaped as
//! `\{` are counted like any other.

/// Per-file scan state for one in-progress multi-line directive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BalanceTracker {
    pending_text: String,
    group_depth: i64,
    group_seen: bool,
    option_depth: i64,
    option_seen: bool,
}

impl BalanceTracker {
    /// Create a tracker in its reset state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a fragment and update the delimiter counters.
    pub fn update(&mut self, fragment: &str) {
        self.pending_text.push_str(fragment);
        for c in fragment.chars() {
            match c {
                '{' => {
                    self.group_depth += 1;
                    self.group_seen = true;
                }
                '}' => self.group_depth -= 1,
                '[' => {
                    self.option_depth += 1;
                    self.option_seen = true;
                }
                ']' => self.option_depth -= 1,
                _ => {}
            }
        }
    }

    /// Whether the accumulated directive has a closed argument list.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.group_depth == 0 && self.group_seen && !self.is_option_open()
    }

    /// Whether an option group `[...]` is currently open.
    #[must_use]
    pub fn is_option_open(&self) -> bool {
        self.option_depth > 0
    }

    /// Whether a multi-line directive is being accumulated.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        !self.pending_text.is_empty()
    }

    /// Text accumulated since the last reset.
    #[must_use]
    pub fn pending_text(&self) -> &str {
        &self.pending_text
    }

    /// Current group nesting depth; negative after stray closing braces.
    #[must_use]
    pub fn group_depth(&self) -> i64 {
        self.group_depth
    }

    /// Whether any option group was opened since the last reset.
    #[must_use]
    pub fn option_seen(&self) -> bool {
        self.option_seen
    }

    /// Return the accumulated text and go back to the initial state.
    pub fn take(&mut self) -> String {
        let text = std::mem::take(&mut self.pending_text);
        self.reset();
        text
    }

    /// Clear all fields, releasing the accumulated text.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
