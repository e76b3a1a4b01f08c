//! Line scanner for TeX and LaTeX sources.

use std::collections::BTreeSet;

use super::balance::BalanceTracker;
use super::directives::{DirectiveSet, TEX_MULTI_LINE, TEX_SINGLE_LINE};

/// Line that ends TeX input; nothing after it is read by TeX, nor by us.
const END_INPUT: &str = r"\endinput";

/// Strip a trailing `%` comment and surrounding whitespace.
///
/// `\%` is not special-cased, so an escaped percent sign also ends the fragment.
fn strip_comment(line: &str) -> &str {
    line.split('%').next().unwrap_or_default().trim()
}

/// Scan TeX source text and collect the referenced filenames.
pub(crate) fn scan(content: &str, directives: &DirectiveSet) -> BTreeSet<String> {
    let mut files = BTreeSet::new();
    let mut tracker = BalanceTracker::new();

    for line in content.lines() {
        if line.trim_end() == END_INPUT {
            break;
        }
        if line.trim_start().starts_with('%') {
            continue;
        }
        files.extend(scan_line(line, &mut tracker, directives));
    }

    if tracker.is_pending() {
        tracing::trace!("Unterminated directive at end of input: {}", tracker.pending_text());
    }

    files
}

fn scan_line(line: &str, tracker: &mut BalanceTracker, directives: &DirectiveSet) -> Vec<String> {
    if !tracker.is_pending() {
        if let Some(files) = directives.first_match(TEX_SINGLE_LINE, line) {
            return files;
        }

        let fragment = strip_comment(line);
        if directives.starts_multi_line(fragment) {
            tracker.update(fragment);
        }
        return Vec::new();
    }

    tracker.update(strip_comment(line));
    if !tracker.is_complete() {
        return Vec::new();
    }

    let directive = tracker.take();
    directives.first_match(TEX_MULTI_LINE, &directive).unwrap_or_default()
}
