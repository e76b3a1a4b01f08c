//! Line scanner for Lua sources.

use std::collections::BTreeSet;

use super::directives::{DirectiveSet, LUA};

const LINE_COMMENT: &str = "--";
const BLOCK_COMMENT_OPEN: &str = "--[[";
const BLOCK_COMMENT_CLOSE: &[&str] = &["]]", "]]--"];

fn closes_block_comment(line: &str) -> bool {
    BLOCK_COMMENT_CLOSE.iter().any(|close| line.ends_with(close))
}

/// Scan Lua source text and collect the referenced filenames.
///
/// Block comments are tracked per line: a line starting with `--[[` opens one
/// and a later line ending with `]]` closes it. Code sharing a line with either
/// marker is not scanned.
pub(crate) fn scan(content: &str, directives: &DirectiveSet) -> BTreeSet<String> {
    let mut files = BTreeSet::new();
    let mut in_block_comment = false;

    for line in content.lines().map(str::trim) {
        if in_block_comment {
            if closes_block_comment(line) {
                in_block_comment = false;
            }
            continue;
        }

        if let Some(rest) = line.strip_prefix(BLOCK_COMMENT_OPEN) {
            // `--[[ one-liner ]]` opens and closes on the same line
            in_block_comment = !closes_block_comment(rest);
            continue;
        }

        if line.starts_with(LINE_COMMENT) {
            continue;
        }

        if let Some(found) = directives.first_match(LUA, line) {
            files.extend(found);
        }
    }

    files
}
