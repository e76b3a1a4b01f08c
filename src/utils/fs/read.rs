//! Best-effort text decoding.
//!
//! Most of a TeX Live tree is UTF-8, but older packages still ship Latin-1
//! sources. Directive names are ASCII in both, so decoding every byte as its
//! Latin-1 code point is lossless for the scanner's purposes.

use std::fs;
use std::path::Path;

/// Decode bytes as UTF-8, falling back to Latin-1.
///
/// Returns the text and whether the UTF-8 decode succeeded.
#[must_use]
pub fn decode_text(bytes: Vec<u8>) -> (String, bool) {
    match String::from_utf8(bytes) {
        Ok(text) => (text, true),
        Err(e) => (e.into_bytes().into_iter().map(char::from).collect(), false),
    }
}

/// Read a file as text, falling back to Latin-1 when it is not valid UTF-8.
///
/// # Errors
///
/// Returns the underlying I/O error, so callers can tell a missing file from
/// other read failures.
pub fn read_text_with_fallback(path: &Path) -> std::io::Result<(String, bool)> {
    fs::read(path).map(decode_text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_utf8() {
        let (text, lossless) = decode_text("Zürich".as_bytes().to_vec());
        assert_eq!(text, "Zürich");
        assert!(lossless);
    }

    #[test]
    fn test_decode_latin1_fallback() {
        let (text, lossless) = decode_text(b"Z\xfcrich \\usepackage{x}".to_vec());
        assert_eq!(text, "Zürich \\usepackage{x}");
        assert!(!lossless);
    }
}
