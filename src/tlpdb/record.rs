//! Package records and runfile locations.

use crate::constants::{DEV_PACKAGE_SUFFIX, FONTS_DIR, RELOC_TAG, TEXMF_DIST_TAG};

/// One installable package from the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRecord {
    /// Package name, unique within a database
    pub name: String,
    /// `category` field (`Package`, `TLCore`, `ConTeXt`, ...), empty if absent
    pub category: String,
    /// `revision` field; -1 if absent or unparsable
    pub revision: i64,
    /// `depend` fields in database order
    pub declared_dependencies: Vec<String>,
    /// `runfiles` entries as recorded, location tag included
    pub runfiles: Vec<String>,
    /// Computed dependencies, sorted; empty until resolved
    pub dependencies: Vec<String>,
}

impl PackageRecord {
    /// A record with only a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: String::new(),
            revision: -1,
            declared_dependencies: Vec::new(),
            runfiles: Vec::new(),
            dependencies: Vec::new(),
        }
    }

    /// Whether this is a development package (`*-dev`).
    #[must_use]
    pub fn is_dev_package(&self) -> bool {
        self.name.ends_with(DEV_PACKAGE_SUFFIX)
    }

    /// Runfiles inside the distribution tree, excluding fonts, as
    /// `(recorded entry, path relative to texmf-dist)` pairs.
    pub fn distribution_files(&self) -> impl Iterator<Item = (&str, &str)> {
        self.runfiles
            .iter()
            .filter_map(|entry| distribution_path(entry).map(|path| (entry.as_str(), path)))
    }
}

/// Path of a runfile relative to the distribution root.
///
/// Accepts entries tagged `RELOC/` or `texmf-dist/`, strips the tag, and rejects
/// anything below `fonts/`. Returns `None` for other trees (`bin/`, `tlpkg/`,
/// `texmf-dist` docs recorded elsewhere) and for font files.
///
/// ```rust
/// use tldeps::tlpdb::distribution_path;
///
/// assert_eq!(distribution_path("RELOC/tex/latex/foo/foo.sty"), Some("tex/latex/foo/foo.sty"));
/// assert_eq!(distribution_path("texmf-dist/scripts/foo/foo.lua"), Some("scripts/foo/foo.lua"));
/// assert_eq!(distribution_path("RELOC/fonts/tfm/public/foo/foo.tfm"), None);
/// assert_eq!(distribution_path("bin/x86_64-linux/foo"), None);
/// ```
#[must_use]
pub fn distribution_path(entry: &str) -> Option<&str> {
    let (tag, path) = entry.split_once('/')?;
    if tag != RELOC_TAG && tag != TEXMF_DIST_TAG {
        return None;
    }
    if path.split('/').next() == Some(FONTS_DIR) {
        return None;
    }
    Some(path)
}

/// Final path component of a runfile path.
#[must_use]
pub fn base_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distribution_path_rejects_other_trees() {
        assert_eq!(distribution_path("RELOCATED/tex/foo.sty"), None);
        assert_eq!(distribution_path("texmf-dist"), None);
        assert_eq!(distribution_path("tlpkg/tlpostcode/foo.pl"), None);
    }

    #[test]
    fn test_distribution_path_only_skips_fonts_directory() {
        assert_eq!(distribution_path("RELOC/fonts/map/dvips/foo/foo.map"), None);
        assert_eq!(distribution_path("RELOC/fontsx/foo.sty"), Some("fontsx/foo.sty"));
        assert_eq!(distribution_path("RELOC/tex/latex/fonts/foo.sty"), Some("tex/latex/fonts/foo.sty"));
    }

    #[test]
    fn test_base_name() {
        assert_eq!(base_name("tex/latex/foo/foo.sty"), "foo.sty");
        assert_eq!(base_name("foo.sty"), "foo.sty");
    }

    #[test]
    fn test_distribution_files() {
        let mut record = PackageRecord::new("foo");
        record.runfiles = vec![
            "RELOC/tex/latex/foo/foo.sty".to_string(),
            "RELOC/fonts/tfm/foo/foo.tfm".to_string(),
            "bin/x86_64-linux/foo".to_string(),
            "texmf-dist/scripts/foo/foo.lua".to_string(),
        ];
        let files: Vec<_> = record.distribution_files().collect();
        assert_eq!(
            files,
            vec![
                ("RELOC/tex/latex/foo/foo.sty", "tex/latex/foo/foo.sty"),
                ("texmf-dist/scripts/foo/foo.lua", "scripts/foo/foo.lua"),
            ]
        );
    }

    #[test]
    fn test_is_dev_package() {
        assert!(PackageRecord::new("latex-dev").is_dev_package());
        assert!(!PackageRecord::new("latex").is_dev_package());
    }
}
