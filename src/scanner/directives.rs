//! Recognizers for inclusion directives.
//!
//! Every directive shape the scanner understands is one row of [`SHAPES`]: a
//! regular expression capturing the directive's argument(s) and a
//! [`FilenameRule`] turning the captures into the filename that would be loaded.
//! Adding a new directive is a matter of adding a row.
//!
//! | Kind | Example | Emitted |
//! |------|---------|---------|
//! | [`Class`](DirectiveKind::Class) | `\documentclass[12pt]{article}` | `article.cls` |
//! | [`Package`](DirectiveKind::Package) | `\usepackage{amsmath, amssymb}` | `amsmath.sty`, `amssymb.sty` |
//! | [`FontFamily`](DirectiveKind::FontFamily) | `\usefont{T1}{lmr}{m}{n}` | `t1lmr.fd` |
//! | [`OutlineFont`](DirectiveKind::OutlineFont) | `\setmainfont{Foo-Regular.otf}` | `Foo-Regular.otf` |
//! | [`LuaRequire`](DirectiveKind::LuaRequire) | `require("lualibs-util")` | `lualibs-util.lua` |
//! | [`LuaLoadModule`](DirectiveKind::LuaLoadModule) | `loadmodule("l-table.lua")` | `l-table.lua` |
//!
//! Outline fonts named without an extension (`\setmainfont{TeX Gyre Pagella}`)
//! are resolved by fontconfig at run time and are not reported.

use anyhow::{Context, Result};
use regex::Regex;

/// The directive shapes known to the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectiveKind {
    /// `\documentclass`, `\LoadClass`, `\LoadClassWithOptions`
    Class,
    /// `\usepackage`, `\RequirePackage`, `\RequirePackageWithOptions`
    Package,
    /// `\usefont{encoding}{family}...`
    FontFamily,
    /// `\setmainfont` and friends, `\fontspec`
    OutlineFont,
    /// Lua `require`
    LuaRequire,
    /// `loadmodule` from the lualibs/ConTeXt generic loader
    LuaLoadModule,
}

/// How the captured argument(s) of a directive become filenames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilenameRule {
    /// Comma-separated list; every valid element gets the suffix.
    ListWithSuffix(&'static str),
    /// Two captures (encoding, family) joined, lowercased, suffix appended.
    FontDefinition(&'static str),
    /// Single capture kept as is, but only if it names one of these font files.
    FontFile(&'static [&'static str]),
    /// Single capture with the suffix appended.
    WithSuffix(&'static str),
    /// Single capture kept as is.
    Verbatim,
}

/// One row of the directive table.
#[derive(Debug, Clone, Copy)]
pub struct DirectiveShape {
    /// Which directive this row recognizes
    pub kind: DirectiveKind,
    /// Pattern with one capture group per argument
    pub pattern: &'static str,
    /// Filename synthesis
    pub rule: FilenameRule,
    /// Part of the extended set (outline fonts, `loadmodule`)
    pub extended: bool,
}

/// The directive table.
pub const SHAPES: &[DirectiveShape] = &[
    DirectiveShape {
        kind: DirectiveKind::Class,
        pattern: r"\\(?:LoadClassWithOptions|LoadClass|documentclass)\s*(?:\[.*\]\s*)?\{\s*(.+?)\s*\}",
        rule: FilenameRule::ListWithSuffix(".cls"),
        extended: false,
    },
    DirectiveShape {
        kind: DirectiveKind::Package,
        pattern: r"\\(?:RequirePackageWithOptions|RequirePackage|usepackage)\s*(?:\[.*\]\s*)?\{\s*(.+?)\s*\}",
        rule: FilenameRule::ListWithSuffix(".sty"),
        extended: false,
    },
    DirectiveShape {
        kind: DirectiveKind::FontFamily,
        pattern: r"\\usefont\s*\{\s*(.+?)\s*\}\s*\{\s*(.+?)\s*\}",
        rule: FilenameRule::FontDefinition(".fd"),
        extended: false,
    },
    DirectiveShape {
        kind: DirectiveKind::OutlineFont,
        pattern: r"\\(?:setmainfont|setsansfont|setmonofont|setmathfont|fontspec)\s*(?:\[.*\]\s*)?\{\s*(.+?)\s*\}",
        rule: FilenameRule::FontFile(&[".otf", ".ttf"]),
        extended: true,
    },
    DirectiveShape {
        kind: DirectiveKind::LuaRequire,
        pattern: r#"\brequire\s*\(?\s*["'](.+?)["']"#,
        rule: FilenameRule::WithSuffix(".lua"),
        extended: false,
    },
    DirectiveShape {
        kind: DirectiveKind::LuaLoadModule,
        pattern: r#"loadmodule\s*\(*\s*["'](.+\.lua)["']"#,
        rule: FilenameRule::Verbatim,
        extended: true,
    },
];

/// Keywords that start a TeX directive possibly continued on later lines.
const MULTI_LINE_TRIGGERS: &[(DirectiveKind, &str)] = &[
    (DirectiveKind::Package, r"\\(?:RequirePackage|usepackage)"),
    (
        DirectiveKind::OutlineFont,
        r"\\(?:setmainfont|setsansfont|setmonofont|setmathfont|fontspec)",
    ),
];

/// TeX recognizers tried on a single line, in priority order.
pub const TEX_SINGLE_LINE: &[DirectiveKind] = &[
    DirectiveKind::Class,
    DirectiveKind::Package,
    DirectiveKind::FontFamily,
    DirectiveKind::OutlineFont,
];

/// TeX recognizers re-run on a completed multi-line directive.
pub const TEX_MULTI_LINE: &[DirectiveKind] = &[DirectiveKind::Package, DirectiveKind::OutlineFont];

/// Lua recognizers, in priority order.
pub const LUA: &[DirectiveKind] = &[DirectiveKind::LuaRequire, DirectiveKind::LuaLoadModule];

/// Whether a directive argument can name a file.
///
/// Rejects empty strings, anything containing a control sequence (`\`) or macro
/// parameter (`#`), and names starting with `.`, which are relative paths or
/// hidden files rather than names kpathsea would search for.
#[must_use]
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && !name.contains('\\') && !name.contains('#') && !name.starts_with('.')
}

/// A compiled directive recognizer.
#[derive(Debug, Clone)]
pub struct Directive {
    kind: DirectiveKind,
    regex: Regex,
    rule: FilenameRule,
}

impl Directive {
    /// Compile one table row.
    pub fn compile(shape: &DirectiveShape) -> Result<Self> {
        let regex = Regex::new(shape.pattern)
            .with_context(|| format!("Invalid pattern for {:?} directive", shape.kind))?;
        Ok(Self {
            kind: shape.kind,
            regex,
            rule: shape.rule,
        })
    }

    /// The directive shape this recognizer matches.
    #[must_use]
    pub fn kind(&self) -> DirectiveKind {
        self.kind
    }

    /// Extract filenames from every occurrence of the directive in `text`.
    ///
    /// Returns `None` when the pattern does not occur at all. A match whose
    /// arguments are all rejected yields `Some` of an empty list, so callers can
    /// tell "not this directive" from "this directive, nothing usable".
    #[must_use]
    pub fn extract(&self, text: &str) -> Option<Vec<String>> {
        let mut matched = false;
        let mut files = Vec::new();

        for caps in self.regex.captures_iter(text) {
            matched = true;
            let first = caps.get(1).map_or("", |m| m.as_str());

            match self.rule {
                FilenameRule::ListWithSuffix(suffix) => {
                    for name in first.split(',').map(str::trim) {
                        if is_valid_name(name) {
                            files.push(format!("{name}{suffix}"));
                        }
                    }
                }
                FilenameRule::FontDefinition(suffix) => {
                    let family = caps.get(2).map_or("", |m| m.as_str());
                    if is_valid_name(first) && is_valid_name(family) {
                        files.push(format!("{first}{family}{suffix}").to_lowercase());
                    }
                }
                FilenameRule::FontFile(extensions) => {
                    if is_valid_name(first) && extensions.iter().any(|ext| first.contains(ext)) {
                        files.push(first.to_string());
                    }
                }
                FilenameRule::WithSuffix(suffix) => {
                    if is_valid_name(first) {
                        files.push(format!("{first}{suffix}"));
                    }
                }
                FilenameRule::Verbatim => {
                    if is_valid_name(first) {
                        files.push(first.to_string());
                    }
                }
            }
        }

        matched.then_some(files)
    }
}

/// The compiled recognizers of one scanner configuration.
#[derive(Debug, Clone)]
pub struct DirectiveSet {
    directives: Vec<Directive>,
    triggers: Vec<(DirectiveKind, Regex)>,
}

impl DirectiveSet {
    /// Compile the directive table.
    ///
    /// With `extended` off, the outline-font and `loadmodule` recognizers are left
    /// out, reproducing the narrower scanner that only knew classes, packages,
    /// `\usefont` and `require`.
    pub fn new(extended: bool) -> Result<Self> {
        let directives = SHAPES
            .iter()
            .filter(|shape| extended || !shape.extended)
            .map(Directive::compile)
            .collect::<Result<Vec<_>>>()?;

        let triggers = MULTI_LINE_TRIGGERS
            .iter()
            .filter(|(kind, _)| directives.iter().any(|d| d.kind == *kind))
            .map(|(kind, pattern)| {
                Regex::new(pattern)
                    .map(|re| (*kind, re))
                    .with_context(|| format!("Invalid trigger pattern for {kind:?} directive"))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            directives,
            triggers,
        })
    }

    /// Look up a compiled recognizer.
    #[must_use]
    pub fn get(&self, kind: DirectiveKind) -> Option<&Directive> {
        self.directives.iter().find(|d| d.kind == kind)
    }

    /// Apply recognizers in order; the first whose pattern occurs decides.
    #[must_use]
    pub fn first_match(&self, kinds: &[DirectiveKind], text: &str) -> Option<Vec<String>> {
        kinds.iter().filter_map(|kind| self.get(*kind)).find_map(|d| d.extract(text))
    }

    /// Whether `text` contains the keyword of a directive that may continue on
    /// the following lines.
    #[must_use]
    pub fn starts_multi_line(&self, text: &str) -> bool {
        self.triggers.iter().any(|(_, re)| re.is_match(text))
    }
}
