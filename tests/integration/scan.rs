//! Integration tests for `tldeps scan`.

use predicates::prelude::*;
use tldeps::test_utils::TexmfFixture;

use crate::common::tldeps;

const DOCUMENT: &str = "\
\\documentclass[12pt]{article}
% \\usepackage{ignored}
\\usepackage{amsmath}
\\usepackage{
  geometry,
  hyperref
}
\\setmainfont{texgyretermes-regular.otf}
";

#[test]
fn test_scan_document() {
    let fixture = TexmfFixture::new().unwrap();
    let file = fixture.create_file("paper.tex", DOCUMENT).unwrap();

    tldeps(&fixture)
        .arg("scan")
        .arg(&file)
        .assert()
        .success()
        .stdout("amsmath.sty\narticle.cls\ngeometry.sty\nhyperref.sty\ntexgyretermes-regular.otf\n");
}

#[test]
fn test_scan_basic_directives() {
    let fixture = TexmfFixture::new().unwrap();
    let file = fixture.create_file("paper.tex", DOCUMENT).unwrap();

    tldeps(&fixture)
        .arg("scan")
        .arg("--basic-directives")
        .arg(&file)
        .assert()
        .success()
        .stdout("amsmath.sty\narticle.cls\ngeometry.sty\nhyperref.sty\n");
}

#[test]
fn test_scan_lua_block_comment() {
    let fixture = TexmfFixture::new().unwrap();
    let file = fixture
        .create_file(
            "module.lua",
            "--[[\nloadmodule(\"config.lua\")\n]]\nlocal fonts = require('luaotfload-main')\n",
        )
        .unwrap();

    tldeps(&fixture)
        .arg("scan")
        .arg(&file)
        .assert()
        .success()
        .stdout("luaotfload-main.lua\n");
}

#[test]
fn test_scan_merges_files_and_reports_missing() {
    let fixture = TexmfFixture::new().unwrap();
    let cls = fixture.create_file("thesis.cls", "\\LoadClassWithOptions{report}\n").unwrap();
    let sty = fixture.create_file("extra.sty", "\\RequirePackage{graphicx}\n").unwrap();

    tldeps(&fixture)
        .arg("scan")
        .arg(&cls)
        .arg(&sty)
        .arg(fixture.root().join("missing.sty"))
        .assert()
        .success()
        .stdout("graphicx.sty\nreport.cls\n")
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn test_scan_requires_a_file() {
    let fixture = TexmfFixture::new().unwrap();
    tldeps(&fixture).arg("scan").assert().failure();
}
