//! Integration tests for `tldeps resolve`.

use predicates::prelude::*;
use tldeps::test_utils::TexmfFixture;

use crate::common::{config_path, expected, read_report, resolve, tldeps};

#[test]
fn test_resolve_sample() {
    let fixture = TexmfFixture::sample().unwrap();
    let tlpdb = fixture.write_tlpdb().unwrap();
    let output = fixture.root().join("out").join("deps.json");

    tldeps(&fixture)
        .arg("resolve")
        .arg("--tlpdb")
        .arg(&tlpdb)
        .arg("--texmf-dist")
        .arg(fixture.texmf_dist())
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Resolved 4 packages (5 dependencies, 2 diagnostics)"))
        .stderr(predicate::str::contains("Dependency not found: missing.sty (referenced by gamma)"))
        .stderr(predicate::str::contains("Skip dev package: alpha-dev"));

    assert_eq!(
        read_report(&output),
        expected(&[
            ("alpha", &[]),
            ("beta", &["alpha"]),
            ("gamma", &["alpha", "beta", "gamma"]),
            ("alpha-dev", &["alpha"]),
        ])
    );
}

#[test]
fn test_resolve_twice_is_byte_identical() {
    let fixture = TexmfFixture::sample().unwrap();
    let output = resolve(&fixture, &["--max-parallel", "1"]);
    let first = std::fs::read(&output).unwrap();

    let output = resolve(&fixture, &["--max-parallel", "8"]);
    assert_eq!(std::fs::read(&output).unwrap(), first);
    assert!(String::from_utf8(first).unwrap().ends_with("]\n"));
}

#[test]
fn test_resolve_exclude_self() {
    let fixture = TexmfFixture::sample().unwrap();
    let output = resolve(&fixture, &["--exclude-self"]);
    let report = read_report(&output);
    assert_eq!(report[2], expected(&[("gamma", &["alpha", "beta"])])[0]);
}

#[test]
fn test_resolve_quiet() {
    let fixture = TexmfFixture::sample().unwrap();
    let tlpdb = fixture.write_tlpdb().unwrap();

    tldeps(&fixture)
        .arg("--quiet")
        .arg("resolve")
        .arg("--tlpdb")
        .arg(&tlpdb)
        .arg("--texmf-dist")
        .arg(fixture.texmf_dist())
        .arg("--output")
        .arg(fixture.root().join("deps.json"))
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Dependency not found").not());
}

#[test]
fn test_resolve_uses_texmfdist_env() {
    let fixture = TexmfFixture::sample().unwrap();
    let tlpdb = fixture.write_tlpdb().unwrap();
    let output = fixture.root().join("deps.json");

    tldeps(&fixture)
        .env("TEXMFDIST", fixture.texmf_dist())
        .arg("resolve")
        .arg("--tlpdb")
        .arg(&tlpdb)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    assert_eq!(read_report(&output)[1], expected(&[("beta", &["alpha"])])[0]);
}

#[test]
fn test_resolve_from_config_file() {
    let fixture = TexmfFixture::sample().unwrap();
    let tlpdb = fixture.write_tlpdb().unwrap();
    let output = fixture.root().join("from-config.json");
    std::fs::write(
        config_path(&fixture),
        format!(
            "tlpdb = {:?}\ntexmf_dist = {:?}\noutput = {:?}\nself_dependencies = \"exclude\"\n",
            tlpdb.display().to_string(),
            fixture.texmf_dist().display().to_string(),
            output.display().to_string(),
        ),
    )
    .unwrap();

    tldeps(&fixture).arg("resolve").assert().success();

    assert_eq!(read_report(&output)[2], expected(&[("gamma", &["alpha", "beta"])])[0]);
}

#[test]
fn test_resolve_explicit_config_flag() {
    let fixture = TexmfFixture::sample().unwrap();
    let output = fixture.root().join("deps.json");
    let custom = fixture.create_file("custom.toml", "self_dependencies = \"exclude\"\n").unwrap();

    tldeps(&fixture)
        .arg("--config")
        .arg(&custom)
        .arg("resolve")
        .arg("--tlpdb")
        .arg(fixture.write_tlpdb().unwrap())
        .arg("--texmf-dist")
        .arg(fixture.texmf_dist())
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    assert_eq!(read_report(&output)[2].1, vec!["alpha", "beta"]);
}

#[test]
fn test_resolve_missing_database() {
    let fixture = TexmfFixture::sample().unwrap();

    tldeps(&fixture)
        .arg("resolve")
        .arg("--tlpdb")
        .arg(fixture.root().join("nope.tlpdb"))
        .arg("--texmf-dist")
        .arg(fixture.texmf_dist())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Package database not found"));
}

#[test]
fn test_resolve_missing_texmf_dist() {
    let fixture = TexmfFixture::sample().unwrap();

    tldeps(&fixture)
        .arg("resolve")
        .arg("--tlpdb")
        .arg(fixture.write_tlpdb().unwrap())
        .arg("--texmf-dist")
        .arg(fixture.root().join("no-such-tree"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("TEXMFDIST directory not found"));
}

#[test]
fn test_resolve_invalid_config() {
    let fixture = TexmfFixture::sample().unwrap();
    std::fs::write(config_path(&fixture), "max_parallel = \"many\"\n").unwrap();

    tldeps(&fixture)
        .arg("resolve")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration file"));
}
