//! Shared helpers for CLI tests.

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tldeps::test_utils::TexmfFixture;

/// `tldeps` with progress bars off and config lookup pointed inside the fixture.
///
/// No config file exists at that location unless a test writes one, so the
/// user's own `~/.tldeps/config.toml` never leaks into a test.
pub fn tldeps(fixture: &TexmfFixture) -> Command {
    let mut cmd = Command::cargo_bin("tldeps").unwrap();
    cmd.env("TLDEPS_CONFIG_PATH", config_path(fixture))
        .env("TLDEPS_NO_PROGRESS", "1")
        .env_remove("TEXMFDIST")
        .env_remove("RUST_LOG")
        .current_dir(fixture.root());
    cmd
}

/// Location `tldeps` reads its configuration from in tests.
pub fn config_path(fixture: &TexmfFixture) -> PathBuf {
    fixture.root().join("config.toml")
}

/// Run `tldeps resolve` on the fixture and return the report path.
pub fn resolve(fixture: &TexmfFixture, extra: &[&str]) -> PathBuf {
    let tlpdb = fixture.write_tlpdb().unwrap();
    let output = fixture.root().join("out").join("deps.json");
    tldeps(fixture)
        .arg("resolve")
        .arg("--tlpdb")
        .arg(&tlpdb)
        .arg("--texmf-dist")
        .arg(fixture.texmf_dist())
        .arg("--output")
        .arg(&output)
        .args(extra)
        .assert()
        .success();
    output
}

/// Parse a report into `(name, depend)` pairs.
pub fn read_report(path: &Path) -> Vec<(String, Vec<String>)> {
    let content = std::fs::read_to_string(path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| {
            let name = entry["name"].as_str().unwrap().to_string();
            let depend = entry["depend"]
                .as_array()
                .unwrap()
                .iter()
                .map(|d| d.as_str().unwrap().to_string())
                .collect();
            (name, depend)
        })
        .collect()
}

/// Owned `(name, depend)` pairs from string literals.
pub fn expected(entries: &[(&str, &[&str])]) -> Vec<(String, Vec<String>)> {
    entries
        .iter()
        .map(|(name, deps)| ((*name).to_string(), deps.iter().map(|d| (*d).to_string()).collect()))
        .collect()
}
