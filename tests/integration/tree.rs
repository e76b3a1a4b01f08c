//! Integration tests for `tldeps tree`.

use predicates::prelude::*;
use tldeps::test_utils::TexmfFixture;

use crate::common::{resolve, tldeps};

#[test]
fn test_tree_dependencies() {
    let fixture = TexmfFixture::sample().unwrap();
    let report = resolve(&fixture, &[]);

    tldeps(&fixture)
        .arg("tree")
        .arg("gamma")
        .arg("--report")
        .arg(&report)
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "gamma\n├── alpha\n├── beta\n│   └── alpha\n└── gamma (*)\n",
        ))
        .stdout(predicate::str::contains("(*) = already shown above"));
}

#[test]
fn test_tree_reverse() {
    let fixture = TexmfFixture::sample().unwrap();
    let report = resolve(&fixture, &[]);

    tldeps(&fixture)
        .arg("tree")
        .arg("alpha")
        .arg("--reverse")
        .arg("--report")
        .arg(&report)
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "alpha\n├── alpha-dev\n├── beta\n│   └── gamma\n│       └── gamma (*)\n└── gamma (*)\n",
        ));
}

#[test]
fn test_tree_depth_limit() {
    let fixture = TexmfFixture::sample().unwrap();
    let report = resolve(&fixture, &["--exclude-self"]);

    tldeps(&fixture)
        .args(["tree", "gamma", "--depth", "1", "--report"])
        .arg(&report)
        .assert()
        .success()
        .stdout("gamma\n├── alpha\n└── beta\n");
}

#[test]
fn test_tree_json() {
    let fixture = TexmfFixture::sample().unwrap();
    let report = resolve(&fixture, &[]);

    let output = tldeps(&fixture)
        .args(["tree", "beta", "--format", "json", "--report"])
        .arg(&report)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["name"], "beta");
    assert_eq!(value["children"][0]["name"], "alpha");
    assert!(value["children"][0].get("children").is_none());
}

#[test]
fn test_tree_report_from_config_output() {
    let fixture = TexmfFixture::sample().unwrap();
    let report = resolve(&fixture, &[]);
    std::fs::write(
        crate::common::config_path(&fixture),
        format!("output = {:?}\n", report.display().to_string()),
    )
    .unwrap();

    tldeps(&fixture)
        .args(["tree", "beta"])
        .assert()
        .success()
        .stdout("beta\n└── alpha\n");
}

#[test]
fn test_tree_unknown_package() {
    let fixture = TexmfFixture::sample().unwrap();
    let report = resolve(&fixture, &[]);

    tldeps(&fixture)
        .args(["tree", "zeta", "--report"])
        .arg(&report)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Package 'zeta' not found in dependency report"));
}

#[test]
fn test_tree_missing_report() {
    let fixture = TexmfFixture::sample().unwrap();

    tldeps(&fixture)
        .args(["tree", "alpha", "--report"])
        .arg(fixture.root().join("absent.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid dependency report"));
}

#[test]
fn test_tree_invalid_format() {
    let fixture = TexmfFixture::sample().unwrap();

    tldeps(&fixture)
        .args(["tree", "alpha", "--format", "dot"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid format 'dot'"));
}
