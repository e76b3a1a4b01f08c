//! Library-level runs of the full resolution pipeline.

use anyhow::Result;
use std::sync::Arc;
use tldeps::core::{Diagnostic, Diagnostics};
use tldeps::report::DependencyReport;
use tldeps::resolver::{DependencyGraph, DependencyResolver, FileOwnershipIndex, SelfDependencyPolicy};
use tldeps::scanner::{ScanOptions, SourceScanner};
use tldeps::test_utils::{TexmfFixture, init_test_logging};
use tldeps::tlpdb::{PackageRecord, load_tlpdb};

async fn run(fixture: &TexmfFixture, policy: SelfDependencyPolicy) -> Result<(Vec<PackageRecord>, Diagnostics)> {
    let mut diagnostics = Diagnostics::new();
    let mut packages = load_tlpdb(&fixture.write_tlpdb()?, &mut diagnostics).await?;
    let index = FileOwnershipIndex::build(&packages, &mut diagnostics);
    let resolver = DependencyResolver::new(
        fixture.texmf_dist(),
        Arc::new(index),
        SourceScanner::new(ScanOptions::default())?,
        policy,
    );
    resolver.resolve_all_parallel(&mut packages, &mut diagnostics, 4, None).await?;
    Ok((packages, diagnostics))
}

fn dependencies(packages: &[PackageRecord], name: &str) -> Vec<String> {
    packages.iter().find(|p| p.name == name).unwrap().dependencies.clone()
}

#[tokio::test]
async fn test_sample_distribution() -> Result<()> {
    init_test_logging(None);
    let fixture = TexmfFixture::sample()?;
    let (packages, diagnostics) = run(&fixture, SelfDependencyPolicy::Include).await?;

    let names: Vec<_> = packages.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["alpha", "beta", "gamma", "alpha-dev"]);

    assert!(dependencies(&packages, "alpha").is_empty());
    assert_eq!(dependencies(&packages, "beta"), vec!["alpha"]);
    assert_eq!(dependencies(&packages, "gamma"), vec!["alpha", "beta", "gamma"]);
    assert_eq!(dependencies(&packages, "alpha-dev"), vec!["alpha"]);

    assert_eq!(packages[1].declared_dependencies, vec!["alpha"]);

    assert_eq!(diagnostics.len(), 2);
    assert_eq!(
        diagnostics.count(|d| matches!(d, Diagnostic::SkippedDevPackage { package } if package == "alpha-dev")),
        1
    );
    assert_eq!(
        diagnostics.count(|d| matches!(
            d,
            Diagnostic::DependencyNotFound { file, package } if file == "missing.sty" && package == "gamma"
        )),
        1
    );
    Ok(())
}

#[tokio::test]
async fn test_exclude_self_dependencies() -> Result<()> {
    let fixture = TexmfFixture::sample()?;
    let (packages, _) = run(&fixture, SelfDependencyPolicy::Exclude).await?;
    assert_eq!(dependencies(&packages, "gamma"), vec!["alpha", "beta"]);
    Ok(())
}

#[tokio::test]
async fn test_duplicate_ownership_first_claim_wins() -> Result<()> {
    let mut fixture = TexmfFixture::new()?;
    fixture.add_file("first", "tex/latex/first/shared.sty", "\\ProvidesPackage{shared}\n")?;
    fixture.add_file("second", "tex/latex/second/shared.sty", "\\ProvidesPackage{shared}\n")?;
    fixture.add_file("user", "tex/latex/user/user.sty", "\\RequirePackage{shared}\n")?;

    let (packages, diagnostics) = run(&fixture, SelfDependencyPolicy::Include).await?;

    assert_eq!(dependencies(&packages, "user"), vec!["first"]);
    assert_eq!(diagnostics.count(|d| matches!(d, Diagnostic::DuplicateFile { .. })), 1);
    Ok(())
}

#[tokio::test]
async fn test_missing_and_unknown_files_are_reported() -> Result<()> {
    let mut fixture = TexmfFixture::new()?;
    fixture.add_file("pkg", "tex/latex/pkg/pkg.sty", "\\RequirePackage{pkg-extra}\n")?;
    fixture.add_file("pkg", "tex/latex/pkg/README.md", "# pkg\n")?;
    fixture.add_runfile("pkg", "RELOC/tex/latex/pkg/pkg-extra.sty");

    let (packages, diagnostics) = run(&fixture, SelfDependencyPolicy::Include).await?;

    assert_eq!(dependencies(&packages, "pkg"), vec!["pkg"]);
    assert_eq!(diagnostics.count(|d| matches!(d, Diagnostic::FileNotFound { .. })), 1);
    assert_eq!(diagnostics.count(|d| matches!(d, Diagnostic::UnknownFileType { .. })), 1);
    Ok(())
}

#[tokio::test]
async fn test_latin1_source_is_scanned() -> Result<()> {
    let mut fixture = TexmfFixture::new()?;
    fixture.add_file("base", "tex/latex/base/base.sty", "\\ProvidesPackage{base}\n")?;
    fixture.add_file(
        "legacy",
        "tex/latex/legacy/legacy.sty",
        b"% Fran\xe7ais\n\\RequirePackage{base}\n".as_slice(),
    )?;

    let (packages, diagnostics) = run(&fixture, SelfDependencyPolicy::Include).await?;

    assert_eq!(dependencies(&packages, "legacy"), vec!["base"]);
    assert_eq!(diagnostics.count(|d| matches!(d, Diagnostic::DecodingFallback { .. })), 1);
    Ok(())
}

#[tokio::test]
async fn test_report_is_idempotent_and_queryable() -> Result<()> {
    let fixture = TexmfFixture::sample()?;
    let path = fixture.root().join("deps.json");

    let (packages, _) = run(&fixture, SelfDependencyPolicy::Include).await?;
    DependencyReport::from_packages(&packages).save(&path)?;
    let first = std::fs::read(&path)?;

    let (packages, _) = run(&fixture, SelfDependencyPolicy::Include).await?;
    DependencyReport::from_packages(&packages).save(&path)?;
    assert_eq!(std::fs::read(&path)?, first);

    let report = DependencyReport::load(&path)?;
    let graph = DependencyGraph::from_report(&report);
    assert_eq!(graph.dependents("alpha"), vec!["alpha-dev", "beta", "gamma"]);
    assert_eq!(graph.transitive_dependencies("beta"), vec!["alpha"]);
    assert_eq!(report.get("gamma").map(|p| p.tl_depend.clone()), Some(vec!["beta".to_string()]));
    Ok(())
}
