//! Temporary TeX Live trees for tests.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[derive(Debug, Clone, Default)]
struct FixturePackage {
    name: String,
    category: String,
    revision: i64,
    depends: Vec<String>,
    runfiles: Vec<String>,
}

/// A temporary distribution: a `texmf-dist` tree plus a matching database.
///
/// Files added through [`add_file`](Self::add_file) are written below
/// `texmf-dist/` and recorded as `RELOC/` runfiles of their package. Packages
/// appear in the database in the order they are first mentioned.
///
/// ```rust,no_run
/// use tldeps::test_utils::TexmfFixture;
///
/// # fn example() -> anyhow::Result<()> {
/// let mut fixture = TexmfFixture::new()?;
/// fixture.add_file("alpha", "tex/latex/alpha/foo.sty", "\\ProvidesPackage{foo}\n")?;
/// fixture.add_file("beta", "tex/latex/beta/bar.sty", "\\usepackage{foo}\n")?;
/// let tlpdb = fixture.write_tlpdb()?;
/// # Ok(())
/// # }
/// ```
pub struct TexmfFixture {
    temp_dir: TempDir,
    packages: Vec<FixturePackage>,
}

impl TexmfFixture {
    /// Create an empty distribution in a fresh temporary directory.
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new().context("Failed to create temp directory")?;
        fs::create_dir_all(temp_dir.path().join("texmf-dist"))?;
        Ok(Self {
            temp_dir,
            packages: Vec::new(),
        })
    }

    /// A small distribution exercising every resolution path.
    ///
    /// | Package | Ships | References |
    /// |---------|-------|------------|
    /// | `alpha` | `foo.sty`, a font | nothing |
    /// | `beta` | `bar.sty` | `foo.sty` |
    /// | `gamma` | `gamma.sty`, `gamma.lua`, `gamma-util.lua` | `bar.sty`, `foo.sty`, `gamma-util.lua`, `missing.sty` |
    /// | `alpha-dev` | another `foo.sty` | `foo.sty` |
    ///
    /// Resolved: `alpha → []`, `beta → [alpha]`, `gamma → [alpha, beta, gamma]`,
    /// `alpha-dev → [alpha]`.
    pub fn sample() -> Result<Self> {
        let mut fixture = Self::new()?;
        fixture.add_file("alpha", "tex/latex/alpha/foo.sty", "\\ProvidesPackage{foo}\n\\endinput\n")?;
        fixture.add_runfile("alpha", "RELOC/fonts/tfm/public/alpha/foo10.tfm");
        fixture.add_file(
            "beta",
            "tex/latex/beta/bar.sty",
            "\\ProvidesPackage{bar}\n% \\usepackage{commented}\n\\usepackage[draft]{foo}\n",
        )?;
        fixture.add_depend("beta", "alpha");
        fixture.add_file(
            "gamma",
            "tex/latex/gamma/gamma.sty",
            "\\ProvidesPackage{gamma}\n\\RequirePackage{\n  bar, % bar first\n  foo\n}\n\\RequirePackage{missing}\n\\directlua{require(\"gamma\")}\n",
        )?;
        fixture.add_file(
            "gamma",
            "tex/lualatex/gamma/gamma.lua",
            "--[[\nloadmodule(\"old.lua\")\n]]\nlocal util = require(\"gamma-util\")\n",
        )?;
        fixture.add_file("gamma", "tex/lualatex/gamma/gamma-util.lua", "return {}\n")?;
        fixture.add_depend("gamma", "beta");
        fixture.add_file(
            "alpha-dev",
            "tex/latex-dev/alpha/foo.sty",
            "\\ProvidesPackage{foo}\n\\RequirePackage{foo}\n",
        )?;
        Ok(fixture)
    }

    /// Root of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// The `texmf-dist` directory.
    pub fn texmf_dist(&self) -> PathBuf {
        self.root().join("texmf-dist")
    }

    /// Where [`write_tlpdb`](Self::write_tlpdb) puts the database.
    pub fn tlpdb_path(&self) -> PathBuf {
        self.root().join("tlpkg").join("texlive.tlpdb")
    }

    fn package_mut(&mut self, name: &str) -> &mut FixturePackage {
        let index = match self.packages.iter().position(|p| p.name == name) {
            Some(index) => index,
            None => {
                self.packages.push(FixturePackage {
                    name: name.to_string(),
                    category: "Package".to_string(),
                    revision: 1,
                    ..FixturePackage::default()
                });
                self.packages.len() - 1
            }
        };
        &mut self.packages[index]
    }

    /// Write a file below `texmf-dist/` and list it as a runfile of `package`.
    pub fn add_file(&mut self, package: &str, path: &str, content: impl AsRef<[u8]>) -> Result<PathBuf> {
        let full = self.create_file(Path::new("texmf-dist").join(path), content)?;
        self.add_runfile(package, &format!("RELOC/{path}"));
        Ok(full)
    }

    /// List a runfile without creating it.
    pub fn add_runfile(&mut self, package: &str, runfile: &str) {
        self.package_mut(package).runfiles.push(runfile.to_string());
    }

    /// Add a declared `depend` entry.
    pub fn add_depend(&mut self, package: &str, dependency: &str) {
        self.package_mut(package).depends.push(dependency.to_string());
    }

    /// Create an arbitrary file relative to the fixture root.
    pub fn create_file(&self, path: impl AsRef<Path>, content: impl AsRef<[u8]>) -> Result<PathBuf> {
        let full = self.root().join(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&full, content).with_context(|| format!("Failed to write {}", full.display()))?;
        Ok(full)
    }

    /// Database text for the packages added so far, preceded by a metadata
    /// record the parser must skip.
    pub fn tlpdb_text(&self) -> String {
        let mut text = String::from("name 00texlive.config\ncategory TLCore\nrevision 0\n\n");
        for package in &self.packages {
            text.push_str(&format!(
                "name {}\ncategory {}\nrevision {}\n",
                package.name, package.category, package.revision
            ));
            for dependency in &package.depends {
                text.push_str(&format!("depend {dependency}\n"));
            }
            if !package.runfiles.is_empty() {
                text.push_str(&format!("runfiles size={}\n", package.runfiles.len()));
                for runfile in &package.runfiles {
                    text.push_str(&format!(" {runfile}\n"));
                }
            }
            text.push('\n');
        }
        text
    }

    /// Write the database to [`tlpdb_path`](Self::tlpdb_path).
    pub fn write_tlpdb(&self) -> Result<PathBuf> {
        let path = self.tlpdb_path();
        self.create_file(&path, self.tlpdb_text())?;
        Ok(path)
    }
}
