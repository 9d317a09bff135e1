//! Package data models.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::manifest::Manifest;
use crate::registry::RegistryInfo;

/// Lock-file mechanism a package uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    Yarn,
    Npm,
}

impl Engine {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Engine::Yarn => "yarn",
            Engine::Npm => "npm",
        }
    }
}

/// Magnitude of a semantic-version increment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseType {
    Major,
    Minor,
    Patch,
}

impl ReleaseType {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            ReleaseType::Major => "major",
            ReleaseType::Minor => "minor",
            ReleaseType::Patch => "patch",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "major" => Some(ReleaseType::Major),
            "minor" => Some(ReleaseType::Minor),
            "patch" => Some(ReleaseType::Patch),
            _ => None,
        }
    }
}

/// A declared dependency edge from a package to a named requirement.
#[derive(Debug, Clone, Serialize)]
pub struct Dependency {
    pub name: String,
    /// Raw range string as declared, e.g. `^1.2.0`.
    pub version_range: String,
    pub is_dev: bool,
    /// True when a package with this name exists in the workspace.
    /// Purely derived; set only by the graph linking pass.
    pub is_local: bool,
}

impl Dependency {
    pub fn new(name: impl Into<String>, version_range: impl Into<String>, is_dev: bool) -> Self {
        Self {
            name: name.into(),
            version_range: version_range.into(),
            is_dev,
            is_local: false,
        }
    }
}

/// One workspace member.
#[derive(Debug, Clone, Serialize)]
pub struct Package {
    pub name: String,
    /// Version currently on disk.
    pub version: String,
    /// Effective version: the registry's published version when that is
    /// newer than the on-disk one, otherwise equal to `version`. Bump
    /// calculations use this as the base.
    pub latest: String,
    pub dir: PathBuf,
    pub engine: Engine,
    pub is_typescript: bool,
    pub is_ignored: bool,
    pub has_scripts: bool,
    pub has_prepublish: bool,
    /// `.gitignore` lines, pass-through data for peripheral commands.
    #[serde(skip)]
    pub gitignore: Vec<String>,
    /// Sorted by name, de-duplicated by name.
    pub dependencies: Vec<Dependency>,
    /// In-memory mirror of the on-disk `package.json`; the unit that is
    /// mutated by bump/sync and written back to disk.
    #[serde(skip)]
    pub manifest: Manifest,
    pub registry: Option<RegistryInfo>,
}

impl Package {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        dir: impl Into<PathBuf>,
        dependencies: Vec<Dependency>,
    ) -> Self {
        let name = name.into();
        let version = version.into();
        Self {
            name,
            latest: version.clone(),
            version,
            dir: dir.into(),
            engine: Engine::Npm,
            is_typescript: false,
            is_ignored: false,
            has_scripts: false,
            has_prepublish: false,
            gitignore: Vec::new(),
            dependencies,
            manifest: Manifest::default(),
            registry: None,
        }
    }

    #[inline]
    pub fn is_private(&self) -> bool {
        self.manifest.is_private()
    }

    /// Finds this package's dependency entry for `name`, if declared.
    #[inline]
    pub fn get_dependency(&self, name: &str) -> Option<&Dependency> {
        self.dependencies.iter().find(|dep| dep.name == name)
    }
}
