//! Workspace membership filtering.
//!
//! Pure functions applied uniformly across every command.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::package::{Dependency, Package};

/// Exclusion rules from the workspace descriptor. Ignore paths are
/// expanded to concrete absolute directories before they land here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IgnoreRules {
    pub names: Vec<String>,
    pub paths: Vec<PathBuf>,
}

/// True if the package is excluded by name, or its directory sits under
/// any of the ignore paths.
pub fn is_ignored(pkg: &Package, rules: &IgnoreRules) -> bool {
    if rules.names.iter().any(|name| name == &pkg.name) {
        return true;
    }
    rules.paths.iter().any(|path| pkg.dir.starts_with(path))
}

/// Whether a package passes the `--include-ignored` filter.
///
/// An absent package (a dependency that did not resolve locally) is
/// always included; absence of information is not grounds for exclusion.
pub fn include_ignored(pkg: Option<&Package>, include_ignored: bool) -> bool {
    match pkg {
        None => true,
        Some(pkg) => include_ignored || !pkg.is_ignored,
    }
}

/// The subset of dependencies satisfied within the workspace.
pub fn local_deps(pkg: &Package) -> Vec<&Dependency> {
    pkg.dependencies.iter().filter(|dep| dep.is_local).collect()
}
