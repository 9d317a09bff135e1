//! Package graph construction and topological ordering using petgraph.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use globset::GlobBuilder;
use petgraph::algo::toposort;
use petgraph::graph::DiGraph;
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::manifest::{self, MANIFEST_FILE};
use crate::package::Package;

/// Expands a single glob pattern to concrete filesystem paths.
///
/// The pattern's longest literal prefix is used as the walk root, so a
/// pattern like `/repo/packages/*/package.json` only walks `/repo/packages`.
/// A single `*` stays within one path segment; crossing directories takes
/// an explicit `**`.
pub fn expand_glob(pattern: &str) -> Result<Vec<PathBuf>> {
    let matcher = GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map_err(|e| Error::Pattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?
        .compile_matcher();

    let base = glob_base(pattern);
    if !base.exists() {
        return Ok(Vec::new());
    }

    let mut matches: Vec<PathBuf> = Vec::new();
    for entry in WalkDir::new(&base).into_iter().filter_map(|e| e.ok()) {
        if matcher.is_match(entry.path()) {
            matches.push(entry.path().to_path_buf());
        }
    }
    Ok(matches)
}

fn glob_base(pattern: &str) -> PathBuf {
    let mut base = PathBuf::new();
    for component in Path::new(pattern).components() {
        let text = component.as_os_str().to_string_lossy();
        if text.contains(['*', '?', '[', '{']) {
            break;
        }
        base.push(component);
    }
    base
}

fn is_under_node_modules(path: &Path) -> bool {
    path.components()
        .any(|c| c.as_os_str() == "node_modules")
}

/// Resolves a set of manifest-glob patterns into package records and
/// cross-links each declared dependency to the workspace.
///
/// Paths under a `node_modules` directory are excluded so nested or
/// vendored copies are never ingested. Results are in discovery order
/// (pattern order, then filesystem match order); callers that need the
/// canonical order run [`order_by_depth`] afterwards.
///
/// # Errors
///
/// A single malformed manifest fails the entire load; no partial package
/// sets are returned.
pub fn load_packages(patterns: &[String]) -> Result<Vec<Package>> {
    let mut packages: Vec<Package> = Vec::new();
    for pattern in patterns {
        for path in expand_glob(pattern)? {
            if is_under_node_modules(&path) || !path.is_file() {
                continue;
            }
            if path.file_name().map(|n| n == MANIFEST_FILE) != Some(true) {
                continue;
            }
            packages.push(manifest::load_package(&path)?);
        }
    }
    link_local_deps(&mut packages);
    Ok(packages)
}

/// Marks every dependency that resolves to a package inside the set.
///
/// This is the only place `is_local` is set, and it runs only after the
/// full set is materialized; a dependency can point at a package that was
/// discovered later in scan order.
pub fn link_local_deps(packages: &mut [Package]) {
    let names: Vec<String> = packages.iter().map(|p| p.name.clone()).collect();
    for pkg in packages.iter_mut() {
        for dep in &mut pkg.dependencies {
            dep.is_local = names.iter().any(|name| name == &dep.name);
        }
    }
}

/// Arranges packages into depth-first dependency order: every package
/// appears after all of its local dependencies.
///
/// Tie-break between unconstrained packages follows petgraph's toposort,
/// which is deterministic for a given insertion order. Names in the
/// sorted output with no matching package are dropped silently.
///
/// # Errors
///
/// Returns [`Error::DependencyCycle`] when the declared dependencies
/// contain a true cycle.
pub fn order_by_depth(packages: Vec<Package>) -> Result<Vec<Package>> {
    let mut graph = DiGraph::<String, ()>::new();
    let mut node_map = HashMap::new();

    for pkg in &packages {
        let node = graph.add_node(pkg.name.clone());
        node_map.insert(pkg.name.clone(), node);
    }

    // Edges run dependent -> dependency; the sort is reversed below so
    // leaves come first and aggregator packages last.
    for pkg in &packages {
        for dep in &pkg.dependencies {
            if !dep.is_local {
                continue;
            }
            if let (Some(&from), Some(&to)) = (node_map.get(&pkg.name), node_map.get(&dep.name)) {
                graph.add_edge(from, to, ());
            }
        }
    }

    let sorted = toposort(&graph, None).map_err(|cycle| {
        Error::DependencyCycle(format!(
            "Cycle detected involving: {}",
            graph[cycle.node_id()]
        ))
    })?;

    let mut by_name: HashMap<String, Package> = packages
        .into_iter()
        .map(|pkg| (pkg.name.clone(), pkg))
        .collect();

    Ok(sorted
        .into_iter()
        .rev()
        .filter_map(|idx| by_name.remove(&graph[idx]))
        .collect())
}

/// Returns every package that declares a direct dependency on `pkg`.
///
/// Transitive propagation is obtained by re-invoking this at each level
/// of the bump cascade rather than by an up-front closure. Returns an
/// empty vector when no dependents exist.
pub fn depends_on<'a>(pkg: &Package, all: &'a [Package]) -> Vec<&'a Package> {
    all.iter()
        .filter(|other| other.get_dependency(&pkg.name).is_some())
        .collect()
}
