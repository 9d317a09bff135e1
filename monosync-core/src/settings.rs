//! Workspace settings discovery and assembly.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::filter::{self, IgnoreRules};
use crate::graph;
use crate::package::Package;
use crate::registry;

pub const CONFIG_FILE_NAME: &str = "monosync.yaml";
pub const DEFAULT_WATCH_PATTERN: &str = "/lib/**/*.js";

/// The workspace descriptor as written on disk. Every field is optional;
/// missing ones fall back to defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct Descriptor {
    modules: Vec<String>,
    ignore: DescriptorIgnore,
    watch_pattern: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct DescriptorIgnore {
    paths: Vec<String>,
    names: Vec<String>,
}

/// Options for [`load_settings`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadOptions {
    /// Enrich packages with the latest published registry versions.
    pub registry: bool,
}

/// Fully assembled workspace state for one invocation.
#[derive(Debug)]
pub struct Settings {
    /// Location of the discovered descriptor.
    pub path: PathBuf,
    /// All workspace packages, in depth-first dependency order.
    pub packages: Vec<Package>,
    pub ignore: IgnoreRules,
    /// Glob (relative to each package directory) used by watch features.
    pub watch_pattern: String,
}

/// Walks upward from `start` looking for a file with the exact given
/// name, stopping at the filesystem root.
pub fn find_closest_ancestor(start: &Path, name: &str) -> Option<PathBuf> {
    let mut dir = Some(start);
    while let Some(current) = dir {
        let candidate = current.join(name);
        if candidate.is_file() {
            return Some(candidate);
        }
        dir = current.parent();
    }
    None
}

/// Locates and loads the workspace descriptor, builds the package graph,
/// orders it, and flags ignored packages.
///
/// Returns `Ok(None)` when no descriptor exists anywhere above the
/// current directory. A descriptor that exists but fails to parse is a
/// different condition and surfaces as [`Error::DescriptorParse`] with
/// the offending path, so callers can tell the user which file to fix.
pub fn load_settings(options: LoadOptions) -> Result<Option<Settings>> {
    let cwd = env::current_dir()?;
    load_settings_from(&cwd, options)
}

/// Same as [`load_settings`] with an explicit starting directory.
pub fn load_settings_from(start: &Path, options: LoadOptions) -> Result<Option<Settings>> {
    let path = match find_closest_ancestor(start, CONFIG_FILE_NAME) {
        Some(path) => path,
        None => return Ok(None),
    };

    let text = fs::read_to_string(&path)?;
    let descriptor: Descriptor =
        serde_yaml::from_str(&text).map_err(|source| Error::DescriptorParse {
            path: path.clone(),
            source,
        })?;

    // Globs resolve against the descriptor's own directory, not the
    // process cwd.
    let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
    let patterns: Vec<String> = descriptor
        .modules
        .iter()
        .map(|pattern| resolve_pattern(&dir, pattern))
        .collect();

    let packages = graph::load_packages(&patterns)?;
    let mut packages = graph::order_by_depth(packages)?;

    let ignore = IgnoreRules {
        names: descriptor.ignore.names.clone(),
        paths: expand_ignore_paths(&dir, &descriptor.ignore.paths)?,
    };
    for pkg in &mut packages {
        pkg.is_ignored = filter::is_ignored(pkg, &ignore);
    }

    if options.registry {
        apply_registry_info(&mut packages);
    }

    let watch_pattern = descriptor
        .watch_pattern
        .unwrap_or_else(|| DEFAULT_WATCH_PATTERN.to_string());

    Ok(Some(Settings {
        path,
        packages,
        ignore,
        watch_pattern,
    }))
}

fn resolve_pattern(dir: &Path, pattern: &str) -> String {
    if Path::new(pattern).is_absolute() {
        pattern.to_string()
    } else {
        dir.join(pattern).to_string_lossy().into_owned()
    }
}

/// Expands ignore-path glob patterns to the concrete absolute paths they
/// match right now.
fn expand_ignore_paths(dir: &Path, patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for pattern in patterns {
        paths.extend(graph::expand_glob(&resolve_pattern(dir, pattern))?);
    }
    Ok(paths)
}

/// Overwrites `latest` for every package whose published version exceeds
/// the on-disk one; `version` stays the on-disk truth. Ignored and
/// private packages are never queried.
fn apply_registry_info(packages: &mut [Package]) {
    let infos = {
        let candidates: Vec<&Package> = packages
            .iter()
            .filter(|pkg| !pkg.is_ignored && !pkg.is_private())
            .collect();
        registry::fetch_info(&candidates)
    };

    for pkg in packages.iter_mut() {
        if let Some(info) = infos.iter().find(|info| info.name == pkg.name) {
            if registry::is_newer(&info.latest, &pkg.version) {
                pkg.latest = info.latest.clone();
            }
            pkg.registry = Some(info.clone());
        }
    }
}
