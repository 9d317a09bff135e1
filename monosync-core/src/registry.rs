//! Registry metadata lookup via the npm CLI.
//!
//! The core performs no network protocol work of its own; registry
//! queries shell out to `npm` and capture its output.

use std::process::Command;

use rayon::prelude::*;
use semver::Version;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Error, Result};
use crate::package::Package;

/// Latest published version for a package as reported by the registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryInfo {
    pub name: String,
    /// On-disk version at the time of the lookup.
    pub version: String,
    /// Latest published version.
    pub latest: String,
}

fn query_version(name: &str) -> Result<String> {
    let output = Command::new("npm")
        .arg("show")
        .arg(name)
        .arg("version")
        .output()
        .map_err(|e| Error::Registry {
            package: name.to_string(),
            message: e.to_string(),
        })?;

    if !output.status.success() {
        return Err(Error::Registry {
            package: name.to_string(),
            message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if version.is_empty() {
        return Err(Error::Registry {
            package: name.to_string(),
            message: "registry returned no version".to_string(),
        });
    }
    Ok(version)
}

/// Queries the registry for every given package concurrently.
///
/// Completion order is irrelevant; results are recombined keyed by
/// package name. A failed lookup is logged as a warning for that package
/// only and does not abort the batch.
pub fn fetch_info(packages: &[&Package]) -> Vec<RegistryInfo> {
    packages
        .par_iter()
        .filter_map(|pkg| match query_version(&pkg.name) {
            Ok(latest) => Some(RegistryInfo {
                name: pkg.name.clone(),
                version: pkg.version.clone(),
                latest,
            }),
            Err(err) => {
                warn!("{}", err);
                None
            }
        })
        .collect()
}

/// True when `published` is a strictly newer semver than `local`.
/// Unparseable versions never count as newer.
pub fn is_newer(published: &str, local: &str) -> bool {
    match (Version::parse(published), Version::parse(local)) {
        (Ok(published), Ok(local)) => published > local,
        _ => false,
    }
}

/// True when the local version is strictly ahead of the published one,
/// making the package a publish candidate. Packages with no registry
/// info (never looked up, or never published) are not candidates.
pub fn needs_publish(pkg: &Package) -> bool {
    match &pkg.registry {
        Some(info) => match (Version::parse(&pkg.version), Version::parse(&info.latest)) {
            (Ok(local), Ok(published)) => local > published,
            _ => false,
        },
        None => false,
    }
}
