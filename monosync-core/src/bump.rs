//! Version-bump cascade across the dependency graph.

use std::collections::{HashSet, VecDeque};

use semver::Version;
use tracing::debug;

use crate::error::{Error, Result};
use crate::package::{Package, ReleaseType};

/// One version change produced by a cascade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BumpRecord {
    pub release: ReleaseType,
    pub name: String,
    pub previous: String,
    pub new_version: String,
    /// Name of the package whose bump triggered this one; `None` for the
    /// cascade root.
    pub caused_by: Option<String>,
}

/// The outcome of a cascade: change records in processing order, plus the
/// names of packages whose manifests were mutated.
#[derive(Debug, Clone, Default)]
pub struct BumpPlan {
    pub records: Vec<BumpRecord>,
    touched: Vec<String>,
}

impl BumpPlan {
    fn touch(&mut self, name: &str) {
        if !self.touched.iter().any(|n| n == name) {
            self.touched.push(name.to_string());
        }
    }

    /// Names of packages whose manifests changed, each at most once.
    pub fn touched(&self) -> &[String] {
        &self.touched
    }
}

/// Computes the incremented form of a semantic version.
///
/// Major zeroes minor and patch, minor zeroes patch, patch increments
/// patch only.
pub fn increment(version: &str, release: ReleaseType) -> Result<String> {
    let parsed = Version::parse(version).map_err(|_| Error::InvalidVersion {
        version: version.to_string(),
        release: release.as_str().to_string(),
    })?;
    let next = match release {
        ReleaseType::Major => Version::new(parsed.major + 1, 0, 0),
        ReleaseType::Minor => Version::new(parsed.major, parsed.minor + 1, 0),
        ReleaseType::Patch => Version::new(parsed.major, parsed.minor, parsed.patch + 1),
    };
    Ok(next.to_string())
}

/// Bumps `root` by `release` and cascades a patch bump through every
/// dependent, rewriting their declared ranges prefix-preserved.
///
/// The walk is an explicit FIFO queue with a visited set keyed by package
/// name, so it terminates even if the declared dependencies contain a
/// cycle, and a multi-hop dependent of several packages is processed once,
/// with whichever cause arrived first.
///
/// All mutation happens in memory first; when `save` is true every touched
/// manifest is written back exactly once after the cascade completes. With
/// `save` false the report is identical and no file is modified. Writes
/// are not transactional: a failure partway through the save loop leaves
/// the already-written manifests in place.
pub fn bump(
    release: ReleaseType,
    root: &str,
    packages: &mut [Package],
    save: bool,
) -> Result<BumpPlan> {
    let mut plan = BumpPlan::default();
    let mut visited: HashSet<String> = HashSet::new();
    let mut queue: VecDeque<(String, ReleaseType, Option<String>)> = VecDeque::new();
    queue.push_back((root.to_string(), release, None));

    while let Some((name, release, caused_by)) = queue.pop_front() {
        if !visited.insert(name.clone()) {
            continue;
        }

        let idx = packages
            .iter()
            .position(|pkg| pkg.name == name)
            .ok_or_else(|| Error::PackageNotFound {
                name: name.clone(),
                available: packages
                    .iter()
                    .map(|pkg| pkg.name.clone())
                    .collect::<Vec<_>>()
                    .join(", "),
            })?;

        let previous = packages[idx].latest.clone();
        let next = increment(&previous, release)?;
        debug!(package = %name, from = %previous, to = %next, "bumping version");

        packages[idx].manifest.set_version(&next);
        packages[idx].version = next.clone();
        packages[idx].latest = next.clone();
        plan.touch(&name);

        // Rewrite every direct dependent's range and queue it for a
        // patch-level bump of its own.
        let dependents: Vec<usize> = packages
            .iter()
            .enumerate()
            .filter(|(_, pkg)| pkg.get_dependency(&name).is_some())
            .map(|(i, _)| i)
            .collect();

        for dep_idx in dependents {
            let dependent_name = packages[dep_idx].name.clone();
            if packages[dep_idx].manifest.update_dependency_ref(&name, &next) {
                for dep in &mut packages[dep_idx].dependencies {
                    if dep.name == name {
                        let prefix = match dep.version_range.chars().next() {
                            Some('^') => "^",
                            Some('~') => "~",
                            _ => "",
                        };
                        dep.version_range = format!("{}{}", prefix, next);
                    }
                }
                plan.touch(&dependent_name);
            }
            queue.push_back((dependent_name, ReleaseType::Patch, Some(name.clone())));
        }

        plan.records.push(BumpRecord {
            release,
            name,
            previous,
            new_version: next,
            caused_by,
        });
    }

    if save {
        for name in plan.touched() {
            if let Some(pkg) = packages.iter().find(|pkg| &pkg.name == name) {
                pkg.manifest.save(&pkg.dir)?;
            }
        }
    }

    Ok(plan)
}
