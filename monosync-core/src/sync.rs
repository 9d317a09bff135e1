//! Copying local dependency trees between packages.

use std::fs;
use std::io;
use std::path::Path;

use tracing::debug;
use walkdir::WalkDir;

use crate::error::Result;
use crate::filter;
use crate::package::Package;

const SKIP_DIRS: [&str; 2] = ["node_modules", ".git"];

/// Copies each local dependency of `target` into
/// `target/node_modules/<name>/`.
///
/// Sources excluded by the ignore filter are skipped. Returns the names
/// of the dependencies that were copied.
pub fn sync_package(
    target: &Package,
    all: &[Package],
    include_ignored: bool,
) -> Result<Vec<String>> {
    let mut synced = Vec::new();
    for dep in filter::local_deps(target) {
        let source = match all.iter().find(|pkg| pkg.name == dep.name) {
            Some(source) => source,
            None => continue,
        };
        if !filter::include_ignored(Some(source), include_ignored) {
            continue;
        }
        let dest = target.dir.join("node_modules").join(&source.name);
        debug!(
            from = %source.dir.display(),
            to = %dest.display(),
            "syncing dependency"
        );
        copy_tree(&source.dir, &dest)?;
        synced.push(source.name.clone());
    }
    Ok(synced)
}

fn copy_tree(src: &Path, dest: &Path) -> Result<()> {
    let walker = WalkDir::new(src).into_iter().filter_entry(|entry| {
        !(entry.file_type().is_dir() && SKIP_DIRS.iter().any(|skip| entry.file_name() == *skip))
    });

    for entry in walker {
        let entry = entry.map_err(io::Error::from)?;
        let relative = match entry.path().strip_prefix(src) {
            Ok(relative) => relative,
            Err(_) => continue,
        };
        let out = dest.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&out)?;
        } else {
            if let Some(parent) = out.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &out)?;
        }
    }
    Ok(())
}
