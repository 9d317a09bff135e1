//! Transient file cleanup command.

use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use monosync_core::package::Package;
use monosync_core::{filter, LoadOptions};
use owo_colors::OwoColorize;

use super::require_settings;
use crate::DeleteTarget;

/// Removes build/install residue (logs, lockfiles, `node_modules`) from
/// every package directory.
pub fn cmd_delete(target: DeleteTarget, include_ignored: bool, dry_run: bool) -> Result<()> {
    let settings = match require_settings(LoadOptions::default())? {
        Some(settings) => settings,
        None => return Ok(()),
    };
    let packages: Vec<&Package> = settings
        .packages
        .iter()
        .filter(|pkg| filter::include_ignored(Some(pkg), include_ignored))
        .collect();

    let paths = transient_paths(target, &packages);
    if paths.is_empty() {
        println!("  {}", "No files to delete.".bright_black());
        return Ok(());
    }

    for path in &paths {
        println!("  {} {}", "delete".red(), path.display());
    }
    println!();

    if dry_run {
        println!("{}", "Dry run...nothing was deleted.".bright_black());
        return Ok(());
    }

    for path in &paths {
        if path.is_dir() {
            fs::remove_dir_all(path)?;
        } else {
            fs::remove_file(path)?;
        }
    }
    println!(
        "  {} {}",
        paths.len().to_string().bold().cyan(),
        "deleted".bright_black()
    );
    Ok(())
}

/// Resolves the target to the concrete paths that exist right now.
fn transient_paths(target: DeleteTarget, packages: &[&Package]) -> Vec<PathBuf> {
    let names: &[&str] = match target {
        DeleteTarget::Logs => &["yarn-error.log", "npm-debug.log"],
        DeleteTarget::YarnLock => &["yarn.lock"],
        DeleteTarget::PackageLock => &["package-lock.json"],
        DeleteTarget::NodeModules => &["node_modules"],
    };

    packages
        .iter()
        .flat_map(|pkg| names.iter().map(|name| pkg.dir.join(name)))
        .filter(|path| path.exists())
        .collect()
}
