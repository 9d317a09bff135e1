//! Local dependency tree sync command.

use anyhow::Result;
use monosync_core::package::Package;
use monosync_core::{filter, sync, LoadOptions};
use owo_colors::OwoColorize;

use super::{print_no_packages, require_settings};

pub fn cmd_sync(include_ignored: bool, update_versions: bool) -> Result<()> {
    let settings = match require_settings(LoadOptions::default())? {
        Some(settings) => settings,
        None => return Ok(()),
    };
    let packages = settings.packages;

    let targets: Vec<&Package> = packages
        .iter()
        .filter(|pkg| !filter::local_deps(pkg).is_empty())
        .filter(|pkg| filter::include_ignored(Some(pkg), include_ignored))
        .collect();

    if targets.is_empty() {
        print_no_packages();
        return Ok(());
    }

    for target in &targets {
        let synced = sync::sync_package(target, &packages, include_ignored)?;
        if synced.is_empty() {
            continue;
        }

        if update_versions {
            let mut manifest = target.manifest.clone();
            let mut changed = false;
            for name in &synced {
                if let Some(source) = packages.iter().find(|pkg| &pkg.name == name) {
                    changed |= manifest.update_dependency_ref(name, &source.version);
                }
            }
            if changed {
                manifest.save(&target.dir)?;
            }
        }

        println!(
            "  {} {} {}",
            target.name.magenta(),
            "⬅".cyan(),
            synced.join(", ").cyan()
        );
    }
    println!();
    Ok(())
}
