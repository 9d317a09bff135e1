//! Registry publish command.

use std::process::Command;

use anyhow::Result;
use monosync_core::package::Package;
use monosync_core::{filter, registry, LoadOptions};
use owo_colors::OwoColorize;

use super::require_settings;

/// Publishes every package whose local version is ahead of the registry.
///
/// Candidates are published one at a time in dependency order; the first
/// failure aborts the run so a broken release never cascades into
/// dependents being published against it.
pub fn cmd_publish(include_ignored: bool, dry_run: bool) -> Result<()> {
    let settings = match require_settings(LoadOptions { registry: true })? {
        Some(settings) => settings,
        None => return Ok(()),
    };
    let candidates: Vec<&Package> = settings
        .packages
        .iter()
        .filter(|pkg| filter::include_ignored(Some(pkg), include_ignored))
        .filter(|pkg| !pkg.is_private())
        .filter(|pkg| registry::needs_publish(pkg))
        .collect();

    if candidates.is_empty() {
        println!(
            "  {} {}",
            "OK".green(),
            "no packages are ahead of the registry".bright_black()
        );
        return Ok(());
    }

    for pkg in &candidates {
        let published = pkg
            .registry
            .as_ref()
            .map(|info| info.latest.as_str())
            .unwrap_or("-");
        println!(
            "  {} {} {}",
            pkg.name.cyan(),
            published.bright_black(),
            format!("=> {}", pkg.version).bold()
        );
    }
    println!();

    if dry_run {
        println!("{}", "Dry run...nothing was published.".bright_black());
        return Ok(());
    }

    for pkg in &candidates {
        println!("  {} {}", "publishing".yellow(), pkg.name.bold());
        let output = Command::new("npm")
            .arg("publish")
            .current_dir(&pkg.dir)
            .output()?;

        if !output.status.success() {
            return Err(anyhow::anyhow!(
                "npm publish failed for {}: {}",
                pkg.name,
                String::from_utf8_lossy(&output.stderr).trim()
            ));
        }
        println!("  {} {} {}", "OK".green(), pkg.name.bold(), pkg.version);
    }
    println!();
    Ok(())
}
