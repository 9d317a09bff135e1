//! TypeScript build command.

use std::process::Command;

use anyhow::Result;
use monosync_core::package::Package;
use monosync_core::{filter, LoadOptions};
use owo_colors::OwoColorize;

use super::{print_no_packages, require_settings};

pub fn cmd_build(include_ignored: bool) -> Result<()> {
    let settings = match require_settings(LoadOptions::default())? {
        Some(settings) => settings,
        None => return Ok(()),
    };
    let targets: Vec<&Package> = settings
        .packages
        .iter()
        .filter(|pkg| pkg.is_typescript)
        .filter(|pkg| filter::include_ignored(Some(pkg), include_ignored))
        .collect();

    if targets.is_empty() {
        print_no_packages();
        return Ok(());
    }

    println!(
        "  Building {} packages\n",
        targets.len().to_string().bold().cyan()
    );

    // Settings come back in dependency order, so downstream packages
    // always compile against freshly built dependencies.
    let mut failures = 0;
    for pkg in &targets {
        let output = Command::new("sh")
            .arg("-c")
            .arg(tsc_command(pkg))
            .current_dir(&pkg.dir)
            .output();

        match output {
            Ok(output) if output.status.success() => {
                println!("  {} {}", "OK".green(), pkg.name.bold());
            }
            Ok(output) => {
                failures += 1;
                println!("  {} {}", "FAILED".red(), pkg.name.bold());
                let stdout = String::from_utf8_lossy(&output.stdout);
                if !stdout.trim().is_empty() {
                    println!("{}", indent(stdout.trim()));
                }
                let stderr = String::from_utf8_lossy(&output.stderr);
                if !stderr.trim().is_empty() {
                    println!("{}", indent(stderr.trim()).red());
                }
            }
            Err(err) => {
                failures += 1;
                println!("  {} {}: {}", "FAILED".red(), pkg.name.bold(), err);
            }
        }
    }
    println!();

    if failures > 0 {
        return Err(anyhow::anyhow!(
            "Build failed in {} of {} packages",
            failures,
            targets.len()
        ));
    }
    Ok(())
}

/// Prefers the package's own TypeScript install over a global `tsc`.
fn tsc_command(pkg: &Package) -> String {
    let local = pkg.dir.join("node_modules/typescript/bin/tsc");
    if local.is_file() {
        local.display().to_string()
    } else {
        "tsc".to_string()
    }
}

fn indent(text: &str) -> String {
    text.lines()
        .map(|line| format!("    {}", line))
        .collect::<Vec<_>>()
        .join("\n")
}
