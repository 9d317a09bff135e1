//! Arbitrary shell command execution across packages.

use std::process::Command;

use anyhow::Result;
use monosync_core::package::Package;
use monosync_core::{filter, LoadOptions};
use owo_colors::OwoColorize;
use rayon::prelude::*;

use super::{print_no_packages, require_settings};

struct RunResult {
    package: String,
    success: bool,
    stdout: String,
    stderr: String,
}

pub fn cmd_run(command: String, include_ignored: bool, concurrent: bool) -> Result<()> {
    let settings = match require_settings(LoadOptions::default())? {
        Some(settings) => settings,
        None => return Ok(()),
    };
    let packages: Vec<&Package> = settings
        .packages
        .iter()
        .filter(|pkg| filter::include_ignored(Some(pkg), include_ignored))
        .collect();

    if packages.is_empty() {
        print_no_packages();
        return Ok(());
    }

    println!(
        "  Running {} in {} packages\n",
        command.cyan(),
        packages.len().to_string().bold()
    );

    // Topological order when sequential; arbitrary completion order when
    // concurrent, reported per package either way.
    let results: Vec<RunResult> = if concurrent {
        packages
            .par_iter()
            .map(|pkg| run_in_package(&command, pkg))
            .collect()
    } else {
        packages
            .iter()
            .map(|pkg| run_in_package(&command, pkg))
            .collect()
    };

    let mut failures = 0;
    for result in &results {
        if result.success {
            println!("  {} {}", "OK".green(), result.package.bold());
        } else {
            failures += 1;
            println!("  {} {}", "FAILED".red(), result.package.bold());
            if !result.stdout.is_empty() {
                println!("{}", indent(&result.stdout));
            }
            if !result.stderr.is_empty() {
                println!("{}", indent(&result.stderr).red());
            }
        }
    }
    println!();

    if failures > 0 {
        return Err(anyhow::anyhow!(
            "Command failed in {} of {} packages",
            failures,
            results.len()
        ));
    }
    Ok(())
}

fn run_in_package(command: &str, pkg: &Package) -> RunResult {
    let output = Command::new("sh")
        .arg("-c")
        .arg(command)
        .current_dir(&pkg.dir)
        .output();

    match output {
        Ok(output) => RunResult {
            package: pkg.name.clone(),
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        },
        Err(err) => RunResult {
            package: pkg.name.clone(),
            success: false,
            stdout: String::new(),
            stderr: err.to_string(),
        },
    }
}

fn indent(text: &str) -> String {
    text.lines()
        .map(|line| format!("    {}", line))
        .collect::<Vec<_>>()
        .join("\n")
}
