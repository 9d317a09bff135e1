//! Registry freshness audit command.

use anyhow::Result;
use comfy_table::{Cell, Table};
use monosync_core::package::Package;
use monosync_core::{filter, LoadOptions};
use owo_colors::OwoColorize;

use super::{print_no_packages, require_settings};

/// Compares every package against its published registry version and
/// reports the ones that have fallen behind.
pub fn cmd_audit(include_ignored: bool) -> Result<()> {
    let settings = match require_settings(LoadOptions { registry: true })? {
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

    let behind: Vec<&&Package> = packages
        .iter()
        .filter(|pkg| pkg.latest != pkg.version)
        .collect();

    if behind.is_empty() {
        println!(
            "  {} {}",
            "OK".green(),
            "every package matches its published version".bright_black()
        );
        return Ok(());
    }

    let mut table = Table::new();
    table
        .set_header(vec![
            Cell::new("Package").add_attribute(comfy_table::Attribute::Bold),
            Cell::new("Version").add_attribute(comfy_table::Attribute::Bold),
            Cell::new("Latest").add_attribute(comfy_table::Attribute::Bold),
        ])
        .load_preset(comfy_table::presets::UTF8_FULL)
        .apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS)
        .set_content_arrangement(comfy_table::ContentArrangement::Dynamic);

    for pkg in &behind {
        table.add_row(vec![
            Cell::new(&pkg.name).fg(comfy_table::Color::Cyan),
            Cell::new(&pkg.version),
            Cell::new(&pkg.latest).fg(comfy_table::Color::Magenta),
        ]);
    }

    println!("{}", table);
    println!(
        "  {} {}",
        behind.len().to_string().bold().yellow(),
        "packages behind the registry".bright_black()
    );
    Ok(())
}
