//! Version bump command.

use anyhow::Result;
use comfy_table::{Cell, Table};
use monosync_core::package::Package;
use monosync_core::{bump, filter, BumpPlan, LoadOptions, ReleaseType};
use owo_colors::OwoColorize;

use super::require_settings;

pub fn cmd_bump(
    package: String,
    release: ReleaseType,
    dry_run: bool,
    include_ignored: bool,
    local: bool,
) -> Result<()> {
    let settings = match require_settings(LoadOptions { registry: !local })? {
        Some(settings) => settings,
        None => return Ok(()),
    };
    let mut packages: Vec<Package> = settings
        .packages
        .into_iter()
        .filter(|pkg| filter::include_ignored(Some(pkg), include_ignored))
        .collect();

    if dry_run {
        println!("{}", "Dry run...no files will be saved.".bright_black());
        println!();
    }

    let plan = bump::bump(release, &package, &mut packages, !dry_run)?;
    print_plan(&plan);

    if dry_run {
        println!("{}", "No files were saved.".bright_black());
    }
    Ok(())
}

fn print_plan(plan: &BumpPlan) {
    let mut table = Table::new();
    table
        .set_header(vec![
            Cell::new("Update").add_attribute(comfy_table::Attribute::Bold),
            Cell::new("Package").add_attribute(comfy_table::Attribute::Bold),
            Cell::new("Version").add_attribute(comfy_table::Attribute::Bold),
            Cell::new("Ref Updated").add_attribute(comfy_table::Attribute::Bold),
        ])
        .load_preset(comfy_table::presets::UTF8_FULL)
        .apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS)
        .set_content_arrangement(comfy_table::ContentArrangement::Dynamic);

    for record in &plan.records {
        let cause = record
            .caused_by
            .as_deref()
            .map(|cause| {
                // Show the version the cascaded range now points at.
                plan.records
                    .iter()
                    .find(|r| r.name == cause)
                    .map(|r| format!("{} {} => {}", cause, r.previous, r.new_version))
                    .unwrap_or_else(|| cause.to_string())
            })
            .unwrap_or_else(|| "-".to_string());

        table.add_row(vec![
            Cell::new(record.release.as_str().to_uppercase()).fg(comfy_table::Color::Yellow),
            Cell::new(&record.name).fg(comfy_table::Color::Cyan),
            Cell::new(format!("{} => {}", record.previous, record.new_version)),
            Cell::new(cause).fg(comfy_table::Color::DarkGrey),
        ]);
    }

    println!("{}", table);
    println!(
        "  {} {}",
        plan.records.len().to_string().bold().cyan(),
        "packages updated".bright_black()
    );
    println!();
}
