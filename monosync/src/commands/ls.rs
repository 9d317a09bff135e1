//! Package listing command.

use anyhow::Result;
use comfy_table::{Cell, Table};
use monosync_core::package::Package;
use monosync_core::{filter, LoadOptions};
use owo_colors::OwoColorize;

use super::{print_no_packages, require_settings};
use crate::DepsArg;

pub fn cmd_ls(
    include_ignored: bool,
    deps: DepsArg,
    show_path: bool,
    registry: bool,
    json: bool,
) -> Result<()> {
    let settings = match require_settings(LoadOptions { registry })? {
        Some(settings) => settings,
        None => return Ok(()),
    };
    let packages: Vec<&Package> = settings
        .packages
        .iter()
        .filter(|pkg| filter::include_ignored(Some(pkg), include_ignored))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&packages)?);
        return Ok(());
    }

    if packages.is_empty() {
        print_no_packages();
        return Ok(());
    }

    let mut table = Table::new();
    let mut header = vec![
        Cell::new("Package").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Version").add_attribute(comfy_table::Attribute::Bold),
    ];
    if registry {
        header.push(Cell::new("Latest").add_attribute(comfy_table::Attribute::Bold));
    }
    if deps != DepsArg::None {
        header.push(Cell::new("Dependencies").add_attribute(comfy_table::Attribute::Bold));
    }
    if show_path {
        header.push(Cell::new("Path").add_attribute(comfy_table::Attribute::Bold));
    }
    table
        .set_header(header)
        .load_preset(comfy_table::presets::UTF8_FULL)
        .apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS)
        .set_content_arrangement(comfy_table::ContentArrangement::Dynamic);

    for pkg in &packages {
        let name = if pkg.is_ignored {
            format!("{} (ignored)", pkg.name)
        } else {
            pkg.name.clone()
        };
        let mut row = vec![
            Cell::new(name).fg(comfy_table::Color::White),
            Cell::new(&pkg.version),
        ];
        if registry {
            let latest = if pkg.latest != pkg.version {
                pkg.latest.clone()
            } else {
                "-".to_string()
            };
            row.push(Cell::new(latest).fg(comfy_table::Color::Magenta));
        }
        if deps != DepsArg::None {
            row.push(Cell::new(format_deps(pkg, deps)).fg(comfy_table::Color::DarkGrey));
        }
        if show_path {
            row.push(Cell::new(pkg.dir.display().to_string()).fg(comfy_table::Color::DarkGrey));
        }
        table.add_row(row);
    }

    println!("{}", table);
    println!(
        "  {} {}",
        packages.len().to_string().bold().cyan(),
        "packages in dependency order".bright_black()
    );
    Ok(())
}

fn format_deps(pkg: &Package, deps: DepsArg) -> String {
    let listed: Vec<String> = match deps {
        DepsArg::All => pkg
            .dependencies
            .iter()
            .map(|dep| format!("{} {}", dep.name, dep.version_range))
            .collect(),
        _ => filter::local_deps(pkg)
            .iter()
            .map(|dep| format!("{} {}", dep.name, dep.version_range))
            .collect(),
    };
    if listed.is_empty() {
        "-".to_string()
    } else {
        listed.join("\n")
    }
}
