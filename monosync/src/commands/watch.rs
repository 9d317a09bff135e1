//! Watch mode: re-sync dependents when a package changes.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use anyhow::Result;
use monosync_core::{filter, graph, sync, LoadOptions, PackageWatcher};
use owo_colors::OwoColorize;

use super::require_settings;

const DEBOUNCE: Duration = Duration::from_millis(300);
const POLL: Duration = Duration::from_millis(50);

pub fn cmd_watch(include_ignored: bool) -> Result<()> {
    let settings = match require_settings(LoadOptions::default())? {
        Some(settings) => settings,
        None => return Ok(()),
    };
    let packages = settings.packages;

    println!(
        "  Watching {} packages (pattern {})",
        packages.len().to_string().bold().cyan(),
        settings.watch_pattern.bright_black()
    );
    println!("  Press Ctrl+C to stop\n");

    let mut watcher = PackageWatcher::new(&packages)?;
    let mut pending: HashSet<String> = HashSet::new();
    let mut last_event = Instant::now();

    loop {
        match watcher.next_event()? {
            Some(event) => {
                let affected = watcher.affected_packages(&event);
                if !affected.is_empty() {
                    pending.extend(affected);
                    last_event = Instant::now();
                }
            }
            None => {
                if !pending.is_empty() && last_event.elapsed() >= DEBOUNCE {
                    for name in pending.drain() {
                        resync_dependents(&name, &packages, include_ignored)?;
                    }
                }
                std::thread::sleep(POLL);
            }
        }
    }
}

fn resync_dependents(
    changed: &str,
    packages: &[monosync_core::Package],
    include_ignored: bool,
) -> Result<()> {
    let source = match packages.iter().find(|pkg| pkg.name == changed) {
        Some(source) => source,
        None => return Ok(()),
    };

    println!("  {} {}", "changed".yellow(), changed.bold());
    for dependent in graph::depends_on(source, packages) {
        if !filter::include_ignored(Some(dependent), include_ignored) {
            continue;
        }
        let synced = sync::sync_package(dependent, packages, include_ignored)?;
        if !synced.is_empty() {
            println!(
                "  {} {} {}",
                dependent.name.magenta(),
                "⬅".cyan(),
                synced.join(", ").cyan()
            );
        }
    }
    Ok(())
}
