//! File watching across package directories.

use std::collections::HashSet;
use std::path::PathBuf;

use notify::Config as NotifyConfig;
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};

use crate::error::{Error, Result};
use crate::package::Package;

/// Watches every package directory and maps change events back to the
/// owning package by directory prefix.
pub struct PackageWatcher {
    watcher: RecommendedWatcher,
    receiver: std::sync::mpsc::Receiver<notify::Result<Event>>,
    roots: Vec<(String, PathBuf)>,
}

impl PackageWatcher {
    pub fn new(packages: &[Package]) -> Result<Self> {
        let (tx, rx) = std::sync::mpsc::channel();
        let watcher = RecommendedWatcher::new(
            move |res| {
                let _ = tx.send(res);
            },
            NotifyConfig::default(),
        )
        .map_err(|e| Error::Watch(format!("Failed to create watcher: {}", e)))?;

        let mut package_watcher = Self {
            watcher,
            receiver: rx,
            roots: packages
                .iter()
                .map(|pkg| (pkg.name.clone(), pkg.dir.clone()))
                .collect(),
        };
        package_watcher.watch_roots()?;
        Ok(package_watcher)
    }

    fn watch_roots(&mut self) -> Result<()> {
        for (name, dir) in &self.roots {
            self.watcher
                .watch(dir, RecursiveMode::Recursive)
                .map_err(|e| {
                    Error::Watch(format!("Failed to watch '{}' at {}: {}", name, dir.display(), e))
                })?;
        }
        Ok(())
    }

    /// Non-blocking poll for the next filesystem event.
    pub fn next_event(&mut self) -> Result<Option<Event>> {
        match self.receiver.try_recv() {
            Ok(Ok(event)) => Ok(Some(event)),
            Ok(Err(e)) => Err(Error::Watch(format!("Watcher error: {}", e))),
            Err(std::sync::mpsc::TryRecvError::Empty) => Ok(None),
            Err(std::sync::mpsc::TryRecvError::Disconnected) => {
                Err(Error::Watch("Watcher channel disconnected".to_string()))
            }
        }
    }

    pub fn wait_for_event(&mut self) -> Result<Event> {
        self.receiver
            .recv()
            .map_err(|_| Error::Watch("Watcher channel disconnected".to_string()))?
            .map_err(|e| Error::Watch(format!("Watcher error: {}", e)))
    }

    /// Names of the packages whose directories contain the event's paths.
    /// Changes inside a nested `node_modules` are not attributed.
    pub fn affected_packages(&self, event: &Event) -> HashSet<String> {
        let mut affected = HashSet::new();
        for path in &event.paths {
            for (name, dir) in &self.roots {
                if !path.starts_with(dir) {
                    continue;
                }
                let inside_node_modules = path
                    .strip_prefix(dir)
                    .map(|rel| rel.components().any(|c| c.as_os_str() == "node_modules"))
                    .unwrap_or(false);
                if !inside_node_modules {
                    affected.insert(name.clone());
                }
            }
        }
        affected
    }
}
