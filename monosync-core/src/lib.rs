//! Core library for monorepo workspace management: package graphs,
//! dependency ordering, and cascading version bumps.

pub mod bump;
pub mod error;
pub mod filter;
pub mod graph;
pub mod manifest;
pub mod package;
pub mod registry;
pub mod settings;
pub mod sync;
pub mod watcher;

pub use bump::{bump, increment, BumpPlan, BumpRecord};
pub use error::{Error, Result};
pub use filter::IgnoreRules;
pub use manifest::Manifest;
pub use package::{Dependency, Engine, Package, ReleaseType};
pub use registry::RegistryInfo;
pub use settings::{load_settings, LoadOptions, Settings};
pub use watcher::PackageWatcher;
