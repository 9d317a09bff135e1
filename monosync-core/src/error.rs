//! Error types and result aliases.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse manifest {path}: {source}")]
    ManifestParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to serialize manifest: {0}")]
    ManifestSerialize(#[from] serde_json::Error),

    #[error("Failed to parse workspace descriptor {path}: {source}")]
    DescriptorParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("Invalid glob pattern '{pattern}': {message}")]
    Pattern { pattern: String, message: String },

    #[error("Cannot apply a {release} bump to version '{version}': not a valid semver")]
    InvalidVersion { version: String, release: String },

    #[error("Circular dependency detected: {0}")]
    DependencyCycle(String),

    #[error("Package not found: {name}. Available packages: {available}")]
    PackageNotFound { name: String, available: String },

    #[error("Registry lookup failed for {package}: {message}")]
    Registry { package: String, message: String },

    #[error("Watcher error: {0}")]
    Watch(String),
}

pub type Result<T> = std::result::Result<T, Error>;
