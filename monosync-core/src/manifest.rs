//! Manifest loading and persistence for `package.json` files.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::package::{Dependency, Engine, Package};

pub const MANIFEST_FILE: &str = "package.json";

/// The three dependency tables, in the order they are merged. Peer
/// dependencies land in the same production bucket as regular ones.
const DEP_TABLES: [(&str, bool); 3] = [
    ("dependencies", false),
    ("peerDependencies", false),
    ("devDependencies", true),
];

/// In-memory mirror of a `package.json` document.
///
/// Key order is preserved exactly as read so that rewriting the file
/// produces a minimal version-control diff.
#[derive(Debug, Clone, Default)]
pub struct Manifest {
    doc: Map<String, Value>,
}

impl Manifest {
    pub fn parse(text: &str) -> serde_json::Result<Self> {
        let doc: Map<String, Value> = serde_json::from_str(text)?;
        Ok(Self { doc })
    }

    #[inline]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.doc.get(key)
    }

    #[inline]
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.doc.get(key).and_then(Value::as_str)
    }

    #[inline]
    pub fn version(&self) -> Option<&str> {
        self.str_field("version")
    }

    pub fn set_version(&mut self, version: &str) {
        self.doc
            .insert("version".to_string(), Value::String(version.to_string()));
    }

    #[inline]
    pub fn is_private(&self) -> bool {
        self.doc.get("private").and_then(Value::as_bool) == Some(true)
    }

    /// Rewrites the declared range for `name` in every dependency table to
    /// point at `new_version`, preserving a leading `^` or `~` from the
    /// previous range. An exact pin stays an exact pin.
    ///
    /// Returns whether any range actually changed.
    pub fn update_dependency_ref(&mut self, name: &str, new_version: &str) -> bool {
        let mut changed = false;
        for (table, _) in DEP_TABLES {
            if let Some(Value::Object(deps)) = self.doc.get_mut(table) {
                if let Some(Value::String(current)) = deps.get_mut(name) {
                    let prefix = match current.chars().next() {
                        Some('^') => "^",
                        Some('~') => "~",
                        _ => "",
                    };
                    let next = format!("{}{}", prefix, new_version);
                    if *current != next {
                        *current = next;
                        changed = true;
                    }
                }
            }
        }
        changed
    }

    /// Serializes as committed to source control: stable key order as
    /// read, two-space indent, trailing newline.
    pub fn to_json_string(&self) -> Result<String> {
        let text = serde_json::to_string_pretty(&self.doc)?;
        Ok(format!("{}\n", text))
    }

    /// Writes the manifest back to `package.json` inside `dir`.
    pub fn save(&self, dir: &Path) -> Result<()> {
        fs::write(dir.join(MANIFEST_FILE), self.to_json_string()?)?;
        Ok(())
    }
}

/// Loads a `package.json` and its derived project metadata into a
/// normalized [`Package`] record. Filesystem reads only, no mutation.
pub fn load_package(manifest_path: &Path) -> Result<Package> {
    let text = fs::read_to_string(manifest_path)?;
    let manifest = Manifest::parse(&text).map_err(|source| Error::ManifestParse {
        path: manifest_path.to_path_buf(),
        source,
    })?;

    let dir: PathBuf = manifest_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();

    let name = manifest.str_field("name").unwrap_or_default().to_string();
    let version = manifest.version().unwrap_or_default().to_string();

    let mut dependencies: Vec<Dependency> = Vec::new();
    for (table, is_dev) in DEP_TABLES {
        if let Some(Value::Object(deps)) = manifest.get(table) {
            for (dep_name, range) in deps {
                let range = range.as_str().unwrap_or_default();
                dependencies.push(Dependency::new(dep_name.clone(), range, is_dev));
            }
        }
    }
    // Sorted by name; a dependency declared in multiple tables collapses
    // to the first occurrence.
    dependencies.sort_by(|a, b| a.name.cmp(&b.name));
    dependencies.dedup_by(|a, b| a.name == b.name);

    let scripts = manifest.get("scripts").and_then(Value::as_object);
    let has_scripts = scripts.is_some();
    let has_prepublish = scripts.map(|s| s.contains_key("prepublish")).unwrap_or(false);

    let is_typescript = dir.join("tsconfig.json").exists();
    let engine = detect_engine(&dir);
    let gitignore = load_gitignore(&dir);

    let mut pkg = Package::new(name, version, dir, dependencies);
    pkg.engine = engine;
    pkg.is_typescript = is_typescript;
    pkg.has_scripts = has_scripts;
    pkg.has_prepublish = has_prepublish;
    pkg.gitignore = gitignore;
    pkg.manifest = manifest;
    Ok(pkg)
}

fn detect_engine(dir: &Path) -> Engine {
    if dir.join("yarn.lock").exists() {
        return Engine::Yarn;
    }
    if dir.join("package-lock.json").exists() {
        return Engine::Npm;
    }
    Engine::Npm
}

fn load_gitignore(dir: &Path) -> Vec<String> {
    match fs::read_to_string(dir.join(".gitignore")) {
        Ok(text) => text.lines().map(|line| line.to_string()).collect(),
        Err(_) => Vec::new(),
    }
}
