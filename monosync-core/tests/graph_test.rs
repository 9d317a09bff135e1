use std::fs;

use tempfile::TempDir;

use monosync_core::graph::{depends_on, link_local_deps, load_packages, order_by_depth};
use monosync_core::package::{Dependency, Package};
use monosync_core::Error;

fn create_test_packages() -> Vec<Package> {
    let mut packages = vec![
        Package::new("pkg-c", "3.0.0", "/ws/pkg-c", vec![Dependency::new("pkg-b", "~2.0.0", false)]),
        Package::new("pkg-a", "1.0.0", "/ws/pkg-a", vec![]),
        Package::new(
            "pkg-b",
            "2.0.0",
            "/ws/pkg-b",
            vec![
                Dependency::new("pkg-a", "^1.0.0", false),
                Dependency::new("left-pad", "^1.3.0", false),
            ],
        ),
    ];
    link_local_deps(&mut packages);
    packages
}

#[test]
fn test_topological_order() {
    let packages = create_test_packages();
    let ordered = order_by_depth(packages).unwrap();

    let names: Vec<&str> = ordered.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["pkg-a", "pkg-b", "pkg-c"]);
}

#[test]
fn test_topological_invariant() {
    let packages = create_test_packages();
    let ordered = order_by_depth(packages).unwrap();

    let index_of = |name: &str| ordered.iter().position(|p| p.name == name).unwrap();
    for pkg in &ordered {
        for dep in &pkg.dependencies {
            if dep.is_local {
                assert!(
                    index_of(&dep.name) < index_of(&pkg.name),
                    "{} must come before {}",
                    dep.name,
                    pkg.name
                );
            }
        }
    }
}

#[test]
fn test_local_dependency_derivation() {
    let packages = create_test_packages();
    let names: Vec<&str> = packages.iter().map(|p| p.name.as_str()).collect();

    for pkg in &packages {
        for dep in &pkg.dependencies {
            assert_eq!(dep.is_local, names.contains(&dep.name.as_str()));
        }
    }

    let pkg_b = packages.iter().find(|p| p.name == "pkg-b").unwrap();
    assert!(pkg_b.get_dependency("pkg-a").unwrap().is_local);
    assert!(!pkg_b.get_dependency("left-pad").unwrap().is_local);
}

#[test]
fn test_packages_without_dependencies_are_kept() {
    let mut packages = vec![
        Package::new("solo-a", "1.0.0", "/ws/solo-a", vec![]),
        Package::new("solo-b", "1.0.0", "/ws/solo-b", vec![]),
    ];
    link_local_deps(&mut packages);

    let ordered = order_by_depth(packages).unwrap();
    assert_eq!(ordered.len(), 2);
}

#[test]
fn test_depends_on_direct_only() {
    let packages = create_test_packages();
    let pkg_a = packages.iter().find(|p| p.name == "pkg-a").unwrap();
    let pkg_c = packages.iter().find(|p| p.name == "pkg-c").unwrap();

    let dependents = depends_on(pkg_a, &packages);
    assert_eq!(dependents.len(), 1);
    assert_eq!(dependents[0].name, "pkg-b");

    assert!(depends_on(pkg_c, &packages).is_empty());
}

#[test]
fn test_depends_on_includes_dev_dependencies() {
    let mut packages = vec![
        Package::new("core", "1.0.0", "/ws/core", vec![]),
        Package::new(
            "tooling",
            "1.0.0",
            "/ws/tooling",
            vec![Dependency::new("core", "^1.0.0", true)],
        ),
    ];
    link_local_deps(&mut packages);

    let core = packages.iter().find(|p| p.name == "core").unwrap();
    let dependents = depends_on(core, &packages);
    assert_eq!(dependents.len(), 1);
    assert_eq!(dependents[0].name, "tooling");
}

#[test]
fn test_single_star_stays_within_one_directory_level() {
    let temp = TempDir::new().unwrap();
    for (rel, name) in [("libs/util", "util"), ("libs/group/nested", "nested")] {
        let dir = temp.path().join(rel);
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("package.json"),
            format!("{{\"name\": \"{}\", \"version\": \"1.0.0\"}}", name),
        )
        .unwrap();
    }

    let pattern = format!("{}/libs/*/package.json", temp.path().display());
    let packages = load_packages(&[pattern]).unwrap();
    let names: Vec<&str> = packages.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["util"], "one level deep only");

    // Reaching deeper takes an explicit recursive glob.
    let pattern = format!("{}/libs/**/package.json", temp.path().display());
    let packages = load_packages(&[pattern]).unwrap();
    assert_eq!(packages.len(), 2);
}

#[test]
fn test_circular_dependency_errors() {
    let mut packages = vec![
        Package::new("pkg-a", "1.0.0", "/ws/pkg-a", vec![Dependency::new("pkg-b", "^1.0.0", false)]),
        Package::new("pkg-b", "1.0.0", "/ws/pkg-b", vec![Dependency::new("pkg-a", "^1.0.0", false)]),
    ];
    link_local_deps(&mut packages);

    let result = order_by_depth(packages);
    assert!(matches!(result, Err(Error::DependencyCycle(_))));
}
