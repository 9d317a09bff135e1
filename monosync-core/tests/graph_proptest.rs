use monosync_core::graph::{link_local_deps, order_by_depth};
use monosync_core::package::{Dependency, Package};
use proptest::prelude::*;

const NAMES: [&str; 5] = ["a", "b", "c", "d", "e"];

/// Generates acyclic dependency sets: a package may only depend on
/// packages earlier in the fixed name list.
fn gen_packages() -> impl Strategy<Value = Vec<Package>> {
    NAMES
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            proptest::collection::vec(0..NAMES.len().max(1), 0..=idx.min(3)).prop_map(
                move |targets| {
                    let deps: Vec<Dependency> = targets
                        .into_iter()
                        .filter(|t| *t < idx)
                        .map(|t| Dependency::new(NAMES[t], "^1.0.0", false))
                        .collect();
                    Package::new(*name, "1.0.0", format!("/ws/{}", name), deps)
                },
            )
        })
        .collect::<Vec<_>>()
}

proptest! {
    #[test]
    fn test_order_contains_every_package_once(mut packages in gen_packages()) {
        link_local_deps(&mut packages);
        let count = packages.len();
        let ordered = order_by_depth(packages).unwrap();
        prop_assert_eq!(ordered.len(), count);

        let mut seen = std::collections::HashSet::new();
        for pkg in &ordered {
            prop_assert!(seen.insert(pkg.name.clone()), "duplicate {}", pkg.name);
        }
    }

    #[test]
    fn test_order_respects_local_dependencies(mut packages in gen_packages()) {
        link_local_deps(&mut packages);
        let ordered = order_by_depth(packages).unwrap();

        let index_of = |name: &str| ordered.iter().position(|p| p.name == name);
        for pkg in &ordered {
            for dep in &pkg.dependencies {
                if dep.is_local {
                    let dep_idx = index_of(&dep.name).unwrap();
                    let pkg_idx = index_of(&pkg.name).unwrap();
                    prop_assert!(dep_idx < pkg_idx);
                }
            }
        }
    }
}
