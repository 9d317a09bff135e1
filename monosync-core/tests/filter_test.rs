use monosync_core::filter::{include_ignored, is_ignored, local_deps};
use monosync_core::package::{Dependency, Package};
use monosync_core::IgnoreRules;

fn test_package() -> Package {
    let mut deps = vec![
        Dependency::new("local-dep", "^1.0.0", false),
        Dependency::new("external-dep", "^2.0.0", false),
    ];
    deps[0].is_local = true;
    Package::new("my-pkg", "1.0.0", "/ws/tools/my-pkg", deps)
}

#[test]
fn test_is_ignored_by_name() {
    let pkg = test_package();
    let rules = IgnoreRules {
        names: vec!["my-pkg".to_string()],
        paths: vec![],
    };
    assert!(is_ignored(&pkg, &rules));
}

#[test]
fn test_is_ignored_by_path_prefix() {
    let pkg = test_package();
    let rules = IgnoreRules {
        names: vec![],
        paths: vec!["/ws/tools".into()],
    };
    assert!(is_ignored(&pkg, &rules));

    let elsewhere = IgnoreRules {
        names: vec![],
        paths: vec!["/ws/libs".into()],
    };
    assert!(!is_ignored(&pkg, &elsewhere));
}

#[test]
fn test_is_ignored_empty_rules() {
    let pkg = test_package();
    assert!(!is_ignored(&pkg, &IgnoreRules::default()));
}

#[test]
fn test_include_ignored_flag() {
    let mut pkg = test_package();
    pkg.is_ignored = true;

    assert!(!include_ignored(Some(&pkg), false));
    assert!(include_ignored(Some(&pkg), true));

    pkg.is_ignored = false;
    assert!(include_ignored(Some(&pkg), false));
    assert!(include_ignored(Some(&pkg), true));
}

#[test]
fn test_include_ignored_absent_package() {
    // Absence of information is not grounds for exclusion.
    assert!(include_ignored(None, false));
    assert!(include_ignored(None, true));
}

#[test]
fn test_filters_are_pure() {
    let pkg = test_package();
    let rules = IgnoreRules {
        names: vec!["my-pkg".to_string()],
        paths: vec![],
    };
    assert_eq!(is_ignored(&pkg, &rules), is_ignored(&pkg, &rules));
    assert_eq!(
        include_ignored(Some(&pkg), false),
        include_ignored(Some(&pkg), false)
    );
}

#[test]
fn test_local_deps() {
    let pkg = test_package();
    let locals = local_deps(&pkg);
    assert_eq!(locals.len(), 1);
    assert_eq!(locals[0].name, "local-dep");
}
