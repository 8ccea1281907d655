use std::sync::Arc;

use monopub_core::{ClosureCache, Package, Workspace, WorkspaceConfig};
use semver::Version;

fn package(name: &str, deps: &[&str]) -> Package {
    Package::new(
        name.to_string(),
        Version::new(1, 0, 0),
        format!("/repo/packages/{}", name).into(),
        deps.iter().map(|d| d.to_string()).collect(),
    )
}

fn web_core_utils() -> Workspace {
    Workspace::from_packages(
        "/repo",
        WorkspaceConfig::default(),
        vec![
            package("web", &["core"]),
            package("core", &["utils"]),
            package("utils", &[]),
        ],
    )
    .unwrap()
}

#[test]
fn test_closure_is_memoized_per_root() {
    let ws = web_core_utils();
    let cache = ClosureCache::new();
    assert!(cache.is_empty());

    let web = ws.get("web").unwrap();
    let first = cache.closure(web).unwrap();
    let second = cache.closure(web).unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.names().collect::<Vec<_>>(), vec!["utils", "core"]);
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_invalidate_forces_fresh_resolution() {
    let ws = web_core_utils();
    let cache = ClosureCache::new();
    let web = ws.get("web").unwrap();
    let core = ws.get("core").unwrap();

    let before = cache.closure(web).unwrap();
    cache.closure(core).unwrap();
    assert_eq!(cache.len(), 2);

    cache.invalidate("web");
    assert_eq!(cache.len(), 1);

    let after = cache.closure(web).unwrap();
    assert!(!Arc::ptr_eq(&before, &after));
    assert_eq!(
        before.names().collect::<Vec<_>>(),
        after.names().collect::<Vec<_>>()
    );

    cache.invalidate("missing");
    assert_eq!(cache.len(), 2);
}

#[test]
fn test_clear_drops_every_entry() {
    let ws = web_core_utils();
    let cache: ClosureCache<Package> = ClosureCache::default();

    for package in ws.all_packages() {
        cache.closure(package).unwrap();
    }
    assert_eq!(cache.len(), 3);

    cache.clear();
    assert!(cache.is_empty());
}

#[test]
fn test_predicates_populate_cache() {
    let ws = web_core_utils();
    let cache = ClosureCache::new();
    let web = ws.get("web").unwrap();
    let core = ws.get("core").unwrap().as_ref();
    let utils = ws.get("utils").unwrap().as_ref();

    assert!(cache.is_dependent(web, &[core, utils]).unwrap());
    assert!(cache.is_any_dependent(web, &[utils]).unwrap());
    assert!(!cache.is_dependent(ws.get("utils").unwrap(), &[core]).unwrap());
    assert_eq!(cache.len(), 2);
}

#[test]
fn test_failed_resolution_is_not_cached() {
    let ws = Workspace::from_packages(
        "/repo",
        WorkspaceConfig::default(),
        vec![package("a", &["b"]), package("b", &["a"])],
    )
    .unwrap();
    let cache = ClosureCache::new();

    assert!(cache.closure(ws.get("a").unwrap()).is_err());
    assert!(cache.is_empty());
}
