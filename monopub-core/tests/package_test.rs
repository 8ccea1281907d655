use std::fs;
use std::path::Path;

use monopub_core::{Error, Package};
use semver::Version;
use tempfile::TempDir;

fn write_manifest(dir: &Path, content: &str) {
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join("package.json"), content).unwrap();
}

#[test]
fn test_load_from_directory() {
    let temp_dir = TempDir::new().unwrap();
    let pkg_dir = temp_dir.path().join("core");
    write_manifest(
        &pkg_dir,
        r#"{
  "name": "@acme/core",
  "version": "1.4.2",
  "monopub": {
    "base": "dist",
    "dependencies": { "@acme/utils": "^1.0.0", "@acme/log": "*" }
  }
}"#,
    );

    let package = Package::load(&pkg_dir).unwrap();
    assert_eq!(package.name, "@acme/core");
    assert_eq!(package.version, Version::new(1, 4, 2));
    assert_eq!(package.path, pkg_dir);
    assert_eq!(package.base, pkg_dir.join("dist"));
    assert_eq!(package.deps.as_slice(), ["@acme/utils", "@acme/log"]);
    assert!(!package.private);
    assert!(!package.is_linked());
}

#[test]
fn test_load_from_manifest_file_with_dependency_list() {
    let temp_dir = TempDir::new().unwrap();
    write_manifest(
        temp_dir.path(),
        r#"{"name": "cli", "version": "0.1.0", "private": true, "monopub": {"dependencies": ["core"]}}"#,
    );

    let package = Package::load(&temp_dir.path().join("package.json")).unwrap();
    assert_eq!(package.deps.as_slice(), ["core"]);
    assert!(package.private);
    assert_eq!(package.manifest_path(), temp_dir.path().join("package.json"));
}

#[test]
fn test_invalid_version() {
    let temp_dir = TempDir::new().unwrap();
    write_manifest(temp_dir.path(), r#"{"name": "bad", "version": "one"}"#);

    let err = Package::load(temp_dir.path()).unwrap_err();
    assert!(matches!(err, Error::InvalidVersion { ref package, .. } if package == "bad"));
}

#[test]
fn test_missing_name() {
    let temp_dir = TempDir::new().unwrap();
    write_manifest(temp_dir.path(), r#"{"name": "", "version": "1.0.0"}"#);

    let err = Package::load(temp_dir.path()).unwrap_err();
    assert!(matches!(err, Error::InvalidPackageName(_)));
}

#[test]
fn test_malformed_manifest() {
    let temp_dir = TempDir::new().unwrap();
    write_manifest(temp_dir.path(), "{ not json");

    let err = Package::load(temp_dir.path()).unwrap_err();
    assert!(matches!(err, Error::Json { .. }));
}

#[test]
fn test_hash_ignores_node_modules_and_tracks_content() {
    let temp_dir = TempDir::new().unwrap();
    write_manifest(temp_dir.path(), r#"{"name": "h", "version": "1.0.0"}"#);
    fs::write(temp_dir.path().join("index.js"), "module.exports = 1;").unwrap();

    let first = Package::load(temp_dir.path()).unwrap();
    let hash = first.hash().unwrap().to_string();
    assert_eq!(hash.len(), 64);

    let modules = temp_dir.path().join("node_modules").join("dep");
    fs::create_dir_all(&modules).unwrap();
    fs::write(modules.join("index.js"), "noise").unwrap();
    let second = Package::load(temp_dir.path()).unwrap();
    assert_eq!(second.hash().unwrap(), hash);

    fs::write(temp_dir.path().join("index.js"), "module.exports = 2;").unwrap();
    let third = Package::load(temp_dir.path()).unwrap();
    assert_ne!(third.hash().unwrap(), hash);
    assert_eq!(first.hash().unwrap(), hash);
}

#[test]
fn test_link_is_fixed_once_set() {
    let package = Package::new("a".to_string(), Version::new(1, 0, 0), "a".into(), vec![]);

    assert!(package.local_dependencies().is_none());
    assert!(package.link(Default::default()));
    assert!(!package.link(Default::default()));
    assert!(package.local_dependencies().unwrap().is_empty());
}
