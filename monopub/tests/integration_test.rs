use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn create_test_package(dir: &Path, name: &str, deps: &[&str]) {
    let pkg_dir = dir.join(name);
    fs::create_dir_all(&pkg_dir).unwrap();

    let deps: Vec<String> = deps.iter().map(|d| format!(r#""{}": "*""#, d)).collect();
    let manifest = format!(
        r#"{{
  "name": "{}",
  "version": "1.0.0",
  "monopub": {{ "dependencies": {{ {} }} }}
}}"#,
        name,
        deps.join(", ")
    );

    fs::write(pkg_dir.join("package.json"), manifest).unwrap();
}

fn create_repo() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir_all(temp_dir.path().join(".git")).unwrap();

    let packages_dir = temp_dir.path().join("packages");
    create_test_package(&packages_dir, "web", &["core", "utils"]);
    create_test_package(&packages_dir, "core", &["utils"]);
    create_test_package(&packages_dir, "utils", &[]);
    temp_dir
}

fn monopub(repo: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_monopub"))
        .args(args)
        .arg("--path")
        .arg(repo)
        .env("NO_COLOR", "1")
        .output()
        .expect("Failed to execute monopub")
}

#[test]
fn test_list_json() {
    let repo = create_repo();
    let output = monopub(repo.path(), &["list", "--json"]);

    assert!(output.status.success());
    let listed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let names: Vec<&str> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["core", "utils", "web"]);
}

#[test]
fn test_order_json() {
    let repo = create_repo();
    let output = monopub(repo.path(), &["order", "web", "--json"]);

    assert!(output.status.success());
    let order: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(order[0]["name"], "utils");
    assert_eq!(order[1]["name"], "core");
    assert_eq!(order.as_array().unwrap().len(), 2);
}

#[test]
fn test_deps_json_unions_roots() {
    let repo = create_repo();
    let output = monopub(repo.path(), &["deps", "web", "core", "--json"]);

    assert!(output.status.success());
    let names: Vec<String> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(names, vec!["utils", "core"]);
}

#[test]
fn test_order_unknown_package_fails() {
    let repo = create_repo();
    let output = monopub(repo.path(), &["order", "nope"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Package not found: nope"));
}

#[test]
fn test_cycle_fails_with_path() {
    let repo = create_repo();
    create_test_package(&repo.path().join("packages"), "a", &["b"]);
    create_test_package(&repo.path().join("packages"), "b", &["a"]);

    let output = monopub(repo.path(), &["order", "a"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("a -> b -> a"));
}

#[test]
fn test_publish_dry_run() {
    let repo = create_repo();
    let output = monopub(repo.path(), &["publish", "--dry", "--no-check-existing"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let utils = stdout.find("utils").unwrap();
    let core = stdout.find("core").unwrap();
    let web = stdout.find("web").unwrap();
    assert!(utils < core && core < web);
}

#[test]
fn test_publish_write_script() {
    let repo = create_repo();
    let script = repo.path().join("publish.sh");
    let output = monopub(
        repo.path(),
        &[
            "publish",
            "--no-check-existing",
            "--write",
            script.to_str().unwrap(),
        ],
    );

    assert!(output.status.success());
    let content = fs::read_to_string(&script).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("npm publish") && lines[0].ends_with("utils"));
    assert!(lines[1].ends_with("core"));
    assert!(lines[2].ends_with("web"));
}

fn create_split_repo(config: &str) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir_all(temp_dir.path().join(".git")).unwrap();
    fs::write(temp_dir.path().join("monopub.toml"), config).unwrap();

    create_test_package(&temp_dir.path().join("apps"), "web", &["core"]);
    create_test_package(&temp_dir.path().join("libs"), "core", &[]);
    temp_dir
}

#[test]
fn test_publish_recursive_from_config() {
    let repo = create_split_repo("[publish]\nrecursive = true\ncheck_existing = false\n");
    let output = monopub(&repo.path().join("apps"), &["publish", "--dry"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("core"));
    assert!(stdout.find("core").unwrap() < stdout.find("web").unwrap());
}

#[test]
fn test_no_recursive_flag_overrides_config() {
    let repo = create_split_repo("[publish]\nrecursive = true\ncheck_existing = false\n");
    let output = monopub(&repo.path().join("apps"), &["publish", "--dry", "--no-recursive"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("web"));
    assert!(!stdout.contains("core"));
}

#[test]
fn test_recursive_flag_overrides_config() {
    let repo = create_split_repo("[publish]\nrecursive = false\ncheck_existing = false\n");
    let output = monopub(&repo.path().join("apps"), &["publish", "--dry", "--recursive"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("core"));
}

#[test]
fn test_later_switch_wins() {
    let repo = create_split_repo("[publish]\ncheck_existing = false\n");
    let output = monopub(
        &repo.path().join("apps"),
        &["publish", "--dry", "--recursive", "--no-recursive"],
    );

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("core"));
}
