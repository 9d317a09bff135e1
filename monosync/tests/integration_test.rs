use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

fn write_package(root: &Path, name: &str, version: &str, deps: &[(&str, &str)]) {
    let dir = root.join("libs").join(name);
    fs::create_dir_all(&dir).unwrap();

    let deps_json = deps
        .iter()
        .map(|(dep, range)| format!("\"{}\": \"{}\"", dep, range))
        .collect::<Vec<_>>()
        .join(", ");
    fs::write(
        dir.join("package.json"),
        format!(
            "{{\"name\": \"{}\", \"version\": \"{}\", \"dependencies\": {{{}}}}}",
            name, version, deps_json
        ),
    )
    .unwrap();
}

fn write_workspace(root: &Path) {
    write_package(root, "util", "1.0.0", &[]);
    write_package(root, "client", "1.0.0", &[("util", "^1.0.0")]);
    fs::write(
        root.join("monosync.yaml"),
        "modules:\n  - 'libs/*/package.json'\n",
    )
    .unwrap();
}

fn get_monosync_binary() -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.pop();
    path.join("target").join("debug").join("monosync")
}

#[test]
#[ignore]
fn test_ls_command() {
    let temp = TempDir::new().unwrap();
    write_workspace(temp.path());

    let output = Command::new(get_monosync_binary())
        .arg("ls")
        .current_dir(temp.path())
        .output()
        .expect("Failed to execute monosync ls");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("util"));
    assert!(stdout.contains("client"));
}

#[test]
#[ignore]
fn test_bump_command_dry_run() {
    let temp = TempDir::new().unwrap();
    write_workspace(temp.path());
    let before = fs::read_to_string(temp.path().join("libs/util/package.json")).unwrap();

    let output = Command::new(get_monosync_binary())
        .args(["bump", "util", "--release", "minor", "--dry-run", "--local"])
        .current_dir(temp.path())
        .output()
        .expect("Failed to execute monosync bump");

    assert!(output.status.success());
    let after = fs::read_to_string(temp.path().join("libs/util/package.json")).unwrap();
    assert_eq!(before, after);
}

#[test]
#[ignore]
fn test_malformed_descriptor_warns_but_exits_clean() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("monosync.yaml"), "modules: [unclosed").unwrap();

    let output = Command::new(get_monosync_binary())
        .arg("ls")
        .current_dir(temp.path())
        .output()
        .expect("Failed to execute monosync ls");

    // A broken config is the user's to fix; report it, don't crash.
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("monosync.yaml"));
}

#[test]
#[ignore]
fn test_delete_command_removes_lockfiles() {
    let temp = TempDir::new().unwrap();
    write_workspace(temp.path());
    fs::write(temp.path().join("libs/util/yarn.lock"), "").unwrap();
    fs::write(temp.path().join("libs/client/yarn.lock"), "").unwrap();

    let output = Command::new(get_monosync_binary())
        .args(["delete", "yarn-lock"])
        .current_dir(temp.path())
        .output()
        .expect("Failed to execute monosync delete");

    assert!(output.status.success());
    assert!(!temp.path().join("libs/util/yarn.lock").exists());
    assert!(!temp.path().join("libs/client/yarn.lock").exists());
}

#[test]
#[ignore]
fn test_delete_dry_run_keeps_files() {
    let temp = TempDir::new().unwrap();
    write_workspace(temp.path());
    fs::write(temp.path().join("libs/util/yarn.lock"), "").unwrap();

    let output = Command::new(get_monosync_binary())
        .args(["delete", "yarn-lock", "--dry-run"])
        .current_dir(temp.path())
        .output()
        .expect("Failed to execute monosync delete");

    assert!(output.status.success());
    assert!(temp.path().join("libs/util/yarn.lock").exists());
}

#[test]
#[ignore]
fn test_build_command_without_typescript_packages() {
    let temp = TempDir::new().unwrap();
    write_workspace(temp.path());

    let output = Command::new(get_monosync_binary())
        .arg("build")
        .current_dir(temp.path())
        .output()
        .expect("Failed to execute monosync build");

    // Nothing to compile is not a failure.
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No packages matched"));
}

#[test]
#[ignore]
fn test_missing_descriptor_fails() {
    let temp = TempDir::new().unwrap();

    let output = Command::new(get_monosync_binary())
        .arg("ls")
        .current_dir(temp.path())
        .output()
        .expect("Failed to execute monosync ls");

    assert!(!output.status.success());
}
