//! Integration tests for the retrial CLI

use std::path::Path;
use std::process::{Command, Output};
use tempfile::{tempdir, TempDir};

const MANIFEST: &str = r#"
[[dependency]]
group = "com.example"
name = "core"
version = "1.0"
path = "libs/core-1.0.jar"
"#;

fn project() -> TempDir {
    let temp = tempdir().expect("tempdir");
    std::fs::create_dir_all(temp.path().join("libs")).unwrap();
    std::fs::write(temp.path().join("libs/core-1.0.jar"), b"core bytes").unwrap();
    std::fs::write(temp.path().join("retrial-dependencies.toml"), MANIFEST).unwrap();
    temp
}

fn retrial(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_retrial"))
        .current_dir(dir)
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("RETRIAL_CHECKSUM_FILE")
        .env_remove("RETRIAL_MANIFEST")
        .env_remove("RETRIAL_REPOSITORY")
        .env_remove("RETRIAL_MAX_CONCURRENCY")
        .env_remove("RETRIAL_COLOR")
        .env_remove("RETRIAL_OUTPUT")
        .env("XDG_CONFIG_HOME", dir)
        .output()
        .expect("Failed to execute retrial")
}

fn stdout_json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

#[test]
fn test_cli_version() {
    let temp = tempdir().unwrap();
    let output = retrial(temp.path(), &["--version"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("retrial"));
}

#[test]
fn test_cli_help() {
    let temp = tempdir().unwrap();
    let output = retrial(temp.path(), &["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("verify"));
    assert!(stdout.contains("record"));
}

#[test]
fn test_cli_invalid_command() {
    let temp = tempdir().unwrap();
    let output = retrial(temp.path(), &["invalid-command"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unrecognized subcommand"));
}

#[test]
fn test_record_then_verify() {
    let temp = project();

    let recorded = retrial(temp.path(), &["--json", "record"]);
    assert_eq!(recorded.status.code(), Some(0));
    assert_eq!(stdout_json(&recorded)["type"], "recorded");
    assert!(temp.path().join("retrial-checksums.json").exists());

    let verified = retrial(temp.path(), &["--json", "verify"]);
    assert_eq!(verified.status.code(), Some(0));
    let json = stdout_json(&verified);
    assert_eq!(json["type"], "verified");
    assert_eq!(json["data"]["verified"], 1);
}

#[test]
fn test_mismatch_exits_with_one() {
    let temp = project();
    assert_eq!(retrial(temp.path(), &["record"]).status.code(), Some(0));

    std::fs::write(temp.path().join("libs/core-1.0.jar"), b"tampered").unwrap();

    let output = retrial(temp.path(), &["--json", "verify"]);
    assert_eq!(output.status.code(), Some(1));
    let json = stdout_json(&output);
    assert_eq!(json["type"], "dependencies_changed");
    assert!(json["data"]["changed_dependencies"]["com.example:core:1.0"]["expected"].is_string());
}

#[test]
fn test_mismatch_is_explained_on_the_console() {
    let temp = project();
    let output = retrial(temp.path(), &["--color", "never", "verify"]);

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("com.example:core:1.0"));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("retrial record"));
}

#[test]
fn test_empty_artifact_exits_with_two() {
    let temp = project();
    std::fs::write(temp.path().join("libs/core-1.0.jar"), b"").unwrap();

    let output = retrial(temp.path(), &["verify"]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("empty file"));
}

#[test]
fn test_missing_manifest_exits_with_two() {
    let temp = tempdir().unwrap();
    let output = retrial(temp.path(), &["--json", "verify"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
}
