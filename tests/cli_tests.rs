// ABOUTME: Integration tests for the CLI application
// ABOUTME: Runs the built binary against scratch directories and checks exit status and output

use std::process::Command;

mod common;
use common::{files_under, TestEnvironment};

fn sweeper() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_sweeper"));
    command.env_remove("RUST_LOG").arg("--no-color");
    command
}

#[test]
fn test_cli_help_command() {
    let output = sweeper()
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("delete"));
    assert!(stdout.contains("copy"));
}

#[test]
fn test_cli_version_command() {
    let output = sweeper()
        .arg("--version")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[tokio::test]
async fn test_cli_delete_directory() {
    let env = TestEnvironment::new();
    let root = env.seed("data", &["a", "b", "c/d"]).await;

    let output = sweeper()
        .current_dir(env.path())
        .args(["delete", &env.reference("data"), "--parallel", "2"])
        .output()
        .expect("Failed to execute command");

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(files_under(&root).is_empty());

    let logged = String::from_utf8_lossy(&output.stderr);
    assert!(logged.contains("/3] delete: file://"));
    assert!(output.stdout.is_empty());
}

#[tokio::test]
async fn test_cli_list_json() {
    let env = TestEnvironment::new();
    env.seed("data", &["one", "two"]).await;

    let output = sweeper()
        .current_dir(env.path())
        .args(["list", &env.reference("data"), "--json"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let listed: Vec<String> = serde_json::from_str(&stdout).unwrap();
    assert_eq!(listed.len(), 2);
    assert!(listed[0].ends_with("/data/one"));
}

#[test]
fn test_cli_unsupported_provider_fails() {
    let env = TestEnvironment::new();

    let output = sweeper()
        .current_dir(env.path())
        .args(["delete", "k8s://namespace/pod/path"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("k8s not implemented"));
}

#[tokio::test]
async fn test_cli_config_file_sets_parallelism() {
    let env = TestEnvironment::new();
    let root = env.seed("data", &["1", "2", "3", "4"]).await;
    let config = env.path().join("custom.yaml");
    std::fs::write(&config, "parallelism: 0\nlogging:\n  level: info\n  format: compact\n").unwrap();

    let output = sweeper()
        .current_dir(env.path())
        .args([
            "--config",
            config.to_str().unwrap(),
            "delete",
            &env.reference("data"),
        ])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    assert!(files_under(&root).is_empty());
}
