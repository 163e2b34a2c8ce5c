#![allow(clippy::unwrap_used, clippy::expect_used)]

//! CLI smoke tests for the casemall-server binary.

use std::io::Write;
use std::process::{Command, Stdio};
use std::time::Duration;

use tempfile::NamedTempFile;

fn run_casemall_server(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_casemall-server"))
        .args(args)
        .env_remove("RUST_LOG")
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("Failed to execute casemall-server")
}

fn config_file(yaml: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    file.write_all(yaml.as_bytes()).unwrap();
    file
}

#[test]
fn test_cli_help_command() {
    let output = run_casemall_server(&["--help"]);

    assert!(output.status.success(), "Help command should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage:"), "Should contain usage information");
    assert!(stdout.contains("run"), "Should contain 'run' subcommand");
    assert!(stdout.contains("check"), "Should contain 'check' subcommand");
    assert!(stdout.contains("--config"), "Should mention config option");
}

#[test]
fn test_missing_config_file_fails() {
    let output = run_casemall_server(&["--config", "/nonexistent/casemall.yaml", "check"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("config file does not exist"), "stderr: {stderr}");
}

#[test]
fn test_check_prints_effective_config() {
    let file = config_file("casemall:\n  default_page_size: 24\n  max_page_size: 48\n");
    let output = run_casemall_server(&["--config", file.path().to_str().unwrap(), "check"]);

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Configuration is valid"));
    assert!(stdout.contains("default_page_size: 24"));
}

#[test]
fn test_print_config_applies_cli_overrides() {
    let output = run_casemall_server(&["--print-config", "--mock", "--port", "9123"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("127.0.0.1:9123"));
    assert!(stdout.contains("sqlite::memory:"));
}

#[test]
fn test_invalid_casemall_section_is_rejected() {
    let file = config_file("casemall:\n  default_page_size: 50\n  max_page_size: 10\n");
    let output = run_casemall_server(&["--config", file.path().to_str().unwrap(), "check"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("max_page_size"), "stderr: {stderr}");
}

#[tokio::test]
async fn test_mock_server_keeps_running() {
    let images = tempfile::tempdir().unwrap();
    let yaml = format!(
        "server:\n  bind_addr: \"127.0.0.1:0\"\ncasemall:\n  image_dir: \"{}\"\n",
        images.path().display()
    );
    let file = config_file(&yaml);

    let mut child = tokio::process::Command::new(env!("CARGO_BIN_EXE_casemall-server"))
        .args(["--config", file.path().to_str().unwrap(), "--mock", "run"])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()
        .unwrap();

    // the server keeps running until signalled
    let waited = tokio::time::timeout(Duration::from_secs(2), child.wait()).await;
    assert!(waited.is_err(), "server exited early");
    child.kill().await.unwrap();
}
