//! Integration tests for the `usmctl` binary.
//!
//! Offline tests cover argument parsing, help, completions and usage errors.
//! The rest drive the binary against a wiremock tenant.
#![allow(clippy::unwrap_used)]

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

const ISOLATED_VARS: &[&str] = &[
    "USM_PROFILE",
    "USM_HOST",
    "USM_USERNAME",
    "USM_PASSWORD",
    "USM_API_VERSION",
    "USM_INSECURE",
    "USM_TIMEOUT",
    "USM_OUTPUT",
    "USM_ACTIVATION_CODE",
    "ALIENVAULT_FQDN",
    "ALIENVAULT_USERNAME",
    "ALIENVAULT_PASSWORD",
    "RUST_LOG",
];

/// Build a command whose config lookups land in `home`.
fn usmctl(home: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("usmctl");
    cmd.env("HOME", home).env("XDG_CONFIG_HOME", home.join(".config"));
    for var in ISOLATED_VARS {
        cmd.env_remove(var);
    }
    cmd
}

fn offline() -> (tempfile::TempDir, assert_cmd::Command) {
    let home = tempfile::tempdir().unwrap();
    let cmd = usmctl(home.path());
    (home, cmd)
}

fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

async fn tenant() -> MockServer {
    let server = MockServer::start().await;
    for (verb, route) in [("GET", "/"), ("POST", "/api/1.0/login"), ("GET", "/api/1.0/")] {
        Mock::given(method(verb))
            .and(path(route))
            .respond_with(
                ResponseTemplate::new(200).insert_header("Set-Cookie", "XSRF-TOKEN=t0k; Path=/"),
            )
            .mount(&server)
            .await;
    }
    server
}

/// Run against `server` with credentials on the command line / env.
async fn run_against(server: &MockServer, args: &[&str]) -> std::process::Output {
    let home = tempfile::tempdir().unwrap();
    let mut cmd = usmctl(home.path());
    cmd.args(["--host", &server.uri(), "--username", "ops@example.com"])
        .env("USM_PASSWORD", "hunter22")
        .args(args);
    tokio::task::spawn_blocking(move || {
        let output = cmd.output().unwrap();
        drop(home);
        output
    })
    .await
    .unwrap()
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let (_home, mut cmd) = offline();
    let output = cmd.output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("Usage"));
}

#[test]
fn test_help_lists_command_groups() {
    let (_home, mut cmd) = offline();
    cmd.arg("--help").assert().success().stdout(
        predicate::str::contains("sensors")
            .and(predicate::str::contains("keys"))
            .and(predicate::str::contains("jobs"))
            .and(predicate::str::contains("license")),
    );
}

#[test]
fn test_sensors_help_lists_provision() {
    let (_home, mut cmd) = offline();
    cmd.args(["sensors", "--help"]).assert().success().stdout(
        predicate::str::contains("provision").and(predicate::str::contains("sweep")),
    );
}

#[test]
fn test_version_flag() {
    let (_home, mut cmd) = offline();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("usmctl"));
}

#[test]
fn test_password_flag_is_hidden() {
    let (_home, mut cmd) = offline();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--password").not());
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_work_offline() {
    for shell in ["bash", "zsh", "fish"] {
        let (_home, mut cmd) = offline();
        cmd.args(["completions", shell])
            .assert()
            .success()
            .stdout(predicate::str::is_empty().not());
    }
}

// ── Usage errors ────────────────────────────────────────────────────

#[test]
fn test_missing_host_is_a_usage_error() {
    let (_home, mut cmd) = offline();
    cmd.args(["sensors", "list"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No tenant host configured"));
}

#[test]
fn test_unknown_profile_is_a_usage_error() {
    let (_home, mut cmd) = offline();
    cmd.args(["-p", "staging", "license", "show"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("staging"));
}

#[test]
fn test_unsupported_api_version_is_rejected_by_parser() {
    let (_home, mut cmd) = offline();
    cmd.args(["--api-version", "3", "license", "show"])
        .assert()
        .code(2);
}

#[test]
fn test_unknown_job_kind_is_rejected_by_parser() {
    let (_home, mut cmd) = offline();
    cmd.args(["jobs", "list", "--kind", "lambda"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("lambda"));
}

// ── Against a mock tenant ───────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_license_show_as_json() {
    let server = tenant().await;
    Mock::given(method("GET"))
        .and(path("/api/1.0/license"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "controlNodesAllowed": 1,
            "sensorNodesAllowed": 7,
            "monthlyKBStorage": 1024,
            "expiration": 4_102_444_800_i64
        })))
        .expect(1)
        .mount(&server)
        .await;

    let output = run_against(&server, &["license", "show", "-o", "json"]).await;
    assert!(output.status.success(), "{}", combined_output(&output));

    let body: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(body["sensor_node_limit"], 7);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_sensors_list_plain_prints_ids() {
    let server = tenant().await;
    Mock::given(method("GET"))
        .and(path("/api/1.0/sensors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"uuid": "s-1", "name": "edge-a", "status": "Ready", "setupStatus": "Complete"},
            {"uuid": "s-2", "name": "edge-b", "status": "Connection lost", "setupStatus": "Complete"}
        ])))
        .mount(&server)
        .await;

    let output = run_against(&server, &["sensors", "list", "-o", "plain"]).await;
    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "s-1\ns-2\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_rejected_login_exits_with_auth_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/1.0/login"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad credentials"))
        .mount(&server)
        .await;

    let output = run_against(&server, &["license", "show"]).await;
    assert_eq!(output.status.code(), Some(3), "{}", combined_output(&output));
    assert!(!combined_output(&output).contains("hunter22"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_provision_rejects_malformed_ip() {
    let server = tenant().await;

    let output = run_against(
        &server,
        &["sensors", "provision", "--ip", "1.1.1", "--name", "edge"],
    )
    .await;
    assert_eq!(output.status.code(), Some(2), "{}", combined_output(&output));
    assert!(combined_output(&output).contains("valid IP"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_delete_without_yes_refuses_when_not_interactive() {
    let server = tenant().await;
    Mock::given(method("GET"))
        .and(path("/api/1.0/sensors/key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "k-123456", "createdAt": 1_700_000_000, "expires": 1_700_086_400}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/1.0/sensors/key/k-123456"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let output = run_against(&server, &["keys", "delete", "k-123456"]).await;
    assert_eq!(output.status.code(), Some(2), "{}", combined_output(&output));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_profile_from_config_file() {
    let server = tenant().await;
    Mock::given(method("GET"))
        .and(path("/api/1.0/sensors/key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "k-free", "createdAt": 1_700_000_000, "expires": 1_700_086_400},
            {"id": "k-used", "createdAt": 1_700_000_000, "expires": 1_700_086_400, "nodeId": "n-1"}
        ])))
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    let config_dir = home.path().join(".config").join("usmctl");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config.toml"),
        format!(
            "[defaults]\noutput = \"plain\"\n\n[profiles.lab]\nhost = \"{}\"\nusername = \"ops@example.com\"\npassword = \"hunter22\"\n",
            server.uri()
        ),
    )
    .unwrap();

    let mut cmd = usmctl(home.path());
    cmd.args(["-p", "lab", "keys", "list", "--unconsumed"]);
    let output = tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap();

    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "k-free\n");
}
