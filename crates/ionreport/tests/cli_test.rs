//! Integration tests for the `ionreport` binary.
//!
//! Argument handling and credential errors run without a controller; the
//! end-to-end cases point the binary at a wiremock server.
#![allow(clippy::unwrap_used)]

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TENANT: &str = "1001";
const TOKEN: &str = "good-token";

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `ionreport` binary with env isolation.
///
/// Clears every variable the binary reads and points config directories at
/// `home` so tests never touch the user's real configuration.
fn ionreport_cmd(home: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("ionreport");
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("X_AUTH_TOKEN")
        .env_remove("AUTH_TOKEN")
        .env_remove("IONREPORT_CONTROLLER")
        .env_remove("IONREPORT_TIMEOUT")
        .env_remove("IONREPORT_INSECURE")
        .env_remove("IONREPORT_CA_CERT")
        .env_remove("IONREPORT_CSVFILE")
        .env_remove("IONREPORT_MAX_LOGIN_ATTEMPTS")
        .current_dir(home)
        .write_stdin("");
    cmd
}

/// Mount a controller with one site, one element, one interface and a
/// single interface policy extension. Logout must be called exactly once.
async fn mount_controller(server: &MockServer, extensions_status: u16) {
    let tenant_base = format!("/api/tenants/{TENANT}");

    Mock::given(method("GET"))
        .and(path("/v2.1/api/profile"))
        .and(header("X-Auth-Token", TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tenant_id": TENANT,
            "email": "ops@example.com"
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2.1/api/profile"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "_error": [{ "code": "UNAUTHORIZED", "message": "invalid token" }]
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/v2.3{tenant_base}")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "id": TENANT, "name": "Acme" })),
        )
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/v4.7{tenant_base}/sites")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 1,
            "items": [{ "id": "S1", "name": "HQ" }]
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/v3.0{tenant_base}/elements")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 1,
            "items": [{ "id": "E1", "site_id": "S1", "name": "ion-1", "serial_number": "SN1" }]
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!(
            "/v4.15{tenant_base}/sites/S1/elements/E1/interfaces"
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 1,
            "items": [{ "id": "IF1", "name": "ge0/0" }]
        })))
        .mount(server)
        .await;

    let extensions = if extensions_status == 200 {
        ResponseTemplate::new(200).set_body_json(json!({
            "count": 2,
            "items": [
                {
                    "id": "X1",
                    "namespace": "devicemanagement/interface",
                    "entity_id": "IF1",
                    "name": "R1",
                    "disabled": false,
                    "conf": { "rules": [
                        { "prefix": "10.0.0.0/8", "app": "any", "action": "allow" }
                    ] }
                },
                { "id": "X2", "namespace": "dnsservice/config", "conf": {} }
            ]
        }))
    } else {
        ResponseTemplate::new(extensions_status).set_body_json(json!({
            "_error": [{ "code": "INTERNAL", "message": "boom" }]
        }))
    };
    Mock::given(method("GET"))
        .and(path(format!(
            "/v2.0{tenant_base}/sites/S1/elements/E1/extensions"
        )))
        .respond_with(extensions)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2.0/api/logout"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(server)
        .await;
}

/// Run a blocking command off the async runtime so the mock server keeps
/// serving while the binary is running.
async fn run_blocking(mut cmd: assert_cmd::Command) -> std::process::Output {
    tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap()
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_help_flag() {
    let home = tempfile::tempdir().unwrap();
    ionreport_cmd(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("--authtokenfile")
                .and(predicate::str::contains("--csvfile"))
                .and(predicate::str::contains("--token")),
        );
}

#[test]
fn test_version_flag() {
    let home = tempfile::tempdir().unwrap();
    ionreport_cmd(home.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("ionreport"));
}

#[test]
fn test_unknown_flag_is_usage_error() {
    let home = tempfile::tempdir().unwrap();
    ionreport_cmd(home.path())
        .arg("--bogus")
        .assert()
        .code(2);
}

// ── Credential errors ───────────────────────────────────────────────

#[test]
fn test_missing_token_file_fails() {
    let home = tempfile::tempdir().unwrap();
    ionreport_cmd(home.path())
        .args(["--controller", "http://127.0.0.1:9"])
        .args(["--authtokenfile", "does-not-exist.txt"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("does-not-exist.txt"));
}

#[test]
fn test_no_token_without_terminal_fails_fast() {
    let home = tempfile::tempdir().unwrap();
    ionreport_cmd(home.path())
        .args(["--controller", "http://127.0.0.1:9"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("not a terminal"));
}

#[test]
fn test_invalid_controller_url_is_usage_error() {
    let home = tempfile::tempdir().unwrap();
    ionreport_cmd(home.path())
        .args(["--controller", "not a url", "--token", TOKEN])
        .assert()
        .code(2);
}

// ── End to end ──────────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_report_written_with_token_flag() {
    let server = MockServer::start().await;
    mount_controller(&server, 200).await;
    let home = tempfile::tempdir().unwrap();

    let mut cmd = ionreport_cmd(home.path());
    cmd.args(["--controller", &server.uri(), "--token", TOKEN])
        .args(["--csvfile", "out.csv"]);
    let output = run_blocking(cmd).await;

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "{output:?}");
    assert!(stdout.contains("======== TENANT NAME Acme ========"), "{stdout}");
    assert!(stdout.contains("Wrote to CSV File: out.csv - 1 rows"), "{stdout}");

    let csv = std::fs::read_to_string(home.path().join("out.csv")).unwrap();
    assert_eq!(
        csv,
        "ION-Name,ION-Interface,Rule-Name,Rule-Status,Rule-Prefix,Rule-App,Rule-Action\r\n\
         ion-1,ge0/0,R1,Enabled,10.0.0.0/8,any,allow\r\n"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_env_token_and_default_csv_path() {
    let server = MockServer::start().await;
    mount_controller(&server, 200).await;
    let home = tempfile::tempdir().unwrap();

    let mut cmd = ionreport_cmd(home.path());
    cmd.args(["--controller", &server.uri(), "--quiet"])
        .env("X_AUTH_TOKEN", TOKEN)
        .env("AUTH_TOKEN", "ignored");
    let output = run_blocking(cmd).await;

    assert!(output.status.success(), "{output:?}");
    assert!(output.stdout.is_empty());
    assert!(home.path().join("element-policy-mapping.csv").exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_rejected_token_exits_with_auth_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2.1/api/profile"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "_error": [{ "code": "UNAUTHORIZED", "message": "invalid token" }]
        })))
        .mount(&server)
        .await;
    let home = tempfile::tempdir().unwrap();

    let mut cmd = ionreport_cmd(home.path());
    cmd.args(["--controller", &server.uri(), "--token", "bad-token"]);
    let output = run_blocking(cmd).await;

    assert_eq!(output.status.code(), Some(3), "{output:?}");
    assert!(!home.path().join("element-policy-mapping.csv").exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_failed_element_is_reported_and_skipped() {
    let server = MockServer::start().await;
    mount_controller(&server, 500).await;
    let home = tempfile::tempdir().unwrap();

    let mut cmd = ionreport_cmd(home.path());
    cmd.args(["--controller", &server.uri(), "--token", TOKEN]);
    let output = run_blocking(cmd).await;

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success(), "{output:?}");
    assert!(stderr.contains("Skipped 1 element(s)"), "{stderr}");
    assert!(stderr.contains("element E1 (site S1)"), "{stderr}");

    let csv = std::fs::read_to_string(home.path().join("element-policy-mapping.csv")).unwrap();
    assert_eq!(
        csv,
        "ION-Name,ION-Interface,Rule-Name,Rule-Status,Rule-Prefix,Rule-App,Rule-Action\r\n"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_strict_failure_exits_nonzero_and_logs_out() {
    let server = MockServer::start().await;
    mount_controller(&server, 500).await;
    let home = tempfile::tempdir().unwrap();

    let mut cmd = ionreport_cmd(home.path());
    cmd.args(["--controller", &server.uri(), "--token", TOKEN, "--strict"]);
    let output = run_blocking(cmd).await;

    assert_eq!(output.status.code(), Some(1), "{output:?}");
    assert!(!home.path().join("element-policy-mapping.csv").exists());
    // logout `expect(1)` is verified when `server` drops
}
