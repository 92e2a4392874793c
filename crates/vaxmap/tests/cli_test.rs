//! Integration tests for the `vaxmap` CLI binary.
//!
//! These tests validate argument parsing, help output, offline commands,
//! config handling and error exit codes. Backend-bound commands run
//! against a wiremock server.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `vaxmap` binary with env isolation.
///
/// Clears all `VAXMAP_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn vaxmap_cmd() -> assert_cmd::Command {
    isolated_cmd("/tmp/vaxmap-cli-test-nonexistent")
}

fn isolated_cmd(home: &str) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("vaxmap");
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("VAXMAP_PROFILE")
        .env_remove("VAXMAP_BACKEND")
        .env_remove("VAXMAP_OUTPUT")
        .env_remove("VAXMAP_INSECURE")
        .env_remove("VAXMAP_TIMEOUT");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = vaxmap_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    vaxmap_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("vaccine sites")
            .and(predicate::str::contains("search"))
            .and(predicate::str::contains("markers"))
            .and(predicate::str::contains("classify")),
    );
}

#[test]
fn test_version_flag() {
    vaxmap_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("vaxmap"));
}

#[test]
fn test_unknown_category_is_usage_error() {
    vaxmap_cmd()
        .args(["sites", "--category", "purple"])
        .assert()
        .code(2);
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    vaxmap_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("vaxmap"));
}

// ── Offline commands ────────────────────────────────────────────────

#[test]
fn test_classify_mass_vaccination_site() {
    vaxmap_cmd()
        .args([
            "classify",
            "--availability",
            "120 doses",
            "--name",
            "Foxborough: Gillette Stadium",
            "-o",
            "plain",
        ])
        .assert()
        .success()
        .stdout("mass_vaccination_site\n");
}

#[test]
fn test_classify_without_availability() {
    vaxmap_cmd()
        .args(["classify", "--name", "Foxborough: Gillette Stadium", "-o", "plain"])
        .assert()
        .success()
        .stdout("no_availability\n");
}

#[test]
fn test_classify_json() {
    let output = vaxmap_cmd()
        .args([
            "classify",
            "--availability",
            "Yes",
            "--serves",
            "All eligible people statewide",
            "-o",
            "json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        value,
        json!({
            "category": "statewide_eligible",
            "label": "statewide eligible",
            "pin_class": "star star-green",
        })
    );
}

#[test]
fn test_zoom_for_radius() {
    vaxmap_cmd()
        .args(["zoom", "3", "-o", "plain"])
        .assert()
        .success()
        .stdout("12\n");
}

#[test]
fn test_zoom_table() {
    vaxmap_cmd()
        .args(["zoom"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Miles").and(predicate::str::contains("17")));
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_path() {
    vaxmap_cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_use_missing_profile() {
    let output = vaxmap_cmd().args(["config", "use", "nope"]).output().unwrap();
    assert_eq!(output.status.code(), Some(4));
    let text = combined_output(&output);
    assert!(text.contains("Profile 'nope' not found"), "{text}");
    assert!(text.contains("Available profiles: (none)"), "{text}");
}

#[test]
fn test_config_set_then_profiles() {
    let home = tempfile::tempdir().unwrap();
    let home = home.path().to_str().unwrap();

    isolated_cmd(home)
        .args(["config", "set", "backend", "http://localhost:8080/"])
        .assert()
        .success();

    isolated_cmd(home)
        .args(["config", "profiles"])
        .assert()
        .success()
        .stdout("default *\n");

    isolated_cmd(home)
        .args(["config", "set", "timeout", "soon"])
        .assert()
        .code(2);
}

// ── Backend errors ──────────────────────────────────────────────────

#[test]
fn test_sites_without_backend() {
    let output = vaxmap_cmd().arg("sites").output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(text.contains("No backend configured"), "{text}");
}

#[test]
fn test_sites_with_invalid_backend() {
    vaxmap_cmd()
        .args(["sites", "--backend", "ftp://example.org/"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("backend"));
}

#[test]
fn test_connection_refused() {
    vaxmap_cmd()
        .args(["sites", "--backend", "http://127.0.0.1:9/", "--timeout", "5"])
        .assert()
        .code(7);
}

// ── Against a mock backend ──────────────────────────────────────────

fn raw_sites() -> Value {
    json!([
        {
            "id": "gillette",
            "name": "Foxborough: Gillette Stadium",
            "address": "1 Patriot Pl, Foxborough, MA",
            "serves": "Eligible populations",
            "availability": "500 doses",
            "lastUpdated": 1_615_000_000_000_u64,
            "bookAppointmentInfo": "www.maimmunizations.org",
            "latitude": 42.0909,
            "longitude": -71.2643
        },
        {
            "id": "library",
            "name": "Town Library",
            "availability": "",
            "latitude": 42.3,
            "longitude": -71.1
        }
    ])
}

async fn backend() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/initmap"))
        .respond_with(ResponseTemplate::new(200).set_body_json(raw_sites()))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/search_query_location"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "lat": 42.06,
            "lng": -71.25,
            "siteData": raw_sites(),
        })))
        .mount(&server)
        .await;
    server
}

async fn run(args: Vec<String>) -> std::process::Output {
    run_with_env(args, &[]).await
}

async fn run_with_env(args: Vec<String>, env: &[(&str, &str)]) -> std::process::Output {
    let env: Vec<(String, String)> = env
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect();
    tokio::task::spawn_blocking(move || {
        let mut cmd = vaxmap_cmd();
        for (key, value) in env {
            cmd.env(key, value);
        }
        cmd.args(args).output().unwrap()
    })
    .await
    .unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_sites_skip_unavailable() {
    let server = backend().await;
    let output = run(vec![
        "sites".into(),
        "--backend".into(),
        server.uri(),
        "-o".into(),
        "plain".into(),
    ])
    .await;
    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "gillette\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_sites_all_json() {
    let server = backend().await;
    let output = run(vec![
        "sites".into(),
        "--all".into(),
        "--backend".into(),
        server.uri(),
        "-o".into(),
        "json".into(),
    ])
    .await;
    assert!(output.status.success(), "{}", combined_output(&output));

    let sites: Value = serde_json::from_slice(&output.stdout).unwrap();
    let sites = sites.as_array().unwrap();
    assert_eq!(sites.len(), 2);
    assert_eq!(sites[0]["pin_category"], "mass_vaccination_site");
    assert_eq!(sites[0]["last_updated"], "March 6, 2021, 3:06 AM");
    assert_eq!(sites[1]["pin_category"], "no_availability");
    assert_eq!(sites[1]["last_updated"], "unknown");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_search_reports_focus_and_zoom() {
    let server = backend().await;
    let output = run(vec![
        "search".into(),
        "Foxborough".into(),
        "--miles".into(),
        "10".into(),
        "--backend".into(),
        server.uri(),
        "-o".into(),
        "json".into(),
    ])
    .await;
    assert!(output.status.success(), "{}", combined_output(&output));

    let result: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result["focus"], json!({ "lat": 42.06, "lng": -71.25 }));
    assert_eq!(result["zoom"], 11);
    assert_eq!(result["sites"].as_array().unwrap().len(), 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_show_site_popup() {
    let server = backend().await;
    let output = run(vec![
        "show".into(),
        "gillette".into(),
        "--backend".into(),
        server.uri(),
    ])
    .await;
    assert!(output.status.success(), "{}", combined_output(&output));

    let text = String::from_utf8_lossy(&output.stdout);
    assert!(text.starts_with("Foxborough: Gillette Stadium\n"), "{text}");
    assert!(text.contains("Category: mass vaccination site"), "{text}");
    assert!(
        text.contains("(Availability last updated March 6, 2021, 3:06 AM)"),
        "{text}"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_show_unknown_site() {
    let server = backend().await;
    let output = run(vec![
        "show".into(),
        "nope".into(),
        "--backend".into(),
        server.uri(),
    ])
    .await;
    assert_eq!(output.status.code(), Some(4));
    assert!(combined_output(&output).contains("site 'nope' not found"));
}

const INCLUDE_UNAVAILABLE: (&str, &str) = ("VAXMAP_DEFAULTS__INCLUDE_UNAVAILABLE", "true");

#[tokio::test(flavor = "multi_thread")]
async fn test_search_without_location_honors_include_unavailable() {
    let server = backend().await;
    let args = |cmd: &str| {
        vec![
            cmd.to_owned(),
            "--backend".into(),
            server.uri(),
            "-o".into(),
            "plain".into(),
        ]
    };

    let sites = run_with_env(args("sites"), &[INCLUDE_UNAVAILABLE]).await;
    let search = run_with_env(args("search"), &[INCLUDE_UNAVAILABLE]).await;
    assert!(search.status.success(), "{}", combined_output(&search));

    assert_eq!(String::from_utf8_lossy(&sites.stdout), "gillette\nlibrary\n");
    assert_eq!(
        String::from_utf8_lossy(&search.stdout),
        String::from_utf8_lossy(&sites.stdout)
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_search_sends_all_when_configured() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search_query_location"))
        .and(body_partial_json(json!({ "address": "Foxborough", "availability": "all" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "lat": 42.06,
            "lng": -71.25,
            "siteData": raw_sites(),
        })))
        .expect(1)
        .mount(&server)
        .await;

    let output = run_with_env(
        vec![
            "search".into(),
            "Foxborough".into(),
            "--backend".into(),
            server.uri(),
            "-o".into(),
            "plain".into(),
        ],
        &[INCLUDE_UNAVAILABLE],
    )
    .await;
    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "gillette\nlibrary\n");
}
