//! Integration tests for the `scoreboard` CLI binary.
//!
//! Argument parsing, completions, and config handling run offline; player
//! commands run against a wiremock server standing in for the backend.
#![allow(clippy::unwrap_used)]

use std::process::Output;

use assert_cmd::assert::OutputAssertExt;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::{Value, json};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `scoreboard` binary with env isolation.
///
/// Clears all `SCOREBOARD_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn scoreboard_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("scoreboard");
    cmd.env("HOME", "/tmp/scoreboard-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/scoreboard-cli-test-nonexistent")
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("SCOREBOARD_CONFIG")
        .env_remove("SCOREBOARD_SERVER")
        .env_remove("SCOREBOARD_OUTPUT")
        .env_remove("SCOREBOARD_TIMEOUT")
        .env_remove("SCOREBOARD_ALLOW_NEGATIVE")
        .env_remove("SCOREBOARD_INSECURE")
        .write_stdin("");
    cmd
}

/// A command aimed at `server`.
fn against(server: &MockServer) -> assert_cmd::Command {
    let mut cmd = scoreboard_cmd();
    cmd.args(["--server", &server.uri()]);
    cmd
}

/// Run off the async runtime so the mock server keeps answering.
async fn run(mut cmd: assert_cmd::Command) -> Output {
    tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap()
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

fn stdout_json(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

async fn mount_roster(server: &MockServer) {
    // Unordered on purpose: the CLI sorts.
    Mock::given(method("GET"))
        .and(path("/api/players"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 2, "player": "Bo", "points": 5 },
            { "id": 1, "player": "Ann", "points": 10 },
        ])))
        .mount(server)
        .await;
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = scoreboard_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    scoreboard_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("players")
            .and(predicate::str::contains("admin"))
            .and(predicate::str::contains("health")),
    );
}

#[test]
fn test_version_flag() {
    scoreboard_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("scoreboard"));
}

#[test]
fn test_players_subcommands_exist() {
    scoreboard_cmd()
        .args(["players", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("list")
                .and(predicate::str::contains("add"))
                .and(predicate::str::contains("edit"))
                .and(predicate::str::contains("remove")),
        );
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    scoreboard_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    scoreboard_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_invalid_output_format() {
    let output = scoreboard_cmd()
        .args(["--output", "invalid", "players", "list"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let text = combined_output(&output);
    assert!(
        text.contains("invalid") || text.contains("possible values"),
        "Expected error about valid output formats:\n{text}"
    );
}

#[test]
fn test_invalid_server_url_is_usage_error() {
    scoreboard_cmd()
        .args(["--server", "not a url", "players", "list"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("server"));
}

#[test]
fn test_unreachable_server_is_connection_error() {
    scoreboard_cmd()
        .args(["--server", "http://127.0.0.1:9", "--timeout", "2", "players", "list"])
        .assert()
        .code(7);
}

#[test]
fn test_admin_requires_terminal() {
    scoreboard_cmd()
        .args(["--server", "http://127.0.0.1:9", "admin"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("interactive terminal"));
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_path_honors_flag() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("board.toml");
    scoreboard_cmd()
        .args(["--config", file.to_str().unwrap(), "config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("board.toml"));
}

#[test]
fn test_config_show_without_file_uses_defaults() {
    scoreboard_cmd()
        .args(["config", "show", "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("http://localhost:3001"));
}

#[test]
fn test_config_init_writes_then_refuses_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("config.toml");
    let file_arg = file.to_str().unwrap();

    scoreboard_cmd()
        .args(["--config", file_arg, "-y", "--server", "http://scores:4000"])
        .args(["config", "init"])
        .assert()
        .success();
    let written = std::fs::read_to_string(&file).unwrap();
    assert!(written.contains("http://scores:4000"), "{written}");

    scoreboard_cmd()
        .args(["--config", file_arg, "-y", "config", "init"])
        .assert()
        .code(6);

    scoreboard_cmd()
        .args(["--config", file_arg, "config", "show", "-o", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("http://scores:4000"));
}

#[test]
fn test_config_file_output_default_applies() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("config.toml");
    std::fs::write(&file, "[defaults]\noutput = \"yaml\"\n").unwrap();

    scoreboard_cmd()
        .args(["--config", file.to_str().unwrap(), "config", "show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("server:").and(predicate::str::contains("localhost:3001")),
        );
}

// ── Players against a mock server ───────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_players_list_sorted_json() {
    let server = MockServer::start().await;
    mount_roster(&server).await;

    let mut cmd = against(&server);
    cmd.args(["-o", "json", "players", "list"]);
    let output = run(cmd).await;

    output.clone().assert().success();
    assert_eq!(
        stdout_json(&output),
        json!([
            { "id": 1, "name": "Ann", "points": 10 },
            { "id": 2, "name": "Bo", "points": 5 },
        ])
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_players_list_table() {
    let server = MockServer::start().await;
    mount_roster(&server).await;

    let mut cmd = against(&server);
    cmd.args(["players", "list"]);
    let output = run(cmd).await;

    output.clone().assert().success();
    let text = String::from_utf8_lossy(&output.stdout);
    assert!(text.contains("Ann") && text.contains("Bo"), "{text}");
    assert!(text.find("Ann") < text.find("Bo"), "{text}");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_players_list_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/players"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "error": "db down" })))
        .mount(&server)
        .await;

    let mut cmd = against(&server);
    cmd.args(["players", "list"]);
    let output = run(cmd).await;

    output.clone().assert().code(7);
    assert!(combined_output(&output).contains("db down"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_players_add_sends_trimmed_name() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/players"))
        .and(body_json(json!({ "player": "Cy", "points": 0 })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({ "id": 3, "player": "Cy", "points": 0 })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut cmd = against(&server);
    cmd.args(["-o", "plain", "players", "add", "  Cy "]);
    let output = run(cmd).await;

    output.assert().success().stdout("3\tCy\t0\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_players_add_blank_name_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/players"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let mut cmd = against(&server);
    cmd.args(["players", "add", "   "]);
    let output = run(cmd).await;

    output.clone().assert().code(2);
    assert!(combined_output(&output).contains("name"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_players_edit_increments_and_saves() {
    let server = MockServer::start().await;
    mount_roster(&server).await;
    Mock::given(method("PUT"))
        .and(path("/api/players/2"))
        .and(body_json(json!({ "points": 8 })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "id": 2, "player": "Bo", "points": 8 })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut cmd = against(&server);
    cmd.args(["-o", "json", "players", "edit", "2", "--inc", "3"]);
    let output = run(cmd).await;

    output.clone().assert().success();
    assert_eq!(stdout_json(&output)["points"], 8);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_players_edit_unparseable_set_saves_zero() {
    let server = MockServer::start().await;
    mount_roster(&server).await;
    Mock::given(method("PUT"))
        .and(path("/api/players/1"))
        .and(body_json(json!({ "points": 0 })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "id": 1, "player": "Ann", "points": 0 })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut cmd = against(&server);
    cmd.args(["players", "edit", "1", "--set", "abc"]);
    let output = run(cmd).await;

    output
        .assert()
        .success()
        .stdout(predicate::str::contains("Ann (id 1): 10 -> 0"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_players_edit_dry_run_sends_nothing() {
    let server = MockServer::start().await;
    mount_roster(&server).await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut cmd = against(&server);
    cmd.args(["players", "edit", "2", "--dec", "2", "--dry-run"]);
    let output = run(cmd).await;

    output
        .assert()
        .success()
        .stdout(predicate::str::contains("5 -> 3").and(predicate::str::contains("not saved")));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_players_edit_unknown_id_is_not_found() {
    let server = MockServer::start().await;
    mount_roster(&server).await;

    let mut cmd = against(&server);
    cmd.args(["players", "edit", "9", "--inc", "1"]);
    let output = run(cmd).await;

    output.clone().assert().code(4);
    assert!(combined_output(&output).contains("players list"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_players_edit_vanished_row_is_not_found() {
    let server = MockServer::start().await;
    mount_roster(&server).await;
    // The backend answers an update of a deleted row with an empty 200.
    Mock::given(method("PUT"))
        .and(path("/api/players/2"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let mut cmd = against(&server);
    cmd.args(["players", "edit", "2", "--inc", "1"]);
    let output = run(cmd).await;

    output.assert().code(4);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_players_remove_with_yes() {
    let server = MockServer::start().await;
    mount_roster(&server).await;
    Mock::given(method("DELETE"))
        .and(path("/api/players/2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "id": 2, "player": "Bo", "points": 5 })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut cmd = against(&server);
    cmd.args(["-y", "players", "remove", "2"]);
    let output = run(cmd).await;

    output
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed Bo"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_players_remove_without_yes_needs_terminal() {
    let server = MockServer::start().await;
    mount_roster(&server).await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut cmd = against(&server);
    cmd.args(["players", "remove", "2"]);
    let output = run(cmd).await;

    output.clone().assert().code(2);
    assert!(combined_output(&output).contains("--yes"));
}

// ── Health ──────────────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_health_ok() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "timestamp": "2024-06-15T10:30:00.000Z",
        })))
        .mount(&server)
        .await;

    let mut cmd = against(&server);
    cmd.args(["-o", "plain", "health"]);
    let output = run(cmd).await;

    output.assert().success().stdout("OK\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_health_degraded_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "degraded",
            "timestamp": "2024-06-15T10:30:00Z",
        })))
        .mount(&server)
        .await;

    let mut cmd = against(&server);
    cmd.arg("health");
    let output = run(cmd).await;

    output.assert().code(7);
}
