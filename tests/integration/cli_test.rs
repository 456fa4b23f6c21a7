//! CLI tests: the binary with a webhook payload on stdin

use std::process::Output;

use assert_cmd::assert::OutputAssertExt;
use assert_cmd::cargo;
use predicates::prelude::*;
use serde_json::{Value, json};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper function to create a spida-webhook command
fn webhook() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(cargo::cargo_bin!("spida-webhook"));
    cmd.env_remove("RUST_LOG")
        .env("SPIDA_WEBHOOK_CONFIG", "/nonexistent/spida-webhook.toml");
    cmd
}

/// Run the binary off the async runtime so the mock server keeps serving
async fn run(args: &[&str], stdin: Value) -> Output {
    let args: Vec<String> = args.iter().map(ToString::to_string).collect();
    tokio::task::spawn_blocking(move || {
        webhook()
            .args(&args)
            .write_stdin(stdin.to_string())
            .output()
            .expect("failed to run spida-webhook")
    })
    .await
    .unwrap()
}

fn payload(server: &MockServer) -> Value {
    json!({
        "minServer": server.uri(),
        "apiToken": "admin@spidasoftware.com",
        "payload": {"part": {"id": 1}}
    })
}

// =============================================================================
// NO SERVER NEEDED
// =============================================================================

#[test]
fn test_version() {
    webhook()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("spida-webhook"));
}

#[test]
fn test_help_mentions_project_id_default() {
    webhook()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("payload.part.id"));
}

#[test]
fn test_malformed_stdin_exits_non_zero() {
    webhook()
        .args(["status", "Finish"])
        .write_stdin("{not json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed input"));
}

#[test]
fn test_form_value_from_payload() {
    let payload = json!({
        "payload": {"part": {"id": 1, "dataForms": [
            {"title": "form1", "fields": {"field1": "val1", "field2": ""}}
        ]}}
    });

    webhook()
        .args(["form-value", "--form", "form1", "--field", "field1"])
        .write_stdin(payload.to_string())
        .assert()
        .success()
        .stdout("val1\n");
}

#[test]
fn test_form_value_missing_field_json() {
    let payload = json!({
        "scriptParam": "{\"logLevel\":\"info\"}",
        "payload": {"part": {"dataForms": [{"title": "form1", "fields": {}}]}}
    });

    webhook()
        .args(["--json", "form-value", "--form", "form1", "--field", "MISSING"])
        .write_stdin(payload.to_string())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"value\": null"))
        .stderr(predicate::str::contains("Missing field named 'MISSING'"));
}

#[test]
fn test_missing_project_id_fails() {
    webhook()
        .args(["status", "Finish"])
        .write_stdin(json!({"minServer": "http://localhost:1/", "apiToken": "t"}).to_string())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No project id"));
}

// =============================================================================
// AGAINST A MOCK SERVER
// =============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn test_status_command_updates_project() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/projectmanager/projectAPI/createOrUpdate"))
        .and(body_string_contains("Finish"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": {"id": 1}})))
        .expect(1)
        .mount(&server)
        .await;

    let output = run(&["status", "Finish"], payload(&server)).await;

    output
        .assert()
        .success()
        .stdout(predicate::str::contains("Status of project 1 set to 'Finish'"))
        .stderr(predicate::str::contains("Successfully updated SPIDAmin project."));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_explicit_project_id_wins() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/projectmanager/projectAPI/createOrUpdate"))
        .and(body_string_contains("%22id%22%3A77"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": {"id": 77}})))
        .expect(1)
        .mount(&server)
        .await;

    let output = run(&["codes", "A-1", "B-2", "--project-id", "77"], payload(&server)).await;

    output.assert().success();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_server_error_exits_non_zero() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("server exploded"))
        .mount(&server)
        .await;

    let output = run(&["form", "-t", "Inspection", "-f", "Result=Pass"], payload(&server)).await;

    output
        .assert()
        .failure()
        .stderr(predicate::str::contains("STATUS: 500"))
        .stderr(predicate::str::contains("server exploded"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_missing_acknowledgment_still_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/projectmanager/projectAPI/addLogMessage"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .mount(&server)
        .await;

    let output = run(&["log-message", "--trigger", "Finish", "-m", "done"], payload(&server)).await;

    output.assert().success();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_script_param_silences_logging() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": {"id": 1}})))
        .mount(&server)
        .await;
    let mut payload = payload(&server);
    payload["scriptParam"] = json!("{\"logLevel\":\"none\"}");

    let output = run(&["status", "Finish"], payload).await;

    output.assert().success().stderr(predicate::str::is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_fetch_prints_project_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/projectmanager/projectAPI/getProjects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {"projects": [{"id": 1, "name": "Job 1"}]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let output = run(&["--json", "--log-level", "none", "fetch", "--details"], payload(&server)).await;

    output
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"Job 1\""));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_non_json_update_response_exits_non_zero() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let output = run(&["status", "Finish"], payload(&server)).await;

    output
        .assert()
        .failure()
        .stderr(predicate::str::contains("not JSON"));
}
