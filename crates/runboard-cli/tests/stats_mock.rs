use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn runboard(server: &MockServer, home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("runboard").unwrap();
    cmd.env("RUNBOARD_HOME", home.path())
        .arg("--server")
        .arg(server.uri());
    cmd
}

#[tokio::test(flavor = "multi_thread")]
async fn test_stats_summary_is_printed() {
    let server = MockServer::start().await;
    let home = TempDir::new().unwrap();
    Mock::given(method("GET"))
        .and(path("/api/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": 120,
            "latest_update": "2024-05-01T12:34:56.789012",
            "types": [
                {"type": "jump", "count": 60, "percentage": 50.0},
                {"type": "land", "count": 40, "percentage": 33.3},
                {"type": "hit", "count": 20, "percentage": 16.7}
            ],
            "seeds": [
                {"seed": 42, "count": 80, "types": [["jump", 50], ["land", 30]]},
                {"seed": 7, "count": 40, "types": [["hit", 20]]}
            ]
        })))
        .mount(&server)
        .await;

    runboard(&server, &home)
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total events: 120"))
        .stdout(predicate::str::contains("Last updated: 2024-05-01 12:34:56"))
        .stdout(predicate::str::contains("jump: 60 (50.0%)"))
        .stdout(predicate::str::contains("Seed 42 - 80 events"))
        .stdout(predicate::str::contains("jump: 50"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_empty_stats_print_only_the_total() {
    let server = MockServer::start().await;
    let home = TempDir::new().unwrap();
    Mock::given(method("GET"))
        .and(path("/api/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"total": 0})))
        .mount(&server)
        .await;

    runboard(&server, &home)
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total events: 0"))
        .stdout(predicate::str::contains("Top event types").not())
        .stdout(predicate::str::contains("Recent games").not());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_stats_fetch_failure_fails_the_command() {
    let server = MockServer::start().await;
    let home = TempDir::new().unwrap();
    Mock::given(method("GET"))
        .and(path("/api/stats"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    runboard(&server, &home)
        .arg("stats")
        .assert()
        .failure()
        .stderr(predicate::str::contains("fetch stats"));
}
