use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A command pointed at the mock server, with config isolated to a temp dir.
fn runboard(server: &MockServer, home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("runboard").unwrap();
    cmd.env("RUNBOARD_HOME", home.path())
        .arg("--server")
        .arg(server.uri());
    cmd
}

async fn mount_events(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/api/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

fn stdout_of(assert: assert_cmd::assert::Assert) -> String {
    String::from_utf8(assert.get_output().stdout.clone()).unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_events_are_listed_newest_first() {
    let server = MockServer::start().await;
    let home = TempDir::new().unwrap();
    mount_events(
        &server,
        json!([
            {"event_id": "oldest", "event_type": "jump", "timestamp": 100},
            {"event_id": "newest", "event_type": "jump", "timestamp": 300},
            {"event_id": "middle", "event_type": "jump", "timestamp": 200}
        ]),
    )
    .await;

    let assert = runboard(&server, &home).arg("events").assert().success();
    let out = stdout_of(assert);

    let newest = out.find("newest").unwrap();
    let middle = out.find("middle").unwrap();
    let oldest = out.find("oldest").unwrap();
    assert!(newest < middle && middle < oldest);
    assert!(out.contains("3 events (3 total)"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_type_filter_narrows_the_view() {
    let server = MockServer::start().await;
    let home = TempDir::new().unwrap();
    mount_events(
        &server,
        json!([
            {"event_id": "j1", "event_type": "jump", "timestamp": 1},
            {"event_id": "l1", "event_type": "land", "timestamp": 2},
            {"event_id": "j2", "event_type": "jump", "timestamp": 3},
            {"event_id": "l2", "event_type": "land", "timestamp": 4},
            {"event_id": "l3", "event_type": "land", "timestamp": 5}
        ]),
    )
    .await;

    runboard(&server, &home)
        .args(["events", "--event-type", "jump"])
        .assert()
        .success()
        .stdout(predicate::str::contains("j1"))
        .stdout(predicate::str::contains("j2"))
        .stdout(predicate::str::contains("l1").not())
        .stdout(predicate::str::contains("2 events (5 total)"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_seed_filter_matches_numeric_seeds_loosely() {
    let server = MockServer::start().await;
    let home = TempDir::new().unwrap();
    mount_events(
        &server,
        json!([
            {"event_id": "match", "event_type": "run", "timestamp": 1,
             "game_data": {"seed": 42}},
            {"event_id": "other", "event_type": "run", "timestamp": 2,
             "game_data": {"seed": 7}}
        ]),
    )
    .await;

    runboard(&server, &home)
        .args(["events", "--seed", "42"])
        .assert()
        .success()
        .stdout(predicate::str::contains("match"))
        .stdout(predicate::str::contains("other").not());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_non_numeric_seed_matches_nothing() {
    let server = MockServer::start().await;
    let home = TempDir::new().unwrap();
    mount_events(
        &server,
        json!([
            {"event_id": "e1", "event_type": "run", "timestamp": 1,
             "game_data": {"seed": 42}}
        ]),
    )
    .await;

    runboard(&server, &home)
        .args(["events", "--seed", "abc"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No events match the current filters."));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_pagination_slices_the_last_page() {
    let server = MockServer::start().await;
    let home = TempDir::new().unwrap();
    let events: Vec<serde_json::Value> = (0..25)
        .map(|i| {
            json!({
                "event_id": format!("ev-{i:02}"),
                "event_type": "run",
                "timestamp": i
            })
        })
        .collect();
    mount_events(&server, json!(events)).await;

    let assert = runboard(&server, &home)
        .args(["events", "--page", "3"])
        .assert()
        .success();
    let out = stdout_of(assert);

    assert!(out.contains("Page 3 of 3"));
    // The last page holds the 5 oldest events.
    for i in 0..5 {
        assert!(out.contains(&format!("ev-{i:02}")), "missing ev-{i:02}");
    }
    assert!(!out.contains("ev-05"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_sparse_events_render_fallbacks() {
    let server = MockServer::start().await;
    let home = TempDir::new().unwrap();
    mount_events(&server, json!([{}])).await;

    runboard(&server, &home)
        .arg("events")
        .assert()
        .success()
        .stdout(predicate::str::contains("Event 1"))
        .stdout(predicate::str::contains("Unknown"))
        .stdout(predicate::str::contains("N/A"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_long_data_payloads_are_truncated() {
    let server = MockServer::start().await;
    let home = TempDir::new().unwrap();
    mount_events(
        &server,
        json!([
            {"event_id": "big", "event_type": "dump", "timestamp": 1,
             "data": {"blob": "x".repeat(200)}}
        ]),
    )
    .await;

    runboard(&server, &home)
        .arg("events")
        .assert()
        .success()
        .stdout(predicate::str::contains("..."))
        .stdout(predicate::str::contains("x".repeat(60)).not());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_server_error_fails_the_command() {
    let server = MockServer::start().await;
    let home = TempDir::new().unwrap();
    Mock::given(method("GET"))
        .and(path("/api/events"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    runboard(&server, &home)
        .arg("events")
        .assert()
        .failure()
        .stderr(predicate::str::contains("fetch events"));
}
