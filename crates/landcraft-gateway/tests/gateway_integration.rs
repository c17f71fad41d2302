use std::net::TcpListener;

use landcraft_config::AppConfig;
use landcraft_gateway::GatewayServer;
use serde_json::{Value, json};
use uuid::Uuid;

/// Pick a random available port.
fn random_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind to random port");
    listener.local_addr().unwrap().port()
}

/// Build a config on a random port with a database in its own temp dir.
/// The `TempDir` must outlive the test or the database vanishes.
fn test_config(port: u16, dir: &tempfile::TempDir) -> AppConfig {
    let mut config = AppConfig::default();
    config.gateway.host = "127.0.0.1".to_string();
    config.gateway.port = port;
    config.database.path = dir.path().join("landcraft.db");
    config
}

/// Start the gateway in the background and return its base URL.
async fn start_test_gateway(config: AppConfig) -> String {
    let port = config.gateway.port;
    tokio::spawn(async move {
        let server = GatewayServer::new(config);
        let _ = server.run().await;
    });

    // Wait for the server to be ready
    for _ in 0..50 {
        if TcpListener::bind(format!("127.0.0.1:{port}")).is_err() {
            break; // port is in use = server is up
        }
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    }

    format!("http://127.0.0.1:{port}")
}

async fn post_migration(base: &str, body: &str) -> reqwest::Response {
    reqwest::Client::new()
        .post(format!("{base}/api/db"))
        .body(body.to_string())
        .send()
        .await
        .expect("migration request failed")
}

#[tokio::test]
async fn health_endpoint_returns_ok() {
    let dir = tempfile::tempdir().unwrap();
    let base = start_test_gateway(test_config(random_port(), &dir)).await;

    let resp = reqwest::get(format!("{base}/health"))
        .await
        .expect("health request failed");
    assert_eq!(resp.text().await.unwrap(), "ok");
}

#[tokio::test]
async fn empty_migration_body_is_a_no_op() {
    let dir = tempfile::tempdir().unwrap();
    let base = start_test_gateway(test_config(random_port(), &dir)).await;

    let resp = post_migration(&base, "").await;
    assert!(resp.status().is_success());
    assert_eq!(resp.text().await.unwrap(), "");
}

#[tokio::test]
async fn migrate_up_applies_and_logs_the_migration_name() {
    let dir = tempfile::tempdir().unwrap();
    let base = start_test_gateway(test_config(random_port(), &dir)).await;

    let resp = post_migration(&base, "up").await;
    assert!(resp.status().is_success());
    assert_eq!(resp.text().await.unwrap(), "applied 0001_job");

    // Re-running is a no-op, not an error.
    let resp = post_migration(&base, "up").await;
    assert!(resp.status().is_success());
    assert_eq!(resp.text().await.unwrap(), "no pending migrations");
}

#[tokio::test]
async fn unknown_migration_command_returns_500() {
    let dir = tempfile::tempdir().unwrap();
    let base = start_test_gateway(test_config(random_port(), &dir)).await;

    let resp = post_migration(&base, "sideways").await;
    assert_eq!(resp.status(), 500);
}

#[tokio::test]
async fn job_creation_returns_a_new_create_job() {
    let dir = tempfile::tempdir().unwrap();
    let base = start_test_gateway(test_config(random_port(), &dir)).await;
    post_migration(&base, "up").await;

    let resp = reqwest::Client::new()
        .post(format!("{base}/api/job"))
        .json(&json!({ "args": "x" }))
        .send()
        .await
        .expect("job request failed");
    assert!(resp.status().is_success());

    let body: Value = resp.json().await.unwrap();
    let job = &body["job"];
    assert_eq!(job["job_type"], "CREATE");
    assert_eq!(job["job_status"], "NEW");
    assert_eq!(job["args"], "x");
    let id = job["id"].as_str().expect("job id should be a string");
    assert!(Uuid::parse_str(id).is_ok());
}

#[tokio::test]
async fn job_creation_serializes_structured_args() {
    let dir = tempfile::tempdir().unwrap();
    let base = start_test_gateway(test_config(random_port(), &dir)).await;
    post_migration(&base, "up").await;

    let resp = reqwest::Client::new()
        .post(format!("{base}/api/job"))
        .json(&json!({ "args": { "width": 3 } }))
        .send()
        .await
        .expect("job request failed");

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["job"]["args"], r#"{"width":3}"#);
}

#[tokio::test]
async fn job_creation_before_migration_returns_500() {
    let dir = tempfile::tempdir().unwrap();
    let base = start_test_gateway(test_config(random_port(), &dir)).await;

    let resp = reqwest::Client::new()
        .post(format!("{base}/api/job"))
        .json(&json!({ "args": "x" }))
        .send()
        .await
        .expect("job request failed");
    assert_eq!(resp.status(), 500);
}

#[tokio::test]
async fn status_endpoint_reports_job_count() {
    let dir = tempfile::tempdir().unwrap();
    let base = start_test_gateway(test_config(random_port(), &dir)).await;
    post_migration(&base, "up").await;

    let client = reqwest::Client::new();
    client
        .post(format!("{base}/api/job"))
        .json(&json!({ "args": "a" }))
        .send()
        .await
        .unwrap();

    let resp = reqwest::get(format!("{base}/api/status"))
        .await
        .expect("status request failed");
    let body: Value = resp.json().await.unwrap();

    assert_eq!(body["status"], "running");
    assert_eq!(body["jobs"], 1);
}
