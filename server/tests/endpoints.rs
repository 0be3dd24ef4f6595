mod shared;

use serde_json::json;
use shared::{TestClient, keys};

#[tokio::test]
async fn root_says_hello() {
    let client = TestClient::new();

    client
        .get("/")
        .await
        .status(200)
        .json_body(|body| {
            assert_eq!(
                keys(&body),
                [
                    "arch",
                    "environment",
                    "hostname",
                    "memory",
                    "message",
                    "nodeVersion",
                    "platform",
                    "timestamp",
                    "uptime",
                    "version",
                ]
            );
            assert!(body["message"].as_str().unwrap().contains("Hello from Nomad"));
            assert_eq!(body["hostname"], "test-host");
            assert_eq!(body["environment"], "development");
            assert_eq!(body["version"], "1.0.0");
            assert_eq!(body["platform"], std::env::consts::OS);
            assert_eq!(body["arch"], std::env::consts::ARCH);
            assert!(body["nodeVersion"].as_str().unwrap().starts_with("rustc"));
            assert!(body["uptime"].as_f64().unwrap() >= 0.0);
        })
        .await;
}

#[tokio::test]
async fn root_reports_memory_in_bytes() {
    let client = TestClient::new();

    let body = client.get("/").await.status(200).into_json().await;
    let memory = &body["memory"];

    assert_eq!(keys(memory), ["rss", "systemTotal", "systemUsed", "virtual"]);
    assert!(memory["rss"].as_u64().unwrap() > 0);
    assert!(memory["systemTotal"].as_u64().unwrap() >= memory["systemUsed"].as_u64().unwrap());
}

#[tokio::test]
async fn health_is_healthy() {
    let client = TestClient::new();

    client
        .get("/health")
        .await
        .status(200)
        .json_body(|body| {
            assert_eq!(
                keys(&body),
                ["environment", "status", "timestamp", "uptime", "version"]
            );
            assert_eq!(body["status"], "healthy");
            assert_eq!(body["environment"], "development");
            assert_eq!(body["version"], "1.0.0");
            assert!(body["uptime"].as_f64().unwrap() >= 0.0);
            assert!(body["timestamp"].as_str().unwrap().ends_with('Z'));
        })
        .await;
}

#[tokio::test]
async fn health_reports_configured_environment() {
    let client = TestClient::in_environment("production".parse().unwrap());

    client
        .get("/health")
        .await
        .status(200)
        .json_body(|body| assert_eq!(body["environment"], "production"))
        .await;
}

#[tokio::test]
async fn status_is_running() {
    let client = TestClient::new();

    client
        .get("/api/status")
        .await
        .status(200)
        .json_body(|body| {
            assert_eq!(keys(&body), ["service", "status", "timestamp"]);
            assert_eq!(body["status"], "running");
            assert_eq!(body["service"], "nomad-hello-world");
            assert!(body["timestamp"].is_string());
        })
        .await;
}

#[tokio::test]
async fn info_lists_endpoints_in_order() {
    let client = TestClient::new();

    client
        .get("/api/info")
        .await
        .status(200)
        .json_body(|body| {
            assert_eq!(
                body,
                json!({
                    "service": "nomad-hello-world",
                    "version": "1.0.0",
                    "description": "A simple Hello World application for Nomad deployment",
                    "endpoints": ["GET /", "GET /health", "GET /api/status", "GET /api/info"],
                })
            );
        })
        .await;
}

#[tokio::test]
async fn repeated_requests_differ_only_in_volatile_fields() {
    let client = TestClient::new();

    let first = client.get("/api/info").await.into_json().await;
    let second = client.get("/api/info").await.into_json().await;
    assert_eq!(first, second);

    let mut first = client.get("/health").await.into_json().await;
    let mut second = client.get("/health").await.into_json().await;
    for body in [&mut first, &mut second] {
        let body = body.as_object_mut().unwrap();
        body.remove("timestamp");
        body.remove("uptime");
    }
    assert_eq!(first, second);

    let mut first = client.get("/api/status").await.into_json().await;
    let mut second = client.get("/api/status").await.into_json().await;
    first.as_object_mut().unwrap().remove("timestamp");
    second.as_object_mut().unwrap().remove("timestamp");
    assert_eq!(first, second);
}

#[tokio::test]
async fn head_is_served_like_get() {
    let client = TestClient::new();

    client.send(request!(HEAD "/health")).await.status(200);
}

#[tokio::test]
async fn trailing_slash_is_ignored() {
    let client = TestClient::new();

    client
        .get("/health/")
        .await
        .status(200)
        .json_body(|body| assert_eq!(body["status"], "healthy"))
        .await;

    client.get("/api/info/").await.status(200);
}

#[tokio::test]
async fn path_matching_ignores_case() {
    let client = TestClient::new();

    client
        .get("/API/STATUS")
        .await
        .status(200)
        .json_body(|body| assert_eq!(body["status"], "running"))
        .await;

    client.get("/Health").await.status(200);
    client.get("/Api/Info/").await.status(200);
}
