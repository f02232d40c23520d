mod common;

use serde_json::Value;

#[tokio::test]
async fn test_health_reports_storage_and_cache() {
    let (state, _store) = common::create_test_state().await;
    let server = common::test_server(state);

    server
        .post("/shorten")
        .form(&[("longURL", "https://example.com")])
        .await;

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(body["checks"]["storage"]["status"], "ok");
    assert_eq!(body["checks"]["storage"]["message"], "memory, 1 links");
    assert_eq!(body["checks"]["cache"]["status"], "ok");
}
