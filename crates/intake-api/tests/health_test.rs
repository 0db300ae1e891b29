mod helpers;

use helpers::setup_test_app;

#[tokio::test]
async fn health_endpoint_reports_ok() {
    let app = setup_test_app();

    let response = app.server.get("/health").await;

    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "ok");
}
