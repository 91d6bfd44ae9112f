//! Liveness, request-id headers, metrics exposition and fallback handling.

mod support;

use axum::http::{Method, StatusCode};
use support::{assert_status, detail, parse_json, TestApp};

#[tokio::test]
async fn root_reports_version() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let (status, body) = app.get_json("/").await?;

    assert_status(status, StatusCode::OK, "root");
    assert_eq!(body["message"], "AarogyaAI backend is working");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    Ok(())
}

#[tokio::test]
async fn health_endpoints_agree() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    for path in ["/health", "/api/health/ping"] {
        let (status, body) = app.get_json(path).await?;
        assert_status(status, StatusCode::OK, path);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["message"], "Server is up and running");
    }
    Ok(())
}

#[tokio::test]
async fn request_id_is_assigned_and_client_id_echoed() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let (_, headers, _) = app
        .request_with_extra_headers(
            Method::GET,
            "/health",
            None,
            &[("x-request-id", "client-abc")],
        )
        .await?;

    let server_id = headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(!server_id.is_empty());
    assert_ne!(server_id, "client-abc");
    assert_eq!(headers["x-correlation-id"], "client-abc");
    assert!(headers.contains_key("x-trace-id"));
    Ok(())
}

#[tokio::test]
async fn security_headers_are_set() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let (_, headers, _) = app.request(Method::GET, "/health", None).await?;

    assert_eq!(headers["x-content-type-options"], "nosniff");
    assert_eq!(headers["x-frame-options"], "DENY");
    assert!(!headers.contains_key("strict-transport-security"));
    Ok(())
}

#[tokio::test]
async fn unknown_route_is_json_404() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let (status, body) = app.get_json("/api/nowhere").await?;

    assert_status(status, StatusCode::NOT_FOUND, "fallback");
    assert_eq!(detail(&body)?, "Not Found");
    Ok(())
}

#[tokio::test]
async fn metrics_use_route_templates() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    app.get_json("/api/medicines/med_001").await?;

    let (status, headers, body) = app.request(Method::GET, "/metrics", None).await?;
    assert_status(status, StatusCode::OK, "metrics");
    assert!(headers["content-type"]
        .to_str()?
        .starts_with("text/plain"));

    let text = String::from_utf8(body.to_vec())?;
    assert!(text.contains("aarogya_http_requests_total"));
    assert!(text.contains("/api/medicines/:id"));
    assert!(!text.contains("/api/medicines/med_001"));
    assert!(text.contains("aarogya_catalog_records"));
    Ok(())
}

#[tokio::test]
async fn malformed_json_body_is_400_with_detail() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let (status, _, body) = app
        .request(
            Method::POST,
            "/api/medicines/interaction-check",
            Some(serde_json::json!({"not": "an array"})),
        )
        .await?;

    assert_status(status, StatusCode::BAD_REQUEST, "bad body");
    assert!(parse_json(&body)?.get("detail").is_some());
    Ok(())
}
