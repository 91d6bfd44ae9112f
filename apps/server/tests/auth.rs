//! Bearer-token verification on the protected route groups.

mod support;

use axum::http::{header, Method, StatusCode};
use serde_json::json;
use support::{assert_status, detail, parse_json, TestApp, TEST_UID, VALID_TOKEN};

fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

#[tokio::test]
async fn me_is_401_while_auth_is_disabled() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let (status, body) = app.get_json("/api/auth/me").await?;

    assert_status(status, StatusCode::UNAUTHORIZED, "no principal");
    assert_eq!(detail(&body)?, "Missing bearer token");
    Ok(())
}

#[tokio::test]
async fn missing_token_is_challenged() -> anyhow::Result<()> {
    let app = TestApp::with_auth().await?;
    let (status, headers, body) = app.request(Method::GET, "/api/auth/me", None).await?;

    assert_status(status, StatusCode::UNAUTHORIZED, "missing token");
    assert_eq!(headers[header::WWW_AUTHENTICATE], "Bearer");
    assert_eq!(detail(&parse_json(&body)?)?, "Missing bearer token");
    Ok(())
}

#[tokio::test]
async fn valid_token_returns_principal() -> anyhow::Result<()> {
    let app = TestApp::with_auth().await?;
    let token = bearer(VALID_TOKEN);
    let (status, _, body) = app
        .request_with_extra_headers(
            Method::GET,
            "/api/auth/me",
            None,
            &[("authorization", token.as_str())],
        )
        .await?;

    assert_status(status, StatusCode::OK, "valid token");
    let body = parse_json(&body)?;
    assert_eq!(body["uid"], TEST_UID);
    assert_eq!(body["email"], format!("{TEST_UID}@example.com"));
    assert_eq!(body["sign_in_provider"], "password");
    Ok(())
}

#[tokio::test]
async fn unknown_token_is_rejected() -> anyhow::Result<()> {
    let app = TestApp::with_auth().await?;
    let (status, headers, body) = app
        .request_with_extra_headers(
            Method::GET,
            "/api/auth/me",
            None,
            &[("authorization", "Bearer forged")],
        )
        .await?;

    assert_status(status, StatusCode::UNAUTHORIZED, "forged token");
    assert_eq!(headers[header::WWW_AUTHENTICATE], "Bearer");
    assert!(detail(&parse_json(&body)?)?.starts_with("Invalid bearer token"));
    Ok(())
}

#[tokio::test]
async fn non_bearer_scheme_counts_as_missing() -> anyhow::Result<()> {
    let app = TestApp::with_auth().await?;
    let (status, _, _) = app
        .request_with_extra_headers(
            Method::GET,
            "/api/auth/me",
            None,
            &[("authorization", "Basic dXNlcjpwYXNz")],
        )
        .await?;
    assert_status(status, StatusCode::UNAUTHORIZED, "basic auth");
    Ok(())
}

#[tokio::test]
async fn consultations_require_token_when_enabled() -> anyhow::Result<()> {
    let app = TestApp::with_auth().await?;
    let (status, _) = app
        .post_json("/api/consultations/sessions", json!({"agent_id": "agent_001"}))
        .await?;
    assert_status(status, StatusCode::UNAUTHORIZED, "protected route");
    assert!(app.consultation.sessions.lock().unwrap().is_empty());
    Ok(())
}

#[tokio::test]
async fn catalog_routes_stay_public() -> anyhow::Result<()> {
    let app = TestApp::with_auth().await?;
    let (status, _) = app.get_json("/api/medicines/med_001").await?;
    assert_status(status, StatusCode::OK, "public catalog");
    Ok(())
}

#[tokio::test]
async fn preflight_is_not_challenged() -> anyhow::Result<()> {
    let app = TestApp::with_auth().await?;
    let (status, _, _) = app
        .request_with_extra_headers(
            Method::OPTIONS,
            "/api/auth/me",
            None,
            &[
                ("origin", "http://localhost:3000"),
                ("access-control-request-method", "GET"),
            ],
        )
        .await?;
    assert_ne!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}
