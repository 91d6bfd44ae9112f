//! Medicine catalog endpoints.

mod support;

use axum::http::StatusCode;
use serde_json::json;
use support::{assert_status, detail, ids, TestApp};

#[tokio::test]
async fn search_matches_generic_name_case_insensitively() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let (status, body) = app
        .get_json("/api/medicines/search?query=ACETAMINOPHEN")
        .await?;

    assert_status(status, StatusCode::OK, "search");
    assert_eq!(ids(&body)?, vec!["med_001"]);
    Ok(())
}

#[tokio::test]
async fn search_filters_combine() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let (_, body) = app
        .get_json("/api/medicines/search?query=a&prescription_required=true&jan_aushadhi_only=true")
        .await?;

    // Warfarin requires a prescription but is not stocked by Jan Aushadhi.
    assert_eq!(ids(&body)?, vec!["med_002", "med_003"]);
    Ok(())
}

#[tokio::test]
async fn search_limit_applies_after_filtering() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let (_, body) = app.get_json("/api/medicines/search?query=&limit=2").await?;
    assert_eq!(ids(&body)?, vec!["med_001", "med_002"]);

    let (status, body) = app.get_json("/api/medicines/search?query=a&limit=0").await?;
    assert_status(status, StatusCode::BAD_REQUEST, "zero limit");
    assert!(detail(&body)?.contains("limit"));
    Ok(())
}

#[tokio::test]
async fn search_requires_query() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let (status, _) = app.get_json("/api/medicines/search").await?;
    assert_status(status, StatusCode::BAD_REQUEST, "missing query");
    Ok(())
}

#[tokio::test]
async fn read_and_404() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let (status, body) = app.get_json("/api/medicines/med_003").await?;
    assert_status(status, StatusCode::OK, "read");
    assert_eq!(body["name"], "Metformin");

    let (status, body) = app.get_json("/api/medicines/med_999").await?;
    assert_status(status, StatusCode::NOT_FOUND, "missing");
    assert_eq!(detail(&body)?, "Medicine not found");
    Ok(())
}

#[tokio::test]
async fn categories_are_static() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let (_, body) = app.get_json("/api/medicines/categories").await?;
    let categories = body.as_array().expect("array");
    assert!(!categories.is_empty());
    assert!(categories.iter().all(|c| c["count"].is_u64()));
    Ok(())
}

#[tokio::test]
async fn jan_aushadhi_comparison() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let (status, body) = app
        .get_json("/api/medicines/jan-aushadhi/compare/paracetamol")
        .await?;
    assert_status(status, StatusCode::OK, "compare");
    assert_eq!(body["medicine_name"], "Paracetamol");
    assert_eq!(body["savings_percentage"], "60-80%");

    let (status, body) = app
        .get_json("/api/medicines/jan-aushadhi/compare/Warfarin")
        .await?;
    assert_status(status, StatusCode::NOT_FOUND, "not stocked");
    assert_eq!(detail(&body)?, "Medicine not available in Jan Aushadhi");
    Ok(())
}

#[tokio::test]
async fn interaction_check() -> anyhow::Result<()> {
    let app = TestApp::new().await?;

    let (status, body) = app
        .post_json(
            "/api/medicines/interaction-check",
            json!(["med_004", "med_001"]),
        )
        .await?;
    assert_status(status, StatusCode::OK, "known pair");
    assert_eq!(body["interactions_found"], 1);
    assert_eq!(body["safe_to_combine"], false);

    let (_, body) = app
        .post_json(
            "/api/medicines/interaction-check",
            json!(["med_001", "med_002"]),
        )
        .await?;
    assert_eq!(body["interactions_found"], 0);
    assert_eq!(body["safe_to_combine"], true);

    let (status, body) = app
        .post_json("/api/medicines/interaction-check", json!(["med_001"]))
        .await?;
    assert_status(status, StatusCode::BAD_REQUEST, "single id");
    assert_eq!(
        detail(&body)?,
        "At least 2 medicines required for interaction check"
    );

    let (status, _) = app
        .post_json(
            "/api/medicines/interaction-check",
            json!(["med_001", "med_404"]),
        )
        .await?;
    assert_status(status, StatusCode::NOT_FOUND, "unknown id");
    Ok(())
}
