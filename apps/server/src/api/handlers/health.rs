//! Liveness endpoints.

use axum::Json;
use serde_json::{json, Value as JsonValue};

pub async fn root() -> Json<JsonValue> {
    Json(json!({
        "message": "AarogyaAI backend is working",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn health_check() -> Json<JsonValue> {
    Json(json!({
        "status": "healthy",
        "message": "Server is up and running",
    }))
}
