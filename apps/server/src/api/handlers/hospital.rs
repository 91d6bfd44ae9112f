//! Hospital equipment endpoints.

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value as JsonValue;

use crate::{
    api::extractors::ValidatedQuery,
    models::{Category, HospitalTool, ToolSafetyReport, ToolSearchQuery},
    state::AppState,
    Result,
};

pub async fn search_tools(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ToolSearchQuery>,
) -> Result<Json<Vec<HospitalTool>>> {
    Ok(Json(state.hospital.search(&query).await?))
}

pub async fn get_tool(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<HospitalTool>> {
    Ok(Json(state.hospital.get(&id).await?))
}

pub async fn tool_categories(State(state): State<AppState>) -> Json<Vec<Category>> {
    Json(state.hospital.categories())
}

pub async fn departments(State(state): State<AppState>) -> Json<&'static [&'static str]> {
    Json(state.hospital.departments())
}

pub async fn safety_guidelines(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ToolSafetyReport>> {
    Ok(Json(state.hospital.safety_report(&id).await?))
}

pub async fn who_standards(State(state): State<AppState>) -> Json<JsonValue> {
    Json(state.hospital.who_standards())
}
