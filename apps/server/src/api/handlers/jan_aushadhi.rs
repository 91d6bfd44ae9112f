//! Jan Aushadhi store and generic-medicine endpoints.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::Value as JsonValue;

use crate::{
    api::extractors::ValidatedQuery,
    models::{
        AvailableMedicines, AvailableMedicinesQuery, JanAushadhiStore, SavingsEstimate,
        SavingsQuery, StoreMatch, StoreSearchQuery,
    },
    state::AppState,
    Result,
};

pub async fn search_stores(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<StoreSearchQuery>,
) -> Result<Json<Vec<StoreMatch>>> {
    Ok(Json(state.jan_aushadhi.search_stores(&query).await?))
}

pub async fn get_store(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<JanAushadhiStore>> {
    Ok(Json(state.jan_aushadhi.get_store(&id).await?))
}

pub async fn available_medicines(
    State(state): State<AppState>,
    Query(query): Query<AvailableMedicinesQuery>,
) -> Result<Json<AvailableMedicines>> {
    Ok(Json(state.jan_aushadhi.available_medicines(query).await?))
}

pub async fn savings_calculator(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<SavingsQuery>,
) -> Json<SavingsEstimate> {
    Json(state.jan_aushadhi.savings(query))
}

pub async fn statistics(State(state): State<AppState>) -> Json<JsonValue> {
    Json(state.jan_aushadhi.statistics())
}
