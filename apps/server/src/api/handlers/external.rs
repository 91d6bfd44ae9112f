//! Third-party lookups. Provider failures come back as empty results, never
//! as errors.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::{json, Value as JsonValue};

use crate::{
    api::extractors::{JsonBody, ValidatedQuery},
    models::{
        DrugInteractionsRequest, DrugNameQuery, FdaDrugQuery, GeocodeQuery, PlacesQuery, WhoQuery,
    },
    state::AppState,
};

pub async fn fda_drugs(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<FdaDrugQuery>,
) -> Json<Vec<JsonValue>> {
    Json(state.external.search_fda_drugs(&query.query, query.limit).await)
}

pub async fn rxnorm_drugs(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<DrugNameQuery>,
) -> Json<Vec<JsonValue>> {
    Json(state.external.search_rxnorm_drugs(&query.query).await)
}

pub async fn drug_interactions(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<DrugInteractionsRequest>,
) -> Json<JsonValue> {
    Json(state.external.drug_interactions(&request.drugs).await)
}

pub async fn places(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<PlacesQuery>,
) -> Json<Vec<JsonValue>> {
    Json(
        state
            .external
            .search_places(&query.query, &query.location, &query.place_type)
            .await,
    )
}

pub async fn place_details(
    State(state): State<AppState>,
    Path(place_id): Path<String>,
) -> Json<JsonValue> {
    Json(state.external.place_details(&place_id).await)
}

/// `{}` when the address cannot be resolved.
pub async fn geocode(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<GeocodeQuery>,
) -> Json<JsonValue> {
    let body = match state.external.geocode(&query.address).await {
        Some(found) => json!(found),
        None => json!({}),
    };
    Json(body)
}

pub async fn who_indicator(
    State(state): State<AppState>,
    Path(indicator): Path<String>,
    Query(query): Query<WhoQuery>,
) -> Json<JsonValue> {
    Json(state.external.who_health_data(&indicator, &query.country).await)
}
