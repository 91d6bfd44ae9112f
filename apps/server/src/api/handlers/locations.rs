//! Healthcare location endpoints backed by the proximity search engine.

use aarogya_geo::{GeoPoint, SearchResult};
use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    api::extractors::{JsonBody, ValidatedQuery},
    catalog::reference::LocationType,
    models::{
        DirectionsQuery, DirectionsResponse, HealthcareLocation, LocationQuery,
        LocationSearchRequest, NearbyQuery,
    },
    state::AppState,
    Result,
};

type LocationResults = Json<Vec<SearchResult<HealthcareLocation>>>;

/// The POST body has no limit field; results are capped at `search.max_limit`.
pub async fn search_locations(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<LocationSearchRequest>,
) -> Result<LocationResults> {
    let cap = state.config.search.max_limit;
    let results = state
        .locations
        .search(LocationQuery::from(request), Some(cap))
        .await?;
    Ok(Json(results))
}

pub async fn nearby_locations(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<NearbyQuery>,
) -> Result<LocationResults> {
    let limit = query.limit;
    let results = state
        .locations
        .search(LocationQuery::from(query), limit)
        .await?;
    Ok(Json(results))
}

pub async fn get_location(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<HealthcareLocation>> {
    Ok(Json(state.locations.get(&id).await?))
}

pub async fn location_types(State(state): State<AppState>) -> Json<&'static [LocationType]> {
    Json(state.locations.types())
}

pub async fn available_services(State(state): State<AppState>) -> Json<&'static [&'static str]> {
    Json(state.locations.services())
}

pub async fn directions(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedQuery(query): ValidatedQuery<DirectionsQuery>,
) -> Result<Json<DirectionsResponse>> {
    let from = GeoPoint::try_new(query.from_latitude, query.from_longitude)?;
    Ok(Json(state.locations.directions(&id, from).await?))
}
