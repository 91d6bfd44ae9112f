//! Medicine catalog endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    api::extractors::{JsonBody, ValidatedQuery},
    models::{Category, InteractionReport, Medicine, MedicineSearchQuery, PriceComparison},
    state::AppState,
    Result,
};

pub async fn search_medicines(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<MedicineSearchQuery>,
) -> Result<Json<Vec<Medicine>>> {
    Ok(Json(state.medicines.search(&query).await?))
}

pub async fn medicine_categories(State(state): State<AppState>) -> Json<Vec<Category>> {
    Json(state.medicines.categories())
}

pub async fn get_medicine(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Medicine>> {
    Ok(Json(state.medicines.get(&id).await?))
}

pub async fn compare_jan_aushadhi_prices(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<PriceComparison>> {
    Ok(Json(state.medicines.compare_prices(&name).await?))
}

/// Body is a bare JSON array of medicine ids.
pub async fn check_interactions(
    State(state): State<AppState>,
    JsonBody(ids): JsonBody<Vec<String>>,
) -> Result<Json<InteractionReport>> {
    Ok(Json(state.medicines.check_interactions(&ids).await?))
}
