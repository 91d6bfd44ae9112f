//! Route tables, one per API area. Paths are relative to the `/api/<area>`
//! nest point.

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::api::handlers::{
    auth, consultations, external, health, hospital, jan_aushadhi, locations, medicines, metrics,
};
use crate::state::AppState;

pub fn metrics_routes() -> Router<AppState> {
    Router::new().route("/metrics", get(metrics::metrics_handler))
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/ping", get(health::health_check))
}

pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/me", get(auth::me))
}

pub fn medicine_routes() -> Router<AppState> {
    Router::new()
        .route("/search", get(medicines::search_medicines))
        .route("/categories", get(medicines::medicine_categories))
        .route(
            "/jan-aushadhi/compare/:name",
            get(medicines::compare_jan_aushadhi_prices),
        )
        .route("/interaction-check", post(medicines::check_interactions))
        .route("/:id", get(medicines::get_medicine))
}

pub fn hospital_routes() -> Router<AppState> {
    Router::new()
        .route("/tools/search", get(hospital::search_tools))
        .route("/tools/:id", get(hospital::get_tool))
        .route(
            "/tools/:id/safety-guidelines",
            get(hospital::safety_guidelines),
        )
        .route("/categories", get(hospital::tool_categories))
        .route("/departments", get(hospital::departments))
        .route("/compliance/who-standards", get(hospital::who_standards))
}

pub fn location_routes() -> Router<AppState> {
    Router::new()
        .route("/search", post(locations::search_locations))
        .route("/nearby", get(locations::nearby_locations))
        .route("/types/available", get(locations::location_types))
        .route("/services/available", get(locations::available_services))
        .route("/:id", get(locations::get_location))
        .route("/:id/directions", get(locations::directions))
}

pub fn jan_aushadhi_routes() -> Router<AppState> {
    Router::new()
        .route("/stores/search", get(jan_aushadhi::search_stores))
        .route("/stores/:id", get(jan_aushadhi::get_store))
        .route(
            "/medicines/available",
            get(jan_aushadhi::available_medicines),
        )
        .route("/savings-calculator", get(jan_aushadhi::savings_calculator))
        .route("/statistics", get(jan_aushadhi::statistics))
}

pub fn external_routes() -> Router<AppState> {
    Router::new()
        .route("/fda/drugs", get(external::fda_drugs))
        .route("/rxnorm/drugs", get(external::rxnorm_drugs))
        .route("/drug-interactions", post(external::drug_interactions))
        .route("/places", get(external::places))
        .route("/places/:place_id", get(external::place_details))
        .route("/geocode", get(external::geocode))
        .route("/who/:indicator", get(external::who_indicator))
}

pub fn consultation_routes() -> Router<AppState> {
    Router::new()
        .route("/agent-configs", get(consultations::agent_configs))
        .route(
            "/agents",
            get(consultations::list_agents).post(consultations::create_agent),
        )
        .route(
            "/agents/:id/knowledge",
            put(consultations::update_agent_knowledge),
        )
        .route("/sessions", post(consultations::start_session))
        .route("/sessions/:id/messages", post(consultations::send_message))
        .route("/sessions/:id/end", post(consultations::end_session))
        .route(
            "/sessions/:id/analytics",
            get(consultations::session_analytics),
        )
}
