//! API layer - routes, handlers, and middleware

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod routes;

use axum::{extract::DefaultBodyLimit, routing::get, Router};

use crate::{auth::auth_middleware, state::AppState, Error};

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    let server = &state.config.server;
    let max_body_size = server.max_request_body_size;
    let timeout_seconds = server.request_timeout_seconds;
    let cors_origins = server.cors_origins.clone();

    let protected = Router::new()
        .nest("/auth", routes::auth_routes())
        .nest("/consultations", routes::consultation_routes())
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let api = Router::new()
        .nest("/health", routes::health_routes())
        .nest("/medicines", routes::medicine_routes())
        .nest("/hospital", routes::hospital_routes())
        .nest("/locations", routes::location_routes())
        .nest("/jan-aushadhi", routes::jan_aushadhi_routes())
        .nest("/external", routes::external_routes())
        .merge(protected);

    Router::new()
        .route("/", get(handlers::health::root))
        .route("/health", get(handlers::health::health_check))
        .merge(routes::metrics_routes())
        .nest("/api", api)
        .fallback(not_found)
        .with_state(state)
        // Applied in reverse order: the last layer is outermost.
        .layer(middleware::catch_panic())
        .layer(axum::middleware::from_fn(
            middleware::security_headers_middleware,
        ))
        .layer(middleware::timeout(timeout_seconds))
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(axum::middleware::from_fn(middleware::metrics_middleware))
        .layer(middleware::compression())
        .layer(middleware::cors(&cors_origins))
        .layer(DefaultBodyLimit::max(max_body_size))
}

async fn not_found() -> Error {
    Error::NotFound("Not Found".to_string())
}
