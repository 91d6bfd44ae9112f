//! Caller identity.

use axum::Json;

use crate::auth::{AuthenticatedPrincipal, Principal};

/// Claims of the verified caller. 401 when no principal is attached, which
/// includes every request while authentication is disabled.
pub async fn me(AuthenticatedPrincipal(principal): AuthenticatedPrincipal) -> Json<Principal> {
    Json(principal)
}
