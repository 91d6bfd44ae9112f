//! Per-request identifiers injected by the request id middleware.

use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};
use std::convert::Infallible;

#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Server-assigned id, returned as `x-request-id`.
    pub request_id: String,
    /// Client-supplied `x-request-id`, if any.
    pub correlation_id: Option<String>,
}

/// Falls back to an empty id when the middleware did not run (unit tests
/// that call handlers directly).
#[async_trait]
impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<RequestContext>()
            .cloned()
            .unwrap_or(RequestContext {
                request_id: String::new(),
                correlation_id: None,
            }))
    }
}
