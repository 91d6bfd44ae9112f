//! Shared harness for HTTP-level tests: a router over the seeded catalog,
//! a token table instead of a real identity provider, and recording gateway
//! stubs.

#![allow(dead_code)]

pub mod assertions;
pub mod stubs;

use aarogya::{api::create_router, AppState, AppStateOptions, Config};
use anyhow::Context as _;
use axum::{
    body::{Body, Bytes},
    http::{header, HeaderMap, HeaderName, HeaderValue, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt as _;

pub use assertions::*;
pub use stubs::*;

pub const VALID_TOKEN: &str = "valid-token";
pub const TEST_UID: &str = "user_123";

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub consultation: Arc<RecordingConsultationGateway>,
    pub third_party: Arc<CannedThirdPartyGateway>,
}

impl TestApp {
    pub async fn new() -> anyhow::Result<Self> {
        Self::new_with_config(|_| {}).await
    }

    pub async fn new_with_config(configure: impl FnOnce(&mut Config)) -> anyhow::Result<Self> {
        let mut config = Config::default();
        configure(&mut config);

        let consultation = Arc::new(RecordingConsultationGateway::default());
        let third_party = Arc::new(CannedThirdPartyGateway::default());

        let state = AppState::with_options(
            config,
            AppStateOptions {
                catalog: None,
                identity_verifier: Some(Arc::new(StaticVerifier::single(VALID_TOKEN, TEST_UID))),
                third_party: Some(third_party.clone()),
                consultation: Some(consultation.clone()),
            },
        )
        .await
        .context("initialize AppState")?;

        Ok(Self {
            router: create_router(state.clone()),
            state,
            consultation,
            third_party,
        })
    }

    /// Authentication enabled, verified against [`VALID_TOKEN`].
    pub async fn with_auth() -> anyhow::Result<Self> {
        Self::new_with_config(|c| c.auth.enabled = true).await
    }

    pub async fn request(
        &self,
        method: Method,
        path_and_query: &str,
        body: Option<Value>,
    ) -> anyhow::Result<(StatusCode, HeaderMap, Bytes)> {
        self.request_with_extra_headers(method, path_and_query, body, &[])
            .await
    }

    pub async fn request_with_extra_headers(
        &self,
        method: Method,
        path_and_query: &str,
        body: Option<Value>,
        extra_headers: &[(&str, &str)],
    ) -> anyhow::Result<(StatusCode, HeaderMap, Bytes)> {
        let body = match body {
            Some(json) => Body::from(serde_json::to_vec(&json).context("encode body")?),
            None => Body::empty(),
        };
        let mut request = Request::builder()
            .method(method)
            .uri(path_and_query)
            .header(header::HOST, "localhost")
            .header(header::ACCEPT, "application/json")
            .header(header::CONTENT_TYPE, "application/json")
            .body(body)
            .context("build request")?;

        for (name, value) in extra_headers {
            request.headers_mut().insert(
                name.parse::<HeaderName>().context("parse header name")?,
                value.parse::<HeaderValue>().context("parse header value")?,
            );
        }

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .context("dispatch request")?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .context("read response body")?;

        Ok((status, headers, body))
    }

    /// GET and decode the JSON body.
    pub async fn get_json(&self, path_and_query: &str) -> anyhow::Result<(StatusCode, Value)> {
        let (status, _, body) = self.request(Method::GET, path_and_query, None).await?;
        Ok((status, parse_json(&body)?))
    }

    pub async fn post_json(&self, path: &str, body: Value) -> anyhow::Result<(StatusCode, Value)> {
        let (status, _, bytes) = self.request(Method::POST, path, Some(body)).await?;
        Ok((status, parse_json(&bytes)?))
    }
}

pub fn parse_json(body: &[u8]) -> anyhow::Result<Value> {
    if body.is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_slice(body).context("response body is JSON")
}
