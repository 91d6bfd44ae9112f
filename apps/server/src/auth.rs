//! Bearer-token authentication.
//!
//! Identity is delegated to an external provider (Firebase Authentication or
//! any OIDC issuer); this server only verifies ID tokens on incoming requests.

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, State},
    http::{header, request::Parts, HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use jsonwebtoken::jwk::{AlgorithmParameters, JwkSet};
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};
use std::{
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::RwLock;

use crate::{
    config::{AuthConfig, OidcConfig},
    request_context::RequestContext,
    state::AppState,
};

/// Verified claims of the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Principal {
    pub uid: String,
    pub email: Option<String>,
    pub name: Option<String>,
    #[serde(default)]
    pub email_verified: bool,
    pub issuer: Option<String>,
    pub audience: Option<String>,
    pub sign_in_provider: Option<String>,
}

impl Principal {
    pub fn from_claims(claims: &JsonValue) -> Result<Self, AuthError> {
        let str_claim = |key: &str| claims.get(key).and_then(|v| v.as_str()).map(str::to_string);

        let uid = str_claim("sub")
            .or_else(|| str_claim("user_id"))
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AuthError::InvalidToken("token has no subject".to_string()))?;

        let audience = match claims.get("aud") {
            Some(JsonValue::String(s)) => Some(s.clone()),
            Some(JsonValue::Array(arr)) => arr.first().and_then(|v| v.as_str()).map(str::to_string),
            _ => None,
        };

        Ok(Self {
            uid,
            email: str_claim("email"),
            name: str_claim("name"),
            email_verified: claims
                .get("email_verified")
                .and_then(|v| v.as_bool())
                .unwrap_or(false),
            issuer: str_claim("iss"),
            audience,
            sign_in_provider: claims
                .pointer("/firebase/sign_in_provider")
                .and_then(|v| v.as_str())
                .map(str::to_string),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AuthError {
    MissingToken,
    InvalidToken(String),
    Misconfigured(String),
    Upstream(String),
}

impl AuthError {
    fn status(&self) -> StatusCode {
        match self {
            Self::MissingToken | Self::InvalidToken(_) => StatusCode::UNAUTHORIZED,
            Self::Misconfigured(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Upstream(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn detail(&self) -> String {
        match self {
            Self::MissingToken => "Missing bearer token".to_string(),
            Self::InvalidToken(msg) => format!("Invalid bearer token: {msg}"),
            Self::Misconfigured(_) => "Authentication is misconfigured".to_string(),
            Self::Upstream(_) => "Identity provider unavailable".to_string(),
        }
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingToken => f.write_str("missing bearer token"),
            Self::InvalidToken(msg) => write!(f, "invalid token: {msg}"),
            Self::Misconfigured(msg) => write!(f, "misconfigured: {msg}"),
            Self::Upstream(msg) => write!(f, "upstream: {msg}"),
        }
    }
}

impl std::error::Error for AuthError {}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status();
        let mut response = (status, Json(json!({ "detail": self.detail() }))).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                header::HeaderValue::from_static("Bearer"),
            );
        }
        response
    }
}

/// Turns an opaque bearer string into a verified [`Principal`].
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<Principal, AuthError>;
}

#[derive(Debug, Clone, Deserialize)]
pub struct OidcDiscovery {
    pub issuer: Option<String>,
    pub jwks_uri: String,
}

#[derive(Debug, Default)]
struct JwksCache {
    jwks_uri: Option<String>,
    jwks: Option<JwkSet>,
    fetched_at: Option<Instant>,
}

/// RS256 ID-token verifier backed by the issuer's JWKS, cached for
/// `jwks_cache_ttl_seconds`.
pub struct JwksVerifier {
    config: OidcConfig,
    http: reqwest::Client,
    cache: RwLock<JwksCache>,
}

impl JwksVerifier {
    pub fn new(config: OidcConfig) -> Result<Self, AuthError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_seconds))
            .build()
            .map_err(|e| AuthError::Misconfigured(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            config,
            http,
            cache: RwLock::new(JwksCache::default()),
        })
    }

    fn issuer(&self) -> Result<&str, AuthError> {
        self.config
            .issuer_url
            .as_deref()
            .ok_or_else(|| AuthError::Misconfigured("auth.oidc.issuer_url is not set".to_string()))
    }

    fn audience(&self) -> Result<&str, AuthError> {
        self.config
            .audience
            .as_deref()
            .ok_or_else(|| AuthError::Misconfigured("auth.oidc.audience is not set".to_string()))
    }

    async fn jwks(&self, force_refresh: bool) -> Result<JwkSet, AuthError> {
        let ttl = Duration::from_secs(self.config.jwks_cache_ttl_seconds);

        if !force_refresh {
            let cache = self.cache.read().await;
            if let (Some(jwks), Some(fetched_at)) = (&cache.jwks, cache.fetched_at) {
                if fetched_at.elapsed() <= ttl {
                    return Ok(jwks.clone());
                }
            }
        }

        let jwks_uri = self.jwks_uri().await?;
        let jwks: JwkSet = self.fetch_json(&jwks_uri, "JWKS").await?;
        tracing::debug!(keys = jwks.keys.len(), "Refreshed identity provider keys");

        let mut cache = self.cache.write().await;
        cache.jwks = Some(jwks.clone());
        cache.jwks_uri = Some(jwks_uri);
        cache.fetched_at = Some(Instant::now());
        Ok(jwks)
    }

    async fn jwks_uri(&self) -> Result<String, AuthError> {
        if let Some(uri) = self.config.jwks_url.clone() {
            return Ok(uri);
        }
        if let Some(uri) = self.cache.read().await.jwks_uri.clone() {
            return Ok(uri);
        }

        let url = format!(
            "{}/.well-known/openid-configuration",
            self.issuer()?.trim_end_matches('/')
        );
        let doc: OidcDiscovery = self.fetch_json(&url, "OIDC discovery").await?;
        Ok(doc.jwks_uri)
    }

    async fn fetch_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        what: &str,
    ) -> Result<T, AuthError> {
        let res = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| AuthError::Upstream(format!("{what} fetch failed: {e}")))?;
        if !res.status().is_success() {
            return Err(AuthError::Upstream(format!(
                "{what} returned HTTP {}",
                res.status()
            )));
        }
        res.json::<T>()
            .await
            .map_err(|e| AuthError::Upstream(format!("{what} JSON parse failed: {e}")))
    }
}

#[async_trait]
impl IdentityVerifier for JwksVerifier {
    async fn verify(&self, token: &str) -> Result<Principal, AuthError> {
        let issuer = self.issuer()?;
        let audience = self.audience()?;

        let header = decode_header(token)
            .map_err(|e| AuthError::InvalidToken(format!("Failed to decode JWT header: {e}")))?;
        let kid = header
            .kid
            .ok_or_else(|| AuthError::InvalidToken("JWT header missing 'kid'".to_string()))?;
        if header.alg != Algorithm::RS256 {
            return Err(AuthError::InvalidToken(format!(
                "Unsupported JWT alg '{:?}' (only RS256 is supported)",
                header.alg
            )));
        }

        // Providers rotate keys; an unknown kid forces one refresh.
        let jwks = self.jwks(false).await?;
        let jwk = match jwks.find(&kid) {
            Some(jwk) => jwk.clone(),
            None => self
                .jwks(true)
                .await?
                .find(&kid)
                .cloned()
                .ok_or_else(|| AuthError::InvalidToken(format!("No matching JWK for kid '{kid}'")))?,
        };
        let decoding_key = decoding_key_from_jwk(&jwk)?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_issuer(&[issuer]);
        validation.set_audience(&[audience]);
        validation.leeway = 60;

        let data = decode::<JsonValue>(token, &decoding_key, &validation)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;
        Principal::from_claims(&data.claims)
    }
}

fn decoding_key_from_jwk(jwk: &jsonwebtoken::jwk::Jwk) -> Result<DecodingKey, AuthError> {
    match &jwk.algorithm {
        AlgorithmParameters::RSA(rsa) => DecodingKey::from_rsa_components(&rsa.n, &rsa.e)
            .map_err(|e| AuthError::InvalidToken(format!("Failed to build RSA decoding key: {e}"))),
        _ => Err(AuthError::InvalidToken(
            "Unsupported JWK type (only RSA keys are supported)".to_string(),
        )),
    }
}

fn bearer_token(headers: &HeaderMap) -> Result<Option<&str>, AuthError> {
    let Some(authz) = headers.get(header::AUTHORIZATION) else {
        return Ok(None);
    };
    let authz = authz.to_str().map_err(|_| {
        AuthError::InvalidToken("Authorization header is not valid UTF-8".to_string())
    })?;

    authz
        .strip_prefix("Bearer ")
        .or_else(|| authz.strip_prefix("bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(Some)
        .ok_or_else(|| {
            AuthError::InvalidToken("Authorization header must be 'Bearer <token>'".to_string())
        })
}

#[derive(Clone)]
pub struct AuthManager {
    enabled: bool,
    verifier: Arc<dyn IdentityVerifier>,
}

impl AuthManager {
    pub fn new(config: &AuthConfig) -> Result<Self, AuthError> {
        let verifier = JwksVerifier::new(config.oidc.clone())?;
        Ok(Self::with_verifier(config.enabled, Arc::new(verifier)))
    }

    pub fn with_verifier(enabled: bool, verifier: Arc<dyn IdentityVerifier>) -> Self {
        Self { enabled, verifier }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// `Ok(None)` only when authentication is disabled.
    pub async fn authenticate_headers(
        &self,
        headers: &HeaderMap,
    ) -> Result<Option<Principal>, AuthError> {
        if !self.enabled {
            return Ok(None);
        }
        let token = bearer_token(headers)?.ok_or(AuthError::MissingToken)?;
        self.verifier.verify(token).await.map(Some)
    }
}

/// Extractor for the principal attached by [`auth_middleware`].
///
/// Use `Option<AuthenticatedPrincipal>` where an anonymous caller is allowed.
#[derive(Debug, Clone)]
pub struct AuthenticatedPrincipal(pub Principal);

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedPrincipal
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .map(AuthenticatedPrincipal)
            .ok_or(AuthError::MissingToken)
    }
}

/// Attaches the verified `Principal` on protected routes, or rejects.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: axum::extract::Request,
    next: axum::middleware::Next,
) -> Response {
    if !state.auth.enabled() || req.method() == Method::OPTIONS {
        return next.run(req).await;
    }

    match state.auth.authenticate_headers(req.headers()).await {
        Ok(Some(principal)) => {
            tracing::debug!(uid = %principal.uid, "Authenticated request");
            req.extensions_mut().insert(principal);
            next.run(req).await
        }
        Ok(None) => next.run(req).await,
        Err(err) => {
            let request_id = req
                .extensions()
                .get::<RequestContext>()
                .map(|c| c.request_id.as_str())
                .unwrap_or_default();
            match &err {
                AuthError::Misconfigured(_) | AuthError::Upstream(_) => {
                    tracing::error!(request_id, error = %err, "Authentication failed")
                }
                _ => tracing::warn!(request_id, error = %err, "Rejected request"),
            }
            err.into_response()
        }
    }
}
