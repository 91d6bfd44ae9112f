//! Video-agent provider client (Tavus).
//!
//! Unlike the data lookups, consultation calls change provider state, so
//! failures are surfaced to the caller as `UpstreamUnavailable`.

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::time::{Duration, Instant};

use crate::{
    config::TavusConfig,
    metrics,
    models::{AgentPayload, KnowledgePayload, MessagePayload, SessionPayload},
    Error, Result,
};

const PROVIDER: &str = "tavus";

#[async_trait]
pub trait ConsultationGateway: Send + Sync {
    async fn create_agent(&self, agent: &AgentPayload) -> Result<JsonValue>;

    async fn list_agents(&self) -> Result<Vec<JsonValue>>;

    async fn update_agent_knowledge(
        &self,
        agent_id: &str,
        knowledge: &KnowledgePayload,
    ) -> Result<JsonValue>;

    async fn start_session(&self, session: &SessionPayload) -> Result<JsonValue>;

    async fn send_message(&self, session_id: &str, message: &MessagePayload)
        -> Result<JsonValue>;

    async fn end_session(&self, session_id: &str) -> Result<JsonValue>;

    async fn session_analytics(&self, session_id: &str) -> Result<JsonValue>;
}

pub struct TavusClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl TavusClient {
    pub fn new(config: &TavusConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| Error::Internal(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    async fn call<B: Serialize + Sync>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        expected: StatusCode,
    ) -> Result<JsonValue> {
        let Some(api_key) = self.api_key.as_deref() else {
            metrics::record_upstream(PROVIDER, "skipped", Duration::ZERO);
            return Err(Error::UpstreamUnavailable(
                "video consultation provider is not configured".to_string(),
            ));
        };

        let url = format!("{}{}", self.base_url, path);
        let started = Instant::now();

        let mut request = self.client.request(method.clone(), &url).bearer_auth(api_key);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            tracing::error!(provider = PROVIDER, %method, path, error = %e, "Provider request failed");
            metrics::record_upstream(PROVIDER, "transport_error", started.elapsed());
            Error::UpstreamUnavailable(format!("{PROVIDER} request failed"))
        })?;

        let status = response.status();
        if status != expected {
            let detail = response.text().await.unwrap_or_default();
            tracing::error!(
                provider = PROVIDER,
                %method,
                path,
                status = status.as_u16(),
                body = %detail,
                "Provider returned unexpected status"
            );
            metrics::record_upstream(PROVIDER, "http_error", started.elapsed());
            return Err(Error::UpstreamUnavailable(format!(
                "{PROVIDER} returned HTTP {}",
                status.as_u16()
            )));
        }

        let body = response.json::<JsonValue>().await.map_err(|e| {
            tracing::error!(provider = PROVIDER, error = %e, "Provider response was not JSON");
            metrics::record_upstream(PROVIDER, "decode_error", started.elapsed());
            Error::UpstreamUnavailable(format!("{PROVIDER} returned an invalid response"))
        })?;

        metrics::record_upstream(PROVIDER, "ok", started.elapsed());
        Ok(body)
    }
}

#[async_trait]
impl ConsultationGateway for TavusClient {
    async fn create_agent(&self, agent: &AgentPayload) -> Result<JsonValue> {
        self.call(Method::POST, "/agents", Some(agent), StatusCode::CREATED)
            .await
    }

    async fn list_agents(&self) -> Result<Vec<JsonValue>> {
        let body = self
            .call::<()>(Method::GET, "/agents", None, StatusCode::OK)
            .await?;
        Ok(body
            .get("agents")
            .and_then(|a| a.as_array())
            .cloned()
            .unwrap_or_default())
    }

    async fn update_agent_knowledge(
        &self,
        agent_id: &str,
        knowledge: &KnowledgePayload,
    ) -> Result<JsonValue> {
        let path = format!("/agents/{}/knowledge", urlencoding::encode(agent_id));
        self.call(Method::PUT, &path, Some(knowledge), StatusCode::OK)
            .await
    }

    async fn start_session(&self, session: &SessionPayload) -> Result<JsonValue> {
        self.call(Method::POST, "/sessions", Some(session), StatusCode::CREATED)
            .await
    }

    async fn send_message(
        &self,
        session_id: &str,
        message: &MessagePayload,
    ) -> Result<JsonValue> {
        let path = format!("/sessions/{}/messages", urlencoding::encode(session_id));
        self.call(Method::POST, &path, Some(message), StatusCode::OK)
            .await
    }

    async fn end_session(&self, session_id: &str) -> Result<JsonValue> {
        let path = format!("/sessions/{}/end", urlencoding::encode(session_id));
        self.call::<()>(Method::POST, &path, None, StatusCode::OK)
            .await
    }

    async fn session_analytics(&self, session_id: &str) -> Result<JsonValue> {
        let path = format!("/sessions/{}/analytics", urlencoding::encode(session_id));
        self.call::<()>(Method::GET, &path, None, StatusCode::OK)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_api_key_is_upstream_unavailable() {
        let client = TavusClient::new(&TavusConfig::default()).unwrap();
        let err = client.list_agents().await.unwrap_err();
        assert!(matches!(err, Error::UpstreamUnavailable(_)));
    }
}
