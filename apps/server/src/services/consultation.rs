//! AI video consultations: agent presets plus the provider round-trips.

use chrono::Utc;
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::{
    catalog::reference,
    models::{
        AgentConfig, AgentKnowledge, AgentPayload, ConsultationMessage, CreateAgentRequest,
        KnowledgePayload, MessagePayload, SessionPayload, SessionRequest,
    },
    services::tavus::ConsultationGateway,
    Error, Result,
};

/// User id recorded on sessions started without a verified principal.
pub const ANONYMOUS_USER: &str = "anonymous";

pub struct ConsultationService {
    gateway: Arc<dyn ConsultationGateway>,
}

impl ConsultationService {
    pub fn new(gateway: Arc<dyn ConsultationGateway>) -> Self {
        Self { gateway }
    }

    pub fn agent_configs(&self) -> BTreeMap<&'static str, AgentConfig> {
        reference::agent_presets().into_iter().collect()
    }

    pub async fn list_agents(&self) -> Result<Vec<JsonValue>> {
        self.gateway.list_agents().await
    }

    pub async fn create_agent(&self, request: CreateAgentRequest) -> Result<JsonValue> {
        let preset = match request.preset.as_deref() {
            Some(name) => Some(reference::agent_preset(name).ok_or_else(|| {
                Error::InvalidInput(format!("Unknown agent preset: {name}"))
            })?),
            None => None,
        };

        let payload = AgentPayload::resolve(request, preset.as_ref());
        let agent = self.gateway.create_agent(&payload).await?;
        tracing::info!(agent_name = %payload.name, "Created consultation agent");
        Ok(agent)
    }

    pub async fn update_knowledge(
        &self,
        agent_id: &str,
        knowledge: AgentKnowledge,
    ) -> Result<JsonValue> {
        self.gateway
            .update_agent_knowledge(agent_id, &KnowledgePayload::from(knowledge))
            .await
    }

    /// Starts a session for `user_id`, or for the anonymous user when the
    /// request carries no verified identity.
    pub async fn start_session(
        &self,
        user_id: Option<&str>,
        request: SessionRequest,
    ) -> Result<JsonValue> {
        let user_id = user_id.unwrap_or(ANONYMOUS_USER).to_string();
        let payload = SessionPayload::new(user_id, request);
        let session = self.gateway.start_session(&payload).await?;
        tracing::info!(agent_id = %payload.agent_id, "Started consultation session");
        Ok(session)
    }

    pub async fn send_message(
        &self,
        session_id: &str,
        message: ConsultationMessage,
    ) -> Result<JsonValue> {
        let payload = MessagePayload::user_input(message, Utc::now());
        self.gateway.send_message(session_id, &payload).await
    }

    pub async fn end_session(&self, session_id: &str) -> Result<JsonValue> {
        self.gateway.end_session(session_id).await
    }

    pub async fn analytics(&self, session_id: &str) -> Result<JsonValue> {
        self.gateway.session_analytics(session_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        agents: Mutex<Vec<AgentPayload>>,
        sessions: Mutex<Vec<SessionPayload>>,
    }

    #[async_trait]
    impl ConsultationGateway for Recorder {
        async fn create_agent(&self, agent: &AgentPayload) -> Result<JsonValue> {
            self.agents.lock().unwrap().push(agent.clone());
            Ok(json!({"agent_id": "agent_1"}))
        }

        async fn list_agents(&self) -> Result<Vec<JsonValue>> {
            Ok(vec![])
        }

        async fn update_agent_knowledge(
            &self,
            _agent_id: &str,
            _knowledge: &KnowledgePayload,
        ) -> Result<JsonValue> {
            Ok(json!({}))
        }

        async fn start_session(&self, session: &SessionPayload) -> Result<JsonValue> {
            self.sessions.lock().unwrap().push(session.clone());
            Ok(json!({"session_id": "session_1"}))
        }

        async fn send_message(&self, _id: &str, _m: &MessagePayload) -> Result<JsonValue> {
            Ok(json!({}))
        }

        async fn end_session(&self, _id: &str) -> Result<JsonValue> {
            Ok(json!({}))
        }

        async fn session_analytics(&self, _id: &str) -> Result<JsonValue> {
            Ok(json!({}))
        }
    }

    #[tokio::test]
    async fn preset_feeds_agent_payload() {
        let recorder = Arc::new(Recorder::default());
        let service = ConsultationService::new(recorder.clone());
        service
            .create_agent(CreateAgentRequest {
                preset: Some("pediatrician".into()),
                ..Default::default()
            })
            .await
            .unwrap();

        let agents = recorder.agents.lock().unwrap();
        assert_eq!(agents[0].name, "Dr. Priya");
    }

    #[tokio::test]
    async fn unknown_preset_is_rejected() {
        let service = ConsultationService::new(Arc::new(Recorder::default()));
        let err = service
            .create_agent(CreateAgentRequest {
                preset: Some("surgeon".into()),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[tokio::test]
    async fn session_without_principal_is_anonymous() {
        let recorder = Arc::new(Recorder::default());
        let service = ConsultationService::new(recorder.clone());
        let request: SessionRequest =
            serde_json::from_value(json!({"agent_id": "agent_1"})).unwrap();
        service.start_session(None, request).await.unwrap();

        assert_eq!(recorder.sessions.lock().unwrap()[0].user_id, ANONYMOUS_USER);
    }

    #[test]
    fn agent_configs_list_all_presets() {
        let service = ConsultationService::new(Arc::new(Recorder::default()));
        let keys: Vec<_> = service.agent_configs().into_keys().collect();
        assert_eq!(keys, vec!["general_doctor", "pediatrician", "pharmacist"]);
    }
}
