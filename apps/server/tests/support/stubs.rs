use aarogya::{
    auth::{AuthError, IdentityVerifier, Principal},
    models::{AgentPayload, KnowledgePayload, MessagePayload, SessionPayload},
    services::{empty_interactions, ConsultationGateway, GeocodedAddress, ThirdPartyGateway},
    Error, Result,
};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        Mutex,
    },
};

/// Accepts a fixed set of opaque tokens.
pub struct StaticVerifier {
    tokens: HashMap<String, Principal>,
}

impl StaticVerifier {
    pub fn single(token: &str, uid: &str) -> Self {
        let principal = Principal {
            uid: uid.to_string(),
            email: Some(format!("{uid}@example.com")),
            name: Some("Test User".to_string()),
            email_verified: true,
            issuer: Some("https://securetoken.google.com/aarogya-test".to_string()),
            audience: Some("aarogya-test".to_string()),
            sign_in_provider: Some("password".to_string()),
        };
        Self {
            tokens: HashMap::from([(token.to_string(), principal)]),
        }
    }
}

#[async_trait]
impl IdentityVerifier for StaticVerifier {
    async fn verify(&self, token: &str) -> std::result::Result<Principal, AuthError> {
        self.tokens
            .get(token)
            .cloned()
            .ok_or_else(|| AuthError::InvalidToken("unknown token".to_string()))
    }
}

/// Fixed provider responses; remembers the last query it saw.
#[derive(Default)]
pub struct CannedThirdPartyGateway {
    pub last_query: Mutex<Option<String>>,
}

impl CannedThirdPartyGateway {
    fn remember(&self, query: String) {
        *self.last_query.lock().unwrap() = Some(query);
    }

    pub fn last_query(&self) -> Option<String> {
        self.last_query.lock().unwrap().clone()
    }
}

#[async_trait]
impl ThirdPartyGateway for CannedThirdPartyGateway {
    async fn search_fda_drugs(&self, query: &str, limit: u32) -> Vec<Value> {
        self.remember(format!("fda:{query}:{limit}"));
        vec![json!({"openfda": {"brand_name": [query]}})]
    }

    async fn search_rxnorm_drugs(&self, query: &str) -> Vec<Value> {
        self.remember(format!("rxnorm:{query}"));
        vec![json!({"tty": "SBD", "conceptProperties": []})]
    }

    async fn drug_interactions(&self, drugs: &[String]) -> Value {
        self.remember(format!("interactions:{}", drugs.join(",")));
        empty_interactions()
    }

    async fn search_places(&self, query: &str, location: &str, place_type: &str) -> Vec<Value> {
        self.remember(format!("places:{query}:{location}:{place_type}"));
        Vec::new()
    }

    async fn place_details(&self, place_id: &str) -> Value {
        self.remember(format!("details:{place_id}"));
        json!({"name": "Apollo Hospital"})
    }

    async fn geocode(&self, address: &str) -> Option<GeocodedAddress> {
        self.remember(format!("geocode:{address}"));
        (address == "MG Road, Bangalore").then(|| GeocodedAddress {
            latitude: 12.9756,
            longitude: 77.6050,
            formatted_address: "MG Road, Bengaluru, Karnataka, India".to_string(),
        })
    }

    async fn who_health_data(&self, indicator: &str, country: &str) -> Value {
        self.remember(format!("who:{indicator}:{country}"));
        json!({"fact": []})
    }
}

/// Records every payload; fails every call once `fail` is set.
#[derive(Default)]
pub struct RecordingConsultationGateway {
    pub fail: AtomicBool,
    pub agents: Mutex<Vec<AgentPayload>>,
    pub sessions: Mutex<Vec<SessionPayload>>,
    pub messages: Mutex<Vec<(String, MessagePayload)>>,
    pub knowledge: Mutex<Vec<(String, KnowledgePayload)>>,
}

impl RecordingConsultationGateway {
    pub fn set_failing(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    fn check(&self) -> Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            Err(Error::UpstreamUnavailable("tavus returned HTTP 500".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ConsultationGateway for RecordingConsultationGateway {
    async fn create_agent(&self, agent: &AgentPayload) -> Result<Value> {
        self.check()?;
        self.agents.lock().unwrap().push(agent.clone());
        Ok(json!({"agent_id": "agent_001", "name": agent.name}))
    }

    async fn list_agents(&self) -> Result<Vec<Value>> {
        self.check()?;
        Ok(vec![json!({"agent_id": "agent_001"})])
    }

    async fn update_agent_knowledge(
        &self,
        agent_id: &str,
        knowledge: &KnowledgePayload,
    ) -> Result<Value> {
        self.check()?;
        self.knowledge
            .lock()
            .unwrap()
            .push((agent_id.to_string(), knowledge.clone()));
        Ok(json!({"status": "updated"}))
    }

    async fn start_session(&self, session: &SessionPayload) -> Result<Value> {
        self.check()?;
        self.sessions.lock().unwrap().push(session.clone());
        Ok(json!({"session_id": "session_001", "status": "active"}))
    }

    async fn send_message(&self, session_id: &str, message: &MessagePayload) -> Result<Value> {
        self.check()?;
        self.messages
            .lock()
            .unwrap()
            .push((session_id.to_string(), message.clone()));
        Ok(json!({"response": "Please rest and stay hydrated."}))
    }

    async fn end_session(&self, _session_id: &str) -> Result<Value> {
        self.check()?;
        Ok(json!({"status": "ended"}))
    }

    async fn session_analytics(&self, session_id: &str) -> Result<Value> {
        self.check()?;
        Ok(json!({"session_id": session_id, "duration_minutes": 12}))
    }
}
