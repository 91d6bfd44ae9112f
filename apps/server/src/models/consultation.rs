//! AI video-consultation requests and the payloads forwarded to the
//! video-agent provider.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use validator::Validate;

/// Persona preset for a health agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    pub name: String,
    pub description: String,
    pub personality: String,
    pub specialties: Vec<String>,
    pub avatar_type: String,
    pub voice_id: String,
}

/// Agent creation request: an optional preset name plus field overrides.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateAgentRequest {
    pub preset: Option<String>,
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub personality: Option<String>,
    pub voice_id: Option<String>,
    #[validate(range(min = 0.25, max = 4.0, message = "speed must be within [0.25, 4]"))]
    pub speed: Option<f64>,
    #[validate(range(min = 0.25, max = 4.0, message = "pitch must be within [0.25, 4]"))]
    pub pitch: Option<f64>,
    pub avatar_type: Option<String>,
    pub gender: Option<String>,
    pub age_range: Option<String>,
    pub specialties: Option<Vec<String>>,
    pub languages: Option<Vec<String>>,
    pub training_data: Option<Vec<JsonValue>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentPayload {
    pub name: String,
    pub description: String,
    pub personality: String,
    pub voice_settings: VoiceSettings,
    pub appearance: Appearance,
    pub knowledge_base: KnowledgeBase,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VoiceSettings {
    pub voice_id: String,
    pub speed: f64,
    pub pitch: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Appearance {
    pub avatar_type: String,
    pub gender: String,
    pub age_range: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KnowledgeBase {
    pub medical_specialties: Vec<String>,
    pub languages: Vec<String>,
    pub training_data: Vec<JsonValue>,
}

impl AgentPayload {
    /// Field precedence: request override, then preset, then house default.
    pub fn resolve(request: CreateAgentRequest, preset: Option<&AgentConfig>) -> Self {
        let pick = |value: Option<String>, from_preset: Option<&String>, default: &str| {
            value
                .or_else(|| from_preset.cloned())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            name: pick(request.name, preset.map(|p| &p.name), "Dr. Aarogya"),
            description: pick(
                request.description,
                preset.map(|p| &p.description),
                "AI Health Companion",
            ),
            personality: pick(
                request.personality,
                preset.map(|p| &p.personality),
                "professional, empathetic, knowledgeable",
            ),
            voice_settings: VoiceSettings {
                voice_id: pick(request.voice_id, preset.map(|p| &p.voice_id), "default"),
                speed: request.speed.unwrap_or(1.0),
                pitch: request.pitch.unwrap_or(1.0),
            },
            appearance: Appearance {
                avatar_type: pick(request.avatar_type, preset.map(|p| &p.avatar_type), "doctor"),
                gender: request.gender.unwrap_or_else(|| "neutral".to_string()),
                age_range: request.age_range.unwrap_or_else(|| "30-40".to_string()),
            },
            knowledge_base: KnowledgeBase {
                medical_specialties: request
                    .specialties
                    .or_else(|| preset.map(|p| p.specialties.clone()))
                    .unwrap_or_else(|| vec!["general_medicine".to_string()]),
                languages: request
                    .languages
                    .unwrap_or_else(|| vec!["en".to_string(), "hi".to_string()]),
                training_data: request.training_data.unwrap_or_default(),
            },
        }
    }
}

/// Medical knowledge pushed to an existing agent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AgentKnowledge {
    pub guidelines: Vec<JsonValue>,
    pub drugs: Vec<JsonValue>,
    pub symptoms: Vec<JsonValue>,
    pub treatments: Vec<JsonValue>,
    pub emergency: Vec<JsonValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KnowledgePayload {
    pub medical_guidelines: Vec<JsonValue>,
    pub drug_database: Vec<JsonValue>,
    pub symptom_checker: Vec<JsonValue>,
    pub treatment_protocols: Vec<JsonValue>,
    pub emergency_procedures: Vec<JsonValue>,
}

impl From<AgentKnowledge> for KnowledgePayload {
    fn from(k: AgentKnowledge) -> Self {
        Self {
            medical_guidelines: k.guidelines,
            drug_database: k.drugs,
            symptom_checker: k.symptoms,
            treatment_protocols: k.treatments,
            emergency_procedures: k.emergency,
        }
    }
}

fn default_max_duration() -> u32 {
    30
}

fn default_language() -> String {
    "en".to_string()
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SessionRequest {
    #[validate(length(min = 1, message = "agent_id must not be empty"))]
    pub agent_id: String,
    #[serde(default = "default_max_duration")]
    #[validate(range(min = 1, max = 240, message = "max_duration must be 1-240 minutes"))]
    pub max_duration: u32,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub health_context: Map<String, JsonValue>,
    #[serde(default)]
    pub recording: bool,
    pub webhook_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionPayload {
    pub agent_id: String,
    pub user_id: String,
    pub session_type: &'static str,
    pub configuration: SessionConfiguration,
    pub webhook_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionConfiguration {
    pub max_duration_minutes: u32,
    pub language: String,
    pub health_context: Map<String, JsonValue>,
    pub privacy_mode: bool,
    pub recording_enabled: bool,
}

impl SessionPayload {
    pub fn new(user_id: String, request: SessionRequest) -> Self {
        Self {
            agent_id: request.agent_id,
            user_id,
            session_type: "health_consultation",
            configuration: SessionConfiguration {
                max_duration_minutes: request.max_duration,
                language: request.language,
                health_context: request.health_context,
                privacy_mode: true,
                recording_enabled: request.recording,
            },
            webhook_url: request.webhook_url,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ConsultationMessage {
    #[validate(length(min = 1, max = 4000, message = "message must be 1-4000 characters"))]
    pub message: String,
    pub context: Option<Map<String, JsonValue>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessagePayload {
    pub message: String,
    pub message_type: &'static str,
    pub context: Map<String, JsonValue>,
    pub timestamp: DateTime<Utc>,
}

impl MessagePayload {
    pub fn user_input(message: ConsultationMessage, timestamp: DateTime<Utc>) -> Self {
        Self {
            message: message.message,
            message_type: "user_input",
            context: message.context.unwrap_or_default(),
            timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pharmacist() -> AgentConfig {
        AgentConfig {
            name: "Pharmacist Raj".into(),
            description: "AI Pharmacist for Medicine Guidance".into(),
            personality: "knowledgeable, precise, safety-focused".into(),
            specialties: vec!["pharmacology".into()],
            avatar_type: "pharmacist".into(),
            voice_id: "professional_male".into(),
        }
    }

    #[test]
    fn bare_request_uses_house_defaults() {
        let payload = AgentPayload::resolve(CreateAgentRequest::default(), None);
        assert_eq!(payload.name, "Dr. Aarogya");
        assert_eq!(payload.knowledge_base.languages, vec!["en", "hi"]);
        assert_eq!(
            payload.knowledge_base.medical_specialties,
            vec!["general_medicine"]
        );
        assert_eq!(payload.voice_settings.speed, 1.0);
    }

    #[test]
    fn overrides_win_over_preset() {
        let request = CreateAgentRequest {
            name: Some("Dr. Meera".into()),
            ..Default::default()
        };
        let preset = pharmacist();
        let payload = AgentPayload::resolve(request, Some(&preset));
        assert_eq!(payload.name, "Dr. Meera");
        assert_eq!(payload.appearance.avatar_type, "pharmacist");
        assert_eq!(payload.knowledge_base.medical_specialties, vec!["pharmacology"]);
    }

    #[test]
    fn session_payload_forces_privacy_mode() {
        let request: SessionRequest =
            serde_json::from_value(serde_json::json!({"agent_id": "agent_1"})).unwrap();
        let payload = SessionPayload::new("user_1".into(), request);
        assert!(payload.configuration.privacy_mode);
        assert_eq!(payload.configuration.max_duration_minutes, 30);
        assert_eq!(payload.configuration.language, "en");
        assert_eq!(payload.session_type, "health_consultation");
    }
}
