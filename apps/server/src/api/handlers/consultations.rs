//! AI video consultation endpoints. Provider failures surface as 502.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

use crate::{
    api::extractors::{JsonBody, ValidatedJson},
    auth::AuthenticatedPrincipal,
    models::{AgentConfig, AgentKnowledge, ConsultationMessage, CreateAgentRequest, SessionRequest},
    state::AppState,
    Result,
};

pub async fn agent_configs(
    State(state): State<AppState>,
) -> Json<BTreeMap<&'static str, AgentConfig>> {
    Json(state.consultations.agent_configs())
}

pub async fn list_agents(State(state): State<AppState>) -> Result<Json<Vec<JsonValue>>> {
    Ok(Json(state.consultations.list_agents().await?))
}

pub async fn create_agent(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateAgentRequest>,
) -> Result<(StatusCode, Json<JsonValue>)> {
    let agent = state.consultations.create_agent(request).await?;
    Ok((StatusCode::CREATED, Json(agent)))
}

pub async fn update_agent_knowledge(
    State(state): State<AppState>,
    Path(agent_id): Path<String>,
    JsonBody(knowledge): JsonBody<AgentKnowledge>,
) -> Result<Json<JsonValue>> {
    Ok(Json(
        state
            .consultations
            .update_knowledge(&agent_id, knowledge)
            .await?,
    ))
}

pub async fn start_session(
    State(state): State<AppState>,
    principal: Option<AuthenticatedPrincipal>,
    ValidatedJson(request): ValidatedJson<SessionRequest>,
) -> Result<(StatusCode, Json<JsonValue>)> {
    let user_id = principal.as_ref().map(|p| p.0.uid.as_str());
    let session = state.consultations.start_session(user_id, request).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

pub async fn send_message(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    ValidatedJson(message): ValidatedJson<ConsultationMessage>,
) -> Result<Json<JsonValue>> {
    Ok(Json(
        state
            .consultations
            .send_message(&session_id, message)
            .await?,
    ))
}

pub async fn end_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<JsonValue>> {
    Ok(Json(state.consultations.end_session(&session_id).await?))
}

pub async fn session_analytics(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<JsonValue>> {
    Ok(Json(state.consultations.analytics(&session_id).await?))
}
