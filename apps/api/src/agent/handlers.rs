//! Axum route handlers for the Screenplay API.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::agent::messages::parse_messages;
use crate::config::AgentConfig;
use crate::errors::AppError;
use crate::screenplay::{enforce, fallback};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// `messages` is kept raw so a non-list value can be answered with a screenplay
/// instead of a rejection.
#[derive(Debug, Deserialize)]
pub struct ScreenplayRequest {
    #[serde(default)]
    pub messages: Value,
}

#[derive(Debug, Serialize)]
pub struct ScreenplayResponse {
    pub id: Uuid,
    pub screenplay: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct FormatRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct FormatResponse {
    pub screenplay: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/screenplay
///
/// Full pipeline: extract the story idea → generate → enforce screenplay format.
/// Always answers with a screenplay, including for unusable message lists.
pub async fn handle_screenplay(
    State(state): State<AppState>,
    payload: Result<Json<ScreenplayRequest>, JsonRejection>,
) -> Result<Json<ScreenplayResponse>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::Validation(e.body_text()))?;

    let screenplay = match parse_messages(&request.messages) {
        Some(messages) => state.agent.handle(&messages).await,
        None => fallback::invalid_messages(),
    };

    Ok(Json(ScreenplayResponse {
        id: Uuid::new_v4(),
        screenplay,
        created_at: Utc::now(),
    }))
}

/// POST /api/v1/format
///
/// Runs the format enforcer on caller-supplied text, without generation.
pub async fn handle_format(
    payload: Result<Json<FormatRequest>, JsonRejection>,
) -> Result<Json<FormatResponse>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::Validation(e.body_text()))?;

    Ok(Json(FormatResponse {
        screenplay: enforce(&request.text),
    }))
}

/// GET /api/v1/agent
///
/// Returns the agent manifest loaded at startup.
pub async fn handle_agent_manifest(State(state): State<AppState>) -> Json<AgentConfig> {
    Json(state.config.agent.clone())
}
