//! Axum route handlers for session lifecycle and credentials.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::llm_client::ApiKey;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct CreateSessionRequest {
    #[serde(default)]
    pub api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SetCredentialRequest {
    pub api_key: String,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_id: Uuid,
    pub created_at: DateTime<Utc>,
    /// True when the session or the operator supplies a key.
    pub has_credential: bool,
    pub has_strategy: bool,
}

/// POST /api/v1/sessions
///
/// The body is optional. When present it must be a valid request, and an
/// `api_key` it carries must not be blank.
pub async fn handle_create_session(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<SessionResponse>), AppError> {
    let request = parse_create_request(&body)?;
    let api_key = match request.api_key {
        Some(raw) => Some(
            ApiKey::new(raw)
                .ok_or_else(|| AppError::Validation("api_key cannot be empty".to_string()))?,
        ),
        None => None,
    };

    let id = state.sessions.create(api_key).await;
    let session = state.sessions.acquire_read(id).await?;
    Ok((
        StatusCode::CREATED,
        Json(SessionResponse {
            session_id: session.id,
            created_at: session.created_at,
            has_credential: session.api_key.is_some() || state.default_api_key().is_some(),
            has_strategy: false,
        }),
    ))
}

fn parse_create_request(body: &[u8]) -> Result<CreateSessionRequest, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(CreateSessionRequest::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| AppError::Validation(format!("Invalid session request: {e}")))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = state.sessions.acquire_read(session_id).await?;
    Ok(Json(SessionResponse {
        session_id: session.id,
        created_at: session.created_at,
        has_credential: session.api_key.is_some() || state.default_api_key().is_some(),
        has_strategy: session.store.get().is_some(),
    }))
}

/// PUT /api/v1/sessions/:id/credential
///
/// Attaches an API key to the session, replacing any previous one.
/// The key is held in memory for the life of the session only.
pub async fn handle_set_credential(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<SetCredentialRequest>,
) -> Result<StatusCode, AppError> {
    let api_key = ApiKey::new(request.api_key)
        .ok_or_else(|| AppError::Validation("api_key cannot be empty".to_string()))?;

    let mut session = state.sessions.acquire_write(session_id).await?;
    session.api_key = Some(api_key);
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_end_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.remove(session_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
