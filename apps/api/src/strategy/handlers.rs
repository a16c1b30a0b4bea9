//! Axum route handlers for strategy generation, angle selection, and hero rendering.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::hero::{render_hero_section, HeroSection};
use crate::sessions::Session;
use crate::state::AppState;
use crate::strategy::pipeline::{generate_strategy, GenerationInput};
use crate::strategy::schema::SalesAngle;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct StrategyResponse {
    pub product_name: String,
    pub main_pain_points: Vec<String>,
    pub sales_angles: Vec<SalesAngle>,
    /// Selectable keys for `/angles/:avatar_name` and `/hero`, in first-seen order.
    pub avatar_names: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct HeroRequest {
    pub avatar_name: String,
}

#[derive(Debug, Serialize)]
pub struct HeroResponse {
    pub avatar_name: String,
    pub section: HeroSection,
    /// The section pretty-printed for pasting into a theme.
    pub code: String,
}

impl StrategyResponse {
    fn from_session(session: &Session) -> Option<Self> {
        let output = session.store.get()?;
        Some(Self {
            product_name: session.product_name.clone().unwrap_or_default(),
            main_pain_points: output.main_pain_points.clone(),
            sales_angles: output.sales_angles.clone(),
            avatar_names: session
                .store
                .avatar_names()
                .into_iter()
                .map(str::to_string)
                .collect(),
        })
    }
}

fn no_strategy(session_id: Uuid) -> AppError {
    AppError::NotFound(format!("Session {session_id} has no generated strategy"))
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions/:id/strategy
///
/// Runs the full pipeline: preconditions → prompt → completion → validate.
/// On success the session's store is replaced; on any failure it is left untouched.
pub async fn handle_generate(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(input): Json<GenerationInput>,
) -> Result<Json<StrategyResponse>, AppError> {
    let mut session = state.sessions.acquire_write(session_id).await?;

    let api_key = session.api_key.clone().or_else(|| state.default_api_key());
    let output = generate_strategy(state.llm.as_ref(), api_key.as_ref(), &input).await?;

    session.store.set(output);
    session.product_name = Some(input.product_name);
    info!(
        "Session {} stored {} selectable angles",
        session_id,
        session.store.avatar_names().len()
    );

    StrategyResponse::from_session(&session)
        .map(Json)
        .ok_or_else(|| no_strategy(session_id))
}

/// GET /api/v1/sessions/:id/strategy
pub async fn handle_get_strategy(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<StrategyResponse>, AppError> {
    let session = state.sessions.acquire_read(session_id).await?;
    StrategyResponse::from_session(&session)
        .map(Json)
        .ok_or_else(|| no_strategy(session_id))
}

/// GET /api/v1/sessions/:id/angles/:avatar_name
pub async fn handle_get_angle(
    State(state): State<AppState>,
    Path((session_id, avatar_name)): Path<(Uuid, String)>,
) -> Result<Json<SalesAngle>, AppError> {
    let session = state.sessions.acquire_read(session_id).await?;
    let angle = select_angle(&session, session_id, &avatar_name)?;
    Ok(Json(angle.clone()))
}

/// POST /api/v1/sessions/:id/hero
///
/// Renders the chosen angle into the hero section template, using the product
/// name the current strategy was generated for.
pub async fn handle_render_hero(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<HeroRequest>,
) -> Result<Json<HeroResponse>, AppError> {
    let session = state.sessions.acquire_read(session_id).await?;
    let angle = select_angle(&session, session_id, &request.avatar_name)?;
    let product_name = session.product_name.as_deref().unwrap_or_default();

    let section = render_hero_section(angle, product_name);
    let code = section
        .to_pretty_json()
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize hero section: {e}")))?;

    Ok(Json(HeroResponse {
        avatar_name: angle.avatar_name.clone(),
        section,
        code,
    }))
}

fn select_angle<'a>(
    session: &'a Session,
    session_id: Uuid,
    avatar_name: &str,
) -> Result<&'a SalesAngle, AppError> {
    if session.store.get().is_none() {
        return Err(no_strategy(session_id));
    }
    session
        .store
        .lookup(avatar_name)
        .ok_or_else(|| AppError::NotFound(format!("No sales angle named {avatar_name:?}")))
}
