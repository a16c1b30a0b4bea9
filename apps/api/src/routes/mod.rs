pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::sessions::handlers as sessions;
use crate::state::AppState;
use crate::strategy::handlers as strategy;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Sessions
        .route("/api/v1/sessions", post(sessions::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(sessions::handle_get_session).delete(sessions::handle_end_session),
        )
        .route(
            "/api/v1/sessions/:id/credential",
            put(sessions::handle_set_credential),
        )
        // Strategy
        .route(
            "/api/v1/sessions/:id/strategy",
            post(strategy::handle_generate).get(strategy::handle_get_strategy),
        )
        .route(
            "/api/v1/sessions/:id/angles/:avatar_name",
            get(strategy::handle_get_angle),
        )
        .route(
            "/api/v1/sessions/:id/hero",
            post(strategy::handle_render_hero),
        )
        .with_state(state)
}
