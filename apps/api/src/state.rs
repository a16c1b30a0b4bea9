use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::{ApiKey, CompletionClient};
use crate::sessions::SessionRegistry;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Completion backend. `LlmClient` in production, scripted in tests.
    pub llm: Arc<dyn CompletionClient>,
    pub config: Config,
    /// Per-session strategy stores. Owned here, never a process-wide static.
    pub sessions: SessionRegistry,
}

impl AppState {
    /// Operator-wide fallback key used when a session has not supplied its own.
    pub fn default_api_key(&self) -> Option<ApiKey> {
        self.config.openai_api_key.clone().and_then(ApiKey::new)
    }
}
