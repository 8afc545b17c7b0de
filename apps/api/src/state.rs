use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::llm_client::CompletionClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Completion seam — `CerebrasClient` in production, mocks in tests.
    pub llm: Arc<dyn CompletionClient>,
    pub config: Config,
}
