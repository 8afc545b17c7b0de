pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::ingest;
use crate::portfolio;
use crate::state::AppState;

/// Resume uploads are capped at 10 MB.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/portfolios", post(ingest::handlers::handle_upload))
        .route(
            "/api/v1/portfolios/:slug",
            get(portfolio::handlers::handle_get_portfolio)
                .put(portfolio::handlers::handle_update_config),
        )
        .route(
            "/api/v1/portfolios/:slug/claim",
            post(portfolio::handlers::handle_claim),
        )
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}
