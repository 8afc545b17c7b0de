//! Axum route handlers for published portfolios: public fetch by slug,
//! wholesale config replacement, and claiming a temporary portfolio.

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::portfolio::{effective_section_order, PortfolioConfig, PortfolioRow};
use crate::models::user::UserRow;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct PortfolioResponse {
    pub portfolio: PortfolioRow,
    pub username: String,
    pub avatar: Option<String>,
    pub is_temporary: bool,
    /// Render order for the public page: the config's own `sectionOrder`
    /// when present, else the default.
    pub section_order: Vec<String>,
}

impl PortfolioResponse {
    fn new(portfolio: PortfolioRow, owner: UserRow) -> Self {
        let section_order = effective_section_order(&portfolio.config);
        Self {
            portfolio,
            username: owner.username,
            avatar: owner.avatar,
            is_temporary: owner.is_temporary,
            section_order,
        }
    }
}

/// GET /api/v1/portfolios/:slug
///
/// Public fetch of a published portfolio and its owner's display fields.
pub async fn handle_get_portfolio(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<PortfolioResponse>, AppError> {
    let portfolio: PortfolioRow = sqlx::query_as("SELECT * FROM portfolios WHERE slug = $1")
        .bind(&slug)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Portfolio '{slug}' not found")))?;

    let owner: UserRow = sqlx::query_as("SELECT * FROM users WHERE id = $1")
        .bind(portfolio.user_id)
        .fetch_one(&state.db)
        .await?;

    Ok(Json(PortfolioResponse::new(portfolio, owner)))
}

#[derive(Debug, Deserialize)]
pub struct UpdateConfigRequest {
    pub user_id: Uuid,
    pub config: Value,
}

/// PUT /api/v1/portfolios/:slug
///
/// Replaces the config blob wholesale — there is no field-level merge.
pub async fn handle_update_config(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(request): Json<UpdateConfigRequest>,
) -> Result<Json<PortfolioResponse>, AppError> {
    // Reject configs that do not fit the portfolio shape before touching the DB
    let config: PortfolioConfig = serde_json::from_value(request.config)
        .map_err(|e| AppError::Validation(format!("Invalid portfolio config: {e}")))?;
    let config_json = serde_json::to_value(&config).map_err(|e| AppError::Internal(e.into()))?;

    let portfolio: PortfolioRow = sqlx::query_as("SELECT * FROM portfolios WHERE slug = $1")
        .bind(&slug)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Portfolio '{slug}' not found")))?;

    if portfolio.user_id != request.user_id {
        return Err(AppError::Forbidden);
    }

    let updated: PortfolioRow = sqlx::query_as(
        "UPDATE portfolios SET config = $1, updated_at = NOW() WHERE id = $2 RETURNING *",
    )
    .bind(&config_json)
    .bind(portfolio.id)
    .fetch_one(&state.db)
    .await?;

    let owner: UserRow = sqlx::query_as("SELECT * FROM users WHERE id = $1")
        .bind(updated.user_id)
        .fetch_one(&state.db)
        .await?;

    Ok(Json(PortfolioResponse::new(updated, owner)))
}

#[derive(Debug, Deserialize)]
pub struct ClaimRequest {
    pub user_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct ClaimResponse {
    pub success: bool,
    pub portfolio: PortfolioRow,
}

/// POST /api/v1/portfolios/:slug/claim
///
/// Transfers a temporary user's portfolio to an existing account and deletes
/// the temporary user. The config itself is untouched by the transfer. The
/// claimer's first portfolio becomes their default.
pub async fn handle_claim(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(request): Json<ClaimRequest>,
) -> Result<Json<ClaimResponse>, AppError> {
    let mut tx = state.db.begin().await?;

    let portfolio: PortfolioRow = sqlx::query_as("SELECT * FROM portfolios WHERE slug = $1")
        .bind(&slug)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Portfolio '{slug}' not found")))?;

    let owner: UserRow = sqlx::query_as("SELECT * FROM users WHERE id = $1")
        .bind(portfolio.user_id)
        .fetch_one(&mut *tx)
        .await?;

    if !owner.is_temporary {
        return Err(AppError::Validation(
            "This portfolio is already saved".to_string(),
        ));
    }

    let claimer: UserRow = sqlx::query_as("SELECT * FROM users WHERE id = $1")
        .bind(request.user_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", request.user_id)))?;

    let mut claimed: PortfolioRow = sqlx::query_as(
        "UPDATE portfolios SET user_id = $1, updated_at = NOW() WHERE id = $2 RETURNING *",
    )
    .bind(claimer.id)
    .bind(portfolio.id)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(owner.id)
        .execute(&mut *tx)
        .await?;

    let owned: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM portfolios WHERE user_id = $1")
        .bind(claimer.id)
        .fetch_one(&mut *tx)
        .await?;

    if owned == 1 {
        claimed = sqlx::query_as(
            "UPDATE portfolios SET is_default = TRUE, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(claimed.id)
        .fetch_one(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    info!("Portfolio '{slug}' claimed by user {}", claimer.id);
    Ok(Json(ClaimResponse {
        success: true,
        portfolio: claimed,
    }))
}
