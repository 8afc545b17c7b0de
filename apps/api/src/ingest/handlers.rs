//! Axum route handlers for resume upload.

use axum::extract::{Multipart, State};
use axum::Json;
use bytes::Bytes;
use chrono::{DateTime, Duration, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::Serialize;
use serde_json::Value;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::ingest::pipeline::{run_pipeline, PipelineOutcome};
use crate::models::portfolio::PortfolioRow;
use crate::models::user::UserRow;
use crate::state::AppState;

const TEMP_USER_TTL_HOURS: i64 = 24;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub slug: String,
    pub username: String,
    pub avatar: String,
    pub is_temporary: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    pub config: Value,
}

/// POST /api/v1/portfolios
///
/// Multipart upload: `file` (PDF/DOCX) and an optional `user_id` text field.
/// Without `user_id` a temporary 24h user is created to own the portfolio;
/// with it, that user's portfolio config is wholly replaced.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let mut file: Option<(Bytes, String, String)> = None;
    let mut user_id: Option<Uuid> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        match field.name() {
            Some("file") => {
                let filename = field.file_name().unwrap_or("resume").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read file: {e}")))?;
                file = Some((data, content_type, filename));
            }
            Some("user_id") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid user_id field: {e}")))?;
                user_id = Some(
                    Uuid::parse_str(text.trim())
                        .map_err(|_| AppError::Validation("user_id must be a UUID".to_string()))?,
                );
            }
            _ => {}
        }
    }

    let (data, content_type, filename) =
        file.ok_or_else(|| AppError::Validation("No file provided".to_string()))?;

    info!(
        "Resume upload: {filename} ({content_type}, {} bytes, user_id={user_id:?})",
        data.len()
    );

    let outcome = run_pipeline(
        state.llm.as_ref(),
        &state.db,
        &data,
        &content_type,
        &filename,
    )
    .await?;
    let config_json =
        serde_json::to_value(&outcome.config).map_err(|e| AppError::Internal(e.into()))?;

    let response = match user_id {
        None => create_temporary_portfolio(&state.db, &outcome, config_json).await?,
        Some(id) => replace_user_portfolio(&state.db, id, &outcome, config_json).await?,
    };

    Ok(Json(response))
}

/// Creates a temporary user owning the new portfolio. The user expires after
/// 24 hours unless the portfolio is claimed.
async fn create_temporary_portfolio(
    pool: &PgPool,
    outcome: &PipelineOutcome,
    config: Value,
) -> Result<UploadResponse, AppError> {
    let user_id = Uuid::new_v4();
    let username = temp_username();
    let expires_at = Utc::now() + Duration::hours(TEMP_USER_TTL_HOURS);

    let mut tx = pool.begin().await?;

    sqlx::query(
        "INSERT INTO users (id, username, avatar, is_temporary, expires_at, created_at, updated_at)
         VALUES ($1, $2, $3, TRUE, $4, NOW(), NOW())",
    )
    .bind(user_id)
    .bind(&username)
    .bind(&outcome.avatar)
    .bind(expires_at)
    .execute(&mut *tx)
    .await
    .map_err(map_unique_violation)?;

    sqlx::query(
        "INSERT INTO portfolios (id, user_id, slug, config, is_default, created_at, updated_at)
         VALUES ($1, $2, $3, $4, FALSE, NOW(), NOW())",
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(&outcome.slug)
    .bind(&config)
    .execute(&mut *tx)
    .await
    .map_err(map_unique_violation)?;

    tx.commit().await?;

    info!("Temporary portfolio created: slug={}, expires {expires_at}", outcome.slug);
    Ok(UploadResponse {
        success: true,
        slug: outcome.slug.clone(),
        username,
        avatar: outcome.avatar.clone(),
        is_temporary: true,
        expires_at: Some(expires_at),
        config,
    })
}

/// Wholesale-replaces an existing user's portfolio config (keeping its slug),
/// or creates their first portfolio. The avatar is only set if the user has
/// none yet.
async fn replace_user_portfolio(
    pool: &PgPool,
    user_id: Uuid,
    outcome: &PipelineOutcome,
    config: Value,
) -> Result<UploadResponse, AppError> {
    let user: UserRow = sqlx::query_as("SELECT * FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {user_id} not found")))?;

    let avatar = match &user.avatar {
        Some(existing) => existing.clone(),
        None => {
            sqlx::query("UPDATE users SET avatar = $1, updated_at = NOW() WHERE id = $2")
                .bind(&outcome.avatar)
                .bind(user_id)
                .execute(pool)
                .await?;
            outcome.avatar.clone()
        }
    };

    let existing: Option<PortfolioRow> = sqlx::query_as(
        "SELECT * FROM portfolios WHERE user_id = $1 ORDER BY is_default DESC, created_at LIMIT 1",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    let slug = match existing {
        Some(portfolio) => {
            sqlx::query("UPDATE portfolios SET config = $1, updated_at = NOW() WHERE id = $2")
                .bind(&config)
                .bind(portfolio.id)
                .execute(pool)
                .await?;
            portfolio.slug
        }
        None => {
            sqlx::query(
                "INSERT INTO portfolios (id, user_id, slug, config, is_default, created_at, updated_at)
                 VALUES ($1, $2, $3, $4, TRUE, NOW(), NOW())",
            )
            .bind(Uuid::new_v4())
            .bind(user_id)
            .bind(&outcome.slug)
            .bind(&config)
            .execute(pool)
            .await
            .map_err(map_unique_violation)?;
            outcome.slug.clone()
        }
    };

    Ok(UploadResponse {
        success: true,
        slug,
        username: user.username,
        avatar,
        is_temporary: false,
        expires_at: None,
        config,
    })
}

/// The persistence-layer unique constraint is the real backstop for slug
/// races; surface it as a conflict rather than a generic database error.
fn map_unique_violation(e: sqlx::Error) -> AppError {
    let is_unique = e
        .as_database_error()
        .is_some_and(|db| db.is_unique_violation());
    if is_unique {
        AppError::Conflict("A record with this identifier already exists".to_string())
    } else {
        AppError::Database(e)
    }
}

fn temp_username() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(6)
        .map(char::from)
        .collect();
    format!("temp_{}_{}", Utc::now().timestamp_millis(), suffix.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_username_shape() {
        let username = temp_username();
        let mut parts = username.splitn(3, '_');
        assert_eq!(parts.next(), Some("temp"));
        assert!(parts.next().unwrap().parse::<i64>().is_ok());
        assert_eq!(parts.next().unwrap().len(), 6);
    }
}
