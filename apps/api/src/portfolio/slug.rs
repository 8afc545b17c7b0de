//! Slug allocation — derives a URL-safe slug from the person's name/title and
//! checks it against the persisted slug set.
//!
//! Check-then-use, not transactional: two concurrent uploads can race on the
//! same base name. The unique constraint on `portfolios.slug` is the real
//! backstop; a conflicting insert surfaces as a hard 409 at the handler.

use async_trait::async_trait;
use chrono::Utc;
use rand::distributions::Alphanumeric;
use rand::Rng;
use sqlx::PgPool;
use tracing::warn;

use crate::errors::AppError;

/// Bound on (generate candidate → check existence) iterations.
const MAX_ATTEMPTS: u32 = 10;
/// Cleaned base names are truncated to this many characters.
const BASE_MAX_LEN: usize = 15;

/// Existence lookup against the persisted slug set. A trait seam so the
/// allocator is testable without a database.
#[async_trait]
pub trait SlugIndex: Send + Sync {
    async fn slug_exists(&self, slug: &str) -> Result<bool, AppError>;
}

#[async_trait]
impl SlugIndex for PgPool {
    async fn slug_exists(&self, slug: &str) -> Result<bool, AppError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM portfolios WHERE slug = $1)")
                .bind(slug)
                .fetch_one(self)
                .await?;
        Ok(exists)
    }
}

/// Builds one candidate: lowercase alphanumerics of the base, truncated,
/// plus a random 0–999 suffix. An empty/missing base uses `portfolio`.
pub fn slug_candidate(base: Option<&str>) -> String {
    let cleaned: String = base
        .unwrap_or_default()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .take(BASE_MAX_LEN)
        .collect();

    let cleaned = if cleaned.is_empty() {
        "portfolio".to_string()
    } else {
        cleaned
    };

    format!("{cleaned}{}", rand::thread_rng().gen_range(0..1000))
}

/// Last-resort slug after the attempt bound is exhausted: current unix millis
/// plus a random alphanumeric suffix. Not re-checked for uniqueness.
fn fallback_slug() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(6)
        .map(char::from)
        .collect();
    format!("{}-{}", Utc::now().timestamp_millis(), suffix.to_lowercase())
}

/// Allocates a globally unused slug, retrying fresh candidates up to the
/// attempt bound before degrading to a timestamp-based fallback.
pub async fn allocate_slug(index: &dyn SlugIndex, base: Option<&str>) -> Result<String, AppError> {
    for _ in 0..MAX_ATTEMPTS {
        let candidate = slug_candidate(base);
        if !index.slug_exists(&candidate).await? {
            return Ok(candidate);
        }
    }

    let fallback = fallback_slug();
    warn!("Slug allocation exhausted {MAX_ATTEMPTS} attempts, falling back to {fallback}");
    Ok(fallback)
}
