//! Avatar Selector — best-effort enrichment, mandatory default.
//!
//! A small model picks one of 100 catalog illustrations to match the profile.
//! Any failure on that path (transport error, empty content, malformed or
//! out-of-range index) falls back to a uniformly random valid index. This
//! function never returns an error and its LLM call is never retried.

use rand::Rng;
use serde::Deserialize;
use tracing::{debug, info};

use crate::llm_client::{
    strip_json_fences, CompletionClient, CompletionRequest, SchemaConstraint, AVATAR_MODEL,
};
use crate::models::portfolio::PortfolioConfig;

pub mod catalog;

pub use catalog::AVATAR_COUNT;

const AVATAR_SYSTEM: &str = "\
You match professional profiles to illustrated avatars. \
Given a profile summary and a numbered catalog of 100 avatar illustrations, \
pick the single best match. \
Respond with valid JSON only: {\"avatarNumber\": \"NNN\", \"reason\": \"...\"} \
where NNN is the zero-padded catalog index from 001 to 100.";

#[derive(Debug, Deserialize)]
struct AvatarChoice {
    #[serde(rename = "avatarNumber")]
    avatar_number: String,
    #[serde(default)]
    reason: Option<String>,
}

fn avatar_choice_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": {
            "avatarNumber": { "type": "string" },
            "reason": { "type": "string" }
        },
        "required": ["avatarNumber"]
    })
}

/// Maps a validated index to its static asset path.
pub fn avatar_path(number: u32) -> String {
    format!("/avatars/{number:03}.svg")
}

/// Uniformly random valid avatar path.
pub fn random_avatar() -> String {
    avatar_path(rand::thread_rng().gen_range(1..=AVATAR_COUNT))
}

/// Validates a returned index: exactly three ASCII digits, value in [1,100].
pub fn parse_avatar_number(raw: &str) -> Option<u32> {
    if raw.len() != 3 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let number: u32 = raw.parse().ok()?;
    (1..=AVATAR_COUNT).contains(&number).then_some(number)
}

/// Picks an avatar for the profile. Always returns a usable path.
pub async fn select_avatar(llm: &dyn CompletionClient, config: &PortfolioConfig) -> String {
    match try_select(llm, config).await {
        Some(path) => path,
        None => {
            let path = random_avatar();
            debug!("Avatar selection fell back to random: {path}");
            path
        }
    }
}

async fn try_select(llm: &dyn CompletionClient, config: &PortfolioConfig) -> Option<String> {
    let prompt = build_avatar_prompt(config);
    let raw = llm
        .complete(CompletionRequest {
            model: AVATAR_MODEL,
            system: AVATAR_SYSTEM,
            user: &prompt,
            temperature: 0.3,
            max_tokens: 200,
            schema: Some(SchemaConstraint {
                name: "avatar_choice",
                schema: avatar_choice_schema(),
            }),
            max_attempts: 1,
        })
        .await
        .ok()?;

    let choice: AvatarChoice = serde_json::from_str(strip_json_fences(&raw)).ok()?;
    let number = parse_avatar_number(&choice.avatar_number)?;

    info!(
        "Avatar {number:03} selected: {}",
        choice.reason.as_deref().unwrap_or("no reason given")
    );
    Some(avatar_path(number))
}

/// Reduced profile summary sent to the selector: name, title, about, first 10
/// skills, first experience entry, up to 3 project names.
fn build_avatar_prompt(config: &PortfolioConfig) -> String {
    let mut summary = format!(
        "Name: {}\nTitle: {}\nAbout: {}\n",
        config.name, config.title, config.about
    );

    let skills: Vec<&str> = config.skills.iter().take(10).map(String::as_str).collect();
    if !skills.is_empty() {
        summary.push_str(&format!("Skills: {}\n", skills.join(", ")));
    }
    if let Some(exp) = config.experience.first() {
        summary.push_str(&format!("Current role: {} at {}\n", exp.position, exp.company));
    }
    let projects: Vec<&str> = config
        .projects
        .iter()
        .take(3)
        .map(|p| p.name.as_str())
        .collect();
    if !projects.is_empty() {
        summary.push_str(&format!("Projects: {}\n", projects.join(", ")));
    }

    format!(
        "PROFILE:\n{summary}\nAVATAR CATALOG:\n{}\n\nPick the best match.",
        catalog::catalog_listing()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::llm_client::LlmError;

    struct CannedLlm(Result<&'static str, ()>);

    #[async_trait]
    impl CompletionClient for CannedLlm {
        async fn complete(&self, _request: CompletionRequest<'_>) -> Result<String, LlmError> {
            match self.0 {
                Ok(text) => Ok(text.to_string()),
                Err(()) => Err(LlmError::EmptyContent),
            }
        }
    }

    fn sample_config() -> PortfolioConfig {
        serde_json::from_value(serde_json::json!({
            "name": "Ada Lovelace",
            "title": "Software Engineer",
            "about": "Builds things.",
            "skills": ["Rust"],
            "experience": [],
            "education": [],
            "projects": []
        }))
        .unwrap()
    }

    fn assert_valid_avatar_path(path: &str) {
        let number = path
            .strip_prefix("/avatars/")
            .and_then(|p| p.strip_suffix(".svg"))
            .expect("path shape");
        assert_eq!(number.len(), 3);
        let n: u32 = number.parse().unwrap();
        assert!((1..=100).contains(&n), "index {n} out of range");
    }

    #[test]
    fn test_parse_avatar_number() {
        assert_eq!(parse_avatar_number("001"), Some(1));
        assert_eq!(parse_avatar_number("100"), Some(100));
        assert_eq!(parse_avatar_number("042"), Some(42));
        // Out of range, wrong width, or non-numeric all fail validation
        assert_eq!(parse_avatar_number("137"), None);
        assert_eq!(parse_avatar_number("000"), None);
        assert_eq!(parse_avatar_number("42"), None);
        assert_eq!(parse_avatar_number("1000"), None);
        assert_eq!(parse_avatar_number("abc"), None);
    }

    #[tokio::test]
    async fn test_valid_choice_is_used() {
        let llm = CannedLlm(Ok(r#"{"avatarNumber": "007", "reason": "spy vibes"}"#));
        assert_eq!(select_avatar(&llm, &sample_config()).await, "/avatars/007.svg");
    }

    #[tokio::test]
    async fn test_failed_call_falls_back_to_random() {
        let llm = CannedLlm(Err(()));
        let path = select_avatar(&llm, &sample_config()).await;
        assert_valid_avatar_path(&path);
    }

    #[tokio::test]
    async fn test_out_of_range_choice_falls_back() {
        let llm = CannedLlm(Ok(r#"{"avatarNumber": "137"}"#));
        let path = select_avatar(&llm, &sample_config()).await;
        assert_valid_avatar_path(&path);
        assert_ne!(path, "/avatars/137.svg");
    }

    #[tokio::test]
    async fn test_malformed_content_falls_back() {
        let llm = CannedLlm(Ok("I would pick avatar 12 because..."));
        assert_valid_avatar_path(&select_avatar(&llm, &sample_config()).await);
    }
}
