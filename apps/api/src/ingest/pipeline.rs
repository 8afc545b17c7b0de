//! Resume ingestion pipeline.
//!
//! Flow: extract text → schema-constrained completion → normalize →
//! (avatar selection ∥ slug allocation) → outcome handed to persistence.
//!
//! All-or-nothing: any failure before the outcome means nothing is persisted.

use tracing::info;

use crate::avatar::select_avatar;
use crate::errors::AppError;
use crate::extract::{extract_document, ExtractedText};
use crate::ingest::normalize::normalize_config;
use crate::ingest::prompts::{
    build_resume_prompt, portfolio_schema, RESUME_PARSE_PROMPT_VERSION, RESUME_PARSE_SYSTEM,
};
use crate::llm_client::{
    CompletionClient, CompletionRequest, SchemaConstraint, PARSE_MAX_RETRIES, PARSE_MODEL,
};
use crate::models::portfolio::PortfolioConfig;
use crate::portfolio::slug::{allocate_slug, SlugIndex};

const PARSE_TEMPERATURE: f32 = 0.2;
const PARSE_MAX_TOKENS: u32 = 4000;

/// Everything the upload handler needs to persist one portfolio.
#[derive(Debug)]
pub struct PipelineOutcome {
    pub config: PortfolioConfig,
    pub avatar: String,
    pub slug: String,
}

/// Runs the full pipeline on uploaded document bytes.
pub async fn run_pipeline(
    llm: &dyn CompletionClient,
    slugs: &dyn SlugIndex,
    data: &[u8],
    media_type: &str,
    filename: &str,
) -> Result<PipelineOutcome, AppError> {
    let extracted = extract_document(data, media_type, filename)?;
    info!(
        "Extracted {} characters ({:?} pages, {} links) from {filename}",
        extracted.text.len(),
        extracted.page_count,
        extracted.urls.len()
    );

    run_on_extracted(llm, slugs, &extracted).await
}

/// Pipeline tail after extraction; split out so it is testable without
/// binary document fixtures.
pub async fn run_on_extracted(
    llm: &dyn CompletionClient,
    slugs: &dyn SlugIndex,
    extracted: &ExtractedText,
) -> Result<PipelineOutcome, AppError> {
    let prompt = build_resume_prompt(&extracted.text, &extracted.urls);
    tracing::debug!("Requesting extraction (prompt {RESUME_PARSE_PROMPT_VERSION})");

    let raw = llm
        .complete(CompletionRequest {
            model: PARSE_MODEL,
            system: RESUME_PARSE_SYSTEM,
            user: &prompt,
            temperature: PARSE_TEMPERATURE,
            max_tokens: PARSE_MAX_TOKENS,
            schema: Some(SchemaConstraint {
                name: "portfolio_config",
                schema: portfolio_schema(),
            }),
            max_attempts: PARSE_MAX_RETRIES,
        })
        .await
        .map_err(|e| AppError::Llm(format!("Resume parsing failed: {e}")))?;

    let config = normalize_config(&raw)
        .map_err(|e| AppError::Llm(format!("Resume parsing returned malformed JSON: {e}")))?;

    // Avatar pick and slug allocation are independent of each other
    let base = if config.name.trim().is_empty() {
        config.title.clone()
    } else {
        config.name.clone()
    };
    let (avatar, slug) = tokio::join!(
        select_avatar(llm, &config),
        allocate_slug(slugs, Some(&base))
    );
    let slug = slug?;

    info!("Pipeline complete: slug={slug}, avatar={avatar}");
    Ok(PipelineOutcome {
        config,
        avatar,
        slug,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};

    use crate::llm_client::LlmError;

    /// Canned completion per model, with a call counter.
    struct ScriptedLlm {
        parse_reply: Option<&'static str>,
        avatar_reply: Option<&'static str>,
        calls: AtomicU32,
    }

    impl ScriptedLlm {
        fn new(parse_reply: Option<&'static str>, avatar_reply: Option<&'static str>) -> Self {
            Self {
                parse_reply,
                avatar_reply,
                calls: AtomicU32::new(0),
            }
        }
    }

    #[async_trait]
    impl CompletionClient for ScriptedLlm {
        async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let reply = if request.model == PARSE_MODEL {
                self.parse_reply
            } else {
                self.avatar_reply
            };
            reply.map(String::from).ok_or(LlmError::EmptyContent)
        }
    }

    struct NoCollisions;

    #[async_trait]
    impl SlugIndex for NoCollisions {
        async fn slug_exists(&self, _slug: &str) -> Result<bool, AppError> {
            Ok(false)
        }
    }

    const WELL_FORMED_REPLY: &str = r#"{
        "name": "Grace Hopper",
        "title": "Rear Admiral of Software",
        "about": "Compiler pioneer. Finds bugs, literal and otherwise.",
        "email": "grace@navy.mil",
        "skills": ["COBOL", "Compilers", "Leadership"],
        "experience": [{
            "company": "US Navy",
            "position": "Rear Admiral",
            "startDate": "Jan 1943",
            "endDate": "Aug 1986",
            "description": "Computing.",
            "achievements": ["First compiler"]
        }],
        "education": [{
            "institution": "Yale",
            "degree": "PhD",
            "field": "Mathematics",
            "startDate": "1930",
            "endDate": "1934"
        }],
        "projects": [{
            "name": "A-0 System",
            "description": "The first compiler.",
            "technologies": ["UNIVAC"]
        }]
    }"#;

    fn extracted(text: &str) -> ExtractedText {
        ExtractedText {
            text: text.to_string(),
            urls: vec![],
            page_count: Some(2),
        }
    }

    #[tokio::test]
    async fn test_unsupported_type_makes_no_completion_call() {
        let llm = ScriptedLlm::new(Some(WELL_FORMED_REPLY), None);
        let result = run_pipeline(&llm, &NoCollisions, b"data", "text/plain", "cv.txt").await;
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(llm.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_well_formed_completion_produces_full_outcome() {
        let llm = ScriptedLlm::new(
            Some(WELL_FORMED_REPLY),
            Some(r#"{"avatarNumber": "026", "reason": "admiral"}"#),
        );
        let outcome = run_on_extracted(&llm, &NoCollisions, &extracted("two pages of resume text"))
            .await
            .unwrap();

        assert_eq!(outcome.config.name, "Grace Hopper");
        assert_eq!(outcome.config.skills.len(), 3);
        assert!(outcome.config.section_order.is_none());
        assert_eq!(outcome.avatar, "/avatars/026.svg");
        assert!(outcome.slug.starts_with("gracehopper"));
    }

    #[tokio::test]
    async fn test_grouped_skills_are_repaired_end_to_end() {
        let reply: &str = r#"{
            "name": "Grace Hopper", "title": "Engineer", "about": "x",
            "skills": {"languages": ["Go"], "tools": ["Git", "Go"]},
            "experience": [], "education": [], "projects": []
        }"#;
        let llm = ScriptedLlm::new(Some(reply), None);
        let outcome = run_on_extracted(&llm, &NoCollisions, &extracted("text"))
            .await
            .unwrap();
        assert_eq!(outcome.config.skills, vec!["Go", "Git"]);
        // Avatar call failed (no scripted reply) — fallback still yields a path
        assert!(outcome.avatar.starts_with("/avatars/"));
    }

    #[tokio::test]
    async fn test_empty_completion_is_fatal() {
        let llm = ScriptedLlm::new(None, None);
        let result = run_on_extracted(&llm, &NoCollisions, &extracted("text")).await;
        assert!(matches!(result, Err(AppError::Llm(_))));
    }

    #[tokio::test]
    async fn test_unparseable_completion_is_fatal() {
        let llm = ScriptedLlm::new(Some("here is your resume: {broken"), None);
        let result = run_on_extracted(&llm, &NoCollisions, &extracted("text")).await;
        assert!(matches!(result, Err(AppError::Llm(_))));
    }
}
