// Resume extraction prompt templates and the strict output schema.
// All prompts for the ingest module are defined here.

use serde_json::{json, Value};

/// Bump when the instruction text or schema changes shape.
pub const RESUME_PARSE_PROMPT_VERSION: &str = "v1";

pub const RESUME_PARSE_SYSTEM: &str = r#"You are an expert resume parser. Extract structured information from resumes and convert them into a JSON format suitable for a portfolio website.

CRITICAL: You MUST follow this EXACT structure:

{
  "name": "Full Name",
  "title": "Job Title/Role",
  "about": "Professional summary (2-3 sentences)",
  "email": "email@example.com",
  "phone": "+1234567890",
  "location": "City, Country",
  "linkedin": "linkedin.com/in/username",
  "github": "github.com/username",
  "website": "portfolio.com",
  "skills": ["Skill1", "Skill2", "Skill3"],
  "experience": [{
    "company": "Company Name",
    "position": "Job Title",
    "startDate": "Jan 2020",
    "endDate": "Dec 2022",
    "description": "Brief description",
    "achievements": ["Achievement 1", "Achievement 2"]
  }],
  "education": [{
    "institution": "University Name",
    "degree": "Bachelor's",
    "field": "Computer Science",
    "startDate": "2015",
    "endDate": "2019",
    "gpa": "3.8"
  }],
  "projects": [{
    "name": "Project Name",
    "description": "What it does",
    "technologies": ["Tech1", "Tech2"],
    "link": "https://project.com",
    "github": "github.com/user/repo"
  }]
}

IMPORTANT RULES:
- "skills" MUST be a flat array of strings, NOT nested objects
- Do NOT create subcategories like "programmingLanguages", "frameworks", etc.
- Combine ALL skills into a single flat array
- Extract ALL programming languages, frameworks, tools, and technologies into the skills array
- Format dates as "MMM YYYY" (e.g., "Jan 2020") or just year
- If a field is missing, omit it (except required fields)
- For 'about', create a compelling 2-3 sentence summary if not in resume
- A project's "name" must NEVER be a URL
- A project's "link" is the live demo only — it must NEVER equal the "github" URL"#;

/// Builds the user message: the extracted resume text plus any hyperlinks
/// discovered in the document.
pub fn build_resume_prompt(resume_text: &str, urls: &[String]) -> String {
    let mut prompt = String::from(
        "Parse this resume and extract the information. \
         Remember: skills MUST be a flat array of strings, not nested objects.\n",
    );

    if !urls.is_empty() {
        prompt.push_str(
            "\nHyperlinks found in the document — use them for contact fields and project links where they fit:\n",
        );
        for url in urls {
            prompt.push_str(&format!("- {url}\n"));
        }
    }

    prompt.push_str(&format!("\nResume:\n{resume_text}"));
    prompt
}

/// The strict JSON Schema attached to the primary completion call via
/// `response_format`. Mirrors `PortfolioConfig`.
pub fn portfolio_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "name": { "type": "string" },
            "title": { "type": "string" },
            "about": { "type": "string" },
            "email": { "type": "string" },
            "phone": { "type": "string" },
            "location": { "type": "string" },
            "linkedin": { "type": "string" },
            "github": { "type": "string" },
            "website": { "type": "string" },
            "skills": {
                "type": "array",
                "items": { "type": "string" }
            },
            "experience": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "company": { "type": "string" },
                        "position": { "type": "string" },
                        "startDate": { "type": "string" },
                        "endDate": { "type": "string" },
                        "description": { "type": "string" },
                        "achievements": {
                            "type": "array",
                            "items": { "type": "string" }
                        }
                    },
                    "required": ["company", "position", "startDate", "endDate", "description"]
                }
            },
            "education": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "institution": { "type": "string" },
                        "degree": { "type": "string" },
                        "field": { "type": "string" },
                        "startDate": { "type": "string" },
                        "endDate": { "type": "string" },
                        "gpa": { "type": "string" }
                    },
                    "required": ["institution", "degree", "field", "startDate", "endDate"]
                }
            },
            "projects": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string" },
                        "description": { "type": "string" },
                        "technologies": {
                            "type": "array",
                            "items": { "type": "string" }
                        },
                        "link": { "type": "string" },
                        "github": { "type": "string" }
                    },
                    "required": ["name", "description", "technologies"]
                }
            }
        },
        "required": ["name", "title", "about", "skills", "experience", "education"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_text_and_urls() {
        let urls = vec![
            "https://github.com/ada/engine".to_string(),
            "https://ada.dev".to_string(),
        ];
        let prompt = build_resume_prompt("Ada Lovelace\nEngineer", &urls);
        assert!(prompt.contains("Resume:\nAda Lovelace\nEngineer"));
        assert!(prompt.contains("- https://github.com/ada/engine"));
        assert!(prompt.contains("- https://ada.dev"));
        assert!(prompt.contains("Hyperlinks found"));
    }

    #[test]
    fn test_prompt_without_urls_has_no_link_section() {
        let prompt = build_resume_prompt("text", &[]);
        assert!(!prompt.contains("Hyperlinks found"));
    }

    #[test]
    fn test_schema_required_fields() {
        let schema = portfolio_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert_eq!(
            required,
            ["name", "title", "about", "skills", "experience", "education"]
        );
        assert_eq!(
            schema["properties"]["experience"]["items"]["required"]
                .as_array()
                .unwrap()
                .len(),
            5
        );
        assert_eq!(
            schema["properties"]["projects"]["items"]["required"],
            serde_json::json!(["name", "description", "technologies"])
        );
    }
}
