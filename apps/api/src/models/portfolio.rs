use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// Section identifiers in their default render order. The pipeline never sets
/// `section_order`; pages fall back to this when the field is absent.
pub const DEFAULT_SECTION_ORDER: [&str; 4] = ["skills", "experience", "education", "projects"];

/// The render order for a stored config blob: its own `sectionOrder` when
/// present, otherwise [`DEFAULT_SECTION_ORDER`].
pub fn effective_section_order(config: &Value) -> Vec<String> {
    config
        .get("sectionOrder")
        .and_then(Value::as_array)
        .map(|sections| {
            sections
                .iter()
                .filter_map(|s| s.as_str().map(String::from))
                .collect()
        })
        .unwrap_or_else(|| DEFAULT_SECTION_ORDER.iter().map(|s| s.to_string()).collect())
}

/// The structured profile extracted from a resume. Wire format is camelCase
/// to match the published page contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioConfig {
    pub name: String,
    pub title: String,
    pub about: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    pub skills: Vec<String>,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_order: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub company: String,
    pub position: String,
    /// Free-text date ("Jan 2020" or "2020"), never parsed into a calendar type.
    pub start_date: String,
    pub end_date: String,
    pub description: String,
    #[serde(default)]
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub institution: String,
    pub degree: String,
    pub field: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gpa: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub name: String,
    pub description: String,
    pub technologies: Vec<String>,
    /// Live demo URL. Prompt rules forbid this from duplicating `github`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PortfolioRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub slug: String,
    pub config: Value,
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_round_trips_camel_case() {
        let raw = serde_json::json!({
            "name": "Ada Lovelace",
            "title": "Software Engineer",
            "about": "Writes analytical engines.",
            "skills": ["Rust", "SQL"],
            "experience": [{
                "company": "Analytical Engines Ltd",
                "position": "Engineer",
                "startDate": "Jan 2020",
                "endDate": "Present",
                "description": "Built things.",
                "achievements": ["Shipped v1"]
            }],
            "education": [{
                "institution": "Cambridge",
                "degree": "BSc",
                "field": "Mathematics",
                "startDate": "2015",
                "endDate": "2019"
            }],
            "projects": []
        });

        let config: PortfolioConfig = serde_json::from_value(raw).unwrap();
        assert_eq!(config.experience[0].start_date, "Jan 2020");
        assert!(config.section_order.is_none());

        let back = serde_json::to_value(&config).unwrap();
        assert_eq!(back["experience"][0]["startDate"], "Jan 2020");
        // Absent optionals are omitted, not serialized as null
        assert!(back.get("email").is_none());
        assert!(back.get("sectionOrder").is_none());
    }

    #[test]
    fn test_effective_section_order_defaults_at_render_time() {
        let bare = serde_json::json!({ "name": "Ada" });
        assert_eq!(
            effective_section_order(&bare),
            ["skills", "experience", "education", "projects"]
        );

        let explicit = serde_json::json!({ "sectionOrder": ["projects", "skills"] });
        assert_eq!(effective_section_order(&explicit), ["projects", "skills"]);
    }

    #[test]
    fn test_missing_required_field_is_rejected() {
        // An experience entry without `company` must fail typed deserialization
        let raw = serde_json::json!({
            "name": "X",
            "title": "Y",
            "about": "Z",
            "skills": [],
            "experience": [{
                "position": "Engineer",
                "startDate": "2020",
                "endDate": "2021",
                "description": "..."
            }],
            "education": [],
            "projects": []
        });
        assert!(serde_json::from_value::<PortfolioConfig>(raw).is_err());
    }
}
