//! Config Normalizer — parses the raw completion text into a
//! [`PortfolioConfig`], repairing the one known model failure mode first:
//! `skills` returned as an object of grouped arrays instead of a flat list.

use serde_json::Value;
use std::collections::HashSet;

use crate::llm_client::strip_json_fences;
use crate::models::portfolio::PortfolioConfig;

/// Parses and repairs the completion output. Parse failures (including any
/// structural deviation other than the skills grouping) are fatal.
pub fn normalize_config(raw: &str) -> Result<PortfolioConfig, serde_json::Error> {
    let mut value: Value = serde_json::from_str(strip_json_fences(raw))?;
    flatten_skills(&mut value);
    serde_json::from_value(value)
}

/// If `skills` is a non-array object, concatenates every array found among
/// its values into one flat list, deduplicating while keeping first-seen
/// order. Key names are discarded. A flat array passes through untouched.
pub fn flatten_skills(config: &mut Value) {
    let Some(skills) = config.get("skills") else {
        return;
    };
    let Some(groups) = skills.as_object() else {
        return;
    };

    let mut flat: Vec<Value> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    for group in groups.values() {
        if let Some(items) = group.as_array() {
            for item in items {
                if let Some(skill) = item.as_str() {
                    if seen.insert(skill.to_string()) {
                        flat.push(Value::String(skill.to_string()));
                    }
                }
            }
        }
    }

    config["skills"] = Value::Array(flat);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_grouped_skills_are_flattened_in_value_order() {
        let mut config = json!({
            "skills": {
                "languages": ["Go", "Rust"],
                "tools": ["Git", "Go"]
            }
        });
        flatten_skills(&mut config);
        assert_eq!(config["skills"], json!(["Go", "Rust", "Git"]));
    }

    #[test]
    fn test_flat_skills_pass_through_unchanged() {
        // Idempotence on already-valid input: even duplicates are untouched
        let mut config = json!({ "skills": ["Go", "Git", "Go"] });
        flatten_skills(&mut config);
        assert_eq!(config["skills"], json!(["Go", "Git", "Go"]));
    }

    #[test]
    fn test_missing_skills_is_left_alone() {
        let mut config = json!({ "name": "Ada" });
        flatten_skills(&mut config);
        assert!(config.get("skills").is_none());
    }

    #[test]
    fn test_non_array_group_values_are_skipped() {
        let mut config = json!({
            "skills": { "languages": ["Go"], "note": "misc", "count": 3 }
        });
        flatten_skills(&mut config);
        assert_eq!(config["skills"], json!(["Go"]));
    }

    #[test]
    fn test_normalize_repairs_and_types() {
        let raw = r#"```json
        {
            "name": "Ada Lovelace",
            "title": "Engineer",
            "about": "Writes engines.",
            "skills": {"languages": ["Go"], "tools": ["Git"]},
            "experience": [],
            "education": [],
            "projects": []
        }
        ```"#;
        let config = normalize_config(raw).unwrap();
        assert_eq!(config.skills, vec!["Go", "Git"]);
    }

    #[test]
    fn test_normalize_rejects_unparseable_text() {
        assert!(normalize_config("not json at all").is_err());
    }

    #[test]
    fn test_normalize_rejects_other_structural_deviations() {
        // Skills flattening is the only coercion; a string `skills` is fatal
        let raw = r#"{
            "name": "Ada", "title": "Eng", "about": "x",
            "skills": "Go, Git",
            "experience": [], "education": [], "projects": []
        }"#;
        assert!(normalize_config(raw).is_err());
    }
}
