use serde_json::Value;
use std::path::Path;
use tracing::{error, info};

/// Outcome of checking a written JSON file against the app's expected shape.
/// Findings are reported, never corrected.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationReport {
    Passed { total: usize },
    NotAnArray,
    Empty,
    MissingFields(Vec<String>),
    Unreadable(String),
}

impl ValidationReport {
    pub fn is_passed(&self) -> bool {
        matches!(self, ValidationReport::Passed { .. })
    }

    pub fn log(&self) {
        match self {
            ValidationReport::Passed { total } => {
                info!("✅ JSON format validation passed");
                info!("📊 Total food items: {}", total);
            }
            ValidationReport::NotAnArray => error!("❌ JSON should be a list of food items"),
            ValidationReport::Empty => error!("❌ JSON list is empty"),
            ValidationReport::MissingFields(fields) => {
                error!("❌ Missing required fields: {:?}", fields)
            }
            ValidationReport::Unreadable(reason) => error!("❌ Validation error: {}", reason),
        }
    }
}

/// Checks that output is a non-empty array whose first element carries
/// every required field.
pub struct FormatValidator {
    required_fields: Vec<String>,
}

impl FormatValidator {
    pub fn new(required_fields: &[String]) -> Self {
        FormatValidator {
            required_fields: required_fields.to_vec(),
        }
    }

    pub fn validate_file(&self, path: &Path) -> ValidationReport {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => return ValidationReport::Unreadable(format!("{}: {}", path.display(), e)),
        };

        match serde_json::from_str::<Value>(&content) {
            Ok(value) => self.validate_value(&value),
            Err(e) => ValidationReport::Unreadable(format!("{}: {}", path.display(), e)),
        }
    }

    pub fn validate_value(&self, value: &Value) -> ValidationReport {
        let Some(items) = value.as_array() else {
            return ValidationReport::NotAnArray;
        };

        let Some(first) = items.first() else {
            return ValidationReport::Empty;
        };

        let missing: Vec<String> = self
            .required_fields
            .iter()
            .filter(|field| first.get(field.as_str()).is_none())
            .cloned()
            .collect();

        if !missing.is_empty() {
            return ValidationReport::MissingFields(missing);
        }

        ValidationReport::Passed { total: items.len() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ValidationConfig;
    use serde_json::json;

    fn validator() -> FormatValidator {
        FormatValidator::new(&ValidationConfig::default().required_fields)
    }

    #[test]
    fn test_valid_output() {
        let value = json!([
            {
                "alim_code": "20002",
                "alim_nom_fr": "Carotte, crue",
                "alim_grp_nom_fr": "fruits, légumes, légumineuses et oléagineux",
                "alim_ssgrp_nom_fr": "légumes"
            },
            { "alim_code": "20003" }
        ]);

        // Only the first element is inspected
        assert_eq!(
            validator().validate_value(&value),
            ValidationReport::Passed { total: 2 }
        );
    }

    #[test]
    fn test_missing_fields_listed_in_order() {
        let value = json!([{ "alim_nom_fr": "Carotte, crue", "Fer (mg/100 g)": "0.33" }]);

        assert_eq!(
            validator().validate_value(&value),
            ValidationReport::MissingFields(vec![
                "alim_code".to_string(),
                "alim_grp_nom_fr".to_string(),
                "alim_ssgrp_nom_fr".to_string(),
            ])
        );
    }

    #[test]
    fn test_structural_failures() {
        assert_eq!(
            validator().validate_value(&json!({"alim_code": "1"})),
            ValidationReport::NotAnArray
        );
        assert_eq!(
            validator().validate_value(&json!([])),
            ValidationReport::Empty
        );
        assert_eq!(
            validator().validate_value(&json!(["not an object"])),
            ValidationReport::MissingFields(ValidationConfig::default().required_fields)
        );
    }

    #[test]
    fn test_unreadable_file() {
        let dir = tempfile::tempdir().unwrap();

        let missing = validator().validate_file(&dir.path().join("absent.json"));
        assert!(matches!(missing, ValidationReport::Unreadable(_)));

        let garbage = dir.path().join("garbage.json");
        std::fs::write(&garbage, "[{").unwrap();
        assert!(matches!(
            validator().validate_file(&garbage),
            ValidationReport::Unreadable(_)
        ));
        assert!(!validator().validate_file(&garbage).is_passed());
    }
}
