use regex::Regex;

use crate::config::{ConfigError, NormalizerConfig};
use crate::models::{FoodRecord, RawRow, RawValue};

/// Semantic class of a column, derived from its name alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldClass {
    /// Name contains the identifier marker (`code`)
    Identifier,
    /// Name carries a per-100 g unit marker
    Measurement,
    Other,
}

/// Turns raw source rows into canonical all-string records.
///
/// Missing cells become `""` for identifier columns, the missing-measurement
/// token (`"-"`) for nutrient columns and `""` for everything else. Present
/// cells are stringified. Column names are passed through untouched.
pub struct RecordNormalizer {
    identifier_marker: String,
    unit_pattern: Option<Regex>,
    missing_measurement: String,
}

impl RecordNormalizer {
    pub fn new(config: &NormalizerConfig) -> Result<Self, ConfigError> {
        let unit_pattern = if config.unit_markers.is_empty() {
            None
        } else {
            let alternation = config
                .unit_markers
                .iter()
                .map(|marker| regex::escape(marker))
                .collect::<Vec<_>>()
                .join("|");
            let pattern = Regex::new(&format!("(?i)(?:{})", alternation))
                .map_err(|e| ConfigError::Invalid(format!("bad unit marker: {}", e)))?;
            Some(pattern)
        };

        Ok(RecordNormalizer {
            identifier_marker: config.identifier_marker.to_lowercase(),
            unit_pattern,
            missing_measurement: config.missing_measurement.clone(),
        })
    }

    pub fn classify_field(&self, field_name: &str) -> FieldClass {
        // Identifier test wins over unit markers
        if field_name.to_lowercase().contains(&self.identifier_marker) {
            return FieldClass::Identifier;
        }

        match &self.unit_pattern {
            Some(pattern) if pattern.is_match(field_name) => FieldClass::Measurement,
            _ => FieldClass::Other,
        }
    }

    pub fn normalize_value(&self, field_name: &str, value: &RawValue) -> String {
        match value {
            RawValue::Empty => match self.classify_field(field_name) {
                FieldClass::Measurement => self.missing_measurement.clone(),
                FieldClass::Identifier | FieldClass::Other => String::new(),
            },
            RawValue::Int(i) => i.to_string(),
            // f64 Display is the shortest text that parses back to the same value
            RawValue::Float(f) => f.to_string(),
            RawValue::Bool(true) => "True".to_string(),
            RawValue::Bool(false) => "False".to_string(),
            RawValue::Text(s) => s.clone(),
        }
    }

    pub fn normalize_row(&self, row: &RawRow) -> FoodRecord {
        row.iter()
            .map(|(field, value)| (field.clone(), self.normalize_value(field, value)))
            .collect()
    }

    pub fn normalize_rows(&self, rows: &[RawRow]) -> Vec<FoodRecord> {
        rows.iter().map(|row| self.normalize_row(row)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer() -> RecordNormalizer {
        RecordNormalizer::new(&NormalizerConfig::default()).unwrap()
    }

    #[test]
    fn test_field_classification() {
        let normalizer = normalizer();

        assert_eq!(
            normalizer.classify_field("alim_code"),
            FieldClass::Identifier
        );
        assert_eq!(
            normalizer.classify_field("alim_grp_CODE"),
            FieldClass::Identifier
        );
        assert_eq!(
            normalizer.classify_field("Sodium (mg/100 g)"),
            FieldClass::Measurement
        );
        assert_eq!(
            normalizer.classify_field("Energie, Règlement UE N° 1169/2011 (kcal/100 g)"),
            FieldClass::Measurement
        );
        assert_eq!(
            normalizer.classify_field("Vitamine D (µg/100 g)"),
            FieldClass::Measurement
        );
        assert_eq!(
            normalizer.classify_field("Glucides (G/100 G)"),
            FieldClass::Measurement
        );
        assert_eq!(normalizer.classify_field("alim_nom_fr"), FieldClass::Other);
        assert_eq!(normalizer.classify_field("alim_nom_eng"), FieldClass::Other);
    }

    #[test]
    fn test_missing_values() {
        let normalizer = normalizer();

        assert_eq!(
            normalizer.normalize_value("alim_code", &RawValue::Empty),
            ""
        );
        assert_eq!(
            normalizer.normalize_value("alim_ssgrp_code", &RawValue::Empty),
            ""
        );
        assert_eq!(
            normalizer.normalize_value("Fer (mg/100 g)", &RawValue::Empty),
            "-"
        );
        assert_eq!(
            normalizer.normalize_value("Rétinol (µg/100 g)", &RawValue::Empty),
            "-"
        );
        assert_eq!(
            normalizer.normalize_value("alim_nom_fr", &RawValue::Empty),
            ""
        );
    }

    #[test]
    fn test_identifier_rule_precedes_unit_rule() {
        let normalizer = normalizer();
        // Contains both "code" and a unit marker
        assert_eq!(
            normalizer.normalize_value("code nutriment (g/100 g)", &RawValue::Empty),
            ""
        );
    }

    #[test]
    fn test_present_values() {
        let normalizer = normalizer();

        assert_eq!(
            normalizer.normalize_value("alim_code", &RawValue::Int(20002)),
            "20002"
        );
        assert_eq!(
            normalizer.normalize_value("Sodium (mg/100 g)", &RawValue::Float(69.0)),
            "69"
        );
        assert_eq!(
            normalizer.normalize_value("AG saturés (g/100 g)", &RawValue::Float(0.067)),
            "0.067"
        );
        assert_eq!(
            normalizer.normalize_value("flag", &RawValue::Bool(true)),
            "True"
        );
        assert_eq!(
            normalizer.normalize_value("flag", &RawValue::Bool(false)),
            "False"
        );
        // Source placeholders like "< 0,5" stay verbatim
        assert_eq!(
            normalizer.normalize_value("Sucres (g/100 g)", &RawValue::Text("< 0,5".to_string())),
            "< 0,5"
        );
    }

    #[test]
    fn test_numeric_values_round_trip() {
        let normalizer = normalizer();
        let samples = [0.0, 0.1, 0.067, 1.0 / 3.0, 8285.0, 1e-7, 123456789.125, -2.5];

        for value in samples {
            let text = normalizer.normalize_value("Fer (mg/100 g)", &RawValue::Float(value));
            assert_eq!(
                text.parse::<f64>().unwrap(),
                value,
                "round trip of {}",
                text
            );
        }

        for value in [0_i64, 42, -7, i64::MAX] {
            let text = normalizer.normalize_value("alim_code", &RawValue::Int(value));
            assert_eq!(text.parse::<i64>().unwrap(), value);
        }
    }

    #[test]
    fn test_row_keeps_columns_and_order() {
        let normalizer = normalizer();
        let row: RawRow = [
            ("alim_code", RawValue::Int(20003)),
            ("alim_nom_fr", RawValue::Text("Tomate, crue".to_string())),
            ("alim_grp_code", RawValue::Empty),
            ("Vitamine C (mg/100 g)", RawValue::Empty),
            ("unknown column", RawValue::Empty),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();

        let record = normalizer.normalize_row(&row);
        let fields: Vec<(&str, &str)> = record.iter().collect();
        assert_eq!(
            fields,
            vec![
                ("alim_code", "20003"),
                ("alim_nom_fr", "Tomate, crue"),
                ("alim_grp_code", ""),
                ("Vitamine C (mg/100 g)", "-"),
                ("unknown column", ""),
            ]
        );
    }

    #[test]
    fn test_custom_markers() {
        let config = NormalizerConfig {
            identifier_marker: "ID".to_string(),
            unit_markers: vec!["(kJ/100 g)".to_string()],
            missing_measurement: "n/a".to_string(),
        };
        let normalizer = RecordNormalizer::new(&config).unwrap();

        assert_eq!(normalizer.normalize_value("food_id", &RawValue::Empty), "");
        assert_eq!(
            normalizer.normalize_value("Energie (kJ/100 g)", &RawValue::Empty),
            "n/a"
        );
        // Default markers no longer apply
        assert_eq!(
            normalizer.normalize_value("Fer (mg/100 g)", &RawValue::Empty),
            ""
        );
    }
}
