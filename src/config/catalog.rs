use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::ConfigError;

/// Catalog configuration: the target product list plus the knobs of each
/// pipeline stage. Loaded from TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub targets: TargetConfig,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub normalizer: NormalizerConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub csv: CsvConfig,
    #[serde(default)]
    pub datasets: DatasetConfig,
}

/// Product names the filter profile keeps
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetConfig {
    pub names: Vec<String>,
}

/// Default locations used by the filter profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    pub sample_data: PathBuf,
    pub filter_output: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizerConfig {
    pub identifier_marker: String,
    pub unit_markers: Vec<String>,
    pub missing_measurement: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    pub required_fields: Vec<String>,
}

/// How much of the output is echoed in run summaries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    pub preview_items: usize,
    pub preview_fields: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsvConfig {
    pub separator: char,
    pub decimal_comma: bool,
    pub infer_schema_rows: usize,
}

/// Optional replacements for the bundled fallback/essential datasets
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatasetConfig {
    pub fallback: Option<PathBuf>,
    pub essentials: Option<PathBuf>,
}

impl CatalogConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|e| match e {
            ConfigError::Toml { source, .. } => ConfigError::Toml {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: CatalogConfig =
            toml::from_str(content).map_err(|source| ConfigError::Toml {
                path: PathBuf::from("<builtin>"),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.normalizer.identifier_marker.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "normalizer.identifier_marker cannot be empty".to_string(),
            ));
        }

        if self.normalizer.unit_markers.iter().any(|m| m.is_empty()) {
            return Err(ConfigError::Invalid(
                "normalizer.unit_markers cannot contain empty markers".to_string(),
            ));
        }

        if !self.csv.separator.is_ascii() {
            return Err(ConfigError::Invalid(format!(
                "csv.separator must be a single ASCII character, got '{}'",
                self.csv.separator
            )));
        }

        Ok(())
    }
}

impl CsvConfig {
    pub fn separator_byte(&self) -> u8 {
        // validate() guarantees ASCII
        self.separator as u8
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            sample_data: PathBuf::from("data/ciqual_sample_data.json"),
            filter_output: PathBuf::from("assets/data/common_ciqual.json"),
        }
    }
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            identifier_marker: "code".to_string(),
            unit_markers: vec![
                "g/100 g".to_string(),
                "mg/100 g".to_string(),
                "µg/100 g".to_string(),
                "kcal/100 g".to_string(),
            ],
            missing_measurement: "-".to_string(),
        }
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            required_fields: vec![
                "alim_code".to_string(),
                "alim_nom_fr".to_string(),
                "alim_grp_nom_fr".to_string(),
                "alim_ssgrp_nom_fr".to_string(),
            ],
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            preview_items: 5,
            preview_fields: 10,
        }
    }
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            separator: ',',
            decimal_comma: false,
            infer_schema_rows: 1000,
        }
    }
}
