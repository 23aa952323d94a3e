use std::path::Path;
use tracing::{debug, info};

use super::{CatalogConfig, ConfigError};
use crate::models::{FoodRecord, records_from_json};

const BUILTIN_CATALOG: &str = include_str!("../configs/catalog.toml");
const BUILTIN_FALLBACK: &str = include_str!("../configs/fallback_dataset.json");
const BUILTIN_ESSENTIALS: &str = include_str!("../configs/essential_products.json");

/// Everything the pipeline needs that is not derived from the input file:
/// the catalog configuration and the two static datasets.
#[derive(Debug, Clone)]
pub struct CatalogResources {
    pub config: CatalogConfig,
    /// Guaranteed-non-empty dataset used when the source yields nothing
    pub fallback: Vec<FoodRecord>,
    /// Curated supplemental products merged after the filtered records
    pub essentials: Vec<FoodRecord>,
}

impl CatalogResources {
    pub fn builtin() -> Result<Self, ConfigError> {
        let config = CatalogConfig::from_toml_str(BUILTIN_CATALOG)?;
        Self::from_config(config)
    }

    /// Load an operator catalog, or the bundled one when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => {
                info!("Loading catalog from {}", path.display());
                let config = CatalogConfig::from_file(path)?;
                Self::from_config(config)
            }
            None => {
                debug!("Using built-in catalog");
                Self::builtin()
            }
        }
    }

    pub fn from_config(config: CatalogConfig) -> Result<Self, ConfigError> {
        let fallback = match &config.datasets.fallback {
            Some(path) => load_dataset("fallback", path)?,
            None => parse_dataset("fallback", BUILTIN_FALLBACK)?,
        };
        let essentials = match &config.datasets.essentials {
            Some(path) => load_dataset("essentials", path)?,
            None => parse_dataset("essentials", BUILTIN_ESSENTIALS)?,
        };

        let resources = CatalogResources {
            config,
            fallback,
            essentials,
        };
        resources.validate()?;

        debug!(
            "Catalog ready: {} targets, {} fallback records, {} essential records",
            resources.config.targets.names.len(),
            resources.fallback.len(),
            resources.essentials.len()
        );

        Ok(resources)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fallback.is_empty() {
            return Err(ConfigError::Invalid(
                "fallback dataset must contain at least one record".to_string(),
            ));
        }

        if let Some(index) = self
            .fallback
            .iter()
            .position(|record| record.name_key().is_empty())
        {
            return Err(ConfigError::Invalid(format!(
                "fallback record {} has no alim_nom_fr",
                index
            )));
        }

        Ok(())
    }
}

fn load_dataset(name: &'static str, path: &Path) -> Result<Vec<FoodRecord>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_dataset(name, &content)
}

fn parse_dataset(name: &'static str, content: &str) -> Result<Vec<FoodRecord>, ConfigError> {
    records_from_json(content).map_err(|source| ConfigError::Dataset { name, source })
}
