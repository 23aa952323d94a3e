use std::env;
use std::path::PathBuf;

pub const CATALOG_VAR: &str = "CIQUAL_CATALOG";
pub const SAMPLE_DATA_VAR: &str = "CIQUAL_SAMPLE_DATA";
pub const FILTER_OUTPUT_VAR: &str = "CIQUAL_FILTER_OUTPUT";

/// Path overrides read from the environment (after `.env` is loaded).
/// Command-line flags take precedence over these, these over the catalog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnvOverrides {
    pub catalog: Option<PathBuf>,
    pub sample_data: Option<PathBuf>,
    pub filter_output: Option<PathBuf>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .map(PathBuf::from)
        };

        Self {
            catalog: path(CATALOG_VAR),
            sample_data: path(SAMPLE_DATA_VAR),
            filter_output: path(FILTER_OUTPUT_VAR),
        }
    }
}
