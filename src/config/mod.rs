pub mod catalog;
pub mod env;
pub mod resources;

pub use catalog::*;
pub use env::EnvOverrides;
pub use resources::CatalogResources;

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog {}: {source}", .path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid {name} dataset: {source}")]
    Dataset {
        name: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid catalog: {0}")]
    Invalid(String),
}
