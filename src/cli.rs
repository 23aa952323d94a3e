use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::config::{CatalogConfig, EnvOverrides};

#[derive(Debug, Parser)]
#[command(
    name = "ciqual-pipeline",
    version,
    about = "Convert and filter CIQUAL nutrition data into the JSON consumed by the mobile app"
)]
pub struct Cli {
    /// Catalog TOML (target names, markers, datasets). Defaults to the built-in catalog.
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Convert an official CIQUAL table (.xls/.xlsx/.ods/.csv/.json) to app JSON
    Convert {
        /// Path to the CIQUAL source file
        source: PathBuf,
        /// Output path for the JSON file
        output: PathBuf,
        /// Check that the output matches the app format after writing
        #[arg(long)]
        validate_format: bool,
    },
    /// Build the curated product subset, falling back to built-in data
    Filter {
        /// Source data (defaults to CIQUAL_SAMPLE_DATA, then the catalog path)
        #[arg(long)]
        source: Option<PathBuf>,
        /// Output path (defaults to CIQUAL_FILTER_OUTPUT, then the catalog path)
        #[arg(long)]
        output: Option<PathBuf>,
        #[arg(long)]
        validate_format: bool,
    },
    /// Check an existing JSON file against the app format
    Validate {
        file: PathBuf,
    },
}

impl Cli {
    /// Flag first, then environment.
    pub fn catalog_path(&self, env: &EnvOverrides) -> Option<PathBuf> {
        self.catalog.clone().or_else(|| env.catalog.clone())
    }
}

/// Resolve a filter path: flag, then environment, then catalog default.
pub fn resolve_path(flag: Option<&Path>, env: Option<&Path>, catalog_default: &Path) -> PathBuf {
    flag.or(env).unwrap_or(catalog_default).to_path_buf()
}

/// Filter source and output after applying overrides.
pub fn filter_paths(
    source: Option<&Path>,
    output: Option<&Path>,
    env: &EnvOverrides,
    config: &CatalogConfig,
) -> (PathBuf, PathBuf) {
    (
        resolve_path(source, env.sample_data.as_deref(), &config.paths.sample_data),
        resolve_path(output, env.filter_output.as_deref(), &config.paths.filter_output),
    )
}
