use anyhow::{Context, Result, bail};
use ciqual_pipeline::cli::{Cli, Command, filter_paths};
use ciqual_pipeline::config::{CatalogResources, EnvOverrides};
use ciqual_pipeline::pipeline::{Pipeline, PipelineMode, RunRequest};
use ciqual_pipeline::processor::FormatValidator;
use clap::Parser;
use tracing::{Level, error, info, warn};

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt().with_max_level(level).init();

    // Load environment variables
    dotenv::dotenv().ok();

    if let Err(e) = run(cli) {
        error!("❌ {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let env = EnvOverrides::from_env();

    let catalog_path = cli.catalog_path(&env);
    let resources =
        CatalogResources::load(catalog_path.as_deref()).context("Failed to load catalog")?;

    match cli.command {
        Command::Convert {
            source,
            output,
            validate_format,
        } => {
            info!("🚀 Reading CIQUAL source: {}", source.display());

            // The converter never falls back: a missing file stops the run here
            if !source.exists() {
                bail!("Source file not found: {}", source.display());
            }

            let pipeline = Pipeline::new(PipelineMode::Convert, &resources)?;
            pipeline
                .run(&RunRequest {
                    source,
                    output,
                    validate_format,
                })
                .context("Error converting CIQUAL data")?;
        }
        Command::Filter {
            source,
            output,
            validate_format,
        } => {
            let (source, output) =
                filter_paths(source.as_deref(), output.as_deref(), &env, &resources.config);

            info!("🚀 Loading CIQUAL data from {}", source.display());

            let pipeline = Pipeline::new(PipelineMode::Filter, &resources)?;
            let summary = pipeline
                .run(&RunRequest {
                    source,
                    output,
                    validate_format,
                })
                .context("Error saving data")?;

            if summary.source_fallback || summary.filter_fallback {
                warn!("⚠️ Output was built from the built-in fallback dataset");
            }
        }
        Command::Validate { file } => {
            info!("🔍 Validating JSON format of {}", file.display());
            let validator = FormatValidator::new(&resources.config.validation.required_fields);
            validator.validate_file(&file).log();
        }
    }

    Ok(())
}
