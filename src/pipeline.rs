use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::{CatalogResources, ConfigError};
use crate::models::FoodRecord;
use crate::processor::{
    Deduplicator, FilterOutcome, FormatValidator, NameMatcher, RecordNormalizer, ValidationReport,
};
use crate::source::{SourceError, load_rows};
use crate::storage::JsonFileStorage;
use crate::storage::summary::{field_preview, name_preview};

/// Which operator profile the shared pipeline runs under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineMode {
    /// One-shot official converter: every row of the source, fail fast.
    Convert,
    /// Best-effort dev-data generator: target-list filter, never empty.
    Filter,
}

/// What happens when the source cannot be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourcePolicy {
    FailFast,
    Fallback,
}

impl PipelineMode {
    pub fn source_policy(self) -> SourcePolicy {
        match self {
            PipelineMode::Convert => SourcePolicy::FailFast,
            PipelineMode::Filter => SourcePolicy::Fallback,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RunRequest {
    pub source: PathBuf,
    pub output: PathBuf,
    pub validate_format: bool,
}

/// Records produced by the load + normalize stages.
#[derive(Debug, Clone)]
pub struct LoadedSource {
    pub records: Vec<FoodRecord>,
    pub rows_read: usize,
    /// The source was unreadable and the fallback dataset stands in
    pub used_fallback: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchStats {
    pub matched_records: usize,
    pub matched_targets: usize,
    pub requested_targets: usize,
}

/// Output of the selection stages, ready for the sink.
#[derive(Debug, Clone)]
pub struct PreparedOutput {
    pub records: Vec<FoodRecord>,
    pub match_stats: Option<MatchStats>,
    /// Nothing matched the target list and the fallback dataset was used
    pub filter_fallback: bool,
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub mode: PipelineMode,
    pub rows_read: usize,
    pub source_fallback: bool,
    pub match_stats: Option<MatchStats>,
    pub filter_fallback: bool,
    pub written: usize,
    pub validation: Option<ValidationReport>,
}

pub struct Pipeline<'a> {
    mode: PipelineMode,
    resources: &'a CatalogResources,
    normalizer: RecordNormalizer,
    matcher: NameMatcher,
    validator: FormatValidator,
}

impl<'a> Pipeline<'a> {
    pub fn new(mode: PipelineMode, resources: &'a CatalogResources) -> Result<Self, ConfigError> {
        let config = &resources.config;
        Ok(Pipeline {
            mode,
            resources,
            normalizer: RecordNormalizer::new(&config.normalizer)?,
            matcher: NameMatcher::new(&config.targets.names),
            validator: FormatValidator::new(&config.validation.required_fields),
        })
    }

    pub fn mode(&self) -> PipelineMode {
        self.mode
    }

    /// Read and normalize the source, applying the profile's source policy.
    pub fn load(&self, source: &Path) -> Result<LoadedSource, SourceError> {
        let config = &self.resources.config;
        match load_rows(source, &config.csv, &config.normalizer.identifier_marker) {
            Ok(rows) => Ok(LoadedSource {
                records: self.normalizer.normalize_rows(&rows),
                rows_read: rows.len(),
                used_fallback: false,
            }),
            Err(e) => match self.mode.source_policy() {
                SourcePolicy::FailFast => Err(e),
                SourcePolicy::Fallback => {
                    warn!("⚠️ Could not load source data: {}", e);
                    warn!(
                        "Using built-in fallback dataset ({} products)",
                        self.resources.fallback.len()
                    );
                    Ok(LoadedSource {
                        records: self.resources.fallback.clone(),
                        rows_read: 0,
                        used_fallback: true,
                    })
                }
            },
        }
    }

    /// Convert keeps every record. Filter keeps target-list matches (or the
    /// fallback dataset when there are none), then merges in the essential
    /// products, first occurrence of each name winning.
    pub fn prepare(&self, records: Vec<FoodRecord>) -> PreparedOutput {
        match self.mode {
            PipelineMode::Convert => PreparedOutput {
                records,
                match_stats: None,
                filter_fallback: false,
            },
            PipelineMode::Filter => self.select(records),
        }
    }

    fn select(&self, records: Vec<FoodRecord>) -> PreparedOutput {
        let FilterOutcome {
            records: matched,
            matched_targets,
            requested_targets,
        } = self.matcher.filter(records);

        let stats = MatchStats {
            matched_records: matched.len(),
            matched_targets,
            requested_targets,
        };
        info!("Found {} products matching the list", stats.matched_records);
        info!(
            "Matched {} out of {} requested products",
            stats.matched_targets, stats.requested_targets
        );

        let filter_fallback = matched.is_empty();
        let primary = if filter_fallback {
            warn!("No data found, using fallback dataset");
            self.resources.fallback.clone()
        } else {
            matched
        };

        let records = Deduplicator.merge([primary, self.resources.essentials.clone()]);

        PreparedOutput {
            records,
            match_stats: Some(stats),
            filter_fallback,
        }
    }

    pub fn run(&self, request: &RunRequest) -> Result<RunSummary> {
        let loaded = self
            .load(&request.source)
            .with_context(|| format!("Failed to load source {}", request.source.display()))?;
        info!("Loaded {} products from source data", loaded.records.len());

        let prepared = self.prepare(loaded.records);

        let storage = JsonFileStorage::new(&request.output);
        let written = storage
            .store_records(&prepared.records)
            .with_context(|| format!("Failed to save data to {}", request.output.display()))?;

        self.report(&prepared.records, storage.path());

        let validation = if request.validate_format {
            info!("🔍 Validating JSON format...");
            let report = self.validator.validate_file(storage.path());
            report.log();
            Some(report)
        } else {
            None
        };

        Ok(RunSummary {
            mode: self.mode,
            rows_read: loaded.rows_read,
            source_fallback: loaded.used_fallback,
            match_stats: prepared.match_stats,
            filter_fallback: prepared.filter_fallback,
            written,
            validation,
        })
    }

    fn report(&self, records: &[FoodRecord], output: &Path) {
        let report = &self.resources.config.report;

        match self.mode {
            PipelineMode::Convert => {
                info!(
                    "✅ Successfully converted {} food items to JSON format",
                    records.len()
                );
                info!("📁 Output file: {}", output.display());
                if let Some(first) = records.first() {
                    info!("📋 Sample of first food item:");
                    for line in field_preview(first, report.preview_fields) {
                        info!("{}", line);
                    }
                }
            }
            PipelineMode::Filter => {
                info!("Filtered data saved to {}", output.display());
                info!("Total products in dataset: {}", records.len());
                info!("Dataset summary:");
                for line in name_preview(records, report.preview_items) {
                    info!("{}", line);
                }
            }
        }
    }
}
