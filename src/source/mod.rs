pub mod csv_source;
pub mod json_source;
pub mod spreadsheet;

use std::fmt::Display;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::CsvConfig;
use crate::models::RawRow;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("source file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error(
        "unsupported source format for {} (expected xls, xlsx, xlsm, xlsb, ods, csv or json)",
        .0.display()
    )]
    UnsupportedFormat(PathBuf),

    #[error("workbook {} has no worksheet", .0.display())]
    EmptyWorkbook(PathBuf),
}

impl SourceError {
    pub fn parse(path: &Path, error: impl Display) -> Self {
        SourceError::Parse {
            path: path.to_path_buf(),
            message: error.to_string(),
        }
    }
}

/// Input formats the loader understands, keyed by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Spreadsheet,
    Csv,
    Json,
}

impl SourceFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "xls" | "xlsx" | "xlsm" | "xlsb" | "ods" => Some(SourceFormat::Spreadsheet),
            "csv" => Some(SourceFormat::Csv),
            "json" => Some(SourceFormat::Json),
            _ => None,
        }
    }
}

/// Read every row of `path`. The file must exist; the format is chosen by
/// extension. `identifier_marker` names the CSV columns kept as text.
pub fn load_rows(
    path: &Path,
    csv: &CsvConfig,
    identifier_marker: &str,
) -> Result<Vec<RawRow>, SourceError> {
    if !path.exists() {
        return Err(SourceError::NotFound(path.to_path_buf()));
    }

    let format = SourceFormat::from_path(path)
        .ok_or_else(|| SourceError::UnsupportedFormat(path.to_path_buf()))?;

    info!("Reading {:?} source: {}", format, path.display());

    let rows = match format {
        SourceFormat::Spreadsheet => spreadsheet::read_rows(path)?,
        SourceFormat::Csv => csv_source::read_rows(path, csv, identifier_marker)?,
        SourceFormat::Json => json_source::read_rows(path)?,
    };

    info!("Loaded {} rows from {}", rows.len(), path.display());
    if let Some(first) = rows.first() {
        debug!("Columns found: {:?}", first.keys().collect::<Vec<_>>());
    }

    Ok(rows)
}

/// Header names with blanks replaced by `colN` and repeats suffixed `.N`.
pub(crate) fn unique_headers<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut headers: Vec<String> = Vec::new();

    for (index, name) in raw.into_iter().enumerate() {
        let name: String = name.into();
        let base = if name.trim().is_empty() {
            format!("col{}", index + 1)
        } else {
            name.trim().to_string()
        };

        let mut candidate = base.clone();
        let mut suffix = 1;
        while headers.contains(&candidate) {
            candidate = format!("{}.{}", base, suffix);
            suffix += 1;
        }
        headers.push(candidate);
    }

    headers
}
