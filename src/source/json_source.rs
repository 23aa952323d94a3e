use indexmap::IndexMap;
use serde_json::Value;
use std::path::Path;

use super::SourceError;
use crate::models::{RawRow, RawValue};

/// Read a JSON cache: an array of flat objects, one per food item.
pub fn read_rows(path: &Path) -> Result<Vec<RawRow>, SourceError> {
    let content = std::fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_rows(&content).map_err(|e| SourceError::parse(path, e))
}

pub fn parse_rows(content: &str) -> Result<Vec<RawRow>, serde_json::Error> {
    // IndexMap keeps the column order of the file
    let items: Vec<IndexMap<String, Value>> = serde_json::from_str(content)?;

    Ok(items
        .into_iter()
        .map(|item| {
            item.into_iter()
                .map(|(column, value)| {
                    let raw = RawValue::from_json(&value);
                    (column, raw)
                })
                .collect()
        })
        .collect())
}
