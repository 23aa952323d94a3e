use polars::prelude::*;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

use super::SourceError;
use crate::config::CsvConfig;
use crate::models::{RawRow, RawValue};

/// Read a CSV export through polars so numeric columns keep their inferred
/// types (and nulls) the same way a spreadsheet read would. Columns whose
/// name contains `identifier_marker` are read as text so codes like `0101`
/// keep their leading zeros.
pub fn read_rows(
    path: &Path,
    options: &CsvConfig,
    identifier_marker: &str,
) -> Result<Vec<RawRow>, SourceError> {
    let identifiers = identifier_schema(path, options, identifier_marker)
        .map_err(|e| SourceError::parse(path, e))?;
    debug!(
        "CSV identifier columns read as text: {:?}",
        identifiers.iter_names().collect::<Vec<_>>()
    );

    let df = reader_options(options)
        .with_infer_schema_length(Some(options.infer_schema_rows))
        .with_schema_overwrite(Some(Arc::new(identifiers)))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .and_then(|reader| reader.finish())
        .map_err(|e| SourceError::parse(path, e))?;

    debug!("CSV frame shape: {:?}", df.shape());

    dataframe_rows(&df).map_err(|e| SourceError::parse(path, e))
}

fn reader_options(options: &CsvConfig) -> CsvReadOptions {
    let separator = options.separator_byte();
    let decimal_comma = options.decimal_comma;

    CsvReadOptions::default()
        .with_has_header(true)
        .map_parse_options(|parse| {
            parse
                .with_separator(separator)
                .with_decimal_comma(decimal_comma)
        })
}

/// String schema for the identifier columns, taken from the header alone.
fn identifier_schema(
    path: &Path,
    options: &CsvConfig,
    identifier_marker: &str,
) -> PolarsResult<Schema> {
    let header = reader_options(options)
        .with_infer_schema_length(Some(0))
        .with_n_rows(Some(1))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;

    let marker = identifier_marker.to_lowercase();
    Ok(header
        .get_column_names()
        .into_iter()
        .filter(|name| name.to_lowercase().contains(&marker))
        .map(|name| (name.clone(), DataType::String))
        .collect())
}

/// Turn a DataFrame into rows, one `RawRow` per line in column order.
pub fn dataframe_rows(df: &DataFrame) -> PolarsResult<Vec<RawRow>> {
    let columns = df.get_columns();
    let mut rows = Vec::with_capacity(df.height());

    for index in 0..df.height() {
        let mut row = RawRow::with_capacity(columns.len());
        for column in columns {
            let value = any_value(column.get(index)?);
            row.insert(column.name().to_string(), value);
        }
        rows.push(row);
    }

    Ok(rows)
}

fn any_value(value: AnyValue<'_>) -> RawValue {
    match value {
        AnyValue::Null => RawValue::Empty,
        AnyValue::Boolean(b) => RawValue::Bool(b),
        // CSV inference only produces the 32/64-bit widths
        AnyValue::Int32(v) => RawValue::Int(v.into()),
        AnyValue::Int64(v) => RawValue::Int(v),
        AnyValue::UInt32(v) => RawValue::Int(v.into()),
        AnyValue::UInt64(v) => match i64::try_from(v) {
            Ok(i) => RawValue::Int(i),
            Err(_) => RawValue::Float(v as f64),
        },
        AnyValue::Float32(v) => RawValue::from_f64(v.into()),
        AnyValue::Float64(v) => RawValue::from_f64(v),
        AnyValue::String(s) => RawValue::Text(s.to_string()),
        AnyValue::StringOwned(s) => RawValue::Text(s.to_string()),
        other => RawValue::Text(other.to_string()),
    }
}
