use calamine::{Data, Reader, open_workbook_auto};
use std::path::Path;
use tracing::debug;

use super::{SourceError, unique_headers};
use crate::models::{RawRow, RawValue};

/// Read the first worksheet of an Excel/ODS workbook. Row 1 is the header.
pub fn read_rows(path: &Path) -> Result<Vec<RawRow>, SourceError> {
    let mut workbook = open_workbook_auto(path).map_err(|e| SourceError::parse(path, e))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| SourceError::EmptyWorkbook(path.to_path_buf()))?
        .map_err(|e| SourceError::parse(path, e))?;

    let (height, width) = range.get_size();
    debug!("Worksheet size: {} rows x {} columns", height, width);

    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Ok(Vec::new());
    };

    let headers = unique_headers(header_row.iter().map(header_text));

    Ok(rows.map(|cells| row_from_cells(&headers, cells)).collect())
}

pub(crate) fn row_from_cells(headers: &[String], cells: &[Data]) -> RawRow {
    headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            let value = cells.get(index).map(cell_value).unwrap_or(RawValue::Empty);
            (header.clone(), value)
        })
        .collect()
}

pub(crate) fn cell_value(cell: &Data) -> RawValue {
    match cell {
        Data::Empty => RawValue::Empty,
        // #N/A and friends read as missing values
        Data::Error(_) => RawValue::Empty,
        Data::Int(i) => RawValue::Int(*i),
        Data::Float(f) => RawValue::from_f64(*f),
        Data::Bool(b) => RawValue::Bool(*b),
        Data::String(s) => RawValue::Text(s.clone()),
        other => RawValue::Text(other.to_string()),
    }
}

fn header_text(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::Float(f) if f.fract() == 0.0 => format!("{:.0}", f),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::CellErrorType;

    #[test]
    fn test_cell_values() {
        assert_eq!(cell_value(&Data::Empty), RawValue::Empty);
        assert_eq!(cell_value(&Data::Error(CellErrorType::NA)), RawValue::Empty);
        assert_eq!(cell_value(&Data::Float(f64::NAN)), RawValue::Empty);
        assert_eq!(cell_value(&Data::Int(20002)), RawValue::Int(20002));
        assert_eq!(cell_value(&Data::Float(0.33)), RawValue::Float(0.33));
        assert_eq!(cell_value(&Data::Bool(true)), RawValue::Bool(true));
        assert_eq!(
            cell_value(&Data::String("traces".to_string())),
            RawValue::Text("traces".to_string())
        );
    }

    #[test]
    fn test_short_rows_are_padded() {
        let headers = vec![
            "alim_code".to_string(),
            "alim_nom_fr".to_string(),
            "Fer (mg/100 g)".to_string(),
        ];
        let row = row_from_cells(
            &headers,
            &[Data::Float(20002.0), Data::String("Carotte, crue".to_string())],
        );

        assert_eq!(row.len(), 3);
        assert_eq!(row["alim_code"], RawValue::Float(20002.0));
        assert_eq!(row["Fer (mg/100 g)"], RawValue::Empty);
    }

    #[test]
    fn test_header_text() {
        assert_eq!(
            header_text(&Data::String("alim_code".to_string())),
            "alim_code"
        );
        assert_eq!(header_text(&Data::Float(2020.0)), "2020");
        assert_eq!(header_text(&Data::Empty), "");
    }

    #[test]
    fn test_unreadable_workbook() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.xlsx");
        std::fs::write(&path, b"not a zip archive").unwrap();

        assert!(matches!(read_rows(&path), Err(SourceError::Parse { .. })));
    }
}
