use crate::models::FoodRecord;

/// First `limit` product names, then a count of the rest.
pub fn name_preview(records: &[FoodRecord], limit: usize) -> Vec<String> {
    let mut lines: Vec<String> = records
        .iter()
        .take(limit)
        .map(|record| format!("- {}", record.name().unwrap_or("Unknown")))
        .collect();

    if records.len() > limit {
        lines.push(format!("... and {} more products", records.len() - limit));
    }

    lines
}

/// First `limit` fields of a record, then a count of the rest.
pub fn field_preview(record: &FoodRecord, limit: usize) -> Vec<String> {
    let mut lines: Vec<String> = record
        .iter()
        .take(limit)
        .map(|(field, value)| format!("  {}: {}", field, value))
        .collect();

    if record.len() > limit {
        lines.push(format!("  ... and {} more fields", record.len() - limit));
    }

    lines
}
