use indexmap::IndexMap;
use serde_json::Value;

/// A single cell as read from a source file, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Empty,
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

/// One source row: column name to raw cell, in header order.
pub type RawRow = IndexMap<String, RawValue>;

impl RawValue {
    /// NaN is how spreadsheets and dataframes spell "no value".
    pub fn from_f64(value: f64) -> Self {
        if value.is_nan() {
            RawValue::Empty
        } else {
            RawValue::Float(value)
        }
    }

    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => RawValue::Empty,
            Value::Bool(b) => RawValue::Bool(*b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    RawValue::Int(i)
                } else if let Some(f) = n.as_f64() {
                    RawValue::from_f64(f)
                } else {
                    RawValue::Text(n.to_string())
                }
            }
            Value::String(s) => RawValue::Text(s.clone()),
            // Nested structures are flattened to their JSON text
            other => RawValue::Text(other.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, RawValue::Empty)
    }
}
