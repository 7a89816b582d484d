//! Logged entries and the persisted dataset document.
//!
//! Documents coming from storage or from an import file are untrusted. They
//! go through a two-step pipeline: strict JSON parsing (which can fail with a
//! [`DataError`]) followed by lenient normalization, where wrong-shaped fields
//! fall back to their defaults instead of failing.

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::category::Category;
use crate::types::MonthKey;

/// Errors for documents that cannot be read as a dataset at all.
#[derive(Debug, Error)]
pub enum DataError {
    /// The document is not valid JSON.
    #[error("document is not valid JSON: {0}")]
    Syntax(#[from] serde_json::Error),

    /// The document parsed but its top level is not an object.
    #[error("expected an object at the top level, found {found}")]
    UnexpectedShape { found: &'static str },
}

/// Hours logged in one category for one month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    /// First-of-month marker, `YYYY-MM-01`.
    pub date: String,

    /// Category identifier. May be unknown for rows from older files.
    pub service_type: String,

    pub hours: f64,
}

impl Entry {
    pub fn new(month: MonthKey, category: Category, hours: f64) -> Self {
        Self {
            date: month.to_string(),
            service_type: category.identifier().to_string(),
            hours,
        }
    }

    /// Resolved category, or `None` for unknown identifiers.
    pub fn category(&self) -> Option<Category> {
        Category::from_identifier(&self.service_type)
    }

    /// Resolved month, or `None` if the stored date is unparseable.
    pub fn month(&self) -> Option<MonthKey> {
        MonthKey::parse_lenient(&self.date)
    }

    fn from_value(value: Value) -> Option<Self> {
        let Value::Object(row) = value else {
            return None;
        };
        Some(Self {
            date: string_field(&row, "date"),
            service_type: string_field(&row, "service_type"),
            hours: hours_field(&row),
        })
    }
}

/// Hours logged in the LDC bucket for one month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LdcEntry {
    /// First-of-month marker, `YYYY-MM-01`.
    pub date: String,

    pub hours: f64,
}

impl LdcEntry {
    pub fn new(month: MonthKey, hours: f64) -> Self {
        Self {
            date: month.to_string(),
            hours,
        }
    }

    /// Resolved month, or `None` if the stored date is unparseable.
    pub fn month(&self) -> Option<MonthKey> {
        MonthKey::parse_lenient(&self.date)
    }

    fn from_value(value: Value) -> Option<Self> {
        let Value::Object(row) = value else {
            return None;
        };
        Some(Self {
            date: string_field(&row, "date"),
            hours: hours_field(&row),
        })
    }
}

/// Everything that is persisted: both entry lists and the selected category.
///
/// This is also the unit of import and export.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Dataset {
    pub entries: Vec<Entry>,
    pub ldc_entries: Vec<LdcEntry>,
    #[serde(rename = "selected_service")]
    pub selected_category: Category,
}

impl Dataset {
    /// Parses and normalizes a JSON document.
    pub fn from_json(text: &str) -> Result<Self, DataError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    /// Normalizes an already parsed document.
    ///
    /// Missing or non-array entry lists become empty, rows that are not
    /// objects are dropped, and an absent or unknown selected category falls
    /// back to the first category. Rows keep only their known fields, so
    /// extra fields in a foreign document are lost on the next save.
    pub fn from_value(value: Value) -> Result<Self, DataError> {
        let mut doc = match value {
            Value::Object(doc) => doc,
            other => {
                return Err(DataError::UnexpectedShape {
                    found: json_kind(&other),
                });
            }
        };

        let entries = array_field(&mut doc, "entries")
            .into_iter()
            .filter_map(Entry::from_value)
            .collect();
        let ldc_entries = array_field(&mut doc, "ldc_entries")
            .into_iter()
            .filter_map(LdcEntry::from_value)
            .collect();
        let selected_category = doc
            .get("selected_service")
            .and_then(Value::as_str)
            .and_then(Category::from_identifier)
            .unwrap_or_default();

        Ok(Self {
            entries,
            ldc_entries,
            selected_category,
        })
    }

    /// Pretty-printed JSON, the form used for storage and export.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

fn array_field(doc: &mut Map<String, Value>, key: &str) -> Vec<Value> {
    match doc.remove(key) {
        Some(Value::Array(rows)) => rows,
        Some(other) => {
            tracing::debug!(key, found = json_kind(&other), "ignoring non-array field");
            Vec::new()
        }
        None => Vec::new(),
    }
}

fn string_field(row: &Map<String, Value>, key: &str) -> String {
    row.get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_default()
}

/// Reads `hours` as a number, accepting numeric strings; anything else is 0.
fn hours_field(row: &Map<String, Value>) -> f64 {
    match row.get("hours") {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
