/// talentgrid Record
///
/// A Record is one row of tabular data (one candidate, one flagged
/// interview) as an immutable mapping from field name to typed value.
///
/// Records usually come from a remote API response. `records_from_json`
/// maps that untyped payload onto typed values once, at the boundary, using
/// the screen's field descriptors, so comparator logic never sees raw JSON.
///
/// # Examples
///
/// ```
/// use talentgrid::{FieldValue, Record};
///
/// let record = Record::new()
///     .with("name", "Amy")
///     .with("score", 90);
///
/// assert_eq!(record.get("score"), Some(&FieldValue::Number(90.0)));
/// assert_eq!(record.text("name"), "Amy");
/// assert_eq!(record.text("missing"), "");
/// ```

use crate::config::TableConfig;
use crate::error::IngestError;
use crate::field::{parse_instant, FieldDescriptor, FieldType, FieldValue};
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::borrow::Cow;
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Record {
    fields: HashMap<String, FieldValue>,
}

impl Record {
    pub fn new() -> Self {
        Record {
            fields: HashMap::new(),
        }
    }

    /// Builder-style insert
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Rendered text of a field; missing fields render as the empty string
    pub fn text(&self, name: &str) -> Cow<'_, str> {
        self.fields
            .get(name)
            .map(FieldValue::render)
            .unwrap_or(Cow::Borrowed(""))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl From<HashMap<String, FieldValue>> for Record {
    fn from(fields: HashMap<String, FieldValue>) -> Self {
        Record { fields }
    }
}

impl<K: Into<String>> FromIterator<(K, FieldValue)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, FieldValue)>>(iter: I) -> Self {
        Record {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Map a JSON array of objects onto typed records.
///
/// Only declared fields are kept. Values that do not fit their declared type
/// are kept in a tolerant form rather than rejected: a date that does not
/// parse stays as text (and sorts as the earliest instant), a non-numeric
/// "number" stays as text (and sorts as the lowest number).
pub fn records_from_json(json: &str, config: &TableConfig) -> Result<Vec<Record>, IngestError> {
    let parsed: JsonValue = serde_json::from_str(json)?;
    records_from_value(&parsed, config)
}

/// Same as [`records_from_json`] for an already-parsed document
pub fn records_from_value(value: &JsonValue, config: &TableConfig) -> Result<Vec<Record>, IngestError> {
    let items = value
        .as_array()
        .ok_or_else(|| IngestError::NotAnArray(json_kind(value)))?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| -> Result<Record, IngestError> {
            let obj = item.as_object().ok_or(IngestError::NotAnObject(index))?;
            Ok(config
                .fields()
                .iter()
                .filter_map(|descriptor| {
                    obj.get(&descriptor.name)
                        .map(|raw| (descriptor.name.clone(), json_to_field_value(raw, descriptor)))
                })
                .collect())
        })
        .collect()
}

/// Convert one JSON value according to its descriptor
pub fn json_to_field_value(value: &JsonValue, descriptor: &FieldDescriptor) -> FieldValue {
    if value.is_null() {
        return FieldValue::Null;
    }

    match descriptor.field_type {
        FieldType::Text => FieldValue::Text(json_to_text(value)),
        FieldType::Status => FieldValue::Status(json_to_text(value)),
        FieldType::Number => match value {
            JsonValue::Number(n) => n.as_f64().map(FieldValue::Number).unwrap_or(FieldValue::Null),
            JsonValue::String(s) => match s.trim().parse::<f64>() {
                Ok(n) => FieldValue::Number(n),
                Err(_) => FieldValue::Text(s.clone()),
            },
            other => FieldValue::Text(json_to_text(other)),
        },
        FieldType::Date => match value {
            JsonValue::String(s) => match parse_instant(s) {
                Some(ms) => FieldValue::Date(ms),
                None => FieldValue::Text(s.clone()),
            },
            JsonValue::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f as i64))
                .map(FieldValue::Date)
                .unwrap_or(FieldValue::Null),
            other => FieldValue::Text(json_to_text(other)),
        },
        FieldType::TextList => match value {
            JsonValue::Array(items) => FieldValue::TextList(
                items
                    .iter()
                    .filter(|item| !item.is_null())
                    .map(json_to_text)
                    .collect(),
            ),
            other => FieldValue::TextList(vec![json_to_text(other)]),
        },
    }
}

fn json_to_text(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
