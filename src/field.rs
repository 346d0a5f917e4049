/// talentgrid Field Model
///
/// Every record column has a semantic type that decides how it is rendered,
/// searched and compared. A `FieldDescriptor` is the static metadata a screen
/// declares for each of its columns.
///
/// # Rendering
///
/// Each value has a text form used both for display and for free-text search:
///
/// - text and status values as-is
/// - numbers without a trailing `.0` when integral (`70`, `4.5`)
/// - dates as RFC 3339 in UTC
/// - text lists joined with `", "`
/// - null as the empty string

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat};
use serde::{Deserialize, Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;

/// Separator used when a text list is rendered as a single string
pub const LIST_SEPARATOR: &str = ", ";

/// Semantic field types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldType {
    Text,
    Number,
    Date,
    TextList,
    Status,
}

impl FieldType {
    /// Whether values of this type can take part in free-text search
    pub fn is_searchable(&self) -> bool {
        matches!(self, FieldType::Text | FieldType::TextList)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldType::Text => "text",
            FieldType::Number => "number",
            FieldType::Date => "date",
            FieldType::TextList => "textList",
            FieldType::Status => "status",
        };
        f.write_str(name)
    }
}

/// A single typed value inside a record
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    /// Milliseconds since the Unix epoch, UTC
    Date(i64),
    TextList(Vec<String>),
    Status(String),
    Null,
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Text form of the value, see the module docs for the per-type rules.
    pub fn render(&self) -> Cow<'_, str> {
        match self {
            FieldValue::Text(s) | FieldValue::Status(s) => Cow::Borrowed(s),
            FieldValue::Number(n) => Cow::Owned(n.to_string()),
            FieldValue::Date(ms) => Cow::Owned(format_instant(*ms).unwrap_or_default()),
            FieldValue::TextList(items) => Cow::Owned(items.join(LIST_SEPARATOR)),
            FieldValue::Null => Cow::Borrowed(""),
        }
    }

    /// Numeric reading of the value. Text that parses as a number is
    /// accepted; NaN and anything else is `None`.
    pub fn as_number(&self) -> Option<f64> {
        let n = match self {
            FieldValue::Number(n) => *n,
            FieldValue::Text(s) | FieldValue::Status(s) => s.trim().parse::<f64>().ok()?,
            _ => return None,
        };
        if n.is_nan() {
            None
        } else {
            Some(n)
        }
    }

    /// Instant of the value in epoch milliseconds. Text is parsed with
    /// [`parse_instant`]; numbers are taken as epoch milliseconds.
    pub fn as_instant(&self) -> Option<i64> {
        match self {
            FieldValue::Date(ms) => Some(*ms),
            FieldValue::Text(s) => parse_instant(s),
            FieldValue::Number(n) if n.is_finite() => Some(*n as i64),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) | FieldValue::Status(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            FieldValue::TextList(items) => Some(items),
            _ => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value as f64)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Number(value as f64)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        FieldValue::TextList(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::Text(s) | FieldValue::Status(s) => serializer.serialize_str(s),
            FieldValue::Number(n) if n.is_finite() => serializer.serialize_f64(*n),
            FieldValue::Number(_) | FieldValue::Null => serializer.serialize_none(),
            FieldValue::Date(ms) => match format_instant(*ms) {
                Some(text) => serializer.serialize_str(&text),
                None => serializer.serialize_none(),
            },
            FieldValue::TextList(items) => items.serialize(serializer),
        }
    }
}

/// Static metadata for one field of a record.
///
/// # Examples
///
/// ```
/// use talentgrid::{FieldDescriptor, FieldType};
///
/// let name = FieldDescriptor::text("name").searchable();
/// let status = FieldDescriptor::status("status", ["scheduled", "completed", "flagged"]);
///
/// assert!(name.searchable);
/// assert_eq!(status.field_type, FieldType::Status);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub searchable: bool,
    /// Column heading; falls back to the field name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Known status labels in sort order (status fields only)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub statuses: Vec<String>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        FieldDescriptor {
            name: name.into(),
            field_type,
            searchable: false,
            label: None,
            statuses: Vec::new(),
        }
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Text)
    }

    pub fn number(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Number)
    }

    pub fn date(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Date)
    }

    pub fn text_list(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::TextList)
    }

    pub fn status<I, S>(name: impl Into<String>, statuses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut descriptor = Self::new(name, FieldType::Status);
        descriptor.statuses = statuses.into_iter().map(Into::into).collect();
        descriptor
    }

    /// Mark the field as taking part in free-text search
    pub fn searchable(mut self) -> Self {
        self.searchable = true;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }
}

/// Parse a timestamp into epoch milliseconds (UTC).
///
/// Accepts RFC 3339 (`2024-01-02T09:30:00Z`, with any offset),
/// `YYYY-MM-DD HH:MM:SS` / `YYYY-MM-DDTHH:MM:SS` with optional fraction
/// (taken as UTC), and a bare `YYYY-MM-DD` (UTC midnight).
pub fn parse_instant(text: &str) -> Option<i64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.timestamp_millis());
    }

    const NAIVE_FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
    ];
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc().timestamp_millis());
        }
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().timestamp_millis())
}

/// Format epoch milliseconds as RFC 3339 UTC. `None` when out of range.
pub fn format_instant(ms: i64) -> Option<String> {
    DateTime::from_timestamp_millis(ms).map(|dt| dt.to_rfc3339_opts(SecondsFormat::AutoSi, true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_values() {
        assert_eq!(FieldValue::Text("Amy".to_string()).render(), "Amy");
        assert_eq!(FieldValue::Number(70.0).render(), "70");
        assert_eq!(FieldValue::Number(4.5).render(), "4.5");
        assert_eq!(
            FieldValue::TextList(vec!["rust".to_string(), "sql".to_string()]).render(),
            "rust, sql"
        );
        assert_eq!(FieldValue::Null.render(), "");
        assert_eq!(FieldValue::Date(0).render(), "1970-01-01T00:00:00Z");
    }

    #[test]
    fn test_parse_instant_formats() {
        let day = parse_instant("2024-01-02").unwrap();
        assert_eq!(day, 1_704_153_600_000);
        assert_eq!(parse_instant("2024-01-02T00:00:00Z"), Some(day));
        assert_eq!(parse_instant("2024-01-02 00:00:00"), Some(day));
        assert_eq!(parse_instant("2024-01-02T01:00:00+01:00"), Some(day));
        assert_eq!(parse_instant("2024-01-02T00:00:00.250Z"), Some(day + 250));
    }

    #[test]
    fn test_parse_instant_rejects_garbage() {
        assert_eq!(parse_instant(""), None);
        assert_eq!(parse_instant("next tuesday"), None);
        assert_eq!(parse_instant("2024-13-45"), None);
    }

    #[test]
    fn test_as_number_is_tolerant() {
        assert_eq!(FieldValue::Number(3.0).as_number(), Some(3.0));
        assert_eq!(FieldValue::Text(" 42 ".to_string()).as_number(), Some(42.0));
        assert_eq!(FieldValue::Text("n/a".to_string()).as_number(), None);
        assert_eq!(FieldValue::Number(f64::NAN).as_number(), None);
        assert_eq!(FieldValue::Null.as_number(), None);
    }

    #[test]
    fn test_as_instant() {
        assert_eq!(FieldValue::Date(5).as_instant(), Some(5));
        assert_eq!(
            FieldValue::Text("1970-01-01".to_string()).as_instant(),
            Some(0)
        );
        assert_eq!(FieldValue::Text("soon".to_string()).as_instant(), None);
    }

    #[test]
    fn test_descriptor_builders() {
        let skills = FieldDescriptor::text_list("skills")
            .searchable()
            .with_label("Skills");
        assert_eq!(skills.field_type, FieldType::TextList);
        assert!(skills.searchable);
        assert_eq!(skills.display_label(), "Skills");

        let score = FieldDescriptor::number("score");
        assert!(!score.searchable);
        assert_eq!(score.display_label(), "score");
    }

    #[test]
    fn test_descriptor_json_shape() {
        let json = r#"{"name": "status", "type": "status", "statuses": ["open", "closed"]}"#;
        let descriptor: FieldDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(descriptor, FieldDescriptor::status("status", ["open", "closed"]));
    }

    #[test]
    fn test_value_serialization() {
        let list = FieldValue::TextList(vec!["a".to_string()]);
        assert_eq!(serde_json::to_string(&list).unwrap(), r#"["a"]"#);
        assert_eq!(serde_json::to_string(&FieldValue::Null).unwrap(), "null");
        assert_eq!(
            serde_json::to_string(&FieldValue::Date(0)).unwrap(),
            r#""1970-01-01T00:00:00Z""#
        );
    }
}
