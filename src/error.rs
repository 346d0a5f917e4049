/// talentgrid error types
///
/// The engine itself never fails on well-formed input. Errors come from
/// integration mistakes (a configuration that references an undeclared
/// field, a page size that was never offered) and from mapping an external
/// payload into records.

use crate::field::FieldType;

/// Crate-wide result alias
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Ingest error: {0}")]
    Ingest(#[from] IngestError),
}

/// Caller/integration errors. These should surface while a screen is being
/// wired up, never be swallowed at runtime.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Field '{0}' is not declared")]
    UnknownField(String),

    #[error("Field '{0}' is declared more than once")]
    DuplicateField(String),

    #[error("Field '{field}' has type {field_type} and cannot be searched")]
    NotSearchable { field: String, field_type: FieldType },

    #[error("At least one searchable field is required")]
    NoSearchableFields,

    #[error("At least one page size option is required")]
    NoPageSizes,

    #[error("Page size {0} is not one of the configured options")]
    UnsupportedPageSize(usize),

    #[error("Invalid configuration document: {0}")]
    Malformed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IngestError {
    #[error("JSON parse error: {0}")]
    Json(String),

    #[error("Expected an array of objects, found {0}")]
    NotAnArray(&'static str),

    #[error("Expected an object at index {0}")]
    NotAnObject(usize),
}

impl From<serde_json::Error> for IngestError {
    fn from(err: serde_json::Error) -> Self {
        IngestError::Json(err.to_string())
    }
}
