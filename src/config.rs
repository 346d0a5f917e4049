/// talentgrid Table Configuration
///
/// Each screen supplies one `TableConfig`: the fields it shows, which of them
/// take part in free-text search, and the page sizes it offers. The
/// configuration is validated once when it is built, so a screen that refers
/// to an undeclared field fails while it is being wired up rather than
/// rendering an unfiltered table in production.
///
/// # JSON shape
///
/// ```json
/// {
///   "fields": [
///     {"name": "name", "type": "text"},
///     {"name": "skills", "type": "textList"},
///     {"name": "score", "type": "number"}
///   ],
///   "searchableFields": ["name", "skills"],
///   "pageSizeOptions": [10, 25, 50],
///   "defaultPageSize": 25,
///   "initialSort": {"field": "score", "direction": "descending"}
/// }
/// ```

use crate::error::ConfigError;
use crate::field::FieldDescriptor;
use crate::sort::SortDirection;
use serde::Deserialize;
use std::collections::HashSet;
use std::num::NonZeroUsize;

/// Initial sort requested by a configuration document
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitialSort {
    pub field: String,
    #[serde(default)]
    pub direction: SortDirection,
}

/// Raw configuration document before validation
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigDocument {
    fields: Vec<FieldDescriptor>,
    #[serde(default)]
    searchable_fields: Option<Vec<String>>,
    page_size_options: Vec<NonZeroUsize>,
    #[serde(default)]
    default_page_size: Option<NonZeroUsize>,
    #[serde(default)]
    initial_query: Option<String>,
    #[serde(default)]
    initial_sort: Option<InitialSort>,
}

/// Validated configuration for one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    fields: Vec<FieldDescriptor>,
    /// Indices into `fields`, in search order
    searchable: Vec<usize>,
    page_size_options: Vec<NonZeroUsize>,
    default_page_size: NonZeroUsize,
    initial_query: String,
    initial_sort: Option<InitialSort>,
}

impl TableConfig {
    /// Build a configuration from descriptors. Searchable fields are the
    /// descriptors flagged `searchable`, in declaration order. The first
    /// page size option is the default.
    pub fn new(fields: Vec<FieldDescriptor>, page_size_options: Vec<usize>) -> Result<Self, ConfigError> {
        let page_size_options = page_size_options
            .into_iter()
            .map(|size| NonZeroUsize::new(size).ok_or(ConfigError::UnsupportedPageSize(size)))
            .collect::<Result<Vec<_>, _>>()?;
        let default_page_size = *page_size_options.first().ok_or(ConfigError::NoPageSizes)?;

        Self::validate(ConfigDocument {
            fields,
            searchable_fields: None,
            page_size_options,
            default_page_size: Some(default_page_size),
            initial_query: None,
            initial_sort: None,
        })
    }

    /// Parse and validate a JSON configuration document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let document: ConfigDocument =
            serde_json::from_str(json).map_err(|e| ConfigError::Malformed(e.to_string()))?;
        Self::validate(document)
    }

    fn validate(document: ConfigDocument) -> Result<Self, ConfigError> {
        let ConfigDocument {
            mut fields,
            searchable_fields,
            page_size_options,
            default_page_size,
            initial_query,
            initial_sort,
        } = document;

        let mut seen = HashSet::new();
        for descriptor in &fields {
            if !seen.insert(descriptor.name.as_str()) {
                return Err(ConfigError::DuplicateField(descriptor.name.clone()));
            }
        }

        // An explicit list overrides the per-descriptor flags
        if let Some(names) = searchable_fields {
            for descriptor in fields.iter_mut() {
                descriptor.searchable = false;
            }
            let mut ordered = Vec::with_capacity(names.len());
            for name in names {
                let index = fields
                    .iter()
                    .position(|d| d.name == name)
                    .ok_or_else(|| ConfigError::UnknownField(name.clone()))?;
                if !fields[index].searchable {
                    fields[index].searchable = true;
                    ordered.push(index);
                }
            }
            return Self::finish(fields, ordered, page_size_options, default_page_size, initial_query, initial_sort);
        }

        let ordered = fields
            .iter()
            .enumerate()
            .filter(|(_, d)| d.searchable)
            .map(|(i, _)| i)
            .collect();
        Self::finish(fields, ordered, page_size_options, default_page_size, initial_query, initial_sort)
    }

    fn finish(
        fields: Vec<FieldDescriptor>,
        searchable: Vec<usize>,
        page_size_options: Vec<NonZeroUsize>,
        default_page_size: Option<NonZeroUsize>,
        initial_query: Option<String>,
        initial_sort: Option<InitialSort>,
    ) -> Result<Self, ConfigError> {
        if searchable.is_empty() {
            return Err(ConfigError::NoSearchableFields);
        }
        for &index in &searchable {
            let descriptor = &fields[index];
            if !descriptor.field_type.is_searchable() {
                return Err(ConfigError::NotSearchable {
                    field: descriptor.name.clone(),
                    field_type: descriptor.field_type,
                });
            }
        }

        let first = *page_size_options.first().ok_or(ConfigError::NoPageSizes)?;
        let default_page_size = default_page_size.unwrap_or(first);
        if !page_size_options.contains(&default_page_size) {
            return Err(ConfigError::UnsupportedPageSize(default_page_size.get()));
        }

        if let Some(sort) = &initial_sort {
            if !fields.iter().any(|d| d.name == sort.field) {
                return Err(ConfigError::UnknownField(sort.field.clone()));
            }
        }

        Ok(TableConfig {
            fields,
            searchable,
            page_size_options,
            default_page_size,
            initial_query: initial_query.unwrap_or_default(),
            initial_sort,
        })
    }

    /// Replace the initial query
    pub fn with_initial_query(mut self, query: impl Into<String>) -> Self {
        self.initial_query = query.into();
        self
    }

    /// Replace the initial sort. Fails if the field is not declared.
    pub fn with_initial_sort(mut self, field: &str, direction: SortDirection) -> Result<Self, ConfigError> {
        self.descriptor(field)?;
        self.initial_sort = Some(InitialSort {
            field: field.to_string(),
            direction,
        });
        Ok(self)
    }

    /// Replace the default page size. Fails if it is not an offered option.
    pub fn with_default_page_size(mut self, size: usize) -> Result<Self, ConfigError> {
        self.default_page_size = self.page_size_option(size)?;
        Ok(self)
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Look up a declared field
    pub fn descriptor(&self, name: &str) -> Result<&FieldDescriptor, ConfigError> {
        self.fields
            .iter()
            .find(|d| d.name == name)
            .ok_or_else(|| ConfigError::UnknownField(name.to_string()))
    }

    /// Searchable descriptors in search order
    pub fn searchable_fields(&self) -> Vec<&FieldDescriptor> {
        self.searchable.iter().map(|&i| &self.fields[i]).collect()
    }

    pub fn page_size_options(&self) -> &[NonZeroUsize] {
        &self.page_size_options
    }

    /// Validate a requested page size against the offered options
    pub fn page_size_option(&self, size: usize) -> Result<NonZeroUsize, ConfigError> {
        self.page_size_options
            .iter()
            .copied()
            .find(|option| option.get() == size)
            .ok_or(ConfigError::UnsupportedPageSize(size))
    }

    pub fn default_page_size(&self) -> NonZeroUsize {
        self.default_page_size
    }

    pub fn initial_query(&self) -> &str {
        &self.initial_query
    }

    pub fn initial_sort(&self) -> Option<&InitialSort> {
        self.initial_sort.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldType;

    fn fields() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::text("name").searchable(),
            FieldDescriptor::number("score"),
            FieldDescriptor::text_list("skills").searchable(),
        ]
    }

    #[test]
    fn test_config_from_descriptors() {
        let config = TableConfig::new(fields(), vec![10, 25]).unwrap();

        let searchable: Vec<&str> = config.searchable_fields().iter().map(|d| d.name.as_str()).collect();
        assert_eq!(searchable, vec!["name", "skills"]);
        assert_eq!(config.default_page_size().get(), 10);
        assert_eq!(config.descriptor("score").unwrap().field_type, FieldType::Number);
        assert_eq!(config.initial_query(), "");
        assert!(config.initial_sort().is_none());
    }

    #[test]
    fn test_unknown_field_lookup() {
        let config = TableConfig::new(fields(), vec![10]).unwrap();
        assert_eq!(
            config.descriptor("salary"),
            Err(ConfigError::UnknownField("salary".to_string()))
        );
    }

    #[test]
    fn test_duplicate_fields_rejected() {
        let mut fields = fields();
        fields.push(FieldDescriptor::text("name"));
        assert_eq!(
            TableConfig::new(fields, vec![10]),
            Err(ConfigError::DuplicateField("name".to_string()))
        );
    }

    #[test]
    fn test_non_text_field_cannot_be_searched() {
        let fields = vec![FieldDescriptor::number("score").searchable()];
        assert_eq!(
            TableConfig::new(fields, vec![10]),
            Err(ConfigError::NotSearchable {
                field: "score".to_string(),
                field_type: FieldType::Number,
            })
        );
    }

    #[test]
    fn test_page_size_validation() {
        assert_eq!(TableConfig::new(fields(), vec![]), Err(ConfigError::NoPageSizes));
        assert_eq!(
            TableConfig::new(fields(), vec![10, 0]),
            Err(ConfigError::UnsupportedPageSize(0))
        );

        let config = TableConfig::new(fields(), vec![10, 25]).unwrap();
        assert_eq!(config.page_size_option(25).unwrap().get(), 25);
        assert_eq!(config.page_size_option(7), Err(ConfigError::UnsupportedPageSize(7)));
        assert_eq!(config.clone().with_default_page_size(25).unwrap().default_page_size().get(), 25);
        assert!(config.with_default_page_size(100).is_err());
    }

    #[test]
    fn test_config_from_json() {
        let json = r#"{
            "fields": [
                {"name": "name", "type": "text"},
                {"name": "skills", "type": "textList"},
                {"name": "score", "type": "number"}
            ],
            "searchableFields": ["skills", "name"],
            "pageSizeOptions": [10, 25, 50],
            "defaultPageSize": 25,
            "initialQuery": "rust",
            "initialSort": {"field": "score", "direction": "descending"}
        }"#;
        let config = TableConfig::from_json(json).unwrap();

        let searchable: Vec<&str> = config.searchable_fields().iter().map(|d| d.name.as_str()).collect();
        assert_eq!(searchable, vec!["skills", "name"]);
        assert!(config.descriptor("name").unwrap().searchable);
        assert_eq!(config.default_page_size().get(), 25);
        assert_eq!(config.initial_query(), "rust");
        let sort = config.initial_sort().unwrap();
        assert_eq!(sort.field, "score");
        assert_eq!(sort.direction, SortDirection::Descending);
    }

    #[test]
    fn test_config_from_json_errors() {
        let unknown = r#"{
            "fields": [{"name": "name", "type": "text"}],
            "searchableFields": ["title"],
            "pageSizeOptions": [10]
        }"#;
        assert_eq!(
            TableConfig::from_json(unknown),
            Err(ConfigError::UnknownField("title".to_string()))
        );

        let bad_sort = r#"{
            "fields": [{"name": "name", "type": "text", "searchable": true}],
            "pageSizeOptions": [10],
            "initialSort": {"field": "score"}
        }"#;
        assert_eq!(
            TableConfig::from_json(bad_sort),
            Err(ConfigError::UnknownField("score".to_string()))
        );

        let zero_page = r#"{
            "fields": [{"name": "name", "type": "text", "searchable": true}],
            "pageSizeOptions": [0]
        }"#;
        assert!(matches!(
            TableConfig::from_json(zero_page),
            Err(ConfigError::Malformed(_))
        ));

        let no_search = r#"{
            "fields": [{"name": "name", "type": "text"}],
            "pageSizeOptions": [10]
        }"#;
        assert_eq!(TableConfig::from_json(no_search), Err(ConfigError::NoSearchableFields));
    }
}
