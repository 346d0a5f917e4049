/// talentgrid Comparator Registry
///
/// Maps each declared field to the comparison appropriate to its semantic
/// type. All built-in comparators define the natural ascending order; the
/// sort engine derives descending order by reversing their result.
///
/// | type     | key                                   | missing / malformed |
/// |----------|---------------------------------------|---------------------|
/// | text     | lowercased text                       | empty string        |
/// | number   | numeric value                         | `-Infinity`         |
/// | date     | epoch milliseconds                    | earliest instant    |
/// | textList | lowercased `", "`-joined text         | empty string        |
/// | status   | position in declared labels, then text | before known labels |

use crate::error::ConfigError;
use crate::field::{FieldDescriptor, FieldType, FieldValue};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Caller-supplied comparison over two (possibly missing) values
pub type CompareFn = Rc<dyn Fn(Option<&FieldValue>, Option<&FieldValue>) -> Ordering>;

/// A precomputed sort key for one record
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey<'a> {
    Text(String),
    Number(f64),
    Instant(i64),
    /// Rank among declared status labels (`None` when unknown) and lowercased label
    Status(Option<usize>, String),
    /// Untouched value for custom comparators
    Raw(Option<&'a FieldValue>),
}

/// Ascending comparison for one field
#[derive(Clone)]
pub enum Comparator {
    Text,
    Number,
    Date,
    TextList,
    /// Lowercased label to rank
    Status(HashMap<String, usize>),
    Custom(CompareFn),
}

impl Comparator {
    /// Default comparator for a descriptor's semantic type
    pub fn for_descriptor(descriptor: &FieldDescriptor) -> Self {
        match descriptor.field_type {
            FieldType::Text => Comparator::Text,
            FieldType::Number => Comparator::Number,
            FieldType::Date => Comparator::Date,
            FieldType::TextList => Comparator::TextList,
            FieldType::Status => Comparator::Status(
                descriptor
                    .statuses
                    .iter()
                    .enumerate()
                    .map(|(rank, label)| (label.to_lowercase(), rank))
                    .collect(),
            ),
        }
    }

    /// Extract the key a value sorts by. Called once per record.
    pub fn key<'a>(&self, value: Option<&'a FieldValue>) -> SortKey<'a> {
        match self {
            Comparator::Text | Comparator::TextList => SortKey::Text(lowered(value)),
            Comparator::Number => SortKey::Number(
                value.and_then(FieldValue::as_number).unwrap_or(f64::NEG_INFINITY),
            ),
            Comparator::Date => {
                SortKey::Instant(value.and_then(FieldValue::as_instant).unwrap_or(i64::MIN))
            }
            Comparator::Status(ranks) => {
                let label = lowered(value);
                SortKey::Status(ranks.get(&label).copied(), label)
            }
            Comparator::Custom(_) => SortKey::Raw(value),
        }
    }

    /// Compare two keys produced by this comparator, ascending
    pub fn compare_keys(&self, a: &SortKey<'_>, b: &SortKey<'_>) -> Ordering {
        match (a, b) {
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            (SortKey::Number(a), SortKey::Number(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            (SortKey::Instant(a), SortKey::Instant(b)) => a.cmp(b),
            (SortKey::Status(rank_a, a), SortKey::Status(rank_b, b)) => {
                rank_a.cmp(rank_b).then_with(|| a.cmp(b))
            }
            (SortKey::Raw(a), SortKey::Raw(b)) => match self {
                Comparator::Custom(compare) => compare(*a, *b),
                _ => Ordering::Equal,
            },
            // Keys from one comparator always share a variant
            _ => Ordering::Equal,
        }
    }

    /// Compare two values directly, ascending
    pub fn compare(&self, a: Option<&FieldValue>, b: Option<&FieldValue>) -> Ordering {
        self.compare_keys(&self.key(a), &self.key(b))
    }
}

impl fmt::Debug for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Comparator::Text => f.write_str("Text"),
            Comparator::Number => f.write_str("Number"),
            Comparator::Date => f.write_str("Date"),
            Comparator::TextList => f.write_str("TextList"),
            Comparator::Status(ranks) => f.debug_tuple("Status").field(ranks).finish(),
            Comparator::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

fn lowered(value: Option<&FieldValue>) -> String {
    value.map(|v| v.render().to_lowercase()).unwrap_or_default()
}

/// Field name to comparator.
///
/// # Examples
///
/// ```
/// use talentgrid::{ComparatorRegistry, FieldDescriptor, FieldValue};
/// use std::cmp::Ordering;
///
/// let registry = ComparatorRegistry::from_fields(&[
///     FieldDescriptor::number("score"),
///     FieldDescriptor::date("appliedAt"),
/// ]);
///
/// let score = registry.comparator("score").unwrap();
/// let low = FieldValue::Number(70.0);
/// let high = FieldValue::Number(90.0);
/// assert_eq!(score.compare(Some(&low), Some(&high)), Ordering::Less);
/// // Missing numbers sort first
/// assert_eq!(score.compare(None, Some(&low)), Ordering::Less);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ComparatorRegistry {
    comparators: HashMap<String, Comparator>,
}

impl ComparatorRegistry {
    pub fn from_fields(fields: &[FieldDescriptor]) -> Self {
        ComparatorRegistry {
            comparators: fields
                .iter()
                .map(|d| (d.name.clone(), Comparator::for_descriptor(d)))
                .collect(),
        }
    }

    /// Override the comparator of a declared field
    pub fn register<F>(&mut self, field: &str, compare: F) -> Result<(), ConfigError>
    where
        F: Fn(Option<&FieldValue>, Option<&FieldValue>) -> Ordering + 'static,
    {
        let slot = self
            .comparators
            .get_mut(field)
            .ok_or_else(|| ConfigError::UnknownField(field.to_string()))?;
        *slot = Comparator::Custom(Rc::new(compare));
        Ok(())
    }

    pub fn comparator(&self, field: &str) -> Option<&Comparator> {
        self.comparators.get(field)
    }

    pub fn len(&self) -> usize {
        self.comparators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comparators.is_empty()
    }
}
