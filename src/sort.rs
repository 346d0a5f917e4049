/// talentgrid Sort Engine
///
/// Orders records by a single active field. Sorting is opt-in: with no
/// active field the input order is returned untouched.
///
/// The engine extracts one sort key per record, then runs a stable sort, so
/// records that compare equal keep their input order in both directions.
/// Descending order reverses the ascending comparison result rather than
/// using a second comparator.

use crate::compare::{Comparator, ComparatorRegistry};
use crate::field::FieldDescriptor;
use crate::record::Record;
use log::warn;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Smallest first
    #[default]
    #[serde(alias = "asc")]
    Ascending,
    /// Largest first
    #[serde(alias = "desc")]
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Apply this direction to an ascending comparison result
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// The active sort of a table: a field and a direction, or nothing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
    active: Option<FieldDescriptor>,
    direction: SortDirection,
}

impl SortState {
    /// No active sort; records keep their original order
    pub fn none() -> Self {
        SortState::default()
    }

    pub fn by(field: FieldDescriptor, direction: SortDirection) -> Self {
        SortState {
            active: Some(field),
            direction,
        }
    }

    pub fn ascending(field: FieldDescriptor) -> Self {
        Self::by(field, SortDirection::Ascending)
    }

    pub fn descending(field: FieldDescriptor) -> Self {
        Self::by(field, SortDirection::Descending)
    }

    pub fn field(&self) -> Option<&FieldDescriptor> {
        self.active.as_ref()
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// State after the user clicks `field`'s column header: the active
    /// field flips direction, any other field starts ascending.
    pub fn toggled(&self, field: &FieldDescriptor) -> SortState {
        match &self.active {
            Some(active) if active.name == field.name => SortState::by(active.clone(), self.direction.flipped()),
            _ => SortState::ascending(field.clone()),
        }
    }
}

/// Order records according to `state`.
///
/// # Examples
///
/// ```
/// use talentgrid::{sort, ComparatorRegistry, FieldDescriptor, Record, SortState};
///
/// let score = FieldDescriptor::number("score");
/// let registry = ComparatorRegistry::from_fields(&[score.clone()]);
/// let records = vec![
///     Record::new().with("name", "Bob").with("score", 70),
///     Record::new().with("name", "Amy").with("score", 90),
///     Record::new().with("name", "Cal").with("score", 70),
/// ];
///
/// let sorted = sort(records.iter().collect(), &SortState::ascending(score), &registry);
/// let names: Vec<_> = sorted.iter().map(|r| r.text("name")).collect();
/// assert_eq!(names, ["Bob", "Cal", "Amy"]);
/// ```
pub fn sort<'a>(records: Vec<&'a Record>, state: &SortState, registry: &ComparatorRegistry) -> Vec<&'a Record> {
    let Some(field) = state.field() else {
        return records;
    };

    let fallback;
    let comparator = match registry.comparator(&field.name) {
        Some(comparator) => comparator,
        None => {
            debug_assert!(false, "no comparator registered for field '{}'", field.name);
            warn!("no comparator registered for field '{}', using its type default", field.name);
            fallback = Comparator::for_descriptor(field);
            &fallback
        }
    };

    let direction = state.direction();
    let mut keyed: Vec<_> = records
        .into_iter()
        .map(|record| (comparator.key(record.get(&field.name)), record))
        .collect();

    // `sort_by` is stable, which is the tie-break policy
    keyed.sort_by(|(a, _), (b, _)| direction.apply(comparator.compare_keys(a, b)));

    keyed.into_iter().map(|(_, record)| record).collect()
}
