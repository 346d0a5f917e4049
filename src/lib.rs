/// talentgrid - Client-Side Tabular Engine
///
/// Filtering, sorting and pagination for the tables of a recruiting
/// dashboard (candidates, question sets, flagged interviews, interview
/// results). Each screen declares its fields once in a `TableConfig`; the
/// engine does the rest as a pure, typed pipeline:
///
/// ```text
/// records -> filter -> sort -> paginate -> ViewResult
/// ```

pub mod error;
pub mod field;
pub mod record;
pub mod config;
pub mod compare;
pub mod filter;
pub mod sort;
pub mod page;
pub mod refresh;
pub mod view;
pub mod messages;

pub use error::{ConfigError, Error, IngestError, Result};
pub use field::{parse_instant, FieldDescriptor, FieldType, FieldValue};
pub use record::{records_from_json, records_from_value, Record};
pub use config::{InitialSort, TableConfig};
pub use compare::{Comparator, ComparatorRegistry};
pub use filter::{filter, filter_indices, FilterQuery};
pub use sort::{sort, SortDirection, SortState};
pub use page::{page_count, paginate, PageState, PageWindow};
pub use refresh::{RefreshOutcome, RefreshTicket, RefreshTracker};
pub use view::{derive, TableView, ViewResult, ViewState};
pub use messages::{ViewAction, ViewResponse};

/// Load a configuration and a JSON record payload into a ready table
pub fn load_table(config_json: &str, records_json: &str) -> Result<TableView> {
    let config = TableConfig::from_json(config_json)?;
    let records = records_from_json(records_json, &config)?;
    Ok(TableView::new(config).with_records(records))
}
