/// talentgrid View Binding
///
/// Composes the engine into the pipeline every table screen uses:
///
/// ```text
/// records -> filter -> sort -> paginate -> ViewResult
/// ```
///
/// Filtering runs before sorting and sorting before pagination, so page
/// windows are always computed over the reduced, ordered set.
///
/// `derive` is the pure form. `TableView` owns the configuration, the record
/// snapshot and the user-facing state, applies one state change per UI event
/// and memoizes the derived result until the snapshot or the state changes.

use crate::compare::ComparatorRegistry;
use crate::config::TableConfig;
use crate::error::ConfigError;
use crate::field::FieldValue;
use crate::filter::{filter, FilterQuery};
use crate::page::{paginate, PageState, PageWindow};
use crate::record::Record;
use crate::refresh::{RefreshOutcome, RefreshTicket, RefreshTracker};
use crate::sort::{sort, SortDirection, SortState};
use log::{debug, trace};
use std::cmp::Ordering;

/// Query, sort and page state of one table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub query: FilterQuery,
    pub sort: SortState,
    pub page: PageState,
}

impl ViewState {
    /// Starting state described by a configuration
    pub fn initial(config: &TableConfig) -> Self {
        let sort = config
            .initial_sort()
            .and_then(|initial| {
                config
                    .descriptor(&initial.field)
                    .ok()
                    .map(|descriptor| SortState::by(descriptor.clone(), initial.direction))
            })
            .unwrap_or_default();

        ViewState {
            query: FilterQuery::new(config.initial_query()),
            sort,
            page: PageState::new(config.default_page_size()),
        }
    }
}

/// What the presentation layer renders: the page of records plus the
/// counts and flags the page controls need
pub type ViewResult = PageWindow<Record>;

/// Run the full pipeline once.
///
/// # Examples
///
/// ```
/// use talentgrid::{derive, ComparatorRegistry, FieldDescriptor, Record, SortState, TableConfig, ViewState};
///
/// let config = TableConfig::new(
///     vec![FieldDescriptor::text("name").searchable(), FieldDescriptor::number("score")],
///     vec![2],
/// ).unwrap();
/// let registry = ComparatorRegistry::from_fields(config.fields());
/// let records = vec![
///     Record::new().with("name", "Bob").with("score", 70),
///     Record::new().with("name", "Amy").with("score", 90),
///     Record::new().with("name", "Cal").with("score", 70),
/// ];
///
/// let mut state = ViewState::initial(&config);
/// state.sort = SortState::ascending(config.descriptor("score").unwrap().clone());
///
/// let result = derive(&records, &config, &registry, &state);
/// assert_eq!(result.total_count, 3);
/// assert_eq!(result.page_count, 2);
/// assert_eq!(result.windowed[0].text("name"), "Bob");
/// assert_eq!(result.windowed[1].text("name"), "Cal");
/// ```
pub fn derive(
    records: &[Record],
    config: &TableConfig,
    registry: &ComparatorRegistry,
    state: &ViewState,
) -> ViewResult {
    let searchable = config.searchable_fields();
    let matching = filter(records, &state.query, &searchable);
    let ordered = sort(matching, &state.sort, registry);
    paginate(&ordered, state.page).map(Record::clone)
}

#[derive(Debug, Clone)]
struct CachedView {
    generation: u64,
    state: ViewState,
    result: ViewResult,
}

/// A configured table: record snapshot, view state and memoized result.
///
/// # Examples
///
/// ```
/// use talentgrid::{FieldDescriptor, Record, TableConfig, TableView};
///
/// let config = TableConfig::new(
///     vec![FieldDescriptor::text("name").searchable(), FieldDescriptor::number("score")],
///     vec![2, 10],
/// ).unwrap();
///
/// let mut table = TableView::new(config);
/// table.replace_records(vec![
///     Record::new().with("name", "Bob").with("score", 70),
///     Record::new().with("name", "Amy").with("score", 90),
///     Record::new().with("name", "Cal").with("score", 70),
/// ]);
///
/// table.set_query("am");
/// assert_eq!(table.view().total_count, 1);
///
/// table.set_query("");
/// table.toggle_sort("score").unwrap();
/// table.set_page(1);
/// let page = table.view();
/// assert_eq!(page.windowed.len(), 1);
/// assert_eq!(page.windowed[0].text("name"), "Amy");
/// ```
#[derive(Debug)]
pub struct TableView {
    config: TableConfig,
    registry: ComparatorRegistry,
    records: Vec<Record>,
    refresh: RefreshTracker,
    state: ViewState,
    cache: Option<CachedView>,
}

impl TableView {
    /// An empty table in its configured initial state
    pub fn new(config: TableConfig) -> Self {
        let registry = ComparatorRegistry::from_fields(config.fields());
        let state = ViewState::initial(&config);
        TableView {
            config,
            registry,
            records: Vec::new(),
            refresh: RefreshTracker::new(),
            state,
            cache: None,
        }
    }

    pub fn with_records(mut self, records: Vec<Record>) -> Self {
        self.replace_records(records);
        self
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Generation of the current record snapshot
    pub fn generation(&self) -> u64 {
        self.refresh.generation()
    }

    /// Override the comparator of a declared field
    pub fn register_comparator<F>(&mut self, field: &str, compare: F) -> Result<(), ConfigError>
    where
        F: Fn(Option<&FieldValue>, Option<&FieldValue>) -> Ordering + 'static,
    {
        self.registry.register(field, compare)?;
        self.cache = None;
        Ok(())
    }

    // ------------------------------------------------------------------
    // State transitions, one per UI event
    // ------------------------------------------------------------------

    pub fn set_query(&mut self, text: impl Into<String>) {
        self.state.query = FilterQuery::new(text);
    }

    /// Column header click: the active field flips direction, another
    /// field becomes active ascending.
    pub fn toggle_sort(&mut self, field: &str) -> Result<SortDirection, ConfigError> {
        let descriptor = self.config.descriptor(field)?;
        self.state.sort = self.state.sort.toggled(descriptor);
        Ok(self.state.sort.direction())
    }

    /// Sort by `field` in an explicit direction
    pub fn set_sort(&mut self, field: &str, direction: SortDirection) -> Result<(), ConfigError> {
        let descriptor = self.config.descriptor(field)?;
        self.state.sort = SortState::by(descriptor.clone(), direction);
        Ok(())
    }

    /// Back to the original record order
    pub fn clear_sort(&mut self) {
        self.state.sort = SortState::none();
    }

    /// Jump to a page. Out-of-range indices are clamped on the next view.
    pub fn set_page(&mut self, page_index: usize) {
        self.state.page = self.state.page.with_page(page_index);
    }

    pub fn next_page(&mut self) {
        let next = self.state.page.page_index().saturating_add(1);
        self.set_page(next);
    }

    pub fn previous_page(&mut self) {
        let previous = self.state.page.page_index().saturating_sub(1);
        self.set_page(previous);
    }

    /// Change the page size; must be one of the configured options.
    /// Returns to the first page.
    pub fn set_page_size(&mut self, size: usize) -> Result<(), ConfigError> {
        let size = self.config.page_size_option(size)?;
        self.state.page = self.state.page.with_page_size(size);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Record snapshots
    // ------------------------------------------------------------------

    /// Install a new snapshot directly. Returns its generation.
    pub fn replace_records(&mut self, records: Vec<Record>) -> u64 {
        self.records = records;
        let generation = self.refresh.replaced();
        debug!("installed {} records (generation {})", self.records.len(), generation);
        generation
    }

    /// Start a re-fetch; the current snapshot stays in use until it completes
    pub fn begin_refresh(&mut self) -> RefreshTicket {
        let ticket = self.refresh.begin();
        trace!("refresh {} started", ticket.id());
        ticket
    }

    /// Deliver the result of a re-fetch. Results for anything but the most
    /// recently started fetch are discarded.
    pub fn complete_refresh(&mut self, ticket: RefreshTicket, records: Vec<Record>) -> RefreshOutcome {
        let outcome = self.refresh.complete(ticket);
        match outcome {
            RefreshOutcome::Applied { generation } => {
                debug!(
                    "refresh {} applied {} records (generation {})",
                    ticket.id(),
                    records.len(),
                    generation
                );
                self.records = records;
            }
            RefreshOutcome::Stale { pending: Some(pending), .. } => {
                debug!(
                    "discarding stale refresh {} (refresh {} still pending)",
                    ticket.id(),
                    pending.id()
                );
            }
            RefreshOutcome::Stale { pending: None, .. } => {
                debug!("discarding stale refresh {}", ticket.id());
            }
        }
        outcome
    }

    pub fn is_refreshing(&self) -> bool {
        self.refresh.is_pending()
    }

    // ------------------------------------------------------------------
    // Derivation
    // ------------------------------------------------------------------

    /// The current page. Re-derived only when the snapshot or the state
    /// changed since the last call.
    pub fn view(&mut self) -> &ViewResult {
        let generation = self.refresh.generation();
        let fresh = self
            .cache
            .as_ref()
            .is_some_and(|cached| cached.generation == generation && cached.state == self.state);

        let cached = match self.cache.take() {
            Some(cached) if fresh => {
                trace!("view cache hit (generation {})", generation);
                cached
            }
            _ => self.rederive(generation),
        };
        &self.cache.insert(cached).result
    }

    fn rederive(&mut self, generation: u64) -> CachedView {
        let result = derive(&self.records, &self.config, &self.registry, &self.state);

        if result.current_page != self.state.page.page_index() {
            debug!(
                "page {} out of range for {} rows, clamped to {}",
                self.state.page.page_index(),
                result.total_count,
                result.current_page
            );
            self.state.page = self.state.page.with_page(result.current_page);
        }

        debug!(
            "derived view: {} of {} records match, page {}/{}",
            result.windowed.len(),
            result.total_count,
            result.current_page + 1,
            result.page_count
        );

        CachedView {
            generation,
            state: self.state.clone(),
            result,
        }
    }
}
