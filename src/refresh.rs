/// Refresh tracking for talentgrid record snapshots
///
/// Re-fetching a table's records is the one asynchronous step around the
/// engine. While a fetch is in flight the table keeps showing the last
/// snapshot; when it resolves, the snapshot is replaced in one step.
///
/// # Last write wins
///
/// Each fetch is started with `begin()`, which hands out a `RefreshTicket`.
/// Only the most recently issued ticket may complete. A result that arrives
/// for an older ticket is stale (a newer fetch was started after it) and is
/// discarded, so slow responses can never overwrite fresher data.
///
/// # Generations
///
/// Every accepted snapshot bumps a generation counter. Derived views compare
/// generations to know whether their cached result is still valid.

/// Handle for one in-flight fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RefreshTicket(u64);

impl RefreshTicket {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Result of completing a fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The snapshot was replaced; contains the new generation
    Applied { generation: u64 },
    /// A newer fetch or a direct replace superseded this one; the result
    /// was discarded. `pending` is the fetch still allowed to complete, if any.
    Stale {
        ticket: RefreshTicket,
        pending: Option<RefreshTicket>,
    },
}

impl RefreshOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, RefreshOutcome::Applied { .. })
    }
}

/// Ticket and generation bookkeeping for one record collection
#[derive(Debug, Clone, Default)]
pub struct RefreshTracker {
    /// Most recently issued ticket id
    latest_issued: u64,
    /// Ticket still allowed to complete
    pending: Option<u64>,
    /// Generation of the current snapshot
    generation: u64,
}

impl RefreshTracker {
    pub fn new() -> Self {
        RefreshTracker::default()
    }

    /// Start a fetch. Any fetch still in flight becomes stale.
    pub fn begin(&mut self) -> RefreshTicket {
        self.latest_issued += 1;
        self.pending = Some(self.latest_issued);
        RefreshTicket(self.latest_issued)
    }

    /// Try to complete a fetch. On `Applied` the caller must install the
    /// fetched records; on `Stale` it must drop them.
    pub fn complete(&mut self, ticket: RefreshTicket) -> RefreshOutcome {
        if self.pending == Some(ticket.0) {
            self.pending = None;
            self.generation += 1;
            RefreshOutcome::Applied {
                generation: self.generation,
            }
        } else {
            RefreshOutcome::Stale {
                ticket,
                pending: self.pending.map(RefreshTicket),
            }
        }
    }

    /// Record a snapshot replaced outside of a fetch. Fetches started
    /// before it are now older than the data on screen, so they go stale.
    pub fn replaced(&mut self) -> u64 {
        self.pending = None;
        self.generation += 1;
        self.generation
    }

    /// Returns true while a fetch is allowed to complete
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_refresh() {
        let mut tracker = RefreshTracker::new();
        assert_eq!(tracker.generation(), 0);

        let ticket = tracker.begin();
        assert!(tracker.is_pending());
        assert_eq!(tracker.complete(ticket), RefreshOutcome::Applied { generation: 1 });
        assert!(!tracker.is_pending());
        assert_eq!(tracker.generation(), 1);
    }

    #[test]
    fn test_older_fetch_is_discarded() {
        let mut tracker = RefreshTracker::new();
        let first = tracker.begin();
        let second = tracker.begin();
        assert!(second > first);

        // The newer fetch resolves first
        assert!(tracker.complete(second).is_applied());
        // The slow one arrives afterwards and must not overwrite it
        assert_eq!(
            tracker.complete(first),
            RefreshOutcome::Stale {
                ticket: first,
                pending: None
            }
        );
        assert_eq!(tracker.generation(), 1);
    }

    #[test]
    fn test_older_fetch_resolving_first_is_discarded() {
        let mut tracker = RefreshTracker::new();
        let first = tracker.begin();
        let second = tracker.begin();

        assert_eq!(
            tracker.complete(first),
            RefreshOutcome::Stale {
                ticket: first,
                pending: Some(second)
            }
        );
        assert!(tracker.complete(second).is_applied());
    }

    #[test]
    fn test_ticket_completes_once() {
        let mut tracker = RefreshTracker::new();
        let ticket = tracker.begin();
        assert!(tracker.complete(ticket).is_applied());
        assert!(!tracker.complete(ticket).is_applied());
        assert_eq!(tracker.generation(), 1);
    }

    #[test]
    fn test_direct_replace_supersedes_in_flight_fetch() {
        let mut tracker = RefreshTracker::new();
        let ticket = tracker.begin();
        assert_eq!(tracker.replaced(), 1);
        // Nothing is left in flight, so the stale result names no newer fetch
        assert_eq!(
            tracker.complete(ticket),
            RefreshOutcome::Stale { ticket, pending: None }
        );
        assert_eq!(tracker.generation(), 1);
    }
}
