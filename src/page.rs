/// talentgrid Pagination Controller
///
/// Slices an ordered collection into fixed-size windows. The page index is
/// clamped against the current result size: when a new query shrinks the
/// result below the displayed page, the last real page is shown instead of
/// an empty one.

use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

/// Active page and page size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageState {
    page_index: usize,
    page_size: NonZeroUsize,
}

impl PageState {
    /// First page with the given size
    pub fn new(page_size: NonZeroUsize) -> Self {
        PageState {
            page_index: 0,
            page_size,
        }
    }

    pub fn at(page_index: usize, page_size: NonZeroUsize) -> Self {
        PageState {
            page_index,
            page_size,
        }
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }

    pub fn with_page(self, page_index: usize) -> Self {
        PageState { page_index, ..self }
    }

    /// A new page size invalidates the old position, so the index resets to 0
    pub fn with_page_size(self, page_size: NonZeroUsize) -> Self {
        PageState::new(page_size)
    }

    /// The same state with its index clamped to `[0, page_count - 1]`
    pub fn clamped(self, total_count: usize) -> Self {
        let last = page_count(total_count, self.page_size) - 1;
        self.with_page(self.page_index.min(last))
    }
}

/// Number of pages for `total_count` items. Never less than 1, so page
/// controls stay well-defined for an empty result.
pub fn page_count(total_count: usize, page_size: NonZeroUsize) -> usize {
    total_count.div_ceil(page_size.get()).max(1)
}

/// One page of an ordered collection
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageWindow<T> {
    pub windowed: Vec<T>,
    pub total_count: usize,
    pub page_count: usize,
    /// Clamped page index actually shown
    pub current_page: usize,
    pub page_size: NonZeroUsize,
}

impl<T> PageWindow<T> {
    pub fn has_previous(&self) -> bool {
        self.current_page > 0
    }

    pub fn has_next(&self) -> bool {
        self.current_page + 1 < self.page_count
    }

    /// 1-based inclusive range of the items shown ("showing 11-20 of 53").
    /// `None` when the window is empty.
    pub fn item_range(&self) -> Option<(usize, usize)> {
        if self.windowed.is_empty() {
            return None;
        }
        let first = self.current_page * self.page_size.get() + 1;
        Some((first, first + self.windowed.len() - 1))
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageWindow<U> {
        PageWindow {
            windowed: self.windowed.into_iter().map(f).collect(),
            total_count: self.total_count,
            page_count: self.page_count,
            current_page: self.current_page,
            page_size: self.page_size,
        }
    }
}

/// Cut the window for `page` out of `ordered`.
///
/// # Examples
///
/// ```
/// use talentgrid::{paginate, PageState};
/// use std::num::NonZeroUsize;
///
/// let items = ["Bob", "Cal", "Amy"];
/// let size = NonZeroUsize::new(2).unwrap();
///
/// let second = paginate(&items, PageState::at(1, size));
/// assert_eq!(second.windowed, vec!["Amy"]);
/// assert_eq!(second.page_count, 2);
///
/// // Out-of-range pages are clamped to the last page
/// let clamped = paginate(&items, PageState::at(9, size));
/// assert_eq!(clamped.current_page, 1);
/// assert_eq!(clamped.windowed, vec!["Amy"]);
/// ```
pub fn paginate<T: Clone>(ordered: &[T], page: PageState) -> PageWindow<T> {
    let total_count = ordered.len();
    let page = page.clamped(total_count);
    let size = page.page_size.get();

    let start = (page.page_index * size).min(total_count);
    let end = start.saturating_add(size).min(total_count);

    PageWindow {
        windowed: ordered[start..end].to_vec(),
        total_count,
        page_count: page_count(total_count, page.page_size),
        current_page: page.page_index,
        page_size: page.page_size,
    }
}
