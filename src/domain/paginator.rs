//! Lazily paginated item source backing a [`crate::domain::HalCollection`].

use std::fmt;
use std::sync::Arc;

use crate::domain::collection::CollectionItem;

/// Data source a [`Paginator`] slices pages from.
///
/// # Implementations
///
/// - [`VecAdapter`] - in-memory list
/// - [`crate::infrastructure::WidgetStore`] - demo catalog, fetched one page at a time
#[cfg_attr(test, mockall::automock)]
pub trait PaginatorAdapter: Send + Sync {
    /// Total number of items across all pages.
    fn count(&self) -> usize;

    /// Items in `offset..offset + limit`, clamped to the available range.
    fn slice(&self, offset: usize, limit: usize) -> Vec<CollectionItem>;
}

/// In-memory [`PaginatorAdapter`].
#[derive(Debug, Clone, Default)]
pub struct VecAdapter {
    items: Vec<CollectionItem>,
}

impl VecAdapter {
    pub fn new(items: Vec<CollectionItem>) -> Self {
        Self { items }
    }
}

impl PaginatorAdapter for VecAdapter {
    fn count(&self) -> usize {
        self.items.len()
    }

    fn slice(&self, offset: usize, limit: usize) -> Vec<CollectionItem> {
        self.items.iter().skip(offset).take(limit).cloned().collect()
    }
}

/// Page geometry derived from a single read of the source size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub total_items: usize,
    pub page_size: usize,
}

impl PageWindow {
    pub fn new(total_items: usize, page_size: usize) -> Self {
        Self {
            total_items,
            page_size,
        }
    }

    /// Number of pages; an empty source still has one (empty) page.
    pub fn page_count(&self) -> usize {
        if self.page_size == 0 || self.total_items == 0 {
            return 1;
        }
        self.total_items.div_ceil(self.page_size)
    }

    /// Whether `page` (1-based) lies within `[1, page_count]`.
    pub fn contains(&self, page: usize) -> bool {
        page >= 1 && page <= self.page_count()
    }

    /// `(offset, limit)` of `page` (1-based) in the source.
    pub fn bounds(&self, page: usize) -> (usize, usize) {
        if self.page_size == 0 {
            return (0, self.total_items);
        }
        let offset = page.saturating_sub(1).saturating_mul(self.page_size);
        (offset, self.page_size)
    }
}

/// Page arithmetic over a [`PaginatorAdapter`].
///
/// A page size of `0` means "everything on one page". Each helper below
/// counts the source once; callers that need several answers for the same
/// request take a [`PageWindow`] and work from it.
#[derive(Clone)]
pub struct Paginator {
    adapter: Arc<dyn PaginatorAdapter>,
}

impl Paginator {
    pub fn new(adapter: Arc<dyn PaginatorAdapter>) -> Self {
        Self { adapter }
    }

    pub fn from_items(items: Vec<CollectionItem>) -> Self {
        Self::new(Arc::new(VecAdapter::new(items)))
    }

    pub fn total_items(&self) -> usize {
        self.adapter.count()
    }

    /// Reads the source size once and fixes the page geometry.
    pub fn window(&self, page_size: usize) -> PageWindow {
        PageWindow::new(self.total_items(), page_size)
    }

    pub fn page_count(&self, page_size: usize) -> usize {
        self.window(page_size).page_count()
    }

    pub fn contains_page(&self, page: usize, page_size: usize) -> bool {
        self.window(page_size).contains(page)
    }

    /// Items on `page` (1-based) of a window taken from this paginator.
    pub fn slice(&self, window: &PageWindow, page: usize) -> Vec<CollectionItem> {
        let (offset, limit) = window.bounds(page);
        self.adapter.slice(offset, limit)
    }

    /// Items on `page` (1-based).
    pub fn page_items(&self, page: usize, page_size: usize) -> Vec<CollectionItem> {
        if page_size == 0 {
            return self.slice(&self.window(0), page);
        }
        self.slice(&PageWindow::new(0, page_size), page)
    }
}

impl fmt::Debug for Paginator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Paginator")
            .field("total_items", &self.total_items())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw_items(n: usize) -> Vec<CollectionItem> {
        (1..=n)
            .map(|i| CollectionItem::Raw(json!({ "id": i })))
            .collect()
    }

    #[test]
    fn test_page_count() {
        let paginator = Paginator::from_items(raw_items(25));
        assert_eq!(paginator.total_items(), 25);
        assert_eq!(paginator.page_count(10), 3);
        assert_eq!(paginator.page_count(25), 1);
        assert_eq!(paginator.page_count(5), 5);
    }

    #[test]
    fn test_empty_source_has_one_page() {
        let paginator = Paginator::from_items(Vec::new());
        assert_eq!(paginator.page_count(10), 1);
        assert!(paginator.contains_page(1, 10));
        assert!(!paginator.contains_page(2, 10));
    }

    #[test]
    fn test_zero_page_size_is_single_page() {
        let paginator = Paginator::from_items(raw_items(7));
        assert_eq!(paginator.page_count(0), 1);
        assert_eq!(paginator.page_items(1, 0).len(), 7);
    }

    #[test]
    fn test_contains_page() {
        let paginator = Paginator::from_items(raw_items(25));
        assert!(!paginator.contains_page(0, 10));
        assert!(paginator.contains_page(1, 10));
        assert!(paginator.contains_page(3, 10));
        assert!(!paginator.contains_page(4, 10));
    }

    #[test]
    fn test_last_page_is_partial() {
        let paginator = Paginator::from_items(raw_items(25));
        let items = paginator.page_items(3, 10);
        assert_eq!(items.len(), 5);
        assert_eq!(items[0], CollectionItem::Raw(json!({ "id": 21 })));
    }

    #[test]
    fn test_adapter_is_asked_for_requested_window() {
        let mut adapter = MockPaginatorAdapter::new();
        adapter
            .expect_slice()
            .withf(|offset, limit| *offset == 20 && *limit == 10)
            .times(1)
            .returning(|_, _| Vec::new());

        let paginator = Paginator::new(Arc::new(adapter));
        assert!(paginator.page_items(3, 10).is_empty());
    }

    #[test]
    fn test_window_counts_source_once() {
        let mut adapter = MockPaginatorAdapter::new();
        adapter.expect_count().times(1).return_const(25usize);
        adapter
            .expect_slice()
            .withf(|offset, limit| *offset == 10 && *limit == 10)
            .times(1)
            .returning(|_, _| Vec::new());

        let paginator = Paginator::new(Arc::new(adapter));
        let window = paginator.window(10);
        assert_eq!(window.page_count(), 3);
        assert!(window.contains(2));
        assert!(!window.contains(4));
        assert!(paginator.slice(&window, 2).is_empty());
    }

    #[test]
    fn test_window_bounds() {
        assert_eq!(PageWindow::new(25, 10).bounds(3), (20, 10));
        assert_eq!(PageWindow::new(7, 0).bounds(1), (0, 7));
        assert_eq!(PageWindow::new(0, 10).page_count(), 1);
    }
}
