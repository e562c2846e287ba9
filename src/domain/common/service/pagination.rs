//! Sort and page bookkeeping for ranked tables.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::common::service::ranking::{SortDirection, SortKey};

pub const ALLOWED_PAGE_SIZES: [usize; 3] = [10, 25, 50];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("page size {0} is not one of 10, 25, 50")]
pub struct InvalidPageSize(pub usize);

/// Rows per page, restricted to the sizes the tables offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct PageSize(usize);

impl PageSize {
    pub const DEFAULT: PageSize = PageSize(25);

    pub fn get(&self) -> usize {
        self.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<usize> for PageSize {
    type Error = InvalidPageSize;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        if ALLOWED_PAGE_SIZES.contains(&value) {
            Ok(Self(value))
        } else {
            Err(InvalidPageSize(value))
        }
    }
}

impl From<PageSize> for usize {
    fn from(value: PageSize) -> Self {
        value.0
    }
}

/// Which column a table is ordered by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub order_by: String,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new<S: Into<String>>(order_by: S, direction: SortDirection) -> Self {
        Self {
            order_by: order_by.into(),
            direction,
        }
    }

    /// Column header click: an active ascending column flips to descending,
    /// anything else becomes the active column in ascending order.
    pub fn request_sort(&mut self, property: &str) {
        let is_asc = self.order_by == property && self.direction == SortDirection::Asc;
        self.direction = if is_asc {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };
        self.order_by = property.to_string();
    }

    pub fn as_key(&self) -> SortKey {
        SortKey::new(self.order_by.clone(), self.direction)
    }
}

/// Page index and size for one table.
///
/// After a row-count change the page is always 0, so a shrinking dataset never
/// leaves the table pointing past its last row.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PagedTableState {
    page: usize,
    page_size: PageSize,
    row_count: Option<usize>,
}

impl PagedTableState {
    pub fn new(page_size: PageSize) -> Self {
        Self {
            page: 0,
            page_size,
            row_count: None,
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn set_page_size(&mut self, page_size: PageSize) {
        self.page_size = page_size;
        self.page = 0;
    }

    /// No clamping: callers only offer pages that exist.
    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    /// A new dataset arrived.
    pub fn row_count_changed(&mut self, row_count: usize) {
        self.row_count = Some(row_count);
        self.page = 0;
    }

    /// Fires [`Self::row_count_changed`] only when the count differs from the
    /// last one seen. Returns whether the page was reset.
    pub fn sync_row_count(&mut self, row_count: usize) -> bool {
        if self.row_count == Some(row_count) {
            return false;
        }
        self.row_count_changed(row_count);
        true
    }

    /// Offset of the first visible row.
    pub fn offset(&self) -> usize {
        self.page.saturating_mul(self.page_size.get())
    }

    /// `rows[page*size .. page*size + size]`, empty once past the end.
    pub fn visible_slice<'a, R>(&self, rows: &'a [R]) -> &'a [R] {
        let start = self.offset().min(rows.len());
        let end = start.saturating_add(self.page_size.get()).min(rows.len());
        &rows[start..end]
    }

    /// Number of pages needed for `row_count` rows.
    pub fn page_count(&self, row_count: usize) -> usize {
        row_count.div_ceil(self.page_size.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(n: usize) -> PageSize {
        PageSize::try_from(n).unwrap()
    }

    #[test]
    fn page_size_accepts_only_offered_values() {
        for n in ALLOWED_PAGE_SIZES {
            assert_eq!(PageSize::try_from(n).map(|s| s.get()), Ok(n));
        }
        assert_eq!(PageSize::try_from(0), Err(InvalidPageSize(0)));
        assert_eq!(PageSize::try_from(100), Err(InvalidPageSize(100)));
        assert_eq!(PageSize::default().get(), 25);
    }

    #[test]
    fn page_size_deserializes_with_validation() {
        let ok: PageSize = serde_json::from_str("50").unwrap();
        assert_eq!(ok.get(), 50);
        assert!(serde_json::from_str::<PageSize>("7").is_err());
    }

    #[test]
    fn visible_slice_walks_pages() {
        let rows: Vec<u32> = (0..23).collect();
        let mut state = PagedTableState::new(size(10));

        assert_eq!(state.visible_slice(&rows), &rows[0..10]);
        state.set_page(2);
        assert_eq!(state.visible_slice(&rows), &rows[20..23]);
        state.set_page(3);
        assert!(state.visible_slice(&rows).is_empty());
        assert_eq!(state.page_count(rows.len()), 3);
    }

    #[test]
    fn changing_page_size_resets_page() {
        let mut state = PagedTableState::new(size(10));
        state.set_page(4);
        state.set_page_size(size(50));
        assert_eq!(state.page(), 0);
        assert_eq!(state.page_size().get(), 50);
    }

    #[test]
    fn row_count_change_always_resets_page() {
        let mut state = PagedTableState::default();
        let events: [(&str, usize); 8] = [
            ("page", 3),
            ("rows", 120),
            ("page", 2),
            ("size", 10),
            ("page", 7),
            ("rows", 120),
            ("page", 1),
            ("rows", 5),
        ];

        for (event, value) in events {
            match event {
                "page" => state.set_page(value),
                "size" => state.set_page_size(size(value)),
                _ => {
                    state.row_count_changed(value);
                    assert_eq!(state.page(), 0);
                }
            }
        }
    }

    #[test]
    fn sync_row_count_resets_only_on_difference() {
        let mut state = PagedTableState::default();
        assert!(state.sync_row_count(40));
        state.set_page(1);
        assert!(!state.sync_row_count(40));
        assert_eq!(state.page(), 1);
        assert!(state.sync_row_count(12));
        assert_eq!(state.page(), 0);
    }

    #[test]
    fn request_sort_toggles_like_table_headers() {
        let mut sort = SortState::new("currentCost", SortDirection::Desc);

        sort.request_sort("currentCost");
        assert_eq!(sort, SortState::new("currentCost", SortDirection::Asc));

        sort.request_sort("currentCost");
        assert_eq!(sort, SortState::new("currentCost", SortDirection::Desc));

        sort.request_sort("name");
        assert_eq!(sort, SortState::new("name", SortDirection::Asc));
    }
}
