//! Sort and page parameters carried by every table request

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::common::service::pagination::{PageSize, PagedTableState, SortState};
use crate::domain::common::service::ranking::{SortDirection, SortKey};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct TableQuery {
    /// Column id, or a dotted path into the row.
    #[validate(length(min = 1, max = 128))]
    pub order_by: Option<String>,

    /// `"asc"` or `"desc"`.
    pub direction: Option<SortDirection>,

    /// Tie-breakers applied after the main sort, in priority order.
    #[validate(length(max = 8))]
    pub then_by: Vec<SortKey>,

    /// Column header clicked on top of the sort above.
    #[validate(length(min = 1, max = 128))]
    pub toggle: Option<String>,

    pub page: Option<usize>,

    /// One of 10, 25, 50.
    pub page_size: Option<PageSize>,

    /// Row count the client was paging through. A different count now resets
    /// the requested page to 0.
    pub seen_rows: Option<usize>,
}

impl TableQuery {
    pub fn sort_state(&self, default: SortState) -> SortState {
        let mut state = SortState {
            order_by: self.order_by.clone().unwrap_or(default.order_by),
            direction: self.direction.unwrap_or(default.direction),
        };
        if let Some(column) = &self.toggle {
            state.request_sort(column);
        }
        state
    }

    /// Main sort key followed by the tie-breakers.
    pub fn sort_keys(&self, sort: &SortState) -> Vec<SortKey> {
        std::iter::once(sort.as_key())
            .chain(self.then_by.iter().cloned())
            .collect()
    }

    /// Page state for a dataset of `row_count` rows, moved to the requested
    /// page unless the dataset changed since `seen_rows`.
    pub fn page_state(&self, default_size: PageSize, row_count: usize) -> PagedTableState {
        let mut state = PagedTableState::new(self.page_size.unwrap_or(default_size));
        state.row_count_changed(self.seen_rows.unwrap_or(row_count));
        if let Some(page) = self.page {
            state.set_page(page);
        }
        state.sync_row_count(row_count);
        state
    }
}
