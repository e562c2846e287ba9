use serde::Serialize;

use crate::domain::common::service::pagination::PagedTableState;

#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub page_count: usize,
}

impl<T: Clone> PaginatedResponse<T> {
    /// Copies the visible slice of already-ranked rows.
    pub fn from_state(rows: &[T], state: &PagedTableState) -> Self {
        Self {
            items: state.visible_slice(rows).to_vec(),
            total: rows.len(),
            page: state.page(),
            page_size: state.page_size().get(),
            page_count: state.page_count(rows.len()),
        }
    }
}
