//! Loading/error/items state for a list backed by a backend fetch.

use crate::api::Page;
use crate::errors::ClientError;
use crate::models::Pagination;

#[derive(Debug, Clone, PartialEq)]
pub struct ListState<T> {
    pub items: Vec<T>,
    pub pagination: Option<Pagination>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            pagination: None,
            loading: false,
            error: None,
        }
    }
}

impl<T> ListState<T> {
    pub fn start_loading(&mut self) {
        self.loading = true;
    }

    /// Fold a fetch result into the state.
    ///
    /// A cancelled fetch leaves everything untouched: the request that
    /// superseded it will report. A failure clears the list rather than
    /// leaving stale rows next to the error message.
    pub fn apply(&mut self, result: Result<Page<T>, ClientError>) {
        match result {
            Ok(page) => {
                self.items = page.items;
                self.pagination = page.pagination;
                self.error = None;
                self.loading = false;
            }
            Err(err) if err.is_cancelled() => {}
            Err(err) => {
                self.items.clear();
                self.pagination = None;
                self.error = Some(err.user_message());
                self.loading = false;
            }
        }
    }
}
