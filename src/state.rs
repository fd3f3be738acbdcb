//! Shared application state for all routes.

use crate::config::TableRegistry;
use crate::store::TableStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    /// Pooled; each query acquires and releases its own connection.
    pub store: Arc<dyn TableStore>,
    pub registry: Arc<TableRegistry>,
    /// `None` leaves `pageRows` unbounded.
    pub max_page_rows: Option<i64>,
}
