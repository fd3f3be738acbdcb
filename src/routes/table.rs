//! Table data routes.

use crate::handlers::{get_table_data, list_tables};
use crate::state::AppState;
use axum::{routing::get, routing::post, Router};

pub fn table_routes(state: AppState) -> Router {
    Router::new()
        .route("/getTableData", post(get_table_data))
        .route("/tables", get(list_tables))
        .with_state(state)
}
