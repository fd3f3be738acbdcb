//! Routers: common (health, readiness, version) and table data.

mod common;
mod table;
pub use common::common_routes_with_ready;
pub use table::table_routes;

use crate::state::AppState;
use axum::Router;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

/// Full application router: common routes at the root, table routes under `/api`.
pub fn app(state: AppState, body_limit_bytes: usize) -> Router {
    Router::new()
        .merge(common_routes_with_ready(state.clone()))
        .nest("/api", table_routes(state))
        .layer(RequestBodyLimitLayer::new(body_limit_bytes))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
