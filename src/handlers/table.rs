//! Table handlers: page of table data, list of served tables.

use crate::config::ResolvedTable;
use crate::error::AppError;
use crate::request::TableRequest;
use crate::response::success_many;
use crate::service::TableService;
use crate::state::AppState;
use axum::{extract::State, Json};
use serde::Serialize;

#[derive(Serialize)]
pub struct ColumnSummary {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub label: String,
    pub nullable: bool,
}

#[derive(Serialize)]
pub struct TableSummary {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub columns: Vec<ColumnSummary>,
}

impl From<&ResolvedTable> for TableSummary {
    fn from(t: &ResolvedTable) -> Self {
        TableSummary {
            name: t.name.clone(),
            comment: t.comment.clone(),
            columns: t
                .columns
                .iter()
                .map(|c| ColumnSummary {
                    name: c.name.clone(),
                    kind: c.kind.name(),
                    label: c.label.clone(),
                    nullable: c.nullable,
                })
                .collect(),
        }
    }
}

pub async fn get_table_data(
    State(state): State<AppState>,
    Json(request): Json<TableRequest>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let table = state
        .registry
        .table(&request.table_name)
        .ok_or_else(|| AppError::NotFound(format!("table {}", request.table_name)))?;
    let data = TableService::fetch(state.store.as_ref(), table, &request, state.max_page_rows).await?;
    Ok((axum::http::StatusCode::OK, Json(data)))
}

pub async fn list_tables(State(state): State<AppState>) -> impl axum::response::IntoResponse {
    let tables: Vec<TableSummary> = state.registry.tables().iter().map(TableSummary::from).collect();
    success_many(tables)
}
