//! Response bodies: the table page and the standard list envelope.

use axum::{http::StatusCode, Json};
use serde::Serialize;
use serde_json::{Map, Value};

/// Body of a successful `POST /api/getTableData`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableData {
    pub rows: Vec<Map<String, Value>>,
    /// Column names of the executed SELECT, in result order.
    pub table_fields: Vec<String>,
    pub total_pages: i64,
    /// Page actually served after clamping.
    pub current_page: i64,
    pub total_rows: u64,
}

#[derive(Serialize)]
pub struct SuccessMany<T> {
    pub data: Vec<T>,
    pub meta: MetaCount,
}

#[derive(Serialize)]
pub struct MetaCount {
    pub count: u64,
}

pub fn success_many<T: Serialize>(data: Vec<T>) -> (StatusCode, Json<SuccessMany<T>>) {
    let count = data.len() as u64;
    (
        StatusCode::OK,
        Json(SuccessMany {
            data,
            meta: MetaCount { count },
        }),
    )
}
