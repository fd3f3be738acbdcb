//! Query execution seam. `MySqlStore` runs statements on a pool and renders rows by column kind.

use crate::column::{render_cell, Cell};
use crate::config::{ColumnInfo, ColumnKind, ResolvedTable, Settings};
use crate::error::AppError;
use crate::sql::{bind_all, QueryBuf};
use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::mysql::{MySqlPool, MySqlPoolOptions, MySqlRow};
use sqlx::Row;
use std::time::Duration;

#[async_trait]
pub trait TableStore: Send + Sync {
    /// Runs a `count_rows` statement and returns its `cnt`.
    async fn count(&self, q: &QueryBuf) -> Result<u64, AppError>;

    /// Runs a `select_rows` statement; each row is rendered as column name -> client value.
    async fn fetch(&self, q: &QueryBuf, table: &ResolvedTable) -> Result<Vec<Map<String, Value>>, AppError>;

    async fn ping(&self) -> Result<(), AppError>;
}

#[derive(Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    pub async fn connect(settings: &Settings) -> Result<Self, AppError> {
        let pool = MySqlPoolOptions::new()
            .max_connections(settings.db_max_connections)
            .acquire_timeout(Duration::from_secs(10))
            .connect_with(settings.connect_options()?)
            .await?;
        Ok(MySqlStore { pool })
    }
}

#[async_trait]
impl TableStore for MySqlStore {
    async fn count(&self, q: &QueryBuf) -> Result<u64, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let row = bind_all(sqlx::query(&q.sql), &q.params)
            .fetch_one(&self.pool)
            .await?;
        let cnt: i64 = row.try_get("cnt")?;
        Ok(cnt.max(0) as u64)
    }

    async fn fetch(&self, q: &QueryBuf, table: &ResolvedTable) -> Result<Vec<Map<String, Value>>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let rows = bind_all(sqlx::query(&q.sql), &q.params)
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(|r| row_to_json(r, table)).collect()
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}

fn row_to_json(row: &MySqlRow, table: &ResolvedTable) -> Result<Map<String, Value>, AppError> {
    let mut map = Map::new();
    for col in &table.columns {
        map.insert(col.name.clone(), render_cell(col.kind, decode_cell(row, col)?));
    }
    Ok(map)
}

/// Decodes one cell into the Rust type its SELECT cast produces.
fn decode_cell(row: &MySqlRow, col: &ColumnInfo) -> Result<Cell, AppError> {
    let name = col.name.as_str();
    let decoded = match col.kind {
        ColumnKind::Text => row.try_get::<Option<String>, _>(name).map(|v| v.map(Cell::Text)),
        ColumnKind::Integer | ColumnKind::Boolean => row.try_get::<Option<i64>, _>(name).map(|v| v.map(Cell::Int)),
        ColumnKind::Float | ColumnKind::Decimal { .. } => {
            row.try_get::<Option<f64>, _>(name).map(|v| v.map(Cell::Float))
        }
        ColumnKind::Date => row
            .try_get::<Option<chrono::NaiveDate>, _>(name)
            .map(|v| v.map(Cell::Date)),
    };
    decoded
        .map(|v| v.unwrap_or(Cell::Null))
        .map_err(|e| AppError::Decode {
            column: col.name.clone(),
            message: e.to_string(),
        })
}
