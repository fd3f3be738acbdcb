//! Load the table registry from a JSON file or string and resolve it for runtime use.

use crate::config::resolved::{ColumnInfo, ColumnKind, ResolvedTable, TableRegistry};
use crate::config::types::*;
use crate::config::validate;
use crate::error::ConfigError;
use crate::sql::{SortOrder, SortSpec};
use std::collections::HashMap;
use std::path::Path;

/// Scale used for `decimal` columns declared without params.
const DEFAULT_DECIMAL_SCALE: u32 = 2;

/// Build resolved registry from config (validates first).
pub fn resolve(config: &TablesConfig) -> Result<TableRegistry, ConfigError> {
    validate(config)?;

    let mut tables = Vec::with_capacity(config.tables.len());
    let mut table_by_name = HashMap::new();

    for t in &config.tables {
        let columns = t
            .columns
            .iter()
            .map(|c| -> Result<ColumnInfo, ConfigError> {
                Ok(ColumnInfo {
                    name: c.name.clone(),
                    kind: column_kind(&t.name, c)?,
                    nullable: c.nullable,
                    label: c.label.clone().unwrap_or_else(|| c.name.clone()),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let default_sort = match &t.default_sort {
            Some(s) => {
                let order = match s.order.as_deref() {
                    Some(o) => SortOrder::parse(o).ok_or_else(|| {
                        ConfigError::Validation(format!("invalid default sort order '{}' for {}", o, t.name))
                    })?,
                    None => SortOrder::Asc,
                };
                let column = columns
                    .iter()
                    .find(|c| c.name.eq_ignore_ascii_case(&s.field))
                    .map(|c| c.name.clone())
                    .unwrap_or_else(|| s.field.clone());
                Some(SortSpec { column, order })
            }
            None => None,
        };

        table_by_name.insert(t.name.clone(), tables.len());
        tables.push(ResolvedTable {
            name: t.name.clone(),
            comment: t.comment.clone(),
            columns,
            default_sort,
        });
    }

    Ok(TableRegistry { tables, table_by_name })
}

fn column_kind(table: &str, c: &ColumnConfig) -> Result<ColumnKind, ConfigError> {
    Ok(match c.type_.name().to_lowercase().as_str() {
        "text" => ColumnKind::Text,
        "integer" => ColumnKind::Integer,
        "float" => ColumnKind::Float,
        "decimal" => ColumnKind::Decimal {
            scale: c.type_.params().first().copied().unwrap_or(DEFAULT_DECIMAL_SCALE),
        },
        "date" => ColumnKind::Date,
        "boolean" => ColumnKind::Boolean,
        other => {
            return Err(ConfigError::UnknownColumnType {
                column: format!("{}.{}", table, c.name),
                type_name: other.to_string(),
            })
        }
    })
}

pub fn from_json_str(s: &str) -> Result<TableRegistry, ConfigError> {
    let config: TablesConfig = serde_json::from_str(s).map_err(|e| ConfigError::Load(e.to_string()))?;
    resolve(&config)
}

pub async fn load_from_path(path: impl AsRef<Path>) -> Result<TableRegistry, ConfigError> {
    let path = path.as_ref();
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ConfigError::Load(format!("{}: {}", path.display(), e)))?;
    let registry = from_json_str(&raw)?;
    tracing::info!(path = %path.display(), tables = registry.tables.len(), "table registry loaded");
    Ok(registry)
}
