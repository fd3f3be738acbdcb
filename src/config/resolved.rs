//! Resolved table registry: config validated and flattened for runtime use.

use crate::sql::{SortOrder, SortSpec};
use std::collections::HashMap;

/// Declared type of a column. Drives how filter literals are parsed and how cells are rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Integer,
    Float,
    /// Fixed-point; rendered as a string with `scale` decimals.
    Decimal { scale: u32 },
    Date,
    Boolean,
}

impl ColumnKind {
    pub fn name(&self) -> &'static str {
        match self {
            ColumnKind::Text => "text",
            ColumnKind::Integer => "integer",
            ColumnKind::Float => "float",
            ColumnKind::Decimal { .. } => "decimal",
            ColumnKind::Date => "date",
            ColumnKind::Boolean => "boolean",
        }
    }
}

#[derive(Clone, Debug)]
pub struct ColumnInfo {
    pub name: String,
    pub kind: ColumnKind,
    pub nullable: bool,
    pub label: String,
}

#[derive(Clone, Debug)]
pub struct ResolvedTable {
    pub name: String,
    pub comment: Option<String>,
    pub columns: Vec<ColumnInfo>,
    pub default_sort: Option<SortSpec>,
}

impl ResolvedTable {
    /// Case-insensitive, as MySQL column names are. Callers use the returned registry spelling.
    pub fn column(&self, name: &str) -> Option<&ColumnInfo> {
        self.columns.iter().find(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// Column names in SELECT order.
    pub fn field_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    pub fn sort_by(&self, field: &str, order: SortOrder) -> Option<SortSpec> {
        self.column(field).map(|c| SortSpec {
            column: c.name.clone(),
            order,
        })
    }
}

#[derive(Clone, Debug, Default)]
pub struct TableRegistry {
    pub tables: Vec<ResolvedTable>,
    pub table_by_name: HashMap<String, usize>,
}

impl TableRegistry {
    pub fn table(&self, name: &str) -> Option<&ResolvedTable> {
        self.table_by_name.get(name).map(|&i| &self.tables[i])
    }

    pub fn tables(&self) -> &[ResolvedTable] {
        &self.tables
    }
}
