//! Raw table registry types matching the JSON file (`TABLES_CONFIG`).

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnTypeConfig {
    Simple(String),
    Parameterized { name: String, params: Option<Vec<u32>> },
}

impl ColumnTypeConfig {
    pub fn name(&self) -> &str {
        match self {
            ColumnTypeConfig::Simple(s) => s,
            ColumnTypeConfig::Parameterized { name, .. } => name,
        }
    }

    pub fn params(&self) -> &[u32] {
        match self {
            ColumnTypeConfig::Simple(_) => &[],
            ColumnTypeConfig::Parameterized { params, .. } => params.as_deref().unwrap_or(&[]),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ColumnConfig {
    pub name: String,
    #[serde(rename = "type")]
    pub type_: ColumnTypeConfig,
    /// Display label for the client; falls back to the column name.
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default = "default_true")]
    pub nullable: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DefaultSortConfig {
    pub field: String,
    #[serde(default)]
    pub order: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TableConfig {
    pub name: String,
    #[serde(default)]
    pub comment: Option<String>,
    pub columns: Vec<ColumnConfig>,
    #[serde(default)]
    pub default_sort: Option<DefaultSortConfig>,
}

/// Every table the API may serve. Anything not listed here is rejected.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TablesConfig {
    pub tables: Vec<TableConfig>,
}
