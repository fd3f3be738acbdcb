//! Request body of `POST /api/getTableData`.

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRequest {
    pub table_name: String,
    /// 1-based; missing or null means the first page.
    #[serde(default)]
    pub current_page: Option<i64>,
    /// May be zero or negative; clamped during paging.
    pub page_rows: i64,
    #[serde(default)]
    pub filter_statement: Option<String>,
    #[serde(default)]
    pub sort_field: Option<String>,
    #[serde(default)]
    pub sort_order: Option<String>,
}

impl TableRequest {
    pub fn page(&self) -> i64 {
        self.current_page.unwrap_or(1)
    }

    pub fn filter(&self) -> &str {
        self.filter_statement.as_deref().unwrap_or("")
    }

    /// Sort field, with an empty string treated as absent.
    pub fn sort_field(&self) -> Option<&str> {
        self.sort_field.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    pub fn sort_order(&self) -> Option<&str> {
        self.sort_order.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}
