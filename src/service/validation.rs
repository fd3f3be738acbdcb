//! Request validation against the table registry.

use crate::config::ResolvedTable;
use crate::error::AppError;
use crate::request::TableRequest;
use crate::sql::{SortOrder, SortSpec};

pub struct RequestValidator;

impl RequestValidator {
    /// Resolve the sort of a request. Sort field must be a column of `table`; order must be asc/desc.
    /// Without a sort field the table's default sort applies.
    pub fn sort(request: &TableRequest, table: &ResolvedTable) -> Result<Option<SortSpec>, AppError> {
        let Some(field) = request.sort_field() else {
            return Ok(table.default_sort.clone());
        };
        let order = match request.sort_order() {
            Some(o) => SortOrder::parse(o)
                .ok_or_else(|| AppError::Validation(format!("sortOrder must be asc or desc, got '{}'", o)))?,
            None => SortOrder::Asc,
        };
        table
            .sort_by(field, order)
            .map(Some)
            .ok_or_else(|| AppError::Validation(format!("sortField '{}' is not a column of {}", field, table.name)))
    }

    /// Reject `pageRows` above `max`. The page size is never shrunk, since totalPages and
    /// offset are derived from the size the client sent.
    pub fn page_rows(request: &TableRequest, max: Option<i64>) -> Result<(), AppError> {
        match max {
            Some(max) if request.page_rows > max => Err(AppError::Validation(format!(
                "pageRows must be at most {}, got {}",
                max, request.page_rows
            ))),
            _ => Ok(()),
        }
    }
}
