//! Serves one page of a table: filter, sort, count, page, render.

use crate::config::ResolvedTable;
use crate::error::AppError;
use crate::filter::parse_filter;
use crate::paging::Page;
use crate::request::TableRequest;
use crate::response::TableData;
use crate::service::RequestValidator;
use crate::sql::{count_rows, select_rows, with_page};
use crate::store::TableStore;

pub struct TableService;

impl TableService {
    /// The count query completes before the page query is issued; both see the same WHERE/ORDER BY.
    pub async fn fetch(
        store: &dyn TableStore,
        table: &ResolvedTable,
        request: &TableRequest,
        max_page_rows: Option<i64>,
    ) -> Result<TableData, AppError> {
        let predicates = parse_filter(request.filter(), table)?;
        RequestValidator::page_rows(request, max_page_rows)?;
        let sort = RequestValidator::sort(request, table)?;
        let query = select_rows(table, &predicates, sort.as_ref());

        let total_rows = store.count(&count_rows(&query)).await?;
        let page = Page::compute(total_rows, request.page(), request.page_rows);

        let rows = if page.page_rows == 0 || total_rows == 0 {
            Vec::new()
        } else {
            store.fetch(&with_page(&query, &page), table).await?
        };
        tracing::debug!(
            table = %table.name,
            total_rows,
            page = page.page,
            total_pages = page.total_pages,
            returned = rows.len(),
            "table page served"
        );

        Ok(TableData {
            rows,
            table_fields: table.field_names(),
            total_pages: page.total_pages,
            current_page: page.page,
            total_rows,
        })
    }
}
