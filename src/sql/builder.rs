//! Builds parameterized SELECT, COUNT and paged statements from a resolved table.

use crate::config::ResolvedTable;
use crate::filter::Predicate;
use crate::paging::Page;
use crate::sql::BindValue;

/// Quote identifier for MySQL (safe: only registry identifiers reach here).
pub fn quoted(s: &str) -> String {
    format!("`{}`", s.replace('`', "``"))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// Case-insensitive `asc` / `desc`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Some(SortOrder::Asc),
            "desc" => Some(SortOrder::Desc),
            _ => None,
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortSpec {
    pub column: String,
    pub order: SortOrder,
}

#[derive(Clone, Debug, PartialEq)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<BindValue>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }
}

fn select_column_list(table: &ResolvedTable) -> String {
    table
        .columns
        .iter()
        .map(|c| c.kind.select_expr(&c.name))
        .collect::<Vec<_>>()
        .join(", ")
}

/// SELECT every registry column of `table`, with predicates ANDed and an optional ORDER BY.
pub fn select_rows(table: &ResolvedTable, predicates: &[Predicate], sort: Option<&SortSpec>) -> QueryBuf {
    let mut q = QueryBuf::new();

    let mut where_parts = Vec::new();
    for p in predicates {
        q.params.push(p.value.clone());
        where_parts.push(format!("{} {} ?", quoted(&p.column), p.op.as_sql()));
    }
    let where_clause = if where_parts.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", where_parts.join(" AND "))
    };
    let order_clause = sort
        .map(|s| format!(" ORDER BY {} {}", quoted(&s.column), s.order.as_sql()))
        .unwrap_or_default();

    q.sql = format!(
        "SELECT {} FROM {}{}{}",
        select_column_list(table),
        quoted(&table.name),
        where_clause,
        order_clause
    );
    q
}

/// Wraps `inner` as a subquery and counts its rows. Same params as `inner`.
pub fn count_rows(inner: &QueryBuf) -> QueryBuf {
    QueryBuf {
        sql: format!("SELECT COUNT(1) AS cnt FROM ({}) AS qcnt", inner.sql),
        params: inner.params.clone(),
    }
}

/// Appends `LIMIT ? OFFSET ?` for `page`.
pub fn with_page(inner: &QueryBuf, page: &Page) -> QueryBuf {
    let mut q = inner.clone();
    q.sql.push_str(" LIMIT ? OFFSET ?");
    q.params.push(BindValue::I64(page.page_rows));
    q.params.push(BindValue::I64(page.offset));
    q
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::from_json_str;
    use crate::filter::parse_filter;
    use chrono::NaiveDate;

    fn trips() -> ResolvedTable {
        from_json_str(
            r#"{"tables":[{"name":"trips","columns":[
                {"name":"date","type":"date"},
                {"name":"status","type":"text"},
                {"name":"distance","type":{"name":"decimal","params":[1]}}
            ]}]}"#,
        )
        .unwrap()
        .table("trips")
        .unwrap()
        .clone()
    }

    const COLS: &str =
        "CAST(`date` AS DATE) AS `date`, CAST(`status` AS CHAR) AS `status`, CAST(`distance` AS DOUBLE) AS `distance`";

    #[test]
    fn plain_select() {
        let q = select_rows(&trips(), &[], None);
        assert_eq!(q.sql, format!("SELECT {} FROM `trips`", COLS));
        assert!(q.params.is_empty());
    }

    #[test]
    fn text_filter_is_bound() {
        let t = trips();
        let preds = parse_filter("status = 'active'", &t).unwrap();
        let q = select_rows(&t, &preds, None);
        assert_eq!(q.sql, format!("SELECT {} FROM `trips` WHERE `status` = ?", COLS));
        assert_eq!(q.params, vec![BindValue::String("active".into())]);
    }

    #[test]
    fn date_filter_and_sort() {
        let t = trips();
        let preds = parse_filter("date = '31.12.2023'", &t).unwrap();
        let sort = t.sort_by("distance", SortOrder::Desc).unwrap();
        let q = select_rows(&t, &preds, Some(&sort));
        assert_eq!(
            q.sql,
            format!("SELECT {} FROM `trips` WHERE `date` = ? ORDER BY `distance` DESC", COLS)
        );
        assert_eq!(
            q.params,
            vec![BindValue::Date(NaiveDate::from_ymd_opt(2023, 12, 31).unwrap())]
        );
    }

    #[test]
    fn count_wraps_and_page_appends() {
        let t = trips();
        let preds = parse_filter("status = 'active'", &t).unwrap();
        let q = select_rows(&t, &preds, None);

        let count = count_rows(&q);
        assert_eq!(count.sql, format!("SELECT COUNT(1) AS cnt FROM ({}) AS qcnt", q.sql));
        assert_eq!(count.params, q.params);

        let page = Page::compute(25, 5, 10);
        let paged = with_page(&q, &page);
        assert_eq!(paged.sql, format!("{} LIMIT ? OFFSET ?", q.sql));
        assert_eq!(
            paged.params,
            vec![BindValue::String("active".into()), BindValue::I64(10), BindValue::I64(20)]
        );
    }

    #[test]
    fn identical_input_builds_identical_sql() {
        let t = trips();
        let preds = parse_filter("status = 'a' AND distance > 1", &t).unwrap();
        assert_eq!(select_rows(&t, &preds, None), select_rows(&t, &preds, None));
    }

    #[test]
    fn sort_order_parse() {
        assert_eq!(SortOrder::parse("DESC"), Some(SortOrder::Desc));
        assert_eq!(SortOrder::parse("asc"), Some(SortOrder::Asc));
        assert_eq!(SortOrder::parse("asc; DROP TABLE trips"), None);
    }

    #[test]
    fn quoting_escapes_backticks() {
        assert_eq!(quoted("a`b"), "`a``b`");
    }
}
