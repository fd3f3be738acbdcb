//! Values bound as statement parameters, and binding them onto sqlx queries.

use chrono::NaiveDate;
use sqlx::mysql::{MySql, MySqlArguments};
use sqlx::query::Query;

/// A value bound to a MySQL statement. Literals from requests only ever reach SQL as one of these.
#[derive(Clone, Debug, PartialEq)]
pub enum BindValue {
    Bool(bool),
    I64(i64),
    F64(f64),
    String(String),
    Date(NaiveDate),
}

pub fn bind_all<'q>(
    mut query: Query<'q, MySql, MySqlArguments>,
    params: &'q [BindValue],
) -> Query<'q, MySql, MySqlArguments> {
    for p in params {
        query = match p {
            BindValue::Bool(b) => query.bind(*b),
            BindValue::I64(n) => query.bind(*n),
            BindValue::F64(n) => query.bind(*n),
            BindValue::String(s) => query.bind(s.as_str()),
            BindValue::Date(d) => query.bind(*d),
        };
    }
    query
}
