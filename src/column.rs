//! Per-column-kind strategies: how filter literals are parsed into bound values,
//! how a column is selected, and how cells are rendered for the client.

use crate::config::ColumnKind;
use crate::error::FilterError;
use crate::sql::{quoted, BindValue};
use chrono::NaiveDate;
use serde_json::Value;

/// Date format the client sends in filters and receives in rows.
pub const CLIENT_DATE_FORMAT: &str = "%d.%m.%Y";

impl ColumnKind {
    /// Parse a filter literal (quotes already stripped) into a value to bind.
    pub fn parse_literal(&self, column: &str, literal: &str) -> Result<BindValue, FilterError> {
        let invalid = || FilterError::InvalidLiteral {
            column: column.to_string(),
            kind: self.name(),
            literal: literal.to_string(),
        };
        Ok(match self {
            ColumnKind::Text => BindValue::String(literal.to_string()),
            ColumnKind::Integer => BindValue::I64(literal.trim().parse().map_err(|_| invalid())?),
            ColumnKind::Float | ColumnKind::Decimal { .. } => {
                let n: f64 = literal.trim().parse().map_err(|_| invalid())?;
                if !n.is_finite() {
                    return Err(invalid());
                }
                BindValue::F64(n)
            }
            ColumnKind::Date => BindValue::Date(parse_date(literal).ok_or_else(invalid)?),
            ColumnKind::Boolean => match literal.trim().to_ascii_lowercase().as_str() {
                "true" | "1" => BindValue::Bool(true),
                "false" | "0" => BindValue::Bool(false),
                _ => return Err(invalid()),
            },
        })
    }

    /// SELECT-list expression, cast so every kind decodes to one known Rust type.
    pub fn select_expr(&self, column: &str) -> String {
        let q = quoted(column);
        let cast = match self {
            ColumnKind::Text => "CHAR",
            ColumnKind::Integer | ColumnKind::Boolean => "SIGNED",
            ColumnKind::Float | ColumnKind::Decimal { .. } => "DOUBLE",
            ColumnKind::Date => "DATE",
        };
        format!("CAST({} AS {}) AS {}", q, cast, q)
    }
}

/// `DD.MM.YYYY` -> `YYYY-MM-DD`: split on `.`, reverse the segments, join with `-`.
pub fn client_date_to_iso(s: &str) -> String {
    s.split('.').rev().collect::<Vec<_>>().join("-")
}

/// Accepts the client form `DD.MM.YYYY` or ISO `YYYY-MM-DD`; must be a real calendar date.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    let iso = if s.contains('.') {
        client_date_to_iso(s)
    } else {
        s.to_string()
    };
    NaiveDate::parse_from_str(&iso, "%Y-%m-%d").ok()
}

pub fn format_date(d: NaiveDate) -> String {
    d.format(CLIENT_DATE_FORMAT).to_string()
}

/// Fixed-point rendering with `scale` digits after the point. Ties round away from zero.
pub fn format_fixed(v: f64, scale: u32) -> String {
    let factor = 10f64.powi(scale as i32);
    let rounded = (v * factor).round() / factor;
    let v = if rounded.is_finite() { rounded } else { v };
    format!("{:.*}", scale as usize, v)
}

/// A cell as decoded from the row, before rendering.
#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    Null,
    Text(String),
    Int(i64),
    Float(f64),
    Date(NaiveDate),
}

/// Client value of a decoded cell. NULL is `null` for every kind.
pub fn render_cell(kind: ColumnKind, cell: Cell) -> Value {
    match (kind, cell) {
        (_, Cell::Null) => Value::Null,
        (ColumnKind::Boolean, Cell::Int(n)) => Value::Bool(n != 0),
        (_, Cell::Int(n)) => Value::Number(n.into()),
        (ColumnKind::Decimal { scale }, Cell::Float(v)) => Value::String(format_fixed(v, scale)),
        (_, Cell::Float(v)) => serde_json::Number::from_f64(v).map(Value::Number).unwrap_or(Value::Null),
        (_, Cell::Date(d)) => Value::String(format_date(d)),
        (_, Cell::Text(s)) => Value::String(s),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_date_is_reversed() {
        assert_eq!(client_date_to_iso("31.12.2023"), "2023-12-31");
    }

    #[test]
    fn parses_both_date_forms() {
        let d = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
        assert_eq!(parse_date("31.12.2023"), Some(d));
        assert_eq!(parse_date("2023-12-31"), Some(d));
        assert_eq!(parse_date("31.02.2023"), None);
        assert_eq!(parse_date("yesterday"), None);
    }

    #[test]
    fn renders_cells() {
        assert_eq!(format_date(NaiveDate::from_ymd_opt(2023, 12, 31).unwrap()), "31.12.2023");
        assert_eq!(format_fixed(12.345, 1), "12.3");
        assert_eq!(format_fixed(7.0, 1), "7.0");
        assert_eq!(format_fixed(0.456, 2), "0.46");
        assert_eq!(format_fixed(12.25, 1), "12.3");
        assert_eq!(format_fixed(0.25, 1), "0.3");
        assert_eq!(format_fixed(1.75, 1), "1.8");
        assert_eq!(format_fixed(-12.25, 1), "-12.3");
        assert_eq!(format_fixed(3.0, 0), "3");
    }

    #[test]
    fn renders_each_kind() {
        let date = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
        assert_eq!(render_cell(ColumnKind::Date, Cell::Date(date)), Value::from("31.12.2023"));
        assert_eq!(render_cell(ColumnKind::Decimal { scale: 1 }, Cell::Float(12.345)), Value::from("12.3"));
        assert_eq!(render_cell(ColumnKind::Decimal { scale: 1 }, Cell::Float(12.25)), Value::from("12.3"));
        assert_eq!(render_cell(ColumnKind::Float, Cell::Float(2.5)), serde_json::json!(2.5));
        assert_eq!(render_cell(ColumnKind::Float, Cell::Float(f64::NAN)), Value::Null);
        assert_eq!(render_cell(ColumnKind::Integer, Cell::Int(42)), serde_json::json!(42));
        assert_eq!(render_cell(ColumnKind::Boolean, Cell::Int(1)), Value::Bool(true));
        assert_eq!(render_cell(ColumnKind::Boolean, Cell::Int(0)), Value::Bool(false));
        assert_eq!(render_cell(ColumnKind::Text, Cell::Text("active".into())), Value::from("active"));
    }

    #[test]
    fn null_renders_as_null_for_every_kind() {
        for kind in [
            ColumnKind::Text,
            ColumnKind::Integer,
            ColumnKind::Float,
            ColumnKind::Decimal { scale: 1 },
            ColumnKind::Date,
            ColumnKind::Boolean,
        ] {
            assert_eq!(render_cell(kind, Cell::Null), Value::Null, "{}", kind.name());
        }
    }

    #[test]
    fn literal_parsing_by_kind() {
        assert_eq!(
            ColumnKind::Date.parse_literal("date", "31.12.2023").unwrap(),
            BindValue::Date(NaiveDate::from_ymd_opt(2023, 12, 31).unwrap())
        );
        assert_eq!(ColumnKind::Integer.parse_literal("q", "42").unwrap(), BindValue::I64(42));
        assert_eq!(
            ColumnKind::Decimal { scale: 1 }.parse_literal("d", "12.5").unwrap(),
            BindValue::F64(12.5)
        );
        assert_eq!(ColumnKind::Boolean.parse_literal("b", "TRUE").unwrap(), BindValue::Bool(true));
        assert_eq!(
            ColumnKind::Text.parse_literal("s", "1 OR 1=1").unwrap(),
            BindValue::String("1 OR 1=1".into())
        );
        assert!(matches!(
            ColumnKind::Integer.parse_literal("q", "1; DROP TABLE trips"),
            Err(FilterError::InvalidLiteral { kind: "integer", .. })
        ));
        assert!(ColumnKind::Float.parse_literal("f", "NaN").is_err());
    }

    #[test]
    fn select_expr_casts() {
        assert_eq!(ColumnKind::Date.select_expr("date"), "CAST(`date` AS DATE) AS `date`");
        assert_eq!(
            ColumnKind::Decimal { scale: 1 }.select_expr("distance"),
            "CAST(`distance` AS DOUBLE) AS `distance`"
        );
    }
}
