//! Registry validation: identifiers, uniqueness, known column types.

use crate::config::TablesConfig;
use crate::error::ConfigError;
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

pub const COLUMN_TYPES: &[&str] = &["text", "integer", "float", "decimal", "date", "boolean"];

fn identifier_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("static identifier pattern"))
}

/// True when `s` can be used as a MySQL identifier without quoting surprises.
pub fn is_identifier(s: &str) -> bool {
    s.len() <= 64 && identifier_re().is_match(s)
}

pub fn validate(config: &TablesConfig) -> Result<(), ConfigError> {
    if config.tables.is_empty() {
        return Err(ConfigError::Validation("at least one table required".into()));
    }

    let mut table_names = HashSet::new();
    for t in &config.tables {
        if !is_identifier(&t.name) {
            return Err(ConfigError::InvalidIdentifier {
                kind: "table",
                name: t.name.clone(),
            });
        }
        if !table_names.insert(t.name.as_str()) {
            return Err(ConfigError::DuplicateTable(t.name.clone()));
        }
        if t.columns.is_empty() {
            return Err(ConfigError::Validation(format!("table {} has no columns", t.name)));
        }

        let mut column_names = HashSet::new();
        for c in &t.columns {
            if !is_identifier(&c.name) {
                return Err(ConfigError::InvalidIdentifier {
                    kind: "column",
                    name: c.name.clone(),
                });
            }
            // Column lookups ignore case, so names differing only in case would be ambiguous.
            if !column_names.insert(c.name.to_ascii_lowercase()) {
                return Err(ConfigError::DuplicateColumn {
                    table: t.name.clone(),
                    column: c.name.clone(),
                });
            }
            let type_name = c.type_.name().to_lowercase();
            if !COLUMN_TYPES.contains(&type_name.as_str()) {
                return Err(ConfigError::UnknownColumnType {
                    column: format!("{}.{}", t.name, c.name),
                    type_name: c.type_.name().to_string(),
                });
            }
        }

        if let Some(sort) = &t.default_sort {
            if !column_names.contains(&sort.field.to_ascii_lowercase()) {
                return Err(ConfigError::Validation(format!(
                    "default sort field {} is not a column of {}",
                    sort.field, t.name
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::from_json_str;

    #[test]
    fn identifiers() {
        assert!(is_identifier("trips"));
        assert!(is_identifier("_tmp2"));
        assert!(!is_identifier("2trips"));
        assert!(!is_identifier("trips; DROP TABLE trips"));
        assert!(!is_identifier("a`b"));
        assert!(!is_identifier(""));
    }

    #[test]
    fn rejects_duplicate_columns() {
        let err = from_json_str(
            r#"{"tables":[{"name":"t","columns":[{"name":"a","type":"text"},{"name":"a","type":"text"}]}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateColumn { .. }));

        let err = from_json_str(
            r#"{"tables":[{"name":"t","columns":[{"name":"a","type":"text"},{"name":"A","type":"text"}]}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateColumn { .. }));
    }

    #[test]
    fn rejects_unknown_type() {
        let err = from_json_str(r#"{"tables":[{"name":"t","columns":[{"name":"a","type":"blob"}]}]}"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnknownColumnType { .. }));
    }

    #[test]
    fn rejects_bad_table_name() {
        let err = from_json_str(r#"{"tables":[{"name":"t x","columns":[{"name":"a","type":"text"}]}]}"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidIdentifier { kind: "table", .. }));
    }

    #[test]
    fn rejects_default_sort_on_missing_column() {
        let err = from_json_str(
            r#"{"tables":[{"name":"t","columns":[{"name":"a","type":"text"}],"default_sort":{"field":"b"}}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }
}
