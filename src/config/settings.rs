//! Process settings from the environment (after `dotenvy`).

use crate::error::ConfigError;
use sqlx::mysql::MySqlConnectOptions;
use std::str::FromStr;

#[derive(Clone)]
pub struct Settings {
    /// Full MySQL URL. When set, the `DB_*` parts are ignored.
    pub database_url: Option<String>,
    pub db_host: String,
    pub db_port: u16,
    pub db_user: String,
    pub db_password: String,
    pub db_name: String,
    pub db_max_connections: u32,
    pub bind_addr: String,
    pub tables_config: String,
    /// Upper bound on `pageRows`; `None` (unset) accepts any page size.
    pub max_page_rows: Option<i64>,
    pub body_limit_bytes: usize,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("database_url", &self.database_url.as_ref().map(|_| "<redacted>"))
            .field("db_host", &self.db_host)
            .field("db_port", &self.db_port)
            .field("db_user", &self.db_user)
            .field("db_name", &self.db_name)
            .field("db_max_connections", &self.db_max_connections)
            .field("bind_addr", &self.bind_addr)
            .field("tables_config", &self.tables_config)
            .field("max_page_rows", &self.max_page_rows)
            .field("body_limit_bytes", &self.body_limit_bytes)
            .finish()
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup; `from_env` passes `std::env::var`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());
        Ok(Self {
            database_url: lookup("DATABASE_URL").filter(|s| !s.trim().is_empty()),
            db_host: get("DB_HOST", "localhost"),
            db_port: parse_var("DB_PORT", &get("DB_PORT", "3306"))?,
            db_user: get("DB_USER", "root"),
            db_password: get("DB_PASSWORD", ""),
            db_name: get("DB_NAME", "table_viewer"),
            db_max_connections: parse_var("DB_MAX_CONNECTIONS", &get("DB_MAX_CONNECTIONS", "5"))?,
            bind_addr: get("BIND_ADDR", "0.0.0.0:3000"),
            tables_config: get("TABLES_CONFIG", "tables.json"),
            max_page_rows: parse_page_cap(lookup("MAX_PAGE_ROWS"))?,
            body_limit_bytes: parse_var("BODY_LIMIT_BYTES", &get("BODY_LIMIT_BYTES", "65536"))?,
        })
    }

    pub fn connect_options(&self) -> Result<MySqlConnectOptions, ConfigError> {
        match &self.database_url {
            Some(url) => MySqlConnectOptions::from_str(url)
                .map_err(|e| ConfigError::Validation(format!("DATABASE_URL: {}", e))),
            None => Ok(MySqlConnectOptions::new()
                .host(&self.db_host)
                .port(self.db_port)
                .username(&self.db_user)
                .password(&self.db_password)
                .database(&self.db_name)),
        }
    }
}

fn parse_var<T: FromStr>(key: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::Validation(format!("{} has invalid value '{}'", key, raw)))
}

fn parse_page_cap(raw: Option<String>) -> Result<Option<i64>, ConfigError> {
    let Some(raw) = raw.filter(|s| !s.trim().is_empty()) else {
        return Ok(None);
    };
    let cap: i64 = parse_var("MAX_PAGE_ROWS", &raw)?;
    if cap < 1 {
        return Err(ConfigError::Validation(format!("MAX_PAGE_ROWS must be at least 1, got {}", cap)));
    }
    Ok(Some(cap))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> Result<Settings, ConfigError> {
        let map: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Settings::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn defaults() {
        let s = settings(&[]).unwrap();
        assert_eq!(s.bind_addr, "0.0.0.0:3000");
        assert_eq!(s.db_port, 3306);
        assert_eq!(s.max_page_rows, None);
        assert_eq!(s.tables_config, "tables.json");
        assert!(s.database_url.is_none());
    }

    #[test]
    fn overrides() {
        let s = settings(&[("DB_HOST", "db"), ("MAX_PAGE_ROWS", "50"), ("DATABASE_URL", "mysql://u:p@h/d")]).unwrap();
        assert_eq!(s.db_host, "db");
        assert_eq!(s.max_page_rows, Some(50));
        assert_eq!(s.database_url.as_deref(), Some("mysql://u:p@h/d"));
        assert!(s.connect_options().is_ok());
    }

    #[test]
    fn invalid_number_is_error() {
        assert!(matches!(settings(&[("DB_PORT", "http")]), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn page_cap_must_be_positive() {
        assert!(matches!(settings(&[("MAX_PAGE_ROWS", "0")]), Err(ConfigError::Validation(_))));
        assert_eq!(settings(&[("MAX_PAGE_ROWS", " ")]).unwrap().max_page_rows, None);
    }

    #[test]
    fn debug_redacts_url() {
        let s = settings(&[("DATABASE_URL", "mysql://u:secret@h/d")]).unwrap();
        assert!(!format!("{:?}", s).contains("secret"));
    }
}
