//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config load: {0}")]
    Load(String),
    #[error("validation: {0}")]
    Validation(String),
    #[error("duplicate table: {0}")]
    DuplicateTable(String),
    #[error("duplicate column: table {table} column {column}")]
    DuplicateColumn { table: String, column: String },
    #[error("invalid identifier: {kind} '{name}'")]
    InvalidIdentifier { kind: &'static str, name: String },
    #[error("unknown column type '{type_name}' for column {column}")]
    UnknownColumnType { column: String, type_name: String },
}

/// Malformed or disallowed filter statement.
#[derive(Error, Debug, PartialEq)]
pub enum FilterError {
    #[error("unterminated quoted literal")]
    Unterminated,
    #[error("malformed predicate: {0}")]
    Malformed(String),
    #[error("unknown operator '{0}'")]
    UnknownOperator(String),
    #[error("unknown column '{0}'")]
    UnknownColumn(String),
    #[error("invalid {kind} literal '{literal}' for column {column}")]
    InvalidLiteral {
        column: String,
        kind: &'static str,
        literal: String,
    },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("validation: {0}")]
    Validation(String),
    #[error("filter: {0}")]
    Filter(#[from] FilterError),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("decode: column {column}: {message}")]
    Decode { column: String, message: String },
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl AppError {
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "config_error"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            AppError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "validation_error"),
            AppError::Filter(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            AppError::Db(_) => (StatusCode::INTERNAL_SERVER_ERROR, "database_error"),
            AppError::Decode { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "decode_error"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        if status.is_server_error() {
            tracing::error!(error = %self, code, "request failed");
        }
        let details = match &self {
            AppError::Filter(_) => Some(serde_json::json!({ "field": "filterStatement" })),
            _ => None,
        };
        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
                details,
            },
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_errors_are_bad_requests() {
        let err = AppError::from(FilterError::UnknownColumn("secret".into()));
        assert_eq!(err.status_and_code(), (StatusCode::BAD_REQUEST, "bad_request"));
    }

    #[test]
    fn database_errors_are_server_errors() {
        let err = AppError::from(sqlx::Error::RowNotFound);
        assert_eq!(
            err.status_and_code(),
            (StatusCode::INTERNAL_SERVER_ERROR, "database_error")
        );
    }
}
