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
    #[error("unknown action in rule table: '{0}'")]
    UnknownAction(String),
    #[error("rule table has no rule for action '{0}'")]
    MissingRule(&'static str),
    #[error("invalid field name '{field}' in rule for action '{action}'")]
    InvalidField { action: &'static str, field: String },
    #[error("validation: {0}")]
    Validation(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("missing required field '{0}'; the request body must look like {{\"table\": \"widgets\", \"action\": \"read\", \"payload\": {{\"component\": \"...\"}}}}")]
    MissingField(&'static str),
    /// Diagnostic is returned to the caller verbatim.
    #[error("{0}")]
    Validation(String),
    #[error("invalid action '{0}'; expected one of: create, read, update, delete")]
    UnknownAction(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("backend request failed: {0}")]
    Backend(String),
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "config_error",
            AppError::MissingField(_) => "missing_field",
            AppError::Validation(_) => "validation_error",
            AppError::UnknownAction(_) => "invalid_action",
            AppError::BadRequest(_) => "bad_request",
            AppError::Backend(_) => "backend_unavailable",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Backend(_) => StatusCode::BAD_GATEWAY,
            AppError::MissingField(_)
            | AppError::Validation(_)
            | AppError::UnknownAction(_)
            | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            AppError::Backend(format!("timed out: {}", e))
        } else {
            AppError::Backend(e.to_string())
        }
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: &'static str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: self.to_string(),
            code: self.code(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_to_400() {
        for err in [
            AppError::MissingField("table"),
            AppError::Validation("sort must be a string".into()),
            AppError::UnknownAction("upsert".into()),
            AppError::BadRequest("body must be a JSON object".into()),
        ] {
            assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        }
        assert_eq!(AppError::Backend("refused".into()).status(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            AppError::Config(ConfigError::MissingRule("read")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn validation_diagnostic_is_not_prefixed() {
        let err = AppError::Validation("limit must be an integer".into());
        assert_eq!(err.to_string(), "limit must be an integer");
        assert_eq!(err.code(), "validation_error");
    }

    #[test]
    fn missing_field_names_the_field() {
        let msg = AppError::MissingField("payload").to_string();
        assert!(msg.starts_with("missing required field 'payload'"));
    }
}
