// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::collections::BTreeMap;

/// Key used for errors that do not belong to a single field.
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

/// Per-field validation messages, serialized as `{"field": ["message", ...]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    /// Errors with a single message on one field.
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.add(field, message);
        errors
    }

    /// Errors with a single cross-field message.
    pub fn non_field(message: impl Into<String>) -> Self {
        Self::single(NON_FIELD_ERRORS, message)
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Validation failed: {0:?}")]
    Validation(FieldErrors),

    #[error("Authentication required")]
    Unauthorized,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Shorthand for a validation error on a single field.
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::Validation(FieldErrors::single(field, message))
    }

    /// Shorthand for a validation error that spans several fields.
    pub fn non_field(message: impl Into<String>) -> Self {
        AppError::Validation(FieldErrors::non_field(message))
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match self {
            AppError::Validation(errors) => {
                return (StatusCode::BAD_REQUEST, Json(errors)).into_response();
            }
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized", None),
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, "invalid_token", None),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", Some(msg)),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", Some(msg)),
            AppError::Database(err) => {
                tracing::error!(error = %err, "Database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "database_error", None)
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl From<validator::ValidationErrors> for FieldErrors {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields = FieldErrors::default();
        for (field, field_errors) in errors.field_errors() {
            let field = if field == "__all__" {
                NON_FIELD_ERRORS
            } else {
                field.as_ref()
            };
            for err in field_errors {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value ({}).", err.code));
                fields.add(field, message);
            }
        }
        fields
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.into())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(err) => {
                let (field, message) = describe_data_error(&err.body_text());
                AppError::field(field, message)
            }
            JsonRejection::JsonSyntaxError(_) => AppError::non_field("Malformed JSON body."),
            JsonRejection::MissingJsonContentType(_) => {
                AppError::non_field("Expected request with `Content-Type: application/json`.")
            }
            other => AppError::non_field(other.body_text()),
        }
    }
}

const DATA_ERROR_PREFIX: &str = "Failed to deserialize the JSON body into the target type: ";

/// Map a serde data error onto the field it concerns.
///
/// Serde reports missing fields as "missing field `x`" and type mismatches as
/// "x: invalid type ..." (the path prefix is absent for root-level errors).
fn describe_data_error(body_text: &str) -> (String, String) {
    let text = body_text.strip_prefix(DATA_ERROR_PREFIX).unwrap_or(body_text);
    let text = match text.rfind(" at line ") {
        Some(idx) => &text[..idx],
        None => text,
    };

    if let Some(rest) = text.strip_prefix("missing field `") {
        if let Some(end) = rest.find('`') {
            return (rest[..end].to_string(), "This field is required.".to_string());
        }
    }

    if let Some((path, message)) = text.split_once(": ") {
        let is_path = !path.is_empty()
            && path
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '[' | ']'));
        if is_path {
            return (path.to_string(), capitalize(message));
        }
    }

    (NON_FIELD_ERRORS.to_string(), capitalize(text))
}

fn capitalize(message: &str) -> String {
    let mut chars = message.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_is_attributed() {
        let (field, message) = describe_data_error(
            "Failed to deserialize the JSON body into the target type: missing field `age` at line 1 column 2",
        );
        assert_eq!(field, "age");
        assert_eq!(message, "This field is required.");
    }

    #[test]
    fn test_invalid_variant_is_attributed() {
        let (field, message) = describe_data_error(
            "Failed to deserialize the JSON body into the target type: gender: unknown variant `robot`, expected `male` or `female` at line 1 column 18",
        );
        assert_eq!(field, "gender");
        assert!(message.starts_with("Unknown variant `robot`"));
    }

    #[test]
    fn test_unattributable_error_goes_to_non_field() {
        let (field, _) = describe_data_error(
            "Failed to deserialize the JSON body into the target type: invalid type: integer `3`, expected a map at line 1 column 1",
        );
        assert_eq!(field, NON_FIELD_ERRORS);
    }

    #[test]
    fn test_field_errors_accumulate() {
        let mut errors = FieldErrors::single("password", "Too short.");
        errors.add("password", "Entirely numeric.");
        errors.add("email", "Taken.");

        assert_eq!(errors.get("password").map(<[String]>::len), Some(2));
        assert_eq!(
            serde_json::to_value(&errors).unwrap(),
            serde_json::json!({
                "email": ["Taken."],
                "password": ["Too short.", "Entirely numeric."],
            })
        );
    }
}
