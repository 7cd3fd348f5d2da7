// src/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

/// Global Application Error Enum.
/// Centralizes error handling and mapping to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    // 500 Internal Server Error
    InternalServerError(String),

    // 400 Bad Request - malformed input, client must fix and resubmit
    Validation(String),

    // 400 Bad Request - quiz answer references an option that does not
    // belong to the question (client/server desync)
    InvalidAnswer(String),

    // 403 Forbidden - email not on the admin allow-list. Deliberately
    // generic: no detail about why the address was rejected.
    Unauthorized,

    // 400 Bad Request - magic-link verification failures. Each carries its
    // specific reason since the token itself is the secret, not the mode.
    InvalidToken,
    AlreadyUsed,
    Expired,

    // 401 Unauthorized - session-gated access failures
    Unauthenticated,
    SessionExpired,

    // 502 Bad Gateway - email dispatch failed AFTER the lead was persisted.
    // Carries the persisted id so the caller can retry delivery without
    // re-submitting duplicate lead data.
    DeliveryFailure { lead_id: i64 },
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for AppError {}

/// Implements `IntoResponse` for `AppError`.
/// Converts the error into a JSON response with appropriate HTTP status code.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({"error": "Internal Server Error"}),
                )
            }
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, json!({"error": msg})),
            AppError::InvalidAnswer(msg) => (StatusCode::BAD_REQUEST, json!({"error": msg})),
            AppError::Unauthorized => (StatusCode::FORBIDDEN, json!({"error": "Unauthorized"})),
            AppError::InvalidToken => (
                StatusCode::BAD_REQUEST,
                json!({"error": "Invalid login link", "reason": "invalid"}),
            ),
            AppError::AlreadyUsed => (
                StatusCode::BAD_REQUEST,
                json!({"error": "This login link has already been used", "reason": "used"}),
            ),
            AppError::Expired => (
                StatusCode::BAD_REQUEST,
                json!({"error": "This login link has expired, request a new one", "reason": "expired"}),
            ),
            AppError::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                json!({"error": "Authentication required"}),
            ),
            AppError::SessionExpired => (
                StatusCode::UNAUTHORIZED,
                json!({"error": "Session expired, please log in again"}),
            ),
            AppError::DeliveryFailure { lead_id } => (
                StatusCode::BAD_GATEWAY,
                json!({
                    "error": "Your submission was saved, but the email could not be delivered",
                    "saved": true,
                    "id": lead_id,
                }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

/// Converts `sqlx::Error` into `AppError::InternalServerError`.
/// Allows using `?` operator on database queries.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::InternalServerError(err.to_string())
    }
}

/// Serialization failures reach this only from server-side `to_value` calls
/// on already-validated data, so they are reported as 500, not 400.
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InternalServerError(err.to_string())
    }
}
