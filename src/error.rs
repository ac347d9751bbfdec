use std::time::Duration;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::models::{ApiResponse, FieldError};

/// Terminal outcomes of a submission request other than success.
#[derive(Debug)]
pub enum SubmitError {
    MethodNotAllowed,
    MalformedRequest(String),
    RateLimited { window: Duration },
    SuspiciousActivity,
    ValidationFailed(Vec<FieldError>),
    Internal(String),
}

impl std::fmt::Display for SubmitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmitError::MethodNotAllowed => write!(f, "Method Not Allowed"),
            SubmitError::MalformedRequest(msg) => write!(f, "Malformed request: {msg}"),
            SubmitError::RateLimited { window } => {
                write!(f, "Rate limited: window {}s", window.as_secs())
            }
            SubmitError::SuspiciousActivity => write!(f, "Suspicious activity"),
            SubmitError::ValidationFailed(errors) => {
                write!(f, "Validation failed: {} field error(s)", errors.len())
            }
            SubmitError::Internal(msg) => write!(f, "Internal Error: {msg}"),
        }
    }
}

impl std::error::Error for SubmitError {}

impl IntoResponse for SubmitError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            SubmitError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                ApiResponse::failure("Method Not Allowed"),
            ),
            SubmitError::MalformedRequest(_) => (
                StatusCode::BAD_REQUEST,
                ApiResponse::failure("Invalid data format"),
            ),
            SubmitError::RateLimited { window } => (
                StatusCode::TOO_MANY_REQUESTS,
                ApiResponse::failure(cooldown_message(window)),
            ),
            SubmitError::SuspiciousActivity => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiResponse::failure("Suspicious activity detected"),
            ),
            SubmitError::ValidationFailed(errors) => (
                StatusCode::BAD_REQUEST,
                ApiResponse::failure("Form validation failed").with_errors(errors),
            ),
            SubmitError::Internal(msg) => {
                tracing::error!("Internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiResponse::failure("Internal server error. Please try again later."),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// "Too many requests. Please wait 2 minutes." for the default window.
pub fn cooldown_message(window: Duration) -> String {
    let secs = window.as_secs();
    let wait = if secs >= 60 && secs % 60 == 0 {
        match secs / 60 {
            1 => "1 minute".to_string(),
            n => format!("{n} minutes"),
        }
    } else {
        format!("{secs} seconds")
    };
    format!("Too many requests. Please wait {wait}.")
}
