//! HTTP error mapping. Every failure leaves as `{ "error", "code" }`.

use std::fmt::Display;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use questline_core::error::CoreError;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Core(CoreError::Validation(errors.to_string()))
    }
}

type ErrorParts = (StatusCode, &'static str, String);

/// Logs the detail server-side; the client only sees a generic message.
fn internal(detail: &dyn Display) -> ErrorParts {
    tracing::error!(error = %detail, "Request failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

fn core_parts(err: &CoreError) -> ErrorParts {
    match err {
        CoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        // A second completion of a daily or todo.
        CoreError::AlreadyCompleted { entity, id } => (
            StatusCode::CONFLICT,
            "ALREADY_COMPLETED",
            format!("{entity} with id {id} is already completed"),
        ),
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
        CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
        CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
        CoreError::Internal(msg) => internal(msg),
    }
}

/// Named `uq_*` constraint hit by an insert or update, if any.
///
/// Taken usernames, second characters and repeat achievement unlocks all
/// surface here when two requests race past the application checks.
fn unique_violation(err: &sqlx::Error) -> Option<&str> {
    let sqlx::Error::Database(db_err) = err else {
        return None;
    };
    if db_err.code().as_deref() != Some("23505") {
        return None;
    }
    db_err.constraint().filter(|name| name.starts_with("uq_"))
}

fn database_parts(err: &sqlx::Error) -> ErrorParts {
    if let sqlx::Error::RowNotFound = err {
        return (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        );
    }
    match unique_violation(err) {
        Some(constraint) => (
            StatusCode::CONFLICT,
            "CONFLICT",
            format!("Value already taken ({constraint})"),
        ),
        None => internal(err),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(err) => core_parts(err),
            AppError::Database(err) => database_parts(err),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => internal(msg),
        };

        (status, Json(json!({ "error": message, "code": code }))).into_response()
    }
}
