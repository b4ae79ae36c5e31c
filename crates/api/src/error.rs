use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use outreach_core::error::CoreError;
use outreach_core::gate::LOGIN_PATH;
use outreach_core::upload::UploadError;
use outreach_db::store::StoreError;
use serde_json::json;

use crate::workflow::SubmitError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `outreach_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A content store error outside a form submission.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A rejected admin form submission, with the draft echoed back.
    #[error("{}", .0.error)]
    Submit(Box<SubmitFailure>),

    /// No valid admin session. The client should go to the login page.
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The request body exceeded the configured limit.
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// A submission error plus the draft's text fields, so the form can be
/// re-populated without re-entering data.
#[derive(Debug)]
pub struct SubmitFailure {
    pub error: SubmitError,
    pub draft: serde_json::Value,
}

impl AppError {
    pub fn submit(error: SubmitError, draft: serde_json::Value) -> Self {
        AppError::Submit(Box::new(SubmitFailure { error, draft }))
    }
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
            },

            // --- Store errors ---
            AppError::Store(err) => classify_store_error(err),

            // --- Form submissions ---
            AppError::Submit(failure) => return submit_response(failure),

            // --- HTTP-specific errors ---
            AppError::Unauthenticated(msg) => {
                let body = json!({
                    "error": msg,
                    "code": "UNAUTHENTICATED",
                    "redirect": LOGIN_PATH,
                });
                return (StatusCode::UNAUTHORIZED, axum::Json(body)).into_response();
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::PayloadTooLarge(msg) => {
                (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE", msg.clone())
            }
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a store error into an HTTP status, error code, and message.
fn classify_store_error(err: &StoreError) -> (StatusCode, &'static str, String) {
    match err {
        StoreError::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND", err.to_string()),
        StoreError::Constraint(constraint) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            "CONSTRAINT_VIOLATION",
            format!("Record violates constraint: {constraint}"),
        ),
        StoreError::Database(db_err) => {
            tracing::error!(error = %db_err, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}

/// `{error, code, field?, draft}`; the message is the toast text.
fn submit_response(failure: &SubmitFailure) -> Response {
    let (status, code, field) = match &failure.error {
        SubmitError::Validation(err) => {
            (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", Some(err.field.as_str()))
        }
        SubmitError::Upload { field, source } => {
            let status = match source {
                UploadError::Service(_) => StatusCode::BAD_GATEWAY,
                _ => StatusCode::BAD_REQUEST,
            };
            (status, "UPLOAD_ERROR", Some(*field))
        }
        SubmitError::Persist { source, .. } => {
            let status = match source {
                StoreError::NotFound { .. } => StatusCode::NOT_FOUND,
                StoreError::Constraint(_) => StatusCode::UNPROCESSABLE_ENTITY,
                StoreError::Database(db_err) => {
                    tracing::error!(error = %db_err, "Database error during submission");
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            };
            (status, "PERSIST_ERROR", None)
        }
    };

    let mut body = json!({
        "error": failure.error.toast(),
        "code": code,
        "draft": failure.draft,
    });
    if let Some(field) = field {
        body["field"] = json!(field);
    }
    (status, axum::Json(body)).into_response()
}
