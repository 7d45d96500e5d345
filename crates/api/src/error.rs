use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use swiftreg_core::error::CoreError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for registry errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A registry error from `swiftreg_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A malformed request (unparseable body, wrong content type).
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => classify_core_error(core),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Map a registry error to an HTTP status, error code, and message.
///
/// Store and import faults map to 500 with a sanitized message; the detail
/// only goes to the log.
fn classify_core_error(err: &CoreError) -> (StatusCode, &'static str, String) {
    let (status, code) = match err {
        CoreError::MissingField(_) => (StatusCode::BAD_REQUEST, "MISSING_FIELD"),
        CoreError::InvalidLength { .. } => (StatusCode::BAD_REQUEST, "INVALID_LENGTH"),
        CoreError::InvalidHeadquartersFlag { .. } => {
            (StatusCode::BAD_REQUEST, "INVALID_HEADQUARTERS_FLAG")
        }
        CoreError::CountryCodeMismatch { .. } => (StatusCode::BAD_REQUEST, "COUNTRY_CODE_MISMATCH"),
        CoreError::FieldMismatch { .. } => (StatusCode::BAD_REQUEST, "FIELD_MISMATCH"),
        CoreError::DuplicateRecord(_) => (StatusCode::CONFLICT, "DUPLICATE_RECORD"),
        CoreError::DuplicateHeadquarters(_) => (StatusCode::CONFLICT, "DUPLICATE_HEADQUARTERS"),
        CoreError::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        CoreError::Store(_) | CoreError::Import(_) => {
            tracing::error!(error = %err, "Internal registry error");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            );
        }
    };
    (status, code, err.to_string())
}
