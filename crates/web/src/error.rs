use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use storage::error::StorageError;
use validator::ValidationErrors;

/// What a handler can answer besides success.
///
/// Reporting handlers only read, so the only storage failure a caller can act
/// on is a missing athlete. Everything else is logged and reported as a 500.
#[derive(Debug)]
pub enum WebError {
    NotFound,
    Validation(ValidationErrors),
    Internal(String),
}

impl WebError {
    fn status(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            Self::NotFound => json!({ "error": "Resource not found" }),
            Self::Validation(errors) => {
                let details: Vec<String> = errors
                    .field_errors()
                    .iter()
                    .flat_map(|(field, errors)| {
                        errors.iter().map(move |e| {
                            let message = e
                                .message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| e.code.to_string());
                            format!("{}: {}", field, message)
                        })
                    })
                    .collect();

                json!({ "error": "Validation failed", "details": details })
            }
            Self::Internal(msg) => {
                tracing::error!("Request failed: {}", msg);
                json!({ "error": "An internal error occurred" })
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<StorageError> for WebError {
    fn from(error: StorageError) -> Self {
        match error {
            StorageError::NotFound => Self::NotFound,
            other => Self::Internal(format!("storage: {}", other)),
        }
    }
}

impl From<ValidationErrors> for WebError {
    fn from(error: ValidationErrors) -> Self {
        Self::Validation(error)
    }
}

/// CSV rendering into a `Vec<u8>`.
impl From<std::io::Error> for WebError {
    fn from(error: std::io::Error) -> Self {
        Self::Internal(format!("csv export: {}", error))
    }
}

pub type WebResult<T> = Result<T, WebError>;
