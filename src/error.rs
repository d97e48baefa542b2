use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

/// Client errors answer with a bare status code and no body; only storage
/// failures are logged server-side.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("missing or invalid session cookie")]
    Unauthorized,

    #[error("invalid request: {0}")]
    BadRequest(&'static str),

    #[error("meal not found")]
    NotFound,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Database(e) => {
                error!(error = %e, "database failure");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        status.into_response()
    }
}
