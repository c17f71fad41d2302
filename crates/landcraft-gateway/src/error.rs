use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use landcraft_common::Error;
use tracing::error;

/// Wrapper that turns a `landcraft_common::Error` into a plain HTTP
/// response. No structured error body, just the error text.
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        error!("request failed: {}", self.0);
        (status, self.0.to_string()).into_response()
    }
}
