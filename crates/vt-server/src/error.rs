//! Error-to-HTTP response conversion.
//!
//! Implements `IntoResponse` for [`vt_core::Error`] so that route handlers
//! can return `Result<T, AppError>` and use `?` on catalog calls.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Wrapper so we can implement `IntoResponse` for an external type.
#[derive(Debug)]
pub struct AppError {
    inner: vt_core::Error,
}

impl AppError {
    pub fn new(inner: vt_core::Error) -> Self {
        Self { inner }
    }
}

impl From<vt_core::Error> for AppError {
    fn from(e: vt_core::Error) -> Self {
        Self::new(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.inner.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            tracing::error!(
                status = %status,
                error = %self.inner,
                "Server error in API handler"
            );
        }

        let body = json!({
            "detail": self.inner.to_string(),
            "code": self.inner.code(),
        });

        (status, axum::Json(body)).into_response()
    }
}
