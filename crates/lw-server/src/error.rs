//! Error types for the HTTP server.

use axum::extract::rejection::FormRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use lw_wiki::{RouteError, WikiError};

/// Server error type.
///
/// Every variant renders as a plain-text body with the error message.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ServerError {
    /// Path didn't resolve to a handler.
    #[error("404 page not found: {0}")]
    Route(#[from] RouteError),

    /// Handler failure.
    #[error("{0}")]
    Wiki(#[from] WikiError),

    /// Save request body couldn't be decoded.
    #[error("Invalid form data: {0}")]
    Form(#[from] FormRejection),
}

impl ServerError {
    /// HTTP status for this error.
    fn status(&self) -> StatusCode {
        match self {
            Self::Route(_) => StatusCode::NOT_FOUND,
            Self::Wiki(e) if e.is_bad_request() => StatusCode::BAD_REQUEST,
            Self::Wiki(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Form(rejection) => rejection.status(),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "Request rejected");
        }
        (status, self.to_string()).into_response()
    }
}
