//! Static file serving.
//!
//! Serves `/static/{*path}` from the configured [`lw_assets::AssetSource`].

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

use crate::state::AppState;

/// Serve a static asset, or 404 if it doesn't exist.
pub(crate) async fn serve_static(
    State(state): State<Arc<AppState>>,
    Path(path): Path<String>,
) -> Response {
    match state.assets.get(&path) {
        Some(content) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, lw_assets::mime_for(&path))],
            content.into_owned(),
        )
            .into_response(),
        None => {
            tracing::debug!(%path, "Static asset not found");
            (StatusCode::NOT_FOUND, "404 page not found").into_response()
        }
    }
}
