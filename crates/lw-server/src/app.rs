//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::security;
use crate::state::AppState;
use crate::static_files;

/// Create the application router.
///
/// `/static/{*path}` serves assets; every other path goes to the wiki
/// dispatcher, which answers 404 for paths it can't resolve.
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/static/{*path}", get(static_files::serve_static))
        .fallback(handlers::pages::handle_page)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(security::security_headers()),
        )
        .with_state(state)
}
