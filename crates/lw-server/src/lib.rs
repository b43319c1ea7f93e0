//! HTTP server for LW.
//!
//! This crate serves the wiki over HTTP using axum:
//! - `/` and `/<verb>/<title>` paths resolved by the `lw-wiki` dispatcher
//! - Static files under `/static/` from `lw-assets`
//!
//! # Static Asset Modes
//!
//! - **Development** (default): Serves files from the configured static directory
//! - **Production** (`embed` feature): Embeds the repository's `static/` in the binary
//!
//! # Quick Start
//!
//! ```ignore
//! use lw_server::{run_server, server_config_from_lw_config};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = lw_config::Config::load(None, None)?;
//!     run_server(server_config_from_lw_config(&config)?).await
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! Browser ──HTTP──► axum router (lw-server)
//!                        │
//!                        ├─► /static/{*path} ──► AssetSource
//!                        │
//!                        └─► fallback ──► Dispatcher<Action> ──► Wiki
//!                                                                 │
//!                                                   FsStorage ◄───┤
//!                                                                 ▼
//!                                                   HtmlRenderer / 302 redirect
//! ```

mod app;
mod error;
mod handlers;
mod middleware;
mod state;
mod static_files;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use lw_assets::AssetSource;
use lw_lotto::{FieldSpec, LottoError, TicketSetGenerator};
use lw_storage::PageStore;
use lw_storage_fs::FsStorage;
use lw_wiki::{DEFAULT_MAX_TICKETS, PathMatcher, Verb, Wiki};
use state::AppState;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Page data directory.
    pub data_dir: PathBuf,
    /// Static asset directory.
    pub static_dir: PathBuf,
    /// Verbs accepted in `/<verb>/<title>` paths.
    pub verbs: Vec<Verb>,
    /// Ticket field shapes.
    pub generator: TicketSetGenerator,
    /// Upper bound on tickets per lotto request.
    pub max_tickets: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 8080,
            data_dir: PathBuf::from("data"),
            static_dir: PathBuf::from("static"),
            verbs: Verb::ALL.to_vec(),
            generator: TicketSetGenerator::default(),
            max_tickets: DEFAULT_MAX_TICKETS,
        }
    }
}

/// Run the server until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the address is invalid or the server fails to start.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let store: Arc<dyn PageStore> = Arc::new(FsStorage::new(config.data_dir.clone()));
    let wiki = Wiki::new(store)
        .with_generator(config.generator)
        .with_max_tickets(config.max_tickets);

    let assets = AssetSource::new(config.static_dir.clone());
    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(
        address = %addr,
        data_dir = %config.data_dir.display(),
        static_dir = %assets.dir().display(),
        "Starting server"
    );

    let state = Arc::new(AppState::new(
        wiki,
        PathMatcher::new(config.verbs.iter().copied()),
        assets,
    ));

    let app = app::create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from LW config.
///
/// # Errors
///
/// Returns [`LottoError::InvalidRange`] if a configured ticket field can't be drawn.
pub fn server_config_from_lw_config(config: &lw_config::Config) -> Result<ServerConfig, LottoError> {
    let lotto = &config.lotto;
    let generator = TicketSetGenerator::new(
        FieldSpec::new(lotto.main_count, lotto.main_max),
        FieldSpec::new(lotto.bonus_count, lotto.bonus_max),
    )?;

    Ok(ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        data_dir: config.storage_resolved.data_dir.clone(),
        static_dir: config.assets_resolved.static_dir.clone(),
        verbs: config
            .routes
            .verbs
            .iter()
            .filter_map(|v| Verb::parse(v))
            .collect(),
        generator,
        max_tickets: lotto.max_tickets,
    })
}
