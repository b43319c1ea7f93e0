//! `lw serve` command implementation.

use std::path::PathBuf;

use clap::Args;
use lw_config::{CliSettings, Config};
use lw_server::{run_server, server_config_from_lw_config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover lw.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Page data directory (overrides config).
    #[arg(short, long, env = "LW_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    /// Enable verbose output (request and handler logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            host: self.host,
            port: self.port,
            data_dir: self.data_dir,
        };

        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let data_dir = &config.storage_resolved.data_dir;
        std::fs::create_dir_all(data_dir)?;

        output.heading(&format!(
            "Starting server on http://{}:{}",
            config.server.host, config.server.port
        ));
        if let Some(path) = &config.config_path {
            output.field("Config file", path.display());
        }
        output.field("Data directory", data_dir.display());
        output.field(
            "Static directory",
            config.assets_resolved.static_dir.display(),
        );
        output.field("Routes", config.routes.verbs.join(", "));

        let server_config = server_config_from_lw_config(&config)?;
        run_server(server_config)
            .await
            .map_err(|e| CliError::Server(e.to_string()))?;

        Ok(())
    }
}
