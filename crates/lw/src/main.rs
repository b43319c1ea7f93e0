//! LW CLI - lotto wiki.
//!
//! Provides commands for:
//! - `serve`: Start the wiki server
//! - `lotto`: Draw lottery tickets on the command line

mod commands;
mod error;
mod output;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{LottoArgs, ServeArgs};
use error::CliError;
use output::Output;

/// LW - a small wiki with a lottery ticket generator.
#[derive(Parser)]
#[command(name = "lw", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the wiki server.
    Serve(ServeArgs),
    /// Draw lottery tickets and print them.
    Lotto(LottoArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG
    let verbose = matches!(&cli.command, Commands::Serve(args) if args.verbose);
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let result = match cli.command {
        Commands::Serve(args) => tokio::runtime::Runtime::new()
            .map_err(CliError::from)
            .and_then(|rt| rt.block_on(args.execute())),
        Commands::Lotto(args) => args.execute(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output.failure(&err);
            ExitCode::FAILURE
        }
    }
}
