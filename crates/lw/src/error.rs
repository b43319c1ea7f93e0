//! CLI error types.

use lw_config::ConfigError;
use lw_lotto::LottoError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Lotto(#[from] LottoError),

    #[error("{0}")]
    Server(String),

    #[error("{0}")]
    Validation(String),
}
