//! Wiki handler errors.

use lw_lotto::LottoError;
use lw_storage::StorageError;

/// Error returned by wiki handlers.
#[derive(Debug, thiserror::Error)]
pub enum WikiError {
    /// The page store failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// A ticket field could not be drawn.
    #[error("Lottery error: {0}")]
    Lotto(#[from] LottoError),

    /// The lotto path segment is not a decimal ticket count.
    #[error("Invalid ticket count: {0:?}")]
    InvalidTicketCount(String),

    /// More tickets requested than allowed.
    #[error("Too many tickets: {requested} requested, at most {max} allowed")]
    TooManyTickets {
        /// Requested ticket count.
        requested: usize,
        /// Configured maximum.
        max: usize,
    },
}

impl WikiError {
    /// Whether the error was caused by the request rather than the server.
    #[must_use]
    pub fn is_bad_request(&self) -> bool {
        matches!(
            self,
            Self::InvalidTicketCount(_) | Self::TooManyTickets { .. }
        )
    }
}
