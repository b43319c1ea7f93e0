//! Unique random draws and lottery tickets for LW.
//!
//! - [`sample`] draws distinct numbers from `1..=max` without replacement
//! - [`TicketSetGenerator`] combines a main draw and a bonus draw into tickets
//! - [`TicketSet::render`] produces the `<br>`-terminated line format stored as
//!   the body of the `lotto` page
//!
//! The random source is always passed in by the caller, so tests can use a
//! seeded generator.
//!
//! # Example
//!
//! ```ignore
//! use lw_lotto::TicketSetGenerator;
//!
//! let generator = TicketSetGenerator::default(); // 5 of 50, 2 of 10
//! let tickets = generator.generate(&mut rand::rng(), 3)?;
//! assert_eq!(tickets.len(), 3);
//! println!("{}", tickets.render());
//! ```

mod sampler;
mod ticket;

pub use sampler::sample;
pub use ticket::{FieldSpec, LINE_BREAK, Ticket, TicketSet, TicketSetGenerator};

/// Lottery draw error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LottoError {
    /// More distinct numbers requested than the range holds.
    #[error("Cannot draw {count} distinct numbers from 1..={max}")]
    InvalidRange {
        /// Requested number of values.
        count: usize,
        /// Upper bound of the range.
        max: u32,
    },
}
