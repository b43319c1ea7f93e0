//! `lw lotto` command implementation.
//!
//! Draws tickets with the configured field shapes and prints them, one per
//! line, without touching the page store.

use std::path::PathBuf;

use clap::Args;
use lw_config::Config;
use lw_lotto::{FieldSpec, TicketSet, TicketSetGenerator};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the lotto command.
#[derive(Args)]
pub(crate) struct LottoArgs {
    /// Path to configuration file (default: auto-discover lw.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of tickets to draw.
    #[arg(short = 'n', long, default_value_t = 1)]
    tickets: usize,

    /// Seed for a reproducible draw.
    #[arg(long)]
    seed: Option<u64>,
}

impl LottoArgs {
    /// Execute the lotto command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the ticket count exceeds
    /// `lotto.max_tickets`.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = Config::load(self.config.as_deref(), None)?;

        check_ticket_count(self.tickets, config.lotto.max_tickets)?;

        let generator = generator_from_config(&config)?;
        output.heading(&format!("Drawing {} ticket(s)", self.tickets));
        output.field("Main numbers", generator.main());
        output.field("Bonus numbers", generator.bonus());

        let seed = self.seed.unwrap_or_else(|| rand::rng().random());
        tracing::debug!(seed, "Seeding ticket draw");
        for ticket in &draw(&generator, self.tickets, seed)? {
            output.result(ticket);
        }

        Ok(())
    }
}

/// Refuse ticket counts above `lotto.max_tickets`.
fn check_ticket_count(tickets: usize, max_tickets: usize) -> Result<(), CliError> {
    if tickets > max_tickets {
        return Err(CliError::Validation(format!(
            "Cannot draw {tickets} tickets (lotto.max_tickets is {max_tickets})"
        )));
    }
    Ok(())
}

/// Build a ticket generator from the `[lotto]` section.
fn generator_from_config(config: &Config) -> Result<TicketSetGenerator, CliError> {
    let lotto = &config.lotto;
    Ok(TicketSetGenerator::new(
        FieldSpec::new(lotto.main_count, lotto.main_max),
        FieldSpec::new(lotto.bonus_count, lotto.bonus_max),
    )?)
}

/// Draw `tickets` tickets from a generator seeded with `seed`.
fn draw(generator: &TicketSetGenerator, tickets: usize, seed: u64) -> Result<TicketSet, CliError> {
    let mut rng = StdRng::seed_from_u64(seed);
    Ok(generator.generate(&mut rng, tickets)?)
}
