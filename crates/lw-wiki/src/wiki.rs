//! Page handlers.
//!
//! [`Wiki`] implements the index, view, edit, save and lotto handlers on top of
//! a [`PageStore`]. Handlers return an [`Outcome`]: a page to render with a
//! template, or a redirect. Missing pages never surface as errors; they turn
//! into a redirect (view) or an empty page (edit).

use std::sync::{Arc, Mutex, PoisonError};

use lw_lotto::TicketSetGenerator;
use lw_storage::PageStore;
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

use crate::error::WikiError;
use crate::index::regenerate_index;
use crate::page::Page;
use crate::routing::{INDEX_TITLE, Verb};
use crate::template::Template;

/// Title the ticket listing is stored under.
pub const LOTTO_TITLE: &str = "lotto";

/// Default upper bound on tickets per lotto request.
pub const DEFAULT_MAX_TICKETS: usize = 100;

/// Result of a handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Render `page` with `template`.
    Render(Template, Page),
    /// Redirect to a URL path.
    Redirect(String),
}

/// Wiki handlers over a page store.
pub struct Wiki {
    store: Arc<dyn PageStore>,
    generator: TicketSetGenerator,
    max_tickets: usize,
    rng: Mutex<StdRng>,
}

impl Wiki {
    /// Create handlers over `store` with the default 5-of-50 / 2-of-10 ticket
    /// fields and an entropy-seeded random source.
    #[must_use]
    pub fn new(store: Arc<dyn PageStore>) -> Self {
        Self {
            store,
            generator: TicketSetGenerator::default(),
            max_tickets: DEFAULT_MAX_TICKETS,
            rng: Mutex::new(StdRng::seed_from_u64(rand::rng().random())),
        }
    }

    /// Use a different ticket generator.
    #[must_use]
    pub fn with_generator(mut self, generator: TicketSetGenerator) -> Self {
        self.generator = generator;
        self
    }

    /// Set the upper bound on tickets per request.
    #[must_use]
    pub fn with_max_tickets(mut self, max_tickets: usize) -> Self {
        self.max_tickets = max_tickets;
        self
    }

    /// Replace the random source (e.g., with a seeded generator in tests).
    #[must_use]
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = Mutex::new(rng);
        self
    }

    /// Underlying page store.
    #[must_use]
    pub fn store(&self) -> &dyn PageStore {
        self.store.as_ref()
    }

    /// Rebuild the index page from the store listing and render it.
    ///
    /// # Errors
    ///
    /// Returns [`WikiError::Storage`] if listing or saving fails.
    pub fn index(&self) -> Result<Outcome, WikiError> {
        tracing::debug!("Index handler");
        regenerate_index(self.store())?;
        Ok(Outcome::Render(Template::Index, self.reload(INDEX_TITLE)))
    }

    /// Render a page, or redirect to its edit form if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns [`WikiError::Storage`] if the page exists but can't be read.
    pub fn view(&self, title: &str) -> Result<Outcome, WikiError> {
        tracing::debug!(title, "View handler");
        match Page::load(self.store(), title) {
            Ok(page) => Ok(Outcome::Render(Template::View, page)),
            Err(e) if e.is_not_found() => Ok(Outcome::Redirect(Verb::Edit.path_for(title))),
            Err(e) => Err(e.into()),
        }
    }

    /// Render the edit form for a page, starting empty if the page doesn't exist.
    pub fn edit(&self, title: &str) -> Outcome {
        tracing::debug!(title, "Edit handler");
        let page = Page::load(self.store(), title).unwrap_or_else(|e| {
            if !e.is_not_found() {
                tracing::warn!(title, error = %e, "Failed to load page for editing");
            }
            Page::empty(title)
        });
        Outcome::Render(Template::Edit, page)
    }

    /// Overwrite a page body and redirect to the page.
    ///
    /// # Errors
    ///
    /// Returns [`WikiError::Storage`] if the write fails.
    pub fn save(&self, title: &str, body: impl Into<Vec<u8>>) -> Result<Outcome, WikiError> {
        tracing::debug!(title, "Save handler");
        Page::new(title, body).save(self.store())?;
        Ok(Outcome::Redirect(Verb::View.path_for(title)))
    }

    /// Draw tickets, store them as the `lotto` page and render it.
    ///
    /// `count` is the decimal ticket count taken from the path.
    ///
    /// # Errors
    ///
    /// Returns [`WikiError::InvalidTicketCount`] or [`WikiError::TooManyTickets`]
    /// for a bad count, [`WikiError::Lotto`] if a field can't be drawn, and
    /// [`WikiError::Storage`] if saving fails.
    pub fn lotto(&self, count: &str) -> Result<Outcome, WikiError> {
        tracing::debug!(count, "Lotto handler");
        let ticket_count = self.parse_ticket_count(count)?;

        let tickets = {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            self.generator.generate(&mut *rng, ticket_count)?
        };

        Page::new(LOTTO_TITLE, tickets.render()).save(self.store())?;
        Ok(Outcome::Render(Template::Lotto, self.reload(LOTTO_TITLE)))
    }

    /// Parse a ticket count and check it against the configured maximum.
    fn parse_ticket_count(&self, count: &str) -> Result<usize, WikiError> {
        let requested: usize = count
            .parse()
            .map_err(|_| WikiError::InvalidTicketCount(count.to_owned()))?;
        if requested > self.max_tickets {
            return Err(WikiError::TooManyTickets {
                requested,
                max: self.max_tickets,
            });
        }
        Ok(requested)
    }

    /// Load a page that was just written, falling back to an empty page.
    fn reload(&self, title: &str) -> Page {
        Page::load(self.store(), title).unwrap_or_else(|e| {
            tracing::warn!(title, error = %e, "Failed to reload page");
            Page::empty(title)
        })
    }
}
