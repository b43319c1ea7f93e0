//! Page routing, handlers and rendering for LW.
//!
//! # Architecture
//!
//! ```text
//! request path ──► Dispatcher ──► PathMatcher ──► (verb, title)
//!                      │                               │
//!                      └── "/" ──► index ──────────────┤
//!                                                      ▼
//!                                  Wiki handler (index/view/edit/save/lotto)
//!                                        │                │
//!                                        ▼                ▼
//!                                   PageStore     TicketSetGenerator
//!                                        │
//!                                        ▼
//!                           Outcome ──► HtmlRenderer / redirect
//! ```
//!
//! The dispatcher is generic over its handler type, so the HTTP layer decides
//! what a handler is; [`Wiki`] provides the handler logic itself.

mod error;
mod index;
mod page;
pub mod routing;
mod template;
mod wiki;

pub use error::WikiError;
pub use index::{regenerate_index, render_index};
pub use page::Page;
pub use routing::{
    Dispatch, Dispatcher, INDEX_TITLE, PathMatcher, RouteError, RouteMatch, Verb, is_valid_title,
};
pub use template::{HtmlRenderer, Template};
pub use wiki::{DEFAULT_MAX_TICKETS, LOTTO_TITLE, Outcome, Wiki};
