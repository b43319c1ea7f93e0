//! HTTP request handlers.

pub(crate) mod pages;

use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use lw_wiki::{HtmlRenderer, Outcome, Verb};

/// Handler registered in the dispatcher for the root path and each verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    Index,
    View,
    Edit,
    Save,
    Lotto,
}

impl Action {
    /// Action serving `verb`.
    pub(crate) fn for_verb(verb: Verb) -> Self {
        match verb {
            Verb::View => Self::View,
            Verb::Edit => Self::Edit,
            Verb::Save => Self::Save,
            Verb::Lotto => Self::Lotto,
        }
    }
}

/// Turn a handler outcome into an HTML page or a 302 redirect.
pub(crate) fn outcome_response(renderer: &HtmlRenderer, outcome: Outcome) -> Response {
    match outcome {
        Outcome::Render(template, page) => {
            tracing::debug!(template = template.name(), "Rendering page");
            Html(renderer.render(template, &page)).into_response()
        }
        Outcome::Redirect(location) => {
            (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
        }
    }
}
