//! Application state.
//!
//! Shared state for all request handlers.

use lw_assets::AssetSource;
use lw_wiki::{Dispatcher, HtmlRenderer, PathMatcher, Verb, Wiki};

use crate::handlers::Action;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Page handlers over the page store.
    pub(crate) wiki: Wiki,
    /// Renders handler outcomes into HTML.
    pub(crate) renderer: HtmlRenderer,
    /// Maps request paths to actions.
    pub(crate) dispatcher: Dispatcher<Action>,
    /// Static assets served under `/static/`.
    pub(crate) assets: AssetSource,
}

impl AppState {
    /// Build state with an action registered for every verb.
    ///
    /// Which verbs are reachable is decided by `matcher`.
    pub(crate) fn new(wiki: Wiki, matcher: PathMatcher, assets: AssetSource) -> Self {
        let dispatcher = Verb::ALL
            .into_iter()
            .fold(Dispatcher::new(matcher, Action::Index), |d, verb| {
                d.route(verb, Action::for_verb(verb))
            });
        Self {
            wiki,
            renderer: HtmlRenderer::default(),
            dispatcher,
            assets,
        }
    }
}
