//! Request path routing.
//!
//! Paths have the fixed shape `/<verb>/<title>`, where the verb comes from a
//! configured allow-list and the title is one or more ASCII letters or digits.
//! The root path `/` is the only other routable path and always maps to the
//! index page.
//!
//! ```text
//! "/"              → index handler, title "index"
//! "/view/test1"    → view handler,  title "test1"
//! "/view/"         → no match (empty title)
//! "/view/te st"    → no match (disallowed character)
//! "/view/a/b"      → no match (extra segment)
//! "/delete/test1"  → no match (unknown verb)
//! ```

use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// Title the root path resolves to.
pub const INDEX_TITLE: &str = "index";

/// Route verbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Verb {
    /// Render a stored page.
    View,
    /// Show the edit form for a page.
    Edit,
    /// Persist a page body.
    Save,
    /// Generate lottery tickets.
    Lotto,
}

impl Verb {
    /// Every verb, in path-segment order.
    pub const ALL: [Self; 4] = [Self::View, Self::Edit, Self::Save, Self::Lotto];

    /// Parse a verb from its path segment.
    ///
    /// Returns None if the segment is not a known verb.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "view" => Some(Self::View),
            "edit" => Some(Self::Edit),
            "save" => Some(Self::Save),
            "lotto" => Some(Self::Lotto),
            _ => None,
        }
    }

    /// Path segment for this verb.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Edit => "edit",
            Self::Save => "save",
            Self::Lotto => "lotto",
        }
    }

    /// URL path addressing `title` with this verb.
    #[must_use]
    pub fn path_for(self, title: &str) -> String {
        format!("/{}/{title}", self.as_str())
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check that `title` is a routable page title (`[A-Za-z0-9]+`).
#[must_use]
pub fn is_valid_title(title: &str) -> bool {
    !title.is_empty() && title.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// A successfully matched `/<verb>/<title>` path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    /// Matched verb.
    pub verb: Verb,
    /// Extracted page title.
    pub title: String,
}

/// Validates request paths against the accepted verbs.
#[derive(Debug, Clone)]
pub struct PathMatcher {
    verbs: BTreeSet<Verb>,
}

impl Default for PathMatcher {
    /// Accepts every verb.
    fn default() -> Self {
        Self::new(Verb::ALL)
    }
}

impl PathMatcher {
    /// Create a matcher accepting `verbs`.
    #[must_use]
    pub fn new(verbs: impl IntoIterator<Item = Verb>) -> Self {
        Self {
            verbs: verbs.into_iter().collect(),
        }
    }

    /// Whether `verb` is accepted.
    #[must_use]
    pub fn accepts(&self, verb: Verb) -> bool {
        self.verbs.contains(&verb)
    }

    /// Match `path` against `/<verb>/<title>`.
    ///
    /// Returns None for any other shape, for verbs outside the accepted set, and
    /// for titles that are empty or contain anything but ASCII letters and digits.
    #[must_use]
    pub fn match_path(&self, path: &str) -> Option<RouteMatch> {
        let (verb, title) = path.strip_prefix('/')?.split_once('/')?;
        let verb = Verb::parse(verb).filter(|v| self.accepts(*v))?;
        is_valid_title(title).then(|| RouteMatch {
            verb,
            title: title.to_owned(),
        })
    }
}

/// Routing failure. Always terminal: no handler runs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    /// The path is not `/` and not a valid `/<verb>/<title>`.
    #[error("No route for path: {0}")]
    NoMatch(String),
    /// The verb is accepted but no handler is registered for it.
    #[error("No handler registered for verb: {0}")]
    Unhandled(Verb),
}

/// Resolved handler and the title it should be invoked with.
#[derive(Debug, PartialEq, Eq)]
pub struct Dispatch<'a, H> {
    /// Handler to invoke.
    pub handler: &'a H,
    /// Page title extracted from the path (`"index"` for `/`).
    pub title: String,
}

/// Maps request paths to handlers.
///
/// The root path always resolves to the index handler, whatever verbs the
/// matcher accepts. Every other path goes through the [`PathMatcher`] and then
/// the verb → handler table.
#[derive(Debug, Clone)]
pub struct Dispatcher<H> {
    matcher: PathMatcher,
    index: H,
    handlers: HashMap<Verb, H>,
}

impl<H> Dispatcher<H> {
    /// Create a dispatcher with an index handler and no verb handlers.
    #[must_use]
    pub fn new(matcher: PathMatcher, index: H) -> Self {
        Self {
            matcher,
            index,
            handlers: HashMap::new(),
        }
    }

    /// Register the handler for `verb`, replacing any previous one.
    #[must_use]
    pub fn route(mut self, verb: Verb, handler: H) -> Self {
        self.handlers.insert(verb, handler);
        self
    }

    /// Resolve `path` to a handler and title.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::NoMatch`] if the path doesn't match, or
    /// [`RouteError::Unhandled`] if the matched verb has no handler.
    pub fn dispatch(&self, path: &str) -> Result<Dispatch<'_, H>, RouteError> {
        if path == "/" {
            return Ok(Dispatch {
                handler: &self.index,
                title: INDEX_TITLE.to_owned(),
            });
        }

        let RouteMatch { verb, title } = self
            .matcher
            .match_path(path)
            .ok_or_else(|| RouteError::NoMatch(path.to_owned()))?;
        let handler = self
            .handlers
            .get(&verb)
            .ok_or(RouteError::Unhandled(verb))?;
        Ok(Dispatch { handler, title })
    }
}
