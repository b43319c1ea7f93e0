//! Wiki page endpoint.
//!
//! Every request outside `/static/` lands here and is resolved by the
//! dispatcher to one of the wiki actions.

use std::sync::Arc;

use axum::Form;
use axum::extract::{FromRequest, Request, State};
use axum::response::Response;
use lw_wiki::Dispatch;
use percent_encoding::percent_decode_str;
use serde::Deserialize;

use crate::error::ServerError;
use crate::handlers::{Action, outcome_response};
use crate::state::AppState;

/// Form submitted by the edit page.
#[derive(Debug, Default, Deserialize)]
struct SaveForm {
    /// New page body; a missing field saves an empty page.
    #[serde(default)]
    body: String,
}

/// Dispatch a request path to its wiki action.
///
/// The path is percent-decoded before matching, so `/view/%61lpha` is
/// `/view/alpha`. Bytes that don't decode to UTF-8 never match a title.
///
/// Save reads the `body` field from a URL-encoded form, or from the query
/// string on GET.
pub(crate) async fn handle_page(
    State(state): State<Arc<AppState>>,
    req: Request,
) -> Result<Response, ServerError> {
    let path = percent_decode_str(req.uri().path())
        .decode_utf8_lossy()
        .into_owned();
    let Dispatch { handler, title } = state.dispatcher.dispatch(&path)?;
    tracing::debug!(%path, action = ?handler, "Dispatching request");

    let outcome = match *handler {
        Action::Index => state.wiki.index()?,
        Action::View => state.wiki.view(&title)?,
        Action::Edit => state.wiki.edit(&title),
        Action::Save => {
            let Form(form) = Form::<SaveForm>::from_request(req, &state).await?;
            state.wiki.save(&title, form.body)?
        }
        Action::Lotto => state.wiki.lotto(&title)?,
    };

    Ok(outcome_response(&state.renderer, outcome))
}
