//! Index page regeneration.
//!
//! The index page is rebuilt from the store listing on every visit, so it never
//! goes stale without the store having to report changes.

use lw_storage::{PageStore, StorageError};

use crate::page::Page;
use crate::routing::{INDEX_TITLE, Verb, is_valid_title};

/// Render one clickable line per title, concatenated.
///
/// Titles that could never be routed are skipped.
#[must_use]
pub fn render_index(titles: &[String]) -> String {
    titles
        .iter()
        .filter(|title| is_valid_title(title))
        .map(|title| format!("<a href=\"{}\">{title}</a><br>", Verb::View.path_for(title)))
        .collect()
}

/// List the store, save the rendered listing as the `index` page and return it.
///
/// # Errors
///
/// Returns [`StorageError`] if listing or saving fails.
pub fn regenerate_index(store: &dyn PageStore) -> Result<Page, StorageError> {
    let titles = store.list()?;
    tracing::debug!(pages = titles.len(), "Regenerating index");
    let page = Page::new(INDEX_TITLE, render_index(&titles));
    page.save(store)?;
    Ok(page)
}
