//! HTML page templates.
//!
//! Titles are always escaped. Page bodies are stored markup and are emitted raw
//! by every template except `edit`, which escapes the body inside its textarea.

use std::fmt::Write;

use crate::page::Page;
use crate::routing::Verb;

/// Page templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    /// Rendered page with an edit link.
    View,
    /// Edit form posting to `/save/<title>`.
    Edit,
    /// Page listing.
    Index,
    /// Ticket listing with draw links.
    Lotto,
}

impl Template {
    /// Template name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Edit => "edit",
            Self::Index => "index",
            Self::Lotto => "lotto",
        }
    }
}

/// Ticket counts offered as links on the lotto page.
const LOTTO_CHOICES: [u32; 4] = [1, 5, 10, 20];

/// Default stylesheet location.
const DEFAULT_STYLESHEET: &str = "/static/style.css";

/// Renders pages into complete HTML documents.
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    stylesheet: String,
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self {
            stylesheet: DEFAULT_STYLESHEET.to_owned(),
        }
    }
}

impl HtmlRenderer {
    /// Create a renderer linking the given stylesheet.
    #[must_use]
    pub fn new(stylesheet: impl Into<String>) -> Self {
        Self {
            stylesheet: stylesheet.into(),
        }
    }

    /// Render `page` with `template`.
    #[must_use]
    pub fn render(&self, template: Template, page: &Page) -> String {
        let title = escape(&page.title);
        let mut html = String::with_capacity(1024 + page.body.len());

        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        html.push_str("<meta charset=\"utf-8\">\n");
        let _ = writeln!(html, "<title>{title}</title>");
        let _ = writeln!(
            html,
            "<link rel=\"stylesheet\" href=\"{}\">",
            escape(&self.stylesheet)
        );
        html.push_str("</head>\n<body>\n");
        let _ = writeln!(
            html,
            "<nav><a href=\"/\">Index</a> | <a href=\"{}\">Lotto</a></nav>",
            Verb::Lotto.path_for("5")
        );

        match template {
            Template::View => {
                let _ = writeln!(html, "<h1>{title}</h1>");
                let _ = writeln!(
                    html,
                    "<p>[<a href=\"{}\">edit</a>]</p>",
                    Verb::Edit.path_for(&title)
                );
                let _ = writeln!(html, "<div class=\"page\">{}</div>", page.body_str());
            }
            Template::Edit => {
                let _ = writeln!(html, "<h1>Editing {title}</h1>");
                let _ = writeln!(
                    html,
                    "<form action=\"{}\" method=\"POST\">",
                    Verb::Save.path_for(&title)
                );
                let _ = writeln!(
                    html,
                    "<div><textarea name=\"body\" rows=\"20\" cols=\"80\">{}</textarea></div>",
                    escape(&page.body_str())
                );
                html.push_str("<div><input type=\"submit\" value=\"Save\"></div>\n</form>\n");
            }
            Template::Index => {
                html.push_str("<h1>Pages</h1>\n");
                let _ = writeln!(html, "<div class=\"index\">{}</div>", page.body_str());
            }
            Template::Lotto => {
                html.push_str("<h1>Lotto</h1>\n<p>Draw:");
                for n in LOTTO_CHOICES {
                    let _ = write!(
                        html,
                        " <a href=\"{}\">{n}</a>",
                        Verb::Lotto.path_for(&n.to_string())
                    );
                }
                html.push_str("</p>\n");
                let _ = writeln!(html, "<div class=\"tickets\">{}</div>", page.body_str());
            }
        }

        html.push_str("</body>\n</html>\n");
        html
    }
}

/// Escape text for HTML element content and attribute values.
fn escape(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}
