//! Colored terminal output utilities.

use std::fmt::Display;

use console::{Style, Term};

/// Width of the label column in [`Output::field`].
const LABEL_WIDTH: usize = 16;

/// Terminal output formatter.
///
/// Status messages go to stderr; command results go to stdout so they can be
/// piped.
pub(crate) struct Output {
    stderr: Term,
    stdout: Term,
    heading: Style,
    label: Style,
    failure: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            stderr: Term::stderr(),
            stdout: Term::stdout(),
            heading: Style::new().cyan().bold(),
            label: Style::new().dim(),
            failure: Style::new().red(),
        }
    }

    /// Print a heading (cyan bold).
    pub(crate) fn heading(&self, msg: &str) {
        let _ = self
            .stderr
            .write_line(&self.heading.apply_to(msg).to_string());
    }

    /// Print an aligned `label  value` line.
    pub(crate) fn field(&self, label: &str, value: impl Display) {
        let label = format!("{label:<LABEL_WIDTH$}");
        let _ = self
            .stderr
            .write_line(&format!("  {} {value}", self.label.apply_to(label)));
    }

    /// Print an error (red).
    pub(crate) fn failure(&self, err: &dyn Display) {
        let _ = self
            .stderr
            .write_line(&self.failure.apply_to(format!("Error: {err}")).to_string());
    }

    /// Print a result line to stdout.
    pub(crate) fn result(&self, line: impl Display) {
        let _ = self.stdout.write_line(&line.to_string());
    }
}
