//! Plain-text rendering of diagnostics.
//!
//! No colour or box-drawing: this module only turns a [`super::Diagnostic`]
//! into the one-line-plus-caret text a terminal or log file can show
//! directly — `file:line:col: severity[code]: message`, followed by the
//! source line and a caret underline when a line anchor was captured.

use super::Diagnostic;
use std::fmt::Write as _;

/// Render one diagnostic as `file:line:col: severity[code]: message`,
/// followed by the source line and a caret underline when a line anchor
/// was captured.
pub fn render(diagnostic: &Diagnostic) -> String {
    let mut out = String::new();
    let start = diagnostic.span().start;

    let _ = writeln!(
        out,
        "{}:{}:{}: {}[{}]: {}",
        diagnostic.file(),
        start.line,
        start.column,
        diagnostic.severity().label(),
        diagnostic.code().code,
        diagnostic.message(),
    );

    if let Some(line) = diagnostic.line_anchor() {
        let _ = writeln!(out, "{line}");
        let caret_column = diagnostic.caret_column().max(1);
        let mut caret = String::with_capacity(caret_column + diagnostic.caret_length());
        for _ in 1..caret_column {
            caret.push(' ');
        }
        caret.push('^');
        for _ in 1..diagnostic.caret_length() {
            caret.push('~');
        }
        let _ = writeln!(out, "{caret}");
    }

    out
}

/// Render a batch of diagnostics, double-newline separated.
pub fn render_all(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(render)
        .collect::<Vec<_>>()
        .join("\n")
}
