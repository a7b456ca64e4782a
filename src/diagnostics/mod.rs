//! The diagnostic sink interface and the plain-text renderer that makes it
//! testable.
//!
//! Two axes of error live in the core:
//!
//! - *construction/resource errors* — file open/stat/read failure, or
//!   querying an empty [`crate::lexer::Reader`] — fail the operation
//!   outright via a `Result`, no diagnostic involved.
//! - *lexical errors* — unterminated literals, bad escapes, and the like —
//!   are reported through a [`DiagnosticSink`] and lexing continues. The
//!   lexer never inspects severity to change behaviour; it only reports.

mod severity;

pub mod codes;
pub mod render;

pub use severity::Severity;

use crate::position::Span;
use codes::ErrorCode;

/// One diagnostic record. Built with the `with_*` methods, then handed to
/// a [`DiagnosticSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    severity: Severity,
    code: &'static ErrorCode,
    file: String,
    span: Span,
    message: String,
    /// The physical source line the span starts on, captured eagerly from
    /// the owning `Stream` at report time, plus where within it to draw the
    /// `^~~~` caret.
    line_anchor: Option<String>,
    caret_column: usize,
    caret_length: usize,
}

impl Diagnostic {
    pub fn new(
        severity: Severity,
        code: &'static ErrorCode,
        file: impl Into<String>,
        span: Span,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            code,
            file: file.into(),
            span,
            message: message.into(),
            line_anchor: None,
            caret_column: span.start.column,
            caret_length: 1,
        }
    }

    pub fn with_line_anchor(mut self, line_text: impl Into<String>, caret_length: usize) -> Self {
        self.line_anchor = Some(line_text.into());
        self.caret_length = caret_length.max(1);
        self
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn code(&self) -> &'static ErrorCode {
        self.code
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn line_anchor(&self) -> Option<&str> {
        self.line_anchor.as_deref()
    }

    pub fn caret_column(&self) -> usize {
        self.caret_column
    }

    pub fn caret_length(&self) -> usize {
        self.caret_length
    }
}

/// The sink the lexer reports through. The lexer never branches on the
/// result of a report — it is purely an observer.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

/// A sink that simply keeps every diagnostic it is handed, in report
/// order. The natural choice for tests and for callers who render once at
/// the end of a translation unit.
#[derive(Debug, Default, Clone)]
pub struct CollectingSink {
    diagnostics: Vec<Diagnostic>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity() == Severity::Error)
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}

/// A sink that discards everything. Useful when a caller truly does not
/// care about diagnostics (e.g. a throwaway lookahead lexer).
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn report(&mut self, _diagnostic: Diagnostic) {}
}
