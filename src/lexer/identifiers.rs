//! Identifier scanning, including universal-character-name (`\uXXXX`,
//! `\UXXXXXXXX`) continuation characters.
//!
//! Identifiers are, for this core's purposes, ASCII letters/digits/`_`,
//! a permissive `$` extension most implementations accept, the high bytes
//! `0x80..=0xFD` (pre-Unicode extended character sets some source still
//! uses), and UCNs. A UCN decodes to a Unicode scalar value that gets
//! appended to the identifier text as UTF-8, in place, exactly where the
//! `\u`/`\U` sequence appeared.

use crate::diagnostics::{Diagnostic, DiagnosticSink, Severity, codes};
use crate::lexer::encoding::append_utf8;
use crate::lexer::options::LexerOptions;
use crate::lexer::reader::Reader;
use crate::position::Span;

pub fn is_identifier_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b == b'$' || (0x80..=0xFD).contains(&b)
}

pub fn is_identifier_continue(b: u8) -> bool {
    is_identifier_start(b) || b.is_ascii_digit()
}

/// Scan the remainder of an identifier whose first byte, `first`, has
/// already been consumed from `reader`. Returns the decoded identifier
/// text as raw bytes (UCNs are appended as UTF-8; everything else is
/// copied through verbatim, including any non-UTF-8 high bytes).
pub fn scan(first: u8, reader: &mut Reader, options: LexerOptions, sink: &mut dyn DiagnosticSink) -> Vec<u8> {
    let mut out = Vec::new();

    if first == b'\\' {
        if !try_ucn(&mut out, reader, options, sink) {
            // Not actually a UCN; the caller guarantees `first` only ever
            // arrives as `\\` when a `u`/`U` lookahead already confirmed
            // this is an identifier start, so this branch is unreachable
            // in practice. Fall back to treating it as a literal byte.
            out.push(first);
        }
    } else {
        out.push(first);
    }

    out.extend(scan_continuation(reader, options, sink));
    out
}

/// Scan zero or more further identifier-continue bytes (and continuation
/// UCNs), with no initial byte of its own. Used when the caller has
/// already consumed a multi-byte prefix that turned out not to be a
/// literal encoding prefix (e.g. `u8` that isn't followed by `"`).
pub fn scan_continuation(reader: &mut Reader, options: LexerOptions, sink: &mut dyn DiagnosticSink) -> Vec<u8> {
    let mut out = Vec::new();
    loop {
        match reader.peek() {
            Some(b) if is_identifier_continue(b) => {
                reader.try_char(b, options, sink);
                out.push(b);
            }
            Some(b'\\') => {
                reader.try_char(b'\\', options, sink);
                if !try_ucn(&mut out, reader, options, sink) {
                    reader.unget(b'\\');
                    break;
                }
            }
            _ => break,
        }
    }
    out
}

/// Attempt to decode a UCN assuming the leading `\` has already been
/// consumed. Returns `false` (consuming nothing further) if what follows
/// is not `u`/`U`, so the caller can unget the backslash.
fn try_ucn(out: &mut Vec<u8>, reader: &mut Reader, options: LexerOptions, sink: &mut dyn DiagnosticSink) -> bool {
    let digit_count = match reader.peek() {
        Some(b'u') => {
            reader.try_char(b'u', options, sink);
            4
        }
        Some(b'U') => {
            reader.try_char(b'U', options, sink);
            8
        }
        _ => return false,
    };

    let mut value: u32 = 0;
    let mut seen = 0;
    while seen < digit_count {
        match reader.peek().and_then(|b| (b as char).to_digit(16)) {
            Some(digit) => {
                let b = reader.peek().unwrap();
                reader.try_char(b, options, sink);
                value = value * 16 + digit;
                seen += 1;
            }
            None => break,
        }
    }

    if seen != digit_count {
        report_invalid_ucn(reader, sink, "incomplete universal character name");
        return true;
    }

    if !append_utf8(out, value) {
        report_invalid_ucn(reader, sink, "universal character name out of range");
    }

    true
}

fn report_invalid_ucn(reader: &Reader, sink: &mut dyn DiagnosticSink, message: &str) {
    let pos = reader.position();
    let diag = Diagnostic::new(
        Severity::Error,
        &codes::INVALID_UCN,
        reader.filename_text(),
        Span::new(pos, pos),
        message,
    )
    .with_line_anchor(reader.linenote(), 1);
    sink.report(diag);
}
