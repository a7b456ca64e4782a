//! Character-constant and string-literal scanning across all five
//! encodings and the shared escape-sequence grammar.
//!
//! A literal's payload is decoded once, in full, into the byte
//! representation its encoding implies: UTF-8 bytes for plain/`u8`,
//! little-endian UTF-16 code units for `u`, little-endian UTF-32 for `U`
//! and `L` (this core treats wide characters as 32-bit, the common case on
//! the platforms C11 targets). That payload becomes the token's
//! [`Lexeme`](super::lexeme::Lexeme), so a consumer never needs to
//! re-parse escapes.

use crate::diagnostics::{Diagnostic, DiagnosticSink, Severity, codes};
use crate::lexer::encoding::{append_utf16, append_utf32, append_utf8, decode_utf8, utf8_rune_size};
use crate::lexer::options::LexerOptions;
use crate::lexer::reader::Reader;
use crate::lexer::token::Encoding;
use crate::position::Span;

/// Outcome of scanning one char-constant or string-literal body.
pub struct Literal {
    pub bytes: Vec<u8>,
    pub terminated: bool,
}

/// Scan a character constant; `quote` (`'`) has already been consumed.
pub fn scan_char_const(
    encoding: Encoding,
    reader: &mut Reader,
    options: LexerOptions,
    sink: &mut dyn DiagnosticSink,
) -> Literal {
    let literal = scan_body(b'\'', encoding, reader, options, sink);
    if literal.bytes.is_empty() && literal.terminated {
        report(reader, sink, &codes::EMPTY_CHAR_CONST, "empty character constant");
    }
    literal
}

/// Scan a string literal; the opening `"` has already been consumed.
pub fn scan_string_literal(
    encoding: Encoding,
    reader: &mut Reader,
    options: LexerOptions,
    sink: &mut dyn DiagnosticSink,
) -> Literal {
    scan_body(b'"', encoding, reader, options, sink)
}

fn scan_body(
    quote: u8,
    encoding: Encoding,
    reader: &mut Reader,
    options: LexerOptions,
    sink: &mut dyn DiagnosticSink,
) -> Literal {
    let mut bytes = Vec::new();

    loop {
        match reader.peek() {
            None => {
                let code = if quote == b'\'' {
                    &codes::UNTERMINATED_CHAR_CONST
                } else {
                    &codes::UNTERMINATED_STRING_LITERAL
                };
                report(reader, sink, code, "missing terminating quote");
                return Literal { bytes, terminated: false };
            }
            Some(b'\n') => {
                let code = if quote == b'\'' {
                    &codes::UNTERMINATED_CHAR_CONST
                } else {
                    &codes::UNTERMINATED_STRING_LITERAL
                };
                report(reader, sink, code, "missing terminating quote before end of line");
                return Literal { bytes, terminated: false };
            }
            Some(q) if q == quote => {
                reader.try_char(q, options, sink);
                return Literal { bytes, terminated: true };
            }
            Some(b'\\') => {
                reader.try_char(b'\\', options, sink);
                match decode_escape(reader, options, sink) {
                    Escape::Narrow(byte) if encoding == Encoding::Plain => bytes.push(byte),
                    Escape::Narrow(byte) => append_rune(&mut bytes, encoding, byte as u32),
                    Escape::Scalar(rune) => append_rune(&mut bytes, encoding, rune),
                }
            }
            Some(b) if b < 0x80 => {
                reader.try_char(b, options, sink);
                append_rune(&mut bytes, encoding, b as u32);
            }
            Some(lead) => {
                let rune = read_source_rune(lead, reader, options, sink);
                append_rune(&mut bytes, encoding, rune);
            }
        }
    }
}

/// Read one Unicode scalar value out of the source text itself (as opposed
/// to a `\`-escape), which may span several UTF-8 bytes; `lead` has been
/// peeked but not yet consumed. Falls back to treating `lead` as its own
/// rune if what follows isn't a well-formed continuation, rather than
/// stalling the scan on malformed input.
fn read_source_rune(lead: u8, reader: &mut Reader, options: LexerOptions, sink: &mut dyn DiagnosticSink) -> u32 {
    reader.try_char(lead, options, sink);

    let len = match utf8_rune_size(lead) {
        Some(len) if len > 1 => len,
        _ => return lead as u32,
    };

    let mut buf = vec![lead];
    for _ in 1..len {
        match reader.peek() {
            Some(cont) if (0x80..0xC0).contains(&cont) => {
                reader.try_char(cont, options, sink);
                buf.push(cont);
            }
            _ => break,
        }
    }

    match decode_utf8(&buf) {
        Some((rune, consumed)) if consumed == buf.len() => rune,
        _ => lead as u32,
    }
}

fn append_rune(out: &mut Vec<u8>, encoding: Encoding, rune: u32) {
    match encoding {
        Encoding::Plain | Encoding::Utf8 => {
            append_utf8(out, rune);
        }
        Encoding::Char16 => append_utf16(out, rune),
        Encoding::Wide | Encoding::Char32 => append_utf32(out, rune),
    }
}

/// The decoded result of one escape sequence: either a raw execution-set
/// byte (`\x`, octal — these name a single `unsigned char`/`wchar_t` unit
/// in the narrow case, not a Unicode scalar value to re-encode) or a
/// genuine Unicode scalar value (named escapes, which all sit below 0x80
/// anyway, and UCNs, which explicitly denote a codepoint).
enum Escape {
    Narrow(u8),
    Scalar(u32),
}

/// Decode one escape sequence, assuming the leading `\` has already been
/// consumed. Always makes forward progress.
fn decode_escape(reader: &mut Reader, options: LexerOptions, sink: &mut dyn DiagnosticSink) -> Escape {
    let Some(c) = reader.peek() else {
        report(reader, sink, &codes::UNTERMINATED_STRING_LITERAL, "missing terminating quote");
        return Escape::Scalar(0);
    };

    match c {
        b'\'' | b'"' | b'?' | b'\\' => {
            reader.try_char(c, options, sink);
            Escape::Scalar(c as u32)
        }
        b'a' => consume_and(reader, options, sink, c, 0x07),
        b'b' => consume_and(reader, options, sink, c, 0x08),
        b'f' => consume_and(reader, options, sink, c, 0x0C),
        b'n' => consume_and(reader, options, sink, c, 0x0A),
        b'r' => consume_and(reader, options, sink, c, 0x0D),
        b't' => consume_and(reader, options, sink, c, 0x09),
        b'v' => consume_and(reader, options, sink, c, 0x0B),
        b'e' | b'E' => consume_and(reader, options, sink, c, 0x1B),
        b'x' => {
            reader.try_char(c, options, sink);
            Escape::Narrow(decode_hex_escape(reader, options, sink))
        }
        b'u' => {
            reader.try_char(c, options, sink);
            Escape::Scalar(decode_ucn_escape(reader, options, sink, 4))
        }
        b'U' => {
            reader.try_char(c, options, sink);
            Escape::Scalar(decode_ucn_escape(reader, options, sink, 8))
        }
        b'0'..=b'7' => Escape::Narrow(decode_octal_escape(reader, options, sink)),
        other => {
            reader.try_char(other, options, sink);
            report(
                reader,
                sink,
                &codes::UNKNOWN_ESCAPE_SEQUENCE,
                &format!("unknown escape sequence '\\{}'", other as char),
            );
            Escape::Scalar(other as u32)
        }
    }
}

fn consume_and(
    reader: &mut Reader,
    options: LexerOptions,
    sink: &mut dyn DiagnosticSink,
    c: u8,
    value: u32,
) -> Escape {
    reader.try_char(c, options, sink);
    Escape::Scalar(value)
}

/// `\x` followed by one or more hex digits, consumed greedily and
/// truncated to the low byte — the single `unsigned char` the narrow
/// execution character set can hold.
fn decode_hex_escape(reader: &mut Reader, options: LexerOptions, sink: &mut dyn DiagnosticSink) -> u8 {
    let mut value: u8 = 0;
    let mut digits = 0;
    while let Some(digit) = reader.peek().and_then(|b| (b as char).to_digit(16)) {
        let b = reader.peek().unwrap();
        reader.try_char(b, options, sink);
        value = value.wrapping_mul(16).wrapping_add(digit as u8);
        digits += 1;
    }
    if digits == 0 {
        report(reader, sink, &codes::HEX_ESCAPE_NO_DIGITS, "\\x used with no following hex digits");
    }
    value
}

fn decode_octal_escape(reader: &mut Reader, options: LexerOptions, sink: &mut dyn DiagnosticSink) -> u8 {
    let mut value: u8 = 0;
    let mut digits = 0;
    while digits < 3 {
        match reader.peek() {
            Some(d @ b'0'..=b'7') => {
                reader.try_char(d, options, sink);
                value = value.wrapping_mul(8).wrapping_add(d - b'0');
                digits += 1;
            }
            _ => break,
        }
    }
    value
}

fn decode_ucn_escape(
    reader: &mut Reader,
    options: LexerOptions,
    sink: &mut dyn DiagnosticSink,
    digit_count: usize,
) -> u32 {
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
        report(reader, sink, &codes::INVALID_UCN, "incomplete universal character name");
    }
    value
}

fn report(reader: &Reader, sink: &mut dyn DiagnosticSink, code: &'static codes::ErrorCode, message: &str) {
    let pos = reader.position();
    let diag = Diagnostic::new(Severity::Error, code, reader.filename_text(), Span::new(pos, pos), message)
        .with_line_anchor(reader.linenote(), 1);
    sink.report(diag);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::CollectingSink;
    use crate::interner::Interner;
    use crate::lexer::reader::{Reader, StreamSpec};

    fn scan_string(src: &str, encoding: Encoding) -> (Vec<u8>, bool, usize) {
        let mut pool = Interner::new();
        let mut reader = Reader::new();
        reader
            .push(&mut pool, StreamSpec::String { name: "<s>", bytes: src.as_bytes() })
            .unwrap();
        let opts = LexerOptions::default();
        let mut sink = CollectingSink::new();
        assert_eq!(reader.get(opts, &mut sink), Some(b'"'));
        let literal = scan_string_literal(encoding, &mut reader, opts, &mut sink);
        (literal.bytes, literal.terminated, sink.diagnostics().len())
    }

    #[test]
    fn plain_string_decodes_simple_escapes() {
        let (bytes, terminated, errs) = scan_string(r#""a\nb""#, Encoding::Plain);
        assert!(terminated);
        assert_eq!(errs, 0);
        assert_eq!(String::from_utf8(bytes).unwrap(), "a\nb");
    }

    #[test]
    fn utf8_string_round_trips_non_ascii() {
        let (bytes, terminated, errs) = scan_string("\"h\u{e9}llo\"", Encoding::Utf8);
        assert!(terminated);
        assert_eq!(errs, 0);
        assert_eq!(String::from_utf8(bytes).unwrap(), "h\u{e9}llo");
    }

    #[test]
    fn unterminated_string_reports_and_stops_at_newline() {
        let (_bytes, terminated, errs) = scan_string("\"abc\ndef\"", Encoding::Plain);
        assert!(!terminated);
        assert_eq!(errs, 1);
    }

    #[test]
    fn hex_escape_with_no_digits_reports_error() {
        let (_bytes, _terminated, errs) = scan_string(r#""\x""#, Encoding::Plain);
        assert_eq!(errs, 1);
    }

    #[test]
    fn octal_escape_stops_after_three_digits() {
        let (bytes, terminated, errs) = scan_string(r#""\101""#, Encoding::Plain);
        assert!(terminated);
        assert_eq!(errs, 0);
        assert_eq!(bytes, b"A");
    }

    #[test]
    fn narrow_hex_escape_above_ascii_is_a_single_raw_byte_not_utf8() {
        let (bytes, terminated, errs) = scan_string(r#""\xff""#, Encoding::Plain);
        assert!(terminated);
        assert_eq!(errs, 0);
        assert_eq!(bytes, vec![0xFFu8]);
    }

    #[test]
    fn narrow_octal_escape_above_ascii_is_a_single_raw_byte_not_utf8() {
        let (bytes, terminated, errs) = scan_string(r#""\377""#, Encoding::Plain);
        assert!(terminated);
        assert_eq!(errs, 0);
        assert_eq!(bytes, vec![0xFFu8]);
    }

    #[test]
    fn utf16_encoding_emits_surrogate_pair_for_supplementary_plane() {
        let (bytes, terminated, errs) = scan_string("\"\u{1F600}\"", Encoding::Char16);
        assert!(terminated);
        assert_eq!(errs, 0);
        assert_eq!(bytes.len(), 4);
    }

    #[test]
    fn empty_char_const_reports_diagnostic() {
        let mut pool = Interner::new();
        let mut reader = Reader::new();
        reader
            .push(&mut pool, StreamSpec::String { name: "<s>", bytes: b"''" })
            .unwrap();
        let opts = LexerOptions::default();
        let mut sink = CollectingSink::new();
        assert_eq!(reader.get(opts, &mut sink), Some(b'\''));
        let literal = scan_char_const(Encoding::Plain, &mut reader, opts, &mut sink);
        assert!(literal.terminated);
        assert_eq!(sink.diagnostics().len(), 1);
        assert_eq!(sink.diagnostics()[0].code().code, "C003");
    }
}
