//! pp-number scanning.
//!
//! The pp-number production is deliberately loose — it over-accepts so
//! that every valid numeric constant (integer, floating, hex-float) is a
//! single pp-number token, leaving the actual digit-grammar validation to
//! a later translation phase this core does not perform. This scanner
//! follows that permissive reading rather than tightening it: any run of
//! digits, identifier characters, `.`, and `'` (C23 digit separator,
//! harmless to accept early) continues the token, with the one
//! grammar-specific wrinkle that `e`/`E`/`p`/`P` may be immediately
//! followed by a sign without breaking the token (so `1e+10` and `0x1p-3`
//! each lex as one pp-number, not three).

use crate::lexer::identifiers::is_identifier_continue;
use crate::lexer::options::LexerOptions;
use crate::lexer::reader::Reader;
use crate::diagnostics::DiagnosticSink;

fn continues_number(b: u8) -> bool {
    b.is_ascii_digit() || is_identifier_continue(b) || b == b'.' || b == b'\''
}

/// Scan the remainder of a pp-number whose first byte (a digit, or a `.`
/// already confirmed to be followed by a digit) has already been consumed.
pub fn scan(first: u8, reader: &mut Reader, options: LexerOptions, sink: &mut dyn DiagnosticSink) -> Vec<u8> {
    let mut out = vec![first];

    loop {
        match reader.peek() {
            Some(b) if continues_number(b) => {
                reader.try_char(b, options, sink);
                out.push(b);
                if matches!(b, b'e' | b'E' | b'p' | b'P') {
                    if let Some(sign @ (b'+' | b'-')) = reader.peek() {
                        reader.try_char(sign, options, sink);
                        out.push(sign);
                    }
                }
            }
            _ => break,
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::NullSink;
    use crate::interner::Interner;
    use crate::lexer::reader::{Reader, StreamSpec};

    fn scan_number(src: &str) -> String {
        let mut pool = Interner::new();
        let mut reader = Reader::new();
        reader
            .push(&mut pool, StreamSpec::String { name: "<s>", bytes: src.as_bytes() })
            .unwrap();
        let opts = LexerOptions::default();
        let mut sink = NullSink;
        let first = reader.get(opts, &mut sink).unwrap();
        String::from_utf8(scan(first, &mut reader, opts, &mut sink)).unwrap()
    }

    #[test]
    fn plain_integer() {
        assert_eq!(scan_number("123;"), "123");
    }

    #[test]
    fn hex_float_with_binary_exponent_and_sign_is_one_token() {
        assert_eq!(scan_number("0x1p-3 "), "0x1p-3");
    }

    #[test]
    fn decimal_exponent_with_sign_is_one_token() {
        assert_eq!(scan_number("1e+10;"), "1e+10");
    }

    #[test]
    fn digit_separator_quote_continues_the_token() {
        assert_eq!(scan_number("0xDEAD_BEEF'p3;"), "0xDEAD_BEEF'p3");
    }

    #[test]
    fn trailing_dot_continues_the_token() {
        assert_eq!(scan_number("1.;"), "1.");
    }
}
