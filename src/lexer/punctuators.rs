//! Maximal-munch punctuator scanning, including the six C11 digraphs
//! (`<: :> <% %> %: %:%:`), which this core maps onto the same
//! [`TokenKind`] as their primary spelling — `%:` folds into the `#`/`##`
//! family with exactly the same one-token-of-lookahead behaviour as the
//! literal spellings, so a directive written with digraphs lexes
//! identically to one written without them.
//!
//! Called once the lexer has already read the first byte of a punctuator
//! off the reader and ruled out comment-start (`/`-followed-by-`/`-or-`*`
//! is handled by the caller before reaching here).

use crate::diagnostics::DiagnosticSink;
use crate::lexer::options::LexerOptions;
use crate::lexer::reader::Reader;
use crate::lexer::token::TokenKind;

/// Scan the remainder of a punctuator given its already-consumed first
/// byte. Returns `None` if `first` cannot start any punctuator (the caller
/// falls back to `TokenKind::Unknown`).
pub fn scan(
    first: u8,
    reader: &mut Reader,
    options: LexerOptions,
    sink: &mut dyn DiagnosticSink,
) -> Option<TokenKind> {
    use TokenKind::*;

    let kind = match first {
        b'[' => LBracket,
        b']' => RBracket,
        b'(' => LParen,
        b')' => RParen,
        b'{' => LBrace,
        b'}' => RBrace,
        b',' => Comma,
        b';' => Semicolon,
        b'?' => Question,

        b':' => {
            if reader.try_char(b'>', options, sink) {
                RBracket
            } else {
                Colon
            }
        }

        b'.' => {
            if reader.try_char(b'.', options, sink) {
                if reader.try_char(b'.', options, sink) {
                    Ellipsis
                } else {
                    reader.unget(b'.');
                    Dot
                }
            } else {
                Dot
            }
        }

        b'&' => {
            if reader.try_char(b'&', options, sink) {
                AmpAmp
            } else if reader.try_char(b'=', options, sink) {
                AmpEq
            } else {
                Amp
            }
        }

        b'*' => {
            if reader.try_char(b'=', options, sink) {
                StarEq
            } else {
                Star
            }
        }

        b'+' => {
            if reader.try_char(b'+', options, sink) {
                PlusPlus
            } else if reader.try_char(b'=', options, sink) {
                PlusEq
            } else {
                Plus
            }
        }

        b'-' => {
            if reader.try_char(b'-', options, sink) {
                MinusMinus
            } else if reader.try_char(b'=', options, sink) {
                MinusEq
            } else if reader.try_char(b'>', options, sink) {
                Arrow
            } else {
                Minus
            }
        }

        b'~' => Tilde,

        b'!' => {
            if reader.try_char(b'=', options, sink) {
                ExclaimEq
            } else {
                Exclaim
            }
        }

        b'/' => {
            if reader.try_char(b'=', options, sink) {
                SlashEq
            } else {
                Slash
            }
        }

        b'%' => {
            if reader.try_char(b'>', options, sink) {
                RBrace
            } else if reader.try_char(b':', options, sink) {
                scan_hash_tail(reader, options, sink)
            } else if reader.try_char(b'=', options, sink) {
                PercentEq
            } else {
                Percent
            }
        }

        b'<' => {
            if reader.try_char(b':', options, sink) {
                LBracket
            } else if reader.try_char(b'%', options, sink) {
                LBrace
            } else if reader.try_char(b'<', options, sink) {
                if reader.try_char(b'=', options, sink) {
                    LtLtEq
                } else {
                    LtLt
                }
            } else if reader.try_char(b'=', options, sink) {
                LtEq
            } else {
                Lt
            }
        }

        b'>' => {
            if reader.try_char(b'>', options, sink) {
                if reader.try_char(b'=', options, sink) {
                    GtGtEq
                } else {
                    GtGt
                }
            } else if reader.try_char(b'=', options, sink) {
                GtEq
            } else {
                Gt
            }
        }

        b'^' => {
            if reader.try_char(b'=', options, sink) {
                CaretEq
            } else {
                Caret
            }
        }

        b'|' => {
            if reader.try_char(b'|', options, sink) {
                PipePipe
            } else if reader.try_char(b'=', options, sink) {
                PipeEq
            } else {
                Pipe
            }
        }

        b'=' => {
            if reader.try_char(b'=', options, sink) {
                EqEq
            } else {
                Assign
            }
        }

        b'#' => scan_hash_tail(reader, options, sink),

        b'\\' => Backslash,

        _ => return None,
    };

    Some(kind)
}

/// Shared tail for `#` and its `%:` digraph: either one is immediately
/// followed by a second `#`-equivalent (literal `#` or digraph `%:`),
/// forming `##`.
fn scan_hash_tail(reader: &mut Reader, options: LexerOptions, sink: &mut dyn DiagnosticSink) -> TokenKind {
    if reader.try_char(b'#', options, sink) {
        return TokenKind::HashHash;
    }
    if reader.try_char(b'%', options, sink) {
        if reader.try_char(b':', options, sink) {
            return TokenKind::HashHash;
        }
        reader.unget(b'%');
    }
    TokenKind::Hash
}
