//! The lexer: scans raw bytes off a [`Reader`] into [`Token`]s.
//!
//! Two layers:
//!
//! - `scan_raw` produces the *raw* token stream, including whitespace runs,
//!   comments, and bare newlines — the things a translation-phase-3
//!   tokenizer actually emits before anything gets filtered.
//! - `next`/`peek` sit on top and produce the *semantic* stream a parser
//!   wants: whitespace and comments are folded into `leading_space`,
//!   physical newlines become `begin_of_line`, and nothing but real tokens
//!   (plus a final `End`) comes out.
//!
//! A stack of per-scope "tapes" backs `untread`/`stash`/`unstash`: each
//! scope records every semantic token it produces, in order, so `unstash`
//! can splice that whole recorded sequence back in front of the enclosing
//! scope for a full backtrack.

pub mod clock;
pub mod encoding;
pub mod hideset;
pub mod identifiers;
pub mod lexeme;
pub mod numbers;
pub mod options;
pub mod punctuators;
pub mod reader;
pub mod stream;
pub mod strings;
pub mod token;

use std::time::SystemTime;

use crate::diagnostics::{Diagnostic, DiagnosticSink, Severity, codes};
use crate::position::Position;

pub use options::LexerOptions;
pub use reader::{Reader, StreamSpec};
pub use token::{Encoding, Token, TokenKind};

#[derive(Debug, Default, Clone)]
struct Level {
    tokens: Vec<Token>,
    cursor: usize,
}

/// Ties a [`Reader`] and the semantic scanning rules together. Not
/// `Clone`: a lexer owns the one reader stack driving it.
pub struct Lexer {
    reader: Reader,
    options: LexerOptions,
    levels: Vec<Level>,
    /// True if the next token produced will be the first non-whitespace
    /// token on its physical line.
    at_line_start: bool,
    captured_at: SystemTime,
}

impl Lexer {
    pub fn new(reader: Reader, options: LexerOptions) -> Self {
        Self {
            reader,
            options,
            levels: vec![Level::default()],
            at_line_start: true,
            captured_at: SystemTime::now(),
        }
    }

    pub fn reader(&self) -> &Reader {
        &self.reader
    }

    pub fn reader_mut(&mut self) -> &mut Reader {
        &mut self.reader
    }

    pub fn options(&self) -> LexerOptions {
        self.options
    }

    /// `__DATE__`-shaped wall-clock string (`Mon dd yyyy`), captured once
    /// at construction.
    pub fn date(&self) -> String {
        clock::format_date(self.captured_at)
    }

    /// `__TIME__`-shaped wall-clock string (`HH:MM:SS`), captured once at
    /// construction.
    pub fn time(&self) -> String {
        clock::format_time(self.captured_at)
    }

    /// The next semantic token: whitespace and comments are absorbed into
    /// `leading_space`, and physical newlines set `begin_of_line` on the
    /// following token rather than being returned themselves.
    pub fn next(&mut self, sink: &mut dyn DiagnosticSink) -> Token {
        let (cursor, len) = {
            let level = self.levels.last().expect("lexer always has a base level");
            (level.cursor, level.tokens.len())
        };

        if cursor < len {
            self.levels.last_mut().unwrap().cursor += 1;
            return self.levels.last().unwrap().tokens[cursor].clone();
        }

        let fresh = self.scan_semantic(sink);
        let level = self.levels.last_mut().unwrap();
        level.tokens.push(fresh.clone());
        level.cursor += 1;
        fresh
    }

    /// `next()` followed by an automatic `untread` — a token is consumed
    /// and then immediately put back, so the same token is returned again
    /// by the following `next()`. `End` is never untread (there is nothing
    /// to roll back to past end of input), so peeking at `End` is just
    /// `next()`.
    pub fn peek(&mut self, sink: &mut dyn DiagnosticSink) -> Token {
        let tok = self.next(sink);
        if !matches!(tok.kind, TokenKind::End) {
            self.untread(tok.clone());
        }
        tok
    }

    /// Push a previously-produced token back so the next `next()` call
    /// reproduces it. `tok` is expected to be the token most recently
    /// returned by `next()`/`peek()` at the current scope (LIFO, like the
    /// reader's character-level `unget`); `End` may not be untread.
    pub fn untread(&mut self, tok: Token) {
        assert!(!matches!(tok.kind, TokenKind::End), "cannot untread End");
        let level = self.levels.last_mut().expect("lexer always has a base level");
        assert!(level.cursor > 0, "untread called with nothing to roll back");
        level.cursor -= 1;
    }

    /// Begin a nested lookahead scope: every token `next()` produces from
    /// here on is recorded, independent of the enclosing scope's own
    /// backlog, until a matching [`Lexer::unstash`].
    pub fn stash(&mut self) {
        self.levels.push(Level::default());
    }

    /// End the current lookahead scope and splice everything it produced
    /// back in front of the enclosing scope, so the next `next()` call
    /// replays the whole scope from its first token — a full backtrack.
    pub fn unstash(&mut self) {
        let finished = self.levels.pop().expect("unstash without matching stash");
        let outer = self.levels.last_mut().expect("base level must remain");
        let insert_at = outer.cursor;
        for (offset, tok) in finished.tokens.into_iter().enumerate() {
            outer.tokens.insert(insert_at + offset, tok);
        }
    }

    fn scan_semantic(&mut self, sink: &mut dyn DiagnosticSink) -> Token {
        let mut leading_space = 0usize;
        loop {
            let raw = self.scan_raw(sink);
            match raw.kind {
                TokenKind::Space | TokenKind::Comment => {
                    leading_space += raw.literal.len_bytes().max(1);
                }
                TokenKind::NewLine => {
                    self.at_line_start = true;
                    leading_space += 1;
                }
                _ => {
                    let mut tok = raw;
                    tok.begin_of_line = self.at_line_start;
                    tok.leading_space = leading_space;
                    self.at_line_start = false;
                    return tok;
                }
            }
        }
    }

    fn scan_raw(&mut self, sink: &mut dyn DiagnosticSink) -> Token {
        let opts = self.options;
        let pos = self.reader.position();

        match self.reader.get(opts, sink) {
            None => Token::new(TokenKind::End, "", pos),

            Some(b' ') | Some(b'\t') => {
                let mut n = 1usize;
                while matches!(self.reader.peek(), Some(b' ') | Some(b'\t')) {
                    let b = self.reader.peek().unwrap();
                    self.reader.try_char(b, opts, sink);
                    n += 1;
                }
                Token::new(TokenKind::Space, " ".repeat(n), pos)
            }

            Some(b'\n') => Token::new(TokenKind::NewLine, "\n", pos),

            Some(b'/') => self.scan_slash(pos, opts, sink),

            Some(b'"') => self.scan_string(Encoding::Plain, pos, opts, sink),
            Some(b'\'') => self.scan_char(Encoding::Plain, pos, opts, sink),

            Some(b'L') => self.scan_letter_prefixed(b'L', pos, opts, sink),
            Some(b'U') => self.scan_letter_prefixed(b'U', pos, opts, sink),
            Some(b'u') => self.scan_u_prefixed(pos, opts, sink),

            Some(b'.') if matches!(self.reader.peek(), Some(d) if d.is_ascii_digit()) => {
                self.scan_number(b'.', pos, opts, sink)
            }

            Some(b) if b.is_ascii_digit() => self.scan_number(b, pos, opts, sink),

            Some(b'\\') if matches!(self.reader.peek(), Some(b'u') | Some(b'U')) => {
                self.scan_identifier(b'\\', pos, opts, sink)
            }

            Some(b) if identifiers::is_identifier_start(b) => self.scan_identifier(b, pos, opts, sink),

            Some(b) => self.scan_punct(b, pos, opts, sink),
        }
    }

    fn scan_slash(&mut self, pos: Position, opts: LexerOptions, sink: &mut dyn DiagnosticSink) -> Token {
        if self.reader.try_char(b'/', opts, sink) {
            let mut text = vec![b'/', b'/'];
            while !matches!(self.reader.peek(), None | Some(b'\n')) {
                let b = self.reader.peek().unwrap();
                self.reader.try_char(b, opts, sink);
                text.push(b);
            }
            return Token::new(TokenKind::Comment, text, pos);
        }

        if self.reader.try_char(b'*', opts, sink) {
            let mut text = vec![b'/', b'*'];
            loop {
                match self.reader.peek() {
                    None => {
                        self.report(sink, &codes::UNTERMINATED_BLOCK_COMMENT, "unterminated comment");
                        break;
                    }
                    Some(b'*') => {
                        self.reader.try_char(b'*', opts, sink);
                        text.push(b'*');
                        if self.reader.try_char(b'/', opts, sink) {
                            text.push(b'/');
                            break;
                        }
                    }
                    Some(b) => {
                        self.reader.try_char(b, opts, sink);
                        text.push(b);
                    }
                }
            }
            return Token::new(TokenKind::Comment, text, pos);
        }

        self.scan_punct(b'/', pos, opts, sink)
    }

    fn scan_string(
        &mut self,
        encoding: Encoding,
        pos: Position,
        opts: LexerOptions,
        sink: &mut dyn DiagnosticSink,
    ) -> Token {
        let literal = strings::scan_string_literal(encoding, &mut self.reader, opts, sink);
        Token::new(TokenKind::StringLiteral(encoding), literal.bytes, pos)
    }

    fn scan_char(
        &mut self,
        encoding: Encoding,
        pos: Position,
        opts: LexerOptions,
        sink: &mut dyn DiagnosticSink,
    ) -> Token {
        let literal = strings::scan_char_const(encoding, &mut self.reader, opts, sink);
        Token::new(TokenKind::CharConst(encoding), literal.bytes, pos)
    }

    /// `L"..."`/`L'...'` (wide) or `U"..."`/`U'...'` (UTF-32); falls back
    /// to an ordinary identifier starting with the letter otherwise.
    fn scan_letter_prefixed(
        &mut self,
        letter: u8,
        pos: Position,
        opts: LexerOptions,
        sink: &mut dyn DiagnosticSink,
    ) -> Token {
        let encoding = if letter == b'L' { Encoding::Wide } else { Encoding::Char32 };
        if self.reader.try_char(b'"', opts, sink) {
            return self.scan_string(encoding, pos, opts, sink);
        }
        if self.reader.try_char(b'\'', opts, sink) {
            return self.scan_char(encoding, pos, opts, sink);
        }
        let mut text = vec![letter];
        text.extend(identifiers::scan_continuation(&mut self.reader, opts, sink));
        Token::new(TokenKind::Identifier, text, pos)
    }

    /// `u8"..."` (UTF-8), `u"..."`/`u'...'` (UTF-16), or an identifier
    /// starting with `u` (including one starting `u8` that isn't a string).
    fn scan_u_prefixed(&mut self, pos: Position, opts: LexerOptions, sink: &mut dyn DiagnosticSink) -> Token {
        if self.reader.try_char(b'8', opts, sink) {
            if self.reader.try_char(b'"', opts, sink) {
                return self.scan_string(Encoding::Utf8, pos, opts, sink);
            }
            let mut text = vec![b'u', b'8'];
            text.extend(identifiers::scan_continuation(&mut self.reader, opts, sink));
            return Token::new(TokenKind::Identifier, text, pos);
        }
        if self.reader.try_char(b'"', opts, sink) {
            return self.scan_string(Encoding::Char16, pos, opts, sink);
        }
        if self.reader.try_char(b'\'', opts, sink) {
            return self.scan_char(Encoding::Char16, pos, opts, sink);
        }
        let mut text = vec![b'u'];
        text.extend(identifiers::scan_continuation(&mut self.reader, opts, sink));
        Token::new(TokenKind::Identifier, text, pos)
    }

    fn scan_number(&mut self, first: u8, pos: Position, opts: LexerOptions, sink: &mut dyn DiagnosticSink) -> Token {
        let text = numbers::scan(first, &mut self.reader, opts, sink);
        Token::new(TokenKind::Number, text, pos)
    }

    fn scan_identifier(
        &mut self,
        first: u8,
        pos: Position,
        opts: LexerOptions,
        sink: &mut dyn DiagnosticSink,
    ) -> Token {
        let text = identifiers::scan(first, &mut self.reader, opts, sink);
        Token::new(TokenKind::Identifier, text, pos)
    }

    fn scan_punct(&mut self, first: u8, pos: Position, opts: LexerOptions, sink: &mut dyn DiagnosticSink) -> Token {
        match punctuators::scan(first, &mut self.reader, opts, sink) {
            Some(kind) => Token::punctuator(kind, pos),
            None => Token::new(TokenKind::Unknown, vec![first], pos),
        }
    }

    fn report(&self, sink: &mut dyn DiagnosticSink, code: &'static codes::ErrorCode, message: &str) {
        use crate::position::Span;
        let pos = self.reader.position();
        let diag = Diagnostic::new(Severity::Error, code, self.reader.filename_text(), Span::new(pos, pos), message)
            .with_line_anchor(self.reader.linenote(), 1);
        sink.report(diag);
    }
}
