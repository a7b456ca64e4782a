//! Multi-stream façade over [`Stream`], modelling the include-like stack a
//! preprocessor pushes and pops as it enters and leaves included files.
//! Macro expansion and `#include` resolution are someone else's concern;
//! this layer only provides the stacking discipline.

use std::io;

use crate::diagnostics::DiagnosticSink;
use crate::interner::{StringPool, Symbol};
use crate::position::Position;

use super::options::LexerOptions;
use super::stream::Stream;

/// What kind of source to push onto the reader's stack.
pub enum StreamSpec<'a> {
    /// Read an entire file from disk.
    File(&'a str),
    /// Lex an in-memory byte buffer under the given display name.
    String { name: &'a str, bytes: &'a [u8] },
}

/// A stack of [`Stream`]s. All character-level operations act on the top
/// of the stack; `push`/`pop` model entering and leaving an included file.
#[derive(Default)]
pub struct Reader {
    stack: Vec<Stream>,
}

impl Reader {
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    /// Push a new stream onto the stack. On failure (file could not be
    /// opened, stat'd, or read) the reader is left completely unchanged.
    pub fn push(&mut self, pool: &mut dyn StringPool, spec: StreamSpec<'_>) -> io::Result<()> {
        let stream = match spec {
            StreamSpec::File(path) => Stream::open_file(pool, path)?,
            StreamSpec::String { name, bytes } => Stream::from_bytes(pool, name, bytes),
        };
        self.stack.push(stream);
        Ok(())
    }

    /// Pop the current stream, returning to whatever was pushed before it.
    /// Panics if the stack is empty — callers must not pop past the
    /// bottom-most stream.
    pub fn pop(&mut self) -> Stream {
        self.stack.pop().expect("Reader::pop on an empty stack")
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    fn top(&self) -> &Stream {
        self.stack.last().expect("Reader used with no active stream")
    }

    fn top_mut(&mut self) -> &mut Stream {
        self.stack.last_mut().expect("Reader used with no active stream")
    }

    /// Produce the next logical character from the top stream.
    pub fn get(&mut self, options: LexerOptions, sink: &mut dyn DiagnosticSink) -> Option<u8> {
        self.top_mut().next(options, sink)
    }

    /// Non-mutating lookahead on the top stream.
    pub fn peek(&self) -> Option<u8> {
        self.top().peek()
    }

    /// Push a character back onto the top stream.
    pub fn unget(&mut self, ch: u8) {
        self.top_mut().unget(ch)
    }

    /// Consume the next character if it equals `expected`, reporting
    /// whether it matched. The common two-character-punctuator idiom:
    /// `if reader.try_char(b'=') { ... LtEq ... } else { ... Lt ... }`.
    pub fn try_char(&mut self, expected: u8, options: LexerOptions, sink: &mut dyn DiagnosticSink) -> bool {
        if self.peek() == Some(expected) {
            self.get(options, sink);
            true
        } else {
            false
        }
    }

    /// Non-consuming equivalent of `try_char`.
    pub fn test_char(&self, expected: u8) -> bool {
        self.peek() == Some(expected)
    }

    pub fn position(&self) -> Position {
        self.top().position()
    }

    pub fn line(&self) -> usize {
        self.top().position().line
    }

    pub fn column(&self) -> usize {
        self.top().position().column
    }

    pub fn filename(&self) -> Symbol {
        self.top().filename()
    }

    /// The resolved filename text of the top stream, for rendering
    /// diagnostics without a string-pool reference.
    pub fn filename_text(&self) -> &str {
        self.top().filename_text()
    }

    pub fn linenote(&self) -> &str {
        self.top().linenote()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::NullSink;
    use crate::interner::Interner;

    fn reader_over(pool: &mut Interner, src: &str) -> Reader {
        let mut r = Reader::new();
        r.push(
            pool,
            StreamSpec::String {
                name: "<string>",
                bytes: src.as_bytes(),
            },
        )
        .unwrap();
        r
    }

    #[test]
    fn get_peek_unget_round_trip() {
        let mut pool = Interner::new();
        let mut r = reader_over(&mut pool, "ab");
        let opts = LexerOptions::default();
        let mut sink = NullSink;

        assert_eq!(r.peek(), Some(b'a'));
        let a = r.get(opts, &mut sink).unwrap();
        assert_eq!(a, b'a');
        r.unget(a);
        assert_eq!(r.get(opts, &mut sink), Some(b'a'));
        assert_eq!(r.get(opts, &mut sink), Some(b'b'));
    }

    #[test]
    fn try_char_consumes_only_on_match() {
        let mut pool = Interner::new();
        let mut r = reader_over(&mut pool, "==");
        let opts = LexerOptions::default();
        let mut sink = NullSink;

        assert!(r.try_char(b'=', opts, &mut sink));
        assert!(r.try_char(b'=', opts, &mut sink));
        assert!(!r.test_char(b'='));
    }

    #[test]
    fn push_pop_stacks_independent_position_state() {
        let mut pool = Interner::new();
        let mut r = Reader::new();
        r.push(
            &mut pool,
            StreamSpec::String {
                name: "outer",
                bytes: b"xy",
            },
        )
        .unwrap();
        let opts = LexerOptions::default();
        let mut sink = NullSink;
        assert_eq!(r.get(opts, &mut sink), Some(b'x'));

        r.push(
            &mut pool,
            StreamSpec::String {
                name: "inner",
                bytes: b"z",
            },
        )
        .unwrap();
        assert_eq!(r.line(), 1);
        assert_eq!(r.get(opts, &mut sink), Some(b'z'));
        r.pop();

        assert_eq!(r.get(opts, &mut sink), Some(b'y'));
    }

    #[test]
    fn push_failure_on_missing_file_leaves_reader_unchanged() {
        let mut pool = Interner::new();
        let mut r = reader_over(&mut pool, "a");
        assert!(
            r.push(&mut pool, StreamSpec::File("/no/such/file-cfront-test"))
                .is_err()
        );
        assert!(!r.is_empty());
        let opts = LexerOptions::default();
        let mut sink = NullSink;
        assert_eq!(r.get(opts, &mut sink), Some(b'a'));
    }
}
