//! One input unit: a byte buffer plus a cursor that performs C11
//! physical-to-logical line processing (line splicing, line-ending
//! canonicalisation, terminal-newline synthesis) as it is walked.
//!
//! The cursor walks raw bytes rather than `char`s, since source text isn't
//! guaranteed to be valid UTF-8 (identifiers may contain bytes in
//! `0x80..=0xFD` from legacy extended character sets), and line splicing
//! happens inside `next()` itself rather than being left to a caller, so
//! every consumer sees an already-spliced logical character stream.

use std::io;
use std::rc::Rc;
use std::time::SystemTime;

use crate::diagnostics::{Diagnostic, DiagnosticSink, Severity, codes};
use crate::interner::{StringPool, Symbol};
use crate::position::Position;

use super::options::LexerOptions;

const EOF: Option<u8> = None;

/// Whether this stream reads a real file (carrying stat times) or an
/// in-memory string (conventionally named `<string>`).
#[derive(Debug, Clone)]
pub enum StreamKind {
    File,
    String,
}

/// mtime/atime/ctime captured at open, for file-backed streams only.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileTimes {
    pub modified: Option<SystemTime>,
    pub accessed: Option<SystemTime>,
    pub created: Option<SystemTime>,
}

/// The last logical character `next()` returned, needed to decide whether
/// end of buffer should synthesise a terminal newline or return `EOF`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LastChar {
    /// Nothing produced yet.
    None,
    Byte(u8),
    Eof,
}

/// Everything `unget` needs to roll back, captured once per character
/// actually produced by `next()`. A full snapshot (not just the byte) is
/// kept so that position queries stay correct across an unget of a
/// character that crossed a physical line — ungetting a newline, or a
/// character produced by a splice, must restore the line/column it had
/// before that character was read.
#[derive(Debug, Clone, Copy)]
struct Snapshot {
    cursor: usize,
    line: usize,
    column: usize,
    line_start: usize,
    last: LastChar,
}

pub struct Stream {
    kind: StreamKind,
    filename: Symbol,
    /// Resolved filename text, kept alongside the interned `Symbol` so
    /// diagnostics can be rendered without holding a string-pool
    /// reference at report time.
    filename_text: Rc<str>,
    buffer: Rc<[u8]>,
    cursor: usize,
    /// 1-based line of the next character `next()` will produce.
    line: usize,
    /// 1-based column of the next character `next()` will produce.
    column: usize,
    /// Byte offset of the first byte of the current physical line, used
    /// for caret rendering ("line note").
    line_start: usize,
    last: LastChar,
    history: Vec<Snapshot>,
    file_times: Option<FileTimes>,
}

impl Stream {
    /// Construct an in-memory stream. `name` is interned as the filename;
    /// pass `<string>` for anonymous sources.
    pub fn from_bytes(pool: &mut dyn StringPool, name: &str, bytes: &[u8]) -> Self {
        Self {
            kind: StreamKind::String,
            filename: pool.intern(name),
            filename_text: Rc::from(name),
            buffer: Rc::from(bytes),
            cursor: 0,
            line: 1,
            column: 1,
            line_start: 0,
            last: LastChar::None,
            history: Vec::new(),
            file_times: None,
        }
    }

    /// Construct a file-backed stream: the entire contents are read once,
    /// fully, into memory; no file handle is kept past construction. Fails
    /// (without mutating any caller state) if the file cannot be opened,
    /// stat'd, or fully read.
    pub fn open_file(pool: &mut dyn StringPool, path: &str) -> io::Result<Self> {
        let metadata = std::fs::metadata(path)?;
        let bytes = std::fs::read(path)?;

        let file_times = FileTimes {
            modified: metadata.modified().ok(),
            accessed: metadata.accessed().ok(),
            created: metadata.created().ok(),
        };

        Ok(Self {
            kind: StreamKind::File,
            filename: pool.intern(path),
            filename_text: Rc::from(path),
            buffer: Rc::from(bytes.as_slice()),
            cursor: 0,
            line: 1,
            column: 1,
            line_start: 0,
            last: LastChar::None,
            history: Vec::new(),
            file_times: Some(file_times),
        })
    }

    pub fn kind(&self) -> &StreamKind {
        &self.kind
    }

    pub fn filename(&self) -> Symbol {
        self.filename
    }

    /// The resolved filename text, for rendering diagnostics without a
    /// string-pool reference.
    pub fn filename_text(&self) -> &str {
        &self.filename_text
    }

    pub fn modify_time(&self) -> Option<SystemTime> {
        self.file_times.and_then(|t| t.modified)
    }

    pub fn access_time(&self) -> Option<SystemTime> {
        self.file_times.and_then(|t| t.accessed)
    }

    pub fn change_time(&self) -> Option<SystemTime> {
        self.file_times.and_then(|t| t.created)
    }

    /// Position of the character the next `next()` call will produce.
    pub fn position(&self) -> Position {
        Position::new(self.filename, self.line, self.column)
    }

    /// The physical source line the cursor currently sits on, for caret
    /// rendering in diagnostics.
    pub fn linenote(&self) -> &str {
        let end = self.buffer[self.line_start..]
            .iter()
            .position(|&b| b == b'\n' || b == b'\r')
            .map(|rel| self.line_start + rel)
            .unwrap_or(self.buffer.len());
        std::str::from_utf8(&self.buffer[self.line_start..end])
            .unwrap_or("<non-utf8 source line>")
    }

    fn bump_newline(&mut self) {
        self.line += 1;
        self.column = 1;
        self.line_start = self.cursor;
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            cursor: self.cursor,
            line: self.line,
            column: self.column,
            line_start: self.line_start,
            last: self.last,
        }
    }

    fn restore(&mut self, s: Snapshot) {
        self.cursor = s.cursor;
        self.line = s.line;
        self.column = s.column;
        self.line_start = s.line_start;
        self.last = s.last;
    }

    /// Produce the next logical character. Diagnostics for splice-related
    /// warnings are reported through `sink`, honouring `options`.
    pub fn next(&mut self, options: LexerOptions, sink: &mut dyn DiagnosticSink) -> Option<u8> {
        loop {
            let before = self.snapshot();

            if self.cursor >= self.buffer.len() {
                return match self.last {
                    LastChar::None | LastChar::Eof => EOF,
                    LastChar::Byte(b'\n') => {
                        self.last = LastChar::Eof;
                        self.history.push(before);
                        EOF
                    }
                    LastChar::Byte(_) => {
                        self.last = LastChar::Byte(b'\n');
                        self.history.push(before);
                        Some(b'\n')
                    }
                };
            }

            let b = self.buffer[self.cursor];

            if b == b'\r' || b == b'\n' {
                self.consume_newline_at(self.cursor);
                self.last = LastChar::Byte(b'\n');
                self.history.push(before);
                return Some(b'\n');
            }

            if b == b'\\' {
                match self.try_splice(options, sink) {
                    SpliceOutcome::Spliced => continue,
                    SpliceOutcome::NotASplice => {
                        self.cursor += 1;
                        self.column += 1;
                        self.last = LastChar::Byte(b'\\');
                        self.history.push(before);
                        return Some(b'\\');
                    }
                }
            }

            self.cursor += 1;
            self.column += 1;
            self.last = LastChar::Byte(b);
            self.history.push(before);
            return Some(b);
        }
    }

    /// Consume a `\r`, `\r\n`, or `\n` terminator starting at `at` and
    /// advance line bookkeeping; does not set `self.last`.
    fn consume_newline_at(&mut self, at: usize) {
        let mut end = at + 1;
        if self.buffer[at] == b'\r' && self.buffer.get(end) == Some(&b'\n') {
            end += 1;
        }
        self.cursor = end;
        self.bump_newline();
    }

    /// Attempt to consume a `\` (optionally followed by spaces/tabs) then
    /// `\r?\n` splice starting at `self.cursor` (which points at the `\`).
    /// Leaves state untouched if this is not actually a splice.
    fn try_splice(&mut self, options: LexerOptions, sink: &mut dyn DiagnosticSink) -> SpliceOutcome {
        debug_assert_eq!(self.buffer[self.cursor], b'\\');

        let mut idx = self.cursor + 1;
        let mut saw_space = false;
        while matches!(self.buffer.get(idx), Some(b' ' | b'\t')) {
            saw_space = true;
            idx += 1;
        }

        match self.buffer.get(idx) {
            Some(b'\r') | Some(b'\n') => {
                if saw_space && options.w_backslash_newline_space {
                    self.report_warning(
                        sink,
                        &codes::BACKSLASH_NEWLINE_SPACE,
                        "backslash and newline separated by space",
                    );
                }
                self.consume_newline_at(idx);
                SpliceOutcome::Spliced
            }
            None => {
                if options.warn_no_newline_eof {
                    self.report_warning(
                        sink,
                        &codes::BACKSLASH_NEWLINE_AT_EOF,
                        "backslash-newline at end of file",
                    );
                }
                self.cursor = self.buffer.len();
                SpliceOutcome::Spliced
            }
            Some(_) => SpliceOutcome::NotASplice,
        }
    }

    fn report_warning(
        &self,
        sink: &mut dyn DiagnosticSink,
        code: &'static crate::diagnostics::codes::ErrorCode,
        message: &str,
    ) {
        use crate::position::Span;
        let pos = self.position();
        let diag = Diagnostic::new(Severity::Warning, code, self.filename_text(), Span::new(pos, pos), message)
            .with_line_anchor(self.linenote(), 1);
        sink.report(diag);
    }

    /// Push a character back so the next `next()` call reproduces it,
    /// including its original position. `EOF` (`None`) and `\0` are
    /// invalid pushbacks.
    pub fn unget(&mut self, ch: u8) {
        assert_ne!(ch, 0, "unget of NUL is invalid");
        let Some(prev) = self.history.pop() else {
            panic!("unget called with no corresponding prior next()");
        };
        self.restore(prev);
    }

    /// Non-mutating lookahead: observes the same splicing/canonicalisation
    /// rules as `next()`, so `peek() == Some(c)` implies a following
    /// `next() == Some(c)`. Never reports diagnostics — a peek that turns
    /// out to cross a splice boundary is re-observed (and warned on, if
    /// applicable) for real when `next()` actually consumes it.
    pub fn peek(&self) -> Option<u8> {
        let mut scratch = Scratch {
            cursor: self.cursor,
            last: self.last,
        };
        scratch.peek_next(&self.buffer)
    }
}

#[derive(Clone, Copy)]
enum SpliceOutcome {
    Spliced,
    NotASplice,
}

/// A read-only cursor used to implement `Stream::peek` without mutating
/// the stream. Mirrors `Stream::next`'s logic exactly but never reports
/// diagnostics (peeking must not have side effects) and never touches
/// line/column (callers of `peek` only need the character, not its
/// position — they already have the stream's current position).
struct Scratch {
    cursor: usize,
    last: LastChar,
}

impl Scratch {
    fn peek_next(&mut self, buffer: &[u8]) -> Option<u8> {
        loop {
            if self.cursor >= buffer.len() {
                return match self.last {
                    LastChar::None | LastChar::Eof => EOF,
                    LastChar::Byte(b'\n') => EOF,
                    LastChar::Byte(_) => Some(b'\n'),
                };
            }

            let b = buffer[self.cursor];

            if b == b'\r' || b == b'\n' {
                return Some(b'\n');
            }

            if b == b'\\' {
                let mut idx = self.cursor + 1;
                while matches!(buffer.get(idx), Some(b' ' | b'\t')) {
                    idx += 1;
                }
                match buffer.get(idx) {
                    Some(b'\r') | Some(b'\n') => {
                        let mut end = idx + 1;
                        if buffer[idx] == b'\r' && buffer.get(end) == Some(&b'\n') {
                            end += 1;
                        }
                        self.cursor = end;
                        continue;
                    }
                    None => {
                        self.cursor = buffer.len();
                        continue;
                    }
                    Some(_) => return Some(b'\\'),
                }
            }

            return Some(b);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::NullSink;
    use crate::interner::Interner;

    fn stream(src: &str) -> (Interner, Stream) {
        let mut pool = Interner::new();
        let s = Stream::from_bytes(&mut pool, "<string>", src.as_bytes());
        (pool, s)
    }

    fn drain(s: &mut Stream) -> Vec<u8> {
        let mut sink = NullSink;
        let opts = LexerOptions::default();
        let mut out = Vec::new();
        while let Some(b) = s.next(opts, &mut sink) {
            out.push(b);
        }
        out
    }

    #[test]
    fn crlf_cr_lf_all_canonicalise_to_lf() {
        for src in ["a\r\nb", "a\rb", "a\nb"] {
            let (_pool, mut s) = stream(src);
            assert_eq!(drain(&mut s), b"a\nb\n", "input {src:?}");
        }
    }

    #[test]
    fn missing_final_newline_is_synthesised() {
        let (_pool, mut s) = stream("a");
        assert_eq!(drain(&mut s), b"a\n");
    }

    #[test]
    fn trailing_newline_is_not_duplicated() {
        let (_pool, mut s) = stream("a\n");
        assert_eq!(drain(&mut s), b"a\n");
    }

    #[test]
    fn empty_input_produces_only_eof() {
        let (_pool, mut s) = stream("");
        assert_eq!(drain(&mut s), Vec::<u8>::new());
    }

    #[test]
    fn backslash_newline_splices_without_emitting_a_character() {
        let (_pool, mut s) = stream("#inc\\\nlude");
        assert_eq!(drain(&mut s), b"#include\n");
    }

    #[test]
    fn splice_runs_to_eof_still_synthesises_terminal_newline() {
        let (_pool, mut s) = stream("a\\\n");
        assert_eq!(drain(&mut s), b"a\n");
    }

    #[test]
    fn splice_with_no_newline_at_all_still_synthesises_terminal_newline() {
        let (_pool, mut s) = stream("a\\");
        let mut sink = NullSink;
        let opts = LexerOptions::default();
        assert_eq!(s.next(opts, &mut sink), Some(b'a'));
        assert_eq!(s.next(opts, &mut sink), Some(b'\n'));
        assert_eq!(s.next(opts, &mut sink), None);
    }

    #[test]
    fn warn_no_newline_eof_reports_only_when_enabled() {
        use crate::diagnostics::CollectingSink;

        let (_pool, mut s) = stream("a\\");
        let opts = LexerOptions { warn_no_newline_eof: true, ..LexerOptions::default() };
        let mut sink = CollectingSink::new();
        while s.next(opts, &mut sink).is_some() {}
        assert_eq!(sink.diagnostics().len(), 1);
        assert_eq!(sink.diagnostics()[0].code().code, "C009");

        let (_pool2, mut s2) = stream("a\\");
        let mut quiet_sink = CollectingSink::new();
        while s2.next(LexerOptions::default(), &mut quiet_sink).is_some() {}
        assert!(quiet_sink.diagnostics().is_empty());
    }

    #[test]
    fn w_backslash_newline_space_reports_only_when_enabled() {
        use crate::diagnostics::CollectingSink;

        let (_pool, mut s) = stream("a\\ \nb");
        let opts = LexerOptions { w_backslash_newline_space: true, ..LexerOptions::default() };
        let mut sink = CollectingSink::new();
        assert_eq!(drain_with(&mut s, opts, &mut sink), b"ab\n");
        assert_eq!(sink.diagnostics().len(), 1);
        assert_eq!(sink.diagnostics()[0].code().code, "C008");

        let (_pool2, mut s2) = stream("a\\ \nb");
        let mut quiet_sink = CollectingSink::new();
        assert_eq!(drain_with(&mut s2, LexerOptions::default(), &mut quiet_sink), b"ab\n");
        assert!(quiet_sink.diagnostics().is_empty());
    }

    fn drain_with(s: &mut Stream, opts: LexerOptions, sink: &mut dyn DiagnosticSink) -> Vec<u8> {
        let mut out = Vec::new();
        while let Some(b) = s.next(opts, sink) {
            out.push(b);
        }
        out
    }

    #[test]
    fn unget_reproduces_same_char_at_same_position() {
        let (_pool, mut s) = stream("ab");
        let mut sink = NullSink;
        let opts = LexerOptions::default();

        let pos_a = s.position();
        let a = s.next(opts, &mut sink).unwrap();
        assert_eq!(a, b'a');

        s.unget(a);
        assert_eq!(s.position(), pos_a);
        assert_eq!(s.next(opts, &mut sink).unwrap(), b'a');
    }

    #[test]
    fn unget_across_newline_restores_line_and_column() {
        let (_pool, mut s) = stream("a\nb");
        let mut sink = NullSink;
        let opts = LexerOptions::default();

        let _ = s.next(opts, &mut sink); // 'a'
        let pos_nl = s.position();
        let nl = s.next(opts, &mut sink).unwrap();
        assert_eq!(nl, b'\n');
        assert_eq!(s.position().line, 2);

        s.unget(nl);
        assert_eq!(s.position(), pos_nl);
        assert_eq!(s.next(opts, &mut sink).unwrap(), b'\n');
        assert_eq!(s.position().line, 2);
    }

    #[test]
    fn peek_does_not_mutate_and_matches_next() {
        let (_pool, mut s) = stream("xy");
        let opts = LexerOptions::default();
        assert_eq!(s.peek(), Some(b'x'));
        assert_eq!(s.peek(), Some(b'x'));
        let mut sink = NullSink;
        assert_eq!(s.next(opts, &mut sink), Some(b'x'));
    }

    #[test]
    fn peek_observes_splicing_like_next() {
        let (_pool, mut s) = stream("a\\\nb");
        let opts = LexerOptions::default();
        assert_eq!(s.peek(), Some(b'a'));
        let mut sink = NullSink;
        assert_eq!(s.next(opts, &mut sink), Some(b'a'));
        assert_eq!(s.peek(), Some(b'b'));
        assert_eq!(s.next(opts, &mut sink), Some(b'b'));
    }
}
