//! Token literal storage.
//!
//! Two shapes: a `&'static str` for punctuators whose text never varies,
//! and an owned byte buffer for everything scanned from source (plain
//! identifiers and pp-numbers as well as decoded string/char escapes, UCNs
//! appended in place, and wide/UTF-16/UTF-32 string payloads, which are raw
//! binary and not text at all).
//!
//! The owned buffer is raw bytes, not `str`: identifier-continuation bytes
//! in `0x80..=0xFD` are not valid UTF-8 on their own (pre-Unicode extended
//! character sets), and a wide/u/U-encoded string literal's decoded payload
//! is little-endian binary, never meant to be read back as `str` at all.
//! `as_str` is a debug/display convenience only; it returns a lossy
//! `Cow<str>` rather than panicking on content that doesn't round-trip.

use std::borrow::Cow;
use std::fmt;
use std::rc::Rc;

#[derive(Clone)]
pub enum Lexeme {
    Static(&'static str),
    Owned(Rc<[u8]>),
}

impl Lexeme {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Lexeme::Owned(Rc::from(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Lexeme::Static(s) => s.as_bytes(),
            Lexeme::Owned(b) => b,
        }
    }

    pub fn as_str(&self) -> Cow<'_, str> {
        match self {
            Lexeme::Static(s) => Cow::Borrowed(s),
            Lexeme::Owned(_) => String::from_utf8_lossy(self.as_bytes()),
        }
    }

    pub fn len_bytes(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }
}

impl fmt::Debug for Lexeme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.as_str())
    }
}

impl PartialEq for Lexeme {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for Lexeme {}

impl PartialEq<&str> for Lexeme {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl From<String> for Lexeme {
    fn from(value: String) -> Self {
        Lexeme::Owned(Rc::from(value.into_bytes()))
    }
}

impl From<Vec<u8>> for Lexeme {
    fn from(value: Vec<u8>) -> Self {
        Lexeme::from_bytes(value)
    }
}

impl From<&'static str> for Lexeme {
    fn from(value: &'static str) -> Self {
        Lexeme::Static(value)
    }
}
