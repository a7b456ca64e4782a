//! Token kinds and the [`Token`] record the lexer publishes.

use std::fmt;

use super::hideset::HideSet;
use super::lexeme::Lexeme;
use crate::position::Position;

/// The encoding prefix of a character constant or string literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// No prefix: `'a'`, `"a"`.
    Plain,
    /// `L` prefix: wide character/string.
    Wide,
    /// `u8` prefix: UTF-8 string (character constants do not take `u8`,
    /// but the encoding is tracked uniformly for symmetry).
    Utf8,
    /// `u` prefix: UTF-16 code unit(s).
    Char16,
    /// `U` prefix: UTF-32 code unit.
    Char32,
}

/// A closed tagged variant over every token the lexer can produce. The
/// payload differs only for literal-bearing kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Brackets and separators
    LBracket,
    RBracket,
    LParen,
    RParen,
    LBrace,
    RBrace,
    Comma,
    Semicolon,
    Colon,
    Question,

    // `.` family
    Dot,
    Ellipsis,

    // `&` family
    Amp,
    AmpAmp,
    AmpEq,

    // `*` family
    Star,
    StarEq,

    // `+` family
    Plus,
    PlusPlus,
    PlusEq,

    // `-` family
    Minus,
    MinusMinus,
    MinusEq,
    Arrow,

    Tilde,

    // `!` family
    Exclaim,
    ExclaimEq,

    // `/` family
    Slash,
    SlashEq,

    // `%` family
    Percent,
    PercentEq,

    // `<` family
    Lt,
    LtLt,
    LtLtEq,
    LtEq,

    // `>` family
    Gt,
    GtGt,
    GtGtEq,
    GtEq,

    // `^` family
    Caret,
    CaretEq,

    // `|` family
    Pipe,
    PipePipe,
    PipeEq,

    // `=` family
    Assign,
    EqEq,

    // `#` family
    Hash,
    HashHash,

    Backslash,

    // Literal-bearing kinds
    Identifier,
    Number,
    CharConst(Encoding),
    StringLiteral(Encoding),

    // Raw/whitespace kinds
    Space,
    Comment,
    NewLine,

    End,
    Unknown,
}

impl TokenKind {
    /// The canonical textual form of punctuators; `None` for literal-bearing
    /// and structural kinds whose text is not fixed.
    pub fn canonical_text(self) -> Option<&'static str> {
        use TokenKind::*;
        Some(match self {
            LBracket => "[",
            RBracket => "]",
            LParen => "(",
            RParen => ")",
            LBrace => "{",
            RBrace => "}",
            Dot => ".",
            Ellipsis => "...",
            Amp => "&",
            AmpAmp => "&&",
            AmpEq => "&=",
            Star => "*",
            StarEq => "*=",
            Plus => "+",
            PlusPlus => "++",
            PlusEq => "+=",
            Minus => "-",
            MinusMinus => "--",
            MinusEq => "-=",
            Arrow => "->",
            Tilde => "~",
            Exclaim => "!",
            ExclaimEq => "!=",
            Slash => "/",
            SlashEq => "/=",
            Percent => "%",
            PercentEq => "%=",
            Lt => "<",
            LtLt => "<<",
            LtLtEq => "<<=",
            LtEq => "<=",
            Gt => ">",
            GtGt => ">>",
            GtEq => ">=",
            GtGtEq => ">>=",
            Caret => "^",
            CaretEq => "^=",
            Pipe => "|",
            PipePipe => "||",
            PipeEq => "|=",
            Question => "?",
            Colon => ":",
            Semicolon => ";",
            Assign => "=",
            EqEq => "==",
            Comma => ",",
            Hash => "#",
            HashHash => "##",
            Backslash => "\\",
            _ => return None,
        })
    }

    pub fn is_trivia(self) -> bool {
        matches!(self, TokenKind::Space | TokenKind::Comment)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.canonical_text() {
            Some(text) => write!(f, "{text}"),
            None => write!(f, "{self:?}"),
        }
    }
}

/// One produced token. Owned by whoever holds it; cheap to clone (the
/// literal's byte backing is reference counted).
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: Lexeme,
    pub location: Position,
    /// True iff this is the first non-whitespace/comment token on its
    /// line.
    pub begin_of_line: bool,
    /// Count of whitespace characters and skipped comments between the
    /// previous semantic token and this one.
    pub leading_space: usize,
    /// Opaque, preprocessor-owned; the lexer only ever `dup`s it.
    pub hideset: HideSet,
}

impl Token {
    pub fn new(kind: TokenKind, literal: impl Into<Lexeme>, location: Position) -> Self {
        Self {
            kind,
            literal: literal.into(),
            location,
            begin_of_line: false,
            leading_space: 0,
            hideset: HideSet::empty(),
        }
    }

    pub fn punctuator(kind: TokenKind, location: Position) -> Self {
        let text = kind
            .canonical_text()
            .expect("punctuator token kind must have canonical text");
        Self::new(kind, text, location)
    }

    /// Duplicate this token, preserving its hideset unexamined — the
    /// lexer never inspects a hideset, only carries it forward.
    pub fn dup(&self) -> Self {
        self.clone()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?}({:?}) at {}:{}",
            self.kind,
            self.literal.as_str(),
            self.location.line,
            self.location.column
        )
    }
}
