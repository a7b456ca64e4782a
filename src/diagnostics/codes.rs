//! Error-code registry: each diagnosable condition gets a static
//! `ErrorCode { code, title }`. Codes are namespaced `C0xx` (lexical) to
//! leave room for a future preprocessor/parser registry.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorCode {
    pub code: &'static str,
    pub title: &'static str,
}

macro_rules! error_codes {
    ($($name:ident => ($code:literal, $title:literal)),* $(,)?) => {
        $(
            pub static $name: ErrorCode = ErrorCode { code: $code, title: $title };
        )*
    };
}

error_codes! {
    UNTERMINATED_CHAR_CONST => ("C001", "missing terminating ' character"),
    UNTERMINATED_STRING_LITERAL => ("C002", "unterminated string literal"),
    EMPTY_CHAR_CONST => ("C003", "empty character constant"),
    HEX_ESCAPE_NO_DIGITS => ("C004", "\\x used with no following hex digits"),
    INVALID_UCN => ("C005", "invalid universal character name"),
    UNTERMINATED_BLOCK_COMMENT => ("C006", "unterminated comment"),
    UNKNOWN_ESCAPE_SEQUENCE => ("C007", "unknown escape sequence"),
    BACKSLASH_NEWLINE_SPACE => ("C008", "backslash and newline separated by space"),
    BACKSLASH_NEWLINE_AT_EOF => ("C009", "backslash-newline at end of file"),
}
