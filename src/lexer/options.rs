//! Option flags consumed by the lexer/stream pipeline.

/// Boolean switches the core reads; everything else (search paths, macro
/// definitions, ...) belongs to the external driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LexerOptions {
    /// Warn when whitespace separates a line-splicing `\` from the newline
    /// it splices (`\  \n` with intervening spaces/tabs).
    pub w_backslash_newline_space: bool,
    /// Warn when a `\`-newline splice runs all the way to end of file.
    pub warn_no_newline_eof: bool,
}
