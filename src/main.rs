use std::env;
use std::process::ExitCode;

use cfront::diagnostics::render::render;
use cfront::diagnostics::CollectingSink;
use cfront::interner::Interner;
use cfront::lexer::{Lexer, LexerOptions, Reader, StreamSpec, TokenKind};

/// Minimal driver: lex a file (or stdin) and print one line per token.
/// Everything past tokenization — preprocessing, parsing, codegen — is
/// somebody else's crate.
fn main() -> ExitCode {
    let path = env::args().nth(1);

    let mut pool = Interner::new();
    let mut reader = Reader::new();
    let push_result = match &path {
        Some(path) => reader.push(&mut pool, StreamSpec::File(path)),
        None => {
            use std::io::Read;
            let mut src = Vec::new();
            if let Err(err) = std::io::stdin().read_to_end(&mut src) {
                eprintln!("cfront: error reading stdin: {err}");
                return ExitCode::FAILURE;
            }
            reader.push(&mut pool, StreamSpec::String { name: "<stdin>", bytes: &src })
        }
    };

    if let Err(err) = push_result {
        eprintln!("cfront: {}: {err}", path.as_deref().unwrap_or("<stdin>"));
        return ExitCode::FAILURE;
    }

    let mut lexer = Lexer::new(reader, LexerOptions::default());
    let mut sink = CollectingSink::new();

    loop {
        let tok = lexer.next(&mut sink);
        if matches!(tok.kind, TokenKind::End) {
            break;
        }
        println!(
            "{}:{}: {:?} {:?}",
            tok.location.line,
            tok.location.column,
            tok.kind,
            tok.literal.as_str()
        );
    }

    let mut had_errors = false;
    for diag in sink.into_diagnostics() {
        had_errors |= diag.severity() == cfront::diagnostics::Severity::Error;
        eprintln!("{}", render(&diag));
    }

    if had_errors { ExitCode::FAILURE } else { ExitCode::SUCCESS }
}
