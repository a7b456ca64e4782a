//! Direct tests of `Token`/`TokenKind` behaviour that doesn't need a whole
//! lexer: canonical spellings, trivia classification, and hideset passthrough.

use cfront::interner::Symbol;
use cfront::lexer::{Token, TokenKind};
use cfront::position::Position;

fn pos() -> Position {
    Position::new(Symbol(0), 1, 1)
}

#[test]
fn punctuator_text_round_trips_through_display() {
    for (kind, text) in [
        (TokenKind::Arrow, "->"),
        (TokenKind::Ellipsis, "..."),
        (TokenKind::LtLtEq, "<<="),
        (TokenKind::HashHash, "##"),
        (TokenKind::ExclaimEq, "!="),
        (TokenKind::Exclaim, "!"),
    ] {
        assert_eq!(kind.canonical_text(), Some(text));
        assert_eq!(format!("{kind}"), text);
    }
}

#[test]
fn exclaim_and_exclaim_eq_are_not_swapped() {
    // A naive copy of the `<`/`<=` two-character-operator pattern could
    // transpose these; the canonical mapping keeps them in the same
    // base/baseEq order every other two-character operator uses.
    assert_eq!(TokenKind::Exclaim.canonical_text(), Some("!"));
    assert_eq!(TokenKind::ExclaimEq.canonical_text(), Some("!="));
}

#[test]
fn literal_bearing_kinds_have_no_fixed_canonical_text() {
    assert_eq!(TokenKind::Identifier.canonical_text(), None);
    assert_eq!(TokenKind::Number.canonical_text(), None);
    assert_eq!(TokenKind::End.canonical_text(), None);
}

#[test]
fn space_and_comment_are_trivia_nothing_else_is() {
    assert!(TokenKind::Space.is_trivia());
    assert!(TokenKind::Comment.is_trivia());
    assert!(!TokenKind::NewLine.is_trivia());
    assert!(!TokenKind::Identifier.is_trivia());
}

#[test]
fn punctuator_constructor_fills_in_canonical_text() {
    let tok = Token::punctuator(TokenKind::Plus, pos());
    assert_eq!(tok.literal.as_str(), "+");
    assert_eq!(tok.kind, TokenKind::Plus);
}

#[test]
fn dup_preserves_hideset_and_is_otherwise_equal() {
    let original = Token::new(TokenKind::Identifier, "foo", pos());
    let duped = original.dup();
    assert_eq!(original, duped);
}
