//! Punctuation and operator lexing (§4.2), including the four ambiguous
//! tokens `*`, `&`, `+`, `-` whose arity the parser later decides (§9).

use crate::cursor::Cursor;
use crate::error::LexError;
use crate::token::{Token, TokenKind};

pub fn lex_operator(cursor: &mut Cursor) -> Result<Token, LexError> {
    let (line, column) = (cursor.line(), cursor.column());
    let first = cursor.next().expect("caller checked peek() is Some");

    let single = |kind: TokenKind, ch: u8| Token::new(kind, (ch as char).to_string(), line, column);

    let result = match first {
        b'(' => single(TokenKind::LParen, first),
        b')' => single(TokenKind::RParen, first),
        b'[' => single(TokenKind::LBracket, first),
        b']' => single(TokenKind::RBracket, first),
        b'{' => single(TokenKind::LBrace, first),
        b'}' => single(TokenKind::RBrace, first),
        b',' => single(TokenKind::Comma, first),
        b';' => single(TokenKind::Semicolon, first),
        b'~' => single(TokenKind::Tilde, first),

        b'+' => maybe_eq(cursor, line, column, "+", TokenKind::Plus, TokenKind::PlusEq),
        b'-' => maybe_eq(cursor, line, column, "-", TokenKind::Minus, TokenKind::MinusEq),
        b'*' => maybe_eq(cursor, line, column, "*", TokenKind::Star, TokenKind::StarEq),
        b'/' => maybe_eq(cursor, line, column, "/", TokenKind::Slash, TokenKind::SlashEq),
        b'%' => maybe_eq(cursor, line, column, "%", TokenKind::Percent, TokenKind::PercentEq),
        b'^' => maybe_eq(cursor, line, column, "^", TokenKind::Caret, TokenKind::CaretEq),
        b'=' => maybe_eq(cursor, line, column, "=", TokenKind::Eq, TokenKind::EqEq),
        b'!' => maybe_eq(cursor, line, column, "!", TokenKind::Bang, TokenKind::NotEq),

        b'&' => lex_amp_or_pipe(
            cursor, line, column, '&', TokenKind::Amp, TokenKind::AndAnd, TokenKind::AmpEq,
        ),
        b'|' => lex_amp_or_pipe(
            cursor, line, column, '|', TokenKind::Pipe, TokenKind::OrOr, TokenKind::PipeEq,
        ),

        b'<' => lex_shift_or_relational(
            cursor, line, column, '<', TokenKind::Lt, TokenKind::Le, TokenKind::Shl,
            TokenKind::ShlEq,
        ),
        b'>' => lex_shift_or_relational(
            cursor, line, column, '>', TokenKind::Gt, TokenKind::Ge, TokenKind::Shr,
            TokenKind::ShrEq,
        ),

        _ => return Err(LexError::UnexpectedByte { line, column }),
    };

    Ok(result)
}

/// `c` or `c=`.
fn maybe_eq(
    cursor: &mut Cursor,
    line: u32,
    column: u32,
    text: &str,
    plain: TokenKind,
    with_eq: TokenKind,
) -> Token {
    if cursor.peek() == Some(b'=') {
        let (l, c) = (cursor.line(), cursor.column());
        cursor.next();
        Token::new(with_eq, format!("{text}="), l, c)
    } else {
        Token::new(plain, text, line, column)
    }
}

/// `&` -> Amp / `&&` -> AndAnd / `&=` -> AmpEq (and symmetrically for `|`).
fn lex_amp_or_pipe(
    cursor: &mut Cursor,
    line: u32,
    column: u32,
    doubled: char,
    plain: TokenKind,
    double: TokenKind,
    with_eq: TokenKind,
) -> Token {
    if cursor.peek() == Some(doubled as u8) {
        let (l, c) = (cursor.line(), cursor.column());
        cursor.next();
        Token::new(double, format!("{doubled}{doubled}"), l, c)
    } else if cursor.peek() == Some(b'=') {
        let (l, c) = (cursor.line(), cursor.column());
        cursor.next();
        Token::new(with_eq, format!("{doubled}="), l, c)
    } else {
        Token::new(plain, doubled.to_string(), line, column)
    }
}

/// `<`/`>` -> plain / `<=`/`>=` -> relational / `<<`/`>>` -> shift /
/// `<<=`/`>>=` -> shift-assign.
fn lex_shift_or_relational(
    cursor: &mut Cursor,
    line: u32,
    column: u32,
    doubled: char,
    plain: TokenKind,
    with_eq: TokenKind,
    shift: TokenKind,
    shift_eq: TokenKind,
) -> Token {
    if cursor.peek() == Some(doubled as u8) {
        let (l1, c1) = (cursor.line(), cursor.column());
        cursor.next();
        if cursor.peek() == Some(b'=') {
            let (l2, c2) = (cursor.line(), cursor.column());
            cursor.next();
            Token::new(shift_eq, format!("{doubled}{doubled}="), l2, c2)
        } else {
            Token::new(shift, format!("{doubled}{doubled}"), l1, c1)
        }
    } else if cursor.peek() == Some(b'=') {
        let (l, c) = (cursor.line(), cursor.column());
        cursor.next();
        Token::new(with_eq, format!("{doubled}="), l, c)
    } else {
        Token::new(plain, doubled.to_string(), line, column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex_one(src: &str) -> Token {
        let mut cursor = Cursor::new(src.as_bytes());
        lex_operator(&mut cursor).unwrap()
    }

    #[test]
    fn single_char_operators_and_punctuation() {
        assert_eq!(lex_one("+").kind, TokenKind::Plus);
        assert_eq!(lex_one("-").kind, TokenKind::Minus);
        assert_eq!(lex_one("*").kind, TokenKind::Star);
        assert_eq!(lex_one("&").kind, TokenKind::Amp);
        assert_eq!(lex_one("|").kind, TokenKind::Pipe);
        assert_eq!(lex_one("(").kind, TokenKind::LParen);
        assert_eq!(lex_one(";").kind, TokenKind::Semicolon);
    }

    #[test]
    fn two_character_operators() {
        for (src, kind) in [
            ("==", TokenKind::EqEq),
            ("!=", TokenKind::NotEq),
            ("&&", TokenKind::AndAnd),
            ("||", TokenKind::OrOr),
            (">=", TokenKind::Ge),
            ("<=", TokenKind::Le),
            ("+=", TokenKind::PlusEq),
            ("-=", TokenKind::MinusEq),
            ("*=", TokenKind::StarEq),
            ("/=", TokenKind::SlashEq),
            ("%=", TokenKind::PercentEq),
            ("&=", TokenKind::AmpEq),
            ("|=", TokenKind::PipeEq),
            ("^=", TokenKind::CaretEq),
            ("<<", TokenKind::Shl),
            (">>", TokenKind::Shr),
        ] {
            let tok = lex_one(src);
            assert_eq!(tok.kind, kind, "lexing {src:?}");
            assert_eq!(tok.text, src);
        }
    }

    #[test]
    fn three_character_shift_assign_operators() {
        assert_eq!(lex_one("<<=").kind, TokenKind::ShlEq);
        assert_eq!(lex_one(">>=").kind, TokenKind::ShrEq);
    }

    #[test]
    fn unexpected_byte_is_a_lex_error() {
        let mut cursor = Cursor::new(b"@");
        assert!(lex_operator(&mut cursor).is_err());
    }

    #[test]
    fn token_position_is_the_last_byte_of_multi_char_operators() {
        let mut cursor = Cursor::new(b"<<=");
        let tok = lex_operator(&mut cursor).unwrap();
        assert_eq!((tok.line, tok.column), (0, 2));
    }
}
