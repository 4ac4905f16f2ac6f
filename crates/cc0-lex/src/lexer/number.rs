//! Decimal integer literal lexing (§4.2): `[0-9]+`, kept verbatim.

use crate::cursor::Cursor;
use crate::token::{Token, TokenKind};

pub fn lex_integer(cursor: &mut Cursor) -> Token {
    let mut text = String::new();
    let (mut last_line, mut last_column) = (cursor.line(), cursor.column());

    while let Some(byte) = cursor.peek() {
        if byte.is_ascii_digit() {
            last_line = cursor.line();
            last_column = cursor.column();
            text.push(byte as char);
            cursor.next();
        } else {
            break;
        }
    }

    Token::new(TokenKind::IntegerLiteral, text, last_line, last_column)
}
