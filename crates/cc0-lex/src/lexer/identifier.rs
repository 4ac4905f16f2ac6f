//! Identifier/keyword lexing (§4.2): `[A-Za-z_][A-Za-z0-9_]*`.

use crate::cursor::Cursor;
use crate::token::{Token, TokenKind};

pub fn lex_identifier(cursor: &mut Cursor) -> Token {
    let mut text = String::new();
    let (mut last_line, mut last_column) = (cursor.line(), cursor.column());

    while let Some(byte) = cursor.peek() {
        if byte.is_ascii_alphanumeric() || byte == b'_' {
            last_line = cursor.line();
            last_column = cursor.column();
            text.push(byte as char);
            cursor.next();
        } else {
            break;
        }
    }

    let kind = keyword_kind(&text).unwrap_or(TokenKind::Identifier);
    Token::new(kind, text, last_line, last_column)
}

fn keyword_kind(text: &str) -> Option<TokenKind> {
    Some(match text {
        "if" => TokenKind::KwIf,
        "else" => TokenKind::KwElse,
        "while" => TokenKind::KwWhile,
        "return" => TokenKind::KwReturn,
        "break" => TokenKind::KwBreak,
        "continue" => TokenKind::KwContinue,
        "int" => TokenKind::KwInt,
        _ => return None,
    })
}
