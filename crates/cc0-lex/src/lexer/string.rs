//! String/character literal lexing (§4.2).
//!
//! The backslash of an escape sequence is kept in the raw token text — the
//! one-state escape machine here only avoids treating an escaped quote as
//! the terminator; expansion happens later in `cc0-sem` (§4.6). Termination
//! is the matching quote, an embedded newline, or EOF, all silently (no
//! lexical error for an unterminated literal — grounded on
//! `original_source/lexer/token_stream.hpp`'s `read_escaped`).

use crate::cursor::Cursor;
use crate::token::{Token, TokenKind};

pub fn lex_string(cursor: &mut Cursor) -> Token {
    lex_quoted(cursor, b'"', TokenKind::StringLiteral)
}

pub fn lex_character(cursor: &mut Cursor) -> Token {
    lex_quoted(cursor, b'\'', TokenKind::CharacterLiteral)
}

fn lex_quoted(cursor: &mut Cursor, quote: u8, kind: TokenKind) -> Token {
    let (mut last_line, mut last_column) = (cursor.line(), cursor.column());
    cursor.next(); // opening quote

    let mut text = String::new();
    loop {
        match cursor.peek() {
            None => break,
            Some(b'\n') => break,
            Some(byte) if byte == quote => {
                last_line = cursor.line();
                last_column = cursor.column();
                cursor.next();
                break;
            }
            Some(b'\\') => {
                last_line = cursor.line();
                last_column = cursor.column();
                text.push('\\');
                cursor.next();
                if let Some(escaped) = cursor.peek() {
                    last_line = cursor.line();
                    last_column = cursor.column();
                    text.push(escaped as char);
                    cursor.next();
                }
            }
            Some(byte) => {
                last_line = cursor.line();
                last_column = cursor.column();
                text.push(byte as char);
                cursor.next();
            }
        }
    }

    Token::new(kind, text, last_line, last_column)
}
