//! Top-level token dispatch (§4.2): one `Token` per call, driven purely by
//! the next unconsumed byte after trivia has been skipped.

use super::comment::skip_trivia;
use super::identifier::lex_identifier;
use super::number::lex_integer;
use super::operator::lex_operator;
use super::string::{lex_character, lex_string};
use crate::cursor::Cursor;
use crate::error::LexError;
use crate::token::{Token, TokenKind};

pub struct Lexer<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a [u8]) -> Self {
        Self {
            cursor: Cursor::new(source),
        }
    }

    /// Produces the next token, or `TokenKind::Eof` once the source is
    /// exhausted. `Eof` is repeatable: calling `next_token` again after it
    /// keeps returning `Eof` rather than panicking.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        skip_trivia(&mut self.cursor);

        let (line, column) = (self.cursor.line(), self.cursor.column());
        let Some(byte) = self.cursor.peek() else {
            return Ok(Token::new(TokenKind::Eof, "", line, column));
        };

        if byte.is_ascii_alphabetic() || byte == b'_' {
            return Ok(lex_identifier(&mut self.cursor));
        }
        if byte.is_ascii_digit() {
            return Ok(lex_integer(&mut self.cursor));
        }
        if byte == b'"' {
            return Ok(lex_string(&mut self.cursor));
        }
        if byte == b'\'' {
            return Ok(lex_character(&mut self.cursor));
        }
        lex_operator(&mut self.cursor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        let mut lexer = Lexer::new(src.as_bytes());
        let mut out = Vec::new();
        loop {
            let tok = lexer.next_token().unwrap();
            let done = tok.kind == TokenKind::Eof;
            out.push(tok.kind);
            if done {
                break;
            }
        }
        out
    }

    #[test]
    fn dispatches_every_token_family() {
        use TokenKind::*;
        assert_eq!(
            kinds("int x = 1 + y; // trailing comment\n"),
            vec![
                KwInt, Identifier, Eq, IntegerLiteral, Plus, Identifier, Semicolon, Eof
            ]
        );
    }

    #[test]
    fn comments_and_whitespace_produce_no_tokens() {
        use TokenKind::*;
        assert_eq!(kinds("  \n// just a comment\n  "), vec![Eof]);
    }

    #[test]
    fn eof_is_repeatable() {
        let mut lexer = Lexer::new(b"");
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Eof);
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Eof);
    }

    #[test]
    fn unexpected_byte_surfaces_as_lex_error() {
        let mut lexer = Lexer::new(b"@");
        assert!(lexer.next_token().is_err());
    }

    #[test]
    fn string_and_character_literals_are_dispatched() {
        use TokenKind::*;
        assert_eq!(
            kinds("\"hi\" 'a'"),
            vec![StringLiteral, CharacterLiteral, Eof]
        );
    }
}
