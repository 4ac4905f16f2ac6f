//! Type parsing (§4.4): the only spelling a type can have is `int` followed
//! by zero or more `*`, so this is a couple of token checks rather than the
//! path/generics/reference dispatch a general-purpose language needs.

use cc0_lex::TokenKind;
use cc0_util::Symbol;

use crate::ast::{Param, TypeT};
use crate::Parser;

impl<'a> Parser<'a> {
    /// Consumes `int` then every following `*`, producing the pointer depth.
    pub(crate) fn parse_type(&mut self) -> TypeT {
        self.expect(TokenKind::KwInt);
        let mut pointer_depth = 0u32;
        while self.at(TokenKind::Star) {
            self.advance();
            pointer_depth += 1;
        }
        TypeT { pointer_depth }
    }

    /// `(` [ type ident ( `,` type ident )* ] `)`
    pub(crate) fn parse_parameter_list(&mut self) -> Vec<Param> {
        self.expect(TokenKind::LParen);
        let mut params = Vec::new();
        if !self.at(TokenKind::RParen) {
            loop {
                let ty = self.parse_type();
                let name_tok = self.expect(TokenKind::Identifier);
                params.push(Param {
                    ty,
                    name: Symbol::intern(&name_tok.text),
                });
                if self.at(TokenKind::Comma) {
                    self.advance();
                    continue;
                }
                break;
            }
        }
        self.expect(TokenKind::RParen);
        params
    }
}
