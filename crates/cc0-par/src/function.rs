//! Top-level parsing (§3, §4.4): a program is nothing but an ordered list of
//! function definitions — no globals, no structs, no includes.

use cc0_lex::TokenKind;
use cc0_util::{Span, Symbol};

use crate::ast::{Function, Program};
use crate::Parser;

pub(crate) fn parse_program(parser: &mut Parser) -> Program {
    let mut functions = Vec::new();
    while !parser.at(TokenKind::Eof) {
        functions.push(parse_function(parser));
    }
    Program { functions }
}

/// type ident `(` parameter-list `)` `{` statement* `}`
fn parse_function(parser: &mut Parser) -> Function {
    let tok = parser.peek();
    let span = Span::new(tok.line, tok.column);

    let return_type = parser.parse_type();
    let name_tok = parser.expect(TokenKind::Identifier);
    let name = Symbol::intern(&name_tok.text);
    let params = parser.parse_parameter_list();
    let body = parser.parse_block();

    Function {
        return_type,
        name,
        params,
        body,
        span,
    }
}
