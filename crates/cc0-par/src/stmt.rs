//! Statement parsing (§4.4): dispatch on the leading token, compound
//! statements, conditionals and loops with no `else` branch (§9 Open
//! Question 1), `break`/`continue`, and the "anything else is an expression
//! statement" fallback.

use cc0_lex::TokenKind;
use cc0_util::{Span, Symbol};

use crate::ast::{Stmt, StmtKind};
use crate::Parser;

impl<'a> Parser<'a> {
    pub(crate) fn parse_statement(&mut self) -> Stmt {
        let tok = self.peek();
        let span = Span::new(tok.line, tok.column);

        match tok.kind {
            TokenKind::LBrace => self.parse_compound(),
            TokenKind::KwIf => self.parse_conditional(),
            TokenKind::KwWhile => self.parse_while(),
            TokenKind::KwReturn => self.parse_return(),
            TokenKind::KwInt => self.parse_var_decl(),
            TokenKind::KwBreak => {
                self.advance();
                self.expect(TokenKind::Semicolon);
                Stmt::new(StmtKind::Break, span)
            }
            TokenKind::KwContinue => {
                self.advance();
                self.expect(TokenKind::Semicolon);
                Stmt::new(StmtKind::Continue, span)
            }
            TokenKind::Semicolon => {
                self.advance();
                Stmt::new(StmtKind::NoOp, span)
            }
            _ => {
                let expr = self.parse_expr();
                self.expect(TokenKind::Semicolon);
                Stmt::new(StmtKind::ExpressionStmt(expr), span)
            }
        }
    }

    /// `{` statement* `}`
    pub(crate) fn parse_block(&mut self) -> Vec<Stmt> {
        self.expect(TokenKind::LBrace);
        let mut stmts = Vec::new();
        while !self.at(TokenKind::RBrace) && !self.eof() {
            stmts.push(self.parse_statement());
        }
        self.expect(TokenKind::RBrace);
        stmts
    }

    fn parse_compound(&mut self) -> Stmt {
        let tok = self.peek();
        let span = Span::new(tok.line, tok.column);
        let stmts = self.parse_block();
        Stmt::new(StmtKind::Compound(stmts), span)
    }

    /// `if` `(` expr `)` statement — no `else` (§9 Open Question 1).
    fn parse_conditional(&mut self) -> Stmt {
        let tok = self.peek();
        let span = Span::new(tok.line, tok.column);
        self.expect(TokenKind::KwIf);
        self.expect(TokenKind::LParen);
        let cond = self.parse_expr();
        self.expect(TokenKind::RParen);
        let body = Box::new(self.parse_statement());
        Stmt::new(StmtKind::Conditional { cond, body }, span)
    }

    /// `while` `(` expr `)` statement
    fn parse_while(&mut self) -> Stmt {
        let tok = self.peek();
        let span = Span::new(tok.line, tok.column);
        self.expect(TokenKind::KwWhile);
        self.expect(TokenKind::LParen);
        let cond = self.parse_expr();
        self.expect(TokenKind::RParen);
        let body = Box::new(self.parse_statement());
        Stmt::new(StmtKind::While { cond, body }, span)
    }

    /// `return` expr `;` — this language has only `int` functions, so a
    /// return value is mandatory.
    fn parse_return(&mut self) -> Stmt {
        let tok = self.peek();
        let span = Span::new(tok.line, tok.column);
        self.expect(TokenKind::KwReturn);
        let value = self.parse_expr();
        self.expect(TokenKind::Semicolon);
        Stmt::new(StmtKind::Return(value), span)
    }

    /// `int` `*`* ident ( `=` expr )? `;`
    fn parse_var_decl(&mut self) -> Stmt {
        let tok = self.peek();
        let span = Span::new(tok.line, tok.column);
        let ty = self.parse_type();
        let name_tok = self.expect(TokenKind::Identifier);
        let name = Symbol::intern(&name_tok.text);
        let init = if self.at(TokenKind::Eq) {
            self.advance();
            Some(self.parse_expr())
        } else {
            None
        };
        self.expect(TokenKind::Semicolon);
        Stmt::new(StmtKind::VarDecl { ty, name, init }, span)
    }

    fn eof(&self) -> bool {
        self.at(TokenKind::Eof)
    }
}

#[cfg(test)]
mod tests {
    use cc0_lex::BufferedTokenStream;
    use cc0_util::Handler;

    use super::*;

    fn parse(src: &str) -> Stmt {
        let tokens = BufferedTokenStream::lex_all(src.as_bytes()).unwrap();
        let handler = Handler::new("t.c", src);
        let mut parser = Parser::new(tokens, &handler);
        parser.parse_statement()
    }

    #[test]
    fn conditional_has_no_else_branch() {
        let stmt = parse("if (x) y;");
        match stmt.kind {
            StmtKind::Conditional { .. } => {}
            other => panic!("expected Conditional, got {other:?}"),
        }
    }

    #[test]
    fn while_loop_parses_condition_and_body() {
        let stmt = parse("while (x) { x = x - 1; }");
        match stmt.kind {
            StmtKind::While { body, .. } => {
                assert!(matches!(body.kind, StmtKind::Compound(_)));
            }
            other => panic!("expected While, got {other:?}"),
        }
    }

    #[test]
    fn var_decl_without_initializer() {
        let stmt = parse("int x;");
        match stmt.kind {
            StmtKind::VarDecl { ty, init: None, .. } => assert_eq!(ty.pointer_depth, 0),
            other => panic!("expected VarDecl with no initializer, got {other:?}"),
        }
    }

    #[test]
    fn var_decl_with_pointer_type_and_initializer() {
        let stmt = parse("int* p = q;");
        match stmt.kind {
            StmtKind::VarDecl { ty, init: Some(_), .. } => assert_eq!(ty.pointer_depth, 1),
            other => panic!("expected VarDecl with initializer, got {other:?}"),
        }
    }

    #[test]
    fn empty_statement_is_a_no_op() {
        let stmt = parse(";");
        assert!(matches!(stmt.kind, StmtKind::NoOp));
    }

    #[test]
    fn break_and_continue_require_a_semicolon() {
        assert!(matches!(parse("break;").kind, StmtKind::Break));
        assert!(matches!(parse("continue;").kind, StmtKind::Continue));
    }

    #[test]
    fn bare_expression_becomes_an_expression_statement() {
        let stmt = parse("f(x);");
        assert!(matches!(stmt.kind, StmtKind::ExpressionStmt(_)));
    }

    #[test]
    fn compound_statement_collects_every_inner_statement() {
        let stmt = parse("{ int x; x = 1; return x; }");
        match stmt.kind {
            StmtKind::Compound(stmts) => assert_eq!(stmts.len(), 3),
            other => panic!("expected Compound, got {other:?}"),
        }
    }
}
