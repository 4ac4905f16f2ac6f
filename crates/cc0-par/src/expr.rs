//! Expression parsing (§4.4): 13 precedence levels, lowest (assignment)
//! first. Each level is its own function that falls through to the next
//! tighter one, the classic C recursive-descent shape rather than a
//! table-driven Pratt loop — this grammar is small and fixed enough that the
//! per-level functions read as directly as the precedence table itself.

use cc0_lex::TokenKind;
use cc0_util::{Span, Symbol};

use crate::ast::{BinOp, Expr, ExprKind, UnOp};
use crate::Parser;

impl<'a> Parser<'a> {
    pub(crate) fn parse_expr(&mut self) -> Expr {
        self.parse_assignment()
    }

    /// Level 1, right-associative: collects the left-to-right chain of
    /// operands and assignment operators, then folds from the right so
    /// `a = b = c` parses as `a = (b = c)` (§4.4).
    fn parse_assignment(&mut self) -> Expr {
        let mut operands = vec![self.parse_logical_or()];
        let mut ops = Vec::new();

        while let Some(op) = self.match_assignment_op() {
            ops.push(op);
            operands.push(self.parse_logical_or());
        }

        let mut expr = operands.pop().expect("at least one operand was parsed");
        while let Some(op) = ops.pop() {
            let left = operands.pop().expect("one operand per consumed operator");
            let span = left.span;
            expr = Expr::new(
                ExprKind::Binary {
                    left: Box::new(left),
                    op,
                    right: Box::new(expr),
                },
                span,
            );
        }
        expr
    }

    fn match_assignment_op(&mut self) -> Option<BinOp> {
        let op = match self.peek().kind {
            TokenKind::Eq => BinOp::Assign,
            TokenKind::PlusEq => BinOp::AddAssign,
            TokenKind::MinusEq => BinOp::SubAssign,
            TokenKind::StarEq => BinOp::MulAssign,
            TokenKind::SlashEq => BinOp::DivAssign,
            TokenKind::PercentEq => BinOp::ModAssign,
            TokenKind::AmpEq => BinOp::AndAssign,
            TokenKind::PipeEq => BinOp::OrAssign,
            TokenKind::CaretEq => BinOp::XorAssign,
            TokenKind::ShlEq => BinOp::ShlAssign,
            TokenKind::ShrEq => BinOp::ShrAssign,
            _ => return None,
        };
        self.advance();
        Some(op)
    }

    // Level 2: logical or (`||`).
    fn parse_logical_or(&mut self) -> Expr {
        let mut left = self.parse_logical_and();
        while self.at(TokenKind::OrOr) {
            left = self.binary_infix(left, BinOp::Or, Self::parse_logical_and);
        }
        left
    }

    // Level 3: logical and (`&&`).
    fn parse_logical_and(&mut self) -> Expr {
        let mut left = self.parse_bitwise_or();
        while self.at(TokenKind::AndAnd) {
            left = self.binary_infix(left, BinOp::And, Self::parse_bitwise_or);
        }
        left
    }

    // Level 4: bitwise or (`|`).
    fn parse_bitwise_or(&mut self) -> Expr {
        let mut left = self.parse_bitwise_xor();
        while self.at(TokenKind::Pipe) {
            left = self.binary_infix(left, BinOp::BitOr, Self::parse_bitwise_xor);
        }
        left
    }

    // Level 5: bitwise xor (`^`).
    fn parse_bitwise_xor(&mut self) -> Expr {
        let mut left = self.parse_bitwise_and();
        while self.at(TokenKind::Caret) {
            left = self.binary_infix(left, BinOp::BitXor, Self::parse_bitwise_and);
        }
        left
    }

    // Level 6: bitwise and (`&`, disambiguated from unary address-of here
    // because it only ever appears infix at this level).
    fn parse_bitwise_and(&mut self) -> Expr {
        let mut left = self.parse_equality();
        while self.at(TokenKind::Amp) {
            left = self.binary_infix(left, BinOp::BitAnd, Self::parse_equality);
        }
        left
    }

    // Level 7: equality (`==`, `!=`).
    fn parse_equality(&mut self) -> Expr {
        let mut left = self.parse_relational();
        loop {
            let op = match self.peek().kind {
                TokenKind::EqEq => BinOp::Eq,
                TokenKind::NotEq => BinOp::Ne,
                _ => break,
            };
            left = self.binary_infix(left, op, Self::parse_relational);
        }
        left
    }

    // Level 8: relational (`<`, `>`, `<=`, `>=`).
    fn parse_relational(&mut self) -> Expr {
        let mut left = self.parse_shift();
        loop {
            let op = match self.peek().kind {
                TokenKind::Lt => BinOp::Lt,
                TokenKind::Gt => BinOp::Gt,
                TokenKind::Le => BinOp::Le,
                TokenKind::Ge => BinOp::Ge,
                _ => break,
            };
            left = self.binary_infix(left, op, Self::parse_shift);
        }
        left
    }

    // Level 9: shift (`<<`, `>>`).
    fn parse_shift(&mut self) -> Expr {
        let mut left = self.parse_additive();
        loop {
            let op = match self.peek().kind {
                TokenKind::Shl => BinOp::Shl,
                TokenKind::Shr => BinOp::Shr,
                _ => break,
            };
            left = self.binary_infix(left, op, Self::parse_additive);
        }
        left
    }

    // Level 10: additive (`+`, `-`, disambiguated from unary here because
    // they only ever appear infix at this level).
    fn parse_additive(&mut self) -> Expr {
        let mut left = self.parse_multiplicative();
        loop {
            let op = match self.peek().kind {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                _ => break,
            };
            left = self.binary_infix(left, op, Self::parse_multiplicative);
        }
        left
    }

    // Level 11: multiplicative (`*`, `/`, `%`).
    fn parse_multiplicative(&mut self) -> Expr {
        let mut left = self.parse_unary();
        loop {
            let op = match self.peek().kind {
                TokenKind::Star => BinOp::Mul,
                TokenKind::Slash => BinOp::Div,
                TokenKind::Percent => BinOp::Mod,
                _ => break,
            };
            left = self.binary_infix(left, op, Self::parse_unary);
        }
        left
    }

    /// Level 12: unary prefix operators, plus the `int`/`int*…` quirk
    /// (§9 Open Question 2): a type keyword in expression position is not a
    /// cast — it and any following `*` are consumed and folded to the
    /// literal `0`.
    fn parse_unary(&mut self) -> Expr {
        let tok = self.peek();
        let span = Span::new(tok.line, tok.column);

        let un_op = match tok.kind {
            TokenKind::KwInt => {
                self.advance();
                while self.at(TokenKind::Star) {
                    self.advance();
                }
                return Expr::new(ExprKind::IntegerLiteral("0".to_string()), span);
            }
            TokenKind::Star => UnOp::Deref,
            TokenKind::Amp => UnOp::AddrOf,
            TokenKind::Plus => UnOp::Plus,
            TokenKind::Minus => UnOp::Neg,
            TokenKind::Bang => UnOp::Not,
            TokenKind::Tilde => UnOp::BitNot,
            _ => return self.parse_postfix(),
        };

        self.advance();
        let operand = self.parse_unary();
        Expr::new(
            ExprKind::Unary {
                op: un_op,
                operand: Box::new(operand),
            },
            span,
        )
    }

    /// Level 13: primary expressions with trailing `[index]` suffixes.
    fn parse_postfix(&mut self) -> Expr {
        let mut expr = self.parse_primary();
        while self.at(TokenKind::LBracket) {
            let bracket = self.peek();
            self.advance();
            let index = self.parse_expr();
            self.expect(TokenKind::RBracket);
            expr = Expr::new(
                ExprKind::Indexing {
                    array: Box::new(expr),
                    index: Box::new(index),
                },
                Span::new(bracket.line, bracket.column),
            );
        }
        expr
    }

    fn parse_primary(&mut self) -> Expr {
        let tok = self.peek();
        let span = Span::new(tok.line, tok.column);

        match tok.kind {
            TokenKind::IntegerLiteral => {
                self.advance();
                Expr::new(ExprKind::IntegerLiteral(tok.text), span)
            }
            TokenKind::StringLiteral => {
                self.advance();
                Expr::new(
                    ExprKind::StringLiteral {
                        raw: tok.text,
                        bytes: None,
                        label: None,
                    },
                    span,
                )
            }
            TokenKind::CharacterLiteral => {
                self.advance();
                Expr::new(
                    ExprKind::CharacterLiteral {
                        raw: tok.text,
                        value: None,
                    },
                    span,
                )
            }
            TokenKind::Identifier => {
                self.advance();
                let name = Symbol::intern(&tok.text);
                if self.at(TokenKind::LParen) {
                    self.advance();
                    let args = self.parse_argument_list();
                    self.expect(TokenKind::RParen);
                    Expr::new(ExprKind::Call { callee: name, args }, span)
                } else {
                    Expr::new(ExprKind::Identifier(name), span)
                }
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expr();
                self.expect(TokenKind::RParen);
                inner
            }
            _ => {
                let found = tok.kind.describe();
                self.die(
                    cc0_util::diagnostic::E_PARSE_EXPECTED_LITERAL,
                    format!("expected an expression, encountered {found} instead"),
                )
            }
        }
    }

    fn parse_argument_list(&mut self) -> Vec<Expr> {
        let mut args = Vec::new();
        if !self.at(TokenKind::RParen) {
            loop {
                args.push(self.parse_expr());
                if self.at(TokenKind::Comma) {
                    self.advance();
                    continue;
                }
                break;
            }
        }
        args
    }

    /// Consumes the current (already-confirmed) infix operator token, parses
    /// the right-hand side at the next tighter level, and folds into a
    /// left-associative `Binary` node.
    fn binary_infix(&mut self, left: Expr, op: BinOp, next: fn(&mut Self) -> Expr) -> Expr {
        let span = left.span;
        self.advance();
        let right = next(self);
        Expr::new(
            ExprKind::Binary {
                left: Box::new(left),
                op,
                right: Box::new(right),
            },
            span,
        )
    }
}

#[cfg(test)]
mod tests {
    use cc0_lex::BufferedTokenStream;
    use cc0_util::Handler;

    use super::*;

    fn parse(src: &str) -> Expr {
        let tokens = BufferedTokenStream::lex_all(src.as_bytes()).unwrap();
        let handler = Handler::new("t.c", src);
        let mut parser = Parser::new(tokens, &handler);
        parser.parse_expr()
    }

    fn assert_binary(expr: &Expr, op: BinOp) {
        match &expr.kind {
            ExprKind::Binary { op: got, .. } => assert_eq!(*got, op),
            other => panic!("expected Binary({op:?}), got {other:?}"),
        }
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        let expr = parse("1 + 2 * 3");
        assert_binary(&expr, BinOp::Add);
        if let ExprKind::Binary { right, .. } = &expr.kind {
            assert_binary(right, BinOp::Mul);
        }
    }

    #[test]
    fn assignment_is_right_associative() {
        let expr = parse("a = b = 3");
        assert_binary(&expr, BinOp::Assign);
        if let ExprKind::Binary { right, .. } = &expr.kind {
            assert_binary(right, BinOp::Assign);
        } else {
            panic!("expected top-level assignment");
        }
    }

    #[test]
    fn additive_operators_are_left_associative() {
        let expr = parse("1 - 2 - 3");
        assert_binary(&expr, BinOp::Sub);
        if let ExprKind::Binary { left, .. } = &expr.kind {
            assert_binary(left, BinOp::Sub);
        } else {
            panic!("expected nested subtraction on the left");
        }
    }

    #[test]
    fn star_in_prefix_position_is_a_dereference() {
        let expr = parse("*p");
        match expr.kind {
            ExprKind::Unary { op: UnOp::Deref, .. } => {}
            other => panic!("expected Unary(Deref), got {other:?}"),
        }
    }

    #[test]
    fn star_in_infix_position_is_multiplication() {
        let expr = parse("a * b");
        assert_binary(&expr, BinOp::Mul);
    }

    #[test]
    fn ampersand_in_prefix_position_is_address_of() {
        let expr = parse("&x");
        match expr.kind {
            ExprKind::Unary { op: UnOp::AddrOf, .. } => {}
            other => panic!("expected Unary(AddrOf), got {other:?}"),
        }
    }

    #[test]
    fn int_with_stars_in_expression_position_is_literal_zero() {
        let expr = parse("int**");
        match expr.kind {
            ExprKind::IntegerLiteral(ref text) => assert_eq!(text, "0"),
            other => panic!("expected IntegerLiteral(\"0\"), got {other:?}"),
        }
    }

    #[test]
    fn indexing_chains_left_to_right() {
        let expr = parse("a[0][1]");
        match &expr.kind {
            ExprKind::Indexing { array, .. } => {
                assert!(matches!(array.kind, ExprKind::Indexing { .. }));
            }
            other => panic!("expected nested Indexing, got {other:?}"),
        }
    }

    #[test]
    fn call_parses_zero_or_more_comma_separated_arguments() {
        let expr = parse("f(1, 2, 3)");
        match &expr.kind {
            ExprKind::Call { args, .. } => assert_eq!(args.len(), 3),
            other => panic!("expected Call, got {other:?}"),
        }
    }

    #[test]
    fn parenthesized_expression_overrides_precedence() {
        let expr = parse("(1 + 2) * 3");
        assert_binary(&expr, BinOp::Mul);
        if let ExprKind::Binary { left, .. } = &expr.kind {
            assert_binary(left, BinOp::Add);
        }
    }

    #[test]
    fn logical_or_binds_looser_than_logical_and() {
        let expr = parse("a && b || c && d");
        assert_binary(&expr, BinOp::Or);
    }

    #[test]
    fn bitwise_or_xor_and_nest_by_precedence() {
        let expr = parse("a | b ^ c & d");
        assert_binary(&expr, BinOp::BitOr);
        if let ExprKind::Binary { right, .. } = &expr.kind {
            assert_binary(right, BinOp::BitXor);
            if let ExprKind::Binary { right, .. } = &right.kind {
                assert_binary(right, BinOp::BitAnd);
            }
        }
    }
}
