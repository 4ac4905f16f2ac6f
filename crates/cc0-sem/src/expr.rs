//! Expression validation and type inference (§4.6 Pass A). Grounded on
//! `original_source/semantic/semantic_analyzer.hpp`'s `validate_expression`/
//! `expression_type`, generalized to the larger operator set `cc0-par`
//! parses (bitwise, shift, the extra relational operators, and compound
//! assignment).

use cc0_par::ast::{BinOp, Expr, ExprKind, TypeT, UnOp};
use cc0_util::diagnostic::{
    E_SEM_ARITY_MISMATCH, E_SEM_BAD_CHAR_LITERAL, E_SEM_POINTER_ARITHMETIC,
    E_SEM_RESERVED_NAME, E_SEM_RVALUE_ADDRESS_OF, E_SEM_RVALUE_ASSIGNMENT, E_SEM_TYPE_MISMATCH,
    E_SEM_UNDECLARED_IDENT,
};
use cc0_util::Span;

use crate::scope::Symbol;
use crate::{can_convert, is_reserved, prettyprint_type, Analyzer};

/// An expression is an lvalue iff it names a storage location directly: an
/// identifier, an indexing expression, or a value-of dereference. Everything
/// else — literals, calls, arithmetic — is an rvalue.
pub(crate) fn is_lvalue(expr: &Expr) -> bool {
    match &expr.kind {
        ExprKind::Identifier(_) | ExprKind::Indexing { .. } => true,
        ExprKind::Unary { op: UnOp::Deref, .. } => true,
        _ => false,
    }
}

impl<'a> Analyzer<'a> {
    /// Computes (and caches into `expr.return_type`) the type of `expr`,
    /// per the type-inference-rules table in §4.6.
    pub(crate) fn expr_type(&mut self, expr: &mut Expr) -> TypeT {
        let ty = match &mut expr.kind {
            ExprKind::IntegerLiteral(_) => TypeT::int(),
            ExprKind::StringLiteral { .. } => TypeT { pointer_depth: 1 },
            ExprKind::CharacterLiteral { .. } => TypeT::int(),
            ExprKind::Identifier(name) => {
                if self.scopes.exists(*name) {
                    self.scopes.fetch(*name).ty
                } else {
                    self.die(
                        E_SEM_UNDECLARED_IDENT,
                        expr.span,
                        format!("unknown identifier '{}'", name.as_str()),
                    )
                }
            }
            ExprKind::Indexing { array, .. } => {
                let array_ty = self.expr_type(array);
                if array_ty.pointer_depth == 0 {
                    self.die(
                        E_SEM_POINTER_ARITHMETIC,
                        expr.span,
                        format!("cannot index expression of type '{}'", prettyprint_type(array_ty)),
                    );
                }
                array_ty.deref_once()
            }
            ExprKind::Call { callee, .. } => {
                if self.scopes.exists(*callee) {
                    self.scopes.fetch(*callee).ty
                } else {
                    // Undeclared callees are accepted (forward references);
                    // the spec's documented concession.
                    TypeT::int()
                }
            }
            ExprKind::Binary { left, op, right } => {
                let op = *op;
                let left_ty = self.expr_type(left);
                let right_ty = self.expr_type(right);
                if op.is_assignment() {
                    left_ty
                } else {
                    match op {
                        BinOp::Add | BinOp::Sub | BinOp::Mul | BinOp::Div | BinOp::Mod => TypeT {
                            pointer_depth: left_ty.pointer_depth.max(right_ty.pointer_depth),
                        },
                        _ => TypeT::int(),
                    }
                }
            }
            ExprKind::Unary { op, operand } => {
                let operand_ty = self.expr_type(operand);
                match op {
                    UnOp::Deref => {
                        if operand_ty.pointer_depth == 0 {
                            self.die(
                                E_SEM_POINTER_ARITHMETIC,
                                expr.span,
                                format!("cannot dereference expression of type '{}'", prettyprint_type(operand_ty)),
                            );
                        }
                        operand_ty.deref_once()
                    }
                    UnOp::AddrOf => operand_ty.ref_once(),
                    UnOp::Plus | UnOp::Neg | UnOp::BitNot => operand_ty,
                    UnOp::Not => TypeT::int(),
                }
            }
        };
        expr.return_type = Some(ty);
        ty
    }

    /// Validates `expr` recursively, dying on the first rule violation.
    pub(crate) fn validate_expr(&mut self, expr: &mut Expr) {
        let span = expr.span;
        match &mut expr.kind {
            ExprKind::IntegerLiteral(_) => {}
            ExprKind::CharacterLiteral { raw, value } => {
                let expanded = crate::escape::expand(self.handler, raw, span);
                if expanded.len() != 1 {
                    self.die(E_SEM_BAD_CHAR_LITERAL, span, "multi-character character literal");
                }
                *value = Some(expanded[0]);
            }
            ExprKind::StringLiteral { raw, bytes, .. } => {
                *bytes = Some(crate::escape::expand(self.handler, raw, span));
            }
            ExprKind::Identifier(name) => {
                let name = *name;
                if is_reserved(name) {
                    self.die(
                        E_SEM_RESERVED_NAME,
                        span,
                        format!("cannot refer to reserved identifier '{}'", name.as_str()),
                    );
                }
                if !self.scopes.exists(name) {
                    self.die(
                        E_SEM_UNDECLARED_IDENT,
                        span,
                        format!("unknown identifier '{}'", name.as_str()),
                    );
                }
            }
            ExprKind::Indexing { array, index } => {
                self.validate_expr(array);
                self.validate_expr(index);
                let index_ty = self.expr_type(index);
                if !can_convert(index_ty, TypeT::int()) {
                    self.die(
                        E_SEM_TYPE_MISMATCH,
                        span,
                        format!("cannot convert index expression of type '{}' to 'int'", prettyprint_type(index_ty)),
                    );
                }
            }
            ExprKind::Call { callee, args } => {
                let callee = *callee;
                if self.scopes.exists(callee) {
                    let symbol: Symbol = self.scopes.fetch(callee).clone();
                    if !symbol.is_function {
                        self.die(
                            E_SEM_TYPE_MISMATCH,
                            span,
                            format!("called variable '{}' is not a function", callee.as_str()),
                        );
                    }
                    if symbol.parameters.len() != args.len() {
                        self.die(
                            E_SEM_ARITY_MISMATCH,
                            span,
                            format!("no matching function call to '{}'", callee.as_str()),
                        );
                    }
                    for (arg, expected) in args.iter_mut().zip(symbol.parameters.iter()) {
                        let arg_ty = self.expr_type(arg);
                        if !can_convert(arg_ty, *expected) {
                            self.die(
                                E_SEM_TYPE_MISMATCH,
                                arg.span,
                                format!(
                                    "cannot convert parameter expression of type '{}' to '{}'",
                                    prettyprint_type(arg_ty),
                                    prettyprint_type(*expected)
                                ),
                            );
                        }
                    }
                }
                for arg in args.iter_mut() {
                    self.validate_expr(arg);
                }
            }
            ExprKind::Binary { left, op, right } => {
                let op = *op;
                self.validate_expr(left);
                self.validate_expr(right);
                self.validate_binary(op, left, right, span);
            }
            ExprKind::Unary { op, operand } => {
                let op = *op;
                self.validate_expr(operand);
                self.validate_unary(op, operand, span);
            }
        }
        self.expr_type(expr);
    }

    fn validate_binary(&mut self, op: BinOp, left: &mut Expr, right: &mut Expr, span: Span) {
        let left_ty = self.expr_type(left);
        let right_ty = self.expr_type(right);

        if op.is_assignment() && !is_lvalue(left) {
            self.die(E_SEM_RVALUE_ASSIGNMENT, left.span, "expression is not assignable");
        }

        match op {
            BinOp::Eq | BinOp::Ne => {
                if !can_convert(left_ty, right_ty) {
                    self.die(
                        E_SEM_TYPE_MISMATCH,
                        span,
                        format!(
                            "invalid operands to binary expression ('{}' and '{}')",
                            prettyprint_type(left_ty),
                            prettyprint_type(right_ty)
                        ),
                    );
                }
            }
            BinOp::And | BinOp::Or | BinOp::Gt | BinOp::Lt | BinOp::Ge | BinOp::Le => {
                if !can_convert(left_ty, TypeT::int()) || !can_convert(right_ty, TypeT::int()) {
                    self.die(
                        E_SEM_TYPE_MISMATCH,
                        span,
                        format!(
                            "invalid operands to binary expression ('{}' and '{}')",
                            prettyprint_type(left_ty),
                            prettyprint_type(right_ty)
                        ),
                    );
                }
            }
            _ => {
                // Plain/compound arithmetic and bitwise/shift operators:
                // validate against the underlying operator for the
                // pointer-arithmetic restrictions (§4.6).
                if !can_convert(left_ty, right_ty) {
                    self.die(
                        E_SEM_TYPE_MISMATCH,
                        span,
                        format!(
                            "invalid operands to binary expression ('{}' and '{}')",
                            prettyprint_type(left_ty),
                            prettyprint_type(right_ty)
                        ),
                    );
                }
                let underlying = op.underlying().unwrap_or(op);
                self.check_pointer_restriction(underlying, left_ty, right_ty, span);
            }
        }
    }

    fn check_pointer_restriction(&self, op: BinOp, left_ty: TypeT, right_ty: TypeT, span: Span) {
        let either_pointer = left_ty.pointer_depth > 0 || right_ty.pointer_depth > 0;
        let scaling_forbidden_on_pointers = matches!(
            op,
            BinOp::Mul
                | BinOp::Div
                | BinOp::Mod
                | BinOp::BitAnd
                | BinOp::BitOr
                | BinOp::BitXor
                | BinOp::Shl
                | BinOp::Shr
        );
        if either_pointer && scaling_forbidden_on_pointers {
            self.die(
                E_SEM_POINTER_ARITHMETIC,
                span,
                format!(
                    "invalid operands to binary expression ('{}' and '{}')",
                    prettyprint_type(left_ty),
                    prettyprint_type(right_ty)
                ),
            );
        }
        if op == BinOp::Add && left_ty.pointer_depth > 0 && right_ty.pointer_depth > 0 {
            self.die(
                E_SEM_POINTER_ARITHMETIC,
                span,
                format!(
                    "invalid operands to binary expression ('{}' and '{}')",
                    prettyprint_type(left_ty),
                    prettyprint_type(right_ty)
                ),
            );
        }
    }

    fn validate_unary(&mut self, op: UnOp, operand: &mut Expr, span: Span) {
        let operand_ty = self.expr_type(operand);
        match op {
            UnOp::Deref => {
                if operand_ty.pointer_depth < 1 {
                    self.die(
                        E_SEM_POINTER_ARITHMETIC,
                        span,
                        format!("cannot dereference expression of type '{}'", prettyprint_type(operand_ty)),
                    );
                }
            }
            UnOp::Plus | UnOp::Neg | UnOp::BitNot => {
                if operand_ty.pointer_depth > 0 {
                    self.die(
                        E_SEM_POINTER_ARITHMETIC,
                        span,
                        format!("wrong type argument to unary operator ('{}')", prettyprint_type(operand_ty)),
                    );
                }
            }
            UnOp::AddrOf => {
                if !is_lvalue(operand) {
                    self.die(
                        E_SEM_RVALUE_ADDRESS_OF,
                        span,
                        format!(
                            "cannot take the address of an rvalue of type '{}'",
                            prettyprint_type(operand_ty)
                        ),
                    );
                }
            }
            UnOp::Not => {}
        }
    }
}
