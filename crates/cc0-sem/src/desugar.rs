//! Pass B desugaring (§4.6): runs only after Pass A validation has fully
//! succeeded, rewriting indexing and compound assignment into their plainer
//! equivalents so `cc0-gen` only needs one lowering rule for each. The
//! original teaching compiler lowers both directly in codegen instead; this
//! pass exists because the expanded grammar's compound-assignment family
//! would otherwise need its own entry in every codegen lowering table.

use cc0_par::ast::{BinOp, Expr, ExprKind, Stmt, StmtKind, UnOp};

pub(crate) fn desugar_stmt(stmt: &mut Stmt) {
    match &mut stmt.kind {
        StmtKind::Compound(stmts) => stmts.iter_mut().for_each(desugar_stmt),
        StmtKind::Conditional { cond, body } => {
            desugar_expr(cond);
            desugar_stmt(body);
        }
        StmtKind::While { cond, body } => {
            desugar_expr(cond);
            desugar_stmt(body);
        }
        StmtKind::Return(value) => desugar_expr(value),
        StmtKind::VarDecl { init: Some(init), .. } => desugar_expr(init),
        StmtKind::VarDecl { init: None, .. } | StmtKind::NoOp | StmtKind::Break | StmtKind::Continue => {}
        StmtKind::ExpressionStmt(expr) => desugar_expr(expr),
    }
}

/// Recurses into children first, then rewrites the node itself if it is an
/// `Indexing` or a compound assignment.
pub(crate) fn desugar_expr(expr: &mut Expr) {
    match &mut expr.kind {
        ExprKind::IntegerLiteral(_)
        | ExprKind::StringLiteral { .. }
        | ExprKind::CharacterLiteral { .. }
        | ExprKind::Identifier(_) => return,
        ExprKind::Indexing { array, index } => {
            desugar_expr(array);
            desugar_expr(index);
        }
        ExprKind::Call { args, .. } => {
            args.iter_mut().for_each(desugar_expr);
            return;
        }
        ExprKind::Binary { left, right, .. } => {
            desugar_expr(left);
            desugar_expr(right);
        }
        ExprKind::Unary { operand, .. } => {
            desugar_expr(operand);
            return;
        }
    }

    // `array[index]` -> `*(array + index)`, preserving the original
    // indexing node's inferred type.
    if let ExprKind::Indexing { array, index } = &expr.kind {
        let return_type = expr.return_type;
        let sum = Expr {
            kind: ExprKind::Binary { left: array.clone(), op: BinOp::Add, right: index.clone() },
            span: expr.span,
            return_type,
        };
        expr.kind = ExprKind::Unary { op: UnOp::Deref, operand: Box::new(sum) };
        expr.return_type = return_type;
        return;
    }

    // `x OP= y` -> `x = (x OP y)`, preserving the assignment's type (the
    // left operand's).
    if let ExprKind::Binary { op, left, right } = &mut expr.kind {
        if let Some(underlying) = op.underlying() {
            let return_type = expr.return_type;
            let duplicated_lhs = left.clone();
            let placeholder = Box::new(Expr::new(ExprKind::IntegerLiteral(String::new()), expr.span));
            let original_rhs = std::mem::replace(right, placeholder);
            *right = Box::new(Expr {
                kind: ExprKind::Binary { left: duplicated_lhs, op: underlying, right: original_rhs },
                span: expr.span,
                return_type,
            });
            *op = BinOp::Assign;
            expr.return_type = return_type;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cc0_util::{Span, Symbol};

    fn ident(name: &str) -> Expr {
        Expr::new(ExprKind::Identifier(Symbol::intern(name)), Span::new(0, 0))
    }

    #[test]
    fn indexing_desugars_to_deref_of_pointer_plus_index() {
        let mut expr = Expr::new(
            ExprKind::Indexing { array: Box::new(ident("a")), index: Box::new(ident("i")) },
            Span::new(0, 0),
        );
        desugar_expr(&mut expr);
        match expr.kind {
            ExprKind::Unary { op: UnOp::Deref, operand } => match operand.kind {
                ExprKind::Binary { op: BinOp::Add, .. } => {}
                other => panic!("expected Binary Add under the deref, got {other:?}"),
            },
            other => panic!("expected Unary Deref, got {other:?}"),
        }
    }

    #[test]
    fn compound_assignment_desugars_to_plain_assignment_of_the_underlying_op() {
        let mut expr = Expr::new(
            ExprKind::Binary { left: Box::new(ident("x")), op: BinOp::AddAssign, right: Box::new(ident("y")) },
            Span::new(0, 0),
        );
        desugar_expr(&mut expr);
        match expr.kind {
            ExprKind::Binary { op: BinOp::Assign, right, .. } => match right.kind {
                ExprKind::Binary { op: BinOp::Add, .. } => {}
                other => panic!("expected Binary Add on the right, got {other:?}"),
            },
            other => panic!("expected Binary Assign, got {other:?}"),
        }
    }

    #[test]
    fn plain_assignment_is_left_untouched() {
        let mut expr = Expr::new(
            ExprKind::Binary { left: Box::new(ident("x")), op: BinOp::Assign, right: Box::new(ident("y")) },
            Span::new(0, 0),
        );
        desugar_expr(&mut expr);
        assert!(matches!(expr.kind, ExprKind::Binary { op: BinOp::Assign, .. }));
    }
}
