//! Frame-size pre-pass (§4.7): finds the lowest `%rbp` offset a function's
//! locals will use and rounds it up to a multiple of 8, independently of
//! the walk that actually emits code. Grounded on
//! `original_source/compiler/compiler.hpp`'s `aligned_offset`/
//! `aligned_offset_statement`, which re-walks the body a second time for
//! exactly this reason rather than recording it during the real pass.

use cc0_par::ast::{Function, Stmt, StmtKind};

use crate::scope::GenScope;

/// The non-negative, 16-byte-alignment-ready stack space (before the
/// prologue's `andq $-16, %rsp`) a function's locals plus its own spilled
/// parameters require.
pub(crate) fn size_of(function: &Function) -> i32 {
    let mut scope = GenScope::new();
    let mut lowest = 0i32;
    for stmt in &function.body {
        walk_stmt(stmt, &mut scope, &mut lowest);
    }

    let params_offset = if function.params.len() >= 6 { 48 } else { function.params.len() as i32 * 8 };
    let highest = -lowest + params_offset;
    let remainder = highest % 8;
    if remainder == 0 {
        highest
    } else {
        highest + 8 - remainder
    }
}

fn walk_stmt(stmt: &Stmt, scope: &mut GenScope, lowest: &mut i32) {
    match &stmt.kind {
        StmtKind::Compound(stmts) => {
            scope.enter();
            for inner in stmts {
                walk_stmt(inner, scope, lowest);
            }
            scope.exit();
        }
        StmtKind::Conditional { body, .. } | StmtKind::While { body, .. } => {
            scope.enter();
            walk_stmt(body, scope, lowest);
            scope.exit();
        }
        StmtKind::VarDecl { name, .. } => {
            let offset = scope.declare(*name);
            if offset < *lowest {
                *lowest = offset;
            }
        }
        StmtKind::Return(_) | StmtKind::NoOp | StmtKind::Break | StmtKind::Continue | StmtKind::ExpressionStmt(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cc0_par::ast::{Expr, ExprKind, TypeT};
    use cc0_util::{Span, Symbol};

    fn span() -> Span {
        Span::new(0, 0)
    }

    fn var_decl(name: &str) -> Stmt {
        Stmt::new(
            StmtKind::VarDecl { ty: TypeT::int(), name: Symbol::intern(name), init: None },
            span(),
        )
    }

    #[test]
    fn no_locals_and_no_params_needs_no_frame_space() {
        let function = Function {
            return_type: TypeT::int(),
            name: Symbol::intern("f"),
            params: vec![],
            body: vec![Stmt::new(
                StmtKind::Return(Expr::new(ExprKind::IntegerLiteral("0".into()), span())),
                span(),
            )],
            span: span(),
        };
        assert_eq!(size_of(&function), 0);
    }

    #[test]
    fn two_locals_need_sixteen_bytes() {
        let function = Function {
            return_type: TypeT::int(),
            name: Symbol::intern("f"),
            params: vec![],
            body: vec![var_decl("a"), var_decl("b")],
            span: span(),
        };
        assert_eq!(size_of(&function), 16);
    }

    #[test]
    fn locals_inside_nested_blocks_still_count() {
        let function = Function {
            return_type: TypeT::int(),
            name: Symbol::intern("f"),
            params: vec![],
            body: vec![Stmt::new(
                StmtKind::Compound(vec![var_decl("a"), var_decl("b"), var_decl("c")]),
                span(),
            )],
            span: span(),
        };
        assert_eq!(size_of(&function), 24);
    }
}
