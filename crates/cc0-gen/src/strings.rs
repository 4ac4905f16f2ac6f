//! String-literal pooling (§4.7): a pre-pass over the whole program that
//! mints a fresh label per string literal and emits its data ahead of any
//! function body, mirroring `original_source/compiler/compiler.hpp`'s
//! `pack_strings`. Labels are drawn from the same counter the control-flow
//! jump labels use later, exactly as the original's single `label` field is
//! shared between `S<n>` and `L<n>` — string pooling simply runs to
//! completion first.

use std::io::Write;

use cc0_par::ast::{Expr, ExprKind, Function, Program, Stmt, StmtKind};

use crate::error::Result;

/// Pools every string literal in `program`, emitting its data to `writer`,
/// and returns the next free label id for control-flow labels to continue
/// from.
pub(crate) fn pool<W: Write>(program: &mut Program, writer: &mut W) -> Result<u32> {
    let mut next_label = 0u32;
    for function in &mut program.functions {
        pool_function(function, writer, &mut next_label)?;
    }
    Ok(next_label)
}

fn pool_function<W: Write>(function: &mut Function, writer: &mut W, next_label: &mut u32) -> Result<()> {
    for stmt in &mut function.body {
        pool_stmt(stmt, writer, next_label)?;
    }
    Ok(())
}

fn pool_stmt<W: Write>(stmt: &mut Stmt, writer: &mut W, next_label: &mut u32) -> Result<()> {
    match &mut stmt.kind {
        StmtKind::Compound(stmts) => {
            for inner in stmts {
                pool_stmt(inner, writer, next_label)?;
            }
        }
        StmtKind::Conditional { cond, body } | StmtKind::While { cond, body } => {
            pool_expr(cond, writer, next_label)?;
            pool_stmt(body, writer, next_label)?;
        }
        StmtKind::Return(value) => pool_expr(value, writer, next_label)?,
        StmtKind::VarDecl { init: Some(init), .. } => pool_expr(init, writer, next_label)?,
        StmtKind::VarDecl { init: None, .. } | StmtKind::NoOp | StmtKind::Break | StmtKind::Continue => {}
        StmtKind::ExpressionStmt(expr) => pool_expr(expr, writer, next_label)?,
    }
    Ok(())
}

fn pool_expr<W: Write>(expr: &mut Expr, writer: &mut W, next_label: &mut u32) -> Result<()> {
    match &mut expr.kind {
        ExprKind::StringLiteral { bytes, label, .. } => {
            let id = *next_label;
            *next_label += 1;
            *label = Some(id);
            writeln!(writer, "S{id}:")?;
            for byte in bytes.as_ref().expect("cc0-sem fills in string bytes during Pass A") {
                writeln!(writer, "    .quad   {byte}")?;
            }
            writeln!(writer, "    .quad   0")?;
        }
        ExprKind::IntegerLiteral(_) | ExprKind::CharacterLiteral { .. } | ExprKind::Identifier(_) => {}
        ExprKind::Indexing { .. } => unreachable!("cc0-sem desugars Indexing before codegen runs"),
        ExprKind::Call { args, .. } => {
            for arg in args {
                pool_expr(arg, writer, next_label)?;
            }
        }
        ExprKind::Binary { left, right, .. } => {
            pool_expr(left, writer, next_label)?;
            pool_expr(right, writer, next_label)?;
        }
        ExprKind::Unary { operand, .. } => pool_expr(operand, writer, next_label)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cc0_par::ast::TypeT;
    use cc0_util::{Span, Symbol};

    fn span() -> Span {
        Span::new(0, 0)
    }

    #[test]
    fn a_string_literal_gets_a_label_and_a_quad_per_byte_plus_a_terminator() {
        let mut program = Program {
            functions: vec![Function {
                return_type: TypeT::int(),
                name: Symbol::intern("main"),
                params: vec![],
                body: vec![Stmt::new(
                    StmtKind::Return(Expr::new(
                        ExprKind::StringLiteral { raw: "hi".into(), bytes: Some(vec![b'h', b'i']), label: None },
                        span(),
                    )),
                    span(),
                )],
                span: span(),
            }],
        };
        let mut out = Vec::new();
        let next = pool(&mut program, &mut out).unwrap();
        assert_eq!(next, 1);
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "S0:\n    .quad   104\n    .quad   105\n    .quad   0\n");
        let StmtKind::Return(value) = &program.functions[0].body[0].kind else { unreachable!() };
        let ExprKind::StringLiteral { label, .. } = &value.kind else { unreachable!() };
        assert_eq!(*label, Some(0));
    }

    #[test]
    fn labels_are_assigned_in_program_order_across_functions() {
        let string = |raw: &str| Expr::new(
            ExprKind::StringLiteral { raw: raw.into(), bytes: Some(raw.as_bytes().to_vec()), label: None },
            span(),
        );
        let mut program = Program {
            functions: vec![
                Function {
                    return_type: TypeT::int(),
                    name: Symbol::intern("a"),
                    params: vec![],
                    body: vec![Stmt::new(StmtKind::Return(string("x")), span())],
                    span: span(),
                },
                Function {
                    return_type: TypeT::int(),
                    name: Symbol::intern("b"),
                    params: vec![],
                    body: vec![Stmt::new(StmtKind::Return(string("y")), span())],
                    span: span(),
                },
            ],
        };
        let mut out = Vec::new();
        let next = pool(&mut program, &mut out).unwrap();
        assert_eq!(next, 2);
    }
}
