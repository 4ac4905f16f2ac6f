//! Statement lowering (§4.7), grounded on
//! `original_source/compiler/compiler.hpp`'s `compile_statement`. Break and
//! continue read the enclosing loop's labels straight off the current scope
//! (§9 Open Question 8) rather than threading them through every call,
//! mirroring the original's `symbols.loop_break_to`/`loop_continue_to`
//! member reads.

use std::io::Write;

use cc0_par::ast::{Stmt, StmtKind};

use crate::error::Result;
use crate::expr::emit_expr;
use crate::scope::GenScope;

pub(crate) fn emit_stmt<W: Write>(
    stmt: &Stmt,
    writer: &mut W,
    scope: &mut GenScope,
    next_label: &mut u32,
) -> Result<()> {
    match &stmt.kind {
        StmtKind::Compound(stmts) => {
            scope.enter();
            for inner in stmts {
                emit_stmt(inner, writer, scope, next_label)?;
            }
            scope.exit();
            Ok(())
        }
        StmtKind::Conditional { cond, body } => {
            let end = *next_label;
            *next_label += 1;
            emit_expr(cond, writer, scope, next_label)?;
            writeln!(writer, "    cmpq    $0, %rax")?;
            writeln!(writer, "    je      L{end}")?;
            scope.enter();
            emit_stmt(body, writer, scope, next_label)?;
            scope.exit();
            writeln!(writer, "L{end}:")?;
            Ok(())
        }
        StmtKind::While { cond, body } => {
            let start = *next_label;
            let end = *next_label + 1;
            *next_label += 2;
            writeln!(writer, "L{start}:")?;
            emit_expr(cond, writer, scope, next_label)?;
            writeln!(writer, "    cmpq    $0, %rax")?;
            writeln!(writer, "    je      L{end}")?;
            scope.enter_loop(end, start);
            emit_stmt(body, writer, scope, next_label)?;
            scope.exit();
            writeln!(writer, "    jmp     L{start}")?;
            writeln!(writer, "L{end}:")?;
            Ok(())
        }
        StmtKind::Return(value) => {
            emit_expr(value, writer, scope, next_label)?;
            writeln!(writer, "    movq    %rbp, %rsp")?;
            writeln!(writer, "    popq    %rbp")?;
            writeln!(writer, "    retq")?;
            Ok(())
        }
        StmtKind::VarDecl { name, init, .. } => {
            let offset = scope.declare(*name);
            if let Some(init) = init {
                emit_expr(init, writer, scope, next_label)?;
                writeln!(writer, "    movq    %rax, {offset}(%rbp)")?;
            }
            Ok(())
        }
        StmtKind::Break => {
            let target = scope.loop_break_to();
            writeln!(writer, "    jmp     L{target}")?;
            Ok(())
        }
        StmtKind::Continue => {
            let target = scope.loop_continue_to();
            writeln!(writer, "    jmp     L{target}")?;
            Ok(())
        }
        StmtKind::NoOp => Ok(()),
        StmtKind::ExpressionStmt(expr) => emit_expr(expr, writer, scope, next_label),
    }
}
