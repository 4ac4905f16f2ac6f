//! Function lowering (§4.7), grounded on
//! `original_source/compiler/compiler.hpp`'s `compile_function`: a fixed
//! four-instruction prologue, the first six parameters spilled from their
//! argument registers into the frame, any remaining parameters left where
//! the caller placed them above the return address.

use std::io::Write;

use cc0_par::ast::Function;

use crate::error::Result;
use crate::frame;
use crate::mangle::mangle;
use crate::scope::GenScope;
use crate::stmt::emit_stmt;

const ARG_REGISTERS: [&str; 6] = ["%rdi", "%rsi", "%rdx", "%rcx", "%r8", "%r9"];

pub(crate) fn emit_function<W: Write>(function: &Function, writer: &mut W, next_label: &mut u32) -> Result<()> {
    let label = mangle(function.name.as_str());
    writeln!(writer, "    .globl  {label}")?;
    writeln!(writer, "{label}:")?;
    writeln!(writer, "    pushq   %rbp")?;
    writeln!(writer, "    movq    %rsp, %rbp")?;
    writeln!(writer, "    subq    ${}, %rsp", frame::size_of(function))?;
    writeln!(writer, "    andq    $-16, %rsp")?;

    let mut scope = GenScope::new();
    declare_params(function, writer, &mut scope)?;

    for stmt in &function.body {
        emit_stmt(stmt, writer, &mut scope, next_label)?;
    }
    Ok(())
}

fn declare_params<W: Write>(function: &Function, writer: &mut W, scope: &mut GenScope) -> Result<()> {
    for (i, param) in function.params.iter().enumerate() {
        if i < 6 {
            let offset = -8 * (i as i32 + 1);
            scope.declare_at(param.name, offset);
            writeln!(writer, "    movq    {}, {offset}(%rbp)", ARG_REGISTERS[i])?;
        } else {
            let offset = (i as i32 - 6) * 8 + 16;
            scope.declare_at(param.name, offset);
        }
    }
    Ok(())
}
