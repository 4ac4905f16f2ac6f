//! Expression lowering (§4.7). Every non-leaf form follows the same push/pop
//! stack discipline `original_source/compiler/compiler.hpp`'s
//! `compile_expression` uses: evaluate one operand into `%rax`, `pushq` it,
//! evaluate the other operand into `%rax`, `popq %rcx`, combine. Operators
//! the original table doesn't cover (bitwise ops, shifts, `<=`/`>=`) follow
//! the same discipline, generalized in the obvious way (documented per-case
//! below).

use std::io::Write;

use cc0_par::ast::{BinOp, Expr, ExprKind, UnOp};
use cc0_util::Symbol as Ident;

use crate::error::Result;
use crate::mangle::mangle;
use crate::scope::GenScope;

pub(crate) fn emit_expr<W: Write>(
    expr: &Expr,
    writer: &mut W,
    scope: &mut GenScope,
    next_label: &mut u32,
) -> Result<()> {
    match &expr.kind {
        ExprKind::IntegerLiteral(text) => {
            let value: i64 = text.parse().expect("cc0-sem validated this literal parses");
            writeln!(writer, "    movq    ${value}, %rax")?;
        }
        ExprKind::CharacterLiteral { value, .. } => {
            let byte = value.expect("cc0-sem fills in character literal bytes during Pass A");
            writeln!(writer, "    movq    ${byte}, %rax")?;
        }
        ExprKind::StringLiteral { label, .. } => {
            let label = label.expect("cc0-gen's string pool assigns this before any function body runs");
            writeln!(writer, "    leaq    S{label}(%rip), %rax")?;
        }
        ExprKind::Identifier(name) => {
            let offset = scope.fetch(*name);
            writeln!(writer, "    movq    {offset}(%rbp), %rax")?;
        }
        ExprKind::Indexing { .. } => unreachable!("cc0-sem desugars Indexing into Deref(Binary Add) before codegen"),
        ExprKind::Call { callee, args } => emit_call(*callee, args, writer, scope, next_label)?,
        ExprKind::Binary { left, op, right } => emit_binary(left, *op, right, writer, scope, next_label)?,
        ExprKind::Unary { op, operand } => emit_unary(*op, operand, writer, scope, next_label)?,
    }
    Ok(())
}

fn emit_call<W: Write>(
    callee: Ident,
    args: &[Expr],
    writer: &mut W,
    scope: &mut GenScope,
    next_label: &mut u32,
) -> Result<()> {
    if callee.as_str() == "sizeof" {
        let arg = &args[0];
        emit_expr(arg, writer, scope, next_label)?;
        let size = match &arg.kind {
            ExprKind::StringLiteral { bytes, .. } => {
                bytes.as_ref().expect("cc0-sem fills in string bytes during Pass A").len() as i64 * 8 + 8
            }
            _ => 8,
        };
        writeln!(writer, "    movq    ${size}, %rax")?;
        return Ok(());
    }

    const ARG_REGISTERS: [&str; 6] = ["%rdi", "%rsi", "%rdx", "%rcx", "%r8", "%r9"];
    let register_args = args.len().min(6);
    for (i, arg) in args.iter().take(register_args).enumerate() {
        emit_expr(arg, writer, scope, next_label)?;
        writeln!(writer, "    movq    %rax, {}", ARG_REGISTERS[i])?;
    }

    let spilled = args.len().saturating_sub(6);
    for arg in args[6..].iter().rev() {
        emit_expr(arg, writer, scope, next_label)?;
        writeln!(writer, "    pushq   %rax")?;
    }

    writeln!(writer, "    callq   {}", mangle(callee.as_str()))?;
    if spilled > 0 {
        writeln!(writer, "    addq    ${}, %rsp", spilled * 8)?;
    }
    Ok(())
}

fn emit_binary<W: Write>(
    left: &Expr,
    op: BinOp,
    right: &Expr,
    writer: &mut W,
    scope: &mut GenScope,
    next_label: &mut u32,
) -> Result<()> {
    match op {
        BinOp::Assign => return emit_assignment(left, right, writer, scope, next_label),
        BinOp::AddAssign
        | BinOp::SubAssign
        | BinOp::MulAssign
        | BinOp::DivAssign
        | BinOp::ModAssign
        | BinOp::AndAssign
        | BinOp::OrAssign
        | BinOp::XorAssign
        | BinOp::ShlAssign
        | BinOp::ShrAssign => unreachable!("cc0-sem desugars compound assignment before codegen"),
        BinOp::And => return emit_logical_and(left, right, writer, scope, next_label),
        BinOp::Or => return emit_logical_or(left, right, writer, scope, next_label),
        _ => {}
    }

    match op {
        BinOp::Add => emit_pointer_aware_add(left, right, writer, scope, next_label),
        BinOp::Sub => {
            emit_expr(right, writer, scope, next_label)?;
            writeln!(writer, "    pushq   %rax")?;
            emit_expr(left, writer, scope, next_label)?;
            writeln!(writer, "    popq    %rcx")?;
            writeln!(writer, "    subq    %rcx, %rax")?;
            Ok(())
        }
        BinOp::Mul => {
            emit_expr(left, writer, scope, next_label)?;
            writeln!(writer, "    pushq   %rax")?;
            emit_expr(right, writer, scope, next_label)?;
            writeln!(writer, "    popq    %rcx")?;
            writeln!(writer, "    imulq   %rcx, %rax")?;
            Ok(())
        }
        BinOp::Div | BinOp::Mod => {
            emit_expr(right, writer, scope, next_label)?;
            writeln!(writer, "    pushq   %rax")?;
            emit_expr(left, writer, scope, next_label)?;
            writeln!(writer, "    popq    %rcx")?;
            writeln!(writer, "    cqto")?;
            writeln!(writer, "    idivq   %rcx")?;
            if op == BinOp::Mod {
                writeln!(writer, "    movq    %rdx, %rax")?;
            }
            Ok(())
        }
        BinOp::BitAnd => emit_simple_binary(left, right, "andq", writer, scope, next_label),
        BinOp::BitOr => emit_simple_binary(left, right, "orq", writer, scope, next_label),
        BinOp::BitXor => emit_simple_binary(left, right, "xorq", writer, scope, next_label),
        BinOp::Shl => emit_shift(left, right, "shlq", writer, scope, next_label),
        BinOp::Shr => emit_shift(left, right, "sarq", writer, scope, next_label),
        BinOp::Eq => emit_comparison(left, right, "sete", false, writer, scope, next_label),
        BinOp::Ne => emit_comparison(left, right, "setne", false, writer, scope, next_label),
        BinOp::Gt => emit_comparison(left, right, "setg", true, writer, scope, next_label),
        BinOp::Lt => emit_comparison(left, right, "setl", true, writer, scope, next_label),
        BinOp::Ge => emit_comparison(left, right, "setge", true, writer, scope, next_label),
        BinOp::Le => emit_comparison(left, right, "setle", true, writer, scope, next_label),
        BinOp::Assign
        | BinOp::And
        | BinOp::Or
        | BinOp::AddAssign
        | BinOp::SubAssign
        | BinOp::MulAssign
        | BinOp::DivAssign
        | BinOp::ModAssign
        | BinOp::AndAssign
        | BinOp::OrAssign
        | BinOp::XorAssign
        | BinOp::ShlAssign
        | BinOp::ShrAssign => unreachable!("handled above"),
    }
}

/// `+` scales whichever side is not already a pointer by 8, so pointer
/// arithmetic advances by whole elements.
fn emit_pointer_aware_add<W: Write>(
    left: &Expr,
    right: &Expr,
    writer: &mut W,
    scope: &mut GenScope,
    next_label: &mut u32,
) -> Result<()> {
    let left_is_pointer = left.return_type.expect("cc0-sem types every node").is_pointer();
    let right_is_pointer = right.return_type.expect("cc0-sem types every node").is_pointer();

    emit_expr(left, writer, scope, next_label)?;
    if !left_is_pointer && right_is_pointer {
        writeln!(writer, "    salq    $3, %rax")?;
    }
    writeln!(writer, "    pushq   %rax")?;
    emit_expr(right, writer, scope, next_label)?;
    if !right_is_pointer && left_is_pointer {
        writeln!(writer, "    salq    $3, %rax")?;
    }
    writeln!(writer, "    popq    %rcx")?;
    writeln!(writer, "    addq    %rcx, %rax")?;
    Ok(())
}

fn emit_simple_binary<W: Write>(
    left: &Expr,
    right: &Expr,
    instr: &str,
    writer: &mut W,
    scope: &mut GenScope,
    next_label: &mut u32,
) -> Result<()> {
    emit_expr(left, writer, scope, next_label)?;
    writeln!(writer, "    pushq   %rax")?;
    emit_expr(right, writer, scope, next_label)?;
    writeln!(writer, "    popq    %rcx")?;
    writeln!(writer, "    {instr:<7} %rcx, %rax")?;
    Ok(())
}

/// Shifts use the x86-64 `%cl`-register convention: the shift count must sit
/// in `%cl`, so the right-hand operand is moved there instead of `%rcx`
/// wholesale. `>>` lowers to `sarq` (arithmetic, sign-preserving), matching
/// this language's only integer type being signed.
fn emit_shift<W: Write>(
    left: &Expr,
    right: &Expr,
    instr: &str,
    writer: &mut W,
    scope: &mut GenScope,
    next_label: &mut u32,
) -> Result<()> {
    emit_expr(left, writer, scope, next_label)?;
    writeln!(writer, "    pushq   %rax")?;
    emit_expr(right, writer, scope, next_label)?;
    writeln!(writer, "    movq    %rax, %rcx")?;
    writeln!(writer, "    popq    %rax")?;
    writeln!(writer, "    {instr:<7} %cl, %rax")?;
    Ok(())
}

/// `==`/`!=` lower left-then-right; `<`/`>`/`<=`/`>=` lower right-then-left
/// and compare with the operands swapped, matching the original's table.
fn emit_comparison<W: Write>(
    left: &Expr,
    right: &Expr,
    set_instr: &str,
    swapped: bool,
    writer: &mut W,
    scope: &mut GenScope,
    next_label: &mut u32,
) -> Result<()> {
    if swapped {
        emit_expr(right, writer, scope, next_label)?;
        writeln!(writer, "    pushq   %rax")?;
        emit_expr(left, writer, scope, next_label)?;
        writeln!(writer, "    popq    %rcx")?;
    } else {
        emit_expr(left, writer, scope, next_label)?;
        writeln!(writer, "    pushq   %rax")?;
        emit_expr(right, writer, scope, next_label)?;
        writeln!(writer, "    popq    %rcx")?;
    }
    writeln!(writer, "    cmpq    %rcx, %rax")?;
    writeln!(writer, "    {set_instr:<7} %al")?;
    writeln!(writer, "    movzbq  %al, %rax")?;
    Ok(())
}

fn emit_logical_and<W: Write>(
    left: &Expr,
    right: &Expr,
    writer: &mut W,
    scope: &mut GenScope,
    next_label: &mut u32,
) -> Result<()> {
    let l0 = *next_label;
    let l1 = *next_label + 1;
    *next_label += 2;

    emit_expr(left, writer, scope, next_label)?;
    writeln!(writer, "    cmpq    $0, %rax")?;
    writeln!(writer, "    jne     L{l0}")?;
    writeln!(writer, "    jmp     L{l1}")?;
    writeln!(writer, "L{l0}:")?;
    emit_expr(right, writer, scope, next_label)?;
    writeln!(writer, "    cmpq    $0, %rax")?;
    writeln!(writer, "    movq    $0, %rax")?;
    writeln!(writer, "    setne   %al")?;
    writeln!(writer, "L{l1}:")?;
    Ok(())
}

fn emit_logical_or<W: Write>(
    left: &Expr,
    right: &Expr,
    writer: &mut W,
    scope: &mut GenScope,
    next_label: &mut u32,
) -> Result<()> {
    let l0 = *next_label;
    let l1 = *next_label + 1;
    *next_label += 2;

    emit_expr(left, writer, scope, next_label)?;
    writeln!(writer, "    cmpq    $0, %rax")?;
    writeln!(writer, "    je      L{l0}")?;
    writeln!(writer, "    movq    $1, %rax")?;
    writeln!(writer, "    jmp     L{l1}")?;
    writeln!(writer, "L{l0}:")?;
    emit_expr(right, writer, scope, next_label)?;
    writeln!(writer, "    cmpq    $0, %rax")?;
    writeln!(writer, "    movq    $0, %rax")?;
    writeln!(writer, "    setne   %al")?;
    writeln!(writer, "L{l1}:")?;
    Ok(())
}

/// Assignment to a plain identifier stores directly; assignment through a
/// dereference (the only other lvalue shape once `cc0-sem` has desugared
/// indexing away) stores at the address the inner operand evaluates to.
/// Either way the assignment's own value is the stored value, read back from
/// memory in the pointer case (§9 Open Question 5).
fn emit_assignment<W: Write>(
    target: &Expr,
    value: &Expr,
    writer: &mut W,
    scope: &mut GenScope,
    next_label: &mut u32,
) -> Result<()> {
    match &target.kind {
        ExprKind::Identifier(name) => {
            let offset = scope.fetch(*name);
            emit_expr(value, writer, scope, next_label)?;
            writeln!(writer, "    movq    %rax, {offset}(%rbp)")?;
            Ok(())
        }
        ExprKind::Unary { op: UnOp::Deref, operand } => {
            emit_expr(value, writer, scope, next_label)?;
            writeln!(writer, "    pushq   %rax")?;
            emit_expr(operand, writer, scope, next_label)?;
            writeln!(writer, "    popq    %rcx")?;
            writeln!(writer, "    movq    %rcx, (%rax)")?;
            writeln!(writer, "    movq    (%rax), %rax")?;
            Ok(())
        }
        _ => unreachable!("cc0-sem only allows identifiers and dereferences as assignment targets"),
    }
}

fn emit_unary<W: Write>(
    op: UnOp,
    operand: &Expr,
    writer: &mut W,
    scope: &mut GenScope,
    next_label: &mut u32,
) -> Result<()> {
    match op {
        UnOp::Plus => emit_expr(operand, writer, scope, next_label),
        UnOp::Neg => {
            emit_expr(operand, writer, scope, next_label)?;
            writeln!(writer, "    negq    %rax")?;
            Ok(())
        }
        UnOp::Not => {
            emit_expr(operand, writer, scope, next_label)?;
            writeln!(writer, "    cmpq    $0, %rax")?;
            writeln!(writer, "    movq    $0, %rax")?;
            writeln!(writer, "    sete    %al")?;
            Ok(())
        }
        UnOp::BitNot => {
            emit_expr(operand, writer, scope, next_label)?;
            writeln!(writer, "    notq    %rax")?;
            Ok(())
        }
        UnOp::Deref => {
            emit_expr(operand, writer, scope, next_label)?;
            writeln!(writer, "    movq    (%rax), %rax")?;
            Ok(())
        }
        UnOp::AddrOf => emit_address_of(operand, writer, scope, next_label),
    }
}

/// `&x` on a plain identifier takes its stack slot's address directly.
/// `&*(p)` cancels: the dereference never happens, so this just evaluates
/// `p`. After desugaring, these are the only two shapes `cc0-sem` allows as
/// an address-of operand (indexing has already become a dereference).
fn emit_address_of<W: Write>(
    operand: &Expr,
    writer: &mut W,
    scope: &mut GenScope,
    next_label: &mut u32,
) -> Result<()> {
    match &operand.kind {
        ExprKind::Identifier(name) => {
            let offset = scope.fetch(*name);
            writeln!(writer, "    leaq    {offset}(%rbp), %rax")?;
            Ok(())
        }
        ExprKind::Unary { op: UnOp::Deref, operand: inner } => emit_expr(inner, writer, scope, next_label),
        _ => unreachable!("cc0-sem only allows identifiers and dereferences as address-of operands"),
    }
}
