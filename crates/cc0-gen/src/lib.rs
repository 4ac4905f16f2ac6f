//! Code generation (§4.7): a single pass over an already-analyzed `Program`
//! that writes out x86-64 System V AT&T-syntax assembly text, grounded on
//! `original_source/compiler/compiler.hpp`'s `compiler_t`. String literals
//! are pooled ahead of any function body so their labels and the
//! control-flow labels emitted during function bodies share one counter,
//! exactly as the original's single `label` field does.

pub mod error;
mod frame;
mod function;
mod mangle;
mod scope;
mod strings;
mod stmt;
mod expr;

use std::io::Write;

use cc0_par::ast::Program;

use error::Result;

/// Lowers `program` to assembly text, written to `writer`. `program` must
/// already have been through `cc0_sem::Analyzer::analyze` — every node is
/// expected to carry a `return_type` and every indexing/compound-assignment
/// form is expected to already be desugared away.
pub fn generate<W: Write>(mut program: Program, writer: &mut W) -> Result<()> {
    writeln!(writer, "    .text")?;
    let mut next_label = strings::pool(&mut program, writer)?;
    for function in &program.functions {
        function::emit_function(function, writer, &mut next_label)?;
    }
    Ok(())
}
