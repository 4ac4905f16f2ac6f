//! Semantic analysis (§4.6): a two-pass walk over the parsed `Program`.
//!
//! Pass A validates every function and expression and infers a type into
//! each node's `return_type`, exactly mirroring
//! `original_source/semantic/semantic_analyzer.hpp`'s `validate_function`/
//! `validate_statement`/`validate_expression`. Pass B then desugars indexing
//! and compound assignment (see `desugar`) once the whole program is known
//! to be well-typed. A single `Analyzer` instance owns the scope chain and
//! the diagnostic handler for the run; like `cc0-par`'s `Parser`, the first
//! rule violation it finds is fatal (§7) — there is no error recovery.

pub mod scope;

mod desugar;
mod escape;
mod expr;
mod stmt;

use cc0_par::ast::{Function, Program, TypeT};
use cc0_util::diagnostic::{DiagnosticCode, E_SEM_REDEFINITION, E_SEM_RESERVED_NAME};
use cc0_util::{Diagnostic, Handler, Phase, Span, Symbol as Ident};

use scope::{ScopeChain, Symbol};

/// The reserved identifier a function's return type is registered under in
/// its own top scope, so `Return` statements can type-check it via ordinary
/// name resolution instead of a side channel.
pub(crate) const RETURN_SLOT: &str = "__return__";

pub struct Analyzer<'a> {
    scopes: ScopeChain,
    handler: &'a Handler,
}

impl<'a> Analyzer<'a> {
    pub fn new(handler: &'a Handler) -> Self {
        Self { scopes: ScopeChain::new(), handler }
    }

    /// Runs Pass A over the whole program, then Pass B, returning the
    /// program with every expression's `return_type` filled in and every
    /// indexing/compound-assignment node desugared.
    pub fn analyze(mut self, mut program: Program) -> Program {
        self.scopes.add(Symbol::function(TypeT::int(), Ident::intern("sizeof"), vec![TypeT::int()]));

        for function in &program.functions {
            if is_reserved(function.name) {
                self.die(
                    E_SEM_RESERVED_NAME,
                    function.span,
                    format!("cannot declare function with reserved identifier '{}'", function.name.as_str()),
                );
            }
            if self.scopes.exists_locally(function.name) {
                self.die(
                    E_SEM_REDEFINITION,
                    function.span,
                    format!("redefinition of function '{}'", function.name.as_str()),
                );
            }
            let parameters = function.params.iter().map(|p| p.ty).collect();
            self.scopes.add(Symbol::function(function.return_type, function.name, parameters));
        }

        for function in &mut program.functions {
            self.validate_function(function);
        }
        for function in &mut program.functions {
            for stmt in &mut function.body {
                desugar::desugar_stmt(stmt);
            }
        }
        program
    }

    fn die(&self, code: DiagnosticCode, span: Span, message: impl Into<String>) -> ! {
        self.handler.die(Diagnostic::new(Phase::Semantic, code, message, span))
    }
}

/// Whether a value of type `_b` can be used where `_a` is expected. Mirrors
/// `original_source/parser/type.hpp`'s `can_convert`, which unconditionally
/// returns `true` — this language's only real type safety comes from the
/// per-operator pointer-arithmetic restrictions, not a conversion check.
pub(crate) fn can_convert(_a: TypeT, _b: TypeT) -> bool {
    true
}

/// `__return__` and `sizeof` cannot be declared or referenced as ordinary
/// identifiers: the former is the function-return-type slot injected into
/// every function scope, the latter the pre-registered builtin. Delegates
/// to `Symbol::is_reserved`, which also flags the language's keywords.
pub(crate) fn is_reserved(name: Ident) -> bool {
    name.is_reserved()
}

/// `"int"` followed by one `*` per level of pointer depth. Grounded on
/// `original_source/parser/type.hpp`'s `prettyprint_type`.
pub(crate) fn prettyprint_type(ty: TypeT) -> String {
    let mut out = String::from("int");
    for _ in 0..ty.pointer_depth {
        out.push('*');
    }
    out
}
