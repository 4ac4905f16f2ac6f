//! Shared infrastructure for the `cc0` compiler crates: interned identifiers,
//! source positions, diagnostics, and the small index-vector helper the
//! semantic analyzer's scope chain is built on.

pub mod diagnostic;
pub mod index_vec;
pub mod span;
pub mod symbol;

pub use diagnostic::{Diagnostic, DiagnosticCode, ExitCode, Handler, Level, Phase};
pub use index_vec::{Idx, IndexVec};
pub use span::Span;
pub use symbol::Symbol;

pub use rustc_hash::FxHashMap;
