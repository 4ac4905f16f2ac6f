//! Symbol table (§3, §4.5): a linked scope chain, each scope owning its own
//! symbol list and copying its parent's frame cursor and loop state by value
//! at creation. Grounded on `original_source/semantic/symbol_table.hpp`'s
//! `symbol_table_t`/`symbol_t`, rebuilt as an arena of scopes (rather than a
//! chain of boxed parent pointers) so `fetch`'s "walk up to the first match
//! and hand back a mutable reference" has a straightforward safe-Rust
//! translation — the same arena-of-ribs shape `faxc-sem/src/scope.rs` uses.
//!
//! `loop_break_to`/`loop_continue_to` from the spec's scope struct surface
//! as assembly label ids, which only exist once code generation starts;
//! `cc0-sem` only needs the boolean `in_loop` to validate `break`/`continue`
//! placement, so those two fields live in `cc0-gen`'s own generation context
//! instead of here (see DESIGN.md Open Question resolution 8).

use cc0_par::ast::TypeT;
use cc0_util::{define_idx, FxHashMap, IndexVec, Symbol as Ident};

/// A declared name: a variable, parameter, or function.
///
/// `parameters` is populated only when `is_function` is set. `offset` is the
/// frame-relative slot assigned by the allocation cursor below; per
/// `symbol_t::offset`'s own comment in the original ("Only used by
/// compiler.hpp"), nothing in this crate reads it back — `cc0-gen` computes
/// its own frame layout in a separate pre-pass (§4.7) rather than consuming
/// this one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub ty: TypeT,
    pub name: Ident,
    pub parameters: Vec<TypeT>,
    pub is_function: bool,
    pub offset: i32,
}

impl Symbol {
    pub fn variable(ty: TypeT, name: Ident) -> Self {
        Self { ty, name, parameters: Vec::new(), is_function: false, offset: 0 }
    }

    pub fn function(ty: TypeT, name: Ident, parameters: Vec<TypeT>) -> Self {
        Self { ty, name, parameters, is_function: true, offset: 0 }
    }
}

define_idx!(ScopeId);

struct ScopeData {
    parent: Option<ScopeId>,
    symbols: FxHashMap<Ident, Symbol>,
    offset: i32,
    in_loop: bool,
}

/// The symbol table. `new` creates the single root (global) scope; `enter`/
/// `exit` push and pop child scopes as the analyzer walks into compound
/// statements, conditionals, and loop bodies.
pub struct ScopeChain {
    scopes: IndexVec<ScopeId, ScopeData>,
    current: ScopeId,
}

impl ScopeChain {
    pub fn new() -> Self {
        let root = ScopeData {
            parent: None,
            symbols: FxHashMap::default(),
            offset: 0,
            in_loop: false,
        };
        let mut scopes = IndexVec::new();
        let current = scopes.push(root);
        Self { scopes, current }
    }

    /// Pushes a child scope that inherits the current frame cursor and
    /// `in_loop` flag by value.
    pub fn enter(&mut self) -> ScopeId {
        self.enter_with(self.scopes[self.current].in_loop)
    }

    /// Pushes a child scope explicitly marked as a loop body.
    pub fn enter_loop(&mut self) -> ScopeId {
        self.enter_with(true)
    }

    fn enter_with(&mut self, in_loop: bool) -> ScopeId {
        let parent = self.current;
        let offset = self.scopes[parent].offset;
        let child = ScopeData {
            parent: Some(parent),
            symbols: FxHashMap::default(),
            offset,
            in_loop,
        };
        let id = self.scopes.push(child);
        self.current = id;
        id
    }

    /// Pops back to the parent of the current scope. A no-op at the root.
    pub fn exit(&mut self) {
        if let Some(parent) = self.scopes[self.current].parent {
            self.current = parent;
        }
    }

    /// Adds a symbol to the current scope, assigning it a stack slot from
    /// the running cursor first (functions don't occupy a slot).
    pub fn add(&mut self, mut symbol: Symbol) {
        let scope = &mut self.scopes[self.current];
        if !symbol.is_function {
            symbol.offset = scope.offset;
            scope.offset -= 8;
        }
        scope.symbols.insert(symbol.name, symbol);
    }

    /// Searches this scope, then its parents.
    pub fn exists(&self, name: Ident) -> bool {
        let mut cursor = Some(self.current);
        while let Some(id) = cursor {
            let scope = &self.scopes[id];
            if scope.symbols.contains_key(&name) {
                return true;
            }
            cursor = scope.parent;
        }
        false
    }

    /// Searches only the current scope.
    pub fn exists_locally(&self, name: Ident) -> bool {
        self.scopes[self.current].symbols.contains_key(&name)
    }

    /// Returns a mutable reference to the first match walking up the chain.
    /// Panics if nothing matches — callers must `exists` first.
    pub fn fetch(&mut self, name: Ident) -> &mut Symbol {
        let mut cursor = Some(self.current);
        while let Some(id) = cursor {
            if self.scopes[id].symbols.contains_key(&name) {
                return self.scopes[id].symbols.get_mut(&name).unwrap();
            }
            cursor = self.scopes[id].parent;
        }
        panic!("fetch: no symbol named '{}' in scope chain", name.as_str());
    }

    pub fn in_loop(&self) -> bool {
        self.scopes[self.current].in_loop
    }
}

impl Default for ScopeChain {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_fresh_chain_resolves_nothing() {
        let chain = ScopeChain::new();
        assert!(!chain.exists(Ident::intern("x")));
    }

    #[test]
    fn add_then_exists_in_the_same_scope() {
        let mut chain = ScopeChain::new();
        chain.add(Symbol::variable(TypeT::int(), Ident::intern("x")));
        assert!(chain.exists(Ident::intern("x")));
        assert!(chain.exists_locally(Ident::intern("x")));
    }

    #[test]
    fn a_child_scope_sees_its_parents_symbols_but_not_vice_versa() {
        let mut chain = ScopeChain::new();
        chain.add(Symbol::variable(TypeT::int(), Ident::intern("outer")));
        chain.enter();
        chain.add(Symbol::variable(TypeT::int(), Ident::intern("inner")));
        assert!(chain.exists(Ident::intern("outer")));
        assert!(chain.exists(Ident::intern("inner")));
        assert!(!chain.exists_locally(Ident::intern("outer")));
        chain.exit();
        assert!(!chain.exists(Ident::intern("inner")));
    }

    #[test]
    fn successive_locals_get_distinct_descending_offsets() {
        let mut chain = ScopeChain::new();
        chain.add(Symbol::variable(TypeT::int(), Ident::intern("a")));
        chain.add(Symbol::variable(TypeT::int(), Ident::intern("b")));
        assert_eq!(chain.fetch(Ident::intern("a")).offset, 0);
        assert_eq!(chain.fetch(Ident::intern("b")).offset, -8);
    }

    #[test]
    fn a_child_scope_inherits_its_parents_cursor_by_value() {
        let mut chain = ScopeChain::new();
        chain.add(Symbol::variable(TypeT::int(), Ident::intern("a")));
        chain.enter();
        chain.add(Symbol::variable(TypeT::int(), Ident::intern("b")));
        assert_eq!(chain.fetch(Ident::intern("b")).offset, -8);
    }

    #[test]
    fn functions_do_not_consume_a_stack_slot() {
        let mut chain = ScopeChain::new();
        chain.add(Symbol::function(TypeT::int(), Ident::intern("f"), vec![]));
        chain.add(Symbol::variable(TypeT::int(), Ident::intern("a")));
        assert_eq!(chain.fetch(Ident::intern("a")).offset, 0);
    }

    #[test]
    fn in_loop_propagates_into_nested_non_loop_scopes() {
        let mut chain = ScopeChain::new();
        assert!(!chain.in_loop());
        chain.enter_loop();
        assert!(chain.in_loop());
        chain.enter();
        assert!(chain.in_loop());
        chain.exit();
        chain.exit();
        assert!(!chain.in_loop());
    }

    #[test]
    #[should_panic(expected = "no symbol named")]
    fn fetch_panics_when_the_symbol_does_not_exist() {
        let mut chain = ScopeChain::new();
        chain.fetch(Ident::intern("nope"));
    }
}
