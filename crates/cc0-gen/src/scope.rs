//! Frame-layout scope chain (§4.7). Independent of `cc0-sem`'s own scope
//! chain by design (DESIGN.md Open Question resolution 8): the generator
//! recomputes every local's stack offset from scratch in its own pre-pass
//! rather than threading `cc0-sem`'s offsets forward, exactly as
//! `original_source/compiler/compiler.hpp`'s `symbol_table_t` does there.
//! Unlike `cc0-sem`'s chain, each scope here also carries the active loop's
//! break/continue label ids, copied by value into child scopes at creation
//! the same way `in_loop` is copied in `cc0-sem`.

use cc0_util::{define_idx, FxHashMap, IndexVec, Symbol as Ident};

define_idx!(GenScopeId);

struct GenScopeData {
    parent: Option<GenScopeId>,
    offsets: FxHashMap<Ident, i32>,
    offset: i32,
    loop_labels: Option<(u32, u32)>,
}

pub(crate) struct GenScope {
    scopes: IndexVec<GenScopeId, GenScopeData>,
    current: GenScopeId,
}

impl GenScope {
    pub(crate) fn new() -> Self {
        let root = GenScopeData { parent: None, offsets: FxHashMap::default(), offset: 0, loop_labels: None };
        let mut scopes = IndexVec::new();
        let current = scopes.push(root);
        Self { scopes, current }
    }

    pub(crate) fn enter(&mut self) {
        self.enter_with(self.scopes[self.current].loop_labels);
    }

    pub(crate) fn enter_loop(&mut self, break_to: u32, continue_to: u32) {
        self.enter_with(Some((break_to, continue_to)));
    }

    fn enter_with(&mut self, loop_labels: Option<(u32, u32)>) {
        let parent = self.current;
        let offset = self.scopes[parent].offset;
        let child = GenScopeData { parent: Some(parent), offsets: FxHashMap::default(), offset, loop_labels };
        self.current = self.scopes.push(child);
    }

    pub(crate) fn exit(&mut self) {
        if let Some(parent) = self.scopes[self.current].parent {
            self.current = parent;
        }
    }

    /// Allocates the next descending 8-byte slot for `name`.
    pub(crate) fn declare(&mut self, name: Ident) -> i32 {
        let scope = &mut self.scopes[self.current];
        scope.offset -= 8;
        let offset = scope.offset;
        scope.offsets.insert(name, offset);
        offset
    }

    /// Declares `name` at a fixed offset, used for parameters, which sit at
    /// their own ABI-determined slots rather than consuming the descending
    /// local-variable cursor.
    pub(crate) fn declare_at(&mut self, name: Ident, offset: i32) {
        self.scopes[self.current].offsets.insert(name, offset);
    }

    /// Walks up the chain for `name`'s offset. Panics if missing — `cc0-sem`
    /// has already confirmed every identifier resolves.
    pub(crate) fn fetch(&self, name: Ident) -> i32 {
        let mut cursor = Some(self.current);
        while let Some(id) = cursor {
            let scope = &self.scopes[id];
            if let Some(&offset) = scope.offsets.get(&name) {
                return offset;
            }
            cursor = scope.parent;
        }
        panic!("codegen bug: no stack slot recorded for '{}'", name.as_str());
    }

    pub(crate) fn loop_break_to(&self) -> u32 {
        self.scopes[self.current]
            .loop_labels
            .expect("codegen bug: break reached outside a loop; cc0-sem should have rejected this")
            .0
    }

    pub(crate) fn loop_continue_to(&self) -> u32 {
        self.scopes[self.current]
            .loop_labels
            .expect("codegen bug: continue reached outside a loop; cc0-sem should have rejected this")
            .1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn successive_declarations_get_descending_offsets() {
        let mut scope = GenScope::new();
        assert_eq!(scope.declare(Ident::intern("a")), -8);
        assert_eq!(scope.declare(Ident::intern("b")), -16);
    }

    #[test]
    fn a_child_scope_inherits_the_cursor_and_can_see_the_parents_slots() {
        let mut scope = GenScope::new();
        scope.declare(Ident::intern("a"));
        scope.enter();
        assert_eq!(scope.declare(Ident::intern("b")), -16);
        assert_eq!(scope.fetch(Ident::intern("a")), -8);
        scope.exit();
    }

    #[test]
    fn loop_labels_propagate_into_nested_non_loop_scopes() {
        let mut scope = GenScope::new();
        scope.enter_loop(1, 0);
        scope.enter();
        assert_eq!(scope.loop_break_to(), 1);
        assert_eq!(scope.loop_continue_to(), 0);
    }

    #[test]
    #[should_panic(expected = "no stack slot recorded")]
    fn fetch_panics_on_an_unrecorded_name() {
        let scope = GenScope::new();
        scope.fetch(Ident::intern("nope"));
    }
}
