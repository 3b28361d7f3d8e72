//! The translation unit: an arena of top-level declarations.

use std::sync::Arc;

use crate::{Decl, DeclId, FuncDef};

/// Shared handle to a cache-owned canonical unit.
///
/// Cloning is an atomic reference-count increment, never a tree copy.
pub type SharedUnit = Arc<TranslationUnit>;

/// A parsed translation unit: top-level declarations in source order.
///
/// One canonical instance lives in the shared-tree cache. Candidates share
/// it by reference through [`crate::CandidateTree`] and overlay their own
/// copy of the target function; the unit itself is never mutated after
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TranslationUnit {
    decls: Vec<Decl>,
}

impl TranslationUnit {
    /// Create a unit from a declaration list.
    #[inline]
    pub fn new(decls: Vec<Decl>) -> Self {
        TranslationUnit { decls }
    }

    /// Number of top-level declarations.
    #[inline]
    pub fn len(&self) -> usize {
        self.decls.len()
    }

    /// Whether the unit has no declarations.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    /// Declaration at `id`, or `None` when out of bounds.
    #[inline]
    pub fn decl(&self, id: DeclId) -> Option<&Decl> {
        self.decls.get(id.index())
    }

    /// All declarations with their IDs, in source order.
    pub fn decls(&self) -> impl Iterator<Item = (DeclId, &Decl)> {
        self.decls.iter().enumerate().map(|(i, decl)| {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "declaration lists are far below u32::MAX entries"
            )]
            let id = DeclId::new(i as u32);
            (id, decl)
        })
    }

    /// The function at `id`, or `None` when the slot is not a function.
    #[inline]
    pub fn function(&self, id: DeclId) -> Option<&FuncDef> {
        self.decl(id).and_then(Decl::as_function)
    }

    /// Find a function definition by name.
    ///
    /// Returns the slot it occupies along with the definition. Searches in
    /// source order, so a redefinition resolves to the first occurrence.
    pub fn find_function(&self, name: &str) -> Option<(DeclId, &FuncDef)> {
        self.decls().find_map(|(id, decl)| {
            decl.as_function()
                .filter(|func| func.name == name)
                .map(|func| (id, func))
        })
    }
}
