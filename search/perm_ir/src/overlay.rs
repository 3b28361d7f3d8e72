//! Copy-on-write candidate view of a shared translation unit.

use rustc_hash::FxHashMap;

use crate::{Decl, DeclId, FuncDef, SharedUnit, TranslationUnit};

/// A candidate's view of a translation unit.
///
/// Shares the cached unit's declaration arena by reference and keeps owned
/// overrides for the slots the candidate has taken ownership of (in
/// practice exactly one, the target function). Lookups consult the override
/// map first and fall through to the shared arena.
///
/// Deep-copying a whole translation unit per candidate is the dominant cost
/// in a search loop processing thousands of candidates per second; this view
/// copies one function body instead. The isolation invariant (no candidate's
/// mutation is observable by a sibling) holds because mutable access exists
/// only for overridden slots: the shared arena cannot be reached mutably
/// through this type.
#[derive(Debug, Clone)]
pub struct CandidateTree {
    shared: SharedUnit,
    overrides: FxHashMap<DeclId, Decl>,
}

impl CandidateTree {
    /// View of `shared` with no owned slots.
    pub fn new(shared: SharedUnit) -> Self {
        CandidateTree {
            shared,
            overrides: FxHashMap::default(),
        }
    }

    /// Take ownership of the function at `id` by deep-copying it into the
    /// override map.
    ///
    /// Returns `false` when `id` does not name a function in the shared
    /// unit. After a successful overlay, `function_mut(id)` hands out the
    /// owned copy.
    pub fn overlay_function(&mut self, id: DeclId) -> bool {
        match self.shared.function(id) {
            Some(func) => {
                self.overrides.insert(id, Decl::Function(func.clone()));
                true
            }
            None => false,
        }
    }

    /// Declaration at `id`: owned override first, shared arena second.
    #[inline]
    pub fn decl(&self, id: DeclId) -> Option<&Decl> {
        self.overrides.get(&id).or_else(|| self.shared.decl(id))
    }

    /// All declarations in source order, overrides substituted in place.
    pub fn decls(&self) -> impl Iterator<Item = (DeclId, &Decl)> {
        self.shared
            .decls()
            .map(|(id, decl)| (id, self.overrides.get(&id).unwrap_or(decl)))
    }

    /// The function at `id`, override included.
    #[inline]
    pub fn function(&self, id: DeclId) -> Option<&FuncDef> {
        self.decl(id).and_then(Decl::as_function)
    }

    /// Mutable access to an *overridden* function slot.
    ///
    /// Returns `None` for slots that were never overlaid: the shared arena
    /// is immutable through this view.
    pub fn function_mut(&mut self, id: DeclId) -> Option<&mut FuncDef> {
        match self.overrides.get_mut(&id) {
            Some(Decl::Function(func)) => Some(func),
            _ => None,
        }
    }

    /// The pristine cache-shared function at `id`, ignoring overrides.
    ///
    /// Stable reference to the original definition, e.g. for diagnostics.
    #[inline]
    pub fn shared_function(&self, id: DeclId) -> Option<&FuncDef> {
        self.shared.function(id)
    }

    /// The shared unit this view was built from.
    #[inline]
    pub fn shared(&self) -> &TranslationUnit {
        &self.shared
    }
}
