//! Collaborator contracts at the candidate boundary.
//!
//! The core drives five external components: a tree normalizer, a
//! randomization engine, a renderer, a compiler, and a scorer. Their
//! internals are out of scope here; these traits pin down inputs, outputs,
//! and failure modes only.

use std::path::{Path, PathBuf};

use perm_ir::{CandidateTree, DeclId, TranslationUnit};

use crate::error::{NormalizeError, RandomizeError, ScoreError};
use crate::result::ScoreOutcome;

/// Output of the tree normalizer: a canonical translation unit and the
/// target function's slot within it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    /// The canonical unit.
    pub unit: TranslationUnit,
    /// Slot of the extracted target function.
    pub fn_index: DeclId,
}

/// Parses source text and extracts a named function in canonical form.
///
/// Must behave as a pure function of its inputs: the shared-tree cache
/// memoizes results keyed on the exact (source, name) pair.
pub trait Normalizer {
    /// Parse `source`, locate `fn_name`, and normalize the unit.
    fn parse_and_extract(
        &self,
        source: &str,
        fn_name: &str,
    ) -> Result<Normalized, NormalizeError>;
}

/// Applies one randomized semantics-preserving mutation in place.
///
/// An engine is constructed from a per-candidate seed and advances its
/// internal state deterministically from it. The engine contract is
/// full-mutation-or-no-change; the core adds no transactional rollback.
pub trait Randomizer {
    /// Build an engine whose mutation stream is determined by `seed`.
    fn from_seed(seed: u64) -> Self
    where
        Self: Sized;

    /// Mutate the candidate's target function.
    fn apply(
        &mut self,
        tree: &mut CandidateTree,
        fn_index: DeclId,
    ) -> Result<(), RandomizeError>;
}

/// Serializes a tree back into source text.
///
/// Pure and deterministic given tree content. The candidate memoizes the
/// result until the tree changes, so a renderer is free to be slow.
pub trait Renderer {
    /// Render the full translation unit as seen through `tree`.
    fn render(&self, tree: &CandidateTree) -> String;
}

/// Compiles source text into an object file.
///
/// `None` signals compile failure. When `show_errors` is set, diagnostics
/// are surfaced as a side effect (typically on a diagnostic stream), never
/// returned.
pub trait Compiler {
    /// Compile `source`, returning the artifact path on success.
    fn compile(&self, source: &str, show_errors: bool) -> Option<PathBuf>;
}

/// Scores a compiled artifact against the search target.
///
/// Produces a closeness score plus a fingerprint identifying the artifact's
/// observable behavior class: equal generated code yields equal
/// fingerprints regardless of the candidate's seed. An absent artifact is
/// scored as the worst possible outcome rather than rejected.
pub trait Scorer {
    /// Score the artifact at `artifact`, if any.
    fn score(&self, artifact: Option<&Path>) -> Result<ScoreOutcome, ScoreError>;
}
