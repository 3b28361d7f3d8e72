//! The candidate: one randomized variant of the target function.

use std::time::Instant;

use tracing::{debug, trace};

use perm_ir::{CandidateTree, DeclId, FuncDef};

use crate::artifact::Artifact;
use crate::cache::SharedTreeCache;
use crate::error::{NormalizeError, RandomizeError, ScoreError};
use crate::profiler::{Profiler, Stage};
use crate::result::{CandidateResult, ScoreOutcome};
use crate::traits::{Compiler, Normalizer, Randomizer, Renderer, Scorer};

/// A candidate created from a source, which can be randomized (possibly
/// multiple times), rendered, compiled, and scored.
///
/// The candidate's tree shares every declaration of the cached translation
/// unit except the target function, which it owns as a private deep copy.
/// Nothing a candidate does is observable by a sibling built from the same
/// source; nothing persists when the coordinator discards it.
#[derive(Debug)]
pub struct Candidate<R> {
    tree: CandidateTree,
    fn_index: DeclId,
    seed: u64,
    randomizer: R,
    last_score: Option<ScoreOutcome>,
    cached_source: Option<String>,
    profiler: Profiler,
}

impl<R: Randomizer> Candidate<R> {
    /// Build a candidate for `fn_name` in `source`, with a randomization
    /// engine seeded from `seed`.
    ///
    /// Uses the cached normalized unit when one exists for this exact
    /// (source, name) pair; the target function is deep-copied into the
    /// candidate's private overlay either way. Fails under the same
    /// conditions as [`SharedTreeCache::get_or_build`].
    pub fn from_source<N: Normalizer>(
        cache: &mut SharedTreeCache<N>,
        source: &str,
        fn_name: &str,
        seed: u64,
    ) -> Result<Self, NormalizeError> {
        let start = Instant::now();
        let cached = cache.get_or_build(source, fn_name)?;

        let mut tree = CandidateTree::new(cached.unit);
        if !tree.overlay_function(cached.fn_index) {
            // The normalizer reported an index that does not hold a
            // function; surface it as the lookup failure it is.
            return Err(NormalizeError::FunctionNotFound(fn_name.to_owned()));
        }

        let mut profiler = Profiler::new();
        profiler.record(Stage::Parse, start.elapsed());

        Ok(Candidate {
            tree,
            fn_index: cached.fn_index,
            seed,
            randomizer: R::from_seed(seed),
            last_score: None,
            cached_source: None,
            profiler,
        })
    }

    /// Apply one randomized mutation to the owned target function.
    ///
    /// Engine failures propagate untouched. The cached rendered source is
    /// invalidated unconditionally: the engine may have touched the tree
    /// even when it reports failure.
    pub fn randomize(&mut self) -> Result<(), RandomizeError> {
        let start = Instant::now();
        let result = self.randomizer.apply(&mut self.tree, self.fn_index);
        self.profiler.record(Stage::Randomize, start.elapsed());
        self.cached_source = None;
        result
    }

    /// Current source text, rendered through `renderer`.
    ///
    /// Memoized: the renderer runs only when the tree changed since the
    /// last call (or never ran). Pure performance, not correctness;
    /// rendering is a pure function of the current tree state.
    pub fn source<Rd: Renderer>(&mut self, renderer: &Rd) -> &str {
        self.ensure_source(renderer);
        self.cached_source.as_deref().unwrap_or_default()
    }

    /// Compile the current source, returning the artifact on success.
    ///
    /// A compile failure is terminal for this invocation: no retry, the
    /// caller decides whether to try another candidate. Diagnostics are the
    /// compiler's side effect when `show_errors` is set.
    pub fn compile<Rd: Renderer, C: Compiler>(
        &mut self,
        renderer: &Rd,
        compiler: &C,
        show_errors: bool,
    ) -> Option<Artifact> {
        self.ensure_source(renderer);
        let (path, elapsed) = {
            let source = self.cached_source.as_deref().unwrap_or_default();
            let start = Instant::now();
            let path = compiler.compile(source, show_errors);
            (path, start.elapsed())
        };
        self.profiler.record(Stage::Compile, elapsed);

        match path {
            Some(path) => {
                trace!(path = %path.display(), "compiled candidate");
                Some(Artifact::new(path))
            }
            None => {
                debug!(fn_name = %self.original_function().name, "compile failed");
                None
            }
        }
    }

    /// Score a compiled artifact and produce the transportable result.
    ///
    /// The score/fingerprint pair is cleared before the attempt, so a
    /// failed scorer never leaves stale data behind, and the artifact file
    /// is removed however scoring exits.
    pub fn score<Rd: Renderer, S: Scorer>(
        &mut self,
        renderer: &Rd,
        scorer: &S,
        artifact: Option<Artifact>,
    ) -> Result<CandidateResult, ScoreError> {
        self.last_score = None;

        let start = Instant::now();
        let result = scorer.score(artifact.as_ref().map(Artifact::path));
        self.profiler.record(Stage::Score, start.elapsed());
        // Release the artifact now, before the outcome is inspected: the
        // file is removed whether or not scoring succeeded.
        drop(artifact);

        let outcome = result?;
        debug!(score = %outcome.score, fingerprint = %outcome.fingerprint, "scored candidate");
        self.last_score = Some(outcome.clone());

        let source = self.source(renderer).to_owned();
        Ok(CandidateResult {
            score: outcome.score,
            fingerprint: outcome.fingerprint,
            source: Some(source),
            profiler: self.profiler.clone(),
        })
    }

    /// The pristine cache-shared definition of the target function.
    ///
    /// Stable reference to the original, unaffected by randomization.
    pub fn original_function(&self) -> &FuncDef {
        match self.tree.shared_function(self.fn_index) {
            Some(func) => func,
            // Construction verified the slot and the shared unit is
            // immutable afterwards.
            None => unreachable!("target slot no longer names a function"),
        }
    }

    /// The candidate's view of the translation unit.
    #[inline]
    pub fn tree(&self) -> &CandidateTree {
        &self.tree
    }

    /// Slot of the target function in the translation unit.
    #[inline]
    pub fn fn_index(&self) -> DeclId {
        self.fn_index
    }

    /// Seed the bound randomization engine was constructed from.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Outcome of the most recent successful scoring attempt, if any.
    #[inline]
    pub fn last_score(&self) -> Option<&ScoreOutcome> {
        self.last_score.as_ref()
    }

    /// Timing record accumulated so far.
    #[inline]
    pub fn profiler(&self) -> &Profiler {
        &self.profiler
    }

    fn ensure_source<Rd: Renderer>(&mut self, renderer: &Rd) {
        if self.cached_source.is_none() {
            let start = Instant::now();
            let text = renderer.render(&self.tree);
            self.profiler.record(Stage::Render, start.elapsed());
            self.cached_source = Some(text);
        }
    }
}
