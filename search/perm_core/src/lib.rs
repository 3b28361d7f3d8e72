//! Permute Core - Candidate Lifecycle for Program-Equivalence Search
//!
//! This crate is the candidate-management core of a randomized
//! program-equivalence search tool. Given a parsed function body it derives
//! cheap candidate variants, mutates them in isolation, renders them to
//! source, compiles and scores them, and ships each outcome across the
//! worker/coordinator process boundary.
//!
//! # Data Flow
//!
//! ```text
//! source + fn name -> SharedTreeCache -> Candidate (owns target function)
//!     -> [randomize -> render (memoized) -> compile -> score] -> CandidateResult
//! ```
//!
//! # Modules
//!
//! - [`cache`]: process-local bounded memo of normalized translation units
//! - [`candidate`]: the candidate state machine
//! - [`artifact`]: scoped ownership of compiled object files
//! - [`result`]: the immutable cross-process payload
//! - [`profiler`]: per-candidate timing record
//! - [`traits`]: contracts for the external normalizer, randomization
//!   engine, renderer, compiler, and scorer
//!
//! # Concurrency Model
//!
//! Single-threaded within a worker process. The cache is process-local, a
//! candidate is exclusively owned by the worker that created it, and the
//! only shared resource is the temporary artifact file, whose ownership
//! transfers to the scoring step via [`Artifact`].

pub mod artifact;
pub mod cache;
pub mod candidate;
pub mod error;
pub mod profiler;
pub mod result;
pub mod traits;

pub use artifact::Artifact;
pub use cache::{CacheStats, CachedUnit, SharedTreeCache};
pub use candidate::Candidate;
pub use error::{NormalizeError, RandomizeError, ScoreError};
pub use profiler::{Profiler, Stage};
pub use result::{CandidateResult, Score, ScoreOutcome};
pub use traits::{Compiler, Normalized, Normalizer, Randomizer, Renderer, Scorer};
