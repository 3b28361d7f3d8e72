//! Scored-candidate payloads that cross the worker boundary.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::profiler::Profiler;

/// Closeness score for a compiled candidate.
///
/// Counts diff penalties against the target, so lower is closer and zero is
/// an exact match.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Score(pub u64);

impl Score {
    /// Exact match with the target.
    pub const PERFECT: Score = Score(0);

    /// Whether this score is an exact match.
    #[inline]
    pub const fn is_perfect(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What the scorer reports for one artifact: the closeness score plus a
/// content fingerprint of the artifact's observable behavior class.
///
/// The two always travel together. A candidate's score state is a single
/// `Option<ScoreOutcome>`, so one can never be observed without the other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreOutcome {
    /// Closeness score; lower is closer.
    pub score: Score,
    /// Behavior-class fingerprint. Equal generated code yields equal
    /// fingerprints, independent of the candidate's seed.
    pub fingerprint: String,
}

/// Immutable snapshot of a scored candidate, sent from worker to
/// coordinator.
///
/// A plain value aggregate: it never references the candidate's tree, so it
/// serializes without re-encoding any parsed structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateResult {
    /// Closeness score.
    pub score: Score,
    /// Behavior-class fingerprint, used by the coordinator to deduplicate
    /// equivalent candidates.
    pub fingerprint: String,
    /// Rendered source of the scored candidate. `None` when transport cost
    /// matters more than debuggability.
    pub source: Option<String>,
    /// Timing record for this candidate's lifecycle.
    pub profiler: Profiler,
}

impl CandidateResult {
    /// Drop the rendered source to shrink the payload.
    pub fn without_source(mut self) -> Self {
        self.source = None;
        self
    }
}
