//! Per-candidate timing record.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Lifecycle stage a measured duration is attributed to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Normalizer invocation (or cache fetch) during construction.
    Parse,
    /// Randomization-engine application.
    Randomize,
    /// Source rendering.
    Render,
    /// Compiler invocation.
    Compile,
    /// Scorer invocation.
    Score,
}

/// Accumulated time per lifecycle stage.
///
/// Stored as whole microseconds in a sorted map so serialized records are
/// deterministic. A snapshot travels in every [`crate::CandidateResult`];
/// the coordinator merges records across candidates with [`Profiler::merge`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profiler {
    micros: BTreeMap<Stage, u64>,
}

impl Profiler {
    /// Empty record.
    pub fn new() -> Self {
        Profiler::default()
    }

    /// Add `elapsed` to the running total for `stage`.
    pub fn record(&mut self, stage: Stage, elapsed: Duration) {
        let micros = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX);
        let total = self.micros.entry(stage).or_insert(0);
        *total = total.saturating_add(micros);
    }

    /// Time a closure and attribute the elapsed time to `stage`.
    pub fn time<T>(&mut self, stage: Stage, f: impl FnOnce() -> T) -> T {
        let start = std::time::Instant::now();
        let value = f();
        self.record(stage, start.elapsed());
        value
    }

    /// Microseconds recorded for one stage.
    pub fn stage_micros(&self, stage: Stage) -> u64 {
        self.micros.get(&stage).copied().unwrap_or(0)
    }

    /// Total recorded time across all stages.
    pub fn total(&self) -> Duration {
        Duration::from_micros(
            self.micros
                .values()
                .fold(0u64, |acc, micros| acc.saturating_add(*micros)),
        )
    }

    /// Fold another record into this one.
    pub fn merge(&mut self, other: &Profiler) {
        for (stage, micros) in &other.micros {
            let total = self.micros.entry(*stage).or_insert(0);
            *total = total.saturating_add(*micros);
        }
    }
}
