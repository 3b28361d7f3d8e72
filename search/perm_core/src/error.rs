//! Error taxonomy for the candidate core.
//!
//! The core recovers nothing on its own. Every failure either returns an
//! explicit absent result (compilation) or propagates to the caller
//! (normalization, randomization, scoring). The only guaranteed local
//! actions on failure are artifact cleanup and score-state reset.

use thiserror::Error;

/// Failure to parse source text or locate the target function.
///
/// Fatal to candidate creation: no candidate exists to retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    /// The source text could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),
    /// The translation unit has no function definition with this name.
    #[error("function `{0}` not found in translation unit")]
    FunctionNotFound(String),
}

/// Failure of the randomization engine.
///
/// Propagated uncaught. The caller picks a different mutation or abandons
/// the candidate; the core neither retries nor rolls back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RandomizeError {
    /// No transformation rule applies to the current function body.
    #[error("no applicable mutation site in `{0}`")]
    NoMutationSite(String),
    /// The engine failed internally.
    #[error("randomization engine: {0}")]
    Engine(String),
}

/// Failure to score a compiled artifact.
///
/// Propagated uncaught after the artifact has been removed; the candidate's
/// score state stays unset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreError {
    /// The artifact could not be read or executed.
    #[error("cannot evaluate artifact: {0}")]
    Artifact(String),
    /// Comparison against the target failed.
    #[error("comparison failed: {0}")]
    Comparison(String),
}
