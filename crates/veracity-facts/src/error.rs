//! Error types for the fact pipeline.

use thiserror::Error;

/// Errors that can occur while producing a presented fact.
#[derive(Debug, Error)]
pub enum FactError {
    /// Fact source unreachable or returned no usable fact.
    ///
    /// This is the only error that surfaces to callers of the pipeline;
    /// no fallback fact is fabricated.
    #[error("fact source error: {0}")]
    UpstreamFact(String),

    /// Falsification attempt failed (network error or rejected candidate).
    ///
    /// Never surfaces past [`crate::FactPresenter`]: a failed falsification
    /// downgrades to presenting the true original fact.
    #[error("falsification failed: {0}")]
    Falsification(String),
}
