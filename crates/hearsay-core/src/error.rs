//! Pipeline error taxonomy
//!
//! Configuration and input errors are fatal and stop the run; degraded
//! conditions (oversized utterances, exhausted compression rounds, missing
//! synthesis tags) are logged by the modules that detect them and never
//! surface here.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(
        "no utterances left to analyze: all {total} rows scored at or below \
         the relevance threshold {threshold}"
    )]
    EmptyAfterFilter { total: usize, threshold: f64 },

    #[error("chunking produced no chunks; refusing to synthesize an empty report")]
    EmptyStream,
}
