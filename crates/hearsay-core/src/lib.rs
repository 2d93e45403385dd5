//! Core analysis pipeline: chronological sequencing, token-bounded chunking,
//! hierarchical compression and relevance filtering for interview transcripts

mod chunk;
mod compress;
mod config;
mod error;
mod pipeline;
pub mod prompt;
mod relevance;
mod sequence;
mod tokens;
mod types;

pub use chunk::chunk_stream;
pub use compress::compress_summaries;
pub use config::{
    AnalyzeConfig, DEFAULT_COMPRESSION_BATCH_SIZE, DEFAULT_GLOBAL_PROMPT_BUDGET,
    DEFAULT_MAX_COMPRESSION_ROUNDS, DEFAULT_MAX_TOKENS_PER_CHUNK,
};
pub use error::PipelineError;
pub use pipeline::{run_analysis, AnalysisOutcome, TextGenerator};
pub use relevance::{
    filter_by_relevance, relevance_score, FilterOutcome, DEFAULT_RELEVANCE_THRESHOLD,
};
pub use sequence::{group_by_session, sort_chronological};
pub use tokens::{estimator_for_model, CharCountEstimator, ProfileEstimator, TokenEstimator};
pub use types::{Chunk, Utterance};
