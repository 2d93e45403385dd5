//! Analysis pipeline configuration

use crate::error::PipelineError;
use crate::relevance::DEFAULT_RELEVANCE_THRESHOLD;

pub const DEFAULT_MAX_TOKENS_PER_CHUNK: usize = 8_000;
pub const DEFAULT_GLOBAL_PROMPT_BUDGET: usize = 16_000;
pub const DEFAULT_MAX_COMPRESSION_ROUNDS: usize = 3;
pub const DEFAULT_COMPRESSION_BATCH_SIZE: usize = 4;

/// Budgets and schedule for one analysis run.
#[derive(Debug, Clone)]
pub struct AnalyzeConfig {
    /// Token budget for a single analysis chunk.
    pub max_tokens_per_chunk: usize,
    /// Token budget for the joined summaries fed to the final synthesis.
    pub max_tokens_for_global_prompt: usize,
    /// Upper bound on compression rounds.
    pub max_compression_rounds: usize,
    /// Summaries merged per compression batch.
    pub compression_batch_size: usize,
    /// Relevance score cut-off; strictly greater scores are retained.
    pub relevance_threshold: f64,
}

impl Default for AnalyzeConfig {
    fn default() -> Self {
        Self {
            max_tokens_per_chunk: DEFAULT_MAX_TOKENS_PER_CHUNK,
            max_tokens_for_global_prompt: DEFAULT_GLOBAL_PROMPT_BUDGET,
            max_compression_rounds: DEFAULT_MAX_COMPRESSION_ROUNDS,
            compression_batch_size: DEFAULT_COMPRESSION_BATCH_SIZE,
            relevance_threshold: DEFAULT_RELEVANCE_THRESHOLD,
        }
    }
}

impl AnalyzeConfig {
    /// Reject configurations that could never produce a valid run.
    ///
    /// Runs before any external call is made.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.max_tokens_per_chunk == 0 {
            return Err(PipelineError::InvalidConfig(
                "max_tokens_per_chunk must be positive".to_string(),
            ));
        }
        if self.max_tokens_for_global_prompt == 0 {
            return Err(PipelineError::InvalidConfig(
                "max_tokens_for_global_prompt must be positive".to_string(),
            ));
        }
        if self.compression_batch_size == 0 {
            return Err(PipelineError::InvalidConfig(
                "compression_batch_size must be positive".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.relevance_threshold) {
            return Err(PipelineError::InvalidConfig(format!(
                "relevance_threshold must be within [0.0, 1.0], got {}",
                self.relevance_threshold
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(AnalyzeConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_chunk_budget_rejected() {
        let config = AnalyzeConfig {
            max_tokens_per_chunk: 0,
            ..AnalyzeConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let config = AnalyzeConfig {
            compression_batch_size: 0,
            ..AnalyzeConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_out_of_range_threshold_rejected() {
        let config = AnalyzeConfig {
            relevance_threshold: 1.5,
            ..AnalyzeConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
