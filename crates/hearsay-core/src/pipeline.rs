//! Single-pass analysis pipeline orchestration
//!
//! Everything runs sequentially: one generation call per chunk, one per
//! compression batch, one final synthesis call. The only suspension point is
//! the external service boundary; any generation failure aborts the run with
//! its cause preserved.

use crate::chunk::chunk_stream;
use crate::compress::compress_summaries;
use crate::config::AnalyzeConfig;
use crate::error::PipelineError;
use crate::prompt;
use crate::relevance::filter_by_relevance;
use crate::sequence::sort_chronological;
use crate::tokens::TokenEstimator;
use crate::types::Utterance;
use anyhow::Context;
use tracing::info;

/// External text-generation collaborator.
pub trait TextGenerator {
    fn generate(&self, system_prompt: &str, user_prompt: &str) -> anyhow::Result<String>;
}

/// Result of a full pipeline run, before report rendering.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    /// Raw synthesis response carrying the tagged sections.
    pub synthesis_response: String,
    /// Analysis blocks after compression, in stream order.
    pub analysis_blocks: Vec<String>,
    /// Number of chunks analyzed before compression.
    pub chunk_count: usize,
}

/// Run the whole pipeline over an utterance collection.
///
/// Filter by relevance, sort into one global chronological stream, chunk
/// under the per-chunk token budget, analyze each chunk, compress the
/// analyses under the global budget, then synthesize the final response.
pub fn run_analysis(
    config: &AnalyzeConfig,
    utterances: Vec<Utterance>,
    generator: &dyn TextGenerator,
    estimator: &dyn TokenEstimator,
    reference_materials: &str,
) -> anyhow::Result<AnalysisOutcome> {
    config.validate()?;

    let total = utterances.len();
    let filtered = filter_by_relevance(utterances, config.relevance_threshold);
    if filtered.kept.is_empty() {
        return Err(PipelineError::EmptyAfterFilter {
            total,
            threshold: config.relevance_threshold,
        }
        .into());
    }

    let stream = sort_chronological(filtered.kept);
    let chunks = chunk_stream(&stream, config.max_tokens_per_chunk, estimator);
    if chunks.is_empty() {
        return Err(PipelineError::EmptyStream.into());
    }
    info!(
        utterances = stream.len(),
        chunks = chunks.len(),
        "transcript sequenced and chunked"
    );

    let mut chunk_analyses = Vec::with_capacity(chunks.len());
    for (index, chunk) in chunks.iter().enumerate() {
        let user_prompt = prompt::build_chunk_prompt(index, chunks.len(), chunk);
        let analysis = generator
            .generate(prompt::ANALYST_SYSTEM_PROMPT, &user_prompt)
            .with_context(|| {
                format!("analysis call failed for chunk {}/{}", index + 1, chunks.len())
            })?;
        chunk_analyses.push(analysis);
    }
    let chunk_count = chunk_analyses.len();

    let analysis_blocks = compress_summaries(
        chunk_analyses,
        config.max_tokens_for_global_prompt,
        config.max_compression_rounds,
        config.compression_batch_size,
        estimator,
        |batch| {
            generator.generate(
                prompt::ANALYST_SYSTEM_PROMPT,
                &prompt::build_merge_prompt(batch),
            )
        },
    )
    .context("compression round failed")?;

    let synthesis_prompt = prompt::build_synthesis_prompt(&analysis_blocks, reference_materials);
    let synthesis_response = generator
        .generate(prompt::SYNTHESIS_SYSTEM_PROMPT, &synthesis_prompt)
        .context("final synthesis call failed")?;

    Ok(AnalysisOutcome {
        synthesis_response,
        analysis_blocks,
        chunk_count,
    })
}
