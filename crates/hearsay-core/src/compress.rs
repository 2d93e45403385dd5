//! Hierarchical round-bounded compression of analysis summaries

use crate::tokens::TokenEstimator;
use tracing::{info, warn};

/// Iteratively re-summarize batches of analysis results until the joined
/// text fits `max_tokens_for_global_prompt` or `max_rounds` is spent.
///
/// `summarize_batch` is the external text-generation call, invoked once per
/// batch per round; a failed call aborts the run. Levels shrink by roughly
/// `1/batch_size` per round, so the number of external calls is bounded.
/// The last level produced is returned even when it still exceeds the
/// budget: exhausting the round budget degrades the result, it does not
/// fail the run.
pub fn compress_summaries<F>(
    summaries: Vec<String>,
    max_tokens_for_global_prompt: usize,
    max_rounds: usize,
    batch_size: usize,
    estimator: &dyn TokenEstimator,
    mut summarize_batch: F,
) -> anyhow::Result<Vec<String>>
where
    F: FnMut(&[String]) -> anyhow::Result<String>,
{
    if summaries.is_empty() {
        return Ok(summaries);
    }
    let batch_size = batch_size.max(1);

    let mut level = summaries;
    let mut joined_tokens = estimator.estimate(&level.join("\n\n"));
    if joined_tokens <= max_tokens_for_global_prompt {
        return Ok(level);
    }

    for round in 1..=max_rounds {
        if level.len() == 1 {
            break;
        }

        let mut next = Vec::with_capacity(level.len().div_ceil(batch_size));
        for batch in level.chunks(batch_size) {
            next.push(summarize_batch(batch)?);
        }
        joined_tokens = estimator.estimate(&next.join("\n\n"));
        info!(
            round,
            from = level.len(),
            to = next.len(),
            tokens = joined_tokens,
            budget = max_tokens_for_global_prompt,
            "compression round complete"
        );
        level = next;

        if joined_tokens <= max_tokens_for_global_prompt {
            return Ok(level);
        }
    }

    warn!(
        tokens = joined_tokens,
        budget = max_tokens_for_global_prompt,
        "compression stopped before reaching the budget, proceeding with oversized result"
    );
    Ok(level)
}
