//! Token-bounded chunking of chronological utterance streams

use crate::tokens::TokenEstimator;
use crate::types::{Chunk, Utterance};
use tracing::warn;

/// Split a chronological stream into chunks whose estimated token count
/// stays within `max_tokens_per_chunk`.
///
/// Greedy single forward pass: lines accumulate newline-joined until adding
/// the next one would push the estimate over the budget. A single utterance
/// whose own line already exceeds the budget is emitted as an isolated chunk
/// and logged; it is never merged with neighbors. An empty stream yields zero
/// chunks — the caller decides whether that is fatal.
pub fn chunk_stream(
    stream: &[Utterance],
    max_tokens_per_chunk: usize,
    estimator: &dyn TokenEstimator,
) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    let mut acc_text = String::new();
    let mut acc_utterances: Vec<Utterance> = Vec::new();

    for utterance in stream {
        let line = utterance.render_line();
        let line_tokens = estimator.estimate(&line);

        if line_tokens > max_tokens_per_chunk {
            if !acc_utterances.is_empty() {
                chunks.push(flush(&mut acc_text, &mut acc_utterances, estimator));
            }
            warn!(
                session_id = %utterance.session_id,
                tokens = line_tokens,
                budget = max_tokens_per_chunk,
                "utterance alone exceeds the chunk budget, isolating it"
            );
            chunks.push(Chunk {
                token_estimate: line_tokens,
                text: line,
                utterances: vec![utterance.clone()],
                oversized: true,
            });
            continue;
        }

        let candidate = if acc_text.is_empty() {
            line
        } else {
            format!("{acc_text}\n{line}")
        };

        if estimator.estimate(&candidate) > max_tokens_per_chunk && !acc_utterances.is_empty() {
            chunks.push(flush(&mut acc_text, &mut acc_utterances, estimator));
            acc_text = utterance.render_line();
        } else {
            acc_text = candidate;
        }
        acc_utterances.push(utterance.clone());
    }

    if !acc_utterances.is_empty() {
        chunks.push(flush(&mut acc_text, &mut acc_utterances, estimator));
    }

    chunks
}

fn flush(
    acc_text: &mut String,
    acc_utterances: &mut Vec<Utterance>,
    estimator: &dyn TokenEstimator,
) -> Chunk {
    let text = std::mem::take(acc_text);
    let utterances = std::mem::take(acc_utterances);
    Chunk {
        token_estimate: estimator.estimate(&text),
        text,
        utterances,
        oversized: false,
    }
}
