//! Transcript data model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One timestamped message attributable to a role within an interview session.
///
/// Immutable once read from the input; `content` may be empty or
/// whitespace-only and the pipeline must cope with that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Utterance {
    pub session_id: String,
    pub timestamp: DateTime<Utc>,
    pub role: String,
    pub content: String,
}

impl Utterance {
    /// Single-line textual form used when serializing a chunk.
    pub fn render_line(&self) -> String {
        format!(
            "[{}] {}: {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.role,
            self.content
        )
    }
}

/// A budget-bounded, order-preserving group of utterances serialized as one
/// text unit for external analysis.
#[derive(Debug, Clone)]
pub struct Chunk {
    /// Newline-joined rendered lines of every utterance in the chunk.
    pub text: String,
    /// Source utterances, in stream order.
    pub utterances: Vec<Utterance>,
    /// Estimated token count of `text`.
    pub token_estimate: usize,
    /// Set when a single utterance alone exceeded the chunk budget and had
    /// to be isolated.
    pub oversized: bool,
}
