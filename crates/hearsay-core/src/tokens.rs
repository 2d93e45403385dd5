//! Token estimation for prompt budgeting

use tracing::debug;

/// Budget heuristic mapping text to an approximate token count.
///
/// Estimates only need to be monotonic enough that concatenation roughly
/// sums; nothing in the pipeline depends on exact counts.
pub trait TokenEstimator {
    fn estimate(&self, text: &str) -> usize;
}

/// Character-count fallback: ~4 characters per token.
#[derive(Debug, Clone, Copy, Default)]
pub struct CharCountEstimator;

impl TokenEstimator for CharCountEstimator {
    fn estimate(&self, text: &str) -> usize {
        text.chars().count() / 4
    }
}

const CJK_CHARS_PER_TOKEN: f64 = 1.5;
const PROSE_CHARS_PER_TOKEN: f64 = 4.0;

/// Content-profile estimator weighting CJK and non-CJK text differently.
///
/// Japanese transcripts tokenize far denser than English prose: roughly 1.5
/// characters per token for CJK runs against ~4.0 for ASCII prose. The
/// estimate is a weighted average over the two fractions.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProfileEstimator;

impl TokenEstimator for ProfileEstimator {
    fn estimate(&self, text: &str) -> usize {
        if text.is_empty() {
            return 0;
        }

        let total_chars = text.chars().count();
        let cjk_chars = text.chars().filter(|&c| is_cjk(c)).count();
        let cjk_fraction = cjk_chars as f64 / total_chars as f64;

        let chars_per_token =
            cjk_fraction * CJK_CHARS_PER_TOKEN + (1.0 - cjk_fraction) * PROSE_CHARS_PER_TOKEN;

        (total_chars as f64 / chars_per_token).max(1.0) as usize
    }
}

fn is_cjk(c: char) -> bool {
    matches!(
        c,
        '\u{3040}'..='\u{30FF}' // hiragana and katakana
        | '\u{3400}'..='\u{4DBF}'
        | '\u{4E00}'..='\u{9FFF}'
        | '\u{F900}'..='\u{FAFF}'
    )
}

/// Select a token estimator for the given model hint.
///
/// Known chat-model families get the content-profile estimator; anything
/// unrecognized transparently falls back to the character-count heuristic.
/// Which backend is available is decided here, once, at startup.
pub fn estimator_for_model(model_hint: &str) -> Box<dyn TokenEstimator> {
    let hint = model_hint.to_ascii_lowercase();
    let known = ["gpt-", "o1", "o3", "o4", "claude-"];
    if known.iter().any(|prefix| hint.starts_with(prefix)) {
        Box::new(ProfileEstimator)
    } else {
        debug!(
            model = %model_hint,
            "no tokenizer profile for model, falling back to char-count estimation"
        );
        Box::new(CharCountEstimator)
    }
}
