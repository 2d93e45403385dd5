//! Heuristic relevance scoring and filtering of utterances
//!
//! Scores how pertinent an utterance is to the bill/trade analysis domain
//! and drops low-scoring rows before any text-generation call is spent on
//! them. Scoring is a deterministic pure function of the text.

use crate::types::Utterance;
use regex::Regex;
use std::sync::OnceLock;
use tracing::{debug, info};

/// Utterances scoring at or below this are excluded by default.
pub const DEFAULT_RELEVANCE_THRESHOLD: f64 = 0.3;

/// Keywords signalling bill/policy/trade/operations content.
const DOMAIN_KEYWORDS: &[&str] = &[
    // bills and legal frameworks
    "法案",
    "法律",
    "制度",
    "規制",
    "政策",
    "法整備",
    "立法",
    "条文",
    "改正",
    "施行",
    // bills of lading and trade
    "船荷証券",
    "B/L",
    "BL",
    "bill of lading",
    "電子化",
    "デジタル化",
    "ペーパーレス",
    "貿易",
    "輸出",
    "輸入",
    "通関",
    "税関",
    "荷主",
    "運送",
    "船会社",
    "フォワーダー",
    "物流",
    "国際取引",
    // day-to-day operations
    "実務",
    "業務",
    "手続き",
    "作業",
    "プロセス",
    "フロー",
    "運用",
    "システム",
    "セキュリティ",
    "リスク",
    "コスト",
    "効率",
    // problems and concerns
    "課題",
    "問題",
    "懸念",
    "不安",
    "改善",
    "提案",
    "対策",
    "検討",
    // stances and assessments
    "賛成",
    "反対",
    "必要",
    "不要",
    "有効",
    "無効",
];

/// How a keyword is matched against lowercased content.
///
/// Short keywords get boundary checks so they do not fire inside unrelated
/// compound terms; longer or multi-token keywords use plain substring match.
enum MatchMode {
    Substring,
    CjkBounded,
    AsciiBounded,
}

struct KeywordMatcher {
    lowered: String,
    mode: MatchMode,
}

static KEYWORD_MATCHERS: OnceLock<Vec<KeywordMatcher>> = OnceLock::new();
static IRRELEVANT_PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();

fn keyword_matchers() -> &'static [KeywordMatcher] {
    KEYWORD_MATCHERS.get_or_init(|| {
        DOMAIN_KEYWORDS
            .iter()
            .map(|keyword| {
                let lowered = keyword.to_lowercase();
                let char_count = lowered.chars().count();
                let mode = if lowered.contains('/') || lowered.contains(' ') {
                    MatchMode::Substring
                } else if char_count <= 3 && lowered.chars().any(is_kanji) {
                    MatchMode::CjkBounded
                } else if char_count <= 3 {
                    MatchMode::AsciiBounded
                } else {
                    MatchMode::Substring
                };
                KeywordMatcher { lowered, mode }
            })
            .collect()
    })
}

fn irrelevant_patterns() -> &'static [Regex] {
    IRRELEVANT_PATTERNS.get_or_init(|| {
        [
            // pure greetings and acknowledgments
            r"^(はい|いいえ|うん|ええ|そう|なるほど|わかりました|了解|OK)$",
            // filler runs such as ああああ
            r"^(あ+|え+|お+|う+)$",
            // explicit don't-know disclaimers
            r"^(知らない|分からない|わからない|聞いたことがない|初めて聞)([。．.!！?？\s]*)$",
        ]
        .iter()
        .map(|pattern| Regex::new(pattern).expect("irrelevant pattern must compile"))
        .collect()
    })
}

fn is_kanji(c: char) -> bool {
    matches!(
        c,
        '\u{3400}'..='\u{4DBF}' | '\u{4E00}'..='\u{9FFF}' | '\u{F900}'..='\u{FAFF}'
    )
}

fn is_ascii_word(c: char) -> bool {
    c.is_ascii_alphanumeric()
}

/// Substring match rejecting occurrences flanked by same-class characters.
fn bounded_match(haystack: &str, needle: &str, same_class: fn(char) -> bool) -> bool {
    for (pos, _) in haystack.match_indices(needle) {
        let before_ok = haystack[..pos]
            .chars()
            .next_back()
            .map_or(true, |c| !same_class(c));
        let after_ok = haystack[pos + needle.len()..]
            .chars()
            .next()
            .map_or(true, |c| !same_class(c));
        if before_ok && after_ok {
            return true;
        }
    }
    false
}

/// Score how relevant a single utterance is to the analysis domain.
///
/// Returns a value in `[0.0, 1.0]`; higher means more relevant. Empty text
/// scores 0.0, pure acknowledgments and don't-know replies 0.1, very short
/// text 0.2, everything else by distinct keyword matches plus a length bonus.
pub fn relevance_score(content: &str) -> f64 {
    let content = content.trim();
    if content.is_empty() {
        return 0.0;
    }

    for pattern in irrelevant_patterns() {
        if pattern.is_match(content) {
            debug!(content = %truncate(content, 50), "matches irrelevant pattern");
            return 0.1;
        }
    }

    let char_count = content.chars().count();
    if char_count < 5 {
        return 0.2;
    }

    let content_lower = content.to_lowercase();
    let mut matched = 0usize;
    for matcher in keyword_matchers() {
        let hit = match matcher.mode {
            MatchMode::Substring => content_lower.contains(&matcher.lowered),
            MatchMode::CjkBounded => bounded_match(&content_lower, &matcher.lowered, is_kanji),
            MatchMode::AsciiBounded => {
                bounded_match(&content_lower, &matcher.lowered, is_ascii_word)
            }
        };
        if hit {
            matched += 1;
        }
    }

    let base_score = match matched {
        0 => 0.1,
        1 => 0.4,
        2 => 0.6,
        k => (0.8 + (k - 3) as f64 * 0.05).min(1.0),
    };

    // Longer answers carry concrete detail; the bonuses do not stack.
    let length_bonus = if char_count >= 200 {
        0.2
    } else if char_count >= 100 {
        0.1
    } else {
        0.0
    };

    (base_score + length_bonus).min(1.0)
}

/// Outcome of a relevance-filter pass.
#[derive(Debug, Clone)]
pub struct FilterOutcome {
    /// Utterances that survived, in input order.
    pub kept: Vec<Utterance>,
    pub total: usize,
    pub excluded: usize,
}

/// Drop utterances whose relevance score does not exceed `threshold`.
///
/// Retention uses strict inequality: a score exactly at the threshold is
/// excluded. Counts are logged for observability; a sample of excluded rows
/// goes to the debug log.
pub fn filter_by_relevance(utterances: Vec<Utterance>, threshold: f64) -> FilterOutcome {
    let total = utterances.len();
    let mut kept = Vec::with_capacity(total);
    let mut excluded_samples: Vec<(f64, String)> = Vec::new();
    let mut excluded = 0usize;

    for utterance in utterances {
        let score = relevance_score(&utterance.content);
        if score > threshold {
            kept.push(utterance);
        } else {
            excluded += 1;
            if excluded_samples.len() < 10 {
                excluded_samples.push((score, truncate(&utterance.content, 100).to_string()));
            }
        }
    }

    let excluded_pct = if total > 0 {
        excluded as f64 / total as f64 * 100.0
    } else {
        0.0
    };
    info!(
        total,
        kept = kept.len(),
        excluded,
        excluded_pct = %format!("{excluded_pct:.1}"),
        "relevance filter applied"
    );
    for (index, (score, content)) in excluded_samples.iter().enumerate() {
        debug!(
            sample = index + 1,
            score = %format!("{score:.2}"),
            content = %content,
            "excluded utterance"
        );
    }

    FilterOutcome {
        kept,
        total,
        excluded,
    }
}

fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}
