use chrono::{TimeZone, Utc};
use hearsay_core::{
    chunk_stream, compress_summaries, run_analysis, sort_chronological, AnalyzeConfig,
    CharCountEstimator, TextGenerator, TokenEstimator, Utterance,
};
use hearsay_report::{render_report, ReportSections};
use std::cell::RefCell;

/// Deterministic stand-in for the external text-generation service.
struct ScriptedGenerator {
    calls: RefCell<Vec<String>>,
}

impl ScriptedGenerator {
    fn new() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl TextGenerator for ScriptedGenerator {
    fn generate(&self, _system_prompt: &str, user_prompt: &str) -> anyhow::Result<String> {
        self.calls.borrow_mut().push(user_prompt.to_string());
        if user_prompt.contains("[overall_summary]") {
            Ok("[overall_summary]全体サマリー[/overall_summary]\
                [overlooked_points]見落とし[/overlooked_points]\
                [suggestions]示唆[/suggestions]"
                .to_string())
        } else if user_prompt.contains("統合してください") {
            Ok("統合済み要約".to_string())
        } else {
            Ok(format!("チャンク分析 {}", self.calls.borrow().len()))
        }
    }
}

/// 12 utterances across 2 sessions, interleaved in time. Every content line
/// carries a domain keyword so the relevance filter keeps all of them.
fn twelve_utterances() -> Vec<Utterance> {
    let contents = [
        "制度の背景を教えてください",
        "貿易の現場では課題が多いです",
        "船荷証券の扱いが問題です",
        "電子化は必要だと思います",
        "実務の負担が懸念されます",
        "システムの導入が検討中です",
        "規制の内容が不明確です",
        "コストの削減が期待できます",
        "手続きの流れを教えてください",
        "セキュリティが不安です",
        "改正の時期はいつですか",
        "運用の体制が課題です",
    ];
    contents
        .iter()
        .enumerate()
        .map(|(i, content)| Utterance {
            // Alternate sessions; timestamps interleave across them
            session_id: if i % 2 == 0 { "s1" } else { "s2" }.to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 9, i as u32, 0).unwrap(),
            role: "subject".to_string(),
            content: content.to_string(),
        })
        .collect()
}

#[test]
fn test_twelve_utterance_scenario_chunks_within_budget() {
    let stream = sort_chronological(twelve_utterances());
    let chunks = chunk_stream(&stream, 50, &CharCountEstimator);

    assert!(
        (3..=4).contains(&chunks.len()),
        "expected 3-4 chunks, got {}",
        chunks.len()
    );
    for chunk in &chunks {
        assert!(!chunk.oversized);
        assert!(CharCountEstimator.estimate(&chunk.text) <= 50);
    }

    // Completeness: chunk utterances, concatenated in order, reproduce the
    // chronologically sorted input exactly.
    let reassembled: Vec<Utterance> = chunks
        .iter()
        .flat_map(|chunk| chunk.utterances.iter().cloned())
        .collect();
    assert_eq!(reassembled, stream);
}

#[test]
fn test_one_compression_round_halves_four_summaries() {
    // Four 40-token analysis stubs against a budget below their joined size
    let summaries: Vec<String> = (0..4).map(|i| format!("{i}").repeat(160)).collect();
    let merges = RefCell::new(0usize);
    let result = compress_summaries(
        summaries,
        100,
        3,
        2,
        &CharCountEstimator,
        |batch: &[String]| {
            *merges.borrow_mut() += 1;
            assert_eq!(batch.len(), 2);
            Ok("merged".to_string())
        },
    )
    .unwrap();

    assert_eq!(result.len(), 2);
    assert_eq!(*merges.borrow(), 2);
}

#[test]
fn test_full_pipeline_produces_report_sections() {
    let generator = ScriptedGenerator::new();
    let config = AnalyzeConfig {
        max_tokens_per_chunk: 50,
        max_tokens_for_global_prompt: 10_000,
        ..AnalyzeConfig::default()
    };

    let outcome = run_analysis(
        &config,
        twelve_utterances(),
        &generator,
        &CharCountEstimator,
        "",
    )
    .unwrap();

    assert!((3..=4).contains(&outcome.chunk_count));
    // Generous global budget: no compression round, one call per chunk plus
    // the synthesis call.
    assert_eq!(generator.call_count(), outcome.chunk_count + 1);
    assert_eq!(outcome.analysis_blocks.len(), outcome.chunk_count);

    let sections = ReportSections::from_response(&outcome.synthesis_response);
    assert_eq!(sections.overall_summary, "全体サマリー");
    assert_eq!(sections.overlooked_points, "見落とし");
    assert_eq!(sections.suggestions, "示唆");

    let report = render_report(&sections, &outcome.analysis_blocks, &[]);
    assert!(report.contains("# AIインタビューログ分析レポート"));
    assert!(report.contains("全体サマリー"));
    assert!(report.contains("チャンク分析 1"));
}

#[test]
fn test_full_pipeline_with_tight_global_budget_compresses() {
    let generator = ScriptedGenerator::new();
    let config = AnalyzeConfig {
        max_tokens_per_chunk: 50,
        // Joined chunk analyses exceed this, forcing at least one round
        max_tokens_for_global_prompt: 5,
        max_compression_rounds: 3,
        compression_batch_size: 2,
        ..AnalyzeConfig::default()
    };

    let outcome = run_analysis(
        &config,
        twelve_utterances(),
        &generator,
        &CharCountEstimator,
        "",
    )
    .unwrap();

    assert!(
        outcome.analysis_blocks.len() < outcome.chunk_count,
        "compression must shrink the block list"
    );
    assert!(
        generator.call_count() > outcome.chunk_count + 1,
        "merge calls must have happened"
    );
}

#[test]
fn test_fully_irrelevant_input_fails_before_any_call() {
    let generator = ScriptedGenerator::new();
    let utterances = vec![
        Utterance {
            session_id: "s1".to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap(),
            role: "subject".to_string(),
            content: "はい".to_string(),
        },
        Utterance {
            session_id: "s1".to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 9, 1, 0).unwrap(),
            role: "subject".to_string(),
            content: "   ".to_string(),
        },
    ];

    let error = run_analysis(
        &AnalyzeConfig::default(),
        utterances,
        &generator,
        &CharCountEstimator,
        "",
    )
    .unwrap_err();

    assert!(error.to_string().contains("no utterances left"));
    assert_eq!(generator.call_count(), 0);
}
