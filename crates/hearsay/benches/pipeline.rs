use chrono::{TimeZone, Utc};
use criterion::{criterion_group, criterion_main, Criterion};
use hearsay_core::{chunk_stream, relevance_score, CharCountEstimator, Utterance};

fn transcript(size: usize) -> Vec<Utterance> {
    (0..size)
        .map(|i| Utterance {
            session_id: format!("s{}", i % 8),
            timestamp: Utc
                .with_ymd_and_hms(2024, 1, 1, 9, 0, 0)
                .unwrap()
                .checked_add_signed(chrono::Duration::seconds(i as i64))
                .unwrap(),
            role: if i % 2 == 0 { "interviewer" } else { "subject" }.to_string(),
            content: "船荷証券の電子化に伴う実務フローの変更点と運用上の課題について確認したいです。"
                .repeat(1 + i % 3),
        })
        .collect()
}

fn bench_chunking(c: &mut Criterion) {
    let stream = transcript(1000);
    c.bench_function("chunk_1000_utterances", |b| {
        b.iter(|| chunk_stream(&stream, 2000, &CharCountEstimator))
    });
}

fn bench_scoring(c: &mut Criterion) {
    let stream = transcript(1000);
    c.bench_function("score_1000_utterances", |b| {
        b.iter(|| {
            stream
                .iter()
                .map(|u| relevance_score(&u.content))
                .sum::<f64>()
        })
    });
}

criterion_group!(benches, bench_chunking, bench_scoring);
criterion_main!(benches);
