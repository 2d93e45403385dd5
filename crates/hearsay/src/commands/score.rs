use crate::cli::ScoreArgs;
use hearsay_core::{group_by_session, relevance_score, Utterance};
use hearsay_ingest::load_messages;

pub fn run(args: ScoreArgs) -> anyhow::Result<()> {
    let messages_path =
        super::resolve_path(args.messages_file, "MESSAGES_CSV_PATH", "--messages-file")?;
    let messages = load_messages(&messages_path)?;
    if messages.is_empty() {
        println!("No messages found in {}", messages_path.display());
        return Ok(());
    }

    let report = build_score_report(&messages, args.threshold);
    println!("{report}");
    Ok(())
}

fn build_score_report(messages: &[Utterance], threshold: f64) -> String {
    let mut buckets = [0usize; 5];
    let mut retained = 0usize;
    for message in messages {
        let score = relevance_score(&message.content);
        let bucket = ((score * 5.0) as usize).min(4);
        buckets[bucket] += 1;
        if score > threshold {
            retained += 1;
        }
    }

    let mut sections = Vec::new();
    sections.push(format!(
        "Relevance Scores\n================\n\
         Utterances: {}\nThreshold: {:.2}\n\
         Would retain: {} ({} excluded)",
        messages.len(),
        threshold,
        retained,
        messages.len() - retained
    ));

    let mut distribution = String::from("\nDistribution\n------------");
    for (index, count) in buckets.iter().enumerate() {
        distribution.push_str(&format!(
            "\n  {:.1}-{:.1}: {}",
            index as f64 * 0.2,
            (index + 1) as f64 * 0.2,
            count
        ));
    }
    sections.push(distribution);

    let mut per_session = String::from("\nPer Session\n-----------");
    let grouped = group_by_session(messages.to_vec());
    let mut session_ids: Vec<&String> = grouped.keys().collect();
    session_ids.sort();
    for session_id in session_ids {
        let stream = &grouped[session_id];
        let kept = stream
            .iter()
            .filter(|u| relevance_score(&u.content) > threshold)
            .count();
        per_session.push_str(&format!(
            "\n  {}: {}/{} relevant",
            session_id,
            kept,
            stream.len()
        ));
    }
    sections.push(per_session);

    sections.join("\n")
}
