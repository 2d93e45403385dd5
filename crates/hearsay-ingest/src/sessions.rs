//! Session ordering and selection

use crate::loader::SESSION_ID_COL;
use anyhow::Context;
use hearsay_core::Utterance;
use rand::seq::SliceRandom;
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

/// Session ids in sessions-CSV order.
///
/// Falls back to first-appearance order from the messages when the sessions
/// file has no `session_id` column or carries no usable rows.
pub fn load_session_order(path: &Path, messages: &[Utterance]) -> anyhow::Result<Vec<String>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("cannot open sessions CSV: {}", path.display()))?;

    let headers = reader.headers()?.clone();
    let Some(index) = headers.iter().position(|header| header == SESSION_ID_COL) else {
        info!(
            path = %path.display(),
            "sessions CSV has no session_id column, deriving order from messages"
        );
        return Ok(session_order_from_messages(messages));
    };

    let mut ids = Vec::new();
    for record in reader.records() {
        let record = record?;
        let id = record.get(index).unwrap_or_default().trim();
        if !id.is_empty() {
            ids.push(id.to_string());
        }
    }

    if ids.is_empty() {
        return Ok(session_order_from_messages(messages));
    }
    Ok(ids)
}

fn session_order_from_messages(messages: &[Utterance]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut order = Vec::new();
    for message in messages {
        if seen.insert(message.session_id.as_str()) {
            order.push(message.session_id.clone());
        }
    }
    order
}

/// Limit or randomly sample the sessions to analyze.
///
/// Sampling only applies together with a limit, mirroring head-style
/// selection otherwise.
pub fn select_sessions(ids: &[String], limit: Option<usize>, sample: bool) -> Vec<String> {
    match limit {
        Some(limit) if sample => {
            let mut rng = rand::thread_rng();
            ids.choose_multiple(&mut rng, limit.min(ids.len()))
                .cloned()
                .collect()
        }
        Some(limit) => ids.iter().take(limit).cloned().collect(),
        None => ids.to_vec(),
    }
}
