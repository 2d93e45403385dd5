//! Chronological ordering of utterances

use crate::types::Utterance;
use std::collections::HashMap;

/// Merge all utterances into one global chronological stream.
///
/// The sort is stable: equal timestamps keep their input order, so repeated
/// runs over identical input always produce the same stream.
pub fn sort_chronological(mut utterances: Vec<Utterance>) -> Vec<Utterance> {
    utterances.sort_by_key(|u| u.timestamp);
    utterances
}

/// Group utterances by session id, each group sorted chronologically.
pub fn group_by_session(utterances: Vec<Utterance>) -> HashMap<String, Vec<Utterance>> {
    let mut grouped: HashMap<String, Vec<Utterance>> = HashMap::new();
    for utterance in utterances {
        grouped
            .entry(utterance.session_id.clone())
            .or_default()
            .push(utterance);
    }
    for stream in grouped.values_mut() {
        stream.sort_by_key(|u| u.timestamp);
    }
    grouped
}
