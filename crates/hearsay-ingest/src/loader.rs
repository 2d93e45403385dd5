//! CSV transcript loading and schema validation

use anyhow::{bail, Context};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use hearsay_core::Utterance;
use std::path::Path;
use tracing::info;

pub const SESSION_ID_COL: &str = "session_id";
pub const CONTENT_COL: &str = "content";
pub const ROLE_COL: &str = "role";
pub const TIMESTAMP_COL: &str = "timestamp";

/// Load and validate the messages CSV.
///
/// Header validation happens before any row parsing so that schema problems
/// surface as one configuration error naming every missing column.
pub fn load_messages(path: &Path) -> anyhow::Result<Vec<Utterance>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("cannot open messages CSV: {}", path.display()))?;

    let headers = reader.headers()?.clone();
    let find = |name: &str| headers.iter().position(|header| header == name);

    let (session_idx, content_idx, role_idx, timestamp_idx) = match (
        find(SESSION_ID_COL),
        find(CONTENT_COL),
        find(ROLE_COL),
        find(TIMESTAMP_COL),
    ) {
        (Some(s), Some(c), Some(r), Some(t)) => (s, c, r, t),
        (s, c, r, t) => {
            let missing: Vec<&str> = [
                (SESSION_ID_COL, s),
                (CONTENT_COL, c),
                (ROLE_COL, r),
                (TIMESTAMP_COL, t),
            ]
            .into_iter()
            .filter_map(|(name, index)| index.is_none().then_some(name))
            .collect();
            bail!(
                "messages CSV {} is missing required columns: {}",
                path.display(),
                missing.join(", ")
            );
        }
    };

    let mut utterances = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record
            .with_context(|| format!("row {} of {} is not valid CSV", row + 2, path.display()))?;
        let raw_timestamp = record.get(timestamp_idx).unwrap_or_default();
        let timestamp = parse_timestamp(raw_timestamp).with_context(|| {
            format!(
                "row {} of {} has an unparseable timestamp {:?}",
                row + 2,
                path.display(),
                raw_timestamp
            )
        })?;

        utterances.push(Utterance {
            session_id: record.get(session_idx).unwrap_or_default().to_string(),
            timestamp,
            role: record.get(role_idx).unwrap_or_default().to_string(),
            content: record.get(content_idx).unwrap_or_default().to_string(),
        });
    }

    info!(rows = utterances.len(), path = %path.display(), "messages loaded");
    Ok(utterances)
}

/// Parse the timestamp shapes interview exports actually use.
pub fn parse_timestamp(raw: &str) -> anyhow::Result<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(timestamp.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y/%m/%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }

    bail!("unsupported timestamp format: {raw:?}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("messages.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        (dir, path)
    }

    #[test]
    fn test_load_messages() {
        let (_dir, path) = write_csv(
            "session_id,content,role,timestamp\n\
             s1,こんにちは,interviewer,2024-01-01 09:00:00\n\
             s1,制度の課題です,subject,2024-01-01 09:00:30\n",
        );
        let messages = load_messages(&path).unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].session_id, "s1");
        assert_eq!(messages[1].content, "制度の課題です");
        assert!(messages[0].timestamp < messages[1].timestamp);
    }

    #[test]
    fn test_load_messages_ignores_extra_columns() {
        let (_dir, path) = write_csv(
            "id,session_id,content,role,timestamp,note\n\
             1,s1,本文,subject,2024-01-01 09:00:00,メモ\n",
        );
        let messages = load_messages(&path).unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].content, "本文");
    }

    #[test]
    fn test_load_messages_reports_all_missing_columns() {
        let (_dir, path) = write_csv("session_id,text\ns1,hello\n");
        let error = load_messages(&path).unwrap_err().to_string();
        assert!(error.contains("content"));
        assert!(error.contains("role"));
        assert!(error.contains("timestamp"));
        assert!(!error.contains("session_id,"));
    }

    #[test]
    fn test_load_messages_rejects_bad_timestamp() {
        let (_dir, path) = write_csv(
            "session_id,content,role,timestamp\n\
             s1,hello,subject,not-a-time\n",
        );
        let error = format!("{:#}", load_messages(&path).unwrap_err());
        assert!(error.contains("row 2"));
        assert!(error.contains("not-a-time"));
    }

    #[test]
    fn test_load_messages_missing_file() {
        let error = load_messages(Path::new("/nonexistent/messages.csv")).unwrap_err();
        assert!(error.to_string().contains("cannot open"));
    }

    #[test]
    fn test_parse_timestamp_formats() {
        for raw in [
            "2024-01-02T03:04:05Z",
            "2024-01-02T03:04:05+00:00",
            "2024-01-02 03:04:05",
            "2024/01/02 03:04:05",
            "2024-01-02T03:04:05",
        ] {
            let parsed = parse_timestamp(raw).unwrap();
            assert_eq!(parsed.to_rfc3339(), "2024-01-02T03:04:05+00:00");
        }
    }

    #[test]
    fn test_parse_timestamp_date_only() {
        let parsed = parse_timestamp("2024-01-02").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2024-01-02T00:00:00+00:00");
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        assert!(parse_timestamp("yesterday").is_err());
    }
}
