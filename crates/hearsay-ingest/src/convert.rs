//! CSV to JSON conversion

use anyhow::Context;
use std::path::Path;
use tracing::info;

/// Convert a CSV file into a pretty-printed JSON array of row objects.
///
/// Every row becomes an object keyed by header name; parent directories of
/// the destination are created. Returns the number of converted records.
pub fn convert_csv_to_json(csv_path: &Path, json_path: &Path) -> anyhow::Result<usize> {
    let mut reader = csv::Reader::from_path(csv_path)
        .with_context(|| format!("cannot open CSV: {}", csv_path.display()))?;
    let headers = reader.headers()?.clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let mut row = serde_json::Map::new();
        for (header, field) in headers.iter().zip(record.iter()) {
            row.insert(
                header.to_string(),
                serde_json::Value::String(field.to_string()),
            );
        }
        rows.push(serde_json::Value::Object(row));
    }

    if let Some(parent) = json_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(&rows)?;
    std::fs::write(json_path, json)
        .with_context(|| format!("cannot write JSON: {}", json_path.display()))?;

    info!(
        records = rows.len(),
        from = %csv_path.display(),
        to = %json_path.display(),
        "CSV converted to JSON"
    );
    Ok(rows.len())
}
