//! Markdown report rendering and output

use crate::extract::ReportSections;
use std::path::Path;

/// Render the final Markdown report.
///
/// `analysis_blocks` are the (possibly compressed) per-chunk findings;
/// `source_links` pairs session ids with their primary citation URL and is
/// omitted entirely when empty.
pub fn render_report(
    sections: &ReportSections,
    analysis_blocks: &[String],
    source_links: &[(String, String)],
) -> String {
    let analysis_block = analysis_blocks.join("\n\n");
    let mut report = format!(
        "# AIインタビューログ分析レポート\n\
         \n\
         ## 1. 全体サマリー\n\
         {overall}\n\
         \n\
         ## 2. 分析ブロック別の主な論点\n\
         {blocks}\n\
         \n\
         ## 3. 法整備の観点で見落とされがちなポイント\n\
         {overlooked}\n\
         \n\
         ## 4. 改善提案・示唆\n\
         {suggestions}\n",
        overall = sections.overall_summary,
        blocks = analysis_block,
        overlooked = sections.overlooked_points,
        suggestions = sections.suggestions,
    );

    if !source_links.is_empty() {
        report.push_str("\n## 5. 参考資料\n");
        for (session_id, url) in source_links {
            report.push_str(&format!("- セッション {session_id}: {url}\n"));
        }
    }

    report
}

/// Write the report atomically (temp file + rename) so a failed write never
/// leaves a partial report behind. Parent directories are created.
pub fn write_report(path: &Path, report: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let temp_path = path.with_extension("tmp");
    std::fs::write(&temp_path, report)?;
    std::fs::rename(temp_path, path)?;
    Ok(())
}
