//! Tagged-section extraction from synthesis responses

use regex::Regex;
use serde::Serialize;
use tracing::debug;

/// Extract the trimmed inner text of the first `[tag]...[/tag]` region.
///
/// The synthesis response is free-form model output, so well-formedness is
/// never assumed: a missing or malformed tag degrades to an empty string
/// rather than failing the run.
pub fn extract_tagged_section(text: &str, tag: &str) -> String {
    let escaped = regex::escape(tag);
    let Ok(pattern) = Regex::new(&format!(r"(?s)\[{escaped}\](.*?)\[/{escaped}\]")) else {
        return String::new();
    };
    match pattern.captures(text).and_then(|capture| capture.get(1)) {
        Some(inner) => inner.as_str().trim().to_string(),
        None => {
            debug!(tag, "tagged section absent from synthesis response");
            String::new()
        }
    }
}

/// The three named report sections extracted from one synthesis response.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReportSections {
    pub overall_summary: String,
    pub overlooked_points: String,
    pub suggestions: String,
}

impl ReportSections {
    pub fn from_response(response: &str) -> Self {
        Self {
            overall_summary: extract_tagged_section(response, "overall_summary"),
            overlooked_points: extract_tagged_section(response, "overlooked_points"),
            suggestions: extract_tagged_section(response, "suggestions"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_first_match_trimmed() {
        let text = "[overall_summary]\n  要約本文  \n[/overall_summary]";
        assert_eq!(extract_tagged_section(text, "overall_summary"), "要約本文");
    }

    #[test]
    fn test_missing_tag_yields_empty() {
        assert_eq!(extract_tagged_section("no tags here", "suggestions"), "");
    }

    #[test]
    fn test_unclosed_tag_yields_empty() {
        assert_eq!(
            extract_tagged_section("[suggestions]dangling", "suggestions"),
            ""
        );
    }

    #[test]
    fn test_inner_text_spans_lines() {
        let text = "[suggestions]line one\nline two[/suggestions]";
        assert_eq!(
            extract_tagged_section(text, "suggestions"),
            "line one\nline two"
        );
    }

    #[test]
    fn test_sections_from_response() {
        let response =
            "[overall_summary]A[/overall_summary][suggestions]B[/suggestions]";
        let sections = ReportSections::from_response(response);
        assert_eq!(sections.overall_summary, "A");
        assert_eq!(sections.overlooked_points, "");
        assert_eq!(sections.suggestions, "B");
    }
}
