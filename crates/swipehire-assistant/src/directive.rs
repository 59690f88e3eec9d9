//! Chart directive extraction from assistant text
//!
//! The assistant embeds chart payloads inline in its answer:
//!
//! ```text
//! <chart-data type="skills-gap">
//! {"data": [{"name": "Frontend", "current": 3, "needed": 5}]}
//! </chart-data>
//! ```
//!
//! Extraction happens once over the final accumulated text; stripping happens
//! on every update so the tags never reach the displayed message.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Any tag-shaped span, ending at the nearest closing tag. Spans are located
/// first so one malformed directive cannot swallow the next; stripping also
/// uses this shape so a malformed directive still disappears from view.
static TAG_SPAN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<chart-data[^>]*>.*?</chart-data>").expect("tag span regex is valid")
});

/// Well-formed directive shape, applied to one whole span: captures the type
/// attribute and the object between the tags.
static DIRECTIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)^<chart-data type="([^"]+)">\s*(\{.*\})\s*</chart-data>$"#)
        .expect("directive regex is valid")
});

/// One extracted chart directive.
///
/// `data` is passed through verbatim; the schema per chart type is the
/// renderer's concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDirective {
    #[serde(rename = "type")]
    pub kind: String,
    pub data: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct DirectiveBody {
    data: Vec<serde_json::Value>,
}

/// Extract every well-formed directive from `content`, in order.
///
/// Malformed directive JSON (or a body without a `data` array) is logged and
/// skipped without affecting later occurrences. Pure over its input.
pub fn extract_directives(content: &str) -> Vec<ChartDirective> {
    let mut charts = Vec::new();
    for span in TAG_SPAN_RE.find_iter(content) {
        let Some(caps) = DIRECTIVE_RE.captures(span.as_str()) else {
            tracing::debug!(span = span.as_str(), "skipping malformed chart directive tag");
            continue;
        };
        let kind = &caps[1];
        match serde_json::from_str::<DirectiveBody>(&caps[2]) {
            Ok(body) => charts.push(ChartDirective {
                kind: kind.to_string(),
                data: body.data,
            }),
            Err(e) => {
                tracing::debug!(kind, error = %e, "skipping malformed chart directive");
            }
        }
    }
    charts
}

/// Remove every directive tag-span from `content` and trim the result.
///
/// This is the only text shown to the user; it is recomputed wholesale on
/// each update since spans may complete as more text arrives.
pub fn strip_directives(content: &str) -> String {
    TAG_SPAN_RE.replace_all(content, "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SAMPLE: &str = concat!(
        "Summary: X <chart-data type=\"skills-gap\">",
        "{\"data\":[{\"name\":\"A\",\"current\":1,\"needed\":2}]}",
        "</chart-data> more text",
    );

    #[test]
    fn test_extract_single_directive() {
        let charts = extract_directives(SAMPLE);
        assert_eq!(charts.len(), 1);
        assert_eq!(charts[0].kind, "skills-gap");
        assert_eq!(
            charts[0].data,
            vec![json!({"name": "A", "current": 1, "needed": 2})]
        );
    }

    #[test]
    fn test_strip_leaves_surrounding_text() {
        assert_eq!(strip_directives(SAMPLE), "Summary: X  more text");
    }

    #[test]
    fn test_strip_trims_result() {
        let content = "  <chart-data type=\"x\">{\"data\":[]}</chart-data>  ";
        assert_eq!(strip_directives(content), "");
    }

    #[test]
    fn test_multiline_body_with_whitespace() {
        let content =
            "intro\n<chart-data type=\"department-distribution\">\n{\"data\": [{\"name\": \"Engineering\", \"value\": 45}]}\n</chart-data>\noutro";
        let charts = extract_directives(content);
        assert_eq!(charts.len(), 1);
        assert_eq!(charts[0].kind, "department-distribution");
        assert_eq!(strip_directives(content), "intro\n\noutro");
    }

    #[test]
    fn test_malformed_json_skipped_without_blocking_later() {
        let content = concat!(
            "a <chart-data type=\"bad\">{\"data\": [truncated</chart-data> ",
            "b <chart-data type=\"priority-roles\">",
            "{\"data\":[{\"name\":\"DevOps\",\"priority\":\"high\",\"value\":85}]}",
            "</chart-data> c",
        );
        let charts = extract_directives(content);
        assert_eq!(charts.len(), 1);
        assert_eq!(charts[0].kind, "priority-roles");
    }

    #[test]
    fn test_body_without_data_array_skipped() {
        let content = "<chart-data type=\"x\">{\"rows\": []}</chart-data>";
        assert!(extract_directives(content).is_empty());
    }

    #[test]
    fn test_malformed_body_still_stripped_from_view() {
        let content = "before <chart-data type=\"bad\">{oops</chart-data> after";
        assert_eq!(strip_directives(content), "before  after");
    }

    #[test]
    fn test_unclosed_tag_remains_visible() {
        // the closing tag has not streamed in yet
        let content = "text <chart-data type=\"skills-gap\">{\"data\":";
        assert_eq!(strip_directives(content), content.trim());
    }

    #[test]
    fn test_multiple_directives_in_order() {
        let content = concat!(
            "<chart-data type=\"one\">{\"data\":[1]}</chart-data>",
            " mid ",
            "<chart-data type=\"two\">{\"data\":[2]}</chart-data>",
        );
        let charts = extract_directives(content);
        assert_eq!(charts.len(), 2);
        assert_eq!(charts[0].kind, "one");
        assert_eq!(charts[1].kind, "two");
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let first = extract_directives(SAMPLE);
        let second = extract_directives(SAMPLE);
        assert_eq!(first, second);
    }
}
