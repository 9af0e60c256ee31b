//! Recover a JSON object from free-form oracle output
//!
//! Oracles often wrap JSON in markdown fences or surround it with prose.
//! Two strategies are tried in order:
//!
//! 1. the first fenced block (```` ``` ```` or ```` ```json ````)
//! 2. the span from the first `{` to the last `}`
//!
//! Parsing is strict `serde_json`: comments, trailing commas and unquoted keys
//! are failures, never repaired.

use crate::error::ExtractorError;
use serde_json::Value;
use tracing::debug;

const FENCE: &str = "```";

/// Extract the embedded JSON object from an oracle response
pub fn extract_json(response: &str) -> Result<Value, ExtractorError> {
    let mut attempts = Vec::new();

    if let Some(inner) = fenced_block(response) {
        match parse_object(inner) {
            Ok(value) => return Ok(value),
            Err(e) => {
                debug!("Fenced block is not a JSON object: {}", e);
                attempts.push(format!("fenced block: {}", e));
            }
        }
    }

    if let Some(span) = brace_span(response) {
        match parse_object(span) {
            Ok(value) => return Ok(value),
            Err(e) => attempts.push(format!("brace span: {}", e)),
        }
    }

    let reason = if attempts.is_empty() {
        "no JSON object found in response".to_string()
    } else {
        attempts.join("; ")
    };
    Err(ExtractorError::ExtractionFailed {
        reason,
        raw_response: response.to_string(),
    })
}

/// Interior of the first complete fenced block, minus a `json` label
fn fenced_block(text: &str) -> Option<&str> {
    let open = text.find(FENCE)?;
    let after_open = &text[open + FENCE.len()..];
    let close = after_open.find(FENCE)?;
    let inner = &after_open[..close];

    match inner.get(..4) {
        Some(label) if label.eq_ignore_ascii_case("json") => Some(&inner[4..]),
        _ => Some(inner),
    }
}

/// Greedy span from the first `{` to the last `}`
fn brace_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

fn parse_object(candidate: &str) -> Result<Value, String> {
    let value: Value = serde_json::from_str(candidate.trim()).map_err(|e| e.to_string())?;
    if value.is_object() {
        Ok(value)
    } else {
        Err("expected a JSON object".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fenced_json_block() {
        let response = "prefix ```json\n{\"a\":1}\n``` suffix";
        assert_eq!(extract_json(response).unwrap(), json!({"a": 1}));
    }

    #[test]
    fn test_fenced_block_without_label() {
        let response = "Result:\n```\n{\"status\": \"GREEN\"}\n```";
        assert_eq!(extract_json(response).unwrap(), json!({"status": "GREEN"}));
    }

    #[test]
    fn test_fence_label_is_case_insensitive() {
        let response = "```JSON\n{\"a\": true}\n```";
        assert_eq!(extract_json(response).unwrap(), json!({"a": true}));
    }

    #[test]
    fn test_bare_object_in_prose() {
        let response = "Here is the result: {\"a\":1} thanks";
        assert_eq!(extract_json(response).unwrap(), json!({"a": 1}));
    }

    #[test]
    fn test_plain_json() {
        let response = r#"  {"key": "value"}  "#;
        assert_eq!(extract_json(response).unwrap(), json!({"key": "value"}));
    }

    #[test]
    fn test_nested_objects_use_greedy_span() {
        let response = "Report: {\"metrics\": {\"velocity\": 78}, \"score\": 92}. Done.";
        assert_eq!(
            extract_json(response).unwrap(),
            json!({"metrics": {"velocity": 78}, "score": 92})
        );
    }

    #[test]
    fn test_malformed_json_fails() {
        let err = extract_json("{a: 1,}").unwrap_err();
        assert!(matches!(err, ExtractorError::ExtractionFailed { .. }));
        assert_eq!(err.raw_response(), Some("{a: 1,}"));
    }

    #[test]
    fn test_comments_are_not_repaired() {
        let response = "```json\n{\"a\": 1 // one\n}\n```";
        assert!(extract_json(response).is_err());
    }

    #[test]
    fn test_trailing_comma_fails() {
        assert!(extract_json(r#"{"a": 1, "b": 2,}"#).is_err());
    }

    #[test]
    fn test_no_json_at_all() {
        let err = extract_json("I could not find any metrics.").unwrap_err();
        match err {
            ExtractorError::ExtractionFailed { reason, raw_response } => {
                assert!(reason.contains("no JSON object"));
                assert_eq!(raw_response, "I could not find any metrics.");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_bad_fence_falls_back_to_braces() {
        // The fenced block holds prose; the object sits outside it
        let response = "```text\nsee below\n``` {\"a\": 2}";
        assert_eq!(extract_json(response).unwrap(), json!({"a": 2}));
    }

    #[test]
    fn test_array_is_not_an_object() {
        assert!(extract_json("```json\n[1, 2]\n```").is_err());
    }

    #[test]
    fn test_unclosed_fence_uses_braces() {
        let response = "```json\n{\"a\": 3}";
        assert_eq!(extract_json(response).unwrap(), json!({"a": 3}));
    }

    #[test]
    fn test_reversed_braces() {
        assert!(extract_json("} nothing {").is_err());
    }

    #[test]
    fn test_multibyte_after_fence() {
        let response = "```é\n{\"a\": 1}\n```";
        assert_eq!(extract_json(response).unwrap(), json!({"a": 1}));
    }
}
