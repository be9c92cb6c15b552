//! Response normalization — projects a raw `generateContent` response into
//! the single string the UI renders.
//!
//! Pure projection, no I/O. Absent fields mean "not present", never an
//! error, and partial output is always kept: degraded finishes are annotated
//! for the reader instead of being discarded.

use crate::llm_client::types::GenerateContentResponse;

const FINISH_STOP: &str = "STOP";
const FINISH_MAX_TOKENS: &str = "MAX_TOKENS";
const FINISH_SAFETY: &str = "SAFETY";
const FINISH_RECITATION: &str = "RECITATION";

const TRUNCATION_NOTE: &str = "\n\n---\n_NOTE: Output may be truncated._";
const SAFETY_NOTE: &str = "\n\n---\n_NOTE: Some content was removed by the safety filter._";
const RECITATION_NOTE: &str = "\n\n---\n_NOTE: Output was flagged for reciting existing material._";

/// Note appended by the client when the answer came from the fallback model.
pub const FALLBACK_NOTE: &str = "\n\n---\n_Used fallback model._";

/// Extracts displayable text from a raw Gemini response.
///
/// Order of checks:
/// 1. no candidates → block-reason message, or "No content returned."
/// 2. first candidate only: part texts concatenated and trimmed
/// 3. empty text → "Empty response …" naming the finish reason (and the
///    block reason when present)
/// 4. non-empty text → annotation appended for any finish reason other than
///    STOP or absent
pub fn normalize(response: &GenerateContentResponse) -> String {
    let Some(candidate) = response.candidates.first() else {
        if let Some(reason) = block_reason(response) {
            return format!("Request blocked by safety filters: {reason}");
        }
        return "No content returned.".to_string();
    };

    let text: String = candidate
        .content
        .iter()
        .flat_map(|content| content.parts.iter())
        .filter_map(|part| part.text.as_deref())
        .collect();
    let text = text.trim();

    let finish_reason = candidate.finish_reason.as_deref();

    if text.is_empty() {
        let mut message = format!(
            "Empty response (finish_reason: {})",
            finish_reason.unwrap_or("unspecified")
        );
        if let Some(reason) = block_reason(response) {
            message.push_str(&format!(", block_reason: {reason}"));
        }
        return message;
    }

    let mut output = text.to_string();
    match finish_reason {
        Some(FINISH_MAX_TOKENS) => output.push_str(TRUNCATION_NOTE),
        Some(FINISH_SAFETY) => output.push_str(SAFETY_NOTE),
        Some(FINISH_RECITATION) => output.push_str(RECITATION_NOTE),
        Some(FINISH_STOP) | None => {}
        Some(other) => output.push_str(&format!("\n\n---\n_(finish reason: {other})_")),
    }
    output
}

fn block_reason(response: &GenerateContentResponse) -> Option<&str> {
    response
        .prompt_feedback
        .as_ref()
        .and_then(|feedback| feedback.block_reason.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(raw: &str) -> GenerateContentResponse {
        serde_json::from_str(raw).unwrap()
    }

    fn text_response(text: &str, finish_reason: &str) -> GenerateContentResponse {
        response(&format!(
            r#"{{"candidates": [{{"content": {{"parts": [{{"text": {}}}], "role": "model"}}, "finishReason": "{}"}}]}}"#,
            serde_json::to_string(text).unwrap(),
            finish_reason
        ))
    }

    #[test]
    fn test_blocked_prompt_reports_block_reason() {
        let raw = response(r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#);
        assert_eq!(
            normalize(&raw),
            "Request blocked by safety filters: SAFETY"
        );
    }

    #[test]
    fn test_no_candidates_without_block_reason() {
        let raw = response("{}");
        assert_eq!(normalize(&raw), "No content returned.");
    }

    #[test]
    fn test_plain_completion_returns_exact_text() {
        let raw = text_response("Hello", "STOP");
        assert_eq!(normalize(&raw), "Hello");
    }

    #[test]
    fn test_concatenates_parts_in_order() {
        let raw = response(
            r#"{"candidates": [{"content": {"parts": [{"text": "Hello "}, {"text": "world"}]}, "finishReason": "STOP"}]}"#,
        );
        assert_eq!(normalize(&raw), "Hello world");
    }

    #[test]
    fn test_skips_parts_without_text() {
        let raw = response(
            r#"{"candidates": [{"content": {"parts": [{"text": "a"}, {}, {"text": "b"}]}, "finishReason": "STOP"}]}"#,
        );
        assert_eq!(normalize(&raw), "ab");
    }

    #[test]
    fn test_trims_surrounding_whitespace() {
        let raw = text_response("\n  Hello\n\n", "STOP");
        assert_eq!(normalize(&raw), "Hello");
    }

    #[test]
    fn test_only_first_candidate_is_used() {
        let raw = response(
            r#"{"candidates": [
                {"content": {"parts": [{"text": "first"}]}, "finishReason": "STOP"},
                {"content": {"parts": [{"text": "second"}]}, "finishReason": "STOP"}
            ]}"#,
        );
        assert_eq!(normalize(&raw), "first");
    }

    #[test]
    fn test_empty_text_reports_finish_reason() {
        let raw = response(r#"{"candidates": [{"content": {"parts": []}, "finishReason": "SAFETY"}]}"#);
        assert_eq!(normalize(&raw), "Empty response (finish_reason: SAFETY)");
    }

    #[test]
    fn test_empty_text_without_finish_reason() {
        let raw = response(r#"{"candidates": [{}]}"#);
        assert_eq!(normalize(&raw), "Empty response (finish_reason: unspecified)");
    }

    #[test]
    fn test_empty_text_includes_block_reason_when_present() {
        let raw = response(
            r#"{"candidates": [{"finishReason": "OTHER"}],
                "promptFeedback": {"blockReason": "PROHIBITED_CONTENT"}}"#,
        );
        assert_eq!(
            normalize(&raw),
            "Empty response (finish_reason: OTHER), block_reason: PROHIBITED_CONTENT"
        );
    }

    #[test]
    fn test_whitespace_only_text_counts_as_empty() {
        let raw = text_response("   \n  ", "STOP");
        assert_eq!(normalize(&raw), "Empty response (finish_reason: STOP)");
    }

    #[test]
    fn test_max_tokens_appends_truncation_note() {
        let out = normalize(&text_response("partial answer", "MAX_TOKENS"));
        assert!(out.starts_with("partial answer"));
        assert!(out.contains("truncated"));
    }

    #[test]
    fn test_safety_finish_appends_filter_note() {
        let out = normalize(&text_response("some text", "SAFETY"));
        assert!(out.starts_with("some text"));
        assert!(out.contains("safety filter"));
    }

    #[test]
    fn test_recitation_finish_appends_note() {
        let out = normalize(&text_response("quoted text", "RECITATION"));
        assert!(out.starts_with("quoted text"));
        assert!(out.contains("reciting"));
    }

    #[test]
    fn test_unknown_finish_reason_passes_through() {
        let out = normalize(&text_response("answer", "LANGUAGE"));
        assert!(out.starts_with("answer"));
        assert!(out.contains("(finish reason: LANGUAGE)"));
    }

    #[test]
    fn test_stop_gets_no_annotation() {
        assert_eq!(normalize(&text_response("clean", "STOP")), "clean");
    }

    #[test]
    fn test_absent_finish_reason_gets_no_annotation() {
        let raw = response(r#"{"candidates": [{"content": {"parts": [{"text": "clean"}]}}]}"#);
        assert_eq!(normalize(&raw), "clean");
    }

    #[test]
    fn test_normalize_is_idempotent_per_response() {
        let raw = text_response("partial", "MAX_TOKENS");
        assert_eq!(normalize(&raw), normalize(&raw));
    }

    #[test]
    fn test_candidate_without_content_is_empty_not_panic() {
        let raw = response(r#"{"candidates": [{"finishReason": "SAFETY"}]}"#);
        assert_eq!(normalize(&raw), "Empty response (finish_reason: SAFETY)");
    }
}
