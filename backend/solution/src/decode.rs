//! The two-stage response decoder.
//!
//! Stage one is a strict JSON parse of the fence-stripped blob. Only a
//! *syntax* failure earns the single repair pass and one retry; a
//! syntactically valid object that fails shape validation is terminal
//! immediately, since escape repair cannot conjure missing fields.

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::repair::{repair_escape_sequences, strip_code_fences};
use crate::schema::SolutionDocument;

/// Terminal decoding failure. Carries the original raw text so the caller
/// can log or surface it; the failure is retryable only by requesting fresh
/// output from the model.
#[derive(Debug, Error)]
#[error("could not decode model response: {reason}")]
pub struct DecodeError {
    pub reason: String,
    pub raw: String,
}

/// Parses a fence-stripped blob into a JSON value, repairing escape
/// sequences at most once.
fn parse_value(cleaned: &str) -> Result<Value, serde_json::Error> {
    match serde_json::from_str(cleaned) {
        Ok(value) => Ok(value),
        Err(first) => {
            debug!("[Decode] strict parse failed ({}), repairing escapes", first);
            serde_json::from_str(&repair_escape_sequences(cleaned))
        }
    }
}

/// Decodes any JSON payload the model returns: strips surrounding fences,
/// parses strictly, and on syntax failure repairs escapes and retries once.
pub fn decode_lenient<T: DeserializeOwned>(raw: &str) -> Result<T, DecodeError> {
    let cleaned = strip_code_fences(raw);
    let value = parse_value(cleaned).map_err(|e| DecodeError {
        reason: format!("invalid JSON after one repair pass: {}", e),
        raw: raw.to_string(),
    })?;
    serde_json::from_value(value).map_err(|e| DecodeError {
        reason: format!("unexpected shape: {}", e),
        raw: raw.to_string(),
    })
}

/// Decodes and validates a full solution document.
pub fn decode(raw: &str) -> Result<SolutionDocument, DecodeError> {
    decode_lenient(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::sample_document;
    use serde::Deserialize;

    fn sample_json() -> String {
        serde_json::to_string(&sample_document()).unwrap()
    }

    #[test]
    fn test_decodes_wellformed_document() {
        let doc = decode(&sample_json()).unwrap();
        assert_eq!(doc.short_answer, "$x = \\pm\\sqrt{2}$");
        assert_eq!(doc.step_by_step_solution.len(), 1);
        assert_eq!(doc.language_used, "English");
    }

    #[test]
    fn test_decode_roundtrip() {
        let doc = decode(&sample_json()).unwrap();
        let reencoded = serde_json::to_string(&doc).unwrap();
        assert_eq!(decode(&reencoded).unwrap(), doc);
    }

    #[test]
    fn test_fenced_json_decodes() {
        let raw = format!("```json\n{}\n```", sample_json());
        assert!(decode(&raw).is_ok());
    }

    #[test]
    fn test_repairs_underescaped_latex() {
        // Break the fixture: a single backslash before `sqrt` is illegal
        // JSON and only parses after the repair pass doubles it.
        let raw = sample_json().replace("\\\\pm\\\\sqrt{2}", "\\pm\\sqrt{2}");
        assert_ne!(raw, sample_json());
        let doc = decode(&raw).unwrap();
        assert_eq!(doc.short_answer, "$x = \\pm\\sqrt{2}$");
    }

    #[test]
    fn test_missing_required_field_is_terminal() {
        let mut value: serde_json::Value = serde_json::from_str(&sample_json()).unwrap();
        value.as_object_mut().unwrap().remove("short_answer");
        let raw = serde_json::to_string(&value).unwrap();
        let err = decode(&raw).unwrap_err();
        assert!(err.reason.contains("short_answer"), "reason: {}", err.reason);
    }

    #[test]
    fn test_truncated_json_fails() {
        let raw = "{\"short_answer\": \"$x$\", \"difficulty\": {";
        let err = decode(raw).unwrap_err();
        assert!(err.reason.contains("invalid JSON"), "reason: {}", err.reason);
        assert_eq!(err.raw, raw);
    }

    #[test]
    fn test_non_json_text_fails() {
        let err = decode("Sorry, I cannot read this image.").unwrap_err();
        assert!(err.reason.contains("invalid JSON"));
    }

    #[test]
    fn test_error_preserves_raw_text() {
        let raw = "```json\n{broken\n```";
        let err = decode(raw).unwrap_err();
        assert_eq!(err.raw, raw);
    }

    #[derive(Debug, PartialEq, Deserialize)]
    struct MiniReview {
        correct: bool,
        feedback: String,
    }

    #[test]
    fn test_decode_lenient_generic_payloads() {
        let raw = "```json\n{\"correct\": false, \"feedback\": \"Check \\sqrt{9} again.\"}\n```";
        let review: MiniReview = decode_lenient(raw).unwrap();
        assert!(!review.correct);
        assert_eq!(review.feedback, "Check \\sqrt{9} again.");
    }

    #[test]
    fn test_decode_lenient_shape_error_mentions_field() {
        let err = decode_lenient::<MiniReview>("{\"correct\": true}").unwrap_err();
        assert!(err.reason.contains("feedback"));
    }
}
