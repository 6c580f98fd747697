// Résumé extraction pipeline:
// PDF bytes → text → sanitized text → chat completion → cleaned JSON → ResumeRecord.
// All model calls go through llm_client; nothing here touches HTTP directly.

pub mod cleaning;
pub mod handlers;
pub mod pdf;
pub mod prompts;
pub mod sanitize;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::extraction::cleaning::{clean_json_response, decode_json};
use crate::extraction::prompts::RESUME_PARSE_SYSTEM;
use crate::llm_client::CompletionClient;
use crate::models::resume::ResumeRecord;

/// The two ways a parse can fail once text has been extracted.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Transport failure or non-2xx status from the completion endpoint.
    #[error("API Request Error: {0}")]
    Request(String),

    /// The cleaned completion text was not a résumé JSON object.
    #[error("JSON Parsing Error: {message}")]
    Decode { message: String, raw: String },
}

impl ParseError {
    pub fn kind(&self) -> &'static str {
        match self {
            ParseError::Request(_) => "request",
            ParseError::Decode { .. } => "decode",
        }
    }

    /// Raw model output, when the failure happened after the model answered.
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            ParseError::Request(_) => None,
            ParseError::Decode { raw, .. } => Some(raw),
        }
    }
}

/// A successfully parsed résumé: the typed record plus the JSON it came from.
#[derive(Debug, Clone, Serialize)]
pub struct ParsedResume {
    pub id: Uuid,
    pub parsed_at: DateTime<Utc>,
    pub record: ResumeRecord,
    pub raw: Value,
}

/// Sends already-sanitized résumé text to the model and decodes its answer.
pub async fn parse_resume(
    llm: &dyn CompletionClient,
    sanitized_text: &str,
) -> Result<ParsedResume, ParseError> {
    let content = llm
        .complete(RESUME_PARSE_SYSTEM, sanitized_text)
        .await
        .map_err(|e| {
            warn!("Completion request failed: {e}");
            ParseError::Request(e.to_string())
        })?;

    let parsed = decode_record(&content)?;
    info!(
        "Parsed resume: {} education, {} work, {} languages, {} certifications",
        parsed.record.education.len(),
        parsed.record.work_experience.len(),
        parsed.record.languages.len(),
        parsed.record.certifications.len()
    );
    Ok(parsed)
}

/// Cleans and decodes one completion's text.
pub fn decode_record(content: &str) -> Result<ParsedResume, ParseError> {
    let decode_error = |message: String| {
        warn!("Model output did not decode: {message}");
        ParseError::Decode {
            message,
            raw: content.to_string(),
        }
    };

    let cleaned = clean_json_response(content);
    let raw = decode_json(&cleaned).map_err(|e| decode_error(e.to_string()))?;
    if !raw.is_object() {
        return Err(decode_error(format!("expected a JSON object, found {raw}")));
    }
    let record: ResumeRecord =
        serde_json::from_value(raw.clone()).map_err(|e| decode_error(e.to_string()))?;

    Ok(ParsedResume {
        id: Uuid::new_v4(),
        parsed_at: Utc::now(),
        record,
        raw,
    })
}


#[cfg(test)]
mod tests {
    use super::testing::FakeCompletion;
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_fenced_response_decodes() {
        let llm = FakeCompletion::replying("```json\n{\"full_name\": \"A\"}\n```");
        let parsed = parse_resume(&llm, "A resume").await.unwrap();
        assert_eq!(parsed.raw, json!({"full_name": "A"}));
        assert_eq!(parsed.record.full_name.as_deref(), Some("A"));
    }

    #[tokio::test]
    async fn test_sends_text_as_user_message() {
        let llm = FakeCompletion::replying("{}");
        parse_resume(&llm, "Jane Doe Engineer").await.unwrap();
        assert_eq!(*llm.seen.lock().unwrap(), vec!["Jane Doe Engineer".to_string()]);
    }

    #[tokio::test]
    async fn test_api_failure_is_request_error() {
        let llm = FakeCompletion::failing(500, "boom");
        let err = parse_resume(&llm, "text").await.unwrap_err();
        assert_eq!(err.kind(), "request");
        assert!(err.to_string().contains("boom"));
        assert!(err.raw_response().is_none());
    }

    #[tokio::test]
    async fn test_invalid_json_is_decode_error_with_raw() {
        let llm = FakeCompletion::replying("Sorry, I cannot help with that.");
        let err = parse_resume(&llm, "text").await.unwrap_err();
        assert_eq!(err.kind(), "decode");
        assert_eq!(err.raw_response(), Some("Sorry, I cannot help with that."));
        assert!(err.to_string().starts_with("JSON Parsing Error:"));
    }

    #[test]
    fn test_array_is_decode_error() {
        let err = decode_record("[1, 2, 3]").unwrap_err();
        assert_eq!(err.kind(), "decode");
    }

    #[test]
    fn test_wrong_shape_still_decodes() {
        let content = r#"{"full_name": "A", "education": "BSc Physics, MIT", "skills": ["Rust", "Go"]}"#;
        let parsed = decode_record(content).unwrap();
        assert_eq!(parsed.record.full_name.as_deref(), Some("A"));
        assert!(parsed.record.education.is_empty());
        assert!(parsed.record.skills.is_empty());
        assert_eq!(parsed.raw["skills"], json!(["Rust", "Go"]));
        assert_eq!(parsed.raw["education"], "BSc Physics, MIT");
    }

    #[test]
    fn test_raw_keeps_unknown_fields() {
        let parsed = decode_record(r#"{"full_name": "A", "summary": "extra"}"#).unwrap();
        assert_eq!(parsed.raw["summary"], "extra");
        assert_eq!(parsed.record.full_name.as_deref(), Some("A"));
    }
}
