use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::extraction::ParseError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unprocessable entity: {0}")]
    UnprocessableEntity(String),

    #[error("Upload exceeds the size limit")]
    PayloadTooLarge,

    #[error("API Request Error: {0}")]
    LlmRequest(String),

    #[error("JSON Parsing Error: {message}")]
    LlmDecode { message: String, raw: String },
}

impl From<ParseError> for AppError {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::Request(msg) => AppError::LlmRequest(msg),
            ParseError::Decode { message, raw } => AppError::LlmDecode { message, raw },
        }
    }
}

impl AppError {
    /// Status, machine-readable code and user-facing message.
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::UnprocessableEntity(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "UNPROCESSABLE_ENTITY",
                msg.clone(),
            ),
            AppError::PayloadTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "PAYLOAD_TOO_LARGE",
                self.to_string(),
            ),
            AppError::LlmRequest(_) => (StatusCode::BAD_GATEWAY, "LLM_REQUEST_ERROR", self.to_string()),
            AppError::LlmDecode { .. } => (StatusCode::BAD_GATEWAY, "LLM_DECODE_ERROR", self.to_string()),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.parts().0
    }

    /// Message suitable for showing to the uploader.
    pub fn user_message(&self) -> String {
        self.parts().2
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        let mut error = json!({
            "code": code,
            "message": message
        });
        if let AppError::LlmDecode { raw, .. } = &self {
            error["raw_response"] = json!(raw);
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}
