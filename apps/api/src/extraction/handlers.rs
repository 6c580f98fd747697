//! Axum route handlers for résumé upload and parsing.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use tracing::{info, info_span, warn, Instrument};

use crate::errors::AppError;
use crate::extraction::pdf::{extract_text, looks_like_pdf};
use crate::extraction::sanitize::sanitize_text;
use crate::extraction::{parse_resume, ParsedResume};
use crate::llm_client::CompletionClient;
use crate::render;
use crate::state::AppState;

/// Multipart field carrying the PDF.
const FILE_FIELD: &str = "file";

// ────────────────────────────────────────────────────────────────────────────
// Upload handling
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug)]
struct Upload {
    file_name: String,
    bytes: Bytes,
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge
    } else {
        AppError::Validation(format!("Invalid upload: {e}"))
    }
}

async fn read_upload(mut multipart: Multipart) -> Result<Upload, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or("resume.pdf").to_string();
        let bytes = field.bytes().await.map_err(multipart_error)?;
        let upload = Upload { file_name, bytes };
        validate_upload(&upload)?;
        return Ok(upload);
    }
    Err(AppError::Validation(format!(
        "Missing '{FILE_FIELD}' field in upload"
    )))
}

fn validate_upload(upload: &Upload) -> Result<(), AppError> {
    if upload.bytes.is_empty() {
        return Err(AppError::Validation("Uploaded file is empty".to_string()));
    }
    let pdf_name = upload.file_name.to_ascii_lowercase().ends_with(".pdf");
    if !pdf_name && !looks_like_pdf(&upload.bytes) {
        return Err(AppError::Validation(
            "Only PDF files are allowed".to_string(),
        ));
    }
    Ok(())
}

/// Extracts and sanitizes the text of an uploaded PDF.
async fn upload_to_text(upload: Upload) -> Result<String, AppError> {
    let size = upload.bytes.len();
    let raw = extract_text(upload.bytes)
        .await
        .map_err(|e| AppError::UnprocessableEntity(e.to_string()))?;

    let text = sanitize_text(&raw);
    info!(
        "Extracted {} bytes of text ({} after sanitizing) from {} byte PDF",
        raw.len(),
        text.len(),
        size
    );
    if text.is_empty() {
        return Err(AppError::UnprocessableEntity(
            "No extractable text found in PDF".to_string(),
        ));
    }
    Ok(text)
}

async fn read_resume_text(multipart: Multipart) -> Result<String, AppError> {
    let upload = read_upload(multipart).await?;
    let span = info_span!("resume_upload", file = %upload.file_name);
    upload_to_text(upload).instrument(span).await
}

/// Runs the model over sanitized text and renders whichever outcome it produced.
async fn render_parse(llm: &dyn CompletionClient, text: &str) -> String {
    match parse_resume(llm, text).await {
        Ok(parsed) => render::result_page(&parsed),
        Err(e) => {
            warn!(kind = e.kind(), "Resume parse failed: {e}");
            render::error_page(&e)
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /
pub async fn handle_index() -> Html<String> {
    Html(render::upload_page())
}

/// POST /parse
///
/// Browser form target. Parse failures are rendered inline on the page, the
/// same way a successful record is; only a rejected upload changes the status.
pub async fn handle_parse_page(State(state): State<AppState>, multipart: Multipart) -> Response {
    match read_resume_text(multipart).await {
        Ok(text) => Html(render_parse(state.llm.as_ref(), &text).await).into_response(),
        Err(e) => (e.status(), Html(render::message_page(&e.user_message()))).into_response(),
    }
}

/// POST /api/v1/resumes/parse
///
/// JSON variant: returns the parsed record, or an error body with a kind-specific code.
pub async fn handle_parse_json(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ParsedResume>, AppError> {
    let text = read_resume_text(multipart).await?;
    let parsed = parse_resume(state.llm.as_ref(), &text).await?;
    Ok(Json(parsed))
}
