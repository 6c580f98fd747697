//! PDF text extraction.

use bytes::Bytes;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("Failed to extract text from PDF: {0}")]
    Extraction(String),

    #[error("PDF extraction aborted: {0}")]
    Aborted(String),
}

/// Extracts the text of every page, concatenated in page order.
///
/// `pdf_extract` is CPU-bound and may panic on malformed input, so it runs on
/// the blocking pool; a panic there is reported as `PdfError::Aborted`.
pub async fn extract_text(pdf: Bytes) -> Result<String, PdfError> {
    tokio::task::spawn_blocking(move || extract_text_blocking(&pdf))
        .await
        .map_err(|e| PdfError::Aborted(e.to_string()))?
}

pub fn extract_text_blocking(pdf: &[u8]) -> Result<String, PdfError> {
    let text = pdf_extract::extract_text_from_mem(pdf)
        .map_err(|e| PdfError::Extraction(e.to_string()))?;
    debug!("Extracted {} characters from {} byte PDF", text.len(), pdf.len());
    Ok(text)
}

/// Cheap content sniff: every PDF starts with the `%PDF` header.
pub fn looks_like_pdf(bytes: &[u8]) -> bool {
    bytes.starts_with(b"%PDF")
}
