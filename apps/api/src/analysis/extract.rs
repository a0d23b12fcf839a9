//! Text acquisition from uploaded PDF documents.
//!
//! `pdf-extract` is synchronous and may panic on malformed input, so callers run this
//! inside `tokio::task::spawn_blocking`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Uploaded file is empty")]
    EmptyFile,

    #[error("Could not read text from PDF: {0}")]
    Pdf(String),
}

/// Returns the document's text in reading order with line breaks preserved.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, ExtractError> {
    if bytes.is_empty() {
        return Err(ExtractError::EmptyFile);
    }
    pdf_extract::extract_text_from_mem(bytes).map_err(|e| ExtractError::Pdf(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_upload_rejected() {
        assert!(matches!(extract_pdf_text(&[]), Err(ExtractError::EmptyFile)));
    }

    #[test]
    fn test_non_pdf_bytes_rejected() {
        let result = extract_pdf_text(b"this is plainly not a pdf document");
        assert!(matches!(result, Err(ExtractError::Pdf(_))));
    }
}
