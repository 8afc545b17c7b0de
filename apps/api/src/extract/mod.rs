//! Document text extraction — turns uploaded resume bytes into plain text.
//!
//! Two formats are accepted: PDF and DOCX. Everything else is rejected before
//! any parsing happens. Extraction that yields less than [`MIN_TEXT_CHARS`]
//! of trimmed text is rejected too, so near-empty documents never reach the
//! completion call.

use thiserror::Error;

mod docx;
mod pdf;

const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Minimum trimmed character count for extracted text.
pub const MIN_TEXT_CHARS: usize = 50;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Unsupported file type '{0}'. Please upload PDF or DOCX.")]
    UnsupportedFormat(String),

    #[error("Could not extract meaningful text from the file ({chars} characters)")]
    InsufficientContent { chars: usize },

    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("DOCX extraction failed: {0}")]
    Docx(String),
}

/// Result of text extraction from an uploaded document.
#[derive(Debug, Clone)]
pub struct ExtractedText {
    pub text: String,
    /// Hyperlink targets found in the document (PDF link annotations only).
    pub urls: Vec<String>,
    /// Page count, informational only. `None` for DOCX.
    pub page_count: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocumentKind {
    Pdf,
    Docx,
}

fn detect_kind(media_type: &str, filename: &str) -> Option<DocumentKind> {
    if media_type == "application/pdf" {
        Some(DocumentKind::Pdf)
    } else if media_type == DOCX_MIME || filename.to_lowercase().ends_with(".docx") {
        Some(DocumentKind::Docx)
    } else {
        None
    }
}

/// Extracts plain text from uploaded resume bytes.
///
/// The media type (or a `.docx` filename fallback) picks the parser; unknown
/// types fail with [`ExtractError::UnsupportedFormat`] before any extraction
/// is attempted.
pub fn extract_document(
    data: &[u8],
    media_type: &str,
    filename: &str,
) -> Result<ExtractedText, ExtractError> {
    let kind = detect_kind(media_type, filename)
        .ok_or_else(|| ExtractError::UnsupportedFormat(media_type.to_string()))?;

    let extracted = match kind {
        DocumentKind::Pdf => pdf::extract(data)?,
        DocumentKind::Docx => docx::extract(data)?,
    };

    check_min_content(&extracted.text)?;
    Ok(extracted)
}

fn check_min_content(text: &str) -> Result<(), ExtractError> {
    let chars = text.trim().chars().count();
    if chars < MIN_TEXT_CHARS {
        return Err(ExtractError::InsufficientContent { chars });
    }
    Ok(())
}
