//! Document text extraction
//!
//! Turns an uploaded pitch deck into plain text. The declared MIME type picks
//! the parser; nothing is sniffed from the bytes.

mod docx;
mod ooxml;
mod pdf;
mod pptx;

#[cfg(test)]
pub mod fixtures;

use std::fmt;
use std::path::Path;
use thiserror::Error;

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const PPTX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation";

/// Supported document formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
    Pptx,
}

impl DocumentKind {
    /// Match a MIME type, ignoring case and parameters such as `; charset=`.
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or_default().trim();
        if essence.eq_ignore_ascii_case(PDF_MIME) {
            Some(Self::Pdf)
        } else if essence.eq_ignore_ascii_case(DOCX_MIME) {
            Some(Self::Docx)
        } else if essence.eq_ignore_ascii_case(PPTX_MIME) {
            Some(Self::Pptx)
        } else {
            None
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pdf => "PDF",
            Self::Docx => "DOCX",
            Self::Pptx => "PPTX",
        })
    }
}

/// Extraction errors
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("unsupported document type: {0}")]
    UnsupportedFormat(String),
    #[error("failed to extract {kind} text: {message}")]
    Failed { kind: DocumentKind, message: String },
}

impl ExtractError {
    pub(crate) fn failed(kind: DocumentKind, message: impl fmt::Display) -> Self {
        Self::Failed {
            kind,
            message: message.to_string(),
        }
    }
}

/// Extract plain text from an uploaded document.
///
/// Unsupported MIME types are rejected before any parsing happens. Parsing
/// itself is synchronous and CPU bound, so it runs on the blocking pool.
pub async fn extract(
    bytes: Vec<u8>,
    mime_type: &str,
    file_name: &str,
) -> Result<String, ExtractError> {
    let kind = DocumentKind::from_mime(mime_type)
        .ok_or_else(|| ExtractError::UnsupportedFormat(mime_type.to_string()))?;

    tracing::debug!(%kind, file_name, size = bytes.len(), "Extracting document text");

    let scratch_dir = std::env::temp_dir();
    let text = tokio::task::spawn_blocking(move || extract_blocking(kind, &bytes, &scratch_dir))
        .await
        .map_err(|e| ExtractError::failed(kind, format!("extraction task failed: {e}")))??;

    tracing::info!(%kind, file_name, chars = text.chars().count(), "Extracted document text");
    Ok(text)
}

/// Synchronous dispatch; `scratch_dir` hosts the temporary PPTX copy.
fn extract_blocking(
    kind: DocumentKind,
    bytes: &[u8],
    scratch_dir: &Path,
) -> Result<String, ExtractError> {
    match kind {
        DocumentKind::Pdf => pdf::extract_text(bytes),
        DocumentKind::Docx => docx::extract_text(bytes),
        DocumentKind::Pptx => pptx::extract_text(bytes, scratch_dir),
    }
}
