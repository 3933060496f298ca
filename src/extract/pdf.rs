use super::{DocumentKind, ExtractError};

/// Concatenated text of every page.
pub fn extract_text(bytes: &[u8]) -> Result<String, ExtractError> {
    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| ExtractError::failed(DocumentKind::Pdf, e))?;
    // pdf-extract separates pages with form feeds
    Ok(text.replace('\x0c', "\n"))
}
