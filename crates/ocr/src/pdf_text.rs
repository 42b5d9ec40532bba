//! Text-layer reader for PDFs. Scanned PDFs without a text layer yield
//! little or no text; rasterising them for OCR is out of scope.

use crate::recognizer::SourceError;

/// Extract the embedded text layer of a PDF document.
#[cfg(feature = "pdf")]
pub fn pdf_text(bytes: &[u8]) -> Result<String, SourceError> {
    pdf_extract::extract_text_from_mem(bytes).map_err(|e| SourceError::Pdf(e.to_string()))
}

#[cfg(not(feature = "pdf"))]
pub fn pdf_text(_bytes: &[u8]) -> Result<String, SourceError> {
    Err(SourceError::NotAvailable("PDF text extraction", "pdf"))
}
