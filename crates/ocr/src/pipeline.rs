use std::path::Path;

use ledgerscan_core::{CategoryClassifier, StatementParse};
use thiserror::Error;

use crate::extract::Extractor;
use crate::pdf_text::pdf_text;
use crate::recognizer::{OcrBackend, SourceError};
use crate::types::ReceiptExtraction;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Source unavailable: {0}")]
    SourceUnavailable(#[from] SourceError),
}

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "tif", "tiff", "webp"];

/// How a document's text is obtained, decided by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Text,
    Pdf,
    Image,
}

impl DocumentKind {
    pub fn from_extension(ext: &str) -> Result<Self, SourceError> {
        let ext = ext.to_lowercase();
        match ext.as_str() {
            "txt" | "text" => Ok(DocumentKind::Text),
            "pdf" => Ok(DocumentKind::Pdf),
            e if IMAGE_EXTENSIONS.contains(&e) => Ok(DocumentKind::Image),
            _ => Err(SourceError::UnsupportedFormat(ext)),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, SourceError> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
        Self::from_extension(ext)
    }
}

/// Reads a document, obtains its text from the file, the PDF text layer or OCR,
/// then runs the matching extractor.
pub struct DocumentPipeline<R: OcrBackend> {
    recognizer: R,
}

impl<R: OcrBackend> DocumentPipeline<R> {
    pub fn new(recognizer: R) -> Self {
        Self { recognizer }
    }

    /// Read a document from disk and return its raw text.
    pub async fn read_text(&self, path: &Path) -> Result<String, PipelineError> {
        tracing::info!("Reading document: {}", path.display());
        let result = self.load_text(path).await;
        if let Err(e) = &result {
            tracing::warn!("Document source failed for {}: {e}", path.display());
        }
        result
    }

    async fn load_text(&self, path: &Path) -> Result<String, PipelineError> {
        let kind = DocumentKind::from_path(path)?;
        let bytes = tokio::fs::read(path).await.map_err(SourceError::from)?;
        self.text_from_bytes(&bytes, kind)
    }

    /// Obtain text from in-memory document bytes.
    pub fn text_from_bytes(&self, data: &[u8], kind: DocumentKind) -> Result<String, PipelineError> {
        let text = match kind {
            DocumentKind::Text => String::from_utf8(data.to_vec()).map_err(|e| {
                SourceError::Read(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
            })?,
            DocumentKind::Pdf => pdf_text(data)?,
            DocumentKind::Image => self.recognizer.recognize(data)?,
        };
        Ok(text)
    }

    pub async fn process_receipt(&self, path: &Path) -> Result<ReceiptExtraction, PipelineError> {
        let text = self.read_text(path).await?;
        Ok(Extractor::extract(&text))
    }

    pub async fn process_statement(
        &self,
        path: &Path,
        classifier: &CategoryClassifier,
    ) -> Result<StatementParse, PipelineError> {
        let text = self.read_text(path).await?;
        Ok(ledgerscan_import::parse_transaction_history_with(&text, classifier))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
