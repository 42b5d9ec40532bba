use thiserror::Error;

/// Failure of an external text producer (OCR engine, PDF text layer, file read).
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Failed to read document: {0}")]
    Read(#[from] std::io::Error),
    #[error("Image decode error: {0}")]
    ImageDecode(String),
    #[error("OCR engine error: {0}")]
    Engine(String),
    #[error("PDF text extraction failed: {0}")]
    Pdf(String),
    #[error("Unsupported document format: '{0}'")]
    UnsupportedFormat(String),
    #[error("{0} not available, build with the `{1}` feature")]
    NotAvailable(&'static str, &'static str),
}

/// Abstraction over an OCR backend.
/// Implementations accept raw PNG/JPEG image bytes and return the recognized text.
pub trait OcrBackend: Send + Sync {
    fn recognize(&self, image_bytes: &[u8]) -> Result<String, SourceError>;
}

// ── Mock backend (always available, used for tests) ───────────────────────────

/// Returns a pre-set string regardless of the image.
pub struct MockRecognizer {
    pub text: String,
}

impl MockRecognizer {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl OcrBackend for MockRecognizer {
    fn recognize(&self, _image_bytes: &[u8]) -> Result<String, SourceError> {
        Ok(self.text.clone())
    }
}

/// Backend for builds without an OCR engine: every image is a source failure.
pub struct NoOcr;

impl OcrBackend for NoOcr {
    fn recognize(&self, _image_bytes: &[u8]) -> Result<String, SourceError> {
        Err(SourceError::NotAvailable("OCR", "tesseract"))
    }
}

// ── Tesseract backend (optional, gated behind `tesseract` feature) ─────────────

#[cfg(feature = "tesseract")]
pub mod tesseract_backend {
    use super::{OcrBackend, SourceError};
    use leptess::LepTess;

    pub struct TesseractRecognizer {
        data_path: Option<String>,
        lang: String,
    }

    impl TesseractRecognizer {
        pub fn new(data_path: Option<String>, lang: &str) -> Self {
            Self { data_path, lang: lang.to_string() }
        }
    }

    impl OcrBackend for TesseractRecognizer {
        fn recognize(&self, image_bytes: &[u8]) -> Result<String, SourceError> {
            let mut lt = LepTess::new(self.data_path.as_deref(), &self.lang)
                .map_err(|e| SourceError::Engine(e.to_string()))?;
            lt.set_image_from_mem(image_bytes)
                .map_err(|e| SourceError::ImageDecode(e.to_string()))?;
            lt.get_utf8_text().map_err(|e| SourceError::Engine(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_returns_preset_text() {
        let r = MockRecognizer::new("STARBUCKS\n$5.50\nVISA");
        assert_eq!(r.recognize(b"fake image data").unwrap(), "STARBUCKS\n$5.50\nVISA");
    }

    #[test]
    fn mock_ignores_image_content() {
        let r = MockRecognizer::new("hello");
        assert_eq!(r.recognize(b"anything").unwrap(), "hello");
        assert_eq!(r.recognize(b"").unwrap(), "hello");
    }

    #[test]
    fn no_ocr_reports_missing_feature() {
        let err = NoOcr.recognize(b"png").unwrap_err();
        assert!(matches!(err, SourceError::NotAvailable("OCR", "tesseract")));
        assert!(err.to_string().contains("tesseract"));
    }
}
