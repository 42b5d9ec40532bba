pub mod autofill;
pub mod extract;
pub mod pdf_text;
pub mod pipeline;
pub mod recognizer;
pub mod types;

pub use autofill::{ManualEntry, ReceiptAutofill};
pub use extract::{extract_receipt, Extractor};
pub use pdf_text::pdf_text;
pub use pipeline::{DocumentKind, DocumentPipeline, PipelineError};
pub use recognizer::{MockRecognizer, NoOcr, OcrBackend, SourceError};
pub use types::{ReceiptExtraction, ReceiptItem, DEFAULT_TRUST_THRESHOLD, UNKNOWN_MERCHANT};
