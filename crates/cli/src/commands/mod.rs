pub mod classify;
pub mod config;
pub mod receipt;
pub mod statement;

use std::io::Read;
use std::path::Path;

use anyhow::Context;
use ledgerscan_ocr::{DocumentPipeline, OcrBackend};

use crate::config::Config;

/// Path argument meaning "read plain text from stdin".
pub const STDIN: &str = "-";

#[cfg(feature = "tesseract")]
fn recognizer(config: &Config) -> impl OcrBackend {
    ledgerscan_ocr::recognizer::tesseract_backend::TesseractRecognizer::new(
        config.ocr.data_path.clone(),
        &config.ocr.lang,
    )
}

#[cfg(not(feature = "tesseract"))]
fn recognizer(_config: &Config) -> impl OcrBackend {
    ledgerscan_ocr::NoOcr
}

pub fn pipeline(config: &Config) -> DocumentPipeline<impl OcrBackend> {
    DocumentPipeline::new(recognizer(config))
}

/// Raw text of `input`: stdin for `-`, otherwise the document at that path.
pub async fn read_input<R: OcrBackend>(
    pipeline: &DocumentPipeline<R>,
    input: &str,
) -> anyhow::Result<String> {
    if input == STDIN {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("reading stdin")?;
        return Ok(text);
    }
    let text = pipeline
        .read_text(Path::new(input))
        .await
        .with_context(|| format!("reading {input}"))?;
    Ok(text)
}

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
