//! Receipt command: extract fields, optionally auto-fill a manual entry.

use chrono::NaiveDate;
use clap::Args;
use ledgerscan_core::{TransactionDraft, TransactionType, FALLBACK_CATEGORY};
use ledgerscan_ocr::{Extractor, ManualEntry, ReceiptExtraction};
use rust_decimal::Decimal;

use crate::config::Config;

#[derive(Args)]
pub struct ReceiptArgs {
    /// Text, PDF or image file; `-` reads text from stdin
    pub input: String,

    /// Amount the user typed; switches output to the auto-filled draft
    #[arg(long)]
    pub amount: Option<Decimal>,

    #[arg(long = "type", default_value = "expense")]
    pub kind: TransactionType,

    #[arg(long, default_value = FALLBACK_CATEGORY)]
    pub category: String,

    #[arg(long)]
    pub description: Option<String>,

    /// Transaction date, YYYY-MM-DD
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

impl ReceiptArgs {
    fn manual_entry(&self) -> Option<ManualEntry> {
        self.amount.map(|amount| ManualEntry {
            kind: self.kind,
            amount,
            category: self.category.clone(),
            description: self.description.clone(),
            date: self.date,
        })
    }
}

pub async fn run(args: ReceiptArgs, config: &Config) -> anyhow::Result<()> {
    let pipeline = super::pipeline(config);
    let text = super::read_input(&pipeline, &args.input).await?;
    let receipt = Extractor::extract(&text);
    tracing::info!(
        merchant = %receipt.merchant,
        total = %receipt.total,
        confidence = receipt.confidence,
        "receipt extracted"
    );
    if receipt.needs_review() {
        tracing::warn!("Low receipt confidence ({:.1}), review before saving", receipt.confidence);
    }

    match autofill(&args, &receipt, config) {
        Some(draft) => super::print_json(&draft),
        None => super::print_json(&receipt),
    }
}

fn autofill(
    args: &ReceiptArgs,
    receipt: &ReceiptExtraction,
    config: &Config,
) -> Option<TransactionDraft> {
    args.manual_entry()
        .map(|entry| config.autofill().apply(entry, receipt))
}
