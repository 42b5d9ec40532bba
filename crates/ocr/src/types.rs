use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Merchant value used when no header line qualifies.
pub const UNKNOWN_MERCHANT: &str = "Unknown Merchant";

/// Confidence a receipt must exceed before its fields may override user input.
pub const DEFAULT_TRUST_THRESHOLD: f64 = 0.7;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptItem {
    pub name: String,
    pub price: Decimal,
    /// Multi-quantity lines are not detected; always 1.
    pub quantity: u32,
}

impl ReceiptItem {
    pub fn new(name: impl Into<String>, price: Decimal) -> Self {
        Self { name: name.into(), price, quantity: 1 }
    }
}

/// Structured fields pulled out of a single receipt's text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptExtraction {
    pub merchant: String,
    /// Zero when no total could be found.
    pub total: Decimal,
    /// Extraction day when `date_detected` is false.
    pub date: NaiveDate,
    pub date_detected: bool,
    pub items: Vec<ReceiptItem>,
    pub confidence: f64,
    /// The input text, verbatim.
    pub raw_text: String,
}

impl ReceiptExtraction {
    pub fn merchant_detected(&self) -> bool {
        self.merchant != UNKNOWN_MERCHANT
    }

    /// Whether fields may be trusted over what the user typed.
    pub fn is_trusted(&self, threshold: f64) -> bool {
        self.confidence > threshold
    }

    pub fn needs_review(&self) -> bool {
        !self.is_trusted(DEFAULT_TRUST_THRESHOLD)
    }
}
