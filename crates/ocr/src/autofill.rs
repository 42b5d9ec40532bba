use chrono::NaiveDate;
use ledgerscan_core::{TransactionDraft, TransactionSource, TransactionType};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{ReceiptExtraction, DEFAULT_TRUST_THRESHOLD};

/// What the user typed alongside an uploaded receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualEntry {
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub amount: Decimal,
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

/// Decides which receipt fields may replace user input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReceiptAutofill {
    /// Receipt confidence must be strictly above this.
    pub trust_threshold: f64,
    /// The receipt total replaces the typed amount only when closer than this.
    pub amount_tolerance: Decimal,
}

impl Default for ReceiptAutofill {
    fn default() -> Self {
        Self {
            trust_threshold: DEFAULT_TRUST_THRESHOLD,
            amount_tolerance: Decimal::ONE,
        }
    }
}

impl ReceiptAutofill {
    pub fn apply(&self, entry: ManualEntry, receipt: &ReceiptExtraction) -> TransactionDraft {
        self.apply_at(entry, receipt, chrono::Local::now().date_naive())
    }

    pub fn apply_at(
        &self,
        entry: ManualEntry,
        receipt: &ReceiptExtraction,
        today: NaiveDate,
    ) -> TransactionDraft {
        let trusted = receipt.is_trusted(self.trust_threshold);

        let description = entry
            .description
            .filter(|d| !d.trim().is_empty())
            .or_else(|| (trusted && receipt.merchant_detected()).then(|| receipt.merchant.clone()))
            .unwrap_or_default();

        let amount = if trusted
            && receipt.total > Decimal::ZERO
            && (receipt.total - entry.amount).abs() < self.amount_tolerance
        {
            receipt.total
        } else {
            entry.amount
        };

        let date = entry
            .date
            .or_else(|| (trusted && receipt.date_detected).then_some(receipt.date))
            .unwrap_or(today);

        TransactionDraft {
            date,
            description: description.trim().to_string(),
            amount,
            kind: entry.kind,
            category: entry.category,
            source: TransactionSource::Receipt,
            line_number: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::Extractor;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn entry(amount: &str) -> ManualEntry {
        ManualEntry {
            kind: TransactionType::Expense,
            amount: dec(amount),
            category: "Food & Dining".to_string(),
            description: None,
            date: None,
        }
    }

    fn today() -> NaiveDate {
        day(2030, 6, 1)
    }

    fn receipt(text: &str) -> ReceiptExtraction {
        Extractor::extract_at(text, today())
    }

    #[test]
    fn trusted_receipt_fills_blank_fields() {
        let r = receipt("CORNER CAFE\n01/15/2024\nLatte $4.50\nTotal: $4.50");
        assert!(r.confidence > 0.7);

        let draft = ReceiptAutofill::default().apply_at(entry("4"), &r, today());
        assert_eq!(draft.description, "CORNER CAFE");
        assert_eq!(draft.amount, dec("4.50"));
        assert_eq!(draft.date, day(2024, 1, 15));
        assert_eq!(draft.source, TransactionSource::Receipt);
        assert_eq!(draft.category, "Food & Dining");
        assert_eq!(draft.kind, TransactionType::Expense);
    }

    #[test]
    fn user_values_win_over_receipt() {
        let r = receipt("CORNER CAFE\n01/15/2024\nLatte $4.50\nTotal: $4.50");
        let manual = ManualEntry {
            description: Some("Team coffee".to_string()),
            date: Some(day(2024, 2, 1)),
            ..entry("4.25")
        };
        let draft = ReceiptAutofill::default().apply_at(manual, &r, today());
        assert_eq!(draft.description, "Team coffee");
        assert_eq!(draft.date, day(2024, 2, 1));
        // Within tolerance, so the receipt total still corrects the typed amount.
        assert_eq!(draft.amount, dec("4.50"));
    }

    #[test]
    fn distant_total_does_not_override_amount() {
        let r = receipt("CORNER CAFE\n01/15/2024\nLatte $4.50\nTotal: $4.50");
        let draft = ReceiptAutofill::default().apply_at(entry("5.50"), &r, today());
        assert_eq!(draft.amount, dec("5.50"));
    }

    #[test]
    fn threshold_is_exclusive() {
        // Total only → exactly 0.7, not trusted.
        let r = receipt("Total: $4.50");
        assert_eq!(r.confidence, 0.7);
        let draft = ReceiptAutofill::default().apply_at(entry("4"), &r, today());
        assert_eq!(draft.amount, dec("4"));
        assert_eq!(draft.description, "");
        assert_eq!(draft.date, today());
    }

    #[test]
    fn sentinel_merchant_never_becomes_description() {
        // Total + date + item → 0.9 with no merchant.
        let r = receipt("01/15/2024\nLatte $4.50\nTotal: $4.50");
        assert!(r.confidence > 0.7);
        assert!(!r.merchant_detected());
        let draft = ReceiptAutofill::default().apply_at(entry("4.50"), &r, today());
        assert_eq!(draft.description, "");
        assert_eq!(draft.date, day(2024, 1, 15));
    }

    #[test]
    fn custom_threshold_and_tolerance() {
        let r = receipt("Total: $4.50");
        let autofill = ReceiptAutofill { trust_threshold: 0.6, amount_tolerance: dec("0.10") };
        assert_eq!(autofill.apply_at(entry("4.45"), &r, today()).amount, dec("4.50"));
        assert_eq!(autofill.apply_at(entry("4.00"), &r, today()).amount, dec("4.00"));
    }

    #[test]
    fn manual_entry_deserializes_wire_names() {
        let json = r#"{"type":"expense","amount":"12.30","category":"Other","date":"2024-01-02"}"#;
        let manual: ManualEntry = serde_json::from_str(json).unwrap();
        assert_eq!(manual.kind, TransactionType::Expense);
        assert_eq!(manual.amount, dec("12.30"));
        assert_eq!(manual.description, None);
        assert_eq!(manual.date, Some(day(2024, 1, 2)));
    }
}
