//! Heuristic quality scores for each extraction strategy. Every score is in `[0, 1]`.

use rust_decimal::Decimal;

use crate::transaction::TransactionDraft;

/// Tabular parse that located a header row.
pub const TABLE_HEADER_FOUND: f64 = 0.8;
/// Tabular parse without a header row in the scan window.
pub const TABLE_NO_HEADER: f64 = 0.3;

const QUALITY_BONUS: f64 = 0.1;
const MIN_DESCRIPTION_LEN: usize = 3;

/// Score for the strict line matcher: coverage of matched lines (doubled, capped)
/// plus a bonus for each data-quality check every record passes.
pub fn statement_confidence(transactions: &[TransactionDraft], total_lines: usize) -> f64 {
    if transactions.is_empty() || total_lines == 0 {
        return 0.0;
    }

    let ratio = transactions.len() as f64 / total_lines as f64;
    let mut confidence = (ratio * 2.0).min(1.0);

    // Drafts only exist with a parsed date, so the date check always passes.
    confidence += QUALITY_BONUS;
    if transactions.iter().all(|t| t.amount > Decimal::ZERO) {
        confidence += QUALITY_BONUS;
    }
    if transactions
        .iter()
        .all(|t| t.description.chars().count() > MIN_DESCRIPTION_LEN)
    {
        confidence += QUALITY_BONUS;
    }

    confidence.clamp(0.0, 1.0)
}

/// Score for the tabular fallback. Row count and row quality do not matter.
pub fn table_confidence(header_found: bool) -> f64 {
    if header_found {
        TABLE_HEADER_FOUND
    } else {
        TABLE_NO_HEADER
    }
}

/// Which receipt fields the extractor managed to detect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReceiptSignals {
    pub merchant: bool,
    pub total: bool,
    pub date: bool,
    pub items: bool,
}

/// Base 0.5, +0.2 merchant, +0.2 total, +0.1 date, +0.1 items, capped at 1.0.
pub fn receipt_confidence(signals: ReceiptSignals) -> f64 {
    // Summed in tenths so results compare equal to their decimal literals.
    let tenths = 5
        + 2 * u8::from(signals.merchant)
        + 2 * u8::from(signals.total)
        + u8::from(signals.date)
        + u8::from(signals.items);
    (f64::from(tenths) / 10.0).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::{TransactionDraft, TransactionSource};
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn draft(desc: &str, amount: &str) -> TransactionDraft {
        TransactionDraft::from_signed(
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            desc,
            Decimal::from_str(amount).unwrap(),
            "Other",
            TransactionSource::PdfImport,
        )
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn statement_empty_is_zero() {
        assert_eq!(statement_confidence(&[], 10), 0.0);
        assert_eq!(statement_confidence(&[draft("Rent", "1")], 0), 0.0);
    }

    #[test]
    fn statement_low_coverage_with_all_bonuses() {
        // 1 of 10 lines → 0.2, plus three bonuses.
        let c = statement_confidence(&[draft("Grocery Store", "85.50")], 10);
        assert!(approx(c, 0.5), "confidence was {c}");
    }

    #[test]
    fn statement_short_description_loses_bonus() {
        let c = statement_confidence(&[draft("Gas", "10")], 10);
        assert!(approx(c, 0.4), "confidence was {c}");
    }

    #[test]
    fn statement_zero_amount_loses_bonus() {
        let c = statement_confidence(&[draft("Refund", "0")], 10);
        assert!(approx(c, 0.4), "confidence was {c}");
    }

    #[test]
    fn statement_is_capped() {
        let txs = vec![draft("Salary", "100"), draft("Rental", "20")];
        assert_eq!(statement_confidence(&txs, 2), 1.0);
    }

    #[test]
    fn table_policy() {
        assert_eq!(table_confidence(true), 0.8);
        assert_eq!(table_confidence(false), 0.3);
    }

    #[test]
    fn receipt_base_and_cap() {
        assert_eq!(receipt_confidence(ReceiptSignals::default()), 0.5);
        let all = ReceiptSignals { merchant: true, total: true, date: true, items: true };
        assert_eq!(receipt_confidence(all), 1.0);
        let partial = ReceiptSignals { total: true, date: true, ..Default::default() };
        assert_eq!(receipt_confidence(partial), 0.8);
        let merchant_only = ReceiptSignals { merchant: true, ..Default::default() };
        assert_eq!(receipt_confidence(merchant_only), 0.7);
    }
}
