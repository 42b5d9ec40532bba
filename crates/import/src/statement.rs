//! Strict single-pattern matcher for transaction history dumps.
//!
//! Each line must be exactly `DD-MM-YYYY<description><amount><income|expense>`
//! with no separators between the fields. Anything else is ignored.

use std::str::FromStr;

use chrono::NaiveDate;
use ledgerscan_core::{
    statement_confidence, CategoryClassifier, StatementParse, TransactionDraft, TransactionSource,
    TransactionType,
};
use rust_decimal::Decimal;

use crate::table;
use crate::util::re;

re!(re_statement_line,
    r"^(\d{2})-(\d{2})-(\d{4})([A-Za-z\s]+?)(-?\d+(?:\.\d+)?)(income|expense)$");

/// Match one tokenized line. `line_number` is 1-based.
fn match_line(
    line: &str,
    line_number: usize,
    classifier: &CategoryClassifier,
) -> Option<TransactionDraft> {
    let c = re_statement_line().captures(line)?;

    let day: u32 = c.get(1)?.as_str().parse().ok()?;
    let month: u32 = c.get(2)?.as_str().parse().ok()?;
    let year: i32 = c.get(3)?.as_str().parse().ok()?;
    let date = NaiveDate::from_ymd_opt(year, month, day)?;

    let description = c.get(4)?.as_str().trim().to_string();
    let amount = Decimal::from_str(c.get(5)?.as_str()).ok()?.abs();
    let kind = TransactionType::from_str(c.get(6)?.as_str()).ok()?;
    let category = classifier.classify(&description).to_string();

    Some(TransactionDraft {
        date,
        description,
        amount,
        kind,
        category,
        source: TransactionSource::PdfImport,
        line_number: Some(line_number),
    })
}

/// Every line that fits the strict pattern, in document order.
pub fn strict_matches(lines: &[&str], classifier: &CategoryClassifier) -> Vec<TransactionDraft> {
    lines
        .iter()
        .enumerate()
        .filter_map(|(idx, line)| match_line(line, idx + 1, classifier))
        .collect()
}

/// Strict matcher with tabular fallback: when no line matches, the tabular
/// parser's result is returned as-is.
pub fn match_lines(lines: &[&str], classifier: &CategoryClassifier) -> StatementParse {
    let transactions = strict_matches(lines, classifier);

    if transactions.is_empty() {
        tracing::debug!(
            lines = lines.len(),
            "no strict statement lines matched, falling back to tabular parser"
        );
        return table::parse_table(lines, classifier);
    }

    let confidence = statement_confidence(&transactions, lines.len());
    StatementParse::new(transactions, confidence)
}
