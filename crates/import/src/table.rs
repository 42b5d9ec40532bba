//! Header-driven column parser, used when the strict line matcher finds nothing.

use chrono::NaiveDate;
use ledgerscan_core::{
    table_confidence, CategoryClassifier, StatementParse, TransactionDraft, TransactionSource,
};
use rust_decimal::Decimal;

use crate::util::{parse_leading_decimal, re};

/// Only this many leading lines are searched for a header row.
pub const HEADER_SCAN_LINES: usize = 10;
/// Data rows with fewer cells are skipped.
pub const MIN_ROW_COLUMNS: usize = 3;

const UNKNOWN_DESCRIPTION: &str = "Unknown";

re!(re_column_split, r"\s{2,}|\t");
re!(re_short_year, r"^\d{1,2}[/-]\d{1,2}[/-]\d{2}$");
re!(re_date_junk, r"[^\d/\-]");
re!(re_amount_junk, r"[^\d.\-+]");

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMapping {
    pub date_column: Option<usize>,
    pub description_column: Option<usize>,
    pub amount_column: Option<usize>,
}

impl ColumnMapping {
    /// Assign roles from header cells. A later cell claiming the same role wins.
    pub fn from_header(cells: &[&str]) -> Self {
        let mut mapping = ColumnMapping::default();
        for (idx, cell) in cells.iter().enumerate() {
            let lower = cell.to_lowercase();
            if lower.contains("date") {
                mapping.date_column = Some(idx);
            }
            if lower.contains("description") || lower.contains("memo") {
                mapping.description_column = Some(idx);
            }
            if lower.contains("amount") || lower.contains("total") {
                mapping.amount_column = Some(idx);
            }
        }
        mapping
    }
}

pub fn split_columns(line: &str) -> Vec<&str> {
    re_column_split().split(line).collect()
}

fn is_header(line: &str) -> bool {
    let lower = line.to_lowercase();
    lower.contains("date") && lower.contains("amount")
}

/// Locate the header among the first [`HEADER_SCAN_LINES`] lines.
pub fn find_header(lines: &[&str]) -> Option<(usize, ColumnMapping)> {
    lines
        .iter()
        .take(HEADER_SCAN_LINES)
        .position(|l| is_header(l))
        .map(|idx| (idx, ColumnMapping::from_header(&split_columns(lines[idx]))))
}

/// Parse the lines below the header. Rows that fail date or amount parsing are dropped.
pub fn parse_table(lines: &[&str], classifier: &CategoryClassifier) -> StatementParse {
    let Some((header_idx, mapping)) = find_header(lines) else {
        return StatementParse::new(Vec::new(), table_confidence(false));
    };

    let transactions = lines[header_idx + 1..]
        .iter()
        .filter_map(|line| parse_row(&split_columns(line), &mapping, classifier))
        .collect();

    StatementParse::new(transactions, table_confidence(true))
}

fn cell<'a>(cells: &[&'a str], column: Option<usize>) -> Option<&'a str> {
    column
        .and_then(|c| cells.get(c))
        .copied()
        .filter(|s| !s.is_empty())
}

fn parse_row(
    cells: &[&str],
    mapping: &ColumnMapping,
    classifier: &CategoryClassifier,
) -> Option<TransactionDraft> {
    if cells.len() < MIN_ROW_COLUMNS {
        return None;
    }

    let date_cell = cell(cells, mapping.date_column).unwrap_or(cells[0]);
    let amount_cell = cell(cells, mapping.amount_column).unwrap_or(cells[cells.len() - 1]);
    let description = cell(cells, mapping.description_column)
        .or_else(|| cell(cells, Some(1)))
        .unwrap_or(UNKNOWN_DESCRIPTION);

    let date = parse_date(date_cell)?;
    let amount = parse_amount(amount_cell)?;
    let category = classifier.classify(description).to_string();

    Some(TransactionDraft::from_signed(
        date,
        description.trim(),
        amount,
        category,
        TransactionSource::PdfImport,
    ))
}

/// Strip everything but digits, `/` and `-`, then try the common layouts.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let clean = re_date_junk().replace_all(s, "");
    if clean.is_empty() {
        return None;
    }

    // %Y would happily read "24" as year 24.
    let formats: &[&str] = if re_short_year().is_match(&clean) {
        &["%m/%d/%y", "%m-%d-%y"]
    } else {
        &["%m/%d/%Y", "%Y-%m-%d", "%Y/%m/%d", "%m-%d-%Y"]
    };

    formats
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(&clean, fmt).ok())
}

/// Strip everything but digits, `.`, `-` and `+`, then read the leading number.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let clean = re_amount_junk().replace_all(s, "");
    parse_leading_decimal(&clean)
}
