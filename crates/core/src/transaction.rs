use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    /// Sign convention shared by every statement layout: negative amounts are
    /// money going out, everything else (zero included) is money coming in.
    pub fn from_signed(amount: Decimal) -> Self {
        if amount.is_sign_negative() && !amount.is_zero() {
            TransactionType::Expense
        } else {
            TransactionType::Income
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionType::Income => write!(f, "income"),
            TransactionType::Expense => write!(f, "expense"),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown transaction type: '{0}'")]
pub struct TransactionTypeError(pub String);

impl std::str::FromStr for TransactionType {
    type Err = TransactionTypeError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(TransactionTypeError(other.to_string())),
        }
    }
}

/// Where a draft came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionSource {
    Receipt,
    PdfImport,
}

impl fmt::Display for TransactionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionSource::Receipt => write!(f, "receipt"),
            TransactionSource::PdfImport => write!(f, "pdf_import"),
        }
    }
}

/// A transaction recovered from document text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDraft {
    pub date: NaiveDate,
    pub description: String,
    /// Always a magnitude; the sign has already been folded into `kind`.
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category: String,
    pub source: TransactionSource,
    /// 1-based position in the tokenized line sequence (strict matcher only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_number: Option<usize>,
}

impl TransactionDraft {
    /// Build a draft from a signed amount, deriving the type from the sign.
    pub fn from_signed(
        date: NaiveDate,
        description: impl Into<String>,
        signed_amount: Decimal,
        category: impl Into<String>,
        source: TransactionSource,
    ) -> Self {
        TransactionDraft {
            date,
            description: description.into(),
            amount: signed_amount.abs(),
            kind: TransactionType::from_signed(signed_amount),
            category: category.into(),
            source,
            line_number: None,
        }
    }

    pub fn with_line_number(mut self, line_number: usize) -> Self {
        self.line_number = Some(line_number);
        self
    }
}

/// Result of the "parse transaction history" entry point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementParse {
    pub transactions: Vec<TransactionDraft>,
    pub total_found: usize,
    pub confidence: f64,
}

impl StatementParse {
    pub fn new(transactions: Vec<TransactionDraft>, confidence: f64) -> Self {
        StatementParse {
            total_found: transactions.len(),
            transactions,
            confidence: confidence.clamp(0.0, 1.0),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}
