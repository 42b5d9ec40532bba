pub mod statement;
pub mod table;
pub(crate) mod util;

use ledgerscan_core::{CategoryClassifier, StatementParse};
use thiserror::Error;

pub use statement::{match_lines, strict_matches};
pub use table::{parse_table, ColumnMapping};
pub use util::tokenize_lines;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    #[error("No transactions found in document")]
    NoTransactionsFound,
}

/// Turn a transaction-history document into drafts, using the built-in categories.
pub fn parse_transaction_history(text: &str) -> StatementParse {
    parse_transaction_history_with(text, &CategoryClassifier::default())
}

pub fn parse_transaction_history_with(
    text: &str,
    classifier: &CategoryClassifier,
) -> StatementParse {
    let lines = tokenize_lines(text);
    let result = statement::match_lines(&lines, classifier);
    tracing::debug!(
        lines = lines.len(),
        found = result.total_found,
        confidence = result.confidence,
        "parsed transaction history"
    );
    result
}

pub mod import {
    use super::*;

    /// Bulk-import gate: a document that yields no transactions is rejected
    /// as a whole rather than imported empty.
    pub fn import_statement(text: &str) -> Result<StatementParse, ImportError> {
        import_statement_with(text, &CategoryClassifier::default())
    }

    pub fn import_statement_with(
        text: &str,
        classifier: &CategoryClassifier,
    ) -> Result<StatementParse, ImportError> {
        let result = parse_transaction_history_with(text, classifier);
        if result.is_empty() {
            return Err(ImportError::NoTransactionsFound);
        }
        Ok(result)
    }
}

pub use import::{import_statement, import_statement_with};
