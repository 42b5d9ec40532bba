pub mod category;
pub mod confidence;
pub mod transaction;

pub use category::{classify, CategoryClassifier, CategoryRule, ClassifierError, FALLBACK_CATEGORY};
pub use confidence::{receipt_confidence, statement_confidence, table_confidence, ReceiptSignals};
pub use transaction::{
    StatementParse, TransactionDraft, TransactionSource, TransactionType, TransactionTypeError,
};
