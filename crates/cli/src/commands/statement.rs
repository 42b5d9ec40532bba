//! Statement command: transaction history document to drafts.

use clap::Args;
use ledgerscan_core::StatementParse;
use ledgerscan_import::{import_statement_with, parse_transaction_history_with};

use crate::config::Config;

#[derive(Args)]
pub struct StatementArgs {
    /// Text, PDF or image file; `-` reads text from stdin
    pub input: String,

    /// Fail when no transactions are found instead of printing an empty result
    #[arg(long)]
    pub require_transactions: bool,
}

pub async fn run(args: StatementArgs, config: &Config) -> anyhow::Result<()> {
    let pipeline = super::pipeline(config);
    let text = super::read_input(&pipeline, &args.input).await?;
    let result = parse(&text, args.require_transactions, config)?;
    tracing::info!(
        found = result.total_found,
        confidence = result.confidence,
        "statement parsed"
    );
    super::print_json(&result)
}

fn parse(text: &str, require: bool, config: &Config) -> anyhow::Result<StatementParse> {
    let classifier = config.classifier()?;
    if require {
        Ok(import_statement_with(text, &classifier)?)
    } else {
        Ok(parse_transaction_history_with(text, &classifier))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_rejects_empty_documents() {
        let config = Config::default();
        let err = parse("nothing here", true, &config).unwrap_err();
        assert!(err.to_string().contains("No transactions found"));

        let result = parse("nothing here", false, &config).unwrap();
        assert!(result.is_empty());
        assert_eq!(result.confidence, 0.3);
    }

    #[test]
    fn configured_rules_are_used() {
        let config = Config::from_toml(
            r#"
            [[categories.rules]]
            label = "Groceries"
            keywords = ["grocery"]
            "#,
        )
        .unwrap();
        let result = parse("15-01-2024Grocery Store85.50expense", true, &config).unwrap();
        assert_eq!(result.transactions[0].category, "Groceries");
    }
}
