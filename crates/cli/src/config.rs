//! On-disk configuration for the `ledgerscan` binary.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use ledgerscan_core::{CategoryClassifier, CategoryRule, ClassifierError};
use ledgerscan_ocr::{ReceiptAutofill, DEFAULT_TRUST_THRESHOLD};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub logging: LoggingConfig,
    pub receipt: ReceiptConfig,
    pub ocr: OcrConfig,
    pub categories: CategoriesConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive, overridden by `RUST_LOG` and `-v`.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { filter: "warn".to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReceiptConfig {
    pub trust_threshold: f64,
    pub amount_tolerance: Decimal,
}

impl Default for ReceiptConfig {
    fn default() -> Self {
        Self {
            trust_threshold: DEFAULT_TRUST_THRESHOLD,
            amount_tolerance: Decimal::ONE,
        }
    }
}

/// Only read when the binary is built with the `tesseract` feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    pub data_path: Option<String>,
    pub lang: String,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self { data_path: None, lang: "eng".to_string() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoriesConfig {
    /// Replaces the built-in table when non-empty.
    pub rules: Vec<CategoryRule>,
}

impl Config {
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "ledgerscan", "ledgerscan")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.classifier()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_toml()?)
            .with_context(|| format!("writing config {}", path.display()))
    }

    pub fn classifier(&self) -> Result<CategoryClassifier, ClassifierError> {
        if self.categories.rules.is_empty() {
            return Ok(CategoryClassifier::default());
        }
        if self.categories.rules.iter().any(|r| r.label.trim().is_empty()) {
            return Err(ClassifierError::EmptyLabel);
        }
        Ok(CategoryClassifier::new(self.categories.rules.clone()))
    }

    pub fn autofill(&self) -> ReceiptAutofill {
        ReceiptAutofill {
            trust_threshold: self.receipt.trust_threshold,
            amount_tolerance: self.receipt.amount_tolerance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    #[test]
    fn empty_file_is_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.logging.filter, "warn");
        assert_eq!(config.receipt.trust_threshold, 0.7);
        assert_eq!(config.receipt.amount_tolerance, Decimal::ONE);
        assert_eq!(config.classifier().unwrap(), CategoryClassifier::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = Config::from_toml(
            r#"
            [receipt]
            amount_tolerance = "0.25"
            "#,
        )
        .unwrap();
        assert_eq!(config.receipt.trust_threshold, 0.7);
        assert_eq!(config.autofill().amount_tolerance, Decimal::from_str("0.25").unwrap());
        assert_eq!(config.ocr.lang, "eng");
    }

    #[test]
    fn category_rules_replace_builtin_table() {
        let config = Config::from_toml(
            r#"
            [[categories.rules]]
            label = "Groceries"
            keywords = ["grocery", "market"]
            "#,
        )
        .unwrap();
        let classifier = config.classifier().unwrap();
        assert_eq!(classifier.classify("Grocery Store"), "Groceries");
        assert_eq!(classifier.classify("Pizza night"), "Other");
    }

    #[test]
    fn empty_rule_label_is_rejected() {
        let err = Config::from_toml(
            r#"
            [[categories.rules]]
            label = " "
            keywords = ["x"]
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("empty label"));
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn saved_config_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE);
        let mut config = Config::default();
        config.logging.filter = "ledgerscan_import=debug".to_string();
        config.categories.rules.push(CategoryRule::new("Pets", &["vet", "petco"]));
        config.save(&path).unwrap();

        assert_eq!(Config::load(&path).unwrap(), config);
    }
}
