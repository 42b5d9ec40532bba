use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Label returned when no rule matches.
pub const FALLBACK_CATEGORY: &str = "Other";

/// Built-in keyword table. Order is significant: the first label whose
/// keyword list hits wins.
const DEFAULT_RULES: &[(&str, &[&str])] = &[
    (
        "Food & Dining",
        &["restaurant", "food", "cafe", "pizza", "burger", "starbucks", "mcdonald"],
    ),
    ("Shopping", &["amazon", "walmart", "target", "shop", "purchase"]),
    (
        "Transportation",
        &["gas", "fuel", "uber", "lyft", "taxi", "parking", "metro"],
    ),
    (
        "Bills & Utilities",
        &["electric", "water", "internet", "phone", "cable", "utility"],
    ),
    ("Healthcare", &["pharmacy", "doctor", "hospital", "medical", "health"]),
    ("Entertainment", &["movie", "netflix", "spotify", "game", "entertainment"]),
    ("Income", &["salary", "payroll", "deposit", "transfer in", "refund"]),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub label: String,
    pub keywords: Vec<String>,
}

impl CategoryRule {
    pub fn new(label: impl Into<String>, keywords: &[&str]) -> Self {
        CategoryRule {
            label: label.into(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("Failed to parse category rules: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Category rule has an empty label")]
    EmptyLabel,
}

#[derive(Deserialize)]
struct RuleFile {
    #[serde(default)]
    rules: Vec<CategoryRule>,
}

/// Keyword-substring classifier over an ordered rule list.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryClassifier {
    rules: Vec<CategoryRule>,
}

impl Default for CategoryClassifier {
    fn default() -> Self {
        Self::new(
            DEFAULT_RULES
                .iter()
                .map(|(label, keywords)| CategoryRule::new(*label, keywords))
                .collect(),
        )
    }
}

impl CategoryClassifier {
    /// Rules are kept in the order given; keywords are lower-cased once here.
    pub fn new(rules: Vec<CategoryRule>) -> Self {
        let rules = rules
            .into_iter()
            .map(|rule| CategoryRule {
                label: rule.label,
                keywords: rule
                    .keywords
                    .into_iter()
                    .map(|k| k.to_lowercase())
                    .filter(|k| !k.is_empty())
                    .collect(),
            })
            .collect();
        Self { rules }
    }

    /// Parse a `[[rules]]` table array. An empty file yields an empty classifier
    /// that maps everything to [`FALLBACK_CATEGORY`].
    pub fn from_toml(toml_content: &str) -> Result<Self, ClassifierError> {
        let file: RuleFile = toml::from_str(toml_content)?;
        if file.rules.iter().any(|r| r.label.trim().is_empty()) {
            return Err(ClassifierError::EmptyLabel);
        }
        Ok(Self::new(file.rules))
    }

    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    pub fn classify(&self, description: &str) -> &str {
        let text = description.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.keywords.iter().any(|k| text.contains(k.as_str())))
            .map(|rule| rule.label.as_str())
            .unwrap_or(FALLBACK_CATEGORY)
    }
}

/// Classify with the built-in table.
pub fn classify(description: &str) -> String {
    CategoryClassifier::default().classify(description).to_string()
}
