use std::str::FromStr;
use std::sync::OnceLock;

use chrono::NaiveDate;
use ledgerscan_core::{receipt_confidence, ReceiptSignals};
use ledgerscan_import::tokenize_lines;
use regex::Regex;
use rust_decimal::Decimal;

use crate::types::{ReceiptExtraction, ReceiptItem, UNKNOWN_MERCHANT};

// ── Compiled regex cache ─────────────────────────────────────────────────────

macro_rules! re {
    ($name:ident, $pat:expr) => {
        fn $name() -> &'static Regex {
            static R: OnceLock<Regex> = OnceLock::new();
            R.get_or_init(|| Regex::new($pat).expect("invalid regex"))
        }
    };
}

re!(re_price_like, r"\$?\d+\.?\d*");
re!(re_date_like, r"\d{1,2}[/-]\d{1,2}[/-]\d{2,4}");

re!(re_total_label, r"(?i)total[:\s]*\$?(\d+\.?\d*)");
re!(re_amount_label, r"(?i)amount[:\s]*\$?(\d+\.?\d*)");
re!(re_currency, r"\$(\d+\.\d{2})");

re!(re_date_slash, r"(\d{1,2})/(\d{1,2})/(\d{2,4})");
re!(re_date_dash, r"(\d{1,2})-(\d{1,2})-(\d{2,4})");
re!(re_date_iso, r"(\d{4})-(\d{1,2})-(\d{1,2})");

re!(re_item, r"(.+?)\s+\$?(\d+\.?\d*)");

/// Only the top of the receipt is searched for the merchant name.
const MERCHANT_SCAN_LINES: usize = 3;
const MIN_MERCHANT_LEN: usize = 3;
const MIN_ITEM_NAME_LEN: usize = 2;

// ── Public extraction API ─────────────────────────────────────────────────────

pub struct Extractor;

impl Extractor {
    /// Extract structured fields from raw receipt text, defaulting the date to today.
    pub fn extract(text: &str) -> ReceiptExtraction {
        Self::extract_at(text, chrono::Local::now().date_naive())
    }

    /// Same as [`Extractor::extract`] with an explicit fallback date.
    pub fn extract_at(text: &str, today: NaiveDate) -> ReceiptExtraction {
        let lines = tokenize_lines(text);

        let merchant = Self::extract_merchant(&lines);
        let total = Self::extract_total(text);
        let date = Self::extract_date(text);
        let items = Self::extract_items(&lines);

        let confidence = receipt_confidence(ReceiptSignals {
            merchant: merchant.is_some(),
            total: total > Decimal::ZERO,
            date: date.is_some(),
            items: !items.is_empty(),
        });

        ReceiptExtraction {
            merchant: merchant.unwrap_or(UNKNOWN_MERCHANT).to_string(),
            total,
            date: date.unwrap_or(today),
            date_detected: date.is_some(),
            items,
            confidence,
            raw_text: text.to_string(),
        }
    }

    // ── Merchant ──────────────────────────────────────────────────────────────

    fn extract_merchant<'a>(lines: &[&'a str]) -> Option<&'a str> {
        lines
            .iter()
            .take(MERCHANT_SCAN_LINES)
            .find(|l| {
                l.chars().count() > MIN_MERCHANT_LEN
                    && !re_price_like().is_match(l)
                    && !re_date_like().is_match(l)
            })
            .copied()
    }

    // ── Total ─────────────────────────────────────────────────────────────────

    fn extract_total(text: &str) -> Decimal {
        // Labeled amounts first, first occurrence only.
        let labeled = [re_total_label(), re_amount_label()].into_iter().find_map(|re| {
            let c = re.captures(text)?;
            parse_price(c.get(1)?.as_str()).filter(|v| *v > Decimal::ZERO)
        });

        labeled
            .or_else(|| {
                // The grand total is normally the largest dollar figure.
                re_currency()
                    .captures_iter(text)
                    .filter_map(|c| parse_price(c.get(1)?.as_str()))
                    .max()
                    .filter(|v| *v > Decimal::ZERO)
            })
            .unwrap_or(Decimal::ZERO)
    }

    // ── Date ─────────────────────────────────────────────────────────────────

    fn extract_date(text: &str) -> Option<NaiveDate> {
        try_month_first(re_date_slash(), text)
            .or_else(|| try_month_first(re_date_dash(), text))
            .or_else(|| try_date_iso(text))
    }

    // ── Line items ────────────────────────────────────────────────────────────

    fn extract_items(lines: &[&str]) -> Vec<ReceiptItem> {
        lines
            .iter()
            .filter(|l| !l.to_lowercase().contains("total"))
            .filter_map(|line| {
                let c = re_item().captures(line)?;
                let name = c.get(1)?.as_str().trim();
                let price = parse_price(c.get(2)?.as_str())?;
                (name.chars().count() > MIN_ITEM_NAME_LEN && price > Decimal::ZERO)
                    .then(|| ReceiptItem::new(name, price))
            })
            .collect()
    }
}

/// Free-function form of [`Extractor::extract`].
pub fn extract_receipt(text: &str) -> ReceiptExtraction {
    Extractor::extract(text)
}

// ── Date helpers ──────────────────────────────────────────────────────────────

/// `M/D/Y` or `M-D-Y`; only the first occurrence in the text is considered.
fn try_month_first(re: &Regex, text: &str) -> Option<NaiveDate> {
    let c = re.captures(text)?;
    let month: u32 = c.get(1)?.as_str().parse().ok()?;
    let day: u32 = c.get(2)?.as_str().parse().ok()?;
    let year = expand_year(c.get(3)?.as_str())?;
    NaiveDate::from_ymd_opt(year, month, day)
}

fn try_date_iso(text: &str) -> Option<NaiveDate> {
    let c = re_date_iso().captures(text)?;
    let y: i32 = c.get(1)?.as_str().parse().ok()?;
    let m: u32 = c.get(2)?.as_str().parse().ok()?;
    let d: u32 = c.get(3)?.as_str().parse().ok()?;
    NaiveDate::from_ymd_opt(y, m, d)
}

/// Two-digit years: 00–49 → 2000s, 50–99 → 1900s.
fn expand_year(s: &str) -> Option<i32> {
    let y: i32 = s.parse().ok()?;
    Some(match (s.len(), y) {
        (2, 0..=49) => 2000 + y,
        (2, _) => 1900 + y,
        _ => y,
    })
}

// ── Amount parsing ────────────────────────────────────────────────────────────

fn parse_price(s: &str) -> Option<Decimal> {
    Decimal::from_str(s.trim_end_matches('.')).ok()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
