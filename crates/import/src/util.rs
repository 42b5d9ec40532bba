use std::str::FromStr;

use rust_decimal::Decimal;

/// Declares a function returning a lazily compiled, process-wide `Regex`.
macro_rules! re {
    ($name:ident, $pat:expr) => {
        fn $name() -> &'static regex::Regex {
            static R: std::sync::OnceLock<regex::Regex> = std::sync::OnceLock::new();
            R.get_or_init(|| regex::Regex::new($pat).expect("invalid regex"))
        }
    };
}
pub(crate) use re;

re!(re_leading_number, r"^([+-])?(\d+)?(?:\.(\d+))?");

/// Split raw document text into trimmed, non-empty lines, preserving order.
/// A byte-order mark counts as whitespace.
pub fn tokenize_lines(text: &str) -> Vec<&str> {
    text.lines()
        .map(|l| l.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}'))
        .filter(|l| !l.is_empty())
        .collect()
}

/// Parse the longest leading `[+-]?digits[.digits]` prefix of `s`.
/// Trailing junk is ignored; no leading number at all yields `None`.
pub fn parse_leading_decimal(s: &str) -> Option<Decimal> {
    let caps = re_leading_number().captures(s)?;
    let int = caps.get(2).map(|m| m.as_str());
    let frac = caps.get(3).map(|m| m.as_str());
    if int.is_none() && frac.is_none() {
        return None;
    }
    let sign = caps.get(1).map_or("", |m| m.as_str()).trim_start_matches('+');
    let literal = match frac {
        Some(frac) => format!("{sign}{}.{frac}", int.unwrap_or("0")),
        None => format!("{sign}{}", int.unwrap_or("0")),
    };
    Decimal::from_str(&literal).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn tokenize_trims_and_drops_blank_lines() {
        let text = "  first  \n\n\t\nsecond\r\n   third";
        assert_eq!(tokenize_lines(text), vec!["first", "second", "third"]);
    }

    #[test]
    fn tokenize_strips_byte_order_mark() {
        let text = "\u{feff}15-01-2024Grocery Store85.50expense\n16-01-2024Salary3000income";
        assert_eq!(
            tokenize_lines(text),
            vec!["15-01-2024Grocery Store85.50expense", "16-01-2024Salary3000income"]
        );
        assert!(tokenize_lines("\u{feff}").is_empty());
    }

    #[test]
    fn tokenize_empty_input() {
        assert!(tokenize_lines("").is_empty());
        assert!(tokenize_lines("\n \n").is_empty());
    }

    #[test]
    fn leading_decimal_plain() {
        assert_eq!(parse_leading_decimal("4.50"), Some(dec("4.50")));
        assert_eq!(parse_leading_decimal("-4.50"), Some(dec("-4.50")));
        assert_eq!(parse_leading_decimal("+12"), Some(dec("12")));
    }

    #[test]
    fn leading_decimal_ignores_trailing_junk() {
        assert_eq!(parse_leading_decimal("12.5.3"), Some(dec("12.5")));
        assert_eq!(parse_leading_decimal("7-"), Some(dec("7")));
        assert_eq!(parse_leading_decimal("3."), Some(dec("3")));
    }

    #[test]
    fn leading_decimal_fraction_only() {
        assert_eq!(parse_leading_decimal(".75"), Some(dec("0.75")));
        assert_eq!(parse_leading_decimal("-.75"), Some(dec("-0.75")));
    }

    #[test]
    fn leading_decimal_rejects_non_numbers() {
        assert_eq!(parse_leading_decimal(""), None);
        assert_eq!(parse_leading_decimal("-"), None);
        assert_eq!(parse_leading_decimal("."), None);
        assert_eq!(parse_leading_decimal("--5"), None);
    }
}
