//! Currency formatting for price labels.

use super::locale::Locale;

/// Formats an amount as a display string for a locale.
///
/// Implementations must be pure: the same amount and locale always yield
/// the same string.
pub trait CurrencyFormatter: Send + Sync {
    fn format(&self, amount: f64, locale: &Locale) -> String;
}

/// Default formatter: symbol, grouping, and decimal separators chosen from
/// the locale's currency and language.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocaleCurrencyFormatter;

/// Where the currency symbol goes relative to the number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SymbolPosition {
    Prefix,
    Suffix,
}

#[derive(Debug, Clone, Copy)]
struct NumberStyle {
    group: &'static str,
    decimal: &'static str,
    symbol: SymbolPosition,
}

impl NumberStyle {
    fn for_language(language: &str) -> Self {
        match language.to_ascii_uppercase().as_str() {
            "FR" => Self {
                group: "\u{202f}",
                decimal: ",",
                symbol: SymbolPosition::Suffix,
            },
            "DE" | "ES" | "IT" | "NL" | "PT" => Self {
                group: ".",
                decimal: ",",
                symbol: SymbolPosition::Suffix,
            },
            _ => Self {
                group: ",",
                decimal: ".",
                symbol: SymbolPosition::Prefix,
            },
        }
    }
}

/// Symbol and number of minor digits for an ISO currency code.
fn currency_style(code: &str) -> (Option<&'static str>, usize) {
    match code {
        "USD" | "AUD" => (Some("$"), 2),
        "CAD" => (Some("CA$"), 2),
        "EUR" => (Some("€"), 2),
        "GBP" => (Some("£"), 2),
        "JPY" => (Some("¥"), 0),
        _ => (None, 2),
    }
}

impl CurrencyFormatter for LocaleCurrencyFormatter {
    fn format(&self, amount: f64, locale: &Locale) -> String {
        let (symbol, decimals) = currency_style(&locale.currency);
        let style = NumberStyle::for_language(&locale.language);

        let fixed = format!("{:.*}", decimals, amount.abs());
        let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
        let mut number = group_digits(whole, style.group);
        if !fraction.is_empty() {
            number.push_str(style.decimal);
            number.push_str(fraction);
        }

        // "-0.00" reads oddly; only show the sign for non-zero output.
        let sign = if amount < 0.0 && number.chars().any(|c| c.is_ascii_digit() && c != '0') {
            "-"
        } else {
            ""
        };

        match (symbol, style.symbol) {
            (Some(symbol), SymbolPosition::Prefix) => format!("{sign}{symbol}{number}"),
            (Some(symbol), SymbolPosition::Suffix) => format!("{sign}{number}\u{a0}{symbol}"),
            (None, SymbolPosition::Prefix) => format!("{sign}{}\u{a0}{number}", locale.currency),
            (None, SymbolPosition::Suffix) => format!("{sign}{number}\u{a0}{}", locale.currency),
        }
    }
}

/// Insert `separator` between every group of three digits.
fn group_digits(digits: &str, separator: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3 * separator.len());
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(c);
    }
    out
}
