//! Monetary token patterns and currency normalisation.
//!
//! Quotes print the same amount in many shapes (`30000`, `30,000`,
//! `$30,000.00`). Every amount that lands in a [`QuoteRecord`] goes through
//! [`normalize`] so downstream templating sees one canonical form:
//!
//! - `"10000"`    → `"$10,000"`
//! - `"1234.5"`   → `"$1,234.50"`
//! - `"$1,234.5"` → `"$1,234.50"`
//! - `""`         → `""`
//!
//! Whether a number carries cents is also used as a weak signal: premiums are
//! printed with cents, limits and deductibles usually are not. See
//! [`find_plain_integer`].
//!
//! [`QuoteRecord`]: crate::QuoteRecord

use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;

/// Money-like token: optional `$`, comma-grouped or bare digits, optional cents.
static MONEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:\$|\b)(?:\d{1,3}(?:,\d{3})+|\d+)(?:\.\d{2})?\b").unwrap());

/// Dollar amount that must carry a `$` sign.
static DOLLARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\s?((?:\d{1,3}(?:,\d{3})+|\d+)(?:\.\d{2})?)\b").unwrap());

/// Dollar amount with mandatory cents, as printed for premiums.
static DOLLARS_WITH_CENTS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\s?([\d,]+\.\d{2})\b").unwrap());

/// Per-person / per-accident pair, e.g. `30,000/60,000` or `$30,000 / $60,000`.
static BI_PAIR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\$|\b)(\d{1,3}(?:,\d{3})*)\s*/\s*\$?(\d{1,3}(?:,\d{3})*)\b").unwrap()
});

/// Third slash-separated part after a BI pair, e.g. the `/100,000` PD limit
/// or the `/2024` year of a date.
static PAIR_TAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^/\s*\$?([\d,]+)").unwrap());

/// Integer candidate for limits and deductibles; cents are rejected afterwards.
static PLAIN_INTEGER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:\d{1,3}(?:,\d{3})+|\d{2,5})\b").unwrap());

/// Rental style `A/B` limit with 1-4 digit sides.
static LIMIT_RATIO: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|[^\d,$./])(\d{1,4})\s*/\s*(\d{1,4})(?:$|[^\d,/])").unwrap());

/// Small integer token, used as "some figure is printed here".
static SMALL_INTEGER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d{1,4}\b").unwrap());

/// Canonicalise a monetary substring.
///
/// Strips everything but digits and dots, then formats with thousands
/// separators: two decimals when a fractional part was present, none
/// otherwise. Unparseable input yields an empty string.
pub fn normalize(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if cleaned.is_empty() {
        return String::new();
    }

    if cleaned.contains('.') {
        match cleaned.parse::<f64>() {
            Ok(value) => format_cents(value),
            Err(_) => String::new(),
        }
    } else {
        match cleaned.parse::<u64>() {
            Ok(value) => format!("${}", group_thousands(&value.to_string())),
            Err(_) => String::new(),
        }
    }
}

/// Format a value as `$#,###.##`.
pub fn format_cents(value: f64) -> String {
    let fixed = format!("{value:.2}");
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    format!("${}.{}", group_thousands(whole), cents)
}

/// Parse a money-like token (`$1,234.56`, `1234`) into a number.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok()
}

/// Digits of a token with every other character dropped (`"$1,000"` → `"1000"`).
pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

// ── Token finders ──

/// First money-like token in `line`.
pub fn find_money(line: &str) -> Option<&str> {
    MONEY.find(line).map(|m| m.as_str())
}

/// Every `$`-prefixed amount in `text` as `(byte span including '$', amount)`.
pub fn dollar_amounts(text: &str) -> impl Iterator<Item = (Range<usize>, &str)> {
    DOLLARS.captures_iter(text).filter_map(|caps| {
        let whole = caps.get(0)?;
        let amount = caps.get(1)?;
        Some((whole.range(), amount.as_str()))
    })
}

/// Every `$X.XX` amount in `text`, in order.
pub fn cents_amounts(text: &str) -> impl Iterator<Item = &str> {
    DOLLARS_WITH_CENTS
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
}

/// First per-person / per-accident pair in `line`, normalised.
///
/// Combined limits (`100,000/300,000/100,000`, `25/50/25`) yield their first
/// two parts. Slash-separated dates (`01/15/2024`, `1/5/24`) are skipped.
pub fn find_bi_pair(line: &str) -> Option<(String, String)> {
    for caps in BI_PAIR.captures_iter(line) {
        let (Some(whole), Some(first), Some(second)) = (caps.get(0), caps.get(1), caps.get(2))
        else {
            continue;
        };
        let third = PAIR_TAIL
            .captures(&line[whole.end()..])
            .and_then(|tail| tail.get(1))
            .map(|m| m.as_str());
        if third.is_some_and(|third| is_date(first.as_str(), second.as_str(), third)) {
            continue;
        }
        return Some((normalize(first.as_str()), normalize(second.as_str())));
    }
    None
}

/// Whether `a/b/c` reads as a calendar date rather than three limits.
fn is_date(a: &str, b: &str, c: &str) -> bool {
    if [a, b, c].iter().any(|part| part.contains(',')) {
        return false;
    }
    let four_digit_year = c.len() == 4 && (c.starts_with("19") || c.starts_with("20"));
    let short_year = c.len() == 2 && (a.len() == 1 || a.starts_with('0'));
    a.len() <= 2 && b.len() <= 2 && (four_digit_year || short_year)
}

/// First integer in `line` that is not a dollars-and-cents figure.
///
/// `"Deductible $500"` yields `"500"`; `"$1,234.56"` yields nothing.
pub fn find_plain_integer(line: &str) -> Option<&str> {
    PLAIN_INTEGER.find_iter(line).find_map(|m| {
        let before = &line[..m.start()];
        let after = &line[m.end()..];
        if before.ends_with(['.', ',']) || has_cents_suffix(after) {
            None
        } else {
            Some(m.as_str())
        }
    })
}

/// First money-like token in `line` printed without cents, e.g. `$100,000`.
///
/// Single digits are skipped so list markers and counters are not read as limits.
pub fn find_whole_amount(line: &str) -> Option<&str> {
    MONEY
        .find_iter(line)
        .map(|m| m.as_str())
        .find(|token| !token.contains('.') && digits_only(token).len() >= 2)
}

fn has_cents_suffix(after: &str) -> bool {
    let mut chars = after.chars();
    chars.next() == Some('.')
        && chars.next().is_some_and(|c| c.is_ascii_digit())
        && chars.next().is_some_and(|c| c.is_ascii_digit())
}

/// First `A/B` limit in `line`, whitespace removed (`"30 / 900"` → `"30/900"`).
pub fn find_limit_ratio(line: &str) -> Option<String> {
    let caps = LIMIT_RATIO.captures(line)?;
    Some(format!("{}/{}", caps.get(1)?.as_str(), caps.get(2)?.as_str()))
}

/// Whether `line` prints any money-like or small integer figure.
pub fn has_figure(line: &str) -> bool {
    MONEY.is_match(line) || SMALL_INTEGER.is_match(line)
}
