//! Document-wide scalar fields: carrier, premium, term and payment plan.
//!
//! Unlike coverages these are phrase searches over the whole transcript, not
//! keyword-line windows: premiums are often printed a few lines under their
//! caption with unrelated table cells in between.

use once_cell::sync::Lazy;
use quotefill_core::money::{self, cents_amounts, dollar_amounts, format_cents, parse_amount};
use quotefill_core::{PaymentPlan, UNKNOWN_CARRIER};
use regex::Regex;
use tracing::debug;

use crate::keywords::KNOWN_CARRIERS;

/// Explicit carrier attribution, e.g. `Underwritten by Acme Insurance Co.`
static ATTRIBUTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:underwritten\s+by|quote\s+from|provided\s+by)\s*:?[ \t]*([^\n]+)")
        .unwrap()
});

/// Trailing corporate suffix (`, Inc.`, ` LLC`).
static CORPORATE_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)[\s,]+(?:inc|co|llc|ltd)\.?\s*$").unwrap());

/// Premium captions in priority order; each captures the first `$X.XX` after it.
static PREMIUM_PHRASES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"estimated\s+pay-?in-?full",
        r"pay-?in-?full",
        r"Total\s+\d+\s+month\s+policy\s+premium",
        r"your\s+estimated\s+total\s+premium",
        r"Total\s+policy\s+premium",
    ]
    .iter()
    .map(|caption| {
        Regex::new(&format!(r"(?is){caption}.{{0,120}}?\$\s?([\d,]+\.\d{{2}})")).unwrap()
    })
    .collect()
});

/// Month-count captions in priority order.
static TERM_PHRASES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)Total\s+(\d+)\s+month\s+policy\s+premium",
        r"(?i)(\d+)\s+month\s+policy",
        r"(?i)Policy\s+Term\s*:?\s*(\d+)\s*months?",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Characters either side of an amount inspected for a "savings" caption.
const SAVINGS_RADIUS: usize = 40;

/// Smallest amount the fallback premium search accepts.
const FALLBACK_PREMIUM_FLOOR: f64 = 1000.0;

/// Largest figure accepted as a down payment when reading a payment plan.
const DOWN_PAYMENT_CEILING: f64 = 600.0;

/// Carrier name: known carriers first, then an explicit attribution phrase.
pub fn company(transcript: &str) -> String {
    let lowered = transcript.to_lowercase();
    if let Some((_, name)) = KNOWN_CARRIERS
        .iter()
        .find(|(needle, _)| lowered.contains(needle))
    {
        return (*name).to_string();
    }

    if let Some(caps) = ATTRIBUTION.captures(transcript) {
        let mut name = caps.get(1).map_or("", |m| m.as_str()).trim().to_string();
        while let Some(m) = CORPORATE_SUFFIX.find(&name) {
            name.truncate(m.start());
        }
        let name = name.trim_end_matches([',', '.', ' ']).trim();
        if !name.is_empty() {
            return name.to_string();
        }
    }

    debug!("No carrier name found");
    UNKNOWN_CARRIER.to_string()
}

/// Total premium as `$#,###.##`, or empty.
///
/// Captioned amounts win over the largest-figure fallback; any amount printed
/// next to the word "savings" is a discount, never the premium.
pub fn total_premium(transcript: &str) -> String {
    for phrase in PREMIUM_PHRASES.iter() {
        for caps in phrase.captures_iter(transcript) {
            let Some(amount) = caps.get(1) else {
                continue;
            };
            if near_savings(transcript, amount.start(), amount.end()) {
                debug!(amount = amount.as_str(), "Skipping premium next to savings");
                continue;
            }
            return money::normalize(amount.as_str());
        }
    }

    let largest = dollar_amounts(transcript)
        .filter(|(span, _)| !near_savings(transcript, span.start, span.end))
        .filter_map(|(_, raw)| parse_amount(raw))
        .filter(|value| *value >= FALLBACK_PREMIUM_FLOOR)
        .fold(None, |max: Option<f64>, v| Some(max.map_or(v, |m| m.max(v))));

    match largest {
        Some(value) => format_cents(value),
        None => String::new(),
    }
}

/// Policy term as `"{N}个月"`, or empty.
pub fn policy_term(transcript: &str) -> String {
    TERM_PHRASES
        .iter()
        .find_map(|re| re.captures(transcript))
        .and_then(|caps| caps.get(1))
        .map(|n| format!("{}个月", n.as_str()))
        .unwrap_or_default()
}

/// Down payment / pay-in-full / monthly total read from the first plausible
/// triple of consecutive cents amounts.
pub fn payment_plan(transcript: &str) -> Option<PaymentPlan> {
    let amounts: Vec<f64> = cents_amounts(transcript).filter_map(parse_amount).collect();

    amounts.windows(3).find_map(|triple| {
        let mut sorted = [triple[0], triple[1], triple[2]];
        sorted.sort_by(f64::total_cmp);
        let [down, pay_in_full, monthly_total] = sorted;
        (down < DOWN_PAYMENT_CEILING && pay_in_full < monthly_total).then(|| PaymentPlan {
            down: format_cents(down),
            pay_in_full: format_cents(pay_in_full),
            monthly_total: format_cents(monthly_total),
        })
    })
}

/// Whether "savings" is printed within [`SAVINGS_RADIUS`] characters of
/// `text[start..end]`, looking no further than that span's own line.
fn near_savings(text: &str, start: usize, end: usize) -> bool {
    let end = end.min(text.len());
    let line_start = text[..start].rfind('\n').map_or(0, |i| i + 1);
    let line_end = text[end..].find('\n').map_or(text.len(), |i| end + i);

    let lo = text[line_start..start]
        .char_indices()
        .rev()
        .nth(SAVINGS_RADIUS - 1)
        .map_or(line_start, |(i, _)| line_start + i);
    let hi = text[end..line_end]
        .char_indices()
        .nth(SAVINGS_RADIUS)
        .map_or(line_end, |(i, _)| end + i);

    text[lo..hi].to_lowercase().contains("savings")
}
