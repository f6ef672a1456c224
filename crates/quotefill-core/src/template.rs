//! Placeholder substitution for the Chinese policy-explanation template.
//!
//! The template marks the carrier with `XXXXXXXXXXX` and the premium/term
//! pair with `$XXXXXX/X个月`. Missing values fall back to neutral filler so a
//! half-read quote still renders.

use crate::{QuoteRecord, UNKNOWN_CARRIER};

pub const COMPANY_PLACEHOLDER: &str = "XXXXXXXXXXX";
pub const PREMIUM_TERM_PLACEHOLDER: &str = "$XXXXXX/X个月";

const PREMIUM_FALLBACK: &str = "$XXX";
const TERM_FALLBACK: &str = "6个月";

/// Substitute every placeholder in one paragraph.
pub fn fill_placeholders(paragraph: &str, record: &QuoteRecord) -> String {
    let company = if record.company.is_empty() {
        UNKNOWN_CARRIER
    } else {
        record.company.as_str()
    };
    let premium = non_empty_or(&record.total_premium, PREMIUM_FALLBACK);
    let term = non_empty_or(&record.policy_term, TERM_FALLBACK);

    paragraph
        .replace(COMPANY_PLACEHOLDER, company)
        .replace(PREMIUM_TERM_PLACEHOLDER, &format!("{premium}/{term}"))
}

/// Fill a whole template, one paragraph per line.
pub fn fill_document(template: &str, record: &QuoteRecord) -> String {
    template
        .lines()
        .map(|paragraph| fill_placeholders(paragraph, record))
        .collect::<Vec<_>>()
        .join("\n")
}

/// One-line SMS summary sent alongside the filled document.
///
/// Missing premium or term use the same filler as [`fill_placeholders`].
pub fn sms_summary(record: &QuoteRecord) -> String {
    let company = non_empty_or(&record.company, UNKNOWN_CARRIER);
    let premium = non_empty_or(&record.total_premium, PREMIUM_FALLBACK);
    let term = non_empty_or(&record.policy_term, TERM_FALLBACK);
    format!(
        "你好，你的保险价格已经生成，保险公司：{company}，每{term}保费{premium}，\
         详细保障请见附件文档。（本价格包括{}辆车）",
        record.vehicles.len()
    )
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() { fallback } else { value }
}
