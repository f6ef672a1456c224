//! Policy-level coverages: liability, uninsured motorist, med pay and PIP.
//!
//! Each extractor finds keyword lines, then scans a small line window around
//! each hit nearest-line-first. The first keyword line whose window yields a
//! value wins. A coverage is only `selected` when an amount was actually read
//! from the transcript.

use once_cell::sync::Lazy;
use quotefill_core::money::{
    self, find_bi_pair, find_money, find_plain_integer, find_whole_amount,
};
use quotefill_core::{LiabilityCoverage, Lines, MedicalPayment, PersonalInjury, UmCoverage};
use regex::Regex;
use tracing::debug;

use crate::keywords::{UMBI_KEYS, UMPD_KEYS, contains_any};

/// Lines scanned either side of a keyword line.
const WINDOW: usize = 3;

/// UMBI limits are often printed further below their label.
const UMBI_AFTER: usize = 5;

static BI_LIABILITY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)Bodily\s+Injury\s+Liability|Liability\s+to\s+Others|^\s*Liability\s*$")
        .unwrap()
});

static PROPERTY_DAMAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Property\s+Damage").unwrap());

static MEDICAL_PAYMENTS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Medical\s+Payments?|Med\s*Pay").unwrap());

static PERSONAL_INJURY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Personal\s+Injury\s+Protection|\bPIP\b").unwrap());

/// Explicit deductible phrase, e.g. `Deductible: $500`.
pub(crate) static DEDUCTIBLE_PHRASE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Deductible\s*:?\s*\$?\s?(\d[\d,]*)").unwrap());

pub fn liability(lines: &Lines<'_>) -> LiabilityCoverage {
    let mut coverage = LiabilityCoverage::default();

    let bi = lines
        .positions(|line| BI_LIABILITY.is_match(line))
        .find_map(|i| lines.scan_near(i, WINDOW, WINDOW, find_bi_pair));
    if let Some((per_person, per_accident)) = bi {
        coverage.bi_per_person = per_person;
        coverage.bi_per_accident = per_accident;
    }

    // UMPD labels also read "Property Damage".
    let pd = lines
        .positions(|line| PROPERTY_DAMAGE.is_match(line) && !contains_any(line, UMPD_KEYS))
        .find_map(|i| {
            lines.scan_near(i, WINDOW, WINDOW, |line| {
                find_whole_amount(line).or_else(|| find_money(line))
            })
        });
    if let Some(raw) = pd {
        coverage.pd = money::normalize(raw);
    }

    coverage.selected = !(coverage.bi_per_person.is_empty() && coverage.pd.is_empty());
    debug!(selected = coverage.selected, "Liability");
    coverage
}

pub fn uninsured_motorist(lines: &Lines<'_>) -> UmCoverage {
    let mut coverage = UmCoverage::default();

    let bi = lines
        .positions(|line| contains_any(line, UMBI_KEYS))
        .find_map(|i| lines.scan_near(i, WINDOW, UMBI_AFTER, find_bi_pair));
    if let Some((per_person, per_accident)) = bi {
        coverage.bi_per_person = per_person;
        coverage.bi_per_accident = per_accident;
    }

    let pd_lines: Vec<usize> = lines.positions(|line| contains_any(line, UMPD_KEYS)).collect();

    let pd = pd_lines.iter().find_map(|&i| {
        lines.scan_near(i, WINDOW, WINDOW, |line| {
            let limit_text = DEDUCTIBLE_PHRASE.replace_all(line, "");
            find_plain_integer(&limit_text).map(money::normalize)
        })
    });
    if let Some(pd) = pd {
        coverage.pd = pd;
        if let Some(deductible) = pd_lines.iter().find_map(|&i| {
            lines.scan_near(i, WINDOW, WINDOW, |line| {
                DEDUCTIBLE_PHRASE
                    .captures(line)
                    .and_then(|caps| caps.get(1))
                    .map(|m| money::digits_only(m.as_str()))
            })
        }) {
            coverage.deductible = deductible;
        }
    }

    // Amounts decide selection, whatever defaults were staged above.
    coverage.selected = coverage.has_amounts();
    debug!(
        selected = coverage.selected,
        deductible = %coverage.deductible,
        "Uninsured motorist"
    );
    coverage
}

pub fn medical_payment(lines: &Lines<'_>) -> MedicalPayment {
    match nearby_amount(lines, &MEDICAL_PAYMENTS) {
        Some(med) => MedicalPayment {
            selected: true,
            med,
        },
        None => MedicalPayment::default(),
    }
}

pub fn personal_injury(lines: &Lines<'_>) -> PersonalInjury {
    match nearby_amount(lines, &PERSONAL_INJURY) {
        Some(pip) => PersonalInjury {
            selected: true,
            pip,
        },
        None => PersonalInjury::default(),
    }
}

/// First money figure near any line matching `keyword`, normalised.
///
/// Lines carrying a BI pair belong to the liability table, not this coverage.
fn nearby_amount(lines: &Lines<'_>, keyword: &Regex) -> Option<String> {
    let amount = lines
        .positions(|line| keyword.is_match(line))
        .find_map(|i| {
            lines.scan_near(i, WINDOW, WINDOW, |line| {
                if find_bi_pair(line).is_some() {
                    return None;
                }
                find_money(line)
            })
        })
        .map(money::normalize);
    debug!(keyword = keyword.as_str(), found = amount.is_some(), "Amount coverage");
    amount
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> Lines<'_> {
        Lines::new(text)
    }

    #[test]
    fn liability_pair_and_property_damage() {
        let text = "Bodily Injury Liability\n$30,000/$60,000\nProperty Damage Liability\n25,000";
        let got = liability(&lines(text));
        assert_eq!(
            got,
            LiabilityCoverage {
                selected: true,
                bi_per_person: "$30,000".into(),
                bi_per_accident: "$60,000".into(),
                pd: "$25,000".into(),
            }
        );
    }

    #[test]
    fn liability_to_others_phrasing() {
        let text = "Coverages\nLiability to Others\n100,000 / 300,000\n$412.30";
        let got = liability(&lines(text));
        assert!(got.selected);
        assert_eq!(got.bi_per_person, "$100,000");
        assert_eq!(got.bi_per_accident, "$300,000");
        assert_eq!(got.pd, "");
    }

    #[test]
    fn liability_combined_limit_notation() {
        let got = liability(&lines("Bodily Injury Liability\n100,000/300,000/100,000"));
        assert!(got.selected);
        assert_eq!(got.bi_per_person, "$100,000");
        assert_eq!(got.bi_per_accident, "$300,000");

        let got = uninsured_motorist(&lines("Uninsured Motorist Bodily Injury\n25/50/25"));
        assert!(got.selected);
        assert_eq!(got.bi_per_person, "$25");
        assert_eq!(got.bi_per_accident, "$50");
    }

    #[test]
    fn bare_liability_line_counts() {
        let text = "Liability\n50,000/100,000";
        assert_eq!(liability(&lines(text)).bi_per_accident, "$100,000");
    }

    #[test]
    fn liability_property_damage_prefers_whole_limit() {
        let text = "Property Damage Liability $100,000 $123.45";
        assert_eq!(liability(&lines(text)).pd, "$100,000");
    }

    #[test]
    fn liability_without_amounts_is_not_selected() {
        let text = "Bodily Injury Liability\nNot included\n\n\n\nProperty Damage\nDeclined";
        let got = liability(&lines(text));
        assert!(!got.selected);
        assert_eq!(got, LiabilityCoverage::default());
    }

    #[test]
    fn liability_ignores_um_property_damage() {
        let text = "Uninsured Motorist Property Damage\n25,000";
        assert!(!liability(&lines(text)).selected);
    }

    #[test]
    fn um_property_damage_only_keeps_default_deductible() {
        let text = "Uninsured Motorist Property Damage\n25,000";
        let got = uninsured_motorist(&lines(text));
        assert!(got.selected);
        assert_eq!(got.pd, "$25,000");
        assert_eq!(got.deductible, "250");
        assert_eq!(got.bi_per_person, "");
    }

    #[test]
    fn um_explicit_deductible_nearby() {
        let text = "UMPD 15,000\nDeductible $500";
        let got = uninsured_motorist(&lines(text));
        assert_eq!(got.pd, "$15,000");
        assert_eq!(got.deductible, "500");
    }

    #[test]
    fn um_deductible_phrase_is_not_the_limit() {
        let text = "Uninsd Motorists PD Deductible $250 10,000";
        let got = uninsured_motorist(&lines(text));
        assert_eq!(got.pd, "$10,000");
        assert_eq!(got.deductible, "250");
    }

    #[test]
    fn um_bodily_injury_reaches_further_below() {
        let text = "Uninsured Motorist Bodily Injury\nper person\nper accident\n\
                    stacked\nlimits\n25,000/50,000";
        let got = uninsured_motorist(&lines(text));
        assert!(got.selected);
        assert_eq!(got.bi_per_person, "$25,000");
        assert_eq!(got.bi_per_accident, "$50,000");
    }

    #[test]
    fn um_absent_is_not_selected_despite_default() {
        let got = uninsured_motorist(&lines("Collision\nDeductible $500"));
        assert!(!got.selected);
        assert_eq!(got.deductible, "250");
        assert!(!got.has_amounts());
    }

    #[test]
    fn medical_payment_needs_an_amount() {
        let got = medical_payment(&lines("Medical Payments\nIncluded"));
        assert_eq!(got, MedicalPayment::default());

        let got = medical_payment(&lines("Medical Payments\n$500"));
        assert_eq!(
            got,
            MedicalPayment {
                selected: true,
                med: "$500".into()
            }
        );
    }

    #[test]
    fn medical_payment_ignores_neighbouring_liability_pair() {
        let text = "Bodily Injury Liability\n$30,000/$60,000\nMedical Payments\nNot included";
        assert_eq!(medical_payment(&lines(text)), MedicalPayment::default());
    }

    #[test]
    fn medical_payment_checks_later_keyword_lines() {
        let text = "MedPay\nIncluded\n\n\n\n\n\n\nMedical Payment\n1,000";
        let got = medical_payment(&lines(text));
        assert!(got.selected);
        assert_eq!(got.med, "$1,000");
    }

    #[test]
    fn personal_injury_protection() {
        let got = personal_injury(&lines("Personal Injury Protection\n$10,000"));
        assert!(got.selected);
        assert_eq!(got.pip, "$10,000");

        let got = personal_injury(&lines("PIP\nRejected"));
        assert!(!got.selected);
        assert_eq!(got.pip, "");

        assert!(!personal_injury(&lines("PIPELINE 2000")).selected);
    }
}
