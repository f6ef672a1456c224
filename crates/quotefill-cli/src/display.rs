//! Vertical card display for extracted quote records.
//!
//! Renders one [`QuoteRecord`] as grouped label/value rows. Sections with
//! nothing selected are skipped so a half-read quote stays short.

use std::fmt::Write;

use chrono::{DateTime, Local};
use quotefill_core::{QuoteRecord, VehicleRecord};

const MAX_LIST_ITEMS: usize = 10;

const TRANSCRIPT_PREVIEW_CHARS: usize = 10_000;

type Row = (&'static str, String);

// ── Public API ──

/// Render `record` as a card headed by the carrier name.
pub fn render_quote_card(record: &QuoteRecord, extracted_at: DateTime<Local>) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "=== {} ===", record.company);
    let _ = writeln!(out, "extracted {}", extracted_at.format("%Y-%m-%d %H:%M"));
    out.push('\n');

    render_section(&mut out, "Policy", &policy_rows(record));
    render_section(&mut out, "Liability", &liability_rows(record));
    render_section(&mut out, "Uninsured Motorist", &um_rows(record));
    render_section(&mut out, "Medical / PIP", &medical_rows(record));
    render_section(&mut out, "Payment Plan", &payment_rows(record));
    render_vehicles(&mut out, &record.vehicles);

    out
}

/// First [`TRANSCRIPT_PREVIEW_CHARS`] characters of a transcript, marked
/// when cut short.
pub fn transcript_preview(transcript: &str) -> String {
    match transcript.char_indices().nth(TRANSCRIPT_PREVIEW_CHARS) {
        Some((cut, _)) => {
            let total = transcript.chars().count();
            format!(
                "{}\n... ({} more characters)",
                &transcript[..cut],
                total - TRANSCRIPT_PREVIEW_CHARS
            )
        }
        None => transcript.to_string(),
    }
}

// ── Section rows ──

fn policy_rows(record: &QuoteRecord) -> Vec<Row> {
    vec![
        ("total_premium", record.total_premium.clone()),
        ("policy_term", record.policy_term.clone()),
    ]
}

fn liability_rows(record: &QuoteRecord) -> Vec<Row> {
    let l = &record.liability;
    if !l.selected {
        return Vec::new();
    }
    vec![
        ("bodily_injury", pair(&l.bi_per_person, &l.bi_per_accident)),
        ("property_damage", l.pd.clone()),
    ]
}

fn um_rows(record: &QuoteRecord) -> Vec<Row> {
    let um = &record.uninsured_motorist;
    if !um.selected {
        return Vec::new();
    }
    let mut rows = vec![("bodily_injury", pair(&um.bi_per_person, &um.bi_per_accident))];
    if !um.pd.is_empty() {
        rows.push(("property_damage", um.pd.clone()));
        rows.push(("deductible", format!("${}", um.deductible)));
    }
    rows
}

fn medical_rows(record: &QuoteRecord) -> Vec<Row> {
    let mut rows = Vec::new();
    if record.medical_payment.selected {
        rows.push(("medical_payments", record.medical_payment.med.clone()));
    }
    if record.personal_injury.selected {
        rows.push(("personal_injury", record.personal_injury.pip.clone()));
    }
    rows
}

fn payment_rows(record: &QuoteRecord) -> Vec<Row> {
    let Some(plan) = &record.payment_plan else {
        return Vec::new();
    };
    vec![
        ("down_payment", plan.down.clone()),
        ("pay_in_full", plan.pay_in_full.clone()),
        ("monthly_total", plan.monthly_total.clone()),
    ]
}

// ── Rendering ──

fn render_section(out: &mut String, header: &str, rows: &[Row]) {
    if rows.iter().all(|(_, value)| value.is_empty()) {
        return;
    }

    let _ = writeln!(out, "{header}");
    for (label, value) in rows {
        if value.is_empty() {
            continue;
        }
        let _ = writeln!(out, "  {label:<26} {value}");
    }
    out.push('\n');
}

fn render_vehicles(out: &mut String, vehicles: &[VehicleRecord]) {
    if vehicles.is_empty() {
        return;
    }

    let _ = writeln!(out, "Vehicles ({}):", vehicles.len());
    for v in vehicles.iter().take(MAX_LIST_ITEMS) {
        let _ = writeln!(out, "    {:<30}  {}", v.model, v.vin);

        let mut options = Vec::new();
        if v.collision.selected {
            options.push(format!("collision ${}", v.collision.deductible));
        }
        if v.comprehensive.selected {
            options.push(format!("comprehensive ${}", v.comprehensive.deductible));
        }
        if v.rental.selected {
            options.push(format!("rental {}", v.rental.limit));
        }
        if v.roadside.selected {
            options.push("roadside".to_string());
        }
        if !options.is_empty() {
            let _ = writeln!(out, "      {}", options.join(", "));
        }
    }
    if vehicles.len() > MAX_LIST_ITEMS {
        let _ = writeln!(out, "    ... and {} more", vehicles.len() - MAX_LIST_ITEMS);
    }
    out.push('\n');
}

fn pair(per_person: &str, per_accident: &str) -> String {
    match (per_person.is_empty(), per_accident.is_empty()) {
        (true, true) => String::new(),
        _ => format!("{per_person} / {per_accident}"),
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use quotefill_core::{
        DeductibleCoverage, LiabilityCoverage, LimitCoverage, PaymentPlan, PresenceCoverage,
        UNKNOWN_MODEL,
    };

    use super::*;

    fn at() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap()
    }

    fn vehicle(vin: &str) -> VehicleRecord {
        VehicleRecord {
            model: UNKNOWN_MODEL.into(),
            vin: vin.into(),
            collision: DeductibleCoverage {
                selected: true,
                deductible: "500".into(),
            },
            comprehensive: DeductibleCoverage::default(),
            rental: LimitCoverage {
                selected: true,
                limit: "30/900".into(),
            },
            roadside: PresenceCoverage { selected: true },
        }
    }

    #[test]
    fn empty_record_shows_only_header() {
        let card = render_quote_card(&QuoteRecord::default(), at());
        assert!(card.starts_with("=== 某保险公司 ==="));
        assert!(card.contains("extracted 2024-03-01 09:30"));
        assert!(!card.contains("Liability"));
        assert!(!card.contains("Uninsured Motorist"));
        assert!(!card.contains("Vehicles"));
    }

    #[test]
    fn selected_sections_are_rendered() {
        let record = QuoteRecord {
            company: "Progressive".into(),
            total_premium: "$900.00".into(),
            policy_term: "6个月".into(),
            liability: LiabilityCoverage {
                selected: true,
                bi_per_person: "$30,000".into(),
                bi_per_accident: "$60,000".into(),
                pd: "$25,000".into(),
            },
            payment_plan: Some(PaymentPlan {
                down: "$180.50".into(),
                pay_in_full: "$1,020.00".into(),
                monthly_total: "$1,105.30".into(),
            }),
            vehicles: vec![vehicle("1HGCM82633A123456")],
            ..QuoteRecord::default()
        };

        let card = render_quote_card(&record, at());
        assert!(card.contains("=== Progressive ==="));
        assert!(card.contains("total_premium"));
        assert!(card.contains("$30,000 / $60,000"));
        assert!(card.contains("down_payment"));
        assert!(card.contains("Vehicles (1):"));
        assert!(card.contains("collision $500, rental 30/900, roadside"));
        assert!(!card.contains("Medical / PIP"));
    }

    #[test]
    fn long_vehicle_lists_are_capped() {
        let record = QuoteRecord {
            vehicles: (0..12).map(|i| vehicle(&format!("VIN{i}"))).collect(),
            ..QuoteRecord::default()
        };
        let card = render_quote_card(&record, at());
        assert!(card.contains("Vehicles (12):"));
        assert!(card.contains("... and 2 more"));
        assert!(!card.contains("VIN11"));
    }

    #[test]
    fn transcript_preview_truncates_on_char_boundary() {
        assert_eq!(transcript_preview("short"), "short");

        let long = "保".repeat(TRANSCRIPT_PREVIEW_CHARS + 5);
        let preview = transcript_preview(&long);
        assert!(preview.ends_with("... (5 more characters)"));
        assert_eq!(
            preview.lines().next().unwrap().chars().count(),
            TRANSCRIPT_PREVIEW_CHARS
        );
    }
}
