use quotefill_acquire::{AcquireError, Acquirer};
use quotefill_core::{Lines, QuoteRecord};
use serde::Serialize;
use tracing::info;

use crate::{coverage, scalars, vehicle};

/// A record together with the transcript it was read from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Extraction {
    pub record: QuoteRecord,
    pub transcript: String,
}

/// Run every extractor once over `transcript`.
pub fn extract_fields(transcript: &str) -> QuoteRecord {
    let lines = Lines::new(transcript);

    let record = QuoteRecord {
        company: scalars::company(transcript),
        total_premium: scalars::total_premium(transcript),
        policy_term: scalars::policy_term(transcript),
        liability: coverage::liability(&lines),
        uninsured_motorist: coverage::uninsured_motorist(&lines),
        medical_payment: coverage::medical_payment(&lines),
        personal_injury: coverage::personal_injury(&lines),
        vehicles: vehicle::vehicles(&lines, transcript),
        payment_plan: scalars::payment_plan(transcript),
    };

    info!(
        company = %record.company,
        premium = %record.total_premium,
        term = %record.policy_term,
        vehicles = record.vehicles.len(),
        "Extracted quote record"
    );
    record
}

/// Acquire a transcript for `bytes` and extract its record.
///
/// Only acquisition can fail; its error is returned unchanged.
pub async fn extract(
    bytes: &[u8],
    filename: &str,
    acquirer: &Acquirer<'_>,
) -> Result<Extraction, AcquireError> {
    let transcript = acquirer.acquire(bytes, filename).await?;
    let record = extract_fields(&transcript);
    Ok(Extraction { record, transcript })
}
