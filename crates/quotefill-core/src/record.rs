//! Structured quote record handed to the policy templating step.
//!
//! Every record is built fresh from one transcript. Fields that could not be
//! found stay at their "not selected" / empty defaults.

use serde::{Deserialize, Serialize};

/// Carrier name used when no known carrier or attribution phrase is found.
pub const UNKNOWN_CARRIER: &str = "某保险公司";

/// Model text used when no model line sits near a VIN.
pub const UNKNOWN_MODEL: &str = "未知车型";

/// Uninsured-motorist property damage deductible assumed when none is printed.
pub const DEFAULT_UMPD_DEDUCTIBLE: &str = "250";

/// Root output of one extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRecord {
    pub company: String,
    /// `$#,###.##` or empty.
    pub total_premium: String,
    /// `"<N>个月"` or empty.
    pub policy_term: String,
    pub liability: LiabilityCoverage,
    pub uninsured_motorist: UmCoverage,
    pub medical_payment: MedicalPayment,
    pub personal_injury: PersonalInjury,
    /// De-duplicated by VIN, in first-appearance order.
    pub vehicles: Vec<VehicleRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_plan: Option<PaymentPlan>,
}

impl Default for QuoteRecord {
    fn default() -> Self {
        Self {
            company: UNKNOWN_CARRIER.to_string(),
            total_premium: String::new(),
            policy_term: String::new(),
            liability: LiabilityCoverage::default(),
            uninsured_motorist: UmCoverage::default(),
            medical_payment: MedicalPayment::default(),
            personal_injury: PersonalInjury::default(),
            vehicles: Vec::new(),
            payment_plan: None,
        }
    }
}

/// Bodily injury and property damage liability limits.
///
/// `selected` is true only when at least one amount came from the transcript.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiabilityCoverage {
    pub selected: bool,
    pub bi_per_person: String,
    pub bi_per_accident: String,
    pub pd: String,
}

/// Uninsured/underinsured motorist coverage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UmCoverage {
    pub selected: bool,
    pub bi_per_person: String,
    pub bi_per_accident: String,
    pub pd: String,
    /// Staged as [`DEFAULT_UMPD_DEDUCTIBLE`]; only meaningful when `selected`.
    pub deductible: String,
}

impl Default for UmCoverage {
    fn default() -> Self {
        Self {
            selected: false,
            bi_per_person: String::new(),
            bi_per_accident: String::new(),
            pd: String::new(),
            deductible: DEFAULT_UMPD_DEDUCTIBLE.to_string(),
        }
    }
}

impl UmCoverage {
    /// Whether any limit was read from the transcript.
    pub fn has_amounts(&self) -> bool {
        !self.bi_per_person.is_empty() || !self.pd.is_empty()
    }
}

/// Medical payments coverage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicalPayment {
    pub selected: bool,
    pub med: String,
}

/// Personal injury protection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalInjury {
    pub selected: bool,
    pub pip: String,
}

/// One insured vehicle and its physical-damage options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleRecord {
    pub model: String,
    pub vin: String,
    pub collision: DeductibleCoverage,
    pub comprehensive: DeductibleCoverage,
    pub rental: LimitCoverage,
    pub roadside: PresenceCoverage,
}

/// Coverage chosen with a deductible, e.g. collision.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductibleCoverage {
    pub selected: bool,
    /// Digits only, e.g. `"500"`.
    pub deductible: String,
}

/// Coverage chosen with an `A/B` limit, e.g. rental reimbursement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitCoverage {
    pub selected: bool,
    pub limit: String,
}

/// Coverage that is either present or not, e.g. roadside assistance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenceCoverage {
    pub selected: bool,
}

/// Pay-in-full / installment breakdown printed alongside the premium.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentPlan {
    pub down: String,
    pub pay_in_full: String,
    pub monthly_total: String,
}
