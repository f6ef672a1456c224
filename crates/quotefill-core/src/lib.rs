pub mod lines;
pub mod money;
pub mod record;
pub mod schema;
pub mod template;

pub use lines::{Lines, Window};
pub use money::normalize as normalize_money;
pub use record::{
    DEFAULT_UMPD_DEDUCTIBLE, DeductibleCoverage, LiabilityCoverage, LimitCoverage, MedicalPayment,
    PaymentPlan, PersonalInjury, PresenceCoverage, QuoteRecord, UNKNOWN_CARRIER, UNKNOWN_MODEL,
    UmCoverage, VehicleRecord,
};
pub use schema::vehicles;
