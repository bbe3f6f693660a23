//! Domain layer: severity scoring and queue record types.
//!
//! Pure types and functions with no I/O. Everything here is
//! serializable, and scoring is deterministic integer arithmetic.

mod classifier;
mod observations;
mod record;
mod severity;

pub use classifier::{ClassProbabilities, Classification, ClassifierResult};
pub use observations::ClinicalObservations;
pub use record::{PatientDraft, PatientRecord, PatientStatus};
pub use severity::{
    combined_severity, curb65_breakdown, curb65_score, CriterionScore, RiskLevel, SeverityResult,
};
