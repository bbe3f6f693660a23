//! Triage queue records.
//!
//! A [`PatientRecord`] bundles everything captured when a severity
//! assessment is committed to the worklist: the classifier output, the
//! observations it was scored from, and the assessment itself. The
//! record is immutable once created apart from its status.

use serde::{Deserialize, Serialize};

use crate::domain::classifier::ClassifierResult;
use crate::domain::observations::ClinicalObservations;
use crate::domain::severity::SeverityResult;

/// Treatment status of a queued patient.
///
/// The queue imposes no transition rules; the desk moves patients
/// between states freely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PatientStatus {
    /// Awaiting treatment
    Waiting,
    /// Currently being treated
    InTreatment,
    /// Treatment finished
    Completed,
}

impl std::fmt::Display for PatientStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Waiting => write!(f, "waiting"),
            Self::InTreatment => write!(f, "in-treatment"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

/// Input for queueing a patient, before identity and timestamps exist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientDraft {
    /// Optional display name
    pub patient_name: Option<String>,

    /// Reference to the analysed X-ray image
    pub image_name: String,

    /// Classifier output the assessment was based on
    pub prediction: ClassifierResult,

    /// Clinical observations at assessment time
    pub observations: ClinicalObservations,

    /// The computed severity assessment
    pub severity: SeverityResult,

    /// Free-text notes
    pub notes: Option<String>,
}

/// A patient on the triage worklist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    /// Unique queue identity, assigned at creation
    pub id: String,

    /// Optional display name
    pub patient_name: Option<String>,

    /// Reference to the analysed X-ray image
    pub image_name: String,

    /// Classifier output snapshot
    pub prediction: ClassifierResult,

    /// Clinical observations snapshot
    pub observations: ClinicalObservations,

    /// Severity assessment snapshot
    pub severity: SeverityResult,

    /// Current treatment status
    pub status: PatientStatus,

    /// When the patient was queued (UTC)
    pub created_at: chrono::DateTime<chrono::Utc>,

    /// Free-text notes
    pub notes: Option<String>,
}

impl PatientRecord {
    /// Create a record from a draft, stamping identity, creation time
    /// and the initial `waiting` status.
    #[must_use]
    pub fn new(draft: PatientDraft) -> Self {
        Self {
            id: patient_id(),
            patient_name: draft.patient_name,
            image_name: draft.image_name,
            prediction: draft.prediction,
            observations: draft.observations,
            severity: draft.severity,
            status: PatientStatus::Waiting,
            created_at: chrono::Utc::now(),
            notes: draft.notes,
        }
    }
}

/// Generate a queue identity: creation millis plus a random suffix.
///
/// Uses ChaCha20Rng seeded from OS entropy so identities cannot be
/// predicted from insertion order.
fn patient_id() -> String {
    use rand::Rng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    let mut rng = ChaCha20Rng::from_entropy();
    let suffix: u64 = rng.gen();

    format!(
        "patient-{}-{:016x}",
        chrono::Utc::now().timestamp_millis(),
        suffix
    )
}
