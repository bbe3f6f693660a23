//! Clinical observation inputs for severity scoring.
//!
//! These are the manually entered vital signs a clinician records at the
//! triage desk. Every measurement is optional: an unknown value never
//! contributes to the CURB-65 score, so a partially filled form still
//! produces a usable (conservative) result.

use serde::{Deserialize, Serialize};

/// Vital-sign observations entered for one patient.
///
/// Fields are updated individually as the form is filled in; the caller
/// re-derives the score after each change. A snapshot is embedded in a
/// [`PatientRecord`](crate::domain::PatientRecord) when the patient is
/// committed to the queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ClinicalObservations {
    /// Age in years.
    pub age: Option<u32>,

    /// Respiratory rate in breaths per minute.
    pub respiratory_rate: Option<u32>,

    /// Systolic blood pressure in mmHg.
    pub systolic_bp: Option<u32>,

    /// Diastolic blood pressure in mmHg.
    pub diastolic_bp: Option<u32>,

    /// Acute confusion present. No unknown state: absence is recorded
    /// as `false`.
    pub confusion: bool,

    /// Blood urea level in mmol/L.
    pub urea: Option<f64>,
}

impl ClinicalObservations {
    /// Check entered values against plausible clinical ranges.
    ///
    /// Advisory only: scoring never requires validation, since unknown
    /// fields simply contribute nothing. The limits match the original
    /// entry form (age 0-120 years, respiratory rate 0-50 breaths/min,
    /// systolic 0-300 mmHg, diastolic 0-200 mmHg, urea >= 0 mmol/L).
    ///
    /// # Errors
    /// Returns one message per out-of-range field.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if let Some(age) = self.age {
            if age > 120 {
                errors.push(format!("Age {} out of range [0, 120]", age));
            }
        }
        if let Some(rate) = self.respiratory_rate {
            if rate > 50 {
                errors.push(format!("Respiratory rate {} out of range [0, 50]", rate));
            }
        }
        if let Some(systolic) = self.systolic_bp {
            if systolic > 300 {
                errors.push(format!("Systolic BP {} out of range [0, 300]", systolic));
            }
        }
        if let Some(diastolic) = self.diastolic_bp {
            if diastolic > 200 {
                errors.push(format!("Diastolic BP {} out of range [0, 200]", diastolic));
            }
        }
        if let Some(urea) = self.urea {
            if !urea.is_finite() || urea < 0.0 {
                errors.push(format!("Urea {} must be a non-negative number", urea));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
