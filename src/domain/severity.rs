//! Severity scoring engine.
//!
//! Combines the CURB-65 clinical score with the imaging classification
//! into a single 0-10 severity with a risk band and recommendation.
//! Pure functions, no state, no I/O.

use serde::{Deserialize, Serialize};

use crate::domain::classifier::{Classification, ClassifierResult};
use crate::domain::observations::ClinicalObservations;

/// Risk band derived from the final severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// Severity 0-3, outpatient territory
    Low,
    /// Severity 4-6, admission recommended
    Moderate,
    /// Severity 7-10, ICU consideration
    High,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Moderate => write!(f, "moderate"),
            Self::High => write!(f, "high"),
        }
    }
}

/// Combined severity assessment for one patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeverityResult {
    /// Final severity on the 0-10 scale
    pub final_severity: u8,

    /// CURB-65 score the assessment was derived from (0-5)
    pub curb65_score: u8,

    /// Risk band for the final severity
    pub risk_level: RiskLevel,

    /// Category label, e.g. "MODERATE SEVERITY - Hospital admission recommended"
    pub interpretation: String,

    /// Recommended course of action
    pub recommendation: String,
}

/// One CURB-65 criterion with its contribution and a display description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionScore {
    /// Fixed criterion label
    pub label: String,

    /// 0 or 1
    pub points: u8,

    /// Human-readable explanation of the criterion outcome
    pub description: String,
}

/// Compute the CURB-65 score (0-5) from clinical observations.
///
/// One point per criterion met. Unknown fields never contribute.
#[must_use]
pub fn curb65_score(obs: &ClinicalObservations) -> u8 {
    let mut score = 0;

    if age_criterion(obs) {
        score += 1;
    }
    if respiratory_criterion(obs) {
        score += 1;
    }
    if blood_pressure_criterion(obs) {
        score += 1;
    }
    if obs.confusion {
        score += 1;
    }
    if urea_criterion(obs) {
        score += 1;
    }

    score
}

/// Per-criterion breakdown of the CURB-65 score.
///
/// Always returns five entries in fixed order: age, respiratory rate,
/// blood pressure, confusion, urea. The points sum to [`curb65_score`]
/// for the same observations.
#[must_use]
pub fn curb65_breakdown(obs: &ClinicalObservations) -> Vec<CriterionScore> {
    vec![
        CriterionScore {
            label: "Age ≥65".to_string(),
            points: if age_criterion(obs) { 1 } else { 0 },
            description: match obs.age {
                Some(age) => format!("Patient age {} years", age),
                None => "Age not specified".to_string(),
            },
        },
        CriterionScore {
            label: "Respiratory Rate ≥30".to_string(),
            points: if respiratory_criterion(obs) { 1 } else { 0 },
            description: match obs.respiratory_rate {
                Some(rate) if rate >= 30 => format!("Respiratory rate elevated ({} bpm)", rate),
                Some(rate) => format!("Respiratory rate normal ({} bpm)", rate),
                None => "Respiratory rate not specified".to_string(),
            },
        },
        CriterionScore {
            label: "Low Blood Pressure".to_string(),
            points: if blood_pressure_criterion(obs) { 1 } else { 0 },
            // Readings are shown only when both are known, even though a
            // single known reading can satisfy the criterion.
            description: match (obs.systolic_bp, obs.diastolic_bp) {
                (Some(systolic), Some(diastolic)) if systolic < 90 || diastolic <= 60 => {
                    format!("Blood pressure low ({}/{} mmHg)", systolic, diastolic)
                }
                (Some(systolic), Some(diastolic)) => {
                    format!("Blood pressure stable ({}/{} mmHg)", systolic, diastolic)
                }
                _ => "Blood pressure not specified".to_string(),
            },
        },
        CriterionScore {
            label: "Confusion".to_string(),
            points: if obs.confusion { 1 } else { 0 },
            description: if obs.confusion {
                "Acute confusion present".to_string()
            } else {
                "No acute confusion".to_string()
            },
        },
        CriterionScore {
            label: "Urea >7 mmol/L".to_string(),
            points: if urea_criterion(obs) { 1 } else { 0 },
            description: match obs.urea {
                Some(urea) if urea > 7.0 => format!("Urea level elevated ({} mmol/L)", urea),
                Some(urea) => format!("Urea level normal ({} mmol/L)", urea),
                None => "Urea level not specified".to_string(),
            },
        },
    ]
}

/// Combine the imaging classification with a CURB-65 score into the
/// final severity assessment.
///
/// A `NORMAL` classification forces severity 0 while preserving the
/// CURB-65 score as entered; the clinical score is a fact about the
/// patient independent of imaging. Otherwise the CURB-65 tier sets the
/// base (<=1 -> 2, ==2 -> 5, 3-5 -> 8), bacterial pneumonia adds one
/// point, and the result is clamped to 10.
#[must_use]
pub fn combined_severity(prediction: Option<&ClassifierResult>, curb65: u8) -> SeverityResult {
    let prediction = match prediction {
        Some(prediction) => prediction,
        None => {
            return SeverityResult {
                final_severity: 0,
                curb65_score: 0,
                risk_level: RiskLevel::Low,
                interpretation: "No prediction available".to_string(),
                recommendation: "Please upload an X-ray image first".to_string(),
            };
        }
    };

    if !prediction.classification.is_pneumonia() {
        return SeverityResult {
            final_severity: 0,
            curb65_score: curb65,
            risk_level: RiskLevel::Low,
            interpretation: "NORMAL - No pneumonia detected".to_string(),
            recommendation: "No further action required. Patient shows no signs of pneumonia."
                .to_string(),
        };
    }

    let mut severity: u8 = match curb65 {
        0 | 1 => 2,
        2 => 5,
        _ => 8,
    };

    // Bacterial pneumonia carries a fixed +1 premium over viral
    if prediction.classification == Classification::BacterialPneumonia {
        severity = (severity + 1).min(10);
    }

    let final_severity = severity.min(10);
    let (risk_level, interpretation, recommendation) = severity_band(final_severity);

    SeverityResult {
        final_severity,
        curb65_score: curb65,
        risk_level,
        interpretation: interpretation.to_string(),
        recommendation: recommendation.to_string(),
    }
}

fn age_criterion(obs: &ClinicalObservations) -> bool {
    obs.age.map_or(false, |age| age >= 65)
}

fn respiratory_criterion(obs: &ClinicalObservations) -> bool {
    obs.respiratory_rate.map_or(false, |rate| rate >= 30)
}

/// Systolic < 90 mmHg or diastolic <= 60 mmHg; either known reading alone
/// can satisfy the criterion.
fn blood_pressure_criterion(obs: &ClinicalObservations) -> bool {
    obs.systolic_bp.map_or(false, |systolic| systolic < 90)
        || obs.diastolic_bp.map_or(false, |diastolic| diastolic <= 60)
}

fn urea_criterion(obs: &ClinicalObservations) -> bool {
    obs.urea.map_or(false, |urea| urea > 7.0)
}

/// Map a final severity to its risk band and wording.
///
/// Severity 0 is normally produced by the NORMAL early return with its
/// own wording; the 0 arm here keeps the band table complete.
fn severity_band(severity: u8) -> (RiskLevel, &'static str, &'static str) {
    match severity {
        0 => (
            RiskLevel::Low,
            "NORMAL - No pneumonia detected",
            "No further action required.",
        ),
        1..=3 => (
            RiskLevel::Low,
            "LOW SEVERITY - Outpatient management recommended",
            "Patient may be managed as outpatient with close monitoring. Consider follow-up in 24-48 hours.",
        ),
        4..=6 => (
            RiskLevel::Moderate,
            "MODERATE SEVERITY - Hospital admission recommended",
            "Hospital admission is recommended for close monitoring and treatment. Consider IV antibiotics if bacterial.",
        ),
        _ => (
            RiskLevel::High,
            "HIGH SEVERITY - ICU consideration recommended",
            "Immediate hospital admission and ICU consideration. High risk of complications. Initiate aggressive treatment protocol.",
        ),
    }
}
