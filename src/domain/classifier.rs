//! Imaging classifier output types.
//!
//! The chest X-ray classifier is an external service; this crate only
//! consumes its result. The shapes here mirror the service payload
//! (SCREAMING_SNAKE_CASE labels), with unknown fields ignored so the
//! full response deserializes directly.

use serde::{Deserialize, Serialize};

/// Classification label assigned by the imaging model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Classification {
    /// No radiographic signs of pneumonia
    Normal,
    /// Bacterial pneumonia pattern
    BacterialPneumonia,
    /// Viral pneumonia pattern
    ViralPneumonia,
}

impl Classification {
    /// Whether this label indicates pneumonia of either kind.
    #[must_use]
    pub fn is_pneumonia(&self) -> bool {
        !matches!(self, Self::Normal)
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::BacterialPneumonia => write!(f, "BACTERIAL_PNEUMONIA"),
            Self::ViralPneumonia => write!(f, "VIRAL_PNEUMONIA"),
        }
    }
}

/// Softmax probability for each of the three labels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct ClassProbabilities {
    pub normal: f64,
    pub bacterial_pneumonia: f64,
    pub viral_pneumonia: f64,
}

/// Result returned by the external prediction service.
///
/// Immutable input to the severity engine. Only the classification label
/// feeds the severity formula; confidence and the probability map are
/// informational and stored as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierResult {
    /// Predicted label
    pub classification: Classification,

    /// Confidence in the predicted label, in [0, 1]
    pub confidence: f64,

    /// Probability distribution over the three labels. The service
    /// reports this as `adjusted_probabilities`; both spellings are
    /// accepted on input.
    #[serde(alias = "adjusted_probabilities")]
    pub probabilities: ClassProbabilities,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_wire_spelling() {
        let json = serde_json::to_string(&Classification::BacterialPneumonia).expect("Should serialize");
        assert_eq!(json, "\"BACTERIAL_PNEUMONIA\"");

        let label: Classification =
            serde_json::from_str("\"VIRAL_PNEUMONIA\"").expect("Should parse");
        assert_eq!(label, Classification::ViralPneumonia);
    }

    #[test]
    fn test_is_pneumonia() {
        assert!(!Classification::Normal.is_pneumonia());
        assert!(Classification::BacterialPneumonia.is_pneumonia());
        assert!(Classification::ViralPneumonia.is_pneumonia());
    }

    #[test]
    fn test_service_payload_deserializes() {
        // Shape of the real /predict response, extra fields included.
        let payload = r#"{
            "classification": "BACTERIAL_PNEUMONIA",
            "confidence": 0.87,
            "raw_probabilities": {"NORMAL": 0.10, "BACTERIAL_PNEUMONIA": 0.75, "VIRAL_PNEUMONIA": 0.15},
            "adjusted_probabilities": {"NORMAL": 0.08, "BACTERIAL_PNEUMONIA": 0.87, "VIRAL_PNEUMONIA": 0.05},
            "base_severity": 7,
            "class_index": 1,
            "thresholded": false,
            "smart_thresholding_applied": true,
            "pneumonia_min_confidence": 0.65
        }"#;

        let result: ClassifierResult = serde_json::from_str(payload).expect("Should parse");
        assert_eq!(result.classification, Classification::BacterialPneumonia);
        assert!((result.confidence - 0.87).abs() < f64::EPSILON);
        assert!((result.probabilities.bacterial_pneumonia - 0.87).abs() < f64::EPSILON);
    }

    #[test]
    fn test_round_trip() {
        let result = ClassifierResult {
            classification: Classification::Normal,
            confidence: 0.93,
            probabilities: ClassProbabilities {
                normal: 0.93,
                bacterial_pneumonia: 0.04,
                viral_pneumonia: 0.03,
            },
        };

        let json = serde_json::to_string(&result).expect("Should serialize");
        let back: ClassifierResult = serde_json::from_str(&json).expect("Should parse");
        assert_eq!(back, result);
    }
}
