//! # Pneumotriage
//!
//! Pneumonia severity scoring with a persisted triage worklist.
//!
//! This crate provides:
//! - CURB-65 clinical scoring from manually entered observations
//! - A combined 0-10 severity from the clinical score plus an external
//!   chest X-ray classification
//! - A priority-ordered patient worklist that survives restarts
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core business types and the scoring engine
//! - `ports`: Trait definitions for external operations
//! - `adapters`: Concrete storage backends (in-memory, file, SQLite)
//! - `application`: Use cases orchestrating domain and ports

pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;

pub use application::{QueueStatistics, TriageService};
pub use domain::{
    combined_severity, curb65_breakdown, curb65_score, ClassProbabilities, Classification,
    ClassifierResult, ClinicalObservations, CriterionScore, PatientDraft, PatientRecord,
    PatientStatus, RiskLevel, SeverityResult,
};

/// Result type for triage operations
pub type Result<T> = std::result::Result<T, TriageError>;

/// Main error type for the crate
#[derive(Debug, thiserror::Error)]
pub enum TriageError {
    #[error("Storage operation failed: {0}")]
    Storage(#[from] adapters::StorageError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
