//! Triage service: the persisted, priority-ordered worklist.
//!
//! This service coordinates:
//! - Identity and timestamp assignment for new patients
//! - Queue ordering (severity first, arrival second)
//! - Whole-queue persistence through the storage port
//! - Derived queue statistics for the desk
//!
//! Expected storage trouble (missing blob, corrupt blob, failed write,
//! unknown id) never surfaces as an error from the public operations.
//! The queue degrades to empty or the operation becomes a no-op, with
//! the cause logged.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::{PatientDraft, PatientRecord, PatientStatus, RiskLevel};
use crate::ports::KeyValueStore;
use crate::TriageError;

/// Fixed storage key the whole queue is persisted under.
pub const QUEUE_STORAGE_KEY: &str = "pneumonia_triage_queue";

/// Derived summary of the current queue.
///
/// Risk counts cover waiting patients only; a treated or discharged
/// patient no longer competes for attention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct QueueStatistics {
    /// All records in the queue
    pub total: usize,

    /// Records with `waiting` status
    pub waiting: usize,

    /// Records with `in-treatment` status
    pub in_treatment: usize,

    /// Records with `completed` status
    pub completed: usize,

    /// Waiting records at high risk
    pub high_risk: usize,

    /// Waiting records at moderate risk
    pub moderate_risk: usize,

    /// Waiting records at low risk
    pub low_risk: usize,

    /// Mean wait of waiting records in whole minutes, floored
    pub average_wait_minutes: u64,
}

/// Service maintaining the triage worklist over an injected backend.
///
/// The queue is persisted wholesale as a JSON array under
/// [`QUEUE_STORAGE_KEY`] on every mutation and re-sorted on every read,
/// so the persisted form never has to be trusted as pre-sorted.
///
/// Every mutation is a whole-collection read-modify-write. Concurrent
/// writers are last-write-wins at collection granularity, which is
/// acceptable for a single-desk deployment.
pub struct TriageService<S>
where
    S: KeyValueStore,
{
    storage: Arc<S>,
}

impl<S> TriageService<S>
where
    S: KeyValueStore,
    S::Error: Into<crate::adapters::StorageError>,
{
    /// Create a new triage service.
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    /// Queue a patient from a draft.
    ///
    /// Assigns identity, creation time and the initial `waiting`
    /// status, inserts the record in priority order and persists the
    /// queue. Returns the created record.
    pub fn add_patient(&self, draft: PatientDraft) -> PatientRecord {
        let record = PatientRecord::new(draft);

        let mut records = self.load_or_empty();
        records.push(record.clone());
        sort_queue(&mut records);
        self.persist_or_log(&records);

        tracing::info!(
            "Queued patient {} ({}, severity {}, {} risk)",
            record.id,
            record.prediction.classification,
            record.severity.final_severity,
            record.severity.risk_level
        );

        record
    }

    /// The current queue, highest severity first, earlier arrivals
    /// before later ones at equal severity.
    ///
    /// Unreadable or corrupt persisted state reads as an empty queue.
    #[must_use]
    pub fn queue(&self) -> Vec<PatientRecord> {
        let mut records = self.load_or_empty();
        sort_queue(&mut records);
        records
    }

    /// Set the status of the patient with the given id.
    ///
    /// Unknown ids are ignored so a stale worklist view cannot error
    /// out the desk.
    pub fn update_status(&self, id: &str, status: PatientStatus) {
        let mut records = self.load_or_empty();

        match records.iter_mut().find(|record| record.id == id) {
            Some(record) => {
                record.status = status;
                sort_queue(&mut records);
                self.persist_or_log(&records);
                tracing::info!("Patient {} moved to {}", id, status);
            }
            None => {
                tracing::debug!("Status update for unknown patient {} ignored", id);
            }
        }
    }

    /// Remove the patient with the given id, if present.
    pub fn remove_patient(&self, id: &str) {
        let mut records = self.load_or_empty();
        let before = records.len();
        records.retain(|record| record.id != id);

        if records.len() < before {
            tracing::info!("Removed patient {} from the queue", id);
        } else {
            tracing::debug!("Removal of unknown patient {} ignored", id);
        }

        sort_queue(&mut records);
        self.persist_or_log(&records);
    }

    /// Drop the entire queue.
    pub fn clear(&self) {
        match self.storage.delete(QUEUE_STORAGE_KEY) {
            Ok(()) => tracing::warn!("Cleared the triage queue"),
            Err(e) => {
                let e: crate::adapters::StorageError = e.into();
                tracing::warn!("Failed to clear the triage queue: {:?}", e);
            }
        }
    }

    /// Summary statistics over the current queue.
    #[must_use]
    pub fn statistics(&self) -> QueueStatistics {
        let records = self.queue();
        let now = chrono::Utc::now();

        let waiting: Vec<&PatientRecord> = records
            .iter()
            .filter(|record| record.status == PatientStatus::Waiting)
            .collect();

        let risk_count = |level: RiskLevel| {
            waiting
                .iter()
                .filter(|record| record.severity.risk_level == level)
                .count()
        };

        let average_wait_minutes = if waiting.is_empty() {
            0
        } else {
            let total_ms: i64 = waiting
                .iter()
                .map(|record| (now - record.created_at).num_milliseconds())
                .sum();
            (total_ms / (waiting.len() as i64 * 60_000)).max(0) as u64
        };

        QueueStatistics {
            total: records.len(),
            waiting: waiting.len(),
            in_treatment: records
                .iter()
                .filter(|record| record.status == PatientStatus::InTreatment)
                .count(),
            completed: records
                .iter()
                .filter(|record| record.status == PatientStatus::Completed)
                .count(),
            high_risk: risk_count(RiskLevel::High),
            moderate_risk: risk_count(RiskLevel::Moderate),
            low_risk: risk_count(RiskLevel::Low),
            average_wait_minutes,
        }
    }

    /// Load and deserialize the persisted queue.
    fn try_load(&self) -> Result<Vec<PatientRecord>, TriageError> {
        let blob = self
            .storage
            .get(QUEUE_STORAGE_KEY)
            .map_err(|e| TriageError::Storage(e.into()))?;

        match blob {
            Some(bytes) => Ok(serde_json::from_slice(&bytes)?),
            None => Ok(Vec::new()),
        }
    }

    /// Serialize and persist the queue.
    fn persist(&self, records: &[PatientRecord]) -> Result<(), TriageError> {
        let bytes = serde_json::to_vec(records)?;
        self.storage
            .set(QUEUE_STORAGE_KEY, &bytes)
            .map_err(|e| TriageError::Storage(e.into()))
    }

    /// Degraded load: unreadable or corrupt state becomes an empty queue.
    fn load_or_empty(&self) -> Vec<PatientRecord> {
        match self.try_load() {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!("Failed to load the triage queue, treating as empty: {:?}", e);
                Vec::new()
            }
        }
    }

    /// Degraded write: failures are logged and absorbed.
    fn persist_or_log(&self, records: &[PatientRecord]) {
        if let Err(e) = self.persist(records) {
            tracing::warn!("Failed to persist the triage queue: {:?}", e);
        }
    }
}

/// Sort by descending final severity, ties broken by earliest arrival.
fn sort_queue(records: &mut [PatientRecord]) {
    records.sort_by(|a, b| {
        b.severity
            .final_severity
            .cmp(&a.severity.final_severity)
            .then_with(|| a.created_at.cmp(&b.created_at))
    });
}
