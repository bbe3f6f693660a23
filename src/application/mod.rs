//! Application layer: use cases and services.
//!
//! This module orchestrates domain logic with ports to implement
//! the triage worklist use cases.

mod triage;

pub use triage::{QueueStatistics, TriageService, QUEUE_STORAGE_KEY};
