//! Workflow Types
//!
//! Core types for the analysis workflow. NO logic - just data
//! structures.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::logic::records::LogRecord;

/// Per-record assessment text keyed by record id.
pub type AnnotationMap = HashMap<String, String>;

// ============================================================================
// WORKFLOW STATE
// ============================================================================

/// Lifecycle of one analysis invocation. Re-entrant: a new invocation
/// always starts fresh for the records of its batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkflowState {
    /// No batch in flight.
    Idle,
    /// The collaborator is working on a batch.
    Analyzing,
    /// The last batch committed its annotations.
    Complete,
}

impl WorkflowState {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowState::Idle => "idle",
            WorkflowState::Analyzing => "analyzing",
            WorkflowState::Complete => "complete",
        }
    }
}

impl std::fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// BATCH TICKET
// ============================================================================

/// Handle for one in-flight batch, issued by `AnalysisWorkflow::begin`
/// and settled with `commit` or `fail`. The epoch ties the ticket to
/// the view state it was issued against; a ticket whose epoch has moved
/// on is stale and its result must be discarded.
#[derive(Debug, Clone)]
pub struct BatchTicket {
    pub batch_id: Uuid,
    pub epoch: u64,
    pub records: Vec<LogRecord>,
    pub started_at: DateTime<Utc>,
}

impl BatchTicket {
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
