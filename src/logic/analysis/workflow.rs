//! Analysis Workflow State Machine
//!
//! One analysis run at a time per table view. `begin` issues a ticket
//! and moves to `Analyzing`; the owning view calls the collaborator and
//! settles the ticket with `commit` or `fail`. `cancel` bumps the epoch
//! so a result that arrives later is discarded instead of overwriting
//! newer state.

use chrono::Utc;
use uuid::Uuid;

use crate::logic::records::LogRecord;

use super::types::{BatchTicket, WorkflowState};

#[derive(Debug)]
pub struct AnalysisWorkflow {
    state: WorkflowState,
    epoch: u64,
    last_batch: Option<Uuid>,
}

impl AnalysisWorkflow {
    pub fn new() -> Self {
        Self {
            state: WorkflowState::Idle,
            epoch: 0,
            last_batch: None,
        }
    }

    pub fn state(&self) -> WorkflowState {
        self.state
    }

    pub fn is_analyzing(&self) -> bool {
        self.state == WorkflowState::Analyzing
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Id of the most recently started batch, if any.
    pub fn last_batch(&self) -> Option<Uuid> {
        self.last_batch
    }

    /// Start a run for `records`. Guarded no-op (`None`) when the batch
    /// is empty or another run is already in flight; a second start is
    /// rejected rather than queued.
    pub fn begin(&mut self, records: Vec<LogRecord>) -> Option<BatchTicket> {
        if records.is_empty() {
            log::debug!("analysis start ignored: empty batch");
            return None;
        }
        if self.is_analyzing() {
            log::warn!("analysis start rejected: a batch is already in flight");
            return None;
        }

        let ticket = BatchTicket {
            batch_id: Uuid::new_v4(),
            epoch: self.epoch,
            records,
            started_at: Utc::now(),
        };
        self.state = WorkflowState::Analyzing;
        self.last_batch = Some(ticket.batch_id);
        log::info!(
            "analysis batch {} started ({} records)",
            ticket.batch_id,
            ticket.len()
        );
        Some(ticket)
    }

    /// True while `ticket` still belongs to the current epoch.
    pub fn is_current(&self, ticket: &BatchTicket) -> bool {
        ticket.epoch == self.epoch
    }

    /// Settle a successful run. Returns false when the ticket went
    /// stale (the view cancelled mid-flight) and the caller must
    /// discard the result.
    pub fn commit(&mut self, ticket: &BatchTicket) -> bool {
        if !self.is_current(ticket) {
            log::warn!("analysis batch {} discarded: stale epoch", ticket.batch_id);
            return false;
        }
        self.state = WorkflowState::Complete;
        log::info!("analysis batch {} complete", ticket.batch_id);
        true
    }

    /// Settle a failed or timed-out run: back to `Idle` so the operator
    /// can retry. The selection is left untouched by the caller.
    pub fn fail(&mut self, ticket: &BatchTicket) {
        if self.is_current(ticket) {
            self.state = WorkflowState::Idle;
        }
    }

    /// Abandon any in-flight run; its late result will fail the epoch
    /// check and be discarded.
    pub fn cancel(&mut self) {
        self.epoch += 1;
        self.state = WorkflowState::Idle;
    }
}

impl Default for AnalysisWorkflow {
    fn default() -> Self {
        Self::new()
    }
}
