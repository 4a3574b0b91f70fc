//! View Module - Log Table Session
//!
//! Single-writer owner of one log table: the active filter criteria,
//! the selection, the analysis workflow and the chat transcript all
//! live here and are only mutated through `&mut self`. Reads go to the
//! shared store; the view itself holds no record data.

#[cfg(test)]
mod tests;

use std::collections::HashSet;
use std::sync::Arc;

use tokio::time::timeout;

use crate::config::ConsoleConfig;
use crate::error::{ConsoleError, ConsoleResult};
use crate::logic::analysis::{AnalysisWorkflow, Analyzer, ChatTranscript, WorkflowState};
use crate::logic::filter::{self, FilterCriteria, TimeRange};
use crate::logic::records::LogRecord;
use crate::logic::selection::SelectionSet;
use crate::logic::store::{LogStore, Page};

pub struct LogView<A: Analyzer> {
    store: Arc<LogStore>,
    analyzer: A,
    config: ConsoleConfig,
    criteria: FilterCriteria,
    selection: SelectionSet,
    workflow: AnalysisWorkflow,
    transcript: ChatTranscript,
}

impl<A: Analyzer> LogView<A> {
    /// A freshly mounted view starts on the trailing 24 hours with an
    /// empty selection.
    pub fn new(store: Arc<LogStore>, analyzer: A, config: ConsoleConfig) -> Self {
        Self {
            store,
            analyzer,
            config,
            criteria: FilterCriteria::default().with_time_range(TimeRange::Last24Hours),
            selection: SelectionSet::new(),
            workflow: AnalysisWorkflow::new(),
            transcript: ChatTranscript::new(),
        }
    }

    // ========================================================================
    // FILTERING
    // ========================================================================

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Replace the filter wholesale. Views configured to prune drop the
    /// ids the new filter hides; the default keeps them selected.
    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
        if !self.config.retain_hidden_selection {
            let visible: HashSet<String> =
                self.visible().into_iter().map(|r| r.id).collect();
            self.selection.retain_visible(&visible);
        }
    }

    pub fn search(&mut self, term: &str) {
        let criteria = self.criteria.clone().with_search(term);
        self.set_criteria(criteria);
    }

    /// Back to the mount-time defaults.
    pub fn clear_filters(&mut self) {
        self.set_criteria(FilterCriteria::default().with_time_range(TimeRange::Last24Hours));
    }

    /// Every record the active filter admits, most-recent-first.
    pub fn visible(&self) -> Vec<LogRecord> {
        filter::apply(&self.store.snapshot(), &self.criteria)
    }

    /// One table page under the active filter. `page` is 1-based.
    pub fn page(&self, page: usize) -> Page {
        self.store
            .fetch_page(page, self.config.page_size, &self.criteria)
    }

    // ========================================================================
    // SELECTION
    // ========================================================================

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Toggle one record in and out of the selection. An unknown id is
    /// logged and ignored rather than surfaced.
    pub fn toggle(&mut self, id: &str) {
        if self.store.get(id).is_none() {
            log::warn!("toggle ignored: record {} not found", id);
            return;
        }
        self.selection.toggle(id);
    }

    pub fn select_all_visible(&mut self) {
        let ids: Vec<String> = self.visible().into_iter().map(|r| r.id).collect();
        self.selection.select_all(ids);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Selected records the filter currently shows, in view order. This
    /// is the batch every bulk operation runs against.
    pub fn selected_visible_records(&self) -> Vec<LogRecord> {
        self.visible()
            .into_iter()
            .filter(|r| self.selection.has(&r.id))
            .collect()
    }

    // ========================================================================
    // ANALYSIS
    // ========================================================================

    pub fn workflow_state(&self) -> WorkflowState {
        self.workflow.state()
    }

    pub fn transcript(&self) -> &ChatTranscript {
        &self.transcript
    }

    /// Run the analysis collaborator over the visible selection and
    /// commit the annotations as one batch.
    ///
    /// Returns the number of records annotated; 0 when nothing was
    /// selected or another run is in flight. On timeout or collaborator
    /// failure the workflow returns to idle with the selection intact,
    /// and no record is touched.
    pub async fn analyze_selected(&mut self) -> ConsoleResult<usize> {
        let ticket = match self.workflow.begin(self.selected_visible_records()) {
            Some(ticket) => ticket,
            None => return Ok(0),
        };

        let outcome = timeout(
            self.config.analysis_timeout,
            self.analyzer.analyze(&ticket.records),
        )
        .await;

        let annotations = match outcome {
            Err(_) => {
                self.workflow.fail(&ticket);
                return Err(ConsoleError::AnalysisTimeout(self.config.analysis_timeout));
            }
            Ok(Err(err)) => {
                self.workflow.fail(&ticket);
                return Err(err);
            }
            Ok(Ok(annotations)) => annotations,
        };

        // A partial result fails the whole batch.
        for id in ticket.ids() {
            if !annotations.contains_key(id) {
                self.workflow.fail(&ticket);
                return Err(ConsoleError::Analysis(format!(
                    "no assessment returned for record {id}"
                )));
            }
        }

        if !self.workflow.commit(&ticket) {
            // Cancelled mid-flight; the late result is dropped.
            return Ok(0);
        }
        let written = self.store.apply_annotations(&annotations)?;

        let analyzed: Vec<LogRecord> = ticket
            .ids()
            .filter_map(|id| self.store.get(id))
            .collect();
        self.transcript.open_batch(ticket.batch_id, &analyzed);

        if self.config.clear_selection_on_complete {
            self.selection.clear();
        }
        Ok(written)
    }

    /// Abandon the in-flight run, if any. Its result will be discarded
    /// when it arrives.
    pub fn cancel_analysis(&mut self) {
        self.workflow.cancel();
    }

    /// Operator question into the transcript panel. None while no batch
    /// is open or the question is blank.
    pub fn ask(&mut self, question: &str) -> Option<String> {
        if !self.transcript.is_open() {
            return None;
        }
        self.transcript.ask(question)
    }

    // ========================================================================
    // TRIAGE
    // ========================================================================

    /// Mark a record innocuous (or restore it). An unknown id is logged
    /// and ignored; the table is simply left as-is.
    pub fn set_innocuous(&mut self, id: &str, value: bool) {
        if let Err(err) = self.store.set_innocuous(id, value) {
            log::warn!("mark-safe ignored: {}", err);
        }
    }

    pub fn mark_innocuous(&mut self, id: &str) {
        self.set_innocuous(id, true);
    }

    /// Records still counted as threats, dataset-wide. Updates the
    /// moment a record is marked, no refetch involved.
    pub fn active_threat_count(&self) -> usize {
        self.store.threat_counts().total()
    }
}
