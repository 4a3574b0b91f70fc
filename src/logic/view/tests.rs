use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use super::LogView;
use crate::config::ConsoleConfig;
use crate::error::{ConsoleError, ConsoleResult};
use crate::logic::analysis::{Analyzer, AnnotationMap, ChatEntry, MockAnalyzer, WorkflowState};
use crate::logic::filter::FilterCriteria;
use crate::logic::records::{LogRecord, Severity};
use crate::logic::store::LogStore;

fn fixed_store() -> Arc<LogStore> {
    let now = Utc::now();
    Arc::new(LogStore::from_records(vec![
        LogRecord::new(
            "1",
            now,
            Severity::High,
            "Attack",
            "Potential SQL injection attack detected",
            "192.168.4.17",
        ),
        LogRecord::new(
            "2",
            now - chrono::Duration::minutes(10),
            Severity::Low,
            "System",
            "User authentication successful",
            "192.168.0.1",
        ),
        LogRecord::new(
            "3",
            now - chrono::Duration::hours(2),
            Severity::Medium,
            "Network",
            "Unusual outbound traffic pattern detected",
            "192.168.9.44",
        ),
    ]))
}

fn fast_mock_view() -> LogView<MockAnalyzer> {
    LogView::new(
        fixed_store(),
        MockAnalyzer::with_latency(Duration::from_millis(1)),
        ConsoleConfig::default(),
    )
}

/// Never answers within any reasonable deadline.
struct StallingAnalyzer;

impl Analyzer for StallingAnalyzer {
    fn analyze(
        &self,
        _records: &[LogRecord],
    ) -> impl Future<Output = ConsoleResult<AnnotationMap>> + Send {
        async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(AnnotationMap::new())
        }
    }
}

/// Fails its first invocation, succeeds afterwards.
struct FlakyAnalyzer {
    tripped: AtomicBool,
}

impl FlakyAnalyzer {
    fn new() -> Self {
        Self {
            tripped: AtomicBool::new(false),
        }
    }
}

impl Analyzer for FlakyAnalyzer {
    fn analyze(
        &self,
        records: &[LogRecord],
    ) -> impl Future<Output = ConsoleResult<AnnotationMap>> + Send {
        let first = !self.tripped.swap(true, Ordering::SeqCst);
        let annotations: AnnotationMap = records
            .iter()
            .map(|r| (r.id.clone(), format!("Analysis: record {} reviewed.", r.id)))
            .collect();
        async move {
            if first {
                Err(ConsoleError::Analysis("upstream unavailable".to_string()))
            } else {
                Ok(annotations)
            }
        }
    }
}

/// Drops the last record from its answer.
struct PartialAnalyzer;

impl Analyzer for PartialAnalyzer {
    fn analyze(
        &self,
        records: &[LogRecord],
    ) -> impl Future<Output = ConsoleResult<AnnotationMap>> + Send {
        let annotations: AnnotationMap = records
            .iter()
            .take(records.len().saturating_sub(1))
            .map(|r| (r.id.clone(), "Analysis: partial.".to_string()))
            .collect();
        async move { Ok(annotations) }
    }
}

#[tokio::test]
async fn test_analyze_selected_annotates_and_clears_selection() {
    let mut view = fast_mock_view();
    view.toggle("1");
    view.toggle("3");

    let written = view.analyze_selected().await.unwrap();

    assert_eq!(written, 2);
    assert_eq!(view.workflow_state(), WorkflowState::Complete);
    assert!(view.selection().is_empty());

    let visible = view.visible();
    let annotated = |id: &str| {
        visible
            .iter()
            .find(|r| r.id == id)
            .and_then(|r| r.ai_analysis.clone())
    };
    assert!(annotated("1").is_some());
    assert!(annotated("3").is_some());
    assert!(annotated("2").is_none());

    // The transcript opens on the batch, one log entry per record.
    assert!(view.transcript().is_open());
    assert_eq!(view.transcript().entries().len(), 2);
    assert!(matches!(
        &view.transcript().entries()[0],
        ChatEntry::Log { analysis: Some(_), .. }
    ));

    let answer = view.ask("Should I block this source?").expect("answer");
    assert!(answer.contains("simulated"));
}

#[tokio::test]
async fn test_analyze_with_empty_selection_is_noop() {
    let mut view = fast_mock_view();

    let written = view.analyze_selected().await.unwrap();

    assert_eq!(written, 0);
    assert_eq!(view.workflow_state(), WorkflowState::Idle);
    assert!(!view.transcript().is_open());
}

#[tokio::test]
async fn test_timeout_leaves_selection_and_records_untouched() {
    let config = ConsoleConfig {
        analysis_timeout: Duration::from_millis(50),
        ..ConsoleConfig::default()
    };
    let mut view = LogView::new(fixed_store(), StallingAnalyzer, config);
    view.toggle("1");

    let err = view.analyze_selected().await.unwrap_err();

    assert!(matches!(err, ConsoleError::AnalysisTimeout(_)));
    assert!(err.is_retryable());
    assert_eq!(view.workflow_state(), WorkflowState::Idle);
    // The operator retries with the same selection; nothing was written.
    assert_eq!(view.selection().size(), 1);
    assert!(view.visible().iter().all(|r| r.ai_analysis.is_none()));
}

#[tokio::test]
async fn test_failed_run_preserves_selection_for_retry() {
    let mut view = LogView::new(fixed_store(), FlakyAnalyzer::new(), ConsoleConfig::default());
    view.toggle("1");
    view.toggle("2");

    let err = view.analyze_selected().await.unwrap_err();
    assert!(matches!(err, ConsoleError::Analysis(_)));
    assert!(err.is_retryable());
    assert_eq!(view.selection().size(), 2);
    assert_eq!(view.workflow_state(), WorkflowState::Idle);

    // Same selection, second attempt goes through.
    let written = view.analyze_selected().await.unwrap();
    assert_eq!(written, 2);
    assert!(view.selection().is_empty());
    assert_eq!(view.workflow_state(), WorkflowState::Complete);
}

#[tokio::test]
async fn test_partial_result_fails_the_whole_batch() {
    let mut view = LogView::new(fixed_store(), PartialAnalyzer, ConsoleConfig::default());
    view.toggle("1");
    view.toggle("2");

    let err = view.analyze_selected().await.unwrap_err();

    assert!(matches!(err, ConsoleError::Analysis(_)));
    assert_eq!(view.workflow_state(), WorkflowState::Idle);
    // All-or-nothing: the covered record was not written either.
    assert!(view.visible().iter().all(|r| r.ai_analysis.is_none()));
}

#[tokio::test]
async fn test_analysis_batch_is_the_visible_selection() {
    let mut view = fast_mock_view();
    view.select_all_visible();
    assert_eq!(view.selection().size(), 3);

    // Narrowing the filter hides two records but keeps their ids
    // selected; the batch only covers what the operator can see.
    view.set_criteria(FilterCriteria::default().with_severity(Severity::High));
    assert_eq!(view.selection().size(), 3);
    assert_eq!(view.selected_visible_records().len(), 1);

    let written = view.analyze_selected().await.unwrap();
    assert_eq!(written, 1);
}

#[test]
fn test_toggle_unknown_id_is_ignored() {
    let mut view = fast_mock_view();

    view.toggle("999");

    assert!(view.selection().is_empty());
}

#[test]
fn test_clear_filters_restores_the_default_window() {
    let mut view = fast_mock_view();
    view.search("sql");
    assert_eq!(view.visible().len(), 1);

    view.clear_filters();

    assert_eq!(view.visible().len(), 3);
    assert!(view.criteria().search_term.is_none());
}

#[test]
fn test_mark_innocuous_updates_threat_count_immediately() {
    let mut view = fast_mock_view();
    assert_eq!(view.active_threat_count(), 3);

    view.mark_innocuous("1");
    assert_eq!(view.active_threat_count(), 2);

    // Unknown ids are a logged no-op.
    view.mark_innocuous("999");
    assert_eq!(view.active_threat_count(), 2);

    view.set_innocuous("1", false);
    assert_eq!(view.active_threat_count(), 3);
}
