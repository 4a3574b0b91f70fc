//! ShieldView Console - Demo Entry Point
//!
//! Drives one console session against the fabricated dataset: filter
//! the table to high-severity events, select them, run analysis and
//! report the outcome.

use std::sync::Arc;

use shieldview_core::logic::analysis::MockAnalyzer;
use shieldview_core::logic::filter::FilterCriteria;
use shieldview_core::logic::records::Severity;
use shieldview_core::logic::store::{LogStore, MetricsFeed};
use shieldview_core::logic::view::LogView;
use shieldview_core::ConsoleConfig;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ConsoleConfig::from_env();
    let store = Arc::new(LogStore::with_mock_data(config.dataset_size));
    let metrics = MetricsFeed::new();
    let mut view = LogView::new(Arc::clone(&store), MockAnalyzer::new(), config);

    let counts = store.threat_counts();
    log::info!(
        "active threats: {} total ({} high / {} medium / {} low)",
        counts.total(),
        counts.high,
        counts.medium,
        counts.low
    );
    log::info!(
        "threat dashboard: {} blocked in the last 24h",
        metrics.threat_metrics().total_threats_blocked
    );

    view.set_criteria(FilterCriteria::default().with_severity(Severity::High));
    let page = view.page(1);
    log::info!(
        "high severity view: {} records, showing {}",
        page.total,
        page.records.len()
    );
    for record in &page.records {
        log::info!(
            "  [{} {}] {} ({})",
            record.severity,
            record.severity.color(),
            record.message,
            record.source
        );
    }

    view.select_all_visible();
    log::info!("selected {} records for analysis", view.selection().size());

    match view.analyze_selected().await {
        Ok(written) => {
            log::info!("analysis complete: {} records annotated", written);
            if let Some(answer) = view.ask("Anything here worth escalating?") {
                log::info!("assistant: {}", answer);
            }
        }
        Err(err) if err.is_retryable() => {
            log::warn!("analysis did not finish, selection kept for retry: {}", err);
        }
        Err(err) => log::error!("analysis failed: {}", err),
    }
    log::info!("workflow state: {}", view.workflow_state());
}
