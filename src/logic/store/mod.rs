//! Store Module - In-Memory Mock Data Source
//!
//! Stand-in for the appliance backend. Fabricates a fixed dataset at
//! construction (an explicit object, injected where needed - no ambient
//! statics) and serves filtered, paginated reads plus the two mutable
//! record fields. Ordering is most-recent-timestamp-first.

pub mod metrics;
pub mod seed;


use std::collections::HashMap;

use parking_lot::RwLock;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::error::{ConsoleError, ConsoleResult};
use crate::logic::filter::{self, FilterCriteria};
use crate::logic::records::{LogRecord, Severity};

pub use metrics::MetricsFeed;

// ============================================================================
// PAGE
// ============================================================================

/// One page of records after server-side filtering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    pub records: Vec<LogRecord>,
    /// Count of the full dataset after filtering, not the raw count.
    pub total: usize,
}

/// Active-threat counts by severity. Innocuous records are excluded the
/// moment they are marked, with no refetch required.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreatCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl ThreatCounts {
    pub fn total(&self) -> usize {
        self.high + self.medium + self.low
    }
}

// ============================================================================
// LOG STORE
// ============================================================================

pub struct LogStore {
    records: RwLock<Vec<LogRecord>>,
}

impl LogStore {
    /// Store over a fabricated dataset of `size` records.
    pub fn with_mock_data(size: usize) -> Self {
        Self::from_records(seed::generate(size, &mut StdRng::from_entropy()))
    }

    /// Deterministic dataset for tests and demos.
    pub fn with_seeded_data(size: usize, seed: u64) -> Self {
        Self::from_records(seed::generate(size, &mut StdRng::seed_from_u64(seed)))
    }

    /// Store over caller-provided records, sorted most-recent-first.
    pub fn from_records(mut records: Vec<LogRecord>) -> Self {
        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        log::info!("log store ready ({} records)", records.len());
        Self {
            records: RwLock::new(records),
        }
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    pub fn get(&self, id: &str) -> Option<LogRecord> {
        self.records.read().iter().find(|r| r.id == id).cloned()
    }

    /// Full dataset, most-recent-first.
    pub fn snapshot(&self) -> Vec<LogRecord> {
        self.records.read().clone()
    }

    /// Filter first, then paginate, so `total` matches the filtered
    /// count. `page` is 1-based; page and page_size are clamped to at
    /// least 1 rather than rejected.
    pub fn fetch_page(&self, page: usize, page_size: usize, criteria: &FilterCriteria) -> Page {
        let page = page.max(1);
        let page_size = page_size.max(1);

        let records = self.records.read();
        let filtered = filter::apply(&records, criteria);
        let total = filtered.len();

        let start = (page - 1).saturating_mul(page_size);
        let records = filtered.into_iter().skip(start).take(page_size).collect();
        Page { records, total }
    }

    /// Operator triage: suppress (or restore) a record in active-threat
    /// views. Idempotent; setting the same value twice changes nothing.
    pub fn set_innocuous(&self, id: &str, value: bool) -> ConsoleResult<LogRecord> {
        let mut records = self.records.write();
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| ConsoleError::NotFound(id.to_string()))?;

        if record.is_innocuous != value {
            record.is_innocuous = value;
            log::info!(
                "record {} marked {}",
                id,
                if value { "innocuous" } else { "active threat" }
            );
        }
        Ok(record.clone())
    }

    /// Commit a batch of annotations all-or-nothing: every id must
    /// still be present or nothing is written.
    pub fn apply_annotations(&self, annotations: &HashMap<String, String>) -> ConsoleResult<usize> {
        let mut records = self.records.write();

        for id in annotations.keys() {
            if !records.iter().any(|r| r.id == *id) {
                return Err(ConsoleError::NotFound(id.clone()));
            }
        }
        for record in records.iter_mut() {
            if let Some(text) = annotations.get(&record.id) {
                record.ai_analysis = Some(text.clone());
            }
        }
        Ok(annotations.len())
    }

    /// Records still counting as active threats, bucketed by severity.
    pub fn threat_counts(&self) -> ThreatCounts {
        let records = self.records.read();
        let mut counts = ThreatCounts::default();
        for record in records.iter().filter(|r| r.is_active_threat()) {
            match record.severity {
                Severity::High => counts.high += 1,
                Severity::Medium => counts.medium += 1,
                Severity::Low => counts.low += 1,
            }
        }
        counts
    }

    /// Distinct categories present in the dataset, sorted. Feeds the
    /// category filter dropdown.
    pub fn categories(&self) -> Vec<String> {
        let records = self.records.read();
        let mut categories: Vec<String> = records.iter().map(|r| r.category.clone()).collect();
        categories.sort();
        categories.dedup();
        categories
    }
}
