//! Filter Module - Pure Predicates Over Log Records
//!
//! `apply` never re-sorts and never invents records: the result is a
//! subset of the input, in input order (the store already hands records
//! most-recent-first). Empty criteria return the input unchanged.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::logic::records::{LogRecord, Severity};

// ============================================================================
// TIME RANGE
// ============================================================================

/// Fixed set of time windows the console offers. The cutoff is computed
/// against "now" at filter-evaluation time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeRange {
    #[serde(rename = "1h")]
    LastHour,
    #[serde(rename = "24h")]
    Last24Hours,
    #[serde(rename = "7d")]
    Last7Days,
    #[serde(rename = "30d")]
    Last30Days,
    #[default]
    #[serde(rename = "all")]
    AllTime,
}

impl TimeRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::LastHour => "1h",
            TimeRange::Last24Hours => "24h",
            TimeRange::Last7Days => "7d",
            TimeRange::Last30Days => "30d",
            TimeRange::AllTime => "all",
        }
    }

    /// Lower bound for matching timestamps, relative to `now`.
    /// `AllTime` has no bound.
    pub fn cutoff(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            TimeRange::LastHour => Some(now - Duration::hours(1)),
            TimeRange::Last24Hours => Some(now - Duration::hours(24)),
            TimeRange::Last7Days => Some(now - Duration::days(7)),
            TimeRange::Last30Days => Some(now - Duration::days(30)),
            TimeRange::AllTime => None,
        }
    }
}

// ============================================================================
// FILTER CRITERIA
// ============================================================================

/// The active search/severity/category/time constraints narrowing the
/// visible record set. Replaced wholesale on every user change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_term: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub time_range: TimeRange,
}

impl FilterCriteria {
    /// True when no predicate constrains anything.
    pub fn is_empty(&self) -> bool {
        self.search_term.as_deref().map_or(true, str::is_empty)
            && self.severity.is_none()
            && self.category.is_none()
            && self.time_range == TimeRange::AllTime
    }

    // Builder pattern methods
    pub fn with_search(mut self, term: &str) -> Self {
        self.search_term = if term.is_empty() {
            None
        } else {
            Some(term.to_string())
        };
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }

    pub fn with_time_range(mut self, time_range: TimeRange) -> Self {
        self.time_range = time_range;
        self
    }
}

// ============================================================================
// FILTER ENGINE
// ============================================================================

/// True when `record` satisfies every predicate in `criteria` (logical AND).
pub fn matches(record: &LogRecord, criteria: &FilterCriteria, now: DateTime<Utc>) -> bool {
    if let Some(term) = criteria.search_term.as_deref() {
        if !term.is_empty() {
            let needle = term.to_lowercase();
            let hit = record.message.to_lowercase().contains(&needle)
                || record.category.to_lowercase().contains(&needle)
                || record.source.to_lowercase().contains(&needle);
            if !hit {
                return false;
            }
        }
    }

    if let Some(severity) = criteria.severity {
        if record.severity != severity {
            return false;
        }
    }

    if let Some(category) = criteria.category.as_deref() {
        if record.category != category {
            return false;
        }
    }

    if let Some(cutoff) = criteria.time_range.cutoff(now) {
        if record.timestamp < cutoff {
            return false;
        }
    }

    true
}

/// Filter `records` down to the subset matching `criteria`, preserving
/// input order. Pure; safe to call repeatedly.
pub fn apply(records: &[LogRecord], criteria: &FilterCriteria) -> Vec<LogRecord> {
    apply_at(records, criteria, Utc::now())
}

/// `apply` with an explicit evaluation instant, so repeated calls with
/// the same instant are idempotent.
pub fn apply_at(
    records: &[LogRecord],
    criteria: &FilterCriteria,
    now: DateTime<Utc>,
) -> Vec<LogRecord> {
    if criteria.is_empty() {
        return records.to_vec();
    }
    records
        .iter()
        .filter(|r| matches(r, criteria, now))
        .cloned()
        .collect()
}

/// Index-based variant for callers that keep the backing slice around.
pub fn apply_indices(
    records: &[LogRecord],
    criteria: &FilterCriteria,
    now: DateTime<Utc>,
) -> Vec<usize> {
    records
        .iter()
        .enumerate()
        .filter(|(_, r)| matches(r, criteria, now))
        .map(|(i, _)| i)
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================
