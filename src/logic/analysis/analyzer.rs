//! Analysis Collaborator
//!
//! `Analyzer` is the seam to the real assessment service. The shipped
//! `MockAnalyzer` renders the same prompt the production service would
//! send, then answers it with fabricated verdicts after a simulated
//! round trip.

use std::future::Future;
use std::time::Duration;

use rand::Rng;

use crate::error::ConsoleResult;
use crate::logic::records::LogRecord;

use super::types::AnnotationMap;

/// Prompt rendered per record before the (mocked) model call.
const ANALYSIS_PROMPT: &str = "As a firewall security expert, analyze the following log entry:\n\
\n\
[CATEGORY]: {category}\n\
[SEVERITY]: {severity}\n\
[SOURCE]: {source}\n\
[MESSAGE]: {message}\n\
\n\
Assess whether this is a genuine security concern or a benign event, explain the \
reasoning, recommend actions if any are needed, and state whether this type of \
event can safely be marked as innocuous for future occurrences.";

/// Produces human-readable assessment text for a batch of records.
pub trait Analyzer: Send + Sync {
    /// Return one assessment per record id. Implementations must cover
    /// every record they are given or fail the whole batch; partial
    /// results are treated as a failure by the caller.
    fn analyze(
        &self,
        records: &[LogRecord],
    ) -> impl Future<Output = ConsoleResult<AnnotationMap>> + Send;
}

// ============================================================================
// MOCK ANALYZER
// ============================================================================

/// Stubbed collaborator with a configurable simulated round trip.
#[derive(Debug, Clone)]
pub struct MockAnalyzer {
    /// Simulated latency for the whole batch.
    pub latency: Duration,
}

impl MockAnalyzer {
    pub fn new() -> Self {
        Self {
            latency: Duration::from_millis(200),
        }
    }

    pub fn with_latency(latency: Duration) -> Self {
        Self { latency }
    }

    fn render_prompt(record: &LogRecord) -> String {
        ANALYSIS_PROMPT
            .replacen("{category}", &record.category, 1)
            .replacen("{severity}", record.severity.as_str(), 1)
            .replacen("{source}", &record.source, 1)
            .replacen("{message}", &record.message, 1)
    }

    fn fabricate(record: &LogRecord) -> String {
        let mut rng = rand::thread_rng();
        let verdict = if rng.gen_bool(0.5) {
            "benign"
        } else {
            "potentially concerning"
        };
        let recommendation = if rng.gen_bool(0.5) {
            "Safe to mark as innocuous."
        } else {
            "Monitor for pattern changes."
        };
        format!(
            "Analysis: This appears to be a {verdict} {} event. Common pattern in \
             firewall logs. Recommendation: {recommendation}",
            record.severity
        )
    }
}

impl Default for MockAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer for MockAnalyzer {
    fn analyze(
        &self,
        records: &[LogRecord],
    ) -> impl Future<Output = ConsoleResult<AnnotationMap>> + Send {
        let latency = self.latency;
        async move {
            tokio::time::sleep(latency).await;

            let mut results = AnnotationMap::with_capacity(records.len());
            for record in records {
                let prompt = Self::render_prompt(record);
                log::debug!(
                    "analysis prompt for record {} ({} chars)",
                    record.id,
                    prompt.len()
                );
                results.insert(record.id.clone(), Self::fabricate(record));
            }
            Ok(results)
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::records::Severity;
    use chrono::Utc;

    #[test]
    fn test_prompt_rendering() {
        let record = LogRecord::new(
            "1",
            Utc::now(),
            Severity::High,
            "Attack",
            "DDoS attack signature matched",
            "192.168.3.9",
        );
        let prompt = MockAnalyzer::render_prompt(&record);

        assert!(prompt.contains("[CATEGORY]: Attack"));
        assert!(prompt.contains("[SEVERITY]: high"));
        assert!(prompt.contains("[SOURCE]: 192.168.3.9"));
        assert!(prompt.contains("[MESSAGE]: DDoS attack signature matched"));
        assert!(!prompt.contains("{category}"));
    }

    #[test]
    fn test_fabricated_assessment_shape() {
        let record = LogRecord::new(
            "1",
            Utc::now(),
            Severity::Medium,
            "Network",
            "Unusual outbound traffic pattern detected",
            "192.168.7.7",
        );
        let text = MockAnalyzer::fabricate(&record);

        assert!(text.starts_with("Analysis:"));
        assert!(text.contains("medium"));
        assert!(text.contains("Recommendation:"));
    }
}
