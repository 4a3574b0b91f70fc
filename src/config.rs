//! Configuration module

use std::env;
use std::time::Duration;

/// Console configuration
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// Records per table page
    pub page_size: usize,

    /// Size of the fabricated mock dataset
    pub dataset_size: usize,

    /// Upper bound on one analysis round trip
    pub analysis_timeout: Duration,

    /// Clear the selection when a batch completes (it is always kept on failure)
    pub clear_selection_on_complete: bool,

    /// Keep ids selected while a filter change hides them from view
    pub retain_hidden_selection: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            page_size: 10,
            dataset_size: 100,
            analysis_timeout: Duration::from_secs(10),
            clear_selection_on_complete: true,
            retain_hidden_selection: true,
        }
    }
}

impl ConsoleConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            page_size: env::var("SHIELDVIEW_PAGE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.page_size),

            dataset_size: env::var("SHIELDVIEW_DATASET_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.dataset_size),

            analysis_timeout: env::var("SHIELDVIEW_ANALYSIS_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.analysis_timeout),

            clear_selection_on_complete: env::var("SHIELDVIEW_CLEAR_SELECTION_ON_COMPLETE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.clear_selection_on_complete),

            retain_hidden_selection: env::var("SHIELDVIEW_RETAIN_HIDDEN_SELECTION")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.retain_hidden_selection),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ConsoleConfig::default();
        assert_eq!(config.page_size, 10);
        assert_eq!(config.dataset_size, 100);
        assert_eq!(config.analysis_timeout, Duration::from_secs(10));
        assert!(config.clear_selection_on_complete);
        assert!(config.retain_hidden_selection);
    }
}
