//! Error handling
//!
//! Nothing in this core is fatal to the process: validation problems are
//! clamped or ignored, analysis failures return the workflow to `Idle`
//! and stay retryable, and missing record ids degrade to logged no-ops.

use std::time::Duration;
use thiserror::Error;

pub type ConsoleResult<T> = Result<T, ConsoleError>;

#[derive(Debug, Error)]
pub enum ConsoleError {
    /// Invalid filter or paging input. Callers clamp or ignore it.
    #[error("invalid input: {0}")]
    Validation(String),

    /// The analysis collaborator failed. Retry is always possible.
    #[error("analysis failed: {0}")]
    Analysis(String),

    /// The analysis collaborator did not answer within the configured bound.
    #[error("analysis timed out after {0:?}")]
    AnalysisTimeout(Duration),

    /// The record id is no longer present in the store.
    #[error("record {0} not found")]
    NotFound(String),
}

impl ConsoleError {
    /// Failures the operator can retry without changing anything.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ConsoleError::Analysis(_) | ConsoleError::AnalysisTimeout(_)
        )
    }
}
