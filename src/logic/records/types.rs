//! Security Log Record Types
//!
//! Core types for the log table. NO logic beyond constructors and
//! trivial accessors lives here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ConsoleError;

// ============================================================================
// SEVERITY
// ============================================================================

/// Detection severity of a log record. Ordered; immutable once logged
/// (it reflects detection, not triage).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    /// All severities, most urgent first.
    pub const ALL: [Severity; 3] = [Severity::High, Severity::Medium, Severity::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }

    pub fn level(&self) -> u8 {
        match self {
            Severity::Low => 0,
            Severity::Medium => 1,
            Severity::High => 2,
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Severity::High => "#ef4444",   // Red
            Severity::Medium => "#f59e0b", // Yellow
            Severity::Low => "#10b981",    // Green
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Severity {
    type Err = ConsoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "high" | "critical" => Ok(Severity::High),
            "medium" => Ok(Severity::Medium),
            "low" | "informational" => Ok(Severity::Low),
            other => Err(ConsoleError::Validation(format!(
                "unknown severity '{other}'"
            ))),
        }
    }
}

// ============================================================================
// LOG RECORD
// ============================================================================

/// One security event entry.
///
/// `id` is unique for the session lifetime and never reused. Only
/// `is_innocuous` and `ai_analysis` may change after creation; every
/// other field is write-once.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogRecord {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub severity: Severity,
    pub category: String,
    pub message: String,
    /// Source address the event was observed from.
    pub source: String,

    // Optional connection context, present on richer appliance records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src_port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dst_ip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dst_port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application: Option<String>,

    /// Operator-asserted: this record should not count as an active threat.
    #[serde(default)]
    pub is_innocuous: bool,

    /// Set once the analysis workflow completes for this record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_analysis: Option<String>,
}

impl LogRecord {
    pub fn new(
        id: &str,
        timestamp: DateTime<Utc>,
        severity: Severity,
        category: &str,
        message: &str,
        source: &str,
    ) -> Self {
        Self {
            id: id.to_string(),
            timestamp,
            severity,
            category: category.to_string(),
            message: message.to_string(),
            source: source.to_string(),
            src_port: None,
            dst_ip: None,
            dst_port: None,
            protocol: None,
            user: None,
            application: None,
            is_innocuous: false,
            ai_analysis: None,
        }
    }

    // Builder pattern methods
    pub fn with_connection(
        mut self,
        src_port: u16,
        dst_ip: &str,
        dst_port: u16,
        protocol: &str,
    ) -> Self {
        self.src_port = Some(src_port);
        self.dst_ip = Some(dst_ip.to_string());
        self.dst_port = Some(dst_port);
        self.protocol = Some(protocol.to_string());
        self
    }

    pub fn with_user(mut self, user: &str) -> Self {
        self.user = Some(user.to_string());
        self
    }

    pub fn with_application(mut self, application: &str) -> Self {
        self.application = Some(application.to_string());
        self
    }

    /// Records not marked innocuous count as active threats.
    pub fn is_active_threat(&self) -> bool {
        !self.is_innocuous
    }
}

// ============================================================================
// TESTS
// ============================================================================
