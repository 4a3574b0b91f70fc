//! Records Module - Security Log Model
//!
//! One `LogRecord` per firewall event. Records are write-once apart
//! from the two operator-driven fields (`is_innocuous`, `ai_analysis`).

pub mod types;

pub use types::{LogRecord, Severity};
