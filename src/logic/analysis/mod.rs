//! Analysis Module - Mock AI Analysis Workflow
//!
//! Orchestrates one "analyze selected records" run at a time per view:
//! `Idle -> Analyzing -> Complete`, with failure returning to `Idle`.
//! The collaborator sits behind the `Analyzer` trait; the shipped
//! implementation fabricates its assessments locally.

pub mod analyzer;
pub mod chat;
pub mod types;
pub mod workflow;


pub use analyzer::{Analyzer, MockAnalyzer};
pub use chat::{ChatEntry, ChatTranscript};
pub use types::{AnnotationMap, BatchTicket, WorkflowState};
pub use workflow::AnalysisWorkflow;
