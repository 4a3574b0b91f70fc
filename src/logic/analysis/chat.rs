//! Chat Transcript
//!
//! The conversational side panel scoped to exactly one analyzed batch.
//! Seeded from the batch when it completes; follow-up questions get a
//! simulated assistant answer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::logic::records::{LogRecord, Severity};

const SIMULATED_ANSWER: &str = "This is a simulated AI response. In a real deployment \
this would be produced by the analysis service from the logs in this batch.";

/// One entry in the analysis side panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatEntry {
    /// An analyzed record echoed into the panel.
    Log {
        record_id: String,
        message: String,
        severity: Severity,
        source: String,
        analysis: Option<String>,
        timestamp: DateTime<Utc>,
    },
    /// Operator follow-up question.
    Question {
        content: String,
        timestamp: DateTime<Utc>,
    },
    /// Assistant reply.
    Answer {
        content: String,
        timestamp: DateTime<Utc>,
    },
}

/// Conversation panel for the most recent analyzed batch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatTranscript {
    batch_id: Option<Uuid>,
    entries: Vec<ChatEntry>,
}

impl ChatTranscript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the panel contents with the records of a freshly
    /// completed batch (annotations included).
    pub fn open_batch(&mut self, batch_id: Uuid, records: &[LogRecord]) {
        self.batch_id = Some(batch_id);
        self.entries = records
            .iter()
            .map(|r| ChatEntry::Log {
                record_id: r.id.clone(),
                message: r.message.clone(),
                severity: r.severity,
                source: r.source.clone(),
                analysis: r.ai_analysis.clone(),
                timestamp: r.timestamp,
            })
            .collect();
    }

    pub fn batch_id(&self) -> Option<Uuid> {
        self.batch_id
    }

    /// The panel only renders while a batch is open.
    pub fn is_open(&self) -> bool {
        self.batch_id.is_some()
    }

    pub fn entries(&self) -> &[ChatEntry] {
        &self.entries
    }

    /// Append an operator question and the simulated assistant answer.
    /// Blank questions are ignored; returns the answer text otherwise.
    pub fn ask(&mut self, question: &str) -> Option<String> {
        let question = question.trim();
        if question.is_empty() {
            return None;
        }

        let now = Utc::now();
        self.entries.push(ChatEntry::Question {
            content: question.to_string(),
            timestamp: now,
        });
        self.entries.push(ChatEntry::Answer {
            content: SIMULATED_ANSWER.to_string(),
            timestamp: now,
        });
        Some(SIMULATED_ANSWER.to_string())
    }

    pub fn close(&mut self) {
        self.batch_id = None;
        self.entries.clear();
    }
}
