use crate::financial::Transaction;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Vocabulary or model could not be loaded. The service keeps running but
/// cannot classify.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Vocabulary unavailable at {path}: {source}")]
    Vocabulary {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Classifier unavailable: {0}")]
    Classifier(String),
}

/// Date or amount text that could not be parsed. Always recovered locally.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Invalid amount: {0}")]
    Amount(String),

    #[error("Invalid date: {0}")]
    Date(String),
}

/// Failure while processing a single message. Aborts that message only.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Classifier error: {0}")]
    Classifier(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Worker error: {0}")]
    Worker(String),
}

/// Terminal state of one message in the classification pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "outcome", rename_all = "kebab-case")]
pub enum PipelineOutcome {
    /// Dropped before detection (wrong source, ongoing, empty)
    Ignored { reason: String },
    NotFinancial,
    /// Financial, but the model is not loaded
    Unprocessable,
    Duplicate,
    Spam,
    Committed { transaction: Transaction },
    Failed { error: String },
}

impl PipelineOutcome {
    pub fn ignored(reason: impl Into<String>) -> Self {
        PipelineOutcome::Ignored {
            reason: reason.into(),
        }
    }

    pub fn failed(error: impl std::fmt::Display) -> Self {
        PipelineOutcome::Failed {
            error: error.to_string(),
        }
    }

    pub fn is_committed(&self) -> bool {
        matches!(self, PipelineOutcome::Committed { .. })
    }
}

/// Aggregate of a batch scan over active notifications
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
pub struct ScanReport {
    pub scanned: u32,
    pub committed: u32,
    pub duplicates: u32,
    pub spam: u32,
    pub not_financial: u32,
    pub ignored: u32,
    pub unprocessable: u32,
    pub failed: u32,
}

impl ScanReport {
    pub fn record(&mut self, outcome: &PipelineOutcome) {
        self.scanned += 1;
        match outcome {
            PipelineOutcome::Ignored { .. } => self.ignored += 1,
            PipelineOutcome::NotFinancial => self.not_financial += 1,
            PipelineOutcome::Unprocessable => self.unprocessable += 1,
            PipelineOutcome::Duplicate => self.duplicates += 1,
            PipelineOutcome::Spam => self.spam += 1,
            PipelineOutcome::Committed { .. } => self.committed += 1,
            PipelineOutcome::Failed { .. } => self.failed += 1,
        }
    }
}

/// Response for a single submitted message
#[derive(Debug, Serialize, Deserialize, TS)]
pub struct SubmitResponse {
    /// True when the message passed the gate and was handed to a worker
    pub queued: bool,
    pub outcome: Option<PipelineOutcome>,
}

/// Response for the health endpoint
#[derive(Debug, Serialize, Deserialize, TS)]
pub struct HealthResponse {
    pub status: String,
    pub database: String,
    pub model_loaded: bool,
}
