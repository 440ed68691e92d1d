use crate::config::PipelineConfig;
use crate::diagnostics::{excerpt, Diagnostics};
use crate::integrations::Classifier;
use crate::storage::TransactionStore;
use extractors::{tokenize, ExtractedTransaction, FinancialPatternExtractor, Vocabulary};
use shared_types::{
    Category, ClassificationResult, NewTransaction, PipelineError, PipelineOutcome, RawMessage,
    ScanReport,
};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;

const EXCERPT_CHARS: usize = 80;

/// Vocabulary and classifier, loaded together at startup
pub struct LoadedModel {
    pub vocab: Vocabulary,
    pub classifier: Arc<dyn Classifier>,
}

/// Result of handing a message to the pipeline. Gate checks settle on the
/// caller; anything that passes them is queued for classification.
pub enum Submission {
    Settled(PipelineOutcome),
    Queued(JoinHandle<PipelineOutcome>),
}

impl Submission {
    pub async fn outcome(self) -> PipelineOutcome {
        match self {
            Submission::Settled(outcome) => outcome,
            Submission::Queued(handle) => handle
                .await
                .unwrap_or_else(|e| PipelineOutcome::failed(PipelineError::Worker(e.to_string()))),
        }
    }
}

struct Prepared {
    model: Arc<LoadedModel>,
    extracted: ExtractedTransaction,
    occurred_at: i64,
}

pub struct ClassificationManager {
    store: Arc<dyn TransactionStore>,
    model: Option<Arc<LoadedModel>>,
    extractor: FinancialPatternExtractor,
    allowed_sources: Vec<String>,
    workers: Arc<Semaphore>,
    diagnostics: Diagnostics,
}

impl ClassificationManager {
    /// `model` is `None` when loading failed; financial messages are then
    /// reported as unprocessable.
    pub fn new(
        store: Arc<dyn TransactionStore>,
        model: Option<LoadedModel>,
        config: &PipelineConfig,
        diagnostics: Diagnostics,
    ) -> Self {
        Self {
            store,
            model: model.map(Arc::new),
            extractor: FinancialPatternExtractor::new(),
            allowed_sources: config.allowed_sources.clone(),
            workers: Arc::new(Semaphore::new(config.max_concurrent_classifications.max(1))),
            diagnostics,
        }
    }

    pub fn with_extractor(mut self, extractor: FinancialPatternExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn model_loaded(&self) -> bool {
        self.model.is_some()
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Full pipeline for one message, awaited inline
    pub async fn process_message(&self, message: RawMessage) -> PipelineOutcome {
        self.submit(message).outcome().await
    }

    /// Runs the gate checks now and queues classification on the worker pool
    pub fn submit(&self, message: RawMessage) -> Submission {
        let prepared = match self.prepare(&message) {
            Ok(prepared) => prepared,
            Err(outcome) => return Submission::Settled(outcome),
        };

        let store = self.store.clone();
        let diagnostics = self.diagnostics.clone();
        let workers = self.workers.clone();

        let handle = tokio::spawn(async move {
            let _permit = match workers.acquire_owned().await {
                Ok(permit) => permit,
                Err(e) => {
                    let error = PipelineError::Worker(e.to_string());
                    diagnostics.emit(format!("FATAL: Error during classification: {}", error));
                    return PipelineOutcome::failed(error);
                }
            };

            match Self::classify_and_commit(store, &diagnostics, prepared).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    diagnostics.emit(format!("FATAL: Error during classification: {}", e));
                    PipelineOutcome::failed(e)
                }
            }
        });

        Submission::Queued(handle)
    }

    /// Batch pass over every active notification. Individual failures are
    /// counted, never propagated.
    pub async fn scan(&self, messages: Vec<RawMessage>) -> ScanReport {
        self.diagnostics.emit("Scan initiated...");
        self.diagnostics
            .emit(format!("Found {} notifications.", messages.len()));

        let mut report = ScanReport::default();
        let mut queued = Vec::new();

        for message in messages {
            match self.submit(message) {
                Submission::Settled(outcome) => report.record(&outcome),
                Submission::Queued(handle) => queued.push(handle),
            }
        }

        for joined in futures::future::join_all(queued).await {
            let outcome = joined
                .unwrap_or_else(|e| PipelineOutcome::failed(PipelineError::Worker(e.to_string())));
            report.record(&outcome);
        }

        self.diagnostics.emit(format!(
            "Scan complete: {} scanned, {} committed, {} duplicates, {} spam, {} failed",
            report.scanned, report.committed, report.duplicates, report.spam, report.failed
        ));

        report
    }

    fn prepare(&self, message: &RawMessage) -> Result<Prepared, PipelineOutcome> {
        self.diagnostics
            .emit(format!("Processing notification from: {}", message.source));

        if message.ongoing {
            self.diagnostics.emit("  -> Skipped: ongoing notification.");
            return Err(PipelineOutcome::ignored("ongoing notification"));
        }

        if !self.allowed_sources.iter().any(|s| s == &message.source) {
            self.diagnostics.emit("  -> Skipped: not from a messaging app.");
            return Err(PipelineOutcome::ignored(format!(
                "source {} is not a messaging app",
                message.source
            )));
        }

        let text = message.full_text();
        if text.trim().is_empty() {
            self.diagnostics.emit("  -> Skipped: message text is empty.");
            return Err(PipelineOutcome::ignored("empty message"));
        }

        self.diagnostics
            .emit(format!("  -> Message text: '{}'", excerpt(&text, EXCERPT_CHARS)));

        if !self.extractor.is_financial(&text) {
            self.diagnostics.emit("  -> Not a financial message.");
            return Err(PipelineOutcome::NotFinancial);
        }

        let Some(model) = self.model.clone() else {
            self.diagnostics
                .emit("ERROR: Model or tokenizer not initialized. Cannot classify.");
            return Err(PipelineOutcome::Unprocessable);
        };

        let extracted = self.extractor.extract(&text);
        self.diagnostics.emit(format!(
            "  -> Financial message: amount {:.2}, summary '{}'",
            extracted.amount, extracted.summary
        ));

        Ok(Prepared {
            model,
            extracted,
            occurred_at: message.posted_at,
        })
    }

    async fn classify_and_commit(
        store: Arc<dyn TransactionStore>,
        diagnostics: &Diagnostics,
        prepared: Prepared,
    ) -> Result<PipelineOutcome, PipelineError> {
        let Prepared {
            model,
            extracted,
            occurred_at,
        } = prepared;

        let existing = store
            .count_matching(&extracted.summary, occurred_at)
            .await
            .map_err(|e| PipelineError::Storage(e.to_string()))?;
        if existing > 0 {
            diagnostics.emit("  -> Duplicate transaction. Skipping.");
            return Ok(PipelineOutcome::Duplicate);
        }

        let input = tokenize(&model.vocab, &extracted.summary);
        let scores = model.classifier.infer(&input).await?;

        let result = ClassificationResult::from_scores(scores)
            .ok_or_else(|| PipelineError::Classifier("classifier returned no scores".to_string()))?;
        let category = Category::from_index(result.category_index).ok_or_else(|| {
            PipelineError::Classifier(format!(
                "category index {} out of range",
                result.category_index
            ))
        })?;

        diagnostics.emit(format!("  -> AI model classified as: {}", category));

        if category.is_spam() {
            diagnostics.emit("  -> Classified as Spam. Not adding to ledger.");
            return Ok(PipelineOutcome::Spam);
        }

        let transaction =
            NewTransaction::classified(extracted.summary, category, extracted.amount, occurred_at);

        let inserted = store
            .insert(&transaction)
            .await
            .map_err(|e| PipelineError::Storage(e.to_string()))?;

        match inserted {
            Some(transaction) => {
                diagnostics.emit(format!("  -> Saved transaction #{}", transaction.id));
                Ok(PipelineOutcome::Committed { transaction })
            }
            None => {
                diagnostics.emit("  -> Duplicate transaction. Skipping.");
                Ok(PipelineOutcome::Duplicate)
            }
        }
    }
}
