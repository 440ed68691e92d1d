use crate::config::ModelConfig;
use crate::integrations::{Classifier, RemoteClassifier};
use crate::jobs::LoadedModel;
use extractors::Vocabulary;
use shared_types::LoadError;
use std::sync::Arc;
use std::time::Duration;

/// Loads the vocabulary and connects the classifier named in `[model]`
pub fn load_model(config: &ModelConfig) -> Result<LoadedModel, LoadError> {
    let vocab_path = config.vocab_path.as_deref().ok_or_else(|| LoadError::Vocabulary {
        path: String::new(),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "no vocab_path configured"),
    })?;
    let vocab = Vocabulary::load(vocab_path)?;

    let endpoint = config
        .classifier_url
        .as_deref()
        .ok_or_else(|| LoadError::Classifier("no classifier_url configured".to_string()))?;
    let classifier: Arc<dyn Classifier> = Arc::new(RemoteClassifier::new(
        endpoint,
        Duration::from_secs(config.timeout_secs),
    )?);

    tracing::info!(
        "Model ready: {} vocabulary tokens, classifier at {}",
        vocab.len(),
        endpoint
    );

    Ok(LoadedModel { vocab, classifier })
}
