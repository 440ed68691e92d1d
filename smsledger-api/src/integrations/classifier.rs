use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared_types::{EncodedInput, LoadError, PipelineError};
use std::time::Duration;

/// Sequence classifier over an encoded message. Returns one score per
/// category, in category order.
#[async_trait]
pub trait Classifier: Send + Sync {
    async fn infer(&self, input: &EncodedInput) -> Result<Vec<f32>, PipelineError>;
}

/// Classifier served over HTTP by an inference runtime
pub struct RemoteClassifier {
    client: reqwest::Client,
    endpoint: String,
}

#[derive(Serialize)]
struct InferenceRequest<'a> {
    input_ids: [&'a [i64]; 1],
    attention_mask: [&'a [i64]; 1],
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scores {
    Flat(Vec<f32>),
    Batched(Vec<Vec<f32>>),
}

#[derive(Deserialize)]
struct InferenceResponse {
    scores: Scores,
}

impl InferenceResponse {
    fn into_scores(self) -> Vec<f32> {
        match self.scores {
            Scores::Flat(scores) => scores,
            Scores::Batched(rows) => rows.into_iter().next().unwrap_or_default(),
        }
    }
}

impl RemoteClassifier {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, LoadError> {
        let endpoint = endpoint.into();
        if endpoint.trim().is_empty() {
            return Err(LoadError::Classifier("empty classifier endpoint".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LoadError::Classifier(e.to_string()))?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Classifier for RemoteClassifier {
    async fn infer(&self, input: &EncodedInput) -> Result<Vec<f32>, PipelineError> {
        let request = InferenceRequest {
            input_ids: [&input.ids[..]],
            attention_mask: [&input.mask[..]],
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| PipelineError::Classifier(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PipelineError::Classifier(format!(
                "inference endpoint returned {}: {}",
                status, body
            )));
        }

        let parsed: InferenceResponse = response
            .json()
            .await
            .map_err(|e| PipelineError::Classifier(format!("bad inference response: {}", e)))?;

        Ok(parsed.into_scores())
    }
}
