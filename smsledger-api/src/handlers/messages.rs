use crate::jobs::{ClassificationManager, Submission};
use actix_web::{web, HttpResponse, Result as ActixResult};
use futures::stream;
use shared_types::{RawMessage, ScanRequest, SubmitResponse};
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;

/// Real-time path: gate checks answer immediately, classification runs in
/// the background.
pub async fn submit_message(
    manager: web::Data<Arc<ClassificationManager>>,
    message: web::Json<RawMessage>,
) -> ActixResult<HttpResponse> {
    match manager.submit(message.into_inner()) {
        Submission::Settled(outcome) => Ok(HttpResponse::Ok().json(SubmitResponse {
            queued: false,
            outcome: Some(outcome),
        })),
        Submission::Queued(handle) => {
            tokio::spawn(async move {
                if let Err(e) = handle.await {
                    tracing::error!("Classification task panicked: {}", e);
                }
            });
            Ok(HttpResponse::Accepted().json(SubmitResponse {
                queued: true,
                outcome: None,
            }))
        }
    }
}

pub async fn scan_messages(
    manager: web::Data<Arc<ClassificationManager>>,
    request: web::Json<ScanRequest>,
) -> ActixResult<HttpResponse> {
    let report = manager.scan(request.into_inner().messages).await;
    Ok(HttpResponse::Ok().json(report))
}

/// Server-sent events carrying diagnostic lines as they are emitted
pub async fn diagnostics_stream(
    manager: web::Data<Arc<ClassificationManager>>,
) -> HttpResponse {
    let rx = manager.diagnostics().subscribe();

    let events = stream::unfold(rx, |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(line) => {
                    let event = web::Bytes::from(format!("data: {}\n\n", line));
                    return Some((Ok::<_, actix_web::Error>(event), rx));
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!("Diagnostics subscriber lagged, skipped {} lines", skipped);
                }
                Err(RecvError::Closed) => return None,
            }
        }
    });

    HttpResponse::Ok()
        .content_type("text/event-stream")
        .insert_header(("Cache-Control", "no-cache"))
        .streaming(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipelineConfig;
    use crate::database::Database;
    use crate::diagnostics::Diagnostics;
    use crate::integrations::Classifier;
    use crate::jobs::LoadedModel;
    use crate::storage::{SqliteTransactionStore, TransactionStore};
    use actix_web::{http::StatusCode, test, App};
    use async_trait::async_trait;
    use extractors::Vocabulary;
    use shared_types::{EncodedInput, PipelineError, PipelineOutcome, ScanReport};
    use std::time::Duration;

    /// Scores every input as Transport
    struct TransportClassifier;

    #[async_trait]
    impl Classifier for TransportClassifier {
        async fn infer(&self, _input: &EncodedInput) -> Result<Vec<f32>, PipelineError> {
            Ok(vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0])
        }
    }

    fn degraded_manager(dir: &tempfile::TempDir) -> Arc<ClassificationManager> {
        let db = Database::new(&dir.path().join("messages.sqlite")).unwrap();
        let store: Arc<dyn TransactionStore> =
            Arc::new(SqliteTransactionStore::new(db.async_connection.clone()));
        Arc::new(ClassificationManager::new(
            store,
            None,
            &PipelineConfig::default(),
            Diagnostics::new(16),
        ))
    }

    #[actix_web::test]
    async fn test_submit_reports_gate_decision() {
        let dir = tempfile::tempdir().unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(degraded_manager(&dir)))
                .route("/api/messages", web::post().to(submit_message)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/messages")
            .set_json(RawMessage::new("com.android.mms", "Rs.120 debited", 7))
            .to_request();
        let body: SubmitResponse = test::call_and_read_body_json(&app, req).await;

        assert!(!body.queued);
        assert_eq!(body.outcome, Some(PipelineOutcome::Unprocessable));
    }

    #[actix_web::test]
    async fn test_submit_queues_and_commits_in_background() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(&dir.path().join("queued.sqlite")).unwrap();
        let store: Arc<dyn TransactionStore> =
            Arc::new(SqliteTransactionStore::new(db.async_connection.clone()));
        let model = LoadedModel {
            vocab: Vocabulary::from_tokens(["[PAD]", "[CLS]", "[SEP]", "[UNK]", "sent"]),
            classifier: Arc::new(TransportClassifier),
        };
        let manager = Arc::new(ClassificationManager::new(
            store.clone(),
            Some(model),
            &PipelineConfig::default(),
            Diagnostics::new(64),
        ));
        let mut rx = manager.diagnostics().subscribe();

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(manager))
                .route("/api/messages", web::post().to(submit_message)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/messages")
            .set_json(RawMessage::new("com.android.mms", "Sent Rs.60 to cab@upi", 8))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::ACCEPTED);
        let body: SubmitResponse = test::read_body_json(resp).await;
        assert!(body.queued);
        assert!(body.outcome.is_none());

        tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                let line = rx.recv().await.unwrap();
                if line.contains("Saved transaction") {
                    break;
                }
            }
        })
        .await
        .unwrap();

        let listed = store.list_recent_first().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].amount, -60.0);
        assert_eq!(listed[0].category, shared_types::Category::Transport);
    }

    #[actix_web::test]
    async fn test_scan_returns_report() {
        let dir = tempfile::tempdir().unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(degraded_manager(&dir)))
                .route("/api/messages/scan", web::post().to(scan_messages)),
        )
        .await;

        let request = ScanRequest {
            messages: vec![
                RawMessage::new("com.android.mms", "Rs.120 debited", 1),
                RawMessage::new("com.android.mms", "call me back", 2),
                RawMessage::new("com.whatsapp", "Rs.5 sent", 3),
            ],
        };
        let req = test::TestRequest::post()
            .uri("/api/messages/scan")
            .set_json(&request)
            .to_request();
        let report: ScanReport = test::call_and_read_body_json(&app, req).await;

        assert_eq!(report.scanned, 3);
        assert_eq!(report.unprocessable, 1);
        assert_eq!(report.not_financial, 1);
        assert_eq!(report.ignored, 1);
    }
}
