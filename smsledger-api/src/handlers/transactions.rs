use crate::storage::TransactionStore;
use actix_web::{web, HttpResponse, Result as ActixResult};
use shared_types::{DeleteResponse, TransactionsResponse};
use std::sync::Arc;
use tracing::info;

pub async fn list_transactions(
    store: web::Data<Arc<dyn TransactionStore>>,
) -> ActixResult<HttpResponse> {
    let transactions = store
        .list_recent_first()
        .await
        .map_err(|e| actix_web::error::ErrorInternalServerError(e.to_string()))?;

    Ok(HttpResponse::Ok().json(TransactionsResponse { transactions }))
}

pub async fn get_summary(
    store: web::Data<Arc<dyn TransactionStore>>,
) -> ActixResult<HttpResponse> {
    let summary = store
        .summary()
        .await
        .map_err(|e| actix_web::error::ErrorInternalServerError(e.to_string()))?;

    Ok(HttpResponse::Ok().json(summary))
}

pub async fn delete_all_transactions(
    store: web::Data<Arc<dyn TransactionStore>>,
) -> ActixResult<HttpResponse> {
    let deleted = store
        .delete_all()
        .await
        .map_err(|e| actix_web::error::ErrorInternalServerError(e.to_string()))?;

    info!("Deleted all transactions: {} rows", deleted);

    Ok(HttpResponse::Ok().json(DeleteResponse {
        deleted: deleted as u64,
    }))
}

pub async fn delete_transaction(
    store: web::Data<Arc<dyn TransactionStore>>,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    let id = path.into_inner();

    let deleted = store
        .delete(id)
        .await
        .map_err(|e| actix_web::error::ErrorInternalServerError(e.to_string()))?;

    if !deleted {
        return Err(actix_web::error::ErrorNotFound(format!(
            "Transaction {} not found",
            id
        )));
    }

    Ok(HttpResponse::Ok().json(DeleteResponse { deleted: 1 }))
}
