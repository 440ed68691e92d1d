use super::TransactionStore;
use crate::database::{transactions as db, AsyncDbConnection};
use anyhow::Result;
use async_trait::async_trait;
use shared_types::{NewTransaction, SpendingSummary, Transaction};

pub struct SqliteTransactionStore {
    conn: AsyncDbConnection,
}

impl SqliteTransactionStore {
    pub fn new(conn: AsyncDbConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl TransactionStore for SqliteTransactionStore {
    async fn count_matching(&self, description: &str, occurred_at: i64) -> Result<i64> {
        db::count_matching(self.conn.clone(), description, occurred_at).await
    }

    async fn insert(&self, transaction: &NewTransaction) -> Result<Option<Transaction>> {
        db::insert_transaction(self.conn.clone(), transaction).await
    }

    async fn list_recent_first(&self) -> Result<Vec<Transaction>> {
        db::list_transactions(self.conn.clone()).await
    }

    async fn summary(&self) -> Result<SpendingSummary> {
        db::get_spending_summary(self.conn.clone()).await
    }

    async fn delete_all(&self) -> Result<usize> {
        db::delete_all_transactions(self.conn.clone()).await
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        db::delete_transaction(self.conn.clone(), id).await
    }
}
