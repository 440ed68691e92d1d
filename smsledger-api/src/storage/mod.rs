pub mod sqlite_storage;

pub use sqlite_storage::SqliteTransactionStore;

use anyhow::Result;
use async_trait::async_trait;
use shared_types::{NewTransaction, SpendingSummary, Transaction};

/// Persistent ledger of committed transactions
#[async_trait]
pub trait TransactionStore: Send + Sync {
    async fn count_matching(&self, description: &str, occurred_at: i64) -> Result<i64>;

    /// Conditional insert keyed on (description, occurred_at). `None` means
    /// the row was not written: an identical row already existed or the
    /// store refused it.
    async fn insert(&self, transaction: &NewTransaction) -> Result<Option<Transaction>>;

    async fn list_recent_first(&self) -> Result<Vec<Transaction>>;
    async fn summary(&self) -> Result<SpendingSummary>;
    async fn delete_all(&self) -> Result<usize>;
    async fn delete(&self, id: i64) -> Result<bool>;
}
