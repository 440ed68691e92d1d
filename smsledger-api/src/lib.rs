pub mod config;
pub mod database;
pub mod diagnostics;
pub mod handlers;
pub mod helpers;
pub mod integrations;
pub mod jobs;
pub mod storage;

pub use database::Database;
pub use jobs::ClassificationManager;
pub use storage::TransactionStore;
