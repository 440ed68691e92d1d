pub mod messages;
pub mod transactions;
