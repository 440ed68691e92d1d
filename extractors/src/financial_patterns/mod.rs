//! Heuristics that turn bank/payment notification text into a signed amount
//! and a short description.
//!
//! Every heuristic is a pure function over the message text. Keyword checks
//! are plain substring matches on the lowercased text.

mod amount;
mod detector;
mod extractor;
mod summary;

pub use amount::{extract_amount, parse_amount};
pub use detector::{
    is_financial, is_financial_on, is_mandate_for_date, is_mandate_for_today, mandate_date,
};
pub use extractor::{ExtractedTransaction, FinancialPatternExtractor};
pub use summary::summarize;

/// Any of these marks a message as financial. `rs` is a bare substring and
/// matches words like "yours"; that breadth is intentional.
pub const FINANCIAL_KEYWORDS: &[&str] = &[
    "rs",
    "inr",
    "₹",
    "debited",
    "credited",
    "spent",
    "paid",
    "sent",
    "received",
    "transaction",
    "payment",
];

/// A number is an amount only if one of these appears near it
pub const AMOUNT_CONTEXT_KEYWORDS: &[&str] = &[
    "rs", "inr", "₹", "debited", "credited", "spent", "paid", "sent",
];

/// Any of these near the amount makes it a debit
pub const DEBIT_KEYWORDS: &[&str] = &["debited", "spent", "sent", "paid"];

/// Marker for recurring-payment mandate notifications
pub const MANDATE_MARKER: &str = "e-mandate";

pub(crate) fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}
