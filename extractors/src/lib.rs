//! Extractors Crate
//!
//! Pure text processing for bank and payment notifications: deciding whether
//! a message is financial, pulling out a signed amount and a canonical
//! description, and encoding that description for the category classifier.
//!
//! # Modules
//!
//! - `financial_patterns`: detector, amount extractor, summarizer
//! - `tokenizer`: vocabulary loading and fixed-length encoding
//!
//! # Example
//!
//! ```rust,ignore
//! use extractors::{tokenize, FinancialPatternExtractor, Vocabulary};
//!
//! let extractor = FinancialPatternExtractor::new();
//! if let Some(extracted) = extractor.extract_if_financial(text) {
//!     let input = tokenize(&vocab, &extracted.summary);
//! }
//! ```

pub mod financial_patterns;
pub mod tokenizer;

// Re-export commonly used types
pub use financial_patterns::{
    extract_amount, is_financial, is_mandate_for_today, summarize, ExtractedTransaction,
    FinancialPatternExtractor,
};
pub use tokenizer::{tokenize, Vocabulary};
