pub mod classification;
pub mod financial;
pub mod message;
pub mod pipeline;

pub use classification::{ClassificationResult, EncodedInput, MAX_LEN, PAD_ID};
pub use financial::{
    Category, DeleteResponse, Icon, NewTransaction, SpendingSummary, Transaction,
    TransactionsResponse,
};
pub use message::{RawMessage, ScanRequest};
pub use pipeline::{
    HealthResponse, LoadError, ParseError, PipelineError, PipelineOutcome, ScanReport,
    SubmitResponse,
};
