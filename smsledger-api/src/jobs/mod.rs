pub mod classification_manager;

pub use classification_manager::{ClassificationManager, LoadedModel, Submission};
