use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A notification as delivered by the event source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct RawMessage {
    /// Identifier of the app that posted the notification
    pub source: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    /// Post time, epoch milliseconds
    pub posted_at: i64,
    /// Ongoing notifications (progress bars, media players) are never messages
    #[serde(default)]
    pub ongoing: bool,
}

impl RawMessage {
    pub fn new(source: impl Into<String>, text: impl Into<String>, posted_at: i64) -> Self {
        Self {
            source: source.into(),
            title: None,
            text: Some(text.into()),
            posted_at,
            ongoing: false,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Title and body joined with a single space, the text the pipeline sees.
    pub fn full_text(&self) -> String {
        let mut out = String::new();
        if let Some(title) = &self.title {
            out.push_str(title);
            out.push(' ');
        }
        if let Some(text) = &self.text {
            out.push_str(text);
        }
        out
    }
}

/// Batch of currently active notifications
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct ScanRequest {
    pub messages: Vec<RawMessage>,
}
