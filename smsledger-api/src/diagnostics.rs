use tokio::sync::broadcast;

/// Human-readable trace of pipeline decisions. Every line goes to tracing
/// and to any live subscribers; lines sent with no subscriber are dropped.
#[derive(Clone)]
pub struct Diagnostics {
    sender: broadcast::Sender<String>,
}

impl Diagnostics {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        self.sender.subscribe()
    }

    pub fn emit(&self, line: impl Into<String>) {
        let line = line.into();
        tracing::info!(target: "smsledger::diagnostics", "{}", line);
        let _ = self.sender.send(line);
    }
}

/// First `max_chars` characters of `text`, with an ellipsis when cut
pub fn excerpt(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
