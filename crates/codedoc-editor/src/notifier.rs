//! User-visible notices.

use std::sync::{Arc, Mutex};

use tracing::info;

/// Fire-and-forget sink for messages shown to the user.
pub trait Notifier {
    /// Shows `message` to the user.
    fn notify(&self, message: &str);
}

/// Writes notices to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str) {
        info!(target: "codedoc::notice", "{message}");
    }
}

/// Keeps every notice; clones share the same list.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    messages: Arc<Mutex<Vec<String>>>,
}

impl RecordingNotifier {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Notices received so far, oldest first.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|messages| messages.clone())
            .unwrap_or_default()
    }

    /// The most recent notice.
    #[must_use]
    pub fn last(&self) -> Option<String> {
        self.messages
            .lock()
            .ok()
            .and_then(|messages| messages.last().cloned())
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message.to_string());
        }
    }
}
