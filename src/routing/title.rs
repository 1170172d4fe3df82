//! Document title collaborator.

use std::sync::Mutex;

/// Receives the title of each completed, non-stale navigation.
pub trait TitleSink: Send + Sync {
    fn set_title(&self, title: &str);
}

/// Emits titles as log events.
#[derive(Debug, Default)]
pub struct LogTitleSink;

impl TitleSink for LogTitleSink {
    fn set_title(&self, title: &str) {
        tracing::info!(title = %title, "Document title updated");
    }
}

/// Keeps the most recent title in memory.
#[derive(Debug, Default)]
pub struct MemoryTitleSink {
    history: Mutex<Vec<String>>,
}

impl MemoryTitleSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current title, if any has been set.
    pub fn current(&self) -> Option<String> {
        self.history().last().cloned()
    }

    /// Every title set so far, oldest first.
    pub fn history(&self) -> Vec<String> {
        self.history
            .lock()
            .map(|h| h.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }
}

impl TitleSink for MemoryTitleSink {
    fn set_title(&self, title: &str) {
        let mut history = self
            .history
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        history.push(title.to_string());
    }
}
