//! User-facing error reporting.

use std::sync::{Arc, Mutex, PoisonError};

/// Messages shown to the user when a cart operation is rejected.
pub mod messages {
    pub const STOCK_EXCEEDED: &str = "requested quantity exceeds stock";
    pub const ADD_PRODUCT_FAILED: &str = "failed to add product";
    pub const REMOVE_PRODUCT_FAILED: &str = "failed to remove product";
    pub const UPDATE_AMOUNT_FAILED: &str = "failed to change product quantity";
}

/// Fire-and-forget sink for error messages (a toast, a status bar, ...).
pub trait Notifier: Send + Sync {
    fn report_error(&self, message: &str);
}

/// Emits each report as a `warn` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn report_error(&self, message: &str) {
        tracing::warn!(target: "cart::notifier", "{message}");
    }
}

/// Keeps every reported message, for tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    messages: Arc<Mutex<Vec<String>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the messages reported so far, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn clear(&self) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Notifier for RecordingNotifier {
    fn report_error(&self, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_string());
    }
}
