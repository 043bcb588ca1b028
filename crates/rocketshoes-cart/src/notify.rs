//! # Notifiers
//!
//! `NotificationSink` implementations.
//!
//! ```text
//! ┌──────────────────────┬───────────────────────────────────────────────┐
//! │  TracingNotifier     │  logs each toast at WARN                      │
//! │  BroadcastNotifier   │  fans toasts out to UI subscribers            │
//! │  RecordingNotifier   │  keeps toasts in memory (tests)               │
//! └──────────────────────┴───────────────────────────────────────────────┘
//! ```

use std::sync::Mutex;

use tokio::sync::broadcast;
use tracing::warn;

use crate::services::NotificationSink;

/// Default buffer for [`BroadcastNotifier`].
pub const DEFAULT_BROADCAST_CAPACITY: usize = 16;

/// Logs toasts instead of showing them.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl NotificationSink for TracingNotifier {
    fn error(&self, message: &str) {
        warn!(target: "rocketshoes::toast", toast = message, "Error notification");
    }
}

/// Broadcasts toasts to every subscribed UI component.
///
/// A toast sent with no subscribers is dropped. A slow subscriber that falls
/// more than `capacity` messages behind skips the oldest ones.
#[derive(Debug, Clone)]
pub struct BroadcastNotifier {
    tx: broadcast::Sender<String>,
}

impl BroadcastNotifier {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        BroadcastNotifier { tx }
    }

    /// Returns a receiver for toasts sent from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        self.tx.subscribe()
    }
}

impl Default for BroadcastNotifier {
    fn default() -> Self {
        Self::new(DEFAULT_BROADCAST_CAPACITY)
    }
}

impl NotificationSink for BroadcastNotifier {
    fn error(&self, message: &str) {
        // Err only means nobody is listening
        let _ = self.tx.send(message.to_string());
    }
}

/// Keeps every toast in memory.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toasts received so far, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl NotificationSink for RecordingNotifier {
    fn error(&self, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(message.to_string());
    }
}
