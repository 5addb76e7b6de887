//! Real-time notification channel.
//!
//! A publish/subscribe fan-out over [`tokio::sync::broadcast`]. Every
//! [`Subscription`] receives the events published after it was created; there
//! is no backlog for late subscribers. Dropping a subscription unsubscribes it.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast::{self, error::RecvError};

use crate::models::LogEntry;

/// Default number of events buffered per subscriber before it starts lagging.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// An event pushed to subscribers.
///
/// Serializes as `{"event": "<name>", "data": <payload>}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum LogEvent {
    /// A log entry was stored.
    #[serde(rename = "newLog")]
    NewLog(LogEntry),
}

/// Publisher side of the notification channel. Cheap to clone.
#[derive(Debug, Clone)]
pub struct LogNotifier {
    tx: broadcast::Sender<LogEvent>,
    next_id: Arc<AtomicU64>,
}

impl LogNotifier {
    /// Creates a notifier buffering up to `capacity` events per subscriber.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self {
            tx,
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Publishes an event to every current subscriber.
    ///
    /// Returns the number of subscribers the event was delivered to.
    pub fn publish(&self, event: LogEvent) -> usize {
        // Sending only fails when nobody is subscribed.
        self.tx.send(event).unwrap_or(0)
    }

    /// Registers a new subscriber.
    #[must_use]
    pub fn subscribe(&self) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(subscription = id, "Subscriber registered");
        Subscription {
            id,
            rx: self.tx.subscribe(),
        }
    }

    /// Returns the number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for LogNotifier {
    fn default() -> Self {
        Self::new(DEFAULT_CHANNEL_CAPACITY)
    }
}

/// Receiving side of the notification channel, owned by one client.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    rx: broadcast::Receiver<LogEvent>,
}

impl Subscription {
    /// Identifier of this subscription, unique per notifier.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Waits for the next event.
    ///
    /// A subscriber that falls more than the channel capacity behind skips the
    /// events it missed and resumes with the oldest retained one. Returns
    /// `None` once the notifier is gone.
    pub async fn recv(&mut self) -> Option<LogEvent> {
        loop {
            match self.rx.recv().await {
                Ok(event) => return Some(event),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(subscription = self.id, skipped, "Subscriber lagged");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        tracing::debug!(subscription = self.id, "Subscriber removed");
    }
}
