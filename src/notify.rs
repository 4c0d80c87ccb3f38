use std::fmt;

use tokio::sync::broadcast;
use tracing::debug;

use crate::gateway::error::StatusSignal;

const LOG_TARGET: &str = "notify";

/// A user-visible toast emitted when the server rejects an operation with a
/// structured payload.
#[derive(Debug, Clone)]
pub struct Notification {
    pub status: StatusSignal,
    pub message: String,
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error: {} - {}", self.status, self.message)
    }
}

pub trait NotificationSink: Send + Sync {
    fn notify(&self, note: Notification);
}

/// Broadcast-backed sink; every subscriber sees every toast. Emission is
/// append-only and ordering between concurrent toasts is not significant.
#[derive(Clone)]
pub struct ToastChannel {
    tx: broadcast::Sender<Notification>,
}

impl ToastChannel {
    pub fn new(capacity: usize) -> (Self, broadcast::Receiver<Notification>) {
        let (tx, rx) = broadcast::channel(capacity);
        (Self { tx }, rx)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.tx.subscribe()
    }
}

impl NotificationSink for ToastChannel {
    fn notify(&self, note: Notification) {
        if let Err(dropped) = self.tx.send(note) {
            debug!(
                target = LOG_TARGET,
                toast = %dropped.0,
                "no toast subscribers; dropping notification"
            );
        }
    }
}
