//! Typed lifecycle events and their broadcast fan-out.

use tokio::sync::broadcast;
use uuid::Uuid;

use crate::client::LogLevel;
use crate::error::ClientError;

/// Notifications published by the driver.
///
/// Each connect attempt carries a fresh id so `ConnectionOpening`,
/// `ConnectionOpened`, and `ConnectionFailed` can be correlated by
/// consumers watching several pools at once.
#[derive(Debug, Clone)]
pub enum DriverEvent {
    ConnectionOpening {
        attempt: Uuid,
    },
    ConnectionOpened {
        attempt: Uuid,
    },
    ConnectionFailed {
        attempt: Uuid,
        error: ClientError,
    },
    ConnectionClosed,
    /// A log line relayed verbatim from the underlying client.
    ConnectionLogged {
        level: LogLevel,
        message: String,
        data: Option<serde_json::Value>,
    },
}

const EVENT_CAPACITY: usize = 64;

/// Broadcast bus for driver events. Subscribers that fall behind lose the
/// oldest events rather than blocking the driver.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<DriverEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(EVENT_CAPACITY);
        Self { tx }
    }

    /// Register a consumer. Only events published after this call are
    /// observed.
    pub fn subscribe(&self) -> broadcast::Receiver<DriverEvent> {
        self.tx.subscribe()
    }

    /// Publish to whoever is listening; a bus with no subscribers is fine.
    pub(crate) fn publish(&self, event: DriverEvent) {
        let _ = self.tx.send(event);
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribers_observe_published_events() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();
        let attempt = Uuid::new_v4();
        bus.publish(DriverEvent::ConnectionOpening { attempt });

        match rx.recv().await {
            Ok(DriverEvent::ConnectionOpening { attempt: seen }) => assert_eq!(seen, attempt),
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn publishing_without_subscribers_is_harmless() {
        let bus = EventBus::new();
        bus.publish(DriverEvent::ConnectionClosed);
    }
}
