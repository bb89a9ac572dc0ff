//! Real-time push subscriptions.
//!
//! A section subscribes to a named event when it is set up and unsubscribes
//! by dropping its [`Subscription`]. [`LocalPushBus`] fans events out over a
//! tokio broadcast channel; a socket bridge publishes into it.

use serde_json::Value;
use tokio::sync::broadcast;

/// An event delivered by the push channel.
#[derive(Debug, Clone, PartialEq)]
pub struct PushEvent {
    pub name: String,
    pub payload: Value,
}

impl PushEvent {
    pub fn new(name: impl Into<String>, payload: Value) -> Self {
        Self {
            name: name.into(),
            payload,
        }
    }
}

/// Source of push events.
pub trait PushChannel: Send + Sync {
    /// Subscribe to events named `event`.
    fn subscribe(&self, event: &str) -> Subscription;
}

/// A live subscription to one event name. Dropping it unsubscribes.
#[derive(Debug)]
pub struct Subscription {
    event: String,
    receiver: broadcast::Receiver<PushEvent>,
}

impl Subscription {
    pub fn new(event: impl Into<String>, receiver: broadcast::Receiver<PushEvent>) -> Self {
        Self {
            event: event.into(),
            receiver,
        }
    }

    /// Event name this subscription listens for.
    pub fn event(&self) -> &str {
        &self.event
    }

    /// Wait for the next matching event; `None` once the channel is closed.
    ///
    /// When the subscriber falls behind, the missed events are collapsed into
    /// a single event with a null payload.
    pub async fn next(&mut self) -> Option<PushEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) if event.name == self.event => return Some(event),
                Ok(_) => continue,
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    tracing::warn!(event = %self.event, missed, "Push subscriber lagged");
                    return Some(PushEvent::new(self.event.clone(), Value::Null));
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

/// In-process push bus.
#[derive(Debug, Clone)]
pub struct LocalPushBus {
    sender: broadcast::Sender<PushEvent>,
}

impl LocalPushBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publish an event; returns how many subscribers received it.
    pub fn publish(&self, event: PushEvent) -> usize {
        tracing::debug!(event = %event.name, "Publishing push event");
        self.sender.send(event).unwrap_or(0)
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for LocalPushBus {
    fn default() -> Self {
        Self::new(64)
    }
}

impl PushChannel for LocalPushBus {
    fn subscribe(&self, event: &str) -> Subscription {
        Subscription::new(event, self.sender.subscribe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_subscription_filters_by_name() {
        let bus = LocalPushBus::new(8);
        let mut sub = bus.subscribe("new_detection");

        bus.publish(PushEvent::new("other", json!(1)));
        bus.publish(PushEvent::new("new_detection", json!({"ward": "12"})));

        let event = sub.next().await.unwrap();
        assert_eq!(event.payload, json!({"ward": "12"}));
    }

    #[tokio::test]
    async fn test_drop_unsubscribes() {
        let bus = LocalPushBus::new(8);
        let sub = bus.subscribe("new_detection");
        assert_eq!(bus.subscriber_count(), 1);
        drop(sub);
        assert_eq!(bus.subscriber_count(), 0);
        assert_eq!(bus.publish(PushEvent::new("new_detection", Value::Null)), 0);
    }

    #[tokio::test]
    async fn test_closed_bus_ends_subscription() {
        let bus = LocalPushBus::new(8);
        let mut sub = bus.subscribe("new_detection");
        drop(bus);
        assert_eq!(sub.next().await, None);
    }

    #[tokio::test]
    async fn test_lag_yields_one_event() {
        let bus = LocalPushBus::new(1);
        let mut sub = bus.subscribe("new_detection");
        for i in 0..3 {
            bus.publish(PushEvent::new("new_detection", json!(i)));
        }
        let event = sub.next().await.unwrap();
        assert_eq!(event.payload, Value::Null);
    }
}
