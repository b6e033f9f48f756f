//! # Store Events
//!
//! Change notifications published after every state mutation.
//!
//! Derived values (`itemsCount`, `subtotal`, the signed-in flag) are never
//! cached by subscribers; an event is the cue to re-read current state, so a
//! subscriber that misses events under load loses nothing once it catches
//! the next one.

use serde::Serialize;
use tokio::sync::broadcast;
use ts_rs::TS;

use crate::cart::CartTotals;

/// Buffered events per subscriber before the channel starts lagging.
const EVENT_BUFFER: usize = 256;

// =============================================================================
// Store Event
// =============================================================================

/// A change notification from one of the store's state containers.
#[derive(Debug, Clone, Serialize, TS)]
#[serde(tag = "type", rename_all = "camelCase")]
#[ts(export)]
pub enum StoreEvent {
    /// The cart changed; fresh totals attached for convenience.
    #[serde(rename_all = "camelCase")]
    CartChanged { totals: CartTotals },

    /// Checkout produced an order.
    #[serde(rename_all = "camelCase")]
    OrderPlaced { order_id: String },

    /// The mirrored auth session changed.
    #[serde(rename_all = "camelCase")]
    SessionChanged { signed_in: bool },
}

// =============================================================================
// Event Bus
// =============================================================================

/// Broadcast channel for [`StoreEvent`]s.
///
/// Cloning the bus shares the same channel; every clone publishes into the
/// same stream of subscribers.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<StoreEvent>,
}

impl EventBus {
    /// Creates a new bus with the default buffer size.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(EVENT_BUFFER);
        EventBus { tx }
    }

    /// Subscribes to all future events. Drop the receiver to unsubscribe.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.tx.subscribe()
    }

    /// Publishes an event.
    ///
    /// A send with no live subscribers is not an error; state containers
    /// publish unconditionally.
    pub fn publish(&self, event: StoreEvent) {
        let _ = self.tx.send(event);
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_publish_reaches_subscriber() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();

        bus.publish(StoreEvent::OrderPlaced {
            order_id: "abc".to_string(),
        });

        match rx.recv().await.unwrap() {
            StoreEvent::OrderPlaced { order_id } => assert_eq!(order_id, "abc"),
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_is_fine() {
        let bus = EventBus::new();
        bus.publish(StoreEvent::SessionChanged { signed_in: false });
    }

    #[tokio::test]
    async fn test_clones_share_the_channel() {
        let bus = EventBus::new();
        let publisher = bus.clone();
        let mut rx = bus.subscribe();

        publisher.publish(StoreEvent::SessionChanged { signed_in: true });

        assert!(matches!(
            rx.recv().await.unwrap(),
            StoreEvent::SessionChanged { signed_in: true }
        ));
    }

    #[test]
    fn test_event_wire_format() {
        let event = StoreEvent::CartChanged {
            totals: CartTotals {
                line_count: 1,
                items_count: 2,
                subtotal_cents: 1998,
            },
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "cartChanged");
        assert_eq!(json["totals"]["subtotalCents"], 1998);
    }
}
