//! Change notifications for presentation layers
//!
//! The coordinator publishes a [`ViewEvent`] on every state transition and
//! every pipeline run. Presentation code subscribes and re-reads the
//! snapshot instead of polling.
//!
//! # Usage
//!
//! ```rust,ignore
//! let mut rx = coordinator.subscribe();
//! coordinator.set_page_index(2)?;
//!
//! if let Ok(envelope) = rx.recv().await {
//!     println!("{:?}", envelope.event);
//! }
//! ```

use crate::core::view::ViewState;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::broadcast;

/// Something observable changed in the view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViewEvent {
    /// The coordinator moved between lifecycle states
    StateChanged { from: ViewState, to: ViewState },

    /// The filter/sort/paginate pipeline produced a new visible page
    PageRecomputed {
        page_index: usize,
        total_pages: usize,
        total_matches: usize,
    },

    /// A fetch result arrived for a superseded generation and was dropped
    StaleFetchDiscarded { generation: u64 },
}

/// Event plus delivery metadata
#[derive(Debug, Clone, Serialize)]
pub struct EventEnvelope {
    /// Monotonic sequence number within one bus
    pub sequence: u64,
    pub timestamp: DateTime<Utc>,
    pub event: ViewEvent,
}

/// Broadcast-based event bus
///
/// Cheap to clone; clones share the channel and the sequence counter.
#[derive(Debug, Clone)]
pub struct ViewEventBus {
    sender: broadcast::Sender<EventEnvelope>,
    sequence: Arc<AtomicU64>,
}

impl ViewEventBus {
    /// Create a bus buffering up to `capacity` events per slow receiver
    ///
    /// A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            sender,
            sequence: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Publish to all subscribers; returns how many will receive it
    pub fn publish(&self, event: ViewEvent) -> usize {
        let envelope = EventEnvelope {
            sequence: self.sequence.fetch_add(1, Ordering::Relaxed),
            timestamp: Utc::now(),
            event,
        };
        // send() only fails without receivers
        self.sender.send(envelope).unwrap_or(0)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<EventEnvelope> {
        self.sender.subscribe()
    }

    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for ViewEventBus {
    fn default() -> Self {
        Self::new(256)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serializes_with_kind_tag() {
        let event = ViewEvent::PageRecomputed {
            page_index: 2,
            total_pages: 3,
            total_matches: 25,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["kind"], "page_recomputed");
        assert_eq!(json["total_matches"], 25);
    }

    #[tokio::test]
    async fn test_publish_subscribe_in_sequence() {
        let bus = ViewEventBus::new(16);
        let mut rx = bus.subscribe();

        bus.publish(ViewEvent::StateChanged {
            from: ViewState::Idle,
            to: ViewState::Fetching,
        });
        bus.publish(ViewEvent::StaleFetchDiscarded { generation: 4 });

        let first = rx.recv().await.unwrap();
        let second = rx.recv().await.unwrap();
        assert_eq!(first.sequence + 1, second.sequence);
        assert_eq!(second.event, ViewEvent::StaleFetchDiscarded { generation: 4 });
    }

    #[test]
    fn test_publish_without_subscribers() {
        let bus = ViewEventBus::default();
        assert_eq!(bus.publish(ViewEvent::StaleFetchDiscarded { generation: 1 }), 0);
    }

    #[test]
    fn test_zero_capacity_still_delivers() {
        let bus = ViewEventBus::new(0);
        let mut rx = bus.subscribe();

        assert_eq!(bus.publish(ViewEvent::StaleFetchDiscarded { generation: 7 }), 1);
        assert_eq!(
            rx.try_recv().unwrap().event,
            ViewEvent::StaleFetchDiscarded { generation: 7 }
        );
    }

    #[test]
    fn test_clone_shares_channel() {
        let bus = ViewEventBus::new(4);
        let _rx = bus.subscribe();
        let other = bus.clone();
        assert_eq!(other.receiver_count(), 1);
    }
}
