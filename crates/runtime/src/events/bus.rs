//! Topic-based event bus implementation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::broadcast;

use super::types::{NodeEvent, ProgressionEvent, SessionEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Session lifecycle and progress
    Session,
    /// Node durability and hotspots
    Node,
    /// Tools, levels and specializations
    Progression,
}

impl Topic {
    pub const ALL: [Topic; 3] = [Topic::Session, Topic::Node, Topic::Progression];
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GatheringEvent {
    Session(SessionEvent),
    Node(NodeEvent),
    Progression(ProgressionEvent),
}

impl GatheringEvent {
    pub fn topic(&self) -> Topic {
        match self {
            GatheringEvent::Session(_) => Topic::Session,
            GatheringEvent::Node(_) => Topic::Node,
            GatheringEvent::Progression(_) => Topic::Progression,
        }
    }
}

impl From<SessionEvent> for GatheringEvent {
    fn from(event: SessionEvent) -> Self {
        GatheringEvent::Session(event)
    }
}

impl From<NodeEvent> for GatheringEvent {
    fn from(event: NodeEvent) -> Self {
        GatheringEvent::Node(event)
    }
}

impl From<ProgressionEvent> for GatheringEvent {
    fn from(event: ProgressionEvent) -> Self {
        GatheringEvent::Progression(event)
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Publishing is best-effort: events published with
/// no subscriber are dropped.
pub struct EventBus {
    channels: Arc<HashMap<Topic, broadcast::Sender<GatheringEvent>>>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let channels = Topic::ALL
            .into_iter()
            .map(|topic| (topic, broadcast::channel(capacity).0))
            .collect();

        Self {
            channels: Arc::new(channels),
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: impl Into<GatheringEvent>) {
        let event = event.into();
        let topic = event.topic();

        if let Some(tx) = self.channels.get(&topic)
            && tx.send(event).is_err()
        {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<GatheringEvent> {
        match self.channels.get(&topic) {
            Some(tx) => tx.subscribe(),
            // Every topic is created up front.
            None => broadcast::channel(1).1,
        }
    }

    /// Subscribe to multiple topics
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<GatheringEvent>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            channels: Arc::clone(&self.channels),
        }
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
    use gathering_core::{NodeId, Timestamp};

    #[test]
    fn events_route_by_topic() {
        let bus = EventBus::with_capacity(8);
        let mut nodes = bus.subscribe(Topic::Node);
        let mut sessions = bus.subscribe(Topic::Session);

        bus.publish(NodeEvent::Depleted {
            node: NodeId(1),
            respawn_at: Timestamp::from_secs(60),
        });

        let received = nodes.try_recv().unwrap();
        assert_eq!(received.topic(), Topic::Node);
        assert!(sessions.try_recv().is_err());
    }

    #[test]
    fn publishing_without_subscribers_is_fine() {
        let bus = EventBus::new();
        bus.publish(NodeEvent::Harvested {
            node: NodeId(1),
            remaining: 2,
        });
    }
}
