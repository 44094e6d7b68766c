//! Topic-based event bus for session events.
//!
//! Events are published to specific topics and consumers subscribe only to
//! the topics they need: a message pane wants the narration stream, a match
//! recorder wants phase transitions, and neither should have to filter the
//! other's traffic.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::{broadcast, RwLock};

use lanefall_core::{GameEvent, GamePhase, Team};

/// Topics for event routing.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize)]
pub enum Topic {
    /// Narration stream: moves, attacks, kills, spawns.
    Message,
    /// Match lifecycle: phase transitions and the final result.
    Phase,
}

/// Event wrapper that carries the topic and typed payload.
#[derive(Debug, Clone, Serialize)]
pub enum Event {
    Message(GameEvent),
    PhaseChanged(GamePhase),
    MatchEnded { winner: Team, reason: String },
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Message(_) => Topic::Message,
            Event::PhaseChanged(_) | Event::MatchEnded { .. } => Topic::Phase,
        }
    }

    /// Routes a raw engine event to its bus representation. Lifecycle events
    /// move to the `Phase` topic; everything else is narration.
    pub fn from_game_event(event: GameEvent) -> Self {
        match event {
            GameEvent::PhaseChanged { phase } => Event::PhaseChanged(phase),
            GameEvent::GameOver { winner, reason } => Event::MatchEnded { winner, reason },
            other => Event::Message(other),
        }
    }
}

/// Topic-based event bus.
///
/// Consumers subscribe to specific topics and only receive events published
/// there. Delivery is best-effort: a topic with no subscribers drops its
/// events, and a lagging subscriber drops its oldest.
pub struct EventBus {
    channels: Arc<RwLock<HashMap<Topic, broadcast::Sender<Event>>>>,
}

impl EventBus {
    const DEFAULT_CAPACITY: usize = 256;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let mut channels = HashMap::new();
        channels.insert(Topic::Message, broadcast::channel(capacity).0);
        channels.insert(Topic::Phase, broadcast::channel(capacity).0);
        Self {
            channels: Arc::new(RwLock::new(channels)),
        }
    }

    /// Publishes an event to its topic. Never blocks: if the bus lock is
    /// contended the event is skipped.
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        match self.channels.try_read() {
            Ok(channels) => {
                if let Some(tx) = channels.get(&topic) {
                    if tx.send(event).is_err() {
                        // No subscribers on this topic; normal, not an error.
                        tracing::trace!(?topic, "no subscribers");
                    }
                }
            }
            Err(_) => {
                tracing::debug!(?topic, "event bus lock contended, dropping event");
            }
        }
    }

    /// Subscribes to a single topic.
    pub fn subscribe(&self, topic: Topic) -> Option<broadcast::Receiver<Event>> {
        let channels = self.channels.try_read().ok()?;
        channels.get(&topic).map(|tx| tx.subscribe())
    }

    /// Subscribes to several topics at once.
    pub fn subscribe_multiple(&self, topics: &[Topic]) -> HashMap<Topic, broadcast::Receiver<Event>> {
        let Ok(channels) = self.channels.try_read() else {
            return HashMap::new();
        };
        topics
            .iter()
            .filter_map(|&topic| channels.get(&topic).map(|tx| (topic, tx.subscribe())))
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

    #[test]
    fn events_route_by_topic() {
        let narration = Event::from_game_event(GameEvent::UnitDied {
            unit: "Enemy Minion".into(),
        });
        assert_eq!(narration.topic(), Topic::Message);

        let lifecycle = Event::from_game_event(GameEvent::GameOver {
            winner: Team::Player,
            reason: "You destroyed the enemy nexus! Victory!".into(),
        });
        assert_eq!(lifecycle.topic(), Topic::Phase);
    }

    #[tokio::test]
    async fn subscribers_only_see_their_topic() {
        let bus = EventBus::new();
        let mut phase_rx = bus.subscribe(Topic::Phase).expect("phase topic exists");

        bus.publish(Event::Message(GameEvent::MinionWave { spawned: 6 }));
        bus.publish(Event::PhaseChanged(GamePhase::Playing));

        let received = phase_rx.recv().await.expect("phase event delivered");
        assert!(matches!(received, Event::PhaseChanged(GamePhase::Playing)));
        assert!(phase_rx.try_recv().is_err());
    }
}
