//! Named-event publish/subscribe bus.
//!
//! Events are fired by string name with an optional payload. Subscribers
//! register interest in one or more names and receive matching events on an
//! unbounded channel, which they drain on the main loop.

use super::state::UnitId;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, trace};

/// Resource counters must be redrawn.
pub const UPDATE_RESOURCE_TEXTS: &str = "UpdateResourceTexts";
/// Building affordability must be re-checked.
pub const CHECK_BUILDING_BUTTONS: &str = "CheckBuildingButtons";
/// A unit was added to the selection (payload: unit id).
pub const SELECT_UNIT: &str = "SelectUnit";
/// A unit was removed from the selection (payload: unit code).
pub const DESELECT_UNIT: &str = "DeselectUnit";
/// The settings panel was opened.
pub const PAUSE_GAME: &str = "PauseGame";
/// The settings panel was closed.
pub const RESUME_GAME: &str = "ResumeGame";
/// Units were created by a command or a skill (payload: count or unit id).
pub const UNITS_SPAWNED: &str = "UnitsSpawned";
/// A sound should be played (payload: sound name).
pub const PLAY_SOUND: &str = "PlaySound";
/// A skill finished its cooldown (payload: unit id).
pub const SKILL_READY: &str = "SkillReady";

/// Optional data attached to an event.
#[derive(Debug, Clone, PartialEq)]
pub enum EventPayload {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Unit(UnitId),
}

/// A published event.
#[derive(Debug, Clone, PartialEq)]
pub struct GameEvent {
    pub name: String,
    pub payload: EventPayload,
}

/// Identifies a subscription for later removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Receiving end of a subscription.
#[derive(Debug)]
pub struct Subscription {
    id: SubscriptionId,
    receiver: mpsc::UnboundedReceiver<GameEvent>,
}

impl Subscription {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Returns the next pending event without waiting.
    pub fn try_next(&mut self) -> Option<GameEvent> {
        self.receiver.try_recv().ok()
    }

    /// Takes all pending events.
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::iter::from_fn(|| self.try_next()).collect()
    }
}

/// The event bus.
#[derive(Debug, Default)]
pub struct EventBus {
    listeners: HashMap<String, Vec<(SubscriptionId, mpsc::UnboundedSender<GameEvent>)>>,
    next_id: u64,
    published: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes to every event whose name is in `names`.
    pub fn subscribe(&mut self, names: &[&str]) -> Subscription {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;

        let (tx, rx) = mpsc::unbounded_channel();
        for name in names {
            self.listeners
                .entry((*name).to_string())
                .or_default()
                .push((id, tx.clone()));
        }
        debug!(?id, ?names, "Subscribed to events");

        Subscription { id, receiver: rx }
    }

    /// Removes a subscription from every name. Returns true if it existed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let mut removed = false;
        for senders in self.listeners.values_mut() {
            let before = senders.len();
            senders.retain(|(sid, _)| *sid != id);
            removed |= senders.len() != before;
        }
        self.listeners.retain(|_, senders| !senders.is_empty());
        removed
    }

    /// Publishes an event. Returns the number of subscribers that received it.
    ///
    /// Subscriptions whose receiver was dropped are pruned.
    pub fn publish(&mut self, name: impl Into<String>, payload: EventPayload) -> usize {
        let event = GameEvent {
            name: name.into(),
            payload,
        };
        self.published += 1;
        trace!(name = %event.name, payload = ?event.payload, "Publishing event");

        let Some(senders) = self.listeners.get_mut(&event.name) else {
            return 0;
        };
        senders.retain(|(_, tx)| tx.send(event.clone()).is_ok());
        let delivered = senders.len();
        if senders.is_empty() {
            self.listeners.remove(&event.name);
        }
        delivered
    }

    /// Publishes an event without payload.
    pub fn trigger(&mut self, name: &str) -> usize {
        self.publish(name, EventPayload::None)
    }

    /// Number of live subscriptions for `name`.
    pub fn listener_count(&self, name: &str) -> usize {
        self.listeners.get(name).map_or(0, Vec::len)
    }

    /// Total number of events published so far.
    pub fn published_count(&self) -> u64 {
        self.published
    }
}
