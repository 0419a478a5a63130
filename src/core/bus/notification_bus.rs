//=========================================================================
// Notification Bus
//=========================================================================
//
// String-keyed cross-cutting pub/sub for framework events.
//
// Architecture:
//   Machine/Director → publish(event, data)
//                           ↓
//   subscriptions: Vec<(filter, Sender)>
//                           ↓
//   Observers ← Receiver<Notification> (crossbeam channel)
//
// Disconnected receivers are pruned on the next publish. Only
// successful operations are broadcast; rejections are log-only.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{unbounded, Receiver, Sender};
use log::debug;
use serde_json::Value;

//=== Internal Dependencies ===============================================

use crate::core::catalog::PropertyBag;

//=== Event Names =========================================================

/// Published after every successful state change, `{from, to}` payload.
pub const GAME_STATE_CHANGED: &str = "game_state_changed";

/// Published when the pause flag flips, `{paused}` payload.
pub const GAME_PAUSED: &str = "game_paused";

/// Published after a deferred scene swap is applied at the tick
/// boundary, `{path, transition}` payload.
pub const SCENE_CHANGED: &str = "scene_changed";

//=== Notification ========================================================

/// One cross-cutting event with its JSON object payload.
#[derive(Debug, Clone)]
pub struct Notification {
    pub event: String,
    pub data: PropertyBag,
}

/// Builds a payload map from `(key, value)` pairs.
pub fn payload<const N: usize>(entries: [(&str, Value); N]) -> PropertyBag {
    entries
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}

//=== Subscription ========================================================

struct Subscription {
    /// `None` subscribes to every event.
    filter: Option<String>,
    sender: Sender<Notification>,
}

impl Subscription {
    fn wants(&self, event: &str) -> bool {
        self.filter.as_deref().map_or(true, |f| f == event)
    }
}

//=== Notification Bus ====================================================

/// Multi-consumer broadcast of framework events.
///
/// Subscribers receive clones of each matching notification over an
/// unbounded channel and may drain them whenever convenient; the bus
/// never blocks on a slow consumer.
pub struct NotificationBus {
    subscriptions: Vec<Subscription>,
}

impl NotificationBus {
    /// Creates a bus with no subscribers.
    pub fn new() -> Self {
        Self {
            subscriptions: Vec::new(),
        }
    }

    //--- Subscription -----------------------------------------------------

    /// Subscribes to one event by name.
    pub fn subscribe(&mut self, event: &str) -> Receiver<Notification> {
        let (sender, receiver) = unbounded();
        self.subscriptions.push(Subscription {
            filter: Some(event.to_string()),
            sender,
        });
        receiver
    }

    /// Subscribes to every event.
    pub fn subscribe_all(&mut self) -> Receiver<Notification> {
        let (sender, receiver) = unbounded();
        self.subscriptions.push(Subscription {
            filter: None,
            sender,
        });
        receiver
    }

    /// Number of live subscriptions (disconnected ones linger until the
    /// next publish).
    pub fn subscriber_count(&self) -> usize {
        self.subscriptions.len()
    }

    //--- Publication ------------------------------------------------------

    /// Broadcasts an event to every matching subscriber, pruning
    /// subscribers whose receiver has been dropped.
    pub fn publish(&mut self, event: &str, data: PropertyBag) {
        debug!("Publishing {:?}", event);
        let note = Notification {
            event: event.to_string(),
            data,
        };
        self.subscriptions.retain(|sub| {
            if !sub.wants(&note.event) {
                return true;
            }
            sub.sender.send(note.clone()).is_ok()
        });
    }
}

impl Default for NotificationBus {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Tests
//=========================================================================
