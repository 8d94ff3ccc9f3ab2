//! Topic-addressed data channel seam.
//!
//! The overlay never talks to a transport directly. It subscribes through
//! [`DataChannel`] and keeps the returned [`Subscription`] for as long as it
//! is mounted; dropping the guard deregisters the callback.
//!
//! [`LocalBus`] is the in-process implementation used by the browser bridge,
//! the CLI feed and the tests. It is single-threaded (`Rc`/`RefCell`) like the
//! UI loop it serves.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tracing::debug;

/// A message delivered on a named topic. A missing payload is legal and is
/// ignored by the scoreboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataMessage {
    pub topic: String,
    pub payload: Option<Vec<u8>>,
}

impl DataMessage {
    pub fn new(topic: impl Into<String>, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            topic: topic.into(),
            payload: Some(payload.into()),
        }
    }

    pub fn without_payload(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            payload: None,
        }
    }
}

pub type Handler = Box<dyn FnMut(&DataMessage)>;

pub trait DataChannel {
    /// Register `handler` for `topic`. The registration lives as long as the
    /// returned guard.
    fn subscribe(&self, topic: &str, handler: Handler) -> Subscription;

    /// Deliver `message` to every current subscriber of its topic and return
    /// how many handlers ran.
    fn publish(&self, message: &DataMessage) -> usize;
}

/// Scoped registration; dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}

struct Entry {
    id: u64,
    topic: String,
    handler: Rc<RefCell<Handler>>,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    entries: Vec<Entry>,
}

#[derive(Clone, Default)]
pub struct LocalBus {
    registry: Rc<RefCell<Registry>>,
}

impl LocalBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscriber_count(&self) -> usize {
        self.registry.borrow().entries.len()
    }

    pub fn topic_subscriber_count(&self, topic: &str) -> usize {
        self.registry
            .borrow()
            .entries
            .iter()
            .filter(|e| e.topic == topic)
            .count()
    }
}

impl DataChannel for LocalBus {
    fn subscribe(&self, topic: &str, handler: Handler) -> Subscription {
        let id = {
            let mut reg = self.registry.borrow_mut();
            let id = reg.next_id;
            reg.next_id += 1;
            reg.entries.push(Entry {
                id,
                topic: topic.to_string(),
                handler: Rc::new(RefCell::new(handler)),
            });
            id
        };
        debug!(topic, id, "subscribed");

        let registry = Rc::downgrade(&self.registry);
        Subscription::new(move || {
            if let Some(registry) = registry.upgrade() {
                registry.borrow_mut().entries.retain(|e| e.id != id);
                debug!(id, "unsubscribed");
            }
        })
    }

    fn publish(&self, message: &DataMessage) -> usize {
        // Snapshot targets first so handlers may (un)subscribe while we deliver.
        let targets: Vec<Rc<RefCell<Handler>>> = self
            .registry
            .borrow()
            .entries
            .iter()
            .filter(|e| e.topic == message.topic)
            .map(|e| Rc::clone(&e.handler))
            .collect();

        let mut ran = 0;
        for handler in &targets {
            match handler.try_borrow_mut() {
                Ok(mut f) => {
                    (*f)(message);
                    ran += 1;
                }
                Err(_) => debug!(topic = %message.topic, "skipping re-entrant delivery"),
            }
        }
        ran
    }
}

impl fmt::Debug for LocalBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalBus")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn counter(bus: &LocalBus, topic: &str) -> (Rc<Cell<u32>>, Subscription) {
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        let sub = bus.subscribe(topic, Box::new(move |_| h.set(h.get() + 1)));
        (hits, sub)
    }

    #[test]
    fn delivers_by_topic() {
        let bus = LocalBus::new();
        let (score, _a) = counter(&bus, "scoreboard");
        let (chat, _b) = counter(&bus, "chat");

        assert_eq!(bus.publish(&DataMessage::new("scoreboard", b"{}".to_vec())), 1);
        assert_eq!(score.get(), 1);
        assert_eq!(chat.get(), 0);
        assert_eq!(bus.publish(&DataMessage::without_payload("lobby")), 0);
    }

    #[test]
    fn dropping_guard_unsubscribes() {
        let bus = LocalBus::new();
        let (hits, sub) = counter(&bus, "scoreboard");
        assert_eq!(bus.topic_subscriber_count("scoreboard"), 1);

        drop(sub);
        assert_eq!(bus.subscriber_count(), 0);
        bus.publish(&DataMessage::new("scoreboard", Vec::new()));
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn guard_outliving_bus_is_harmless() {
        let bus = LocalBus::new();
        let (_hits, sub) = counter(&bus, "scoreboard");
        drop(bus);
        drop(sub);
    }

    #[test]
    fn handler_may_drop_its_own_subscription() {
        let bus = LocalBus::new();
        let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let hits = Rc::new(Cell::new(0));

        let sub = {
            let slot = Rc::clone(&slot);
            let hits = Rc::clone(&hits);
            bus.subscribe(
                "scoreboard",
                Box::new(move |_| {
                    hits.set(hits.get() + 1);
                    slot.borrow_mut().take();
                }),
            )
        };
        *slot.borrow_mut() = Some(sub);

        bus.publish(&DataMessage::new("scoreboard", Vec::new()));
        bus.publish(&DataMessage::new("scoreboard", Vec::new()));
        assert_eq!(hits.get(), 1);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn peer_dropped_mid_dispatch_still_gets_message_in_flight() {
        let bus = LocalBus::new();
        let peer: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

        let first_hits = Rc::new(Cell::new(0));
        let _first = {
            let peer = Rc::clone(&peer);
            let hits = Rc::clone(&first_hits);
            bus.subscribe(
                "scoreboard",
                Box::new(move |_| {
                    hits.set(hits.get() + 1);
                    peer.borrow_mut().take();
                }),
            )
        };
        let (second_hits, second) = counter(&bus, "scoreboard");
        *peer.borrow_mut() = Some(second);

        assert_eq!(bus.publish(&DataMessage::new("scoreboard", Vec::new())), 2);
        assert_eq!(bus.topic_subscriber_count("scoreboard"), 1);
        assert_eq!(bus.publish(&DataMessage::new("scoreboard", Vec::new())), 1);
        assert_eq!(first_hits.get(), 2);
        assert_eq!(second_hits.get(), 1);
    }

    #[test]
    fn reentrant_publish_does_not_recurse() {
        let bus = LocalBus::new();
        let hits = Rc::new(Cell::new(0));
        let _sub = {
            let inner = bus.clone();
            let hits = Rc::clone(&hits);
            bus.subscribe(
                "scoreboard",
                Box::new(move |m| {
                    hits.set(hits.get() + 1);
                    inner.publish(m);
                }),
            )
        };
        bus.publish(&DataMessage::new("scoreboard", Vec::new()));
        assert_eq!(hits.get(), 1);
    }
}
