//! # Highlight Activation Channel
//!
//! In-process broadcast announcing which highlight (if any) is active, so
//! independent UI surfaces such as a comment sidebar can follow the editor
//! without holding a reference to it.
//!
//! One [`ActivationChannel`] is constructed per running application and
//! passed (cheaply cloned) to whatever needs it. Delivery is synchronous and
//! single-threaded: `publish` returns after every current subscriber has run.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use serde::{Deserialize, Serialize};

/// Reserved name of the activation channel.
pub const HIGHLIGHT_EVENT_NAME: &str = "commentHighlight";

/// Payload of an activation event; `None` means no highlight is active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightEvent {
    pub highlight_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

type Callback = Rc<dyn Fn(&HighlightEvent)>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    subscribers: Vec<(SubscriberId, Callback)>,
}

impl Registry {
    fn contains(&self, id: SubscriberId) -> bool {
        self.subscribers.iter().any(|(sid, _)| *sid == id)
    }

    fn remove(&mut self, id: SubscriberId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        before != self.subscribers.len()
    }
}

/// Handle to the shared subscriber registry.
#[derive(Clone, Default)]
pub struct ActivationChannel {
    registry: Rc<RefCell<Registry>>,
}

impl ActivationChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self) -> &'static str {
        HIGHLIGHT_EVENT_NAME
    }

    /// Deliver `{ highlightId }` to every current subscriber, in
    /// registration order.
    ///
    /// Subscribers removed while the event is being delivered are skipped if
    /// they have not run yet; subscribers added during delivery first hear
    /// the next event.
    pub fn publish(&self, highlight_id: Option<&str>) {
        let event = HighlightEvent {
            highlight_id: highlight_id.map(str::to_string),
        };
        let snapshot: Vec<(SubscriberId, Callback)> = self.registry.borrow().subscribers.clone();
        log::debug!(
            "{}: publishing {:?} to {} subscriber(s)",
            HIGHLIGHT_EVENT_NAME,
            event.highlight_id,
            snapshot.len()
        );

        for (id, callback) in snapshot {
            if !self.registry.borrow().contains(id) {
                continue;
            }
            callback(&event);
        }
    }

    /// Register `callback`; it stays registered until the returned
    /// [`Subscription`] is unsubscribed or dropped.
    #[must_use = "dropping the Subscription unsubscribes immediately"]
    pub fn subscribe(&self, callback: impl Fn(&HighlightEvent) + 'static) -> Subscription {
        let mut registry = self.registry.borrow_mut();
        let id = SubscriberId(registry.next_id);
        registry.next_id += 1;
        let callback: Callback = Rc::new(callback);
        registry.subscribers.push((id, callback));
        Subscription {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Remove a subscriber by id. Returns false if it was already gone.
    pub fn unsubscribe(&self, id: SubscriberId) -> bool {
        self.registry.borrow_mut().remove(id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.registry.borrow().subscribers.len()
    }
}

impl std::fmt::Debug for ActivationChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActivationChannel")
            .field("name", &HIGHLIGHT_EVENT_NAME)
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// Scoped registration on an [`ActivationChannel`].
///
/// Dropping it unsubscribes, so a component holding one is released on
/// every exit path of its owning scope.
#[derive(Debug)]
pub struct Subscription {
    id: SubscriberId,
    registry: Weak<RefCell<Registry>>,
}

impl Subscription {
    pub fn id(&self) -> SubscriberId {
        self.id
    }

    /// Deregister this callback. Safe to call repeatedly, including from
    /// inside a callback during `publish`.
    pub fn unsubscribe(&self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.borrow_mut().remove(self.id);
        }
    }

    /// Keep the callback registered past this handle's lifetime.
    ///
    /// The returned id can still be passed to
    /// [`ActivationChannel::unsubscribe`].
    pub fn detach(mut self) -> SubscriberId {
        self.registry = Weak::new();
        self.id
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}
