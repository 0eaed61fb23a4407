//! Navigation notifications.
//!
//! Each [`NavigationService`](crate::NavigationService) exposes three
//! [`EventChannel`]s. Subscribers are plain closures, called synchronously
//! in registration order. A subscriber may subscribe or unsubscribe others
//! (or itself) while being called; the change applies from the next event.
//!
//! ```
//! use region_navigator::events::EventChannel;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//!
//! let channel: EventChannel<u32> = EventChannel::new();
//! let seen = Arc::new(AtomicUsize::new(0));
//! let counter = Arc::clone(&seen);
//! let id = channel.subscribe(move |value| {
//!     counter.fetch_add(*value as usize, Ordering::SeqCst);
//! });
//!
//! channel.emit(&2);
//! assert!(channel.unsubscribe(id));
//! channel.emit(&5);
//! assert_eq!(seen.load(Ordering::SeqCst), 2);
//! ```

use crate::context::{NavigationContext, NavigationMode};
use crate::error::ResolveError;
use crate::trace_log;
use crate::view::ViewHandle;
use parking_lot::Mutex;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Token returned by [`EventChannel::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Ordered list of subscribers for one event type.
pub struct EventChannel<T> {
    subscribers: Mutex<Vec<(SubscriptionId, Subscriber<T>)>>,
    next_id: AtomicU64,
}

impl<T> EventChannel<T> {
    pub fn new() -> Self {
        Self {
            subscribers: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Register a subscriber. It runs after every subscriber registered before it.
    pub fn subscribe<F>(&self, subscriber: F) -> SubscriptionId
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.subscribers.lock().push((id, Arc::new(subscriber)));
        id
    }

    /// Remove a subscriber. Returns `false` if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers.lock();
        let before = subscribers.len();
        subscribers.retain(|(existing, _)| *existing != id);
        subscribers.len() != before
    }

    /// Deliver `event` to every subscriber, in registration order.
    pub fn emit(&self, event: &T) {
        // Snapshot so subscribers can (un)subscribe without deadlocking.
        let snapshot: Vec<Subscriber<T>> = self
            .subscribers
            .lock()
            .iter()
            .map(|(_, subscriber)| Arc::clone(subscriber))
            .collect();

        trace_log!("Delivering event to {} subscriber(s)", snapshot.len());
        for subscriber in snapshot {
            subscriber(event);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().len()
    }

    /// Remove every subscriber.
    pub fn clear(&self) {
        self.subscribers.lock().clear();
    }
}

impl<T> Default for EventChannel<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for EventChannel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventChannel")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// The displayed view changed.
#[derive(Debug, Clone)]
pub struct ActiveViewChanged {
    /// Previously active view; `None` on the first navigation.
    pub old: Option<ViewHandle>,
    pub new: ViewHandle,
}

/// A navigation completed.
#[derive(Debug, Clone)]
pub struct Navigated {
    pub context: NavigationContext,
    pub mode: NavigationMode,
}

/// A navigation failed to resolve; nothing changed.
#[derive(Debug, Clone)]
pub struct NavigationFailed {
    pub context: NavigationContext,
    pub mode: NavigationMode,
    pub error: ResolveError,
}
