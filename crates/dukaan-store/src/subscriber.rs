//! # Subscriber Registry
//!
//! Change notification for store state, behind `subscribe()`.
//!
//! ## Delivery Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Subscriber Delivery                                  │
//! │                                                                         │
//! │  add / update / delete on the store                                    │
//! │       │                                                                 │
//! │       ▼  (state lock released first)                                   │
//! │  notify(snapshot)                                                      │
//! │       │                                                                 │
//! │       ├──► listener #1  (registration order)                           │
//! │       ├──► listener #2                                                 │
//! │       └──► listener #3                                                 │
//! │                                                                         │
//! │  • Synchronous: notify returns after every listener has run            │
//! │  • Listeners may re-enter the store (snapshot is taken beforehand)     │
//! │  • Unsubscribing is explicit; dropping a Subscription keeps the        │
//! │    listener registered, exactly like losing the returned unsubscribe   │
//! │    function in the screens' world                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};

type Listener<T> = Arc<dyn Fn(&T) + Send + Sync + 'static>;
type ListenerList<T> = Mutex<Vec<(u64, Listener<T>)>>;

// =============================================================================
// Registry
// =============================================================================

/// Registration-ordered listener list for snapshots of type `T`.
pub(crate) struct SubscriberRegistry<T: ?Sized> {
    listeners: Arc<ListenerList<T>>,
    next_id: AtomicU64,
}

impl<T: ?Sized> SubscriberRegistry<T> {
    pub(crate) fn new() -> Self {
        SubscriberRegistry {
            listeners: Arc::new(Mutex::new(Vec::new())),
            next_id: AtomicU64::new(0),
        }
    }

    /// Registers a listener and returns its cancellation handle.
    pub(crate) fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
        T: 'static,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.listeners
            .lock()
            .expect("subscriber mutex poisoned")
            .push((id, Arc::new(listener)));

        let weak: Weak<ListenerList<T>> = Arc::downgrade(&self.listeners);
        Subscription::new(move || {
            if let Some(listeners) = weak.upgrade() {
                listeners
                    .lock()
                    .expect("subscriber mutex poisoned")
                    .retain(|(listener_id, _)| *listener_id != id);
            }
        })
    }

    /// Invokes every listener, in registration order, with the snapshot.
    ///
    /// The listener list lock is released before any listener runs, so a
    /// listener may subscribe or unsubscribe without deadlocking.
    pub(crate) fn notify(&self, snapshot: &T) {
        let current: Vec<Listener<T>> = self
            .listeners
            .lock()
            .expect("subscriber mutex poisoned")
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        for listener in current {
            listener(snapshot);
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.listeners
            .lock()
            .expect("subscriber mutex poisoned")
            .len()
    }
}

// =============================================================================
// Subscription
// =============================================================================

/// Handle returned by `subscribe()`.
///
/// Call [`Subscription::unsubscribe`] to remove the listener. Dropping the
/// handle without calling it leaves the listener registered for the life of
/// the store.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Subscription {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Removes the listener from its registry.
    pub fn unsubscribe(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
