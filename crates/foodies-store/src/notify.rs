//! # Listener Registry
//!
//! Synchronous subscriber lists used by both stores.
//!
//! ## Delivery
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  store mutation ──► persist ──► notify(&event)                         │
//! │                                    │                                    │
//! │                                    ├──► listener 1 (in subscribe order) │
//! │                                    ├──► listener 2                      │
//! │                                    └──► listener n                      │
//! │                                                                         │
//! │  Every listener runs once, on the caller's thread, before notify()     │
//! │  returns. No batching, no queue.                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The list is snapshotted before delivery, so a listener may subscribe or
//! unsubscribe without deadlocking; the change applies from the next event.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Registry<T> {
    next_id: u64,
    entries: Vec<(u64, Callback<T>)>,
}

fn lock<T>(registry: &Mutex<Registry<T>>) -> MutexGuard<'_, Registry<T>> {
    registry.lock().unwrap_or_else(PoisonError::into_inner)
}

/// An ordered set of callbacks receiving `&T`.
pub struct Listeners<T> {
    registry: Arc<Mutex<Registry<T>>>,
}

impl<T: 'static> Listeners<T> {
    pub fn new() -> Self {
        Listeners {
            registry: Arc::new(Mutex::new(Registry {
                next_id: 0,
                entries: Vec::new(),
            })),
        }
    }

    /// Registers `listener` and returns the handle that removes it.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = {
            let mut registry = lock(&self.registry);
            let id = registry.next_id;
            registry.next_id += 1;
            registry.entries.push((id, Arc::new(listener)));
            id
        };

        let weak: Weak<Mutex<Registry<T>>> = Arc::downgrade(&self.registry);
        Subscription {
            cancel: Some(Box::new(move || {
                let Some(registry) = weak.upgrade() else {
                    return false;
                };
                let mut registry = lock(&registry);
                let before = registry.entries.len();
                registry.entries.retain(|(entry_id, _)| *entry_id != id);
                registry.entries.len() != before
            })),
        }
    }

    /// Calls every registered listener with `event`.
    pub fn notify(&self, event: &T) {
        let snapshot: Vec<Callback<T>> = lock(&self.registry)
            .entries
            .iter()
            .map(|(_, cb)| Arc::clone(cb))
            .collect();

        for listener in snapshot {
            listener(event);
        }
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        lock(&self.registry).entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: 'static> Default for Listeners<T> {
    fn default() -> Self {
        Listeners::new()
    }
}

impl<T> fmt::Debug for Listeners<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("len", &lock(&self.registry).entries.len())
            .finish()
    }
}

// =============================================================================
// Subscription
// =============================================================================

/// Handle returned by `subscribe`.
///
/// Dropping it leaves the listener registered; call
/// [`Subscription::unsubscribe`] to remove it.
#[must_use = "keep the subscription to be able to unsubscribe"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() -> bool + Send>>,
}

impl Subscription {
    /// Removes the listener. Returns false if the store is already gone or
    /// the listener was removed before.
    pub fn unsubscribe(mut self) -> bool {
        self.cancel.take().is_some_and(|cancel| cancel())
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_notify_in_subscribe_order() {
        let listeners: Listeners<u32> = Listeners::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        for tag in ["a", "b"] {
            let seen = Arc::clone(&seen);
            let _ = listeners.subscribe(move |n: &u32| seen.lock().unwrap().push((tag, *n)));
        }

        listeners.notify(&1);
        listeners.notify(&2);

        assert_eq!(
            *seen.lock().unwrap(),
            vec![("a", 1), ("b", 1), ("a", 2), ("b", 2)]
        );
    }

    #[test]
    fn test_unsubscribe() {
        let listeners: Listeners<()> = Listeners::new();
        let count = Arc::new(AtomicUsize::new(0));

        let c = Arc::clone(&count);
        let sub = listeners.subscribe(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        });

        listeners.notify(&());
        assert!(sub.unsubscribe());
        listeners.notify(&());

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(listeners.is_empty());
    }

    #[test]
    fn test_unsubscribe_after_registry_dropped() {
        let listeners: Listeners<()> = Listeners::new();
        let sub = listeners.subscribe(|_| {});
        drop(listeners);
        assert!(!sub.unsubscribe());
    }

    #[test]
    fn test_listener_may_subscribe_during_notify() {
        let listeners: Arc<Listeners<()>> = Arc::new(Listeners::new());
        let inner = Arc::clone(&listeners);
        let _ = listeners.subscribe(move |_| {
            let _ = inner.subscribe(|_| {});
        });

        listeners.notify(&());
        assert_eq!(listeners.len(), 2);
    }
}
