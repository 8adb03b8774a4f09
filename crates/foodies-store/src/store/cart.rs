//! # Cart Store
//!
//! The persistent shopping cart.
//!
//! ## Mutation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Store Operations                                │
//! │                                                                         │
//! │  UI Action             Store Call             Effect                    │
//! │  ─────────             ──────────             ──────                    │
//! │                                                                         │
//! │  Click "Add" ────────► add_to_cart() ───────► qty + 1, item-added event │
//! │                                                                         │
//! │  Click "−" ──────────► remove_from_cart() ──► qty − 1 (line gone at 0)  │
//! │                                                                         │
//! │  Click "Delete" ─────► remove_line() ───────► line gone                 │
//! │                                                                         │
//! │  Click "Clear" ──────► clear_cart() ────────► all lines gone            │
//! │                                                                         │
//! │  Every committed change:                                               │
//! │    new Arc<Cart> ──► save(key) ──► changed listeners                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Identity
//! [`CartStore::cart`] hands out an `Arc<Cart>`. A committed change always
//! installs a fresh `Arc`, never edits the shared one, so
//! `Arc::ptr_eq(&before, &after)` is false exactly when something changed.

use std::sync::Arc;

use foodies_core::{Cart, CartLine, MenuItem, Money};
use tracing::debug;

use crate::notify::{Listeners, Subscription};
use crate::storage::{self, Storage};

/// Event emitted after `add_to_cart`, for transient "added" feedback.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemAdded {
    pub item: MenuItem,
    /// The line's quantity after the add.
    pub quantity: u32,
}

/// The cart plus its persistence and subscribers.
pub struct CartStore<S: Storage> {
    storage: S,
    key: String,
    cart: Arc<Cart>,
    changed: Listeners<Arc<Cart>>,
    item_added: Listeners<ItemAdded>,
}

impl<S: Storage> CartStore<S> {
    /// Opens the store, rehydrating the cart saved under `key`.
    ///
    /// A missing or malformed record yields an empty cart.
    pub fn open(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let cart = storage::load(&storage, &key, Cart::new);
        debug!(key = %key, lines = cart.item_count(), "Cart store opened");

        CartStore {
            storage,
            key,
            cart: Arc::new(cart),
            changed: Listeners::new(),
            item_added: Listeners::new(),
        }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds one unit of `item`. Returns the line's new quantity.
    pub fn add_to_cart(&mut self, item: &MenuItem) -> u32 {
        let mut next = (*self.cart).clone();
        let quantity = next.add(item);
        self.commit(next);

        debug!(item_id = %item.id, quantity, "Item added to cart");
        self.item_added.notify(&ItemAdded {
            item: item.clone(),
            quantity,
        });
        quantity
    }

    /// Removes one unit of the line keyed by `item_id`.
    ///
    /// Returns the remaining quantity (0 when the line was deleted). An
    /// absent id is a no-op: nothing is persisted or announced.
    pub fn remove_from_cart(&mut self, item_id: &str) -> Option<u32> {
        let mut next = (*self.cart).clone();
        let Some(remaining) = next.remove_one(item_id) else {
            debug!(item_id, "Remove skipped, item not in cart");
            return None;
        };
        self.commit(next);

        debug!(item_id, remaining, "Item removed from cart");
        Some(remaining)
    }

    /// Deletes the whole line keyed by `item_id`.
    pub fn remove_line(&mut self, item_id: &str) -> Option<CartLine> {
        let mut next = (*self.cart).clone();
        let removed = next.remove_line(item_id)?;
        self.commit(next);

        debug!(item_id, quantity = removed.quantity, "Cart line deleted");
        Some(removed)
    }

    /// Empties the cart.
    pub fn clear_cart(&mut self) {
        self.commit(Cart::new());
        debug!("Cart cleared");
    }

    /// Re-reads the cart from storage, discarding the in-memory copy.
    ///
    /// This is the only way to pick up writes made by another instance.
    pub fn reload(&mut self) {
        let cart = storage::load(&self.storage, &self.key, Cart::new);
        debug!(lines = cart.item_count(), "Cart reloaded from storage");
        self.cart = Arc::new(cart);
        self.changed.notify(&self.cart);
    }

    fn commit(&mut self, next: Cart) {
        self.cart = Arc::new(next);
        storage::save(&self.storage, &self.key, self.cart.as_ref());
        self.changed.notify(&self.cart);
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Returns the current snapshot.
    pub fn cart(&self) -> Arc<Cart> {
        Arc::clone(&self.cart)
    }

    /// Sum of all line quantities.
    pub fn cart_count(&self) -> u64 {
        self.cart.total_quantity()
    }

    pub fn subtotal(&self) -> Money {
        self.cart.subtotal()
    }

    // =========================================================================
    // Subscriptions
    // =========================================================================

    /// Calls `listener` with the new snapshot after every committed change.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&Arc<Cart>) + Send + Sync + 'static,
    {
        self.changed.subscribe(listener)
    }

    /// Calls `listener` after every `add_to_cart`.
    pub fn on_item_added<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&ItemAdded) + Send + Sync + 'static,
    {
        self.item_added.subscribe(listener)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    const KEY: &str = "purdueFoodiesCart:v1";

    fn item(id: &str, price: f64) -> MenuItem {
        MenuItem::new(id, format!("Dish {}", id), price)
    }

    fn counter<S: Storage>(store: &CartStore<S>) -> Arc<AtomicUsize> {
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        let _ = store.subscribe(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        });
        count
    }

    #[test]
    fn test_add_and_count() {
        let mut store = CartStore::open(MemoryStorage::new(), KEY);

        assert_eq!(store.add_to_cart(&item("1", 3.5)), 1);
        assert_eq!(store.add_to_cart(&item("1", 3.5)), 2);
        assert_eq!(store.add_to_cart(&item("2", 1.0)), 1);

        assert_eq!(store.cart_count(), 3);
        assert_eq!(store.subtotal().cents(), 800);
    }

    #[test]
    fn test_subtotal_of_huge_feed_price_saturates() {
        let mut store = CartStore::open(MemoryStorage::new(), KEY);
        let gold = MenuItem::new("1", "Gold", 1e17);

        store.add_to_cart(&gold);
        store.add_to_cart(&gold);
        store.add_to_cart(&item("2", 1.0));

        assert_eq!(store.cart_count(), 3);
        assert_eq!(store.subtotal().cents(), i64::MAX);
    }

    #[test]
    fn test_count_tracks_adds_minus_removes() {
        let mut store = CartStore::open(MemoryStorage::new(), KEY);
        let ops: &[(&str, bool)] = &[
            ("a", true),
            ("b", true),
            ("a", true),
            ("a", false),
            ("b", false),
            ("b", false), // line already gone
            ("c", false), // never added
            ("a", false),
            ("a", false), // line already gone
            ("c", true),
        ];

        let mut expected: i64 = 0;
        for (id, add) in ops {
            if *add {
                store.add_to_cart(&item(id, 1.0));
                expected += 1;
            } else if store.remove_from_cart(id).is_some() {
                expected -= 1;
            }
        }

        assert_eq!(store.cart_count() as i64, expected);
        assert_eq!(store.cart_count(), 1);
    }

    #[test]
    fn test_snapshot_identity_changes_only_on_mutation() {
        let mut store = CartStore::open(MemoryStorage::new(), KEY);
        let first = store.cart();
        assert!(Arc::ptr_eq(&first, &store.cart()));

        store.add_to_cart(&item("1", 2.0));
        let second = store.cart();
        assert!(!Arc::ptr_eq(&first, &second));
        assert!(first.is_empty());

        store.remove_from_cart("missing");
        assert!(Arc::ptr_eq(&second, &store.cart()));
    }

    #[test]
    fn test_remove_absent_is_silent_noop() {
        let mut store = CartStore::open(MemoryStorage::new(), KEY);
        store.add_to_cart(&item("1", 2.0));
        let notified = counter(&store);

        assert_eq!(store.remove_from_cart("nope"), None);
        assert_eq!(store.remove_line("nope"), None);
        assert_eq!(store.cart_count(), 1);
        assert_eq!(notified.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_remove_deletes_line_at_zero() {
        let mut store = CartStore::open(MemoryStorage::new(), KEY);
        store.add_to_cart(&item("1", 2.0));

        assert_eq!(store.remove_from_cart("1"), Some(0));
        assert!(store.cart().get("1").is_none());
        assert_eq!(store.cart_count(), 0);
    }

    #[test]
    fn test_clear() {
        let storage = MemoryStorage::new();
        let mut store = CartStore::open(storage.clone(), KEY);
        store.add_to_cart(&item("1", 2.0));
        store.add_to_cart(&item("2", 2.0));

        store.clear_cart();
        assert!(store.cart().is_empty());
        assert_eq!(store.cart_count(), 0);

        let reopened = CartStore::open(storage, KEY);
        assert!(reopened.cart().is_empty());
    }

    #[test]
    fn test_round_trip_through_storage() {
        let storage = MemoryStorage::new();
        let mut store = CartStore::open(storage.clone(), KEY);
        let mut pasta = item("7", 12.99);
        pasta.tags = vec!["vegetarian".to_string()];
        store.add_to_cart(&pasta);
        store.add_to_cart(&pasta);
        store.add_to_cart(&item("3", 4.0));

        let reopened = CartStore::open(storage, KEY);
        let snapshot = reopened.cart();
        assert_eq!(*snapshot, *store.cart());
        let order: Vec<&str> = snapshot.lines().map(|(id, _)| id).collect();
        assert_eq!(order, vec!["7", "3"]);
    }

    #[test]
    fn test_malformed_record_opens_empty() {
        let storage = MemoryStorage::new();
        storage.set_item(KEY, r#"{"7": {"qty": 2}}"#).unwrap();

        let store = CartStore::open(storage, KEY);
        assert!(store.cart().is_empty());
    }

    #[test]
    fn test_write_failure_keeps_in_memory_state() {
        let storage = MemoryStorage::new();
        let mut store = CartStore::open(storage.clone(), KEY);
        store.add_to_cart(&item("1", 1.0));

        storage.set_fail_writes(true);
        store.add_to_cart(&item("1", 1.0));
        assert_eq!(store.cart_count(), 2);

        // the durable copy still has the last successful write
        let reopened = CartStore::open(storage, KEY);
        assert_eq!(reopened.cart_count(), 1);
    }

    #[test]
    fn test_listeners_fire_once_per_mutation() {
        let mut store = CartStore::open(MemoryStorage::new(), KEY);
        let notified = counter(&store);
        let added = Arc::new(Mutex::new(Vec::new()));
        let a = Arc::clone(&added);
        let _ = store.on_item_added(move |e| {
            a.lock().unwrap().push((e.item.id.clone(), e.quantity));
        });

        store.add_to_cart(&item("1", 1.0));
        store.add_to_cart(&item("1", 1.0));
        store.remove_from_cart("1");
        store.clear_cart();

        assert_eq!(notified.load(Ordering::SeqCst), 4);
        assert_eq!(
            *added.lock().unwrap(),
            vec![("1".to_string(), 1), ("1".to_string(), 2)]
        );
    }

    #[test]
    fn test_listener_sees_new_snapshot() {
        let mut store = CartStore::open(MemoryStorage::new(), KEY);
        let seen = Arc::new(AtomicUsize::new(0));
        let s = Arc::clone(&seen);
        let sub = store.subscribe(move |cart| {
            s.store(cart.total_quantity() as usize, Ordering::SeqCst);
        });

        store.add_to_cart(&item("1", 1.0));
        store.add_to_cart(&item("2", 1.0));
        assert_eq!(seen.load(Ordering::SeqCst), 2);

        assert!(sub.unsubscribe());
        store.clear_cart();
        assert_eq!(seen.load(Ordering::SeqCst), 2);
    }

    /// Last-writer-wins across instances, no cross-tab invalidation.
    #[test]
    fn test_two_instances_last_writer_wins() {
        let storage = MemoryStorage::new();
        let mut tab_a = CartStore::open(storage.clone(), KEY);
        let mut tab_b = CartStore::open(storage.clone(), KEY);

        tab_a.add_to_cart(&item("1", 1.0));
        assert_eq!(tab_b.cart_count(), 0);

        tab_b.add_to_cart(&item("2", 1.0));
        let durable = CartStore::open(storage, KEY);
        assert!(durable.cart().get("1").is_none());
        assert_eq!(durable.cart().quantity_of("2"), 1);

        tab_a.reload();
        assert_eq!(tab_a.cart().quantity_of("1"), 0);
        assert_eq!(tab_a.cart().quantity_of("2"), 1);
    }
}
