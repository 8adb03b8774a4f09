//! # Cart
//!
//! The cart mapping and its line math. Persistence and change notification
//! live in `foodies-store::CartStore`; this module only knows how quantities
//! move.
//!
//! ## Cart Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Operation           Line absent             Line present (qty n)       │
//! │  ─────────           ───────────             ────────────────────       │
//! │  add(item)           insert {item, 1}        qty = n + 1                │
//! │  remove_one(id)      no-op                   n > 1: qty = n - 1         │
//! │                                              n = 1: line deleted        │
//! │  remove_line(id)     no-op                   line deleted               │
//! │  clear()             all lines deleted                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Lines are unique by item id (adding the same item increases quantity)
//! - Every line has quantity >= 1; a line is deleted, never zeroed
//! - Insertion order is display order, and survives a line's removal

use indexmap::IndexMap;
use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::MenuItem;

/// One row of the cart: an item snapshot plus a quantity.
///
/// `item` is the copy taken when the line was created. Adding the same id
/// again bumps the quantity but keeps this copy, so a feed price change does
/// not reach a line already in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartLine {
    pub item: MenuItem,

    #[serde(rename = "qty")]
    pub quantity: u32,
}

impl CartLine {
    /// Line total (unit price × quantity).
    pub fn line_total(&self) -> Money {
        self.item.unit_price() * self.quantity
    }
}

/// The cart mapping from item id to line.
///
/// Persisted as an ordered sequence of `[itemId, {item, qty}]` pairs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: IndexMap<String, CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Builds a cart from stored pairs.
    ///
    /// Lines with quantity 0 are dropped. A repeated id keeps its first
    /// position and its last value.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, CartLine)>,
    {
        let mut lines = IndexMap::new();
        for (id, line) in entries {
            if line.quantity == 0 {
                lines.shift_remove(&id);
                continue;
            }
            lines.insert(id, line);
        }
        Cart { lines }
    }

    /// Adds one unit of `item`, creating the line if needed.
    ///
    /// Returns the line's new quantity.
    pub fn add(&mut self, item: &MenuItem) -> u32 {
        let line = self
            .lines
            .entry(item.id.clone())
            .or_insert_with(|| CartLine {
                item: item.clone(),
                quantity: 0,
            });
        line.quantity = line.quantity.saturating_add(1);
        line.quantity
    }

    /// Removes one unit of the line keyed by `item_id`.
    ///
    /// Returns the remaining quantity (0 when the line was deleted), or
    /// `None` when there was no such line.
    pub fn remove_one(&mut self, item_id: &str) -> Option<u32> {
        let line = self.lines.get_mut(item_id)?;
        if line.quantity <= 1 {
            self.lines.shift_remove(item_id);
            return Some(0);
        }
        line.quantity -= 1;
        Some(line.quantity)
    }

    /// Deletes the whole line keyed by `item_id`.
    pub fn remove_line(&mut self, item_id: &str) -> Option<CartLine> {
        self.lines.shift_remove(item_id)
    }

    /// Clears all lines from the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Returns the line for `item_id`.
    pub fn get(&self, item_id: &str) -> Option<&CartLine> {
        self.lines.get(item_id)
    }

    /// Returns the quantity for `item_id` (0 when absent).
    pub fn quantity_of(&self, item_id: &str) -> u32 {
        self.lines.get(item_id).map_or(0, |l| l.quantity)
    }

    /// Iterates lines in display order.
    pub fn lines(&self) -> impl Iterator<Item = (&str, &CartLine)> {
        self.lines.iter().map(|(id, line)| (id.as_str(), line))
    }

    /// Returns the number of distinct lines.
    pub fn item_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns the sum of all line quantities.
    pub fn total_quantity(&self) -> u64 {
        self.lines.values().map(|l| u64::from(l.quantity)).sum()
    }

    /// Calculates the subtotal across all lines.
    pub fn subtotal(&self) -> Money {
        self.lines.values().map(CartLine::line_total).sum()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl Serialize for Cart {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.lines.iter())
    }
}

impl<'de> Deserialize<'de> for Cart {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = Vec::<(String, CartLine)>::deserialize(deserializer)?;
        Ok(Cart::from_entries(entries))
    }
}
