//! # Cart Commands
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐                         │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │                         │
//! │  │  Cart    │     │          │     │  (demo)  │                         │
//! │  └──────────┘     └──────────┘     └──────────┘                         │
//! │       ▲                │                 │                              │
//! │       │           add / remove           │ prints total                 │
//! │       │           delete                 │                              │
//! │       │                │                 │                              │
//! │       └──── clear ─────┴─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt::Write;

use foodies_core::Cart;
use foodies_menu::MenuDocument;
use foodies_store::{CartStore, Storage};
use tracing::{debug, info};

use crate::error::{CliError, CliResult};

/// Adds one unit of a menu item, picked from the feed.
pub fn add<S: Storage>(
    cart: &mut CartStore<S>,
    document: &MenuDocument,
    restaurant: &str,
    item: &str,
) -> CliResult<String> {
    debug!(restaurant = %restaurant, item = %item, "cart add command");

    let item = document.find_restaurant(restaurant)?.find_item(item)?;
    cart.add_to_cart(item);

    Ok(format!(
        "{} item(s) in cart, subtotal {}",
        cart.cart_count(),
        cart.subtotal()
    ))
}

/// Removes one unit of a line. An item not in the cart is a no-op.
pub fn remove<S: Storage>(cart: &mut CartStore<S>, item_id: &str) -> String {
    debug!(item_id = %item_id, "cart remove command");

    match cart.remove_from_cart(item_id) {
        Some(0) => format!("Removed {} from cart", item_id),
        Some(remaining) => format!("{} left: {}", item_id, remaining),
        None => format!("{} is not in the cart", item_id),
    }
}

/// Deletes a whole line.
pub fn delete<S: Storage>(cart: &mut CartStore<S>, item_id: &str) -> CliResult<String> {
    debug!(item_id = %item_id, "cart delete command");

    let line = cart
        .remove_line(item_id)
        .ok_or_else(|| CliError::not_found("Cart item", item_id))?;
    Ok(format!("Removed {} x{} from cart", line.item.name, line.quantity))
}

/// Renders the cart drawer.
pub fn show<S: Storage>(cart: &CartStore<S>) -> String {
    debug!("cart show command");
    render(&cart.cart())
}

pub fn clear<S: Storage>(cart: &mut CartStore<S>) -> String {
    debug!("cart clear command");
    cart.clear_cart();
    "Cart cleared".to_string()
}

/// Demo checkout: prints the receipt and empties the cart.
pub fn checkout<S: Storage>(cart: &mut CartStore<S>) -> CliResult<String> {
    let snapshot = cart.cart();
    if snapshot.is_empty() {
        return Err(CliError::validation("Cart is empty"));
    }

    let receipt = render(&snapshot);
    info!(
        lines = snapshot.item_count(),
        total_cents = snapshot.subtotal().cents(),
        "Checkout complete"
    );
    cart.clear_cart();

    Ok(format!("{}Order placed. Thank you!", receipt))
}

fn render(cart: &Cart) -> String {
    if cart.is_empty() {
        return "Your cart is empty.".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "CART{:>44}", format!("{} items", cart.total_quantity()));
    for (id, line) in cart.lines() {
        let _ = writeln!(
            out,
            "{:>6}  {:<28} x{:<3} {:>9}",
            id,
            line.item.name,
            line.quantity,
            line.line_total().to_string()
        );
    }
    let _ = writeln!(out, "Subtotal{:>40}", cart.subtotal().to_string());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::state::testing;
    use foodies_store::MemoryStorage;
    use std::sync::Arc;

    fn store() -> CartStore<MemoryStorage> {
        CartStore::open(MemoryStorage::new(), "cart")
    }

    #[test]
    fn test_add_from_feed() {
        let doc = testing::feed();
        let mut cart = store();

        add(&mut cart, &doc, "1", "11").unwrap();
        let out = add(&mut cart, &doc, "Triple XXX", "root beer float").unwrap();
        assert_eq!(out, "2 item(s) in cart, subtotal $11.75");

        let err = add(&mut cart, &doc, "1", "99").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(cart.cart_count(), 2);
    }

    #[test]
    fn test_remove_and_delete() {
        let doc = testing::feed();
        let mut cart = store();
        add(&mut cart, &doc, "1", "11").unwrap();
        add(&mut cart, &doc, "1", "11").unwrap();
        add(&mut cart, &doc, "1", "12").unwrap();

        assert_eq!(remove(&mut cart, "11"), "11 left: 1");
        assert_eq!(remove(&mut cart, "11"), "Removed 11 from cart");

        let before = cart.cart();
        assert_eq!(remove(&mut cart, "11"), "11 is not in the cart");
        assert!(Arc::ptr_eq(&before, &cart.cart()));

        assert_eq!(
            delete(&mut cart, "12").unwrap(),
            "Removed Root Beer Float x1 from cart"
        );
        assert!(delete(&mut cart, "12").is_err());
        assert!(cart.cart().is_empty());
    }

    #[test]
    fn test_show() {
        let doc = testing::feed();
        let mut cart = store();
        assert_eq!(show(&cart), "Your cart is empty.");

        add(&mut cart, &doc, "1", "12").unwrap();
        add(&mut cart, &doc, "1", "12").unwrap();
        let out = show(&cart);
        assert!(out.contains("2 items"));
        assert!(out.contains("Root Beer Float"));
        assert!(out.contains("x2"));
        assert!(out.contains("$9.00"));
    }

    #[test]
    fn test_checkout() {
        let doc = testing::feed();
        let mut cart = store();

        let err = checkout(&mut cart).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        add(&mut cart, &doc, "1", "11").unwrap();
        let out = checkout(&mut cart).unwrap();
        assert!(out.contains("$7.25"));
        assert!(out.ends_with("Order placed. Thank you!"));
        assert!(cart.cart().is_empty());
    }

    #[test]
    fn test_clear() {
        let doc = testing::feed();
        let mut cart = store();
        add(&mut cart, &doc, "1", "11").unwrap();

        assert_eq!(clear(&mut cart), "Cart cleared");
        assert_eq!(cart.cart_count(), 0);
    }
}
