//! # Menu Commands

use std::fmt::Write;

use foodies_menu::MenuDocument;
use tracing::debug;

use crate::error::CliResult;

/// Lists every restaurant in the feed.
pub fn list(document: &MenuDocument) -> String {
    debug!("menu list command");

    if document.restaurants.is_empty() {
        return "No restaurants available.".to_string();
    }

    let mut out = String::new();
    for restaurant in &document.restaurants {
        let _ = write!(out, "{:>4}  {}", restaurant.id, restaurant.name);
        if !restaurant.cuisine.is_empty() {
            let _ = write!(out, " ({})", restaurant.cuisine);
        }
        let _ = writeln!(out, " - {} items", restaurant.menu.items.len());
    }
    out
}

/// Shows one restaurant's menu, looked up by id or name.
pub fn show(document: &MenuDocument, restaurant: &str) -> CliResult<String> {
    debug!(restaurant = %restaurant, "menu show command");

    let restaurant = document.find_restaurant(restaurant)?;

    let mut out = String::new();
    let _ = writeln!(out, "{}", restaurant.name);
    if restaurant.menu.items.is_empty() {
        let _ = writeln!(out, "  (menu is empty)");
        return Ok(out);
    }
    for item in &restaurant.menu.items {
        let _ = writeln!(out, "{:>6}  {:<32} {:>8}", item.id, item.name, item.unit_price());
        if !item.description.is_empty() {
            let _ = writeln!(out, "        {}", item.description);
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::state::testing;

    #[test]
    fn test_list() {
        let out = list(&testing::feed());
        assert!(out.contains("Triple XXX (Diner) - 2 items"));
        assert!(out.contains("Pappy's Burgers (Burgers) - 0 items"));

        assert_eq!(list(&MenuDocument::default()), "No restaurants available.");
    }

    #[test]
    fn test_show() {
        let doc = testing::feed();

        let out = show(&doc, "triple xxx").unwrap();
        assert!(out.contains("Chili Cheese Fries"));
        assert!(out.contains("$7.25"));
        assert!(out.contains("$4.50"));

        assert!(show(&doc, "pb").unwrap().contains("(menu is empty)"));

        let err = show(&doc, "nowhere").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
