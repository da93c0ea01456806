//! Cart aggregation: ordered lines with merge-on-add.
//!
//! The cart owns an ordered list of [`CartLine`]s. Line identity is the
//! (collection, name, color, size) tuple; adding an identical key sums the
//! quantities instead of appending, and append order is display order - the
//! cart never re-sorts. Quantity mutations with an unknown key are no-ops:
//! the cart signals nothing to the caller and changes nothing.
//!
//! The struct is plain serde data so the storefront can keep it in the
//! session store, but all behavior lives here, synchronously, with no
//! environment requirements.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The identity key of a cart line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineKey {
    pub collection: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

/// One entry in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub collection: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    /// First catalog image of the variant, for display.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Unit price at the time the line was added.
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_before: Option<Decimal>,
    /// Always >= 1; a decrement to zero removes the line instead.
    pub quantity: u32,
}

impl CartLine {
    /// The line's identity key.
    #[must_use]
    pub fn key(&self) -> LineKey {
        LineKey {
            collection: self.collection.clone(),
            name: self.name.clone(),
            color: self.color.clone(),
            size: self.size.clone(),
        }
    }

    fn matches(&self, key: &LineKey) -> bool {
        self.collection == key.collection
            && self.name == key.name
            && self.color == key.color
            && self.size == key.size
    }

    /// Undiscounted line total.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// The shopper's cart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// The lines in display (append) order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of units across all lines (cart badge count).
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.lines
            .iter()
            .fold(0u32, |sum, l| sum.saturating_add(l.quantity))
    }

    /// Add a line, merging into an existing line with the same key.
    ///
    /// A zero-quantity add is ignored. Quantities saturate at `u32::MAX`
    /// rather than wrapping; mutations never panic.
    pub fn add(&mut self, line: CartLine) {
        if line.quantity == 0 {
            return;
        }
        let key = line.key();
        if let Some(existing) = self.lines.iter_mut().find(|l| l.matches(&key)) {
            existing.quantity = existing.quantity.saturating_add(line.quantity);
        } else {
            self.lines.push(line);
        }
    }

    /// Increase the quantity of the line with `key` by one, saturating at
    /// `u32::MAX`.
    pub fn increment(&mut self, key: &LineKey) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.matches(key)) {
            line.quantity = line.quantity.saturating_add(1);
        }
    }

    /// Decrease the quantity of the line with `key` by one, removing the
    /// line entirely when it reaches zero.
    pub fn decrement(&mut self, key: &LineKey) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.matches(key)) {
            if line.quantity <= 1 {
                self.lines.retain(|l| !l.matches(key));
            } else {
                line.quantity -= 1;
            }
        }
    }

    /// Remove the line with `key`.
    pub fn remove(&mut self, key: &LineKey) {
        self.lines.retain(|l| !l.matches(key));
    }

    /// Empty the cart (successful order submission).
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Undiscounted sum of price x quantity over all lines.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn line(name: &str, color: &str, size: &str, price: &str, quantity: u32) -> CartLine {
        CartLine {
            collection: "tees".to_string(),
            name: name.to_string(),
            color: Some(color.to_string()),
            size: Some(size.to_string()),
            image: None,
            price: dec(price),
            price_before: None,
            quantity,
        }
    }

    #[test]
    fn identical_keys_merge_into_one_line() {
        let mut cart = Cart::default();
        cart.add(line("Aegean", "navy", "M", "29.90", 2));
        cart.add(line("Aegean", "navy", "M", "29.90", 3));
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines().first().unwrap().quantity, 5);
    }

    #[test]
    fn different_sizes_stay_separate_in_append_order() {
        let mut cart = Cart::default();
        cart.add(line("Aegean", "navy", "M", "29.90", 1));
        cart.add(line("Aegean", "navy", "L", "29.90", 1));
        cart.add(line("Vardaris", "green", "M", "24.90", 1));
        let names: Vec<_> = cart
            .lines()
            .iter()
            .map(|l| (l.name.as_str(), l.size.as_deref().unwrap()))
            .collect();
        assert_eq!(
            names,
            vec![("Aegean", "M"), ("Aegean", "L"), ("Vardaris", "M")]
        );
    }

    #[test]
    fn decrement_at_quantity_one_removes_the_line() {
        let mut cart = Cart::default();
        let l = line("Aegean", "navy", "M", "29.90", 1);
        let key = l.key();
        cart.add(l);
        cart.decrement(&key);
        assert!(cart.is_empty());
    }

    #[test]
    fn increment_and_decrement_adjust_quantity() {
        let mut cart = Cart::default();
        let l = line("Aegean", "navy", "M", "29.90", 2);
        let key = l.key();
        cart.add(l);
        cart.increment(&key);
        assert_eq!(cart.lines().first().unwrap().quantity, 3);
        cart.decrement(&key);
        cart.decrement(&key);
        assert_eq!(cart.lines().first().unwrap().quantity, 1);
    }

    #[test]
    fn unknown_keys_are_no_ops() {
        let mut cart = Cart::default();
        cart.add(line("Aegean", "navy", "M", "29.90", 2));
        let before = cart.clone();

        let missing = LineKey {
            collection: "tees".to_string(),
            name: "Aegean".to_string(),
            color: Some("white".to_string()),
            size: Some("M".to_string()),
        };
        cart.increment(&missing);
        cart.decrement(&missing);
        cart.remove(&missing);
        assert_eq!(cart, before);
    }

    #[test]
    fn subtotal_sums_price_times_quantity() {
        let mut cart = Cart::default();
        cart.add(line("Aegean", "navy", "M", "29.90", 2));
        cart.add(line("Vardaris", "green", "S", "24.95", 1));
        assert_eq!(cart.subtotal(), dec("84.75"));
        assert_eq!(cart.total_quantity(), 3);
    }

    #[test]
    fn quantity_saturates_instead_of_wrapping() {
        let mut cart = Cart::default();
        let l = line("Aegean", "navy", "M", "29.90", u32::MAX);
        let key = l.key();
        cart.add(l);

        // Another add of the same key and an increment must not wrap the
        // quantity back toward zero.
        cart.add(line("Aegean", "navy", "M", "29.90", 1));
        cart.increment(&key);

        assert_eq!(cart.lines().first().unwrap().quantity, u32::MAX);
        assert_eq!(cart.total_quantity(), u32::MAX);
    }

    #[test]
    fn zero_quantity_add_is_ignored() {
        let mut cart = Cart::default();
        cart.add(line("Aegean", "navy", "M", "29.90", 0));
        assert!(cart.is_empty());
    }

    #[test]
    fn cart_round_trips_through_json() {
        let mut cart = Cart::default();
        cart.add(line("Aegean", "navy", "M", "29.90", 2));
        let json = serde_json::to_string(&cart).unwrap();
        let restored: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, cart);
    }
}
