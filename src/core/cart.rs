//! Transient shopping cart.
//!
//! A [`Cart`] lives only for the duration of a browsing session or a
//! single checkout request; nothing here touches the record store. Each
//! line snapshots the product model it was built from, so later catalog
//! edits do not affect an in-flight cart.

use crate::entities::ProductModel;

/// One line in a cart: a product snapshot, a quantity and an optional
/// free-text note.
#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    /// Snapshot of the product at the time it was added
    pub product: ProductModel,
    /// Number of units
    pub quantity: u32,
    /// Optional note for this line (e.g. an inscription request)
    pub note: Option<String>,
}

/// An ordered collection of cart lines.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Creates an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The cart's lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Adds one unit of `product`. Adding a product already in the cart
    /// increments that line's quantity instead of creating a new line.
    pub fn add(&mut self, product: ProductModel) {
        if let Some(item) = self.items.iter_mut().find(|i| i.product.id == product.id) {
            item.quantity += 1;
        } else {
            self.items.push(CartItem {
                product,
                quantity: 1,
                note: None,
            });
        }
    }

    /// Appends a line with an explicit quantity and note, without
    /// merging. Used when reconstructing a cart from a checkout payload.
    pub fn add_line(&mut self, product: ProductModel, quantity: u32, note: Option<String>) {
        self.items.push(CartItem {
            product,
            quantity,
            note,
        });
    }

    /// Removes the line for `product_id`, if present.
    pub fn remove(&mut self, product_id: i64) {
        self.items.retain(|i| i.product.id != product_id);
    }

    /// Sets the quantity for `product_id`; a quantity of zero removes
    /// the line.
    pub fn update_quantity(&mut self, product_id: i64, quantity: u32) {
        if quantity == 0 {
            self.remove(product_id);
        } else if let Some(item) = self.items.iter_mut().find(|i| i.product.id == product_id) {
            item.quantity = quantity;
        }
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of `unit price * quantity` over all lines, in euros.
    #[must_use]
    pub fn subtotal(&self) -> f64 {
        self.items
            .iter()
            .map(|i| i.product.price * f64::from(i.quantity))
            .sum()
    }

    /// Total weight of the cart in kilograms. Products without a known
    /// weight contribute nothing.
    #[must_use]
    pub fn total_weight_kg(&self) -> f64 {
        self.items
            .iter()
            .map(|i| i.product.weight_kg.unwrap_or(0.0) * f64::from(i.quantity))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::product_model;

    #[test]
    fn test_add_merges_same_product() {
        let mut cart = Cart::new();
        let cake = product_model(1, "Chocolate Dream", 179.0, Some(1.5));

        cart.add(cake.clone());
        cart.add(cake);

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 2);
    }

    #[test]
    fn test_add_keeps_distinct_products_separate() {
        let mut cart = Cart::new();
        cart.add(product_model(1, "Chocolate Dream", 179.0, Some(1.5)));
        cart.add(product_model(2, "Lemon Tart", 24.0, Some(0.6)));

        assert_eq!(cart.items().len(), 2);
    }

    #[test]
    fn test_update_quantity_to_zero_removes_line() {
        let mut cart = Cart::new();
        cart.add(product_model(1, "Chocolate Dream", 179.0, None));

        cart.update_quantity(1, 0);

        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_sets_value() {
        let mut cart = Cart::new();
        cart.add(product_model(1, "Chocolate Dream", 179.0, None));

        cart.update_quantity(1, 4);

        assert_eq!(cart.items()[0].quantity, 4);
    }

    #[test]
    fn test_remove_leaves_other_lines() {
        let mut cart = Cart::new();
        cart.add(product_model(1, "Chocolate Dream", 179.0, None));
        cart.add(product_model(2, "Lemon Tart", 24.0, None));

        cart.remove(1);

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].product.id, 2);
    }

    #[test]
    fn test_subtotal_sums_lines() {
        let mut cart = Cart::new();
        cart.add_line(product_model(1, "Chocolate Dream", 179.0, None), 2, None);
        cart.add_line(product_model(2, "Lemon Tart", 24.0, None), 1, None);

        assert_eq!(cart.subtotal(), 382.0);
    }

    #[test]
    fn test_total_weight_ignores_unknown_weights() {
        let mut cart = Cart::new();
        cart.add_line(product_model(1, "Chocolate Dream", 179.0, Some(1.5)), 2, None);
        cart.add_line(product_model(2, "Gift Card", 50.0, None), 1, None);

        assert_eq!(cart.total_weight_kg(), 3.0);
    }

    #[test]
    fn test_clear_empties_cart() {
        let mut cart = Cart::new();
        cart.add(product_model(1, "Chocolate Dream", 179.0, None));

        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.subtotal(), 0.0);
    }
}
