//! # Cart Module
//!
//! The cart/order state machine.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Cart Operations                                    │
//! │                                                                         │
//! │  Shop Action               Operation               Cart Change          │
//! │  ───────────               ─────────               ───────────          │
//! │                                                                         │
//! │  Tap "Add" ──────────────► add_item() ───────────► merge + clamp       │
//! │                                                                         │
//! │  Tap "+" ────────────────► increment_item() ─────► qty+1, clamp at max │
//! │                                                                         │
//! │  Tap "-" ────────────────► decrement_item() ─────► qty-1, 0 removes    │
//! │                                                                         │
//! │  Tap "Remove" ───────────► remove_item() ────────► line deleted        │
//! │                                                                         │
//! │  Tap "Checkout" ─────────► checkout() ───────────► Order snapshot,     │
//! │                                                     cart emptied        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every operation is a total function: absent ids, zero or negative
//! quantities, over-max requests, and empty-cart checkout all degrade to a
//! clamp or a no-op. The one observable "nothing happened" signal is
//! [`Cart::checkout`] returning `None`.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::money::Money;
use crate::types::{generate_order_reference, Order, OrderLine, OrderStatus, Product, ProductId};

// =============================================================================
// Cart Line
// =============================================================================

/// One product's quantity entry within the cart.
///
/// The product fields are frozen when the line is created: the cart displays
/// consistent data even if the catalog were swapped underneath it, and the
/// eventual order inherits the same snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLine {
    /// Catalog id of the product (the cart's key).
    pub product_id: ProductId,

    /// Slug at time of adding (frozen).
    pub slug: String,

    /// Title at time of adding (frozen).
    pub title: String,

    /// Hero image at time of adding (frozen).
    pub hero_image: String,

    /// Unit price in cents at time of adding (frozen).
    pub unit_price_cents: i64,

    /// Per-line quantity cap, copied from the product.
    pub max_quantity: i64,

    /// Quantity in cart, always in `[1, max_quantity]`.
    pub quantity: i64,

    /// When this line was first added.
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartLine {
    /// Creates a cart line from a product, freezing its display fields.
    fn from_product(product: &Product, quantity: i64) -> Self {
        CartLine {
            product_id: product.id,
            slug: product.slug.clone(),
            title: product.title.clone(),
            hero_image: product.hero_image.clone(),
            unit_price_cents: product.price_cents,
            max_quantity: product.max_quantity,
            quantity,
            added_at: Utc::now(),
        }
    }

    /// Line total (unit price × quantity).
    #[inline]
    pub fn line_total_cents(&self) -> i64 {
        self.unit_price_cents * self.quantity
    }

    /// Line total as Money.
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.line_total_cents())
    }

    fn to_order_line(&self) -> OrderLine {
        OrderLine {
            product_id: self.product_id,
            slug: self.slug.clone(),
            title: self.title.clone(),
            hero_image: self.hero_image.clone(),
            unit_price_cents: self.unit_price_cents,
            quantity: self.quantity,
            line_total_cents: self.line_total_cents(),
        }
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The live, mutable pre-checkout selection.
///
/// ## Invariants
/// - Keyed by product id: at most one line per product
/// - Every line's quantity is in `[1, max_quantity]`
/// - Lines iterate in ascending product id order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    lines: BTreeMap<ProductId, CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            lines: BTreeMap::new(),
        }
    }

    /// Adds a product to the cart, merging with any existing line.
    ///
    /// ## Behavior
    /// - Resulting quantity is `min(max_quantity, prior + quantity)`
    /// - Requests of zero or less add nothing (negative input is floored to
    ///   zero before the clamp)
    /// - Never creates a line whose quantity would be zero
    pub fn add_item(&mut self, product: &Product, quantity: i64) {
        let requested = quantity.max(0);

        if let Some(line) = self.lines.get_mut(&product.id) {
            line.quantity = (line.quantity + requested).min(line.max_quantity);
            return;
        }

        let next = requested.min(product.max_quantity);
        if next > 0 {
            self.lines
                .insert(product.id, CartLine::from_product(product, next));
        }
    }

    /// Removes the line for `product_id` if present. Idempotent.
    pub fn remove_item(&mut self, product_id: ProductId) {
        self.lines.remove(&product_id);
    }

    /// Increases an existing line's quantity by one, clamped at its max.
    ///
    /// Does not create a line from nothing: absent ids are a no-op.
    pub fn increment_item(&mut self, product_id: ProductId) {
        if let Some(line) = self.lines.get_mut(&product_id) {
            line.quantity = (line.quantity + 1).min(line.max_quantity);
        }
    }

    /// Decreases an existing line's quantity by one.
    ///
    /// A quantity that would reach zero removes the line entirely; absent
    /// ids are a no-op.
    pub fn decrement_item(&mut self, product_id: ProductId) {
        if let Some(line) = self.lines.get_mut(&product_id) {
            if line.quantity <= 1 {
                self.lines.remove(&product_id);
            } else {
                line.quantity -= 1;
            }
        }
    }

    /// Sets an existing line's quantity outright (quantity steppers that
    /// accept typed input).
    ///
    /// Clamps at the line's max; zero or less removes the line; absent ids
    /// are a no-op.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: i64) {
        if let Some(line) = self.lines.get_mut(&product_id) {
            if quantity <= 0 {
                self.lines.remove(&product_id);
            } else {
                line.quantity = quantity.min(line.max_quantity);
            }
        }
    }

    /// Empties the cart. Order history (held elsewhere) is untouched.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Checks out the cart.
    ///
    /// Returns `None` on an empty cart, creating nothing and mutating
    /// nothing. Otherwise snapshots the lines and subtotal into a
    /// `Processing` order with a fresh id and reference, empties the cart,
    /// and returns the order.
    pub fn checkout(&mut self) -> Option<Order> {
        if self.is_empty() {
            return None;
        }

        let order = Order {
            id: Uuid::new_v4().to_string(),
            reference: generate_order_reference(),
            status: OrderStatus::Processing,
            placed_at: Utc::now(),
            lines: self.lines.values().map(CartLine::to_order_line).collect(),
            total_cents: self.subtotal().cents(),
        };

        self.lines.clear();
        Some(order)
    }

    // =========================================================================
    // Derived Aggregates (recomputed on read, never cached)
    // =========================================================================

    /// Sum of quantities across all lines.
    pub fn items_count(&self) -> i64 {
        self.lines.values().map(|l| l.quantity).sum()
    }

    /// Sum of line totals.
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.lines.values().map(|l| l.line_total_cents()).sum())
    }

    /// Number of distinct products in the cart.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines in ascending product id order.
    pub fn lines(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.values()
    }

    /// The line for `product_id`, if present.
    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.get(&product_id)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_product(id: ProductId, price_cents: i64, max_quantity: i64) -> Product {
        Product {
            id,
            slug: format!("product-{}", id),
            title: format!("Product {}", id),
            description: String::new(),
            price_cents,
            category_slug: "consoles".to_string(),
            max_quantity,
            hero_image: format!("images/product-{}.jpg", id),
            badge: None,
            rating: None,
        }
    }

    #[test]
    fn test_add_item() {
        let mut cart = Cart::new();
        let product = test_product(1, 999, 10);

        cart.add_item(&product, 2);

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.items_count(), 2);
        assert_eq!(cart.subtotal().cents(), 1998);
    }

    #[test]
    fn test_add_same_product_merges_line() {
        let mut cart = Cart::new();
        let product = test_product(1, 999, 10);

        cart.add_item(&product, 2);
        cart.add_item(&product, 3);

        assert_eq!(cart.line_count(), 1); // still one line
        assert_eq!(cart.items_count(), 5);
    }

    #[test]
    fn test_add_clamps_at_max_quantity() {
        // Add price 10.00, max 3, twice with quantity 2: clamps to 3.
        let mut cart = Cart::new();
        let product = test_product(1, 1000, 3);

        cart.add_item(&product, 2);
        cart.add_item(&product, 2);

        assert_eq!(cart.items_count(), 3);
        assert_eq!(cart.subtotal().cents(), 3000);
    }

    #[test]
    fn test_add_zero_or_negative_is_noop() {
        let mut cart = Cart::new();
        let product = test_product(1, 999, 10);

        cart.add_item(&product, 0);
        assert!(cart.is_empty());

        cart.add_item(&product, -4);
        assert!(cart.is_empty());

        cart.add_item(&product, 2);
        cart.add_item(&product, 0);
        cart.add_item(&product, -1);
        assert_eq!(cart.items_count(), 2);
    }

    #[test]
    fn test_remove_item_is_idempotent() {
        let mut cart = Cart::new();
        let product = test_product(1, 999, 10);
        cart.add_item(&product, 1);

        cart.remove_item(1);
        assert!(cart.is_empty());

        // Never-added and already-removed ids are both silent no-ops.
        cart.remove_item(1);
        cart.remove_item(42);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_increment_clamps_and_ignores_absent() {
        let mut cart = Cart::new();
        let product = test_product(1, 999, 2);
        cart.add_item(&product, 2);

        cart.increment_item(1);
        assert_eq!(cart.items_count(), 2); // clamped at max

        cart.increment_item(42); // absent: no line appears
        assert_eq!(cart.line_count(), 1);
    }

    #[test]
    fn test_decrement_removes_line_at_one() {
        let mut cart = Cart::new();
        let product = test_product(1, 999, 10);
        cart.add_item(&product, 2);

        cart.decrement_item(1);
        assert_eq!(cart.items_count(), 1);

        cart.decrement_item(1);
        assert!(cart.is_empty());
        assert_eq!(cart.items_count(), 0);

        cart.decrement_item(1); // absent: no-op
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity() {
        let mut cart = Cart::new();
        let product = test_product(1, 999, 5);
        cart.add_item(&product, 1);

        cart.set_quantity(1, 4);
        assert_eq!(cart.items_count(), 4);

        cart.set_quantity(1, 50); // clamped at max
        assert_eq!(cart.items_count(), 5);

        cart.set_quantity(1, 0); // removes the line
        assert!(cart.is_empty());

        cart.set_quantity(42, 3); // absent: no line appears
        assert!(cart.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add_item(&test_product(1, 999, 10), 2);
        cart.add_item(&test_product(2, 1500, 10), 1);

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.subtotal(), Money::zero());
    }

    #[test]
    fn test_lines_iterate_in_product_id_order() {
        let mut cart = Cart::new();
        cart.add_item(&test_product(9, 100, 10), 1);
        cart.add_item(&test_product(3, 100, 10), 1);
        cart.add_item(&test_product(7, 100, 10), 1);

        let ids: Vec<_> = cart.lines().map(|l| l.product_id).collect();
        assert_eq!(ids, vec![3, 7, 9]);
    }

    #[test]
    fn test_line_snapshot_is_frozen() {
        let mut cart = Cart::new();
        let mut product = test_product(1, 1000, 10);
        cart.add_item(&product, 1);

        // A later catalog price change must not reach the existing line.
        product.price_cents = 99999;
        let line = cart.line(1).unwrap();
        assert_eq!(line.unit_price_cents, 1000);
        assert_eq!(cart.subtotal().cents(), 1000);
    }

    #[test]
    fn test_checkout_empty_cart_returns_none() {
        let mut cart = Cart::new();
        assert!(cart.checkout().is_none());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_checkout_snapshots_and_empties() {
        let mut cart = Cart::new();
        cart.add_item(&test_product(1, 1000, 10), 1); // $10.00
        cart.add_item(&test_product(2, 2500, 10), 2); // $50.00

        let subtotal_before = cart.subtotal();
        let order = cart.checkout().unwrap();

        assert_eq!(order.total(), subtotal_before);
        assert_eq!(order.total_cents, 6000);
        assert_eq!(order.status, OrderStatus::Processing);
        assert_eq!(order.lines.len(), 2);
        assert_eq!(order.lines[0].product_id, 1);
        assert_eq!(order.lines[1].line_total_cents, 5000);
        assert!(order.reference.starts_with("ORD-"));

        assert!(cart.is_empty());
        assert_eq!(cart.items_count(), 0);
    }

    #[test]
    fn test_checkout_orders_have_distinct_ids() {
        let mut cart = Cart::new();
        let product = test_product(1, 1000, 10);

        cart.add_item(&product, 1);
        let first = cart.checkout().unwrap();

        cart.add_item(&product, 1);
        let second = cart.checkout().unwrap();

        assert_ne!(first.id, second.id);
        assert_ne!(first.reference, second.reference);
    }

    #[test]
    fn test_subtotal_tracks_every_mutation() {
        let mut cart = Cart::new();
        let p1 = test_product(1, 999, 5);
        let p2 = test_product(2, 2500, 5);

        let expected = |cart: &Cart| -> i64 {
            cart.lines()
                .map(|l| l.unit_price_cents * l.quantity)
                .sum()
        };

        cart.add_item(&p1, 2);
        assert_eq!(cart.subtotal().cents(), expected(&cart));
        cart.add_item(&p2, 3);
        assert_eq!(cart.subtotal().cents(), expected(&cart));
        cart.decrement_item(1);
        assert_eq!(cart.subtotal().cents(), expected(&cart));
        cart.increment_item(2);
        assert_eq!(cart.subtotal().cents(), expected(&cart));
        cart.remove_item(2);
        assert_eq!(cart.subtotal().cents(), expected(&cart));
    }
}
