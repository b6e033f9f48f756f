//! # Cart State
//!
//! The single shared owner of the live cart and the order history.
//!
//! ## Thread Safety
//! Cart and history sit behind one `Arc<Mutex<_>>`:
//! 1. Any screen may read or mutate the cart
//! 2. Only one mutation runs at a time
//! 3. Checkout's prepend-order-then-clear-cart is a single atomic step
//!
//! No operation suspends while holding the lock, so there is no possibility
//! of interleaved partial updates.
//!
//! ## Cart State Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  Screen Action            CartState Call           Published Event      │
//! │  ─────────────            ──────────────           ───────────────      │
//! │                                                                         │
//! │  Tap product ────────────► add_item() ───────────► CartChanged          │
//! │  Tap +/- ────────────────► increment/decrement ──► CartChanged          │
//! │  Tap remove ─────────────► remove_item() ────────► CartChanged          │
//! │  Tap clear ──────────────► clear_cart() ─────────► CartChanged          │
//! │  Tap checkout ───────────► checkout() ───────────► CartChanged +        │
//! │                                                     OrderPlaced         │
//! │  View cart/orders ───────► totals()/orders() ────► (read only)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use ts_rs::TS;

use koanile_core::cart::{Cart, CartLine};
use koanile_core::types::{Order, Product, ProductId};

use crate::events::{EventBus, StoreEvent};

// =============================================================================
// Cart Totals
// =============================================================================

/// Derived cart aggregates for screens and events.
///
/// Always computed from the current cart, never stored independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartTotals {
    /// Number of distinct products in the cart.
    pub line_count: usize,

    /// Sum of quantities across all lines.
    pub items_count: i64,

    /// Sum of line totals in cents.
    pub subtotal_cents: i64,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            line_count: cart.line_count(),
            items_count: cart.items_count(),
            subtotal_cents: cart.subtotal().cents(),
        }
    }
}

// =============================================================================
// Cart State
// =============================================================================

/// Cart plus order history, guarded together.
#[derive(Debug, Default)]
struct CartBook {
    cart: Cart,
    /// Newest first; append-only within a process lifetime.
    orders: Vec<Order>,
}

/// Shared, mutation-funneled owner of the cart and order history.
///
/// All writes go through the methods below; callers never touch the cart
/// directly. Every mutation publishes a [`StoreEvent`] so subscribers can
/// recompute whatever they derive.
#[derive(Debug)]
pub struct CartState {
    book: Arc<Mutex<CartBook>>,
    events: EventBus,
}

impl CartState {
    /// Creates an empty cart state publishing on the given bus.
    pub fn new(events: EventBus) -> Self {
        CartState {
            book: Arc::new(Mutex::new(CartBook::default())),
            events,
        }
    }

    /// Adds a product to the cart (merge + clamp semantics).
    pub fn add_item(&self, product: &Product, quantity: i64) {
        debug!(product_id = product.id, quantity, "add_item");
        let totals = self.mutate(|book| book.cart.add_item(product, quantity));
        self.events.publish(StoreEvent::CartChanged { totals });
    }

    /// Removes a line if present; silent no-op otherwise.
    pub fn remove_item(&self, product_id: ProductId) {
        debug!(product_id, "remove_item");
        let totals = self.mutate(|book| book.cart.remove_item(product_id));
        self.events.publish(StoreEvent::CartChanged { totals });
    }

    /// Bumps a line's quantity by one, clamped at its max.
    pub fn increment_item(&self, product_id: ProductId) {
        debug!(product_id, "increment_item");
        let totals = self.mutate(|book| book.cart.increment_item(product_id));
        self.events.publish(StoreEvent::CartChanged { totals });
    }

    /// Drops a line's quantity by one; zero removes the line.
    pub fn decrement_item(&self, product_id: ProductId) {
        debug!(product_id, "decrement_item");
        let totals = self.mutate(|book| book.cart.decrement_item(product_id));
        self.events.publish(StoreEvent::CartChanged { totals });
    }

    /// Sets a line's quantity outright (clamped; zero removes).
    pub fn set_quantity(&self, product_id: ProductId, quantity: i64) {
        debug!(product_id, quantity, "set_quantity");
        let totals = self.mutate(|book| book.cart.set_quantity(product_id, quantity));
        self.events.publish(StoreEvent::CartChanged { totals });
    }

    /// Empties the cart. Order history is untouched.
    pub fn clear_cart(&self) {
        debug!("clear_cart");
        let totals = self.mutate(|book| book.cart.clear());
        self.events.publish(StoreEvent::CartChanged { totals });
    }

    /// Checks out the cart.
    ///
    /// On success the order is prepended to history, the cart is emptied,
    /// and both `CartChanged` and `OrderPlaced` are published. An empty cart
    /// returns `None`, publishes nothing, and mutates nothing.
    pub fn checkout(&self) -> Option<Order> {
        let (order, totals) = {
            let mut book = self.book.lock().expect("cart mutex poisoned");
            let order = book.cart.checkout()?;
            book.orders.insert(0, order.clone());
            (order, CartTotals::from(&book.cart))
        };

        info!(
            order_id = %order.id,
            reference = %order.reference,
            total_cents = order.total_cents,
            lines = order.lines.len(),
            "order placed"
        );
        self.events.publish(StoreEvent::CartChanged { totals });
        self.events.publish(StoreEvent::OrderPlaced {
            order_id: order.id.clone(),
        });
        Some(order)
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Current derived aggregates.
    pub fn totals(&self) -> CartTotals {
        self.with_cart(|cart| CartTotals::from(cart))
    }

    /// Snapshot of the cart lines in display order.
    pub fn lines(&self) -> Vec<CartLine> {
        self.with_cart(|cart| cart.lines().cloned().collect())
    }

    /// Snapshot of the order history, newest first.
    pub fn orders(&self) -> Vec<Order> {
        self.book
            .lock()
            .expect("cart mutex poisoned")
            .orders
            .clone()
    }

    /// Number of orders placed this session.
    pub fn order_count(&self) -> usize {
        self.book.lock().expect("cart mutex poisoned").orders.len()
    }

    /// Executes a function with read access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let totals = cart_state.with_cart(CartTotals::from);
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let book = self.book.lock().expect("cart mutex poisoned");
        f(&book.cart)
    }

    /// Runs a mutation and returns the totals computed under the same lock.
    fn mutate<F>(&self, f: F) -> CartTotals
    where
        F: FnOnce(&mut CartBook),
    {
        let mut book = self.book.lock().expect("cart mutex poisoned");
        f(&mut book);
        CartTotals::from(&book.cart)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
