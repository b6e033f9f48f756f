//! # Storefront Facade
//!
//! The typed operation surface the mobile shell consumes.
//!
//! ## Operation Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Storefront Operations                                │
//! │                                                                         │
//! │  Reads                          Writes                                  │
//! │  ─────                          ──────                                  │
//! │  store_info()                   add_to_cart(product_id, qty?)          │
//! │  categories()                   set_quantity(product_id, qty)          │
//! │  products(category?)            increment(product_id)                  │
//! │  product(slug)                  decrement(product_id)                  │
//! │  cart()                         remove_from_cart(product_id)          │
//! │  orders()                       clear_cart()                           │
//! │  session()                      checkout()                             │
//! │                                                                         │
//! │  Responses are serialized DTOs; the shell renders them directly.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Only two things can fail here: unknown catalog ids (`NOT_FOUND`) and auth
//! backend calls. Cart edge cases stay silent no-ops per the container's
//! contract, and an empty-cart checkout is a success carrying no order.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::debug;
use ts_rs::TS;

use koanile_core::cart::CartLine;
use koanile_core::catalog::{catalog, Catalog};
use koanile_core::types::{Category, Order, Product, ProductId};
use koanile_core::CoreError;

use crate::cart::{CartState, CartTotals};
use crate::config::StoreConfig;
use crate::error::ApiError;
use crate::events::{EventBus, StoreEvent};
use crate::session::{AuthBackend, SessionState};

// =============================================================================
// Responses
// =============================================================================

/// Store identity and capabilities, for the shell's boot screen.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct StoreInfo {
    pub store_name: String,
    pub currency_code: String,
    pub currency_symbol: String,
    /// Whether the account screens should be offered at all.
    pub auth_configured: bool,
}

/// Cart contents plus derived totals.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartResponse {
    pub lines: Vec<CartLine>,
    pub totals: CartTotals,
}

/// Checkout outcome.
///
/// `order: None` means the cart was empty and nothing happened; it is not
/// an error.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CheckoutResponse {
    pub order: Option<Order>,
}

// =============================================================================
// Storefront
// =============================================================================

/// The storefront: catalog reads, cart writes, session access.
///
/// One instance is created at process start and handed to every screen; all
/// mutation funnels through it.
pub struct Storefront {
    config: StoreConfig,
    catalog: &'static Catalog,
    cart: CartState,
    session: SessionState,
    events: EventBus,
}

impl Storefront {
    /// Wires up the storefront against the given auth backend.
    ///
    /// Must be called from within a tokio runtime (the session mirror spawns
    /// its listener task here).
    pub fn new(config: StoreConfig, backend: Arc<dyn AuthBackend>) -> Self {
        let events = EventBus::new();
        let cart = CartState::new(events.clone());
        let session = SessionState::new(backend, events.clone());
        Storefront {
            config,
            catalog: catalog(),
            cart,
            session,
            events,
        }
    }

    /// Subscribes to store change events.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Store identity for the shell.
    pub fn store_info(&self) -> StoreInfo {
        StoreInfo {
            store_name: self.config.store_name.clone(),
            currency_code: self.config.currency_code.clone(),
            currency_symbol: self.config.currency_symbol.clone(),
            auth_configured: self.config.auth_configured(),
        }
    }

    /// All concrete categories.
    pub fn categories(&self) -> Vec<Category> {
        self.catalog.categories().to_vec()
    }

    /// Products for a category slug; `None` or `"all"` returns everything.
    pub fn products(&self, category_slug: Option<&str>) -> Vec<Product> {
        let slug = category_slug.unwrap_or(koanile_core::ALL_CATEGORY_SLUG);
        debug!(slug, "products");
        self.catalog
            .products_in(slug)
            .into_iter()
            .cloned()
            .collect()
    }

    /// A single product by slug, for the detail screen.
    pub fn product(&self, slug: &str) -> Result<Product, ApiError> {
        self.catalog
            .product_by_slug(slug)
            .cloned()
            .ok_or_else(|| CoreError::ProductNotFound(slug.to_string()).into())
    }

    /// Current cart contents and totals.
    pub fn cart(&self) -> CartResponse {
        CartResponse {
            lines: self.cart.lines(),
            totals: self.cart.totals(),
        }
    }

    /// Order history, newest first.
    pub fn orders(&self) -> Vec<Order> {
        self.cart.orders()
    }

    /// The auth session mirror.
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Adds a catalog product to the cart.
    ///
    /// `quantity` defaults to 1. Unknown product ids are the one cart-path
    /// failure a screen must display.
    pub fn add_to_cart(
        &self,
        product_id: ProductId,
        quantity: Option<i64>,
    ) -> Result<CartResponse, ApiError> {
        let quantity = quantity.unwrap_or(1);
        let product = self
            .catalog
            .product_by_id(product_id)
            .ok_or_else(|| CoreError::ProductNotFound(product_id.to_string()))?;

        self.cart.add_item(product, quantity);
        Ok(self.cart())
    }

    /// Sets a line's quantity outright.
    pub fn set_quantity(&self, product_id: ProductId, quantity: i64) -> CartResponse {
        self.cart.set_quantity(product_id, quantity);
        self.cart()
    }

    /// Bumps a line's quantity by one.
    pub fn increment(&self, product_id: ProductId) -> CartResponse {
        self.cart.increment_item(product_id);
        self.cart()
    }

    /// Drops a line's quantity by one.
    pub fn decrement(&self, product_id: ProductId) -> CartResponse {
        self.cart.decrement_item(product_id);
        self.cart()
    }

    /// Removes a line entirely.
    pub fn remove_from_cart(&self, product_id: ProductId) -> CartResponse {
        self.cart.remove_item(product_id);
        self.cart()
    }

    /// Empties the cart.
    pub fn clear_cart(&self) -> CartResponse {
        self.cart.clear_cart();
        self.cart()
    }

    /// Checks out the cart into the order history.
    pub fn checkout(&self) -> CheckoutResponse {
        CheckoutResponse {
            order: self.cart.checkout(),
        }
    }
}

impl std::fmt::Debug for Storefront {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storefront")
            .field("store_name", &self.config.store_name)
            .field("totals", &self.cart.totals())
            .finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
