//! # koanile-core: Pure Business Logic for the Koanile Storefront
//!
//! This crate is the **heart** of Koanile. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Koanile Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Mobile Shell (TypeScript)                      │   │
//! │  │    Shop UI ──► Product UI ──► Cart UI ──► Orders UI            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ generated bindings                     │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    koanile-store                                │   │
//! │  │    Storefront facade, CartState, SessionState, EventBus        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ koanile-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │  catalog  │  │   │
//! │  │   │  Product  │  │   Money   │  │   Cart    │  │ products  │  │   │
//! │  │   │   Order   │  │  subtotal │  │ CartLine  │  │  filter   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO AUTH CALLS • PURE FUNCTIONS         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Category, Order, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`catalog`] - The static product catalog and its category filter
//! - [`cart`] - The cart/order state machine
//! - [`error`] - Domain error types
//! - [`validation`] - Catalog data validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic given its inputs
//! 2. **No I/O**: Network, file system, and auth access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64)
//! 4. **Total Cart Operations**: Cart mutations clamp or no-op, never panic
//!
//! ## Example Usage
//!
//! ```rust
//! use koanile_core::cart::Cart;
//! use koanile_core::catalog::catalog;
//!
//! let shop = catalog();
//! let product = shop.product_by_slug("nova-drift-pro").unwrap();
//!
//! let mut cart = Cart::new();
//! cart.add_item(product, 2);
//!
//! assert_eq!(cart.items_count(), 2);
//! assert_eq!(cart.subtotal().cents(), product.price_cents * 2);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use koanile_core::Money` instead of
// `use koanile_core::money::Money`

pub use cart::{Cart, CartLine};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Category slug that selects the entire catalog.
///
/// The shop's landing screen shows every product under this synthetic
/// category; it owns no products of its own.
pub const ALL_CATEGORY_SLUG: &str = "all";

/// Upper bound accepted for a product's `max_quantity`.
///
/// The catalog is hand-curated; a per-line cap above this is a data entry
/// mistake, not a merchandising decision.
pub const MAX_LINE_QUANTITY: i64 = 99;

/// Highest rating a product can carry (5-star scale).
pub const MAX_RATING: f32 = 5.0;
