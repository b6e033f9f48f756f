//! # Domain Types
//!
//! Core domain types used throughout the Koanile storefront.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    Category     │   │     Order       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (u32)       │   │  name           │   │  id (UUID)      │       │
//! │  │  slug (business)│   │  slug           │   │  reference      │       │
//! │  │  title          │   │  image          │   │  status         │       │
//! │  │  price_cents    │   │  (products are  │   │  lines          │       │
//! │  │  max_quantity   │   │   derived)      │   │  total_cents    │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Orders carry two identifiers:
//! - `id`: UUID v4 - immutable, machine-facing
//! - `reference`: `ORD-XXXXXXX` - human-readable, shown on the orders screen

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::money::Money;

/// Stable identifier of a catalog product.
pub type ProductId = u32;

// =============================================================================
// Product
// =============================================================================

/// A product available in the storefront.
///
/// Products are static catalog data: immutable at runtime, never created or
/// edited by the app.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Unique, stable identifier within the catalog.
    pub id: ProductId,

    /// URL-safe business identifier, used for deep links.
    pub slug: String,

    /// Display title shown on shop and detail screens.
    pub title: String,

    /// Longer marketing copy for the detail screen.
    pub description: String,

    /// Price in cents (smallest currency unit).
    pub price_cents: i64,

    /// Slug of the category this product belongs to.
    pub category_slug: String,

    /// Maximum quantity a single cart line may hold.
    pub max_quantity: i64,

    /// Asset path of the hero image.
    pub hero_image: String,

    /// Optional merchandising badge ("New drop", "Restock", ...).
    pub badge: Option<String>,

    /// Optional star rating, 0.0-5.0.
    pub rating: Option<f32>,
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Checks whether this product belongs to the given category slug.
    #[inline]
    pub fn in_category(&self, slug: &str) -> bool {
        self.category_slug == slug
    }
}

// =============================================================================
// Category
// =============================================================================

/// A product category.
///
/// Member products are not stored on the category; they are derived by
/// filtering the product list on `category_slug` (see [`crate::catalog`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Category {
    /// Display name ("Consoles", "Gaming PCs", ...).
    pub name: String,

    /// Unique, URL-safe identifier.
    pub slug: String,

    /// Asset path of the category tile image.
    pub image: String,
}

// =============================================================================
// Order Status
// =============================================================================

/// The fulfillment status of an order.
///
/// Checkout only ever produces [`OrderStatus::Processing`]; the later states
/// exist for the external fulfillment pipeline that reports back into the
/// orders screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum OrderStatus {
    /// Order captured, awaiting fulfillment.
    Processing,
    /// Order handed to the carrier.
    Shipped,
    /// Order delivered to the customer.
    Delivered,
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Processing
    }
}

// =============================================================================
// Order Line
// =============================================================================

/// A line item in an order.
/// Uses the snapshot pattern to freeze product data at checkout time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderLine {
    /// Catalog id of the purchased product.
    pub product_id: ProductId,

    /// Slug at checkout time (frozen).
    pub slug: String,

    /// Title at checkout time (frozen).
    pub title: String,

    /// Hero image at checkout time (frozen).
    pub hero_image: String,

    /// Unit price in cents at checkout time (frozen).
    pub unit_price_cents: i64,

    /// Quantity purchased.
    pub quantity: i64,

    /// Line total (unit_price × quantity), frozen at checkout.
    pub line_total_cents: i64,
}

impl OrderLine {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Returns the line total as Money.
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.line_total_cents)
    }
}

// =============================================================================
// Order
// =============================================================================

/// An immutable snapshot of a completed checkout.
///
/// ## Invariant
/// `total_cents` equals the sum of the line totals captured at checkout and
/// is never recomputed, even if catalog prices change afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Order {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Human-readable business identifier (`ORD-XXXXXXX`).
    pub reference: String,

    /// Fulfillment status.
    pub status: OrderStatus,

    /// When the order was placed.
    #[ts(as = "String")]
    pub placed_at: DateTime<Utc>,

    /// Purchased lines, in the cart's display order.
    pub lines: Vec<OrderLine>,

    /// Total amount in cents, frozen at checkout.
    pub total_cents: i64,
}

impl Order {
    /// Returns the order total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    /// Sum of quantities across all lines.
    pub fn items_count(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }
}

/// Generates a human-readable order reference.
///
/// `ORD-` followed by the first seven hex digits of a UUID v4, uppercased.
/// Unique without coordination, which keeps checkout offline-safe.
pub fn generate_order_reference() -> String {
    let hex = Uuid::new_v4().simple().to_string().to_uppercase();
    format!("ORD-{}", &hex[..7])
}

// =============================================================================
// Unit Tests
// =============================================================================
