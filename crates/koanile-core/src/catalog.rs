//! # Catalog Module
//!
//! The static product catalog and its category filter.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Catalog Pipeline                                 │
//! │                                                                         │
//! │  PRODUCT_ROWS / CATEGORY_ROWS (compiled-in tables)                     │
//! │       │                                                                 │
//! │       ▼  build + validate (once, cached)                               │
//! │  Catalog { products, categories }                                      │
//! │       │                                                                 │
//! │       ├── products_in("all")      → every product                      │
//! │       ├── products_in("consoles") → linear filter on category_slug     │
//! │       ├── product_by_slug(...)    → detail screen lookup               │
//! │       └── product_by_id(...)      → cart operations lookup             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The filter is a pure function over the product list and is recomputed on
//! every call; at catalog scale a linear scan is cheaper than any cache.

use std::sync::OnceLock;

use crate::error::CoreResult;
use crate::types::{Category, Product, ProductId};
use crate::validation::validate_catalog;
use crate::ALL_CATEGORY_SLUG;

// =============================================================================
// Seed Data
// =============================================================================

/// One row of the compiled-in product table.
struct ProductRow {
    id: ProductId,
    slug: &'static str,
    title: &'static str,
    price_cents: i64,
    category: &'static str,
    max_quantity: i64,
    badge: Option<&'static str>,
    rating: Option<f32>,
    description: &'static str,
}

const CATEGORY_ROWS: &[(&str, &str)] = &[
    ("Consoles", "consoles"),
    ("Gaming PCs", "gaming-pcs"),
    ("Laptops", "laptops"),
    ("Wheels", "wheels"),
    ("Monitors", "monitors"),
    ("Cards", "cards"),
    ("Accessories", "accessories"),
];

const PRODUCT_ROWS: &[ProductRow] = &[
    ProductRow {
        id: 1,
        slug: "nova-drift-pro",
        title: "Nova Drift Pro",
        price_cents: 49999,
        category: "consoles",
        max_quantity: 3,
        badge: Some("New drop"),
        rating: Some(4.8),
        description: "Flagship console with a 2TB drive and whisper-quiet cooling.",
    },
    ProductRow {
        id: 2,
        slug: "pulse-one-s",
        title: "Pulse One S",
        price_cents: 29999,
        category: "consoles",
        max_quantity: 3,
        badge: None,
        rating: Some(4.5),
        description: "Compact all-digital console built for the living room shelf.",
    },
    ProductRow {
        id: 3,
        slug: "retro-forge-64",
        title: "Retro Forge 64",
        price_cents: 19999,
        category: "consoles",
        max_quantity: 5,
        badge: Some("Restock"),
        rating: Some(4.2),
        description: "Sixty-four classics pre-loaded, HDMI out, two wired pads.",
    },
    ProductRow {
        id: 4,
        slug: "vortex-tower-x",
        title: "Vortex Tower X",
        price_cents: 249900,
        category: "gaming-pcs",
        max_quantity: 2,
        badge: None,
        rating: Some(4.9),
        description: "Liquid-cooled tower tuned for 4K high-refresh play.",
    },
    ProductRow {
        id: 5,
        slug: "specter-mini-itx",
        title: "Specter Mini ITX",
        price_cents: 129900,
        category: "gaming-pcs",
        max_quantity: 2,
        badge: None,
        rating: Some(4.4),
        description: "Small-form build that still fits a full-length card.",
    },
    ProductRow {
        id: 6,
        slug: "raptor-16",
        title: "Raptor 16",
        price_cents: 189900,
        category: "laptops",
        max_quantity: 2,
        badge: Some("New drop"),
        rating: Some(4.6),
        description: "16-inch 240Hz panel with a desktop-class GPU inside.",
    },
    ProductRow {
        id: 7,
        slug: "drifter-14",
        title: "Drifter 14",
        price_cents: 99900,
        category: "laptops",
        max_quantity: 3,
        badge: None,
        rating: Some(4.1),
        description: "Light enough for the commute, quick enough for ranked.",
    },
    ProductRow {
        id: 8,
        slug: "apex-wheelbase-gt",
        title: "Apex Wheelbase GT",
        price_cents: 59900,
        category: "wheels",
        max_quantity: 2,
        badge: None,
        rating: Some(4.7),
        description: "Direct-drive wheelbase with 8Nm of clean torque.",
    },
    ProductRow {
        id: 9,
        slug: "clubsport-rim",
        title: "ClubSport Rim",
        price_cents: 34950,
        category: "wheels",
        max_quantity: 4,
        badge: None,
        rating: Some(4.3),
        description: "Leather-wrapped 300mm rim with magnetic paddle shifters.",
    },
    ProductRow {
        id: 10,
        slug: "halo-27-qhd",
        title: "Halo 27 QHD",
        price_cents: 32999,
        category: "monitors",
        max_quantity: 4,
        badge: None,
        rating: Some(4.4),
        description: "27-inch 1440p IPS at 165Hz with a near-borderless frame.",
    },
    ProductRow {
        id: 11,
        slug: "ultracurve-34",
        title: "UltraCurve 34",
        price_cents: 74999,
        category: "monitors",
        max_quantity: 3,
        badge: Some("Limited"),
        rating: Some(4.8),
        description: "Ultrawide 34-inch curve that swallows the whole cockpit view.",
    },
    ProductRow {
        id: 12,
        slug: "ember-rtx-card",
        title: "Ember RTX Card",
        price_cents: 159900,
        category: "cards",
        max_quantity: 2,
        badge: Some("Restock"),
        rating: Some(4.9),
        description: "Triple-fan flagship card for path-traced everything.",
    },
    ProductRow {
        id: 13,
        slug: "quartz-gpu-8gb",
        title: "Quartz GPU 8GB",
        price_cents: 42999,
        category: "cards",
        max_quantity: 3,
        badge: None,
        rating: Some(4.0),
        description: "The 1440p value pick, two slots and one power cable.",
    },
    ProductRow {
        id: 14,
        slug: "vantage-headset",
        title: "Vantage Headset",
        price_cents: 12999,
        category: "accessories",
        max_quantity: 6,
        badge: None,
        rating: Some(4.3),
        description: "Closed-back wireless headset with a flip-to-mute mic.",
    },
    ProductRow {
        id: 15,
        slug: "glide-pad-xl",
        title: "Glide Pad XL",
        price_cents: 3999,
        category: "accessories",
        max_quantity: 10,
        badge: None,
        rating: None,
        description: "Desk-width cloth pad with stitched edges.",
    },
    ProductRow {
        id: 16,
        slug: "torque-pro-controller",
        title: "Torque Pro Controller",
        price_cents: 6999,
        category: "accessories",
        max_quantity: 8,
        badge: None,
        rating: Some(4.5),
        description: "Hall-effect sticks, back paddles, swappable face plates.",
    },
];

// =============================================================================
// Catalog
// =============================================================================

/// The validated, immutable product catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    categories: Vec<Category>,
}

impl Catalog {
    /// Builds a catalog from raw data, validating the whole set.
    pub fn new(products: Vec<Product>, categories: Vec<Category>) -> CoreResult<Self> {
        validate_catalog(&products, &categories)?;
        Ok(Catalog {
            products,
            categories,
        })
    }

    /// Every product in the catalog, in curated display order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// All concrete categories (the synthetic `"all"` tile is presentation).
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Products belonging to the given category slug.
    ///
    /// The slug `"all"` returns the entire catalog; any other slug returns
    /// the matching subsequence, which is empty when nothing matches.
    pub fn products_in(&self, slug: &str) -> Vec<&Product> {
        if slug == ALL_CATEGORY_SLUG {
            return self.products.iter().collect();
        }
        self.products.iter().filter(|p| p.in_category(slug)).collect()
    }

    /// Looks up a product by its stable id.
    pub fn product_by_id(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Looks up a product by its slug (deep links, detail screen).
    pub fn product_by_slug(&self, slug: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.slug == slug)
    }

    /// Looks up a category by slug.
    pub fn category_by_slug(&self, slug: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.slug == slug)
    }
}

// =============================================================================
// Static Instance
// =============================================================================

fn build_catalog() -> CoreResult<Catalog> {
    let categories = CATEGORY_ROWS
        .iter()
        .map(|(name, slug)| Category {
            name: (*name).to_string(),
            slug: (*slug).to_string(),
            image: format!("images/categories/{}.jpg", slug),
        })
        .collect();

    let products = PRODUCT_ROWS
        .iter()
        .map(|row| Product {
            id: row.id,
            slug: row.slug.to_string(),
            title: row.title.to_string(),
            description: row.description.to_string(),
            price_cents: row.price_cents,
            category_slug: row.category.to_string(),
            max_quantity: row.max_quantity,
            hero_image: format!("images/{}.jpg", row.slug),
            badge: row.badge.map(str::to_string),
            rating: row.rating,
        })
        .collect();

    Catalog::new(products, categories)
}

/// Returns the shop's catalog, built and validated on first use.
pub fn catalog() -> &'static Catalog {
    static CATALOG: OnceLock<Catalog> = OnceLock::new();
    CATALOG.get_or_init(|| build_catalog().expect("compiled-in catalog data is valid"))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_data_is_valid() {
        assert!(build_catalog().is_ok());
    }

    #[test]
    fn test_all_slug_returns_full_catalog() {
        let shop = catalog();
        assert_eq!(shop.products_in("all").len(), shop.products().len());
    }

    #[test]
    fn test_filter_by_category_slug() {
        let shop = catalog();
        let consoles = shop.products_in("consoles");
        assert!(!consoles.is_empty());
        assert!(consoles.iter().all(|p| p.category_slug == "consoles"));

        // Filtered lists partition the catalog: no product from another
        // category leaks in.
        let elsewhere = shop
            .products()
            .iter()
            .filter(|p| p.category_slug != "consoles")
            .count();
        assert_eq!(consoles.len() + elsewhere, shop.products().len());
    }

    #[test]
    fn test_unknown_slug_is_empty() {
        assert!(catalog().products_in("retro").is_empty());
    }

    #[test]
    fn test_lookups() {
        let shop = catalog();
        let product = shop.product_by_slug("nova-drift-pro").unwrap();
        assert_eq!(product.id, 1);
        assert_eq!(shop.product_by_id(1).unwrap().slug, "nova-drift-pro");
        assert!(shop.product_by_id(9999).is_none());
        assert!(shop.product_by_slug("missing").is_none());

        let category = shop.category_by_slug("wheels").unwrap();
        assert_eq!(category.name, "Wheels");
        assert!(shop.category_by_slug("all").is_none());
    }

    #[test]
    fn test_every_category_has_products() {
        let shop = catalog();
        for category in shop.categories() {
            assert!(
                !shop.products_in(&category.slug).is_empty(),
                "category {} has no products",
                category.slug
            );
        }
    }
}
