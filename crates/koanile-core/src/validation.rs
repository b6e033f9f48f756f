//! # Validation Module
//!
//! Static catalog data validation for the Koanile storefront.
//!
//! The catalog is hand-curated data compiled into the binary, so validation
//! runs once when the catalog is built (and in tests), not on the hot path.
//! Cart operations never validate-and-raise; their edge cases clamp or no-op
//! by contract.

use crate::error::ValidationError;
use crate::types::{Category, Product};
use crate::{ALL_CATEGORY_SLUG, MAX_LINE_QUANTITY, MAX_RATING};
use std::collections::HashSet;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a URL-safe slug.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 50 characters
/// - Lowercase alphanumeric plus hyphens only
///
/// ## Example
/// ```rust
/// use koanile_core::validation::validate_slug;
///
/// assert!(validate_slug("gaming-pcs").is_ok());
/// assert!(validate_slug("").is_err());
/// assert!(validate_slug("Gaming PCs").is_err());
/// ```
pub fn validate_slug(slug: &str) -> ValidationResult<()> {
    if slug.is_empty() {
        return Err(ValidationError::Required {
            field: "slug".to_string(),
        });
    }

    if slug.len() > 50 {
        return Err(ValidationError::TooLong {
            field: "slug".to_string(),
            max: 50,
        });
    }

    if !slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(ValidationError::InvalidFormat {
            field: "slug".to_string(),
            reason: "must contain only lowercase letters, digits, and hyphens".to_string(),
        });
    }

    Ok(())
}

/// Validates a product or category title.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most 120 characters
pub fn validate_title(title: &str) -> ValidationResult<()> {
    let title = title.trim();

    if title.is_empty() {
        return Err(ValidationError::Required {
            field: "title".to_string(),
        });
    }

    if title.len() > 120 {
        return Err(ValidationError::TooLong {
            field: "title".to_string(),
            max: 120,
        });
    }

    Ok(())
}

/// Validates a price in cents.
///
/// ## Rules
/// - Must be non-negative (zero is allowed for promo items)
///
/// ## Example
/// ```rust
/// use koanile_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents(49999).is_ok());
/// assert!(validate_price_cents(0).is_ok());
/// assert!(validate_price_cents(-100).is_err());
/// ```
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a product's per-line quantity cap.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed [`MAX_LINE_QUANTITY`]
pub fn validate_max_quantity(max_quantity: i64) -> ValidationResult<()> {
    if max_quantity <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "max_quantity".to_string(),
        });
    }

    if max_quantity > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "max_quantity".to_string(),
            min: 1,
            max: MAX_LINE_QUANTITY,
        });
    }

    Ok(())
}

/// Validates an optional star rating (0.0-5.0).
pub fn validate_rating(rating: Option<f32>) -> ValidationResult<()> {
    if let Some(rating) = rating {
        if !(0.0..=MAX_RATING).contains(&rating) {
            return Err(ValidationError::OutOfRange {
                field: "rating".to_string(),
                min: 0,
                max: MAX_RATING as i64,
            });
        }
    }

    Ok(())
}

// =============================================================================
// Catalog Validator
// =============================================================================

/// Validates a full catalog data set.
///
/// ## Rules
/// - Every product and category passes its field validators
/// - Product ids are unique
/// - Product and category slugs are unique
/// - No category claims the reserved `"all"` slug
/// - Every product references an existing category
pub fn validate_catalog(products: &[Product], categories: &[Category]) -> ValidationResult<()> {
    let mut category_slugs = HashSet::new();
    for category in categories {
        validate_slug(&category.slug)?;
        validate_title(&category.name)?;

        if category.slug == ALL_CATEGORY_SLUG {
            return Err(ValidationError::InvalidFormat {
                field: "category.slug".to_string(),
                reason: format!("'{}' is reserved for the whole catalog", ALL_CATEGORY_SLUG),
            });
        }

        if !category_slugs.insert(category.slug.as_str()) {
            return Err(ValidationError::Duplicate {
                field: "category.slug".to_string(),
                value: category.slug.clone(),
            });
        }
    }

    let mut ids = HashSet::new();
    let mut slugs = HashSet::new();
    for product in products {
        validate_slug(&product.slug)?;
        validate_title(&product.title)?;
        validate_price_cents(product.price_cents)?;
        validate_max_quantity(product.max_quantity)?;
        validate_rating(product.rating)?;

        if !ids.insert(product.id) {
            return Err(ValidationError::Duplicate {
                field: "product.id".to_string(),
                value: product.id.to_string(),
            });
        }

        if !slugs.insert(product.slug.as_str()) {
            return Err(ValidationError::Duplicate {
                field: "product.slug".to_string(),
                value: product.slug.clone(),
            });
        }

        if !category_slugs.contains(product.category_slug.as_str()) {
            return Err(ValidationError::UnknownReference {
                field: "category_slug".to_string(),
                target: "category".to_string(),
                value: product.category_slug.clone(),
            });
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: u32, slug: &str, category: &str) -> Product {
        Product {
            id,
            slug: slug.to_string(),
            title: format!("Product {}", id),
            description: String::new(),
            price_cents: 1000,
            category_slug: category.to_string(),
            max_quantity: 5,
            hero_image: "images/p.png".to_string(),
            badge: None,
            rating: None,
        }
    }

    fn category(name: &str, slug: &str) -> Category {
        Category {
            name: name.to_string(),
            slug: slug.to_string(),
            image: "images/c.png".to_string(),
        }
    }

    #[test]
    fn test_validate_slug() {
        assert!(validate_slug("consoles").is_ok());
        assert!(validate_slug("gaming-pcs").is_ok());
        assert!(validate_slug("rtx-4090").is_ok());

        assert!(validate_slug("").is_err());
        assert!(validate_slug("Has Space").is_err());
        assert!(validate_slug("UPPER").is_err());
        assert!(validate_slug(&"a".repeat(60)).is_err());
    }

    #[test]
    fn test_validate_title() {
        assert!(validate_title("Nova Drift Pro").is_ok());
        assert!(validate_title("").is_err());
        assert!(validate_title("   ").is_err());
        assert!(validate_title(&"A".repeat(200)).is_err());
    }

    #[test]
    fn test_validate_price_cents() {
        assert!(validate_price_cents(0).is_ok());
        assert!(validate_price_cents(49999).is_ok());
        assert!(validate_price_cents(-1).is_err());
    }

    #[test]
    fn test_validate_max_quantity() {
        assert!(validate_max_quantity(1).is_ok());
        assert!(validate_max_quantity(99).is_ok());
        assert!(validate_max_quantity(0).is_err());
        assert!(validate_max_quantity(-3).is_err());
        assert!(validate_max_quantity(100).is_err());
    }

    #[test]
    fn test_validate_rating() {
        assert!(validate_rating(None).is_ok());
        assert!(validate_rating(Some(0.0)).is_ok());
        assert!(validate_rating(Some(4.7)).is_ok());
        assert!(validate_rating(Some(5.0)).is_ok());
        assert!(validate_rating(Some(5.1)).is_err());
        assert!(validate_rating(Some(-0.1)).is_err());
    }

    #[test]
    fn test_validate_catalog_accepts_good_data() {
        let categories = vec![category("Consoles", "consoles")];
        let products = vec![product(1, "one", "consoles"), product(2, "two", "consoles")];
        assert!(validate_catalog(&products, &categories).is_ok());
    }

    #[test]
    fn test_validate_catalog_rejects_duplicate_id() {
        let categories = vec![category("Consoles", "consoles")];
        let products = vec![product(1, "one", "consoles"), product(1, "two", "consoles")];
        assert!(matches!(
            validate_catalog(&products, &categories),
            Err(ValidationError::Duplicate { .. })
        ));
    }

    #[test]
    fn test_validate_catalog_rejects_duplicate_slug() {
        let categories = vec![category("Consoles", "consoles")];
        let products = vec![product(1, "one", "consoles"), product(2, "one", "consoles")];
        assert!(matches!(
            validate_catalog(&products, &categories),
            Err(ValidationError::Duplicate { .. })
        ));
    }

    #[test]
    fn test_validate_catalog_rejects_unknown_category() {
        let categories = vec![category("Consoles", "consoles")];
        let products = vec![product(1, "one", "retro")];
        assert!(matches!(
            validate_catalog(&products, &categories),
            Err(ValidationError::UnknownReference { .. })
        ));
    }

    #[test]
    fn test_validate_catalog_rejects_reserved_all_slug() {
        let categories = vec![category("Everything", "all")];
        assert!(matches!(
            validate_catalog(&[], &categories),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }
}
