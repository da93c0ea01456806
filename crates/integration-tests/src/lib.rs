//! Integration tests for Meltemi.
//!
//! These tests drive the whole engine the way the storefront does: resolve
//! a selection against a catalog, build cart lines from the result, and
//! price the cart. No network or running server is needed - the engine is
//! pure and the backend wire formats are exercised through JSON fixtures.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p meltemi-integration-tests
//! ```

#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;

use meltemi_core::{CartLine, Collection, CollectionId, ProductId, ResolvedVariant, Variant};

/// Parse a decimal literal.
///
/// # Panics
///
/// Panics on a malformed literal; fixtures are hard-coded.
#[must_use]
pub fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

/// A collection of heavyweight tees with shared defaults.
#[must_use]
pub fn tees_collection() -> Collection {
    Collection {
        id: CollectionId::new(10),
        slug: "tees".to_string(),
        title: "Tees".to_string(),
        description: Some("Heavyweight cotton tees".to_string()),
        price: Some(dec("29.90")),
        price_before: None,
        sizes: Some(vec!["S".into(), "M".into(), "L".into(), "XL".into()]),
        sold_out: Some(false),
        upsell: None,
    }
}

/// The variants of [`tees_collection`]: two models across two brands, the
/// first model in two colors.
#[must_use]
pub fn tees_variants() -> Vec<Variant> {
    vec![
        tee(1, "Aegean", "Meltemi", Some("navy")),
        tee(2, "Aegean", "Meltemi", Some("white")),
        tee(3, "Vardaris", "Ostria", Some("olive")),
    ]
}

fn tee(id: i64, name: &str, brand: &str, color: Option<&str>) -> Variant {
    Variant {
        id: ProductId::new(id),
        collection: "tees".to_string(),
        name: name.to_string(),
        brand: Some(brand.to_string()),
        color: color.map(String::from),
        sizes: None,
        price: None,
        price_before: None,
        images: vec![format!("{name}.jpg")],
        sold_out: None,
        upsell: None,
    }
}

/// Build a cart line from a resolved variant, the way the storefront's
/// add-to-cart handler does.
#[must_use]
pub fn line_from(variant: &ResolvedVariant, size: Option<&str>, quantity: u32) -> CartLine {
    CartLine {
        collection: variant.collection.clone(),
        name: variant.name.clone(),
        color: variant.color.clone(),
        size: size.map(String::from),
        image: variant.images.first().cloned(),
        price: variant.price,
        price_before: variant.price_before,
        quantity,
    }
}
