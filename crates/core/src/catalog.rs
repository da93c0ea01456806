//! Catalog model: collections, variants and default fallbacks.
//!
//! A [`Collection`] is a catalog grouping that maps 1:1 to a product-type
//! page and carries shared defaults. A [`Variant`] is one purchasable SKU
//! inside it - a (name, color) combination with its own optional overrides.
//! Fields a variant leaves unset fall back to the collection defaults; the
//! precedence rule lives in one place, [`resolve_field`], so it stays
//! auditable.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{CollectionId, ProductId};

/// Errors produced by catalog operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// A collection must carry at least one variant before it can be
    /// resolved. The caller (catalog loader) guarantees this; an empty
    /// collection page has nothing usable to show.
    #[error("collection has no variants")]
    EmptyCollection,
}

/// A catalog grouping with shared defaults for its variants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection {
    pub id: CollectionId,
    /// URL slug, e.g. `"tees"`.
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Default unit price for variants without their own.
    #[serde(default)]
    pub price: Option<Decimal>,
    /// Default pre-discount ("compare at") price.
    #[serde(default)]
    pub price_before: Option<Decimal>,
    /// Default size run, in display order.
    #[serde(default)]
    pub sizes: Option<Vec<String>>,
    #[serde(default)]
    pub sold_out: Option<bool>,
    /// Product suggested next to the add-to-cart action.
    #[serde(default)]
    pub upsell: Option<ProductId>,
}

/// One purchasable SKU: a (name, color) combination within a collection.
///
/// Within a collection the (name, color) tuple is unique; a name may repeat
/// across colors, and sizes are unique within one (name, color) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Variant {
    pub id: ProductId,
    /// Slug of the owning collection.
    pub collection: String,
    /// Product/model name within the collection.
    pub name: String,
    /// Filter dimension independent of the name.
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    /// Sizes offered at this color, in display order.
    #[serde(default)]
    pub sizes: Option<Vec<String>>,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub price_before: Option<Decimal>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub sold_out: Option<bool>,
    #[serde(default)]
    pub upsell: Option<ProductId>,
}

/// A variant with every collection fallback applied.
///
/// This is what product pages and the cart consume: no `Option` left on the
/// fields the collection can default.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedVariant {
    pub id: ProductId,
    pub collection: String,
    pub name: String,
    pub brand: Option<String>,
    pub color: Option<String>,
    pub sizes: Vec<String>,
    pub price: Decimal,
    pub price_before: Option<Decimal>,
    pub description: Option<String>,
    pub images: Vec<String>,
    pub sold_out: bool,
    pub upsell: Option<ProductId>,
}

/// Merge a variant field with its collection default.
///
/// The variant value wins whenever it is present; this single function is
/// the whole precedence rule.
#[must_use]
pub fn resolve_field<T: Clone>(variant_value: Option<&T>, collection_value: Option<&T>) -> Option<T> {
    variant_value.or(collection_value).cloned()
}

impl Variant {
    /// Apply collection defaults, producing the fully-resolved variant.
    ///
    /// A price missing on both levels resolves to zero rather than failing;
    /// the admin side treats a zero price as a data problem to fix, not a
    /// reason to break the page.
    #[must_use]
    pub fn resolve(&self, defaults: &Collection) -> ResolvedVariant {
        ResolvedVariant {
            id: self.id,
            collection: self.collection.clone(),
            name: self.name.clone(),
            brand: self.brand.clone(),
            color: self.color.clone(),
            sizes: resolve_field(self.sizes.as_ref(), defaults.sizes.as_ref()).unwrap_or_default(),
            price: resolve_field(self.price.as_ref(), defaults.price.as_ref())
                .unwrap_or(Decimal::ZERO),
            price_before: resolve_field(self.price_before.as_ref(), defaults.price_before.as_ref()),
            description: defaults.description.clone(),
            images: self.images.clone(),
            sold_out: resolve_field(self.sold_out.as_ref(), defaults.sold_out.as_ref())
                .unwrap_or(false),
            upsell: resolve_field(self.upsell.as_ref(), defaults.upsell.as_ref()),
        }
    }
}

/// A catalog invariant violation found by [`validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogIssue {
    /// Two variants share the same (name, color) within the collection.
    DuplicateVariant { name: String, color: Option<String> },
    /// The same size appears twice within one (name, color) pair.
    DuplicateSize {
        name: String,
        color: Option<String>,
        size: String,
    },
}

impl std::fmt::Display for CatalogIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateVariant { name, color } => write!(
                f,
                "duplicate variant: name={name:?} color={:?}",
                color.as_deref().unwrap_or("-")
            ),
            Self::DuplicateSize { name, color, size } => write!(
                f,
                "duplicate size {size:?} on variant name={name:?} color={:?}",
                color.as_deref().unwrap_or("-")
            ),
        }
    }
}

/// Check the catalog invariants over one collection's variants.
///
/// Returns every violation rather than stopping at the first, so an import
/// run can be fixed in one pass.
#[must_use]
pub fn validate(variants: &[Variant]) -> Vec<CatalogIssue> {
    let mut issues = Vec::new();
    let mut seen: Vec<(&str, Option<&str>)> = Vec::new();

    for variant in variants {
        let key = (variant.name.as_str(), variant.color.as_deref());
        if seen.contains(&key) {
            issues.push(CatalogIssue::DuplicateVariant {
                name: variant.name.clone(),
                color: variant.color.clone(),
            });
        } else {
            seen.push(key);
        }

        if let Some(sizes) = &variant.sizes {
            let mut seen_sizes: Vec<&str> = Vec::new();
            for size in sizes {
                if seen_sizes.contains(&size.as_str()) {
                    issues.push(CatalogIssue::DuplicateSize {
                        name: variant.name.clone(),
                        color: variant.color.clone(),
                        size: size.clone(),
                    });
                } else {
                    seen_sizes.push(size);
                }
            }
        }
    }

    issues
}
