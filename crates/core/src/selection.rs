//! Variant selection: option derivation and cascading resets.
//!
//! A product page holds a partial [`Selection`] (from URL parameters or
//! defaults). [`resolve`] turns that plus the collection's variants into the
//! single active variant and the option sets for each picker. Invalid or
//! missing picks fall back to the first available value at that level - the
//! resolver never fails for a non-empty collection.
//!
//! Selection changes go through [`Selection::apply`], a pure reducer.
//! Changing a higher-level field clears everything below it
//! (Brand > Name > Color > Size); the next `resolve` call fills the cleared
//! fields back in with their first available values. Keeping the reset and
//! the defaulting separate means any UI layer - or a test - drives the same
//! state machine.

use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogError, Collection, ResolvedVariant, Variant};

/// A shopper's (possibly partial) pick of brand, name, color and size.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

/// One picker interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionAction {
    /// Pick a brand filter, or `None` to clear it.
    SelectBrand(Option<String>),
    SelectName(String),
    SelectColor(String),
    SelectSize(String),
}

impl Selection {
    /// Apply a picker action, cascading the reset to dependent fields.
    ///
    /// Cleared fields are re-filled with their first available values by the
    /// next [`resolve`] call.
    #[must_use]
    pub fn apply(&self, action: SelectionAction) -> Self {
        match action {
            SelectionAction::SelectBrand(brand) => Self {
                brand,
                name: None,
                color: None,
                size: None,
            },
            SelectionAction::SelectName(name) => Self {
                brand: self.brand.clone(),
                name: Some(name),
                color: None,
                size: None,
            },
            SelectionAction::SelectColor(color) => Self {
                brand: self.brand.clone(),
                name: self.name.clone(),
                color: Some(color),
                size: None,
            },
            SelectionAction::SelectSize(size) => Self {
                brand: self.brand.clone(),
                name: self.name.clone(),
                color: self.color.clone(),
                size: Some(size),
            },
        }
    }
}

/// The resolver's output: the active variant, the option sets for each
/// picker, and the normalized selection after defaulting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    pub variant: ResolvedVariant,
    /// Distinct brands across the whole collection, first-seen order.
    pub brands: Vec<String>,
    /// Names selectable under the active brand filter.
    pub names: Vec<String>,
    /// Colors available for the active name.
    pub colors: Vec<String>,
    /// Sizes available for the active (name, color).
    pub sizes: Vec<String>,
    /// The selection with every invalid/unset field replaced by its default.
    pub selection: Selection,
}

/// Resolve a partial selection against a collection's variants.
///
/// # Errors
///
/// Returns [`CatalogError::EmptyCollection`] when `variants` is empty. Every
/// other input resolves: unknown picks fall back level by level to the first
/// available value, and a (name, color) combination with no matching variant
/// falls back to the first variant of the resolved name. Sold-out status is
/// carried on the resolved variant but never removes it from selectability.
pub fn resolve(
    variants: &[Variant],
    defaults: &Collection,
    selection: &Selection,
) -> Result<Resolution, CatalogError> {
    if variants.is_empty() {
        return Err(CatalogError::EmptyCollection);
    }

    let brands = distinct(variants.iter().filter_map(|v| v.brand.as_deref()));

    // An unknown brand behaves as no filter at all; the resolver must always
    // leave at least one selectable name.
    let brand = selection
        .brand
        .as_deref()
        .filter(|b| brands.iter().any(|known| known == b))
        .map(String::from);
    let brand_filtered: Vec<&Variant> = variants
        .iter()
        .filter(|v| brand.as_deref().is_none_or(|b| v.brand.as_deref() == Some(b)))
        .collect();

    let names = distinct(brand_filtered.iter().map(|v| v.name.as_str()));
    let name = selection
        .name
        .as_deref()
        .filter(|n| names.iter().any(|known| known == n))
        .or(names.first().map(String::as_str))
        .unwrap_or_default()
        .to_string();

    let name_matches: Vec<&Variant> = brand_filtered
        .iter()
        .filter(|v| v.name == name)
        .copied()
        .collect();

    let colors = distinct(name_matches.iter().filter_map(|v| v.color.as_deref()));
    let color = selection
        .color
        .as_deref()
        .filter(|c| colors.iter().any(|known| known == c))
        .map(String::from)
        .or_else(|| colors.first().cloned());

    // The single (name, color) variant, or the first variant of the name if
    // the combination does not exist.
    let active = name_matches
        .iter()
        .find(|v| v.color.as_deref() == color.as_deref())
        .or(name_matches.first())
        .copied()
        .ok_or(CatalogError::EmptyCollection)?;

    let variant = active.resolve(defaults);

    let sizes = variant.sizes.clone();
    let size = selection
        .size
        .as_deref()
        .filter(|s| sizes.iter().any(|known| known == s))
        .map(String::from)
        .or_else(|| sizes.first().cloned());

    Ok(Resolution {
        selection: Selection {
            brand,
            name: Some(name),
            color,
            size,
        },
        variant,
        brands,
        names,
        colors,
        sizes,
    })
}

/// Distinct values preserving first-seen order.
fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for value in values {
        if !out.iter().any(|seen| seen == value) {
            out.push(value.to_string());
        }
    }
    out
}
