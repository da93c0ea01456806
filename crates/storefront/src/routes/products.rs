//! Product page route handlers.
//!
//! A collection page shows one resolved variant plus pickers for brand,
//! name, color and size. Picker links are plain URLs computed through the
//! selection reducer, so back/forward and deep links behave; HTMX swaps the
//! picker + price block in place when available.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, Query, State};

use meltemi_core::{Resolution, Selection, SelectionAction, format_euros};

use crate::error::{AppError, Result};
use crate::filters;
use crate::state::AppState;

/// Resolved variant display data for templates.
#[derive(Clone)]
pub struct ProductView {
    pub collection_slug: String,
    pub collection_title: String,
    pub name: String,
    pub description: Option<String>,
    pub price: String,
    pub price_before: Option<String>,
    pub images: Vec<String>,
    pub sold_out: bool,
    pub color: Option<String>,
    pub size: Option<String>,
    pub quantity_field: u32,
}

/// One selectable option in a picker row.
///
/// `href` is the full-page URL (used for `hx-push-url` and no-JS fallback);
/// `picker_href` points at the fragment endpoint for the HTMX swap.
#[derive(Clone)]
pub struct OptionLink {
    pub value: String,
    pub href: String,
    pub picker_href: String,
    pub selected: bool,
}

/// The four picker rows.
#[derive(Clone, Default)]
pub struct PickerView {
    pub brands: Vec<OptionLink>,
    pub names: Vec<OptionLink>,
    pub colors: Vec<OptionLink>,
    pub sizes: Vec<OptionLink>,
}

/// Product page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub product: ProductView,
    pub picker: PickerView,
}

/// Picker + price fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/variant_picker.html")]
pub struct VariantPickerTemplate {
    pub product: ProductView,
    pub picker: PickerView,
}

/// Build the query string for a selection, preserving field order.
fn selection_query(selection: &Selection) -> String {
    let mut query = url::form_urlencoded::Serializer::new(String::new());
    if let Some(brand) = &selection.brand {
        query.append_pair("brand", brand);
    }
    if let Some(name) = &selection.name {
        query.append_pair("name", name);
    }
    if let Some(color) = &selection.color {
        query.append_pair("color", color);
    }
    if let Some(size) = &selection.size {
        query.append_pair("size", size);
    }
    query.finish()
}

fn href(slug: &str, suffix: &str, query: &str) -> String {
    if query.is_empty() {
        format!("/collections/{slug}{suffix}")
    } else {
        format!("/collections/{slug}{suffix}?{query}")
    }
}

fn option_links<F>(slug: &str, resolution: &Resolution, values: &[String], selected: Option<&str>, action: F) -> Vec<OptionLink>
where
    F: Fn(&str) -> SelectionAction,
{
    values
        .iter()
        .map(|value| {
            let query = selection_query(&resolution.selection.apply(action(value)));
            OptionLink {
                value: value.clone(),
                href: href(slug, "", &query),
                picker_href: href(slug, "/picker", &query),
                selected: selected == Some(value.as_str()),
            }
        })
        .collect()
}

fn build_views(slug: &str, title: &str, resolution: &Resolution) -> (ProductView, PickerView) {
    let selection = &resolution.selection;
    let picker = PickerView {
        brands: option_links(slug, resolution, &resolution.brands, selection.brand.as_deref(), |v| {
            SelectionAction::SelectBrand(Some(v.to_string()))
        }),
        names: option_links(slug, resolution, &resolution.names, selection.name.as_deref(), |v| {
            SelectionAction::SelectName(v.to_string())
        }),
        colors: option_links(slug, resolution, &resolution.colors, selection.color.as_deref(), |v| {
            SelectionAction::SelectColor(v.to_string())
        }),
        sizes: option_links(slug, resolution, &resolution.sizes, selection.size.as_deref(), |v| {
            SelectionAction::SelectSize(v.to_string())
        }),
    };

    let variant = &resolution.variant;
    let product = ProductView {
        collection_slug: slug.to_string(),
        collection_title: title.to_string(),
        name: variant.name.clone(),
        description: variant.description.clone(),
        price: format_euros(variant.price),
        price_before: variant.price_before.map(format_euros),
        images: variant.images.clone(),
        sold_out: variant.sold_out,
        color: selection.color.clone(),
        size: selection.size.clone(),
        quantity_field: 1,
    };

    (product, picker)
}

async fn resolve_page(
    state: &AppState,
    slug: &str,
    selection: &Selection,
) -> Result<(ProductView, PickerView)> {
    let page = state.api().get_collection(slug).await?;
    let resolution = meltemi_core::selection::resolve(&page.variants, &page.collection, selection)
        .map_err(|e| AppError::NotFound(format!("collection {slug}: {e}")))?;
    Ok(build_views(slug, &page.collection.title, &resolution))
}

/// Display a collection's product page.
#[tracing::instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(selection): Query<Selection>,
) -> Result<ProductShowTemplate> {
    let (product, picker) = resolve_page(&state, &slug, &selection).await?;
    Ok(ProductShowTemplate { product, picker })
}

/// Display the picker + price fragment (for HTMX).
#[tracing::instrument(skip(state))]
pub async fn picker(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(selection): Query<Selection>,
) -> Result<VariantPickerTemplate> {
    let (product, picker) = resolve_page(&state, &slug, &selection).await?;
    Ok(VariantPickerTemplate { product, picker })
}
