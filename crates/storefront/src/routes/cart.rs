//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! The cart itself lives in the session (see `cart_store`); every mutation
//! goes through the engine's `Cart` and is written back in full.
//!
//! `/cart/add` never trusts a posted price: the variant is re-resolved
//! against the cached catalog so the session cart only ever carries catalog
//! prices. The backend re-checks the totals again on submission.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{AppendHeaders, Html, IntoResponse, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use meltemi_core::{Cart, CartLine, Coupon, LineKey, Selection, format_euros};

use crate::cart_store;
use crate::error::Result;
use crate::filters;
use crate::state::AppState;

/// Cart item display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub collection: String,
    pub name: String,
    pub color: Option<String>,
    pub size: Option<String>,
    pub image: Option<String>,
    pub quantity: u32,
    pub price: String,
    pub price_before: Option<String>,
    pub line_total: String,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u32,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.lines().iter().map(CartItemView::from).collect(),
            subtotal: format_euros(cart.subtotal()),
            item_count: cart.total_quantity(),
        }
    }
}

impl From<&CartLine> for CartItemView {
    fn from(line: &CartLine) -> Self {
        Self {
            collection: line.collection.clone(),
            name: line.name.clone(),
            color: line.color.clone(),
            size: line.size.clone(),
            image: line.image.clone(),
            quantity: line.quantity,
            price: format_euros(line.price),
            price_before: line.price_before.map(format_euros),
            line_total: format_euros(line.line_total()),
        }
    }
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub collection: String,
    pub name: String,
    pub color: Option<String>,
    pub size: Option<String>,
    pub quantity: Option<u32>,
}

/// Line key form data (increase/decrease/remove).
#[derive(Debug, Deserialize)]
pub struct LineKeyForm {
    pub collection: String,
    pub name: String,
    pub color: Option<String>,
    pub size: Option<String>,
}

impl From<LineKeyForm> for LineKey {
    fn from(form: LineKeyForm) -> Self {
        Self {
            collection: form.collection,
            name: form.name,
            color: form.color,
            size: form.size,
        }
    }
}

/// Coupon form data.
#[derive(Debug, Deserialize)]
pub struct CouponForm {
    pub code: String,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
    pub coupon_code: Option<String>,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

/// Coupon status fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/coupon_status.html")]
pub struct CouponStatusTemplate {
    pub coupon_code: Option<String>,
}

/// Display cart page.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<CartShowTemplate> {
    let cart = cart_store::load_cart(&session).await?;
    let coupon = cart_store::load_coupon(&session).await?;

    Ok(CartShowTemplate {
        cart: CartView::from(&cart),
        coupon_code: coupon.map(|c| c.code),
    })
}

/// Add item to cart (HTMX).
///
/// Re-resolves the variant against the catalog for the authoritative price,
/// then merges into the session cart. Returns an HTMX trigger to update the
/// cart count badge.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let page = state.api().get_collection(&form.collection).await?;
    let selection = Selection {
        brand: None,
        name: Some(form.name),
        color: form.color,
        size: form.size,
    };
    let Ok(resolution) =
        meltemi_core::selection::resolve(&page.variants, &page.collection, &selection)
    else {
        return Ok((
            StatusCode::NOT_FOUND,
            Html("<span class=\"text-red-500\">This item is no longer available</span>"),
        )
            .into_response());
    };

    if resolution.variant.sold_out {
        return Ok((
            StatusCode::CONFLICT,
            Html("<span class=\"text-red-500\">This item is sold out</span>"),
        )
            .into_response());
    }

    let mut cart = cart_store::load_cart(&session).await?;
    cart.add(CartLine {
        collection: form.collection,
        name: resolution.variant.name.clone(),
        color: resolution.selection.color.clone(),
        size: resolution.selection.size.clone(),
        image: resolution.variant.images.first().cloned(),
        price: resolution.variant.price,
        price_before: resolution.variant.price_before,
        quantity: form.quantity.unwrap_or(1),
    });
    cart_store::save_cart(&session, &cart).await?;

    Ok((
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartCountTemplate {
            count: cart.total_quantity(),
        },
    )
        .into_response())
}

/// Apply a cart mutation and answer with the items fragment.
async fn mutate(
    session: &Session,
    key: LineKey,
    op: impl FnOnce(&mut Cart, &LineKey),
) -> Result<Response> {
    let mut cart = cart_store::load_cart(session).await?;
    op(&mut cart, &key);
    cart_store::save_cart(session, &cart).await?;

    Ok((
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate {
            cart: CartView::from(&cart),
        },
    )
        .into_response())
}

/// Increase a line's quantity by one (HTMX).
#[instrument(skip(session))]
pub async fn increase(session: Session, Form(form): Form<LineKeyForm>) -> Result<Response> {
    mutate(&session, form.into(), Cart::increment).await
}

/// Decrease a line's quantity by one (HTMX).
///
/// A line at quantity one disappears from the cart.
#[instrument(skip(session))]
pub async fn decrease(session: Session, Form(form): Form<LineKeyForm>) -> Result<Response> {
    mutate(&session, form.into(), Cart::decrement).await
}

/// Remove a line from the cart (HTMX).
#[instrument(skip(session))]
pub async fn remove(session: Session, Form(form): Form<LineKeyForm>) -> Result<Response> {
    mutate(&session, form.into(), Cart::remove).await
}

/// Get cart count badge (HTMX).
#[instrument(skip(session))]
pub async fn count(session: Session) -> Result<CartCountTemplate> {
    let cart = cart_store::load_cart(&session).await?;
    Ok(CartCountTemplate {
        count: cart.total_quantity(),
    })
}

/// Apply a coupon code (HTMX).
///
/// Zero matches and lookup failure behave identically: the active coupon is
/// cleared. Lookup failures still get logged.
#[instrument(skip(state, session))]
pub async fn apply_coupon(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CouponForm>,
) -> Result<CouponStatusTemplate> {
    let code = form.code.trim();
    let coupon = match state.api().lookup_coupon(code).await {
        Ok(Some(coupon)) if coupon.is_well_formed() => Some(coupon),
        Ok(Some(coupon)) => {
            tracing::warn!(code = %coupon.code, "Ignoring malformed coupon from backend");
            None
        }
        Ok(None) => None,
        Err(e) => {
            tracing::warn!("Coupon lookup failed: {e}");
            None
        }
    };

    match &coupon {
        Some(coupon) => cart_store::save_coupon(&session, coupon).await?,
        None => cart_store::clear_coupon(&session).await?,
    }

    Ok(CouponStatusTemplate {
        coupon_code: coupon.map(|c: Coupon| c.code),
    })
}

/// Clear the applied coupon (HTMX).
#[instrument(skip(session))]
pub async fn remove_coupon(session: Session) -> Result<CouponStatusTemplate> {
    cart_store::clear_coupon(&session).await?;
    Ok(CouponStatusTemplate { coupon_code: None })
}
