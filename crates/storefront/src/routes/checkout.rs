//! Checkout route handlers.
//!
//! The summary page recomputes the quote from the session cart on every
//! render, so delivery/payment toggles are plain GETs with query params.
//! Submission recomputes once more and ships the whole quote to the
//! backend, which stays the final authority on what is charged.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use meltemi_core::{Cart, Coupon, DeliveryMethod, PaymentMethod, Quote};

use crate::api::{CustomerDetails, OrderSubmission};
use crate::cart_store;
use crate::error::{AppError, Result};
use crate::filters;
use crate::routes::cart::CartView;
use crate::state::AppState;

/// Quote display data for templates.
///
/// Amounts stay as `Decimal`; the `money` filter rounds and formats them at
/// render time.
#[derive(Clone)]
pub struct QuoteView {
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub has_discount: bool,
    pub shipping: Decimal,
    pub free_shipping: bool,
    pub surcharge: Decimal,
    pub has_surcharge: bool,
    pub vat_base: Decimal,
    pub vat_amount: Decimal,
    pub total: Decimal,
}

impl From<&Quote> for QuoteView {
    fn from(quote: &Quote) -> Self {
        let discount = quote.subtotal - quote.discounted_subtotal;
        Self {
            subtotal: quote.subtotal,
            discount,
            has_discount: !discount.is_zero(),
            shipping: quote.shipping_expense,
            free_shipping: quote.free_shipping,
            surcharge: quote.surcharge,
            has_surcharge: !quote.surcharge.is_zero(),
            vat_base: quote.vat_base,
            vat_amount: quote.vat_amount,
            total: quote.total,
        }
    }
}

/// Delivery/payment selection query params.
#[derive(Debug, Default, Deserialize)]
pub struct CheckoutOptions {
    #[serde(default)]
    pub delivery_method: Option<DeliveryMethod>,
    #[serde(default)]
    pub payment_method: Option<PaymentMethod>,
}

/// Checkout form data.
#[derive(Debug, Deserialize)]
pub struct CheckoutForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub delivery_method: DeliveryMethod,
    pub payment_method: PaymentMethod,
}

/// Checkout page template.
///
/// Delivery and payment selections are carried as their wire names so the
/// template can compare and echo them without knowing the enums.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/show.html")]
pub struct CheckoutShowTemplate {
    pub cart: CartView,
    pub quote: QuoteView,
    pub coupon_code: Option<String>,
    pub delivery_method: &'static str,
    pub payment_method: &'static str,
}

const fn delivery_name(method: DeliveryMethod) -> &'static str {
    match method {
        DeliveryMethod::Courier => "courier",
        DeliveryMethod::BoxNow => "box_now",
    }
}

const fn payment_name(method: PaymentMethod) -> &'static str {
    match method {
        PaymentMethod::Card => "card",
        PaymentMethod::CashOnDelivery => "cash_on_delivery",
    }
}

/// Order confirmation template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/confirmed.html")]
pub struct OrderConfirmedTemplate {
    pub order_name: Option<String>,
    pub email: Option<String>,
}

async fn quote_for(
    state: &AppState,
    cart: &Cart,
    coupon: Option<&Coupon>,
    delivery: DeliveryMethod,
    payment: PaymentMethod,
) -> Result<Quote> {
    let shipping = state.api().shipping_config().await?;
    Ok(meltemi_core::pricing::quote(
        cart.subtotal(),
        coupon,
        delivery,
        payment,
        &shipping,
    ))
}

/// Display the checkout summary.
#[instrument(skip(state, session))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    Query(options): Query<CheckoutOptions>,
) -> Result<Response> {
    let cart = cart_store::load_cart(&session).await?;
    if cart.is_empty() {
        return Ok(Redirect::to("/cart").into_response());
    }

    let coupon = cart_store::load_coupon(&session).await?;
    let delivery = options.delivery_method.unwrap_or(DeliveryMethod::Courier);
    let payment = options.payment_method.unwrap_or(PaymentMethod::Card);
    let quote = quote_for(&state, &cart, coupon.as_ref(), delivery, payment).await?;

    Ok(CheckoutShowTemplate {
        cart: CartView::from(&cart),
        quote: QuoteView::from(&quote),
        coupon_code: coupon.map(|c| c.code),
        delivery_method: delivery_name(delivery),
        payment_method: payment_name(payment),
    }
    .into_response())
}

/// Submit the order to the backend.
#[instrument(skip(state, session, form))]
pub async fn submit(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CheckoutForm>,
) -> Result<Response> {
    let cart = cart_store::load_cart(&session).await?;
    if cart.is_empty() {
        return Err(AppError::BadRequest("cart is empty".to_string()));
    }

    let coupon = cart_store::load_coupon(&session).await?;
    let quote = quote_for(
        &state,
        &cart,
        coupon.as_ref(),
        form.delivery_method,
        form.payment_method,
    )
    .await?;

    let submission = OrderSubmission {
        lines: cart.lines().to_vec(),
        coupon_code: coupon.map(|c| c.code),
        delivery_method: form.delivery_method,
        payment_method: form.payment_method,
        customer: CustomerDetails {
            name: form.name,
            email: form.email,
            phone: form.phone,
            address: form.address,
            city: form.city,
            postal_code: form.postal_code,
        },
        quote,
        placed_at: Utc::now(),
    };

    let outcome = state.api().submit_order(&submission).await?;

    // Card payments hand off to the processor before the order is final.
    if let Some(url) = outcome.redirect_url {
        return Ok(Redirect::to(&url).into_response());
    }

    cart_store::clear_all(&session).await?;

    Ok(OrderConfirmedTemplate {
        order_name: outcome.name,
        email: outcome.email,
    }
    .into_response())
}
