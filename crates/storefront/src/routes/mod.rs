//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                        - Home page (collection listing)
//! GET  /health                  - Health check
//!
//! # Products
//! GET  /collections/{slug}         - Collection product page
//! GET  /collections/{slug}/picker  - Option picker fragment (HTMX)
//!
//! # Cart (HTMX fragments)
//! GET  /cart                    - Cart page
//! POST /cart/add                - Add to cart (returns count badge, triggers cart-updated)
//! POST /cart/increase           - Increase line quantity (returns cart_items fragment)
//! POST /cart/decrease           - Decrease line quantity (returns cart_items fragment)
//! POST /cart/remove             - Remove line (returns cart_items fragment)
//! GET  /cart/count              - Cart count badge (fragment)
//! POST /cart/coupon             - Apply a coupon code (returns coupon fragment)
//! POST /cart/coupon/remove      - Clear the applied coupon
//!
//! # Checkout
//! GET  /checkout                - Order summary with totals
//! POST /checkout                - Submit the order to the backend
//! ```

pub mod cart;
pub mod checkout;
pub mod home;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn collection_routes() -> Router<AppState> {
    Router::new()
        .route("/{slug}", get(products::show))
        .route("/{slug}/picker", get(products::picker))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/increase", post(cart::increase))
        .route("/decrease", post(cart::decrease))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
        .route("/coupon", post(cart::apply_coupon))
        .route("/coupon/remove", post(cart::remove_coupon))
}

/// Create the checkout routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new().route("/", get(checkout::show).post(checkout::submit))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Product routes
        .nest("/collections", collection_routes())
        // Cart routes
        .nest("/cart", cart_routes())
        // Checkout
        .nest("/checkout", checkout_routes())
}
