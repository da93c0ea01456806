//! Session-backed persistence for the cart and the active coupon.
//!
//! The engine's `Cart` is plain data; this module is the storage port that
//! keeps it (and the applied coupon) alive across page loads. The contract
//! is simple get/set/remove of JSON state - no transactional guarantees -
//! which is exactly what the session store offers.

use tower_sessions::Session;

use meltemi_core::{Cart, Coupon};

use crate::error::Result;

/// Session keys for shopper state.
pub mod keys {
    /// Key for the serialized cart.
    pub const CART: &str = "cart";

    /// Key for the applied coupon.
    pub const COUPON: &str = "coupon";
}

/// Load the cart from the session, or an empty cart if none is stored.
pub async fn load_cart(session: &Session) -> Result<Cart> {
    Ok(session.get::<Cart>(keys::CART).await?.unwrap_or_default())
}

/// Persist the cart to the session.
pub async fn save_cart(session: &Session, cart: &Cart) -> Result<()> {
    session.insert(keys::CART, cart).await?;
    Ok(())
}

/// Load the applied coupon, if any.
pub async fn load_coupon(session: &Session) -> Result<Option<Coupon>> {
    Ok(session.get::<Coupon>(keys::COUPON).await?)
}

/// Store the applied coupon.
pub async fn save_coupon(session: &Session, coupon: &Coupon) -> Result<()> {
    session.insert(keys::COUPON, coupon).await?;
    Ok(())
}

/// Clear the applied coupon (failed lookup or no match).
pub async fn clear_coupon(session: &Session) -> Result<()> {
    session.remove::<Coupon>(keys::COUPON).await?;
    Ok(())
}

/// Clear all shopper state after a successful order.
pub async fn clear_all(session: &Session) -> Result<()> {
    session.remove::<Cart>(keys::CART).await?;
    session.remove::<Coupon>(keys::COUPON).await?;
    Ok(())
}
