//! `quote` - price an order offline.
//!
//! Useful for support: given the cart a shopper reports and the live
//! shipping configuration, reproduce exactly what the storefront charged.

#![allow(clippy::print_stdout)]

use std::path::Path;

use meltemi_core::{
    Cart, Coupon, DeliveryMethod, PaymentMethod, ShippingConfig, format_euros,
};

use super::{CommandError, read_json};

/// Compute and print a quote from the given files.
///
/// # Errors
///
/// Returns an error if any input file cannot be read or parsed.
pub fn run(
    cart: &Path,
    shipping: &Path,
    coupon: Option<&Path>,
    delivery: DeliveryMethod,
    payment: PaymentMethod,
) -> Result<(), CommandError> {
    let cart: Cart = read_json(cart)?;
    let shipping: ShippingConfig = read_json(shipping)?;
    let coupon: Option<Coupon> = coupon.map(read_json).transpose()?;

    let quote = meltemi_core::pricing::quote(
        cart.subtotal(),
        coupon.as_ref(),
        delivery,
        payment,
        &shipping,
    );

    println!("Subtotal:   {}", format_euros(quote.subtotal));
    if quote.discounted_subtotal != quote.subtotal {
        println!(
            "Discounted: {} ({})",
            format_euros(quote.discounted_subtotal),
            coupon.as_ref().map_or("-", |c| c.code.as_str()),
        );
    }
    println!("Net:        {}", format_euros(quote.vat_base));
    println!("VAT 24%:    {}", format_euros(quote.vat_amount));
    println!("Shipping:   {}", format_euros(quote.shipping_expense));
    if !quote.surcharge.is_zero() {
        println!("Surcharge:  {}", format_euros(quote.surcharge));
    }
    println!("Total:      {}", format_euros(quote.total));

    Ok(())
}
