//! End-to-end pricing: backend wire fixtures in, checkout totals out.

#![allow(clippy::unwrap_used)]

use meltemi_core::{
    Cart, Coupon, DeliveryMethod, PaymentMethod, Selection, ShippingConfig, format_euros,
    pricing::quote, selection::resolve,
};
use meltemi_integration_tests::{dec, line_from, tees_collection, tees_variants};

/// Shipping configuration as the backend serves it.
fn shipping_fixture() -> ShippingConfig {
    serde_json::from_str(
        r#"{"expense_elta_courier":"3.50","expense_box_now":"2.00","free":"60","surcharge":"2.50"}"#,
    )
    .unwrap()
}

fn two_tees() -> Cart {
    let r = resolve(&tees_variants(), &tees_collection(), &Selection::default()).unwrap();
    let mut cart = Cart::default();
    cart.add(line_from(&r.variant, r.selection.size.as_deref(), 2));
    cart
}

#[test]
fn checkout_below_the_threshold_charges_shipping() {
    let cart = two_tees();
    assert_eq!(cart.subtotal(), dec("59.80"));

    let q = quote(
        cart.subtotal(),
        None,
        DeliveryMethod::Courier,
        PaymentMethod::Card,
        &shipping_fixture(),
    );
    assert_eq!(q.shipping_expense, dec("3.50"));
    assert_eq!(q.total, dec("63.30"));
}

#[test]
fn coupon_can_lose_the_free_shipping_it_almost_had() {
    // 59.80 is under the 60 threshold already; a discount moves it further
    // away, never closer. The threshold is checked after the discount.
    let coupon: Coupon =
        serde_json::from_str(r#"{"coupon_code":"WELCOME10","percentage":"0.10"}"#).unwrap();

    let q = quote(
        dec("65.00"),
        Some(&coupon),
        DeliveryMethod::Courier,
        PaymentMethod::Card,
        &shipping_fixture(),
    );
    // 65 - 10% = 58.50, below 60: shipping comes back.
    assert_eq!(q.discounted_subtotal, dec("58.500"));
    assert_eq!(q.shipping_expense, dec("3.50"));
}

#[test]
fn cash_on_delivery_via_locker_combines_both_fees() {
    let q = quote(
        two_tees().subtotal(),
        None,
        DeliveryMethod::BoxNow,
        PaymentMethod::CashOnDelivery,
        &shipping_fixture(),
    );
    assert_eq!(q.shipping_expense, dec("2.00"));
    assert_eq!(q.surcharge, dec("2.50"));
    assert_eq!(q.total, dec("64.30"));
}

#[test]
fn vat_split_matches_the_backend_arithmetic() {
    let q = quote(
        dec("100.00"),
        None,
        DeliveryMethod::Courier,
        PaymentMethod::Card,
        &shipping_fixture(),
    );
    assert_eq!(q.vat_base, dec("76.00"));
    assert_eq!(q.vat_amount, dec("24.00"));
    assert_eq!(q.vat_base + q.vat_amount, q.discounted_subtotal);
}

#[test]
fn display_rounds_only_at_the_edge() {
    let coupon: Coupon =
        serde_json::from_str(r#"{"coupon_code":"THIRD","percentage":"0.333"}"#).unwrap();
    let q = quote(
        dec("9.99"),
        Some(&coupon),
        DeliveryMethod::Courier,
        PaymentMethod::Card,
        &ShippingConfig::default(),
    );

    // Full precision inside, two decimals with the euro sign at the edge.
    assert_eq!(q.discounted_subtotal, dec("6.66333"));
    assert_eq!(format_euros(q.discounted_subtotal), "6.66 €");
    assert_eq!(format_euros(q.vat_amount), "1.60 €");
}

#[test]
fn gift_coupon_keeps_the_totals_intact() {
    let coupon: Coupon = serde_json::from_str(r#"{"coupon_code":"FREESOCKS"}"#).unwrap();
    assert!(coupon.is_gift());

    let with = quote(
        dec("59.80"),
        Some(&coupon),
        DeliveryMethod::Courier,
        PaymentMethod::Card,
        &shipping_fixture(),
    );
    let without = quote(
        dec("59.80"),
        None,
        DeliveryMethod::Courier,
        PaymentMethod::Card,
        &shipping_fixture(),
    );
    assert_eq!(with, without);
}
