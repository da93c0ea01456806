//! Order pricing: coupon discount, VAT split, shipping and surcharges.
//!
//! [`quote`] is a pure function of the cart subtotal plus the order options;
//! the storefront renders its output and the backend recomputes the same
//! numbers independently on submission, so the arithmetic here must match the
//! backend step for step. Amounts stay at full precision; rounding is the
//! display layer's job.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Greek VAT: 24% of the discounted subtotal, with the remaining 76% as the
/// net base. Baked in, not configurable.
const VAT_SHARE: Decimal = Decimal::from_parts(24, 0, 0, false, 2);
const NET_SHARE: Decimal = Decimal::from_parts(76, 0, 0, false, 2);

/// How the order ships.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryMethod {
    /// ELTA courier home delivery.
    Courier,
    /// BOX NOW locker pickup.
    BoxNow,
}

/// How the order is paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Card,
    CashOnDelivery,
}

/// A discount code.
///
/// At most one of `percentage` / `fixed` is set. A coupon with neither is a
/// "gift" code: it discounts nothing and matters only by matching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coupon {
    #[serde(rename = "coupon_code")]
    pub code: String,
    /// Fractional discount, e.g. 0.10 for 10% off.
    #[serde(default)]
    pub percentage: Option<Decimal>,
    /// Flat discount in euros.
    #[serde(default)]
    pub fixed: Option<Decimal>,
}

impl Coupon {
    /// Whether this coupon carries no monetary discount.
    #[must_use]
    pub const fn is_gift(&self) -> bool {
        self.percentage.is_none() && self.fixed.is_none()
    }

    /// Whether the percentage/fixed fields are mutually consistent.
    #[must_use]
    pub const fn is_well_formed(&self) -> bool {
        !(self.percentage.is_some() && self.fixed.is_some())
    }
}

/// Shipping fees as configured in the back office.
///
/// Field names follow the backend wire format. `None` means not configured:
/// no fee is charged and no threshold applies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShippingConfig {
    /// Flat fee for ELTA courier delivery.
    #[serde(default, rename = "expense_elta_courier")]
    pub courier_expense: Option<Decimal>,
    /// Flat fee for BOX NOW locker delivery.
    #[serde(default, rename = "expense_box_now")]
    pub box_now_expense: Option<Decimal>,
    /// Discounted subtotal at or above which shipping is free.
    #[serde(default, rename = "free")]
    pub free_threshold: Option<Decimal>,
    /// Extra fee for cash-on-delivery orders.
    #[serde(default, rename = "surcharge")]
    pub cod_surcharge: Option<Decimal>,
}

/// The computed order total and its breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub subtotal: Decimal,
    /// Subtotal after the coupon, floored at zero.
    pub discounted_subtotal: Decimal,
    /// Net 76% share of the discounted subtotal.
    pub vat_base: Decimal,
    /// VAT 24% share of the discounted subtotal.
    pub vat_amount: Decimal,
    pub shipping_expense: Decimal,
    /// Whether the free-shipping threshold was met. Distinct from a zero
    /// `shipping_expense`: an unconfigured fee also costs nothing, but is
    /// not "free shipping".
    pub free_shipping: bool,
    pub surcharge: Decimal,
    pub total: Decimal,
}

/// Compute the order total for a cart subtotal and the chosen options.
///
/// The steps, in order: coupon discount (clamped at zero), VAT split,
/// free-shipping check against the discounted subtotal, delivery fee,
/// cash-on-delivery surcharge. Unconfigured fees count as zero.
#[must_use]
pub fn quote(
    subtotal: Decimal,
    coupon: Option<&Coupon>,
    delivery: DeliveryMethod,
    payment: PaymentMethod,
    shipping: &ShippingConfig,
) -> Quote {
    let discounted = coupon.map_or(subtotal, |c| {
        if let Some(percentage) = c.percentage {
            subtotal * (Decimal::ONE - percentage)
        } else if let Some(fixed) = c.fixed {
            subtotal - fixed
        } else {
            subtotal
        }
    });
    // A fixed coupon larger than the cart must not push the order negative.
    let discounted_subtotal = discounted.max(Decimal::ZERO);

    let vat_base = discounted_subtotal * NET_SHARE;
    let vat_amount = discounted_subtotal * VAT_SHARE;

    let free_shipping = shipping
        .free_threshold
        .is_some_and(|threshold| discounted_subtotal >= threshold);
    let shipping_expense = if free_shipping {
        Decimal::ZERO
    } else {
        match delivery {
            DeliveryMethod::Courier => shipping.courier_expense,
            DeliveryMethod::BoxNow => shipping.box_now_expense,
        }
        .unwrap_or(Decimal::ZERO)
    };

    let surcharge = if payment == PaymentMethod::CashOnDelivery {
        shipping.cod_surcharge.unwrap_or(Decimal::ZERO)
    } else {
        Decimal::ZERO
    };

    Quote {
        subtotal,
        discounted_subtotal,
        vat_base,
        vat_amount,
        shipping_expense,
        free_shipping,
        surcharge,
        total: discounted_subtotal + shipping_expense + surcharge,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn shipping() -> ShippingConfig {
        ShippingConfig {
            courier_expense: Some(dec("3.50")),
            box_now_expense: Some(dec("2.00")),
            free_threshold: Some(dec("50")),
            cod_surcharge: Some(dec("2.50")),
        }
    }

    #[test]
    fn percentage_coupon_reaching_the_free_threshold() {
        let coupon = Coupon {
            code: "WELCOME10".to_string(),
            percentage: Some(dec("0.10")),
            fixed: None,
        };
        let q = quote(
            dec("100.00"),
            Some(&coupon),
            DeliveryMethod::Courier,
            PaymentMethod::Card,
            &shipping(),
        );
        assert_eq!(q.discounted_subtotal, dec("90.00"));
        // 90 >= 50, so the courier fee is waived.
        assert!(q.free_shipping);
        assert_eq!(q.shipping_expense, Decimal::ZERO);
        assert_eq!(q.vat_base, dec("68.40"));
        assert_eq!(q.vat_amount, dec("21.60"));
        assert_eq!(q.total, dec("90.00"));
    }

    #[test]
    fn fixed_coupon_clamps_at_zero() {
        let coupon = Coupon {
            code: "TENOFF".to_string(),
            percentage: None,
            fixed: Some(dec("10")),
        };
        let q = quote(
            dec("5.00"),
            Some(&coupon),
            DeliveryMethod::Courier,
            PaymentMethod::Card,
            &ShippingConfig::default(),
        );
        assert_eq!(q.discounted_subtotal, Decimal::ZERO);
        assert_eq!(q.total, Decimal::ZERO);
        assert_eq!(q.vat_amount, Decimal::ZERO);
    }

    #[test]
    fn below_threshold_charges_the_delivery_fee() {
        let q = quote(
            dec("30.00"),
            None,
            DeliveryMethod::Courier,
            PaymentMethod::Card,
            &shipping(),
        );
        assert_eq!(q.shipping_expense, dec("3.50"));
        assert_eq!(q.total, dec("33.50"));
    }

    #[test]
    fn box_now_uses_its_own_fee() {
        let q = quote(
            dec("30.00"),
            None,
            DeliveryMethod::BoxNow,
            PaymentMethod::Card,
            &shipping(),
        );
        assert_eq!(q.shipping_expense, dec("2.00"));
    }

    #[test]
    fn threshold_is_inclusive() {
        let q = quote(
            dec("50.00"),
            None,
            DeliveryMethod::Courier,
            PaymentMethod::Card,
            &shipping(),
        );
        assert!(q.free_shipping);
        assert_eq!(q.shipping_expense, Decimal::ZERO);
    }

    #[test]
    fn cash_on_delivery_adds_the_surcharge() {
        let q = quote(
            dec("30.00"),
            None,
            DeliveryMethod::Courier,
            PaymentMethod::CashOnDelivery,
            &shipping(),
        );
        assert_eq!(q.surcharge, dec("2.50"));
        assert_eq!(q.total, dec("36.00"));
    }

    #[test]
    fn card_payment_has_no_surcharge() {
        let q = quote(
            dec("30.00"),
            None,
            DeliveryMethod::Courier,
            PaymentMethod::Card,
            &shipping(),
        );
        assert_eq!(q.surcharge, Decimal::ZERO);
    }

    #[test]
    fn unconfigured_shipping_charges_nothing() {
        let q = quote(
            dec("30.00"),
            None,
            DeliveryMethod::Courier,
            PaymentMethod::CashOnDelivery,
            &ShippingConfig::default(),
        );
        assert_eq!(q.shipping_expense, Decimal::ZERO);
        // Costing nothing is not the same as meeting the threshold.
        assert!(!q.free_shipping);
        assert_eq!(q.surcharge, Decimal::ZERO);
        assert_eq!(q.total, dec("30.00"));
    }

    #[test]
    fn no_threshold_means_shipping_is_never_free() {
        let mut config = shipping();
        config.free_threshold = None;
        let q = quote(
            dec("500.00"),
            None,
            DeliveryMethod::Courier,
            PaymentMethod::Card,
            &config,
        );
        assert_eq!(q.shipping_expense, dec("3.50"));
    }

    #[test]
    fn gift_coupon_discounts_nothing() {
        let coupon = Coupon {
            code: "FREESOCKS".to_string(),
            percentage: None,
            fixed: None,
        };
        assert!(coupon.is_gift());
        let q = quote(
            dec("40.00"),
            Some(&coupon),
            DeliveryMethod::Courier,
            PaymentMethod::Card,
            &shipping(),
        );
        assert_eq!(q.discounted_subtotal, dec("40.00"));
    }

    #[test]
    fn intermediate_amounts_keep_full_precision() {
        let coupon = Coupon {
            code: "THIRD".to_string(),
            percentage: Some(dec("0.333")),
            fixed: None,
        };
        let q = quote(
            dec("9.99"),
            Some(&coupon),
            DeliveryMethod::Courier,
            PaymentMethod::Card,
            &ShippingConfig::default(),
        );
        // 9.99 * 0.667, not a pre-rounded 6.66 or 6.67.
        assert_eq!(q.discounted_subtotal, dec("6.66333"));
    }

    #[test]
    fn coupon_wire_format_round_trips() {
        let json = r#"{"coupon_code":"WELCOME10","percentage":"0.10","fixed":null}"#;
        let coupon: Coupon = serde_json::from_str(json).unwrap();
        assert_eq!(coupon.code, "WELCOME10");
        assert_eq!(coupon.percentage, Some(dec("0.10")));
        assert!(coupon.is_well_formed());
    }

    #[test]
    fn shipping_config_uses_backend_field_names() {
        let json = r#"{"expense_elta_courier":"3.50","expense_box_now":"2.00","free":"50","surcharge":"2.50"}"#;
        let config: ShippingConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config, shipping());
    }
}
