//! Display-time rounding for monetary amounts.
//!
//! The catalog stores plain decimal euros. All engine arithmetic runs on the
//! full-precision `Decimal` values; these helpers exist so rounding happens
//! exactly once, at the rendering edge, instead of compounding through the
//! pricing pipeline.

use rust_decimal::{Decimal, RoundingStrategy};

/// Round an amount to the two decimal places shown to shoppers.
///
/// Midpoints round away from zero (9.995 -> 10.00), matching how the
/// storefront has always displayed prices.
#[must_use]
pub fn display_amount(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Format an amount as a euro price string, e.g. `"19.90 €"`.
#[must_use]
pub fn format_euros(amount: Decimal) -> String {
    format!("{:.2} €", display_amount(amount))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn rounds_only_for_display() {
        assert_eq!(display_amount(dec("21.5999")), dec("21.60"));
        assert_eq!(display_amount(dec("9.995")), dec("10.00"));
        assert_eq!(display_amount(dec("9.994")), dec("9.99"));
    }

    #[test]
    fn formats_with_two_decimals() {
        assert_eq!(format_euros(dec("90")), "90.00 €");
        assert_eq!(format_euros(dec("3.5")), "3.50 €");
        assert_eq!(format_euros(dec("0")), "0.00 €");
    }
}
