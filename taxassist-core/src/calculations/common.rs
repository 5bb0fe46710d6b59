//! Common utility functions for tax calculations.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Rounds a decimal value to `dp` fractional digits using half-up rounding.
///
/// Standard financial rounding: midpoints round away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use taxassist_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(9640.50), 0), dec!(9641));
/// assert_eq!(round_half_up(dec!(11.34176), 1), dec!(11.3));
/// assert_eq!(round_half_up(dec!(-123.455), 2), dec!(-123.46)); // Away from zero
/// ```
pub fn round_half_up(
    value: Decimal,
    dp: u32,
) -> Decimal {
    value.round_dp_with_strategy(dp, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the maximum of two decimal values.
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// Converts a fractional rate to a whole percent (0.22 -> 22).
///
/// Schedule rates are whole-percent multiples, so the conversion is exact;
/// the fallback covers only malformed values and reports 0.
pub fn rate_as_percent(rate: Decimal) -> u32 {
    (rate * Decimal::ONE_HUNDRED).to_u32().unwrap_or(0)
}
