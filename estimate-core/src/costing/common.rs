//! Shared numeric helpers for cost derivation: currency rounding and the
//! input-boundary clamps.

use rust_decimal::Decimal;

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// This follows standard financial rounding conventions where values at exactly
/// 0.005 are rounded up to 0.01 (away from zero). Every field of a cost
/// breakdown passes through this exactly once, at the end of derivation.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use estimate_core::costing::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(123.456)), dec!(123.46));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Clamps quantities, prices, and consumption rates to the non-negative
/// domain. Applied at every input boundary so a negative value can never
/// reach a derived total.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use estimate_core::costing::common::clamp_non_negative;
///
/// assert_eq!(clamp_non_negative(dec!(-3.50)), dec!(0));
/// assert_eq!(clamp_non_negative(dec!(3.50)), dec!(3.50));
/// ```
pub fn clamp_non_negative(value: Decimal) -> Decimal {
    if value < Decimal::ZERO {
        Decimal::ZERO
    } else {
        value
    }
}

/// Clamps a discount percentage to [0, 100].
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use estimate_core::costing::common::clamp_percent;
///
/// assert_eq!(clamp_percent(dec!(-10)), dec!(0));
/// assert_eq!(clamp_percent(dec!(35)), dec!(35));
/// assert_eq!(clamp_percent(dec!(250)), dec!(100));
/// ```
pub fn clamp_percent(value: Decimal) -> Decimal {
    value.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
}
