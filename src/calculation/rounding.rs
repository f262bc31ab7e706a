//! Currency rounding.
//!
//! Every monetary component is rounded as soon as it is produced, and later
//! components are computed from the rounded figures.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places amounts are kept to.
pub const CURRENCY_DECIMAL_PLACES: u32 = 2;

/// Rounds an amount to two decimal places, half away from zero.
///
/// # Examples
///
/// ```
/// use payroll_tax_engine::calculation::round_currency;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_currency(Decimal::from_str("632.754").unwrap()), Decimal::from_str("632.75").unwrap());
/// assert_eq!(round_currency(Decimal::from_str("632.755").unwrap()), Decimal::from_str("632.76").unwrap());
/// ```
pub fn round_currency(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(
        CURRENCY_DECIMAL_PLACES,
        RoundingStrategy::MidpointAwayFromZero,
    )
}
