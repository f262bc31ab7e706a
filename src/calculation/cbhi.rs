//! CBHI contribution calculation.
//!
//! CBHI is levied on what remains of gross salary after the employee's
//! RSSB contributions and PAYE, so it can only be computed once both are
//! known.

use rust_decimal::Decimal;

use super::round_currency;

/// The CBHI base: gross less employee RSSB and PAYE, floored at zero.
pub fn cbhi_base(gross_salary: Decimal, employee_rssb_total: Decimal, paye: Decimal) -> Decimal {
    (gross_salary - employee_rssb_total - paye).max(Decimal::ZERO)
}

/// Computes the CBHI contribution.
///
/// # Examples
///
/// ```
/// use payroll_tax_engine::calculation::compute_cbhi;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// // (150000 - 9450 - 14000) x 0.005
/// let cbhi = compute_cbhi(
///     Decimal::new(150_000, 0),
///     Decimal::new(9_450, 0),
///     Decimal::new(14_000, 0),
///     Decimal::new(5, 3),
/// );
/// assert_eq!(cbhi, Decimal::from_str("632.75").unwrap());
/// ```
pub fn compute_cbhi(
    gross_salary: Decimal,
    employee_rssb_total: Decimal,
    paye: Decimal,
    cbhi_rate: Decimal,
) -> Decimal {
    round_currency(cbhi_base(gross_salary, employee_rssb_total, paye) * cbhi_rate)
}
