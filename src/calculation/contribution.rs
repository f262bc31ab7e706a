//! Employer/employee contribution calculation.
//!
//! Pension and maternity contributions are levied on gross salary, RAMA on
//! basic salary. All three split the same way: each side's rate is applied
//! to the base independently.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::ContributionRates;

use super::round_currency;

/// The two sides of a contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionAmounts {
    /// The employer's share.
    pub employer: Decimal,
    /// The employee's share, withheld from pay.
    pub employee: Decimal,
}

/// Applies employer and employee rates to a contribution base.
///
/// Both amounts are rounded to currency precision.
///
/// # Examples
///
/// ```
/// use payroll_tax_engine::calculation::compute_contribution;
/// use rust_decimal::Decimal;
///
/// let pension = compute_contribution(
///     Decimal::new(150_000, 0),
///     Decimal::new(8, 2),
///     Decimal::new(6, 2),
/// );
/// assert_eq!(pension.employer, Decimal::new(12_000, 0));
/// assert_eq!(pension.employee, Decimal::new(9_000, 0));
/// ```
pub fn compute_contribution(
    base: Decimal,
    employer_rate: Decimal,
    employee_rate: Decimal,
) -> ContributionAmounts {
    ContributionAmounts {
        employer: round_currency(base * employer_rate),
        employee: round_currency(base * employee_rate),
    }
}

/// [`compute_contribution`] with a configured rate pair.
pub fn compute_scheme(base: Decimal, rates: &ContributionRates) -> ContributionAmounts {
    compute_contribution(base, rates.employer, rates.employee)
}
