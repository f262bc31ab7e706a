//! PAYE income tax calculation.
//!
//! PAYE is levied at marginal rates: income is split into four slices by
//! the band limits and each slice is taxed at its own band's rate. A band
//! limit belongs to the lower band, so income exactly at `band1_limit` is
//! taxed entirely at `rate1`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::PayeBands;

use super::round_currency;

/// The portion of income falling in one PAYE band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandSlice {
    /// 1-based band number.
    pub band: u8,
    /// Lower bound of the band (exclusive, except for band 1).
    pub lower: Decimal,
    /// Upper bound of the band (inclusive); `None` for the top band.
    pub upper: Option<Decimal>,
    /// Marginal rate of the band.
    pub rate: Decimal,
    /// Income falling inside the band.
    pub taxable: Decimal,
    /// `taxable * rate`, unrounded.
    pub tax: Decimal,
}

/// Splits income across the PAYE bands.
///
/// Always returns one slice per band; bands the income does not reach have
/// zero `taxable` and `tax`. Income at or below zero yields all-zero slices.
///
/// # Examples
///
/// ```
/// use payroll_tax_engine::calculation::paye_band_slices;
/// use payroll_tax_engine::config::TaxRateConfig;
/// use rust_decimal::Decimal;
///
/// let bands = TaxRateConfig::rwanda_defaults().paye;
/// let slices = paye_band_slices(Decimal::new(150_000, 0), &bands);
///
/// assert_eq!(slices[1].taxable, Decimal::new(40_000, 0));
/// assert_eq!(slices[2].taxable, Decimal::new(50_000, 0));
/// assert_eq!(slices[3].taxable, Decimal::ZERO);
/// ```
pub fn paye_band_slices(income: Decimal, bands: &PayeBands) -> Vec<BandSlice> {
    bands
        .segments()
        .iter()
        .enumerate()
        .map(|(index, &(lower, upper, rate))| {
            let taxable = if income <= lower {
                Decimal::ZERO
            } else {
                match upper {
                    Some(upper) => income.min(upper) - lower,
                    None => income - lower,
                }
            };

            BandSlice {
                band: index as u8 + 1,
                lower,
                upper,
                rate,
                taxable,
                tax: taxable * rate,
            }
        })
        .collect()
}

/// Computes PAYE on a period's taxable income.
///
/// Returns the sum of the per-band taxes rounded to currency precision.
/// Income at or below zero yields zero.
///
/// # Examples
///
/// ```
/// use payroll_tax_engine::calculation::compute_paye;
/// use payroll_tax_engine::config::TaxRateConfig;
/// use rust_decimal::Decimal;
///
/// let bands = TaxRateConfig::rwanda_defaults().paye;
///
/// // 0 x 60000 + 0.10 x 40000 + 0.20 x 50000
/// assert_eq!(compute_paye(Decimal::new(150_000, 0), &bands), Decimal::new(14_000, 0));
/// ```
pub fn compute_paye(income: Decimal, bands: &PayeBands) -> Decimal {
    if income <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let total: Decimal = paye_band_slices(income, bands)
        .iter()
        .map(|slice| slice.tax)
        .sum();

    round_currency(total)
}
