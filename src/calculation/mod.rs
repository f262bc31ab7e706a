//! Calculation logic for the payroll tax engine.
//!
//! This module contains the statutory deduction rules: banded PAYE income
//! tax, RSSB pension and maternity contributions, RAMA medical contributions
//! and the CBHI contribution, the ordered breakdown that combines them, the
//! audited payslip built on top of it, and batch payroll runs.
//!
//! All functions are pure and synchronous. They hold no shared state, so
//! callers may compute many employees concurrently without coordination.

mod breakdown;
mod cbhi;
mod contribution;
mod paye;
mod payroll_run;
mod payslip;
mod rounding;

pub use breakdown::compute_breakdown;
pub use cbhi::{cbhi_base, compute_cbhi};
pub use contribution::{ContributionAmounts, compute_contribution, compute_scheme};
pub use paye::{BandSlice, compute_paye, paye_band_slices};
pub use payroll_run::{run_company_payroll, run_payroll};
pub use payslip::{ENGINE_VERSION, calculate_payslip};
pub use rounding::{CURRENCY_DECIMAL_PLACES, round_currency};
