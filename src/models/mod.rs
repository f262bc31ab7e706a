//! Core data models for the payroll tax engine.
//!
//! This module contains all the domain models used throughout the engine.

mod breakdown;
mod calculation_result;
mod pay_period;
mod payroll_input;
mod payroll_run;

pub use breakdown::PayrollBreakdown;
pub use calculation_result::{AuditStep, AuditTrace, AuditWarning, PayslipResult};
pub use pay_period::PayPeriod;
pub use payroll_input::{MAX_SALARY_AMOUNT, PayrollInput};
pub use payroll_run::{FlaggedRecord, PayrollRunResult, PayrollRunTotals};
