//! Payroll breakdown model.
//!
//! This module contains [`PayrollBreakdown`], the structured result of a
//! statutory deduction calculation for one employee.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Statutory deductions, employer contributions and net pay for one
/// employee in one pay period.
///
/// Every amount is non-negative and rounded to two decimal places.
/// `net_pay` always equals `gross_salary - total_employee_deductions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollBreakdown {
    /// Gross salary the breakdown was computed from.
    pub gross_salary: Decimal,
    /// Basic salary the RAMA contribution was computed from.
    pub basic_salary: Decimal,
    /// PAYE income tax withheld.
    pub paye_amount: Decimal,
    /// RSSB pension withheld from the employee.
    pub pension_employee: Decimal,
    /// RSSB pension paid by the employer.
    pub pension_employer: Decimal,
    /// RSSB maternity contribution withheld from the employee.
    pub maternity_employee: Decimal,
    /// RSSB maternity contribution paid by the employer.
    pub maternity_employer: Decimal,
    /// RAMA contribution withheld from the employee.
    pub rama_employee: Decimal,
    /// RAMA contribution paid by the employer.
    pub rama_employer: Decimal,
    /// CBHI contribution withheld from the employee.
    pub cbhi_amount: Decimal,
    /// Sum of every amount withheld from the employee.
    pub total_employee_deductions: Decimal,
    /// Sum of every employer-side contribution.
    pub total_employer_contributions: Decimal,
    /// Gross salary plus employer contributions.
    pub total_employer_cost: Decimal,
    /// Gross salary less employee deductions.
    pub net_pay: Decimal,
}

impl PayrollBreakdown {
    /// Employee share of RSSB contributions (pension plus maternity).
    ///
    /// This is the amount subtracted from gross salary before CBHI is
    /// levied.
    pub fn employee_rssb_total(&self) -> Decimal {
        self.pension_employee + self.maternity_employee
    }
}
