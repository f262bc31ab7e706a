//! Payroll run models.
//!
//! This module contains the batch result of computing a whole company's
//! payroll: the successful payslips, the records that were flagged and
//! skipped, and aggregate totals.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{PayPeriod, PayrollBreakdown, PayslipResult};

/// A payroll record that could not be computed.
///
/// The record is excluded from the run totals; an operator is expected to
/// correct the input or the rate configuration and rerun it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlaggedRecord {
    /// The employee whose record was skipped.
    pub employee_id: String,
    /// Machine-readable error code (e.g., "COMPUTATION_ANOMALY").
    pub code: String,
    /// Human-readable description of the problem.
    pub message: String,
}

/// Aggregate figures over the successfully computed records of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRunTotals {
    /// Number of records computed.
    pub processed_count: usize,
    /// Number of records flagged and skipped.
    pub flagged_count: usize,
    /// Total gross salary.
    pub gross_salary: Decimal,
    /// Total PAYE withheld.
    pub paye_amount: Decimal,
    /// Total pension withheld from employees.
    pub pension_employee: Decimal,
    /// Total pension paid by the employer.
    pub pension_employer: Decimal,
    /// Total maternity withheld from employees.
    pub maternity_employee: Decimal,
    /// Total maternity paid by the employer.
    pub maternity_employer: Decimal,
    /// Total RAMA withheld from employees.
    pub rama_employee: Decimal,
    /// Total RAMA paid by the employer.
    pub rama_employer: Decimal,
    /// Total CBHI withheld.
    pub cbhi_amount: Decimal,
    /// Total of all employee deductions.
    pub total_employee_deductions: Decimal,
    /// Total net pay.
    pub net_pay: Decimal,
    /// Total of all employer contributions.
    pub total_employer_contributions: Decimal,
    /// Total employer cost (gross plus employer contributions).
    pub total_employer_cost: Decimal,
}

impl PayrollRunTotals {
    /// Returns these totals with one more breakdown added, or `None` if any
    /// sum would overflow.
    pub fn checked_add(&self, breakdown: &PayrollBreakdown) -> Option<Self> {
        Some(Self {
            processed_count: self.processed_count.checked_add(1)?,
            flagged_count: self.flagged_count,
            gross_salary: self.gross_salary.checked_add(breakdown.gross_salary)?,
            paye_amount: self.paye_amount.checked_add(breakdown.paye_amount)?,
            pension_employee: self.pension_employee.checked_add(breakdown.pension_employee)?,
            pension_employer: self.pension_employer.checked_add(breakdown.pension_employer)?,
            maternity_employee: self
                .maternity_employee
                .checked_add(breakdown.maternity_employee)?,
            maternity_employer: self
                .maternity_employer
                .checked_add(breakdown.maternity_employer)?,
            rama_employee: self.rama_employee.checked_add(breakdown.rama_employee)?,
            rama_employer: self.rama_employer.checked_add(breakdown.rama_employer)?,
            cbhi_amount: self.cbhi_amount.checked_add(breakdown.cbhi_amount)?,
            total_employee_deductions: self
                .total_employee_deductions
                .checked_add(breakdown.total_employee_deductions)?,
            net_pay: self.net_pay.checked_add(breakdown.net_pay)?,
            total_employer_contributions: self
                .total_employer_contributions
                .checked_add(breakdown.total_employer_contributions)?,
            total_employer_cost: self
                .total_employer_cost
                .checked_add(breakdown.total_employer_cost)?,
        })
    }
}

/// The result of a company payroll run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRunResult {
    /// Unique identifier for this run.
    pub run_id: Uuid,
    /// When the run was performed.
    pub timestamp: DateTime<Utc>,
    /// The company the run is for, if any.
    pub company_id: Option<String>,
    /// The pay period covered by the run.
    pub pay_period: PayPeriod,
    /// Payslips for every successfully computed record, in input order.
    pub payslips: Vec<PayslipResult>,
    /// Records that were flagged and skipped, in input order.
    pub flagged: Vec<FlaggedRecord>,
    /// Totals over `payslips`.
    pub totals: PayrollRunTotals,
}
