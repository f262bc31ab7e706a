//! Payroll input model.
//!
//! This module defines the per-employee, per-period salary figures the
//! calculator consumes.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Largest gross salary accepted for one record: 10^15.
///
/// Keeps employer cost and run totals far inside the range of [`Decimal`].
pub const MAX_SALARY_AMOUNT: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

/// One employee's salary figures for one pay period.
///
/// # Example
///
/// ```
/// use payroll_tax_engine::models::PayrollInput;
/// use rust_decimal::Decimal;
///
/// let input = PayrollInput {
///     employee_id: "emp_001".to_string(),
///     gross_salary: Decimal::new(150_000, 0),
///     basic_salary: Decimal::new(100_000, 0),
/// };
/// assert!(input.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollInput {
    /// Unique identifier for the employee.
    pub employee_id: String,
    /// Total salary for the period, allowances included.
    pub gross_salary: Decimal,
    /// Basic salary for the period; the RAMA base.
    pub basic_salary: Decimal,
}

impl PayrollInput {
    /// Checks that both amounts are non-negative, gross does not exceed
    /// [`MAX_SALARY_AMOUNT`] and basic does not exceed gross.
    pub fn validate(&self) -> EngineResult<()> {
        if self.gross_salary < Decimal::ZERO {
            return Err(self.invalid("gross_salary", "cannot be negative"));
        }
        if self.gross_salary > MAX_SALARY_AMOUNT {
            return Err(self.invalid(
                "gross_salary",
                &format!("cannot exceed {}", MAX_SALARY_AMOUNT),
            ));
        }
        if self.basic_salary < Decimal::ZERO {
            return Err(self.invalid("basic_salary", "cannot be negative"));
        }
        if self.basic_salary > self.gross_salary {
            return Err(self.invalid(
                "basic_salary",
                &format!(
                    "cannot exceed gross_salary ({} > {})",
                    self.basic_salary, self.gross_salary
                ),
            ));
        }
        Ok(())
    }

    fn invalid(&self, field: &str, message: &str) -> EngineError {
        EngineError::InvalidPayrollInput {
            employee_id: self.employee_id.clone(),
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}
