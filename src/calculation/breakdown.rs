//! Full statutory breakdown for one employee.
//!
//! The sub-calculations run in a fixed order: PAYE on gross, pension and
//! maternity on gross, RAMA on basic, then CBHI, whose base depends on PAYE
//! and the employee's RSSB total.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::TaxRateConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{PayrollBreakdown, PayrollInput};

use super::{compute_cbhi, compute_paye, compute_scheme};

/// Computes every deduction, employer contribution and the net pay for one
/// payroll input.
///
/// `config` is expected to have passed [`TaxRateConfig::validate`]; tables
/// obtained from the loader always have.
///
/// # Errors
///
/// - `InvalidPayrollInput` if the input has a negative amount or a basic
///   salary above gross.
/// - `ComputationAnomaly` if employee deductions exceed gross salary. This
///   only happens when the configured rates sum above 100% of their base.
///
/// # Examples
///
/// ```
/// use payroll_tax_engine::calculation::compute_breakdown;
/// use payroll_tax_engine::config::TaxRateConfig;
/// use payroll_tax_engine::models::PayrollInput;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let input = PayrollInput {
///     employee_id: "emp_001".to_string(),
///     gross_salary: Decimal::new(150_000, 0),
///     basic_salary: Decimal::new(100_000, 0),
/// };
///
/// let breakdown = compute_breakdown(&input, &TaxRateConfig::rwanda_defaults()).unwrap();
/// assert_eq!(breakdown.net_pay, Decimal::from_str("118417.25").unwrap());
/// ```
pub fn compute_breakdown(
    input: &PayrollInput,
    config: &TaxRateConfig,
) -> EngineResult<PayrollBreakdown> {
    input.validate()?;

    let gross = input.gross_salary;
    let basic = input.basic_salary;

    let paye_amount = compute_paye(gross, &config.paye);
    let pension = compute_scheme(gross, &config.pension);
    let maternity = compute_scheme(gross, &config.maternity);
    let rama = compute_scheme(basic, &config.rama);

    let employee_rssb_total = pension.employee + maternity.employee;
    let cbhi_amount = compute_cbhi(gross, employee_rssb_total, paye_amount, config.cbhi_rate);

    let total_employee_deductions =
        paye_amount + pension.employee + maternity.employee + rama.employee + cbhi_amount;
    let total_employer_contributions = pension.employer + maternity.employer + rama.employer;
    let net_pay = gross - total_employee_deductions;

    if net_pay < Decimal::ZERO {
        return Err(EngineError::ComputationAnomaly {
            employee_id: input.employee_id.clone(),
            net_pay,
            message: format!(
                "employee deductions {} exceed gross salary {}",
                total_employee_deductions, gross
            ),
        });
    }

    debug!(
        employee_id = %input.employee_id,
        gross_salary = %gross,
        paye = %paye_amount,
        cbhi = %cbhi_amount,
        net_pay = %net_pay,
        "Computed payroll breakdown"
    );

    Ok(PayrollBreakdown {
        gross_salary: gross,
        basic_salary: basic,
        paye_amount,
        pension_employee: pension.employee,
        pension_employer: pension.employer,
        maternity_employee: maternity.employee,
        maternity_employer: maternity.employer,
        rama_employee: rama.employee,
        rama_employer: rama.employer,
        cbhi_amount,
        total_employee_deductions,
        total_employer_contributions,
        total_employer_cost: gross + total_employer_contributions,
        net_pay,
    })
}
