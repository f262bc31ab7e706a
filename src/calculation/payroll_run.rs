//! Batch payroll runs.
//!
//! A run computes a payslip for every input record. Records that cannot be
//! computed are flagged and skipped; they never abort the rest of the run.
//! Only run-level problems (an invalid pay period, missing rates) fail the
//! whole run.

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::{ConfigLoader, TaxRateConfig};
use crate::error::{EngineError, EngineResult};
use crate::models::{FlaggedRecord, PayPeriod, PayrollInput, PayrollRunResult, PayrollRunTotals};

use super::calculate_payslip;

/// Runs payroll for a batch of employees against one rate table.
///
/// Successful payslips and flagged records both keep their input order.
/// Totals cover the successful payslips only.
///
/// # Examples
///
/// ```
/// use payroll_tax_engine::calculation::run_payroll;
/// use payroll_tax_engine::config::TaxRateConfig;
/// use payroll_tax_engine::models::{PayPeriod, PayrollInput};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let inputs = vec![
///     PayrollInput {
///         employee_id: "emp_001".to_string(),
///         gross_salary: Decimal::new(150_000, 0),
///         basic_salary: Decimal::new(100_000, 0),
///     },
///     PayrollInput {
///         employee_id: "emp_002".to_string(),
///         gross_salary: Decimal::new(50_000, 0),
///         basic_salary: Decimal::new(90_000, 0),
///     },
/// ];
/// let period = PayPeriod {
///     start_date: NaiveDate::from_ymd_opt(2025, 8, 1).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2025, 8, 31).unwrap(),
/// };
///
/// let run = run_payroll(None, &inputs, &TaxRateConfig::rwanda_defaults(), &period).unwrap();
/// assert_eq!(run.payslips.len(), 1);
/// assert_eq!(run.flagged[0].employee_id, "emp_002");
/// ```
pub fn run_payroll(
    company_id: Option<&str>,
    inputs: &[PayrollInput],
    config: &TaxRateConfig,
    pay_period: &PayPeriod,
) -> EngineResult<PayrollRunResult> {
    pay_period.validate()?;

    let run_id = Uuid::new_v4();
    let mut payslips = Vec::with_capacity(inputs.len());
    let mut flagged = Vec::new();
    let mut totals = PayrollRunTotals::default();

    for input in inputs {
        let outcome = calculate_payslip(input, config, pay_period).and_then(|payslip| {
            let next = totals.checked_add(&payslip.breakdown).ok_or_else(|| {
                EngineError::ComputationAnomaly {
                    employee_id: input.employee_id.clone(),
                    net_pay: payslip.breakdown.net_pay,
                    message: "run totals overflow the supported amount range".to_string(),
                }
            })?;
            Ok((payslip, next))
        });

        match outcome {
            Ok((payslip, next)) => {
                totals = next;
                payslips.push(payslip);
            }
            Err(err) => {
                warn!(
                    run_id = %run_id,
                    employee_id = %input.employee_id,
                    code = err.code(),
                    error = %err,
                    "Payroll record flagged and skipped"
                );
                flagged.push(FlaggedRecord {
                    employee_id: input.employee_id.clone(),
                    code: err.code().to_string(),
                    message: err.to_string(),
                });
            }
        }
    }
    totals.flagged_count = flagged.len();

    info!(
        run_id = %run_id,
        company_id = company_id.unwrap_or("default"),
        processed = totals.processed_count,
        flagged = totals.flagged_count,
        net_pay = %totals.net_pay,
        "Payroll run completed"
    );

    Ok(PayrollRunResult {
        run_id,
        timestamp: Utc::now(),
        company_id: company_id.map(str::to_string),
        pay_period: pay_period.clone(),
        payslips,
        flagged,
        totals,
    })
}

/// Runs payroll for a company, resolving its rates from loaded settings.
///
/// The rate table effective on the pay period's start date is used.
///
/// # Errors
///
/// `RatesNotFound` if no table is effective on that date, or
/// `InvalidPayPeriod` for a reversed period.
pub fn run_company_payroll(
    loader: &ConfigLoader,
    company_id: Option<&str>,
    inputs: &[PayrollInput],
    pay_period: &PayPeriod,
) -> EngineResult<PayrollRunResult> {
    pay_period.validate()?;
    let config = loader.tax_config(company_id, pay_period.start_date)?;
    run_payroll(company_id, inputs, config, pay_period)
}
