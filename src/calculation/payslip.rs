//! Audited payslip calculation.
//!
//! Wraps [`compute_breakdown`] with an audit trace: one step per statutory
//! rule, in the order the rules are applied, each recording its inputs,
//! outputs and a human-readable derivation.

use std::time::Instant;

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::config::{ContributionRates, TaxRateConfig};
use crate::error::EngineResult;
use crate::models::{
    AuditStep, AuditTrace, AuditWarning, PayPeriod, PayrollBreakdown, PayrollInput, PayslipResult,
};

use super::{cbhi_base, compute_breakdown, paye_band_slices};

/// The version string stamped on every payslip.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Share of gross salary above which deductions are flagged for review.
const HIGH_DEDUCTION_RATIO: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

/// Calculates an employee's payslip with a full audit trace.
///
/// # Errors
///
/// Propagates the errors of [`compute_breakdown`], plus `InvalidPayPeriod`
/// for a period that ends before it starts.
///
/// # Examples
///
/// ```
/// use payroll_tax_engine::calculation::calculate_payslip;
/// use payroll_tax_engine::config::TaxRateConfig;
/// use payroll_tax_engine::models::{PayPeriod, PayrollInput};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let input = PayrollInput {
///     employee_id: "emp_001".to_string(),
///     gross_salary: Decimal::new(150_000, 0),
///     basic_salary: Decimal::new(100_000, 0),
/// };
/// let period = PayPeriod {
///     start_date: NaiveDate::from_ymd_opt(2025, 8, 1).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2025, 8, 31).unwrap(),
/// };
///
/// let payslip = calculate_payslip(&input, &TaxRateConfig::rwanda_defaults(), &period).unwrap();
/// assert_eq!(payslip.audit_trace.steps.len(), 6);
/// ```
pub fn calculate_payslip(
    input: &PayrollInput,
    config: &TaxRateConfig,
    pay_period: &PayPeriod,
) -> EngineResult<PayslipResult> {
    let start_time = Instant::now();
    pay_period.validate()?;

    let breakdown = compute_breakdown(input, config)?;
    let steps = audit_steps(&breakdown, config);
    let warnings = audit_warnings(&breakdown);

    Ok(PayslipResult {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: ENGINE_VERSION.to_string(),
        employee_id: input.employee_id.clone(),
        pay_period: pay_period.clone(),
        breakdown,
        audit_trace: AuditTrace {
            steps,
            warnings,
            duration_us: start_time.elapsed().as_micros() as u64,
        },
    })
}

fn audit_steps(breakdown: &PayrollBreakdown, config: &TaxRateConfig) -> Vec<AuditStep> {
    let gross = breakdown.gross_salary;

    vec![
        paye_step(1, breakdown, config),
        contribution_step(
            2,
            "pension",
            "RSSB Pension Contribution",
            "gross_salary",
            gross,
            &config.pension,
            breakdown.pension_employer,
            breakdown.pension_employee,
        ),
        contribution_step(
            3,
            "maternity",
            "RSSB Maternity Contribution",
            "gross_salary",
            gross,
            &config.maternity,
            breakdown.maternity_employer,
            breakdown.maternity_employee,
        ),
        contribution_step(
            4,
            "rama",
            "RAMA Medical Contribution",
            "basic_salary",
            breakdown.basic_salary,
            &config.rama,
            breakdown.rama_employer,
            breakdown.rama_employee,
        ),
        cbhi_step(5, breakdown, config),
        net_pay_step(6, breakdown),
    ]
}

fn paye_step(step_number: u32, breakdown: &PayrollBreakdown, config: &TaxRateConfig) -> AuditStep {
    let slices = paye_band_slices(breakdown.gross_salary, &config.paye);

    let slice_json: Vec<serde_json::Value> = slices
        .iter()
        .map(|slice| {
            serde_json::json!({
                "band": slice.band,
                "rate": slice.rate.normalize().to_string(),
                "taxable": slice.taxable.normalize().to_string(),
                "tax": slice.tax.normalize().to_string()
            })
        })
        .collect();

    let terms: Vec<String> = slices
        .iter()
        .filter(|slice| !slice.taxable.is_zero())
        .map(|slice| {
            format!(
                "{} x {}",
                slice.rate.normalize(),
                slice.taxable.normalize()
            )
        })
        .collect();

    let reasoning = if terms.is_empty() {
        "No taxable income - PAYE is 0".to_string()
    } else {
        format!(
            "{} = {}",
            terms.join(" + "),
            breakdown.paye_amount.normalize()
        )
    };

    AuditStep {
        step_number,
        rule_id: "paye".to_string(),
        rule_name: "PAYE Income Tax".to_string(),
        input: serde_json::json!({
            "taxable_income": breakdown.gross_salary.normalize().to_string(),
            "band_limits": [
                config.paye.band1_limit.normalize().to_string(),
                config.paye.band2_limit.normalize().to_string(),
                config.paye.band3_limit.normalize().to_string()
            ]
        }),
        output: serde_json::json!({
            "paye_amount": breakdown.paye_amount.normalize().to_string(),
            "slices": slice_json
        }),
        reasoning,
    }
}

#[allow(clippy::too_many_arguments)]
fn contribution_step(
    step_number: u32,
    rule_id: &str,
    rule_name: &str,
    base_name: &str,
    base: Decimal,
    rates: &ContributionRates,
    employer: Decimal,
    employee: Decimal,
) -> AuditStep {
    AuditStep {
        step_number,
        rule_id: rule_id.to_string(),
        rule_name: rule_name.to_string(),
        input: serde_json::json!({
            base_name: base.normalize().to_string(),
            "employer_rate": rates.employer.normalize().to_string(),
            "employee_rate": rates.employee.normalize().to_string()
        }),
        output: serde_json::json!({
            "employer": employer.normalize().to_string(),
            "employee": employee.normalize().to_string()
        }),
        reasoning: format!(
            "Employer: {} x {} = {}; employee: {} x {} = {}",
            base.normalize(),
            rates.employer.normalize(),
            employer.normalize(),
            base.normalize(),
            rates.employee.normalize(),
            employee.normalize()
        ),
    }
}

fn cbhi_step(step_number: u32, breakdown: &PayrollBreakdown, config: &TaxRateConfig) -> AuditStep {
    let rssb = breakdown.employee_rssb_total();
    let base = cbhi_base(breakdown.gross_salary, rssb, breakdown.paye_amount);

    AuditStep {
        step_number,
        rule_id: "cbhi".to_string(),
        rule_name: "CBHI Contribution".to_string(),
        input: serde_json::json!({
            "gross_salary": breakdown.gross_salary.normalize().to_string(),
            "employee_rssb_total": rssb.normalize().to_string(),
            "paye_amount": breakdown.paye_amount.normalize().to_string(),
            "cbhi_rate": config.cbhi_rate.normalize().to_string()
        }),
        output: serde_json::json!({
            "cbhi_base": base.normalize().to_string(),
            "cbhi_amount": breakdown.cbhi_amount.normalize().to_string()
        }),
        reasoning: format!(
            "({} - {} - {}) x {} = {}",
            breakdown.gross_salary.normalize(),
            rssb.normalize(),
            breakdown.paye_amount.normalize(),
            config.cbhi_rate.normalize(),
            breakdown.cbhi_amount.normalize()
        ),
    }
}

fn net_pay_step(step_number: u32, breakdown: &PayrollBreakdown) -> AuditStep {
    AuditStep {
        step_number,
        rule_id: "net_pay".to_string(),
        rule_name: "Net Pay".to_string(),
        input: serde_json::json!({
            "gross_salary": breakdown.gross_salary.normalize().to_string(),
            "total_employee_deductions": breakdown.total_employee_deductions.normalize().to_string()
        }),
        output: serde_json::json!({
            "net_pay": breakdown.net_pay.normalize().to_string(),
            "total_employer_cost": breakdown.total_employer_cost.normalize().to_string()
        }),
        reasoning: format!(
            "{} - {} = {}",
            breakdown.gross_salary.normalize(),
            breakdown.total_employee_deductions.normalize(),
            breakdown.net_pay.normalize()
        ),
    }
}

fn audit_warnings(breakdown: &PayrollBreakdown) -> Vec<AuditWarning> {
    let mut warnings = Vec::new();

    if breakdown.gross_salary.is_zero() {
        warnings.push(AuditWarning {
            code: "ZERO_GROSS_SALARY".to_string(),
            message: "Gross salary is zero; no deductions were computed".to_string(),
            severity: "low".to_string(),
        });
    }

    if !breakdown.gross_salary.is_zero()
        && breakdown.total_employee_deductions > breakdown.gross_salary * HIGH_DEDUCTION_RATIO
    {
        warnings.push(AuditWarning {
            code: "HIGH_DEDUCTION_RATIO".to_string(),
            message: format!(
                "Employee deductions {} exceed {}% of gross salary {}",
                breakdown.total_employee_deductions.normalize(),
                (HIGH_DEDUCTION_RATIO * Decimal::ONE_HUNDRED).normalize(),
                breakdown.gross_salary.normalize()
            ),
            severity: "medium".to_string(),
        });
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn period() -> PayPeriod {
        PayPeriod {
            start_date: NaiveDate::from_ymd_opt(2025, 8, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 8, 31).unwrap(),
        }
    }

    fn input(gross: &str, basic: &str) -> PayrollInput {
        PayrollInput {
            employee_id: "emp_001".to_string(),
            gross_salary: dec(gross),
            basic_salary: dec(basic),
        }
    }

    fn scenario_payslip() -> PayslipResult {
        calculate_payslip(
            &input("150000", "100000"),
            &TaxRateConfig::rwanda_defaults(),
            &period(),
        )
        .unwrap()
    }

    #[test]
    fn test_payslip_metadata() {
        let payslip = scenario_payslip();

        assert_eq!(payslip.employee_id, "emp_001");
        assert_eq!(payslip.engine_version, ENGINE_VERSION);
        assert_eq!(payslip.pay_period, period());
        assert_eq!(payslip.breakdown.net_pay, dec("118417.25"));
    }

    #[test]
    fn test_audit_steps_in_rule_order() {
        let payslip = scenario_payslip();
        let rule_ids: Vec<&str> = payslip
            .audit_trace
            .steps
            .iter()
            .map(|s| s.rule_id.as_str())
            .collect();

        assert_eq!(
            rule_ids,
            vec!["paye", "pension", "maternity", "rama", "cbhi", "net_pay"]
        );
        for (index, step) in payslip.audit_trace.steps.iter().enumerate() {
            assert_eq!(step.step_number, index as u32 + 1);
        }
    }

    #[test]
    fn test_paye_step_explains_band_slices() {
        let payslip = scenario_payslip();
        let step = &payslip.audit_trace.steps[0];

        assert_eq!(step.output["paye_amount"].as_str().unwrap(), "14000");
        assert_eq!(step.output["slices"].as_array().unwrap().len(), 4);
        assert_eq!(step.output["slices"][1]["taxable"].as_str().unwrap(), "40000");
        assert_eq!(step.reasoning, "0 x 60000 + 0.1 x 40000 + 0.2 x 50000 = 14000");
    }

    #[test]
    fn test_rama_step_uses_basic_salary() {
        let payslip = scenario_payslip();
        let step = &payslip.audit_trace.steps[3];

        assert_eq!(step.input["basic_salary"].as_str().unwrap(), "100000");
        assert_eq!(step.output["employee"].as_str().unwrap(), "7500");
        assert!(step.reasoning.contains("100000 x 0.075 = 7500"));
    }

    #[test]
    fn test_cbhi_step_shows_base() {
        let payslip = scenario_payslip();
        let step = &payslip.audit_trace.steps[4];

        assert_eq!(step.output["cbhi_base"].as_str().unwrap(), "126550");
        assert_eq!(step.reasoning, "(150000 - 9450 - 14000) x 0.005 = 632.75");
    }

    #[test]
    fn test_net_pay_step() {
        let payslip = scenario_payslip();
        let step = &payslip.audit_trace.steps[5];

        assert_eq!(step.reasoning, "150000 - 31582.75 = 118417.25");
    }

    #[test]
    fn test_no_warnings_for_ordinary_salary() {
        assert!(scenario_payslip().audit_trace.warnings.is_empty());
    }

    #[test]
    fn test_zero_salary_warns() {
        let payslip =
            calculate_payslip(&input("0", "0"), &TaxRateConfig::rwanda_defaults(), &period())
                .unwrap();

        assert_eq!(payslip.audit_trace.warnings.len(), 1);
        assert_eq!(payslip.audit_trace.warnings[0].code, "ZERO_GROSS_SALARY");
        assert_eq!(
            payslip.audit_trace.steps[0].reasoning,
            "No taxable income - PAYE is 0"
        );
    }

    #[test]
    fn test_high_deduction_ratio_warns() {
        let mut config = TaxRateConfig::rwanda_defaults();
        config.pension.employee = dec("0.80");

        // PAYE 54000, RSSB 240900, RAMA 0 (basic 0), CBHI 5100 x 0.005
        let payslip = calculate_payslip(&input("300000", "0"), &config, &period()).unwrap();

        assert_eq!(payslip.breakdown.cbhi_amount, dec("25.50"));
        assert_eq!(payslip.breakdown.net_pay, dec("5074.50"));

        let warning = &payslip.audit_trace.warnings[0];
        assert_eq!(warning.code, "HIGH_DEDUCTION_RATIO");
        assert_eq!(warning.severity, "medium");
        assert!(warning.message.contains("50%"));
    }

    #[test]
    fn test_reversed_period_rejected() {
        let reversed = PayPeriod {
            start_date: period().end_date,
            end_date: period().start_date,
        };

        let result = calculate_payslip(
            &input("150000", "100000"),
            &TaxRateConfig::rwanda_defaults(),
            &reversed,
        );
        assert!(matches!(result, Err(EngineError::InvalidPayPeriod { .. })));
    }

    #[test]
    fn test_each_payslip_gets_a_fresh_id() {
        let first = scenario_payslip();
        let second = scenario_payslip();

        assert_ne!(first.calculation_id, second.calculation_id);
        assert_eq!(first.breakdown, second.breakdown);
    }
}
