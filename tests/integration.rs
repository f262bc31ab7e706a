//! Integration tests for the payroll tax engine.
//!
//! This test suite exercises the public API end to end against the shipped
//! Rwanda configuration:
//! - Configuration loading and company rate resolution
//! - The statutory default scenario
//! - PAYE band boundaries
//! - Payslip audit traces
//! - Payroll runs with flagged records
//! - Error cases

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

use payroll_tax_engine::calculation::{
    calculate_payslip, compute_breakdown, compute_paye, run_company_payroll, run_payroll,
};
use payroll_tax_engine::config::{ConfigLoader, TaxRateConfig};
use payroll_tax_engine::error::EngineError;
use payroll_tax_engine::models::{PayPeriod, PayrollInput};

// =============================================================================
// Test Helpers
// =============================================================================

fn load_config() -> ConfigLoader {
    ConfigLoader::load("./config/rwanda").expect("Failed to load config")
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn august_2025() -> PayPeriod {
    PayPeriod {
        start_date: NaiveDate::from_ymd_opt(2025, 8, 1).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2025, 8, 31).unwrap(),
    }
}

fn input(employee_id: &str, gross: &str, basic: &str) -> PayrollInput {
    PayrollInput {
        employee_id: employee_id.to_string(),
        gross_salary: dec(gross),
        basic_salary: dec(basic),
    }
}

fn default_rates(loader: &ConfigLoader) -> &TaxRateConfig {
    loader
        .tax_config(None, august_2025().start_date)
        .expect("default rates")
}

// =============================================================================
// SECTION 1: Statutory default scenario
// =============================================================================

#[test]
fn test_default_scenario_from_loaded_config() {
    let loader = load_config();
    let breakdown =
        compute_breakdown(&input("emp_001", "150000", "100000"), default_rates(&loader)).unwrap();

    assert_eq!(breakdown.paye_amount, dec("14000"));
    assert_eq!(breakdown.pension_employee, dec("9000"));
    assert_eq!(breakdown.pension_employer, dec("12000"));
    assert_eq!(breakdown.maternity_employee, dec("450"));
    assert_eq!(breakdown.maternity_employer, dec("450"));
    assert_eq!(breakdown.rama_employee, dec("7500"));
    assert_eq!(breakdown.rama_employer, dec("7500"));
    assert_eq!(breakdown.cbhi_amount, dec("632.75"));
    assert_eq!(breakdown.total_employee_deductions, dec("31582.75"));
    assert_eq!(breakdown.net_pay, dec("118417.25"));
}

#[test]
fn test_breakdown_is_idempotent() {
    let loader = load_config();
    let rates = default_rates(&loader);
    let input = input("emp_001", "987654.32", "500000");

    let first = compute_breakdown(&input, rates).unwrap();
    let second = compute_breakdown(&input, rates).unwrap();

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_net_pay_identity_holds_for_typical_salaries() {
    let loader = load_config();
    let rates = default_rates(&loader);

    for (gross, basic) in [
        ("30000", "30000"),
        ("60000", "45000"),
        ("100000", "70000"),
        ("200000", "150000"),
        ("1250000.75", "900000"),
    ] {
        let b = compute_breakdown(&input("emp", gross, basic), rates).unwrap();
        assert_eq!(b.net_pay, b.gross_salary - b.total_employee_deductions);
        assert_eq!(
            b.total_employee_deductions,
            b.paye_amount + b.pension_employee + b.maternity_employee + b.rama_employee + b.cbhi_amount
        );
        assert!(b.net_pay >= Decimal::ZERO);
    }
}

// =============================================================================
// SECTION 2: PAYE band boundaries
// =============================================================================

#[test]
fn test_paye_at_each_band_limit() {
    let loader = load_config();
    let bands = &default_rates(&loader).paye;

    assert_eq!(compute_paye(dec("60000"), bands), Decimal::ZERO);
    assert_eq!(compute_paye(dec("100000"), bands), dec("4000"));
    assert_eq!(compute_paye(dec("200000"), bands), dec("24000"));
}

#[test]
fn test_paye_just_above_each_band_limit() {
    let loader = load_config();
    let bands = &default_rates(&loader).paye;

    assert_eq!(compute_paye(dec("60010"), bands), dec("1"));
    assert_eq!(compute_paye(dec("100010"), bands), dec("4002"));
    assert_eq!(compute_paye(dec("200010"), bands), dec("24003"));
}

// =============================================================================
// SECTION 3: Company rate resolution
// =============================================================================

#[test]
fn test_company_override_changes_rama_only() {
    let loader = load_config();
    let date = august_2025().start_date;
    let company_rates = loader.tax_config(Some("kigali_health"), date).unwrap();

    let default = compute_breakdown(&input("emp_001", "150000", "100000"), default_rates(&loader))
        .unwrap();
    let company =
        compute_breakdown(&input("emp_001", "150000", "100000"), company_rates).unwrap();

    assert_eq!(company.rama_employer, dec("10000"));
    assert_eq!(company.rama_employee, dec("5000"));
    assert_eq!(company.paye_amount, default.paye_amount);
    assert_eq!(company.cbhi_amount, default.cbhi_amount);
    assert_eq!(company.net_pay, dec("120917.25"));
}

#[test]
fn test_company_override_not_yet_effective_uses_default() {
    let loader = load_config();
    let june = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();

    let rates = loader.tax_config(Some("kigali_health"), june).unwrap();
    assert_eq!(rates, &TaxRateConfig::rwanda_defaults());
}

// =============================================================================
// SECTION 4: Payslips
// =============================================================================

#[test]
fn test_payslip_serializes_with_audit_trace() {
    let loader = load_config();
    let payslip = calculate_payslip(
        &input("emp_001", "150000", "100000"),
        default_rates(&loader),
        &august_2025(),
    )
    .unwrap();

    let json = serde_json::to_value(&payslip).unwrap();

    assert_eq!(json["employee_id"], "emp_001");
    assert_eq!(json["pay_period"]["start_date"], "2025-08-01");
    assert_eq!(json["breakdown"]["net_pay"], "118417.25");
    assert_eq!(json["audit_trace"]["steps"].as_array().unwrap().len(), 6);
    assert_eq!(json["audit_trace"]["steps"][4]["rule_id"], "cbhi");
}

// =============================================================================
// SECTION 5: Payroll runs
// =============================================================================

#[test]
fn test_company_payroll_run() {
    let loader = load_config();
    let inputs = vec![
        input("emp_001", "150000", "100000"),
        input("emp_002", "450000", "300000"),
        input("emp_003", "55000", "55000"),
    ];

    let run = run_company_payroll(&loader, Some("kigali_health"), &inputs, &august_2025()).unwrap();

    assert_eq!(run.company_id.as_deref(), Some("kigali_health"));
    assert_eq!(run.totals.processed_count, 3);
    assert_eq!(run.totals.flagged_count, 0);

    let net_sum: Decimal = run.payslips.iter().map(|p| p.breakdown.net_pay).sum();
    assert_eq!(run.totals.net_pay, net_sum);

    let gross_sum: Decimal = inputs.iter().map(|i| i.gross_salary).sum();
    assert_eq!(run.totals.gross_salary, gross_sum);

    let employer_sum: Decimal = run
        .payslips
        .iter()
        .map(|p| p.breakdown.total_employer_contributions)
        .sum();
    assert_eq!(run.totals.total_employer_contributions, employer_sum);
    assert_eq!(run.totals.total_employer_cost, gross_sum + employer_sum);
}

#[test]
fn test_run_flags_bad_records_and_continues() {
    let loader = load_config();
    let inputs = vec![
        input("emp_001", "150000", "100000"),
        input("emp_neg", "-10", "0"),
        input("emp_basic", "100", "200"),
        input("emp_004", "80000", "60000"),
    ];

    let run = run_payroll(None, &inputs, default_rates(&loader), &august_2025()).unwrap();

    let ok: Vec<&str> = run.payslips.iter().map(|p| p.employee_id.as_str()).collect();
    let flagged: Vec<&str> = run.flagged.iter().map(|f| f.employee_id.as_str()).collect();

    assert_eq!(ok, vec!["emp_001", "emp_004"]);
    assert_eq!(flagged, vec!["emp_neg", "emp_basic"]);
    assert!(run.flagged.iter().all(|f| f.code == "INVALID_PAYROLL_INPUT"));
}

// =============================================================================
// SECTION 6: Error cases
// =============================================================================

#[test]
fn test_run_before_any_rates_fails() {
    let loader = load_config();
    let period = PayPeriod {
        start_date: NaiveDate::from_ymd_opt(2019, 1, 1).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2019, 1, 31).unwrap(),
    };

    let result = run_company_payroll(&loader, None, &[input("emp_001", "1000", "1000")], &period);

    match result {
        Err(EngineError::RatesNotFound { scope, .. }) => assert_eq!(scope, "default"),
        other => panic!("Expected RatesNotFound, got {:?}", other),
    }
}

#[test]
fn test_hand_built_invalid_config_rejected_before_use() {
    let defaults = TaxRateConfig::rwanda_defaults();
    let mut paye = defaults.paye.clone();
    paye.band1_limit = dec("300000");

    let result = TaxRateConfig::new(
        paye,
        defaults.pension,
        defaults.maternity,
        defaults.rama,
        defaults.cbhi_rate,
    );

    match result {
        Err(EngineError::InvalidConfiguration { field, .. }) => {
            assert_eq!(field, "paye.band2_limit")
        }
        other => panic!("Expected InvalidConfiguration, got {:?}", other),
    }
}
