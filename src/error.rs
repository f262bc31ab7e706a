//! Error types for the payroll tax engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the engine can report: configuration problems found at
//! load time, rejected payroll inputs, and computation anomalies.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the payroll tax engine.
///
/// # Example
///
/// ```
/// use payroll_tax_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/jurisdiction.yaml".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Configuration file not found: /missing/jurisdiction.yaml"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A tax rate table violated one of its invariants.
    ///
    /// Raised before any calculation runs; a company's payroll cannot
    /// proceed until the offending table is corrected.
    #[error("Invalid tax configuration '{field}': {message}")]
    InvalidConfiguration {
        /// The offending field (e.g., "paye.band2_limit").
        field: String,
        /// A description of the violated invariant.
        message: String,
    },

    /// No rate table exists for the requested company.
    #[error("Company not found: {company_id}")]
    CompanyNotFound {
        /// The company identifier that was not found.
        company_id: String,
    },

    /// No rate table is effective on the requested date.
    #[error("No tax rates effective for '{scope}' on {date}")]
    RatesNotFound {
        /// The company identifier, or "default" for the global table.
        scope: String,
        /// The date for which rates were requested.
        date: NaiveDate,
    },

    /// A pay period ends before it starts.
    #[error("Invalid pay period: end date {end_date} is before start date {start_date}")]
    InvalidPayPeriod {
        /// The first day of the period.
        start_date: NaiveDate,
        /// The last day of the period.
        end_date: NaiveDate,
    },

    /// A payroll input record was rejected.
    #[error("Invalid payroll input for employee '{employee_id}', field '{field}': {message}")]
    InvalidPayrollInput {
        /// The employee the record belongs to.
        employee_id: String,
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A valid input produced figures that cannot be paid out.
    ///
    /// Raised when deductions exceed gross salary, which signals contribution
    /// rates that sum above 100% of their base, or when a record would push
    /// run totals out of range. Reported rather than clamped.
    #[error("Computation anomaly for employee '{employee_id}': {message} (net pay {net_pay})")]
    ComputationAnomaly {
        /// The employee whose calculation produced the anomaly.
        employee_id: String,
        /// The net pay that was computed.
        net_pay: Decimal,
        /// Details of the deductions that caused it.
        message: String,
    },
}

impl EngineError {
    /// Returns a stable machine-readable code for this error.
    ///
    /// Used when an error is recorded against a payroll record instead of
    /// being propagated.
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::ConfigNotFound { .. } => "CONFIG_NOT_FOUND",
            EngineError::ConfigParseError { .. } => "CONFIG_PARSE_ERROR",
            EngineError::InvalidConfiguration { .. } => "INVALID_CONFIGURATION",
            EngineError::CompanyNotFound { .. } => "COMPANY_NOT_FOUND",
            EngineError::RatesNotFound { .. } => "RATES_NOT_FOUND",
            EngineError::InvalidPayPeriod { .. } => "INVALID_PAY_PERIOD",
            EngineError::InvalidPayrollInput { .. } => "INVALID_PAYROLL_INPUT",
            EngineError::ComputationAnomaly { .. } => "COMPUTATION_ANOMALY",
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
