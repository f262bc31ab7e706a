//! Configuration types for payroll tax calculation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files, together with the
//! validation rules every rate table must satisfy before it is used.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{EngineError, EngineResult};

/// Metadata about the tax jurisdiction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JurisdictionMetadata {
    /// Short jurisdiction code (e.g., "RW").
    pub code: String,
    /// The human-readable name of the jurisdiction.
    pub name: String,
    /// ISO currency code amounts are expressed in (e.g., "RWF").
    pub currency: String,
    /// URL to the official rate publication.
    pub source_url: String,
}

/// Progressive PAYE bands.
///
/// `rate1` applies to income up to and including `band1_limit`, `rate2` to
/// the slice above `band1_limit` up to and including `band2_limit`, `rate3`
/// to the slice up to and including `band3_limit`, and `rate4` to all income
/// above `band3_limit`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayeBands {
    /// Upper bound of the first band.
    pub band1_limit: Decimal,
    /// Upper bound of the second band.
    pub band2_limit: Decimal,
    /// Upper bound of the third band.
    pub band3_limit: Decimal,
    /// Marginal rate for the first band.
    pub rate1: Decimal,
    /// Marginal rate for the second band.
    pub rate2: Decimal,
    /// Marginal rate for the third band.
    pub rate3: Decimal,
    /// Marginal rate for income above the third band.
    pub rate4: Decimal,
}

impl PayeBands {
    /// Returns the bands as `(lower, upper, rate)` triples, lowest first.
    ///
    /// The top band has no upper bound.
    pub fn segments(&self) -> [(Decimal, Option<Decimal>, Decimal); 4] {
        [
            (Decimal::ZERO, Some(self.band1_limit), self.rate1),
            (self.band1_limit, Some(self.band2_limit), self.rate2),
            (self.band2_limit, Some(self.band3_limit), self.rate3),
            (self.band3_limit, None, self.rate4),
        ]
    }
}

/// A pair of contribution rates shared between employer and employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionRates {
    /// Fraction of the base paid by the employer.
    pub employer: Decimal,
    /// Fraction of the base withheld from the employee.
    pub employee: Decimal,
}

/// A complete statutory rate configuration for one company (or the
/// jurisdiction default).
///
/// All rates are decimal fractions (0.08 = 8%). Use [`TaxRateConfig::new`]
/// or [`TaxRateConfig::validate`] before handing a hand-built value to the
/// calculator; tables read by the loader are validated on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRateConfig {
    /// PAYE bands and marginal rates.
    pub paye: PayeBands,
    /// RSSB pension contribution, levied on gross salary.
    pub pension: ContributionRates,
    /// RSSB maternity contribution, levied on gross salary.
    pub maternity: ContributionRates,
    /// RAMA medical contribution, levied on basic salary.
    pub rama: ContributionRates,
    /// CBHI rate, levied on gross less employee RSSB and PAYE.
    pub cbhi_rate: Decimal,
}

impl TaxRateConfig {
    /// Builds a configuration and validates it.
    pub fn new(
        paye: PayeBands,
        pension: ContributionRates,
        maternity: ContributionRates,
        rama: ContributionRates,
        cbhi_rate: Decimal,
    ) -> EngineResult<Self> {
        let config = Self {
            paye,
            pension,
            maternity,
            rama,
            cbhi_rate,
        };
        config.validate()?;
        Ok(config)
    }

    /// The statutory Rwanda rate table.
    ///
    /// PAYE: 0% to 60,000, 10% to 100,000, 20% to 200,000, 30% above.
    /// Pension 8% employer / 6% employee, maternity 0.3% each, RAMA 7.5%
    /// each on basic salary, CBHI 0.5%.
    ///
    /// ```
    /// use payroll_tax_engine::config::TaxRateConfig;
    ///
    /// let config = TaxRateConfig::rwanda_defaults();
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn rwanda_defaults() -> Self {
        Self {
            paye: PayeBands {
                band1_limit: Decimal::new(60_000, 0),
                band2_limit: Decimal::new(100_000, 0),
                band3_limit: Decimal::new(200_000, 0),
                rate1: Decimal::ZERO,
                rate2: Decimal::new(10, 2),
                rate3: Decimal::new(20, 2),
                rate4: Decimal::new(30, 2),
            },
            pension: ContributionRates {
                employer: Decimal::new(8, 2),
                employee: Decimal::new(6, 2),
            },
            maternity: ContributionRates {
                employer: Decimal::new(3, 3),
                employee: Decimal::new(3, 3),
            },
            rama: ContributionRates {
                employer: Decimal::new(75, 3),
                employee: Decimal::new(75, 3),
            },
            cbhi_rate: Decimal::new(5, 3),
        }
    }

    /// Checks every invariant of the table.
    ///
    /// Band limits must be non-negative and strictly increasing; every rate
    /// must lie in `[0, 1]`. The first violation found is returned.
    pub fn validate(&self) -> EngineResult<()> {
        let paye = &self.paye;

        for (field, limit) in [
            ("paye.band1_limit", paye.band1_limit),
            ("paye.band2_limit", paye.band2_limit),
            ("paye.band3_limit", paye.band3_limit),
        ] {
            if limit < Decimal::ZERO {
                return Err(invalid(field, format!("must not be negative, got {}", limit)));
            }
        }

        if paye.band2_limit <= paye.band1_limit {
            return Err(invalid(
                "paye.band2_limit",
                format!(
                    "must be greater than band1_limit ({} <= {})",
                    paye.band2_limit, paye.band1_limit
                ),
            ));
        }
        if paye.band3_limit <= paye.band2_limit {
            return Err(invalid(
                "paye.band3_limit",
                format!(
                    "must be greater than band2_limit ({} <= {})",
                    paye.band3_limit, paye.band2_limit
                ),
            ));
        }

        let rates = [
            ("paye.rate1", paye.rate1),
            ("paye.rate2", paye.rate2),
            ("paye.rate3", paye.rate3),
            ("paye.rate4", paye.rate4),
            ("pension.employer", self.pension.employer),
            ("pension.employee", self.pension.employee),
            ("maternity.employer", self.maternity.employer),
            ("maternity.employee", self.maternity.employee),
            ("rama.employer", self.rama.employer),
            ("rama.employee", self.rama.employee),
            ("cbhi_rate", self.cbhi_rate),
        ];
        for (field, rate) in rates {
            if rate < Decimal::ZERO || rate > Decimal::ONE {
                return Err(invalid(
                    field,
                    format!("rate must be between 0 and 1, got {}", rate),
                ));
            }
        }

        Ok(())
    }
}

fn invalid(field: &str, message: String) -> EngineError {
    EngineError::InvalidConfiguration {
        field: field.to_string(),
        message,
    }
}

/// A rate table effective from a given date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateTable {
    /// The first date these rates apply to.
    pub effective_date: NaiveDate,
    /// The owning company, or `None` for a jurisdiction default.
    ///
    /// Filled in from the enclosing [`CompanyTaxSettings`] when settings are
    /// assembled, so company files need not repeat it per table.
    #[serde(default)]
    pub company_id: Option<String>,
    /// The rates themselves.
    pub rates: TaxRateConfig,
}

/// Company-specific tax settings from `companies/<id>.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyTaxSettings {
    /// The company identifier.
    pub company_id: String,
    /// The company's display name.
    pub name: String,
    /// Rate tables overriding the jurisdiction default.
    pub rate_tables: Vec<RateTable>,
}

/// The complete tax settings loaded from a configuration directory.
///
/// Rate tables are kept sorted oldest first so the table effective on a
/// date is the last one starting on or before it.
#[derive(Debug, Clone)]
pub struct TaxSettings {
    /// Jurisdiction metadata.
    jurisdiction: JurisdictionMetadata,
    /// Jurisdiction-wide default tables (sorted oldest first).
    default_tables: Vec<RateTable>,
    /// Company overrides keyed by company id (tables sorted oldest first).
    companies: HashMap<String, CompanyTaxSettings>,
}

impl TaxSettings {
    /// Creates a new TaxSettings from its component parts.
    pub fn new(
        jurisdiction: JurisdictionMetadata,
        default_tables: Vec<RateTable>,
        companies: Vec<CompanyTaxSettings>,
    ) -> Self {
        let mut default_tables = default_tables;
        default_tables.sort_by(|a, b| a.effective_date.cmp(&b.effective_date));
        for table in &mut default_tables {
            table.company_id = None;
        }

        let companies = companies
            .into_iter()
            .map(|mut company| {
                company
                    .rate_tables
                    .sort_by(|a, b| a.effective_date.cmp(&b.effective_date));
                for table in &mut company.rate_tables {
                    table.company_id = Some(company.company_id.clone());
                }
                (company.company_id.clone(), company)
            })
            .collect();

        Self {
            jurisdiction,
            default_tables,
            companies,
        }
    }

    /// Returns the jurisdiction metadata.
    pub fn jurisdiction(&self) -> &JurisdictionMetadata {
        &self.jurisdiction
    }

    /// Returns the default rate tables, oldest first.
    pub fn default_tables(&self) -> &[RateTable] {
        &self.default_tables
    }

    /// Returns all company overrides.
    pub fn companies(&self) -> &HashMap<String, CompanyTaxSettings> {
        &self.companies
    }

    /// Resolves the rate table for a company on a date.
    ///
    /// A company's own table effective on or before `date` wins; otherwise
    /// the jurisdiction default effective on that date is used.
    pub fn rates_for(&self, company_id: Option<&str>, date: NaiveDate) -> EngineResult<&RateTable> {
        if let Some(table) = company_id
            .and_then(|id| self.companies.get(id))
            .and_then(|company| effective_on(&company.rate_tables, date))
        {
            return Ok(table);
        }

        effective_on(&self.default_tables, date).ok_or_else(|| EngineError::RatesNotFound {
            scope: company_id.unwrap_or("default").to_string(),
            date,
        })
    }
}

fn effective_on(tables: &[RateTable], date: NaiveDate) -> Option<&RateTable> {
    tables.iter().rfind(|t| t.effective_date <= date)
}
