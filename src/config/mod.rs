//! Configuration loading and validation for the payroll tax engine.
//!
//! This module provides functionality to load statutory rate tables from
//! YAML files, including jurisdiction metadata, effective-dated default
//! tables and company-specific overrides. Every table is validated when it
//! is loaded, so calculations only ever see well-formed rates.
//!
//! # Example
//!
//! ```no_run
//! use payroll_tax_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/rwanda").unwrap();
//! println!("Loaded jurisdiction: {}", config.jurisdiction().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    CompanyTaxSettings, ContributionRates, JurisdictionMetadata, PayeBands, RateTable,
    TaxRateConfig, TaxSettings,
};
