//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading tax rate
//! configurations from YAML files.

use chrono::NaiveDate;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{EngineError, EngineResult};

use super::types::{
    CompanyTaxSettings, JurisdictionMetadata, RateTable, TaxRateConfig, TaxSettings,
};

/// Loads and provides access to tax settings.
///
/// The `ConfigLoader` reads YAML configuration files from a directory,
/// validates every rate table it finds, and resolves the table that applies
/// to a company on a given date.
///
/// # Directory Structure
///
/// ```text
/// config/rwanda/
/// ├── jurisdiction.yaml     # Jurisdiction metadata
/// ├── rates/
/// │   └── 2025-01-01.yaml   # Default rates effective from this date
/// └── companies/            # Optional
///     └── acme.yaml         # Company-specific rate tables
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_tax_engine::config::ConfigLoader;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config/rwanda").unwrap();
///
/// let date = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
/// let rates = loader.tax_config(Some("acme"), date).unwrap();
/// println!("CBHI rate: {}", rates.cbhi_rate);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    settings: TaxSettings,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - `jurisdiction.yaml` or the `rates` directory is missing
    /// - Any file contains invalid YAML
    /// - Any rate table violates a configuration invariant
    ///
    /// # Example
    ///
    /// ```no_run
    /// use payroll_tax_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/rwanda")?;
    /// # Ok::<(), payroll_tax_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let jurisdiction =
            Self::load_yaml::<JurisdictionMetadata>(&path.join("jurisdiction.yaml"))?;

        let rates_dir = path.join("rates");
        let mut default_tables = Vec::new();
        for file in Self::yaml_files(&rates_dir, true)? {
            let table = Self::load_yaml::<RateTable>(&file)?;
            Self::validate_table(&table.rates, &file)?;
            default_tables.push(table);
        }

        if default_tables.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no rate files found)", rates_dir.display()),
            });
        }

        let mut companies = Vec::new();
        let mut company_files: HashMap<String, PathBuf> = HashMap::new();
        for file in Self::yaml_files(&path.join("companies"), false)? {
            let company = Self::load_yaml::<CompanyTaxSettings>(&file)?;
            if let Some(first) = company_files.get(&company.company_id) {
                return Err(EngineError::InvalidConfiguration {
                    field: "company_id".to_string(),
                    message: format!(
                        "company '{}' is defined in both {} and {}",
                        company.company_id,
                        first.display(),
                        file.display()
                    ),
                });
            }
            for table in &company.rate_tables {
                Self::validate_table(&table.rates, &file)?;
            }
            company_files.insert(company.company_id.clone(), file);
            companies.push(company);
        }

        info!(
            jurisdiction = %jurisdiction.code,
            default_tables = default_tables.len(),
            companies = companies.len(),
            "Loaded tax configuration"
        );

        Ok(Self {
            settings: TaxSettings::new(jurisdiction, default_tables, companies),
        })
    }

    /// Wraps already-built settings, e.g. ones assembled from a database.
    pub fn from_settings(settings: TaxSettings) -> Self {
        Self { settings }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Lists the `.yaml` files in a directory in name order.
    fn yaml_files(dir: &Path, required: bool) -> EngineResult<Vec<PathBuf>> {
        let dir_str = dir.display().to_string();

        if !dir.exists() {
            return if required {
                Err(EngineError::ConfigNotFound { path: dir_str })
            } else {
                Ok(Vec::new())
            };
        }

        let entries = fs::read_dir(dir).map_err(|_| EngineError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                files.push(path);
            }
        }
        files.sort();

        Ok(files)
    }

    fn validate_table(rates: &TaxRateConfig, file: &Path) -> EngineResult<()> {
        rates.validate().map_err(|err| match err {
            EngineError::InvalidConfiguration { field, message } => {
                EngineError::InvalidConfiguration {
                    field,
                    message: format!("{} (in {})", message, file.display()),
                }
            }
            other => other,
        })
    }

    /// Returns the underlying tax settings.
    pub fn settings(&self) -> &TaxSettings {
        &self.settings
    }

    /// Returns the jurisdiction metadata.
    pub fn jurisdiction(&self) -> &JurisdictionMetadata {
        self.settings.jurisdiction()
    }

    /// Gets a company's settings by its id.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use payroll_tax_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/rwanda")?;
    /// let company = loader.company("acme")?;
    /// println!("Company: {}", company.name);
    /// # Ok::<(), payroll_tax_engine::error::EngineError>(())
    /// ```
    pub fn company(&self, company_id: &str) -> EngineResult<&CompanyTaxSettings> {
        self.settings
            .companies()
            .get(company_id)
            .ok_or_else(|| EngineError::CompanyNotFound {
                company_id: company_id.to_string(),
            })
    }

    /// Gets the rates that apply to a company on a given date.
    ///
    /// The most recent company table effective on or before `date` is used;
    /// companies without one fall back to the jurisdiction default.
    pub fn tax_config(
        &self,
        company_id: Option<&str>,
        date: NaiveDate,
    ) -> EngineResult<&TaxRateConfig> {
        self.settings
            .rates_for(company_id, date)
            .map(|table| &table.rates)
    }
}
