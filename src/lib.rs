//! Payroll Tax Engine for Rwandan statutory deductions
//!
//! This crate computes PAYE income tax, RSSB pension and maternity
//! contributions, RAMA medical contributions and CBHI for an employee's pay
//! period, using validated per-company rate tables, and aggregates whole
//! payroll runs.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
