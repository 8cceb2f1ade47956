//! Shared types, errors, and configuration for Grantcalc.
//!
//! This crate provides the plumbing used around the budget core:
//! - Dollar formatting with decimal precision
//! - `key = value` parameter files
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod params;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use params::{ParameterError, ParameterSet};
pub use types::Dollars;
