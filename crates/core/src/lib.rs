//! Core budget calculation for Grantcalc.
//!
//! This crate contains the pure calculation with ZERO file, terminal, or
//! network dependencies. Collaborators hand it a [`budget::BudgetInput`] and
//! render the [`budget::BudgetResult`] it returns.
//!
//! # Modules
//!
//! - `budget` - Multi-year grant budgets with fringe, inflation, and F&A rules

pub mod budget;

pub use budget::{BudgetCalculator, BudgetError, BudgetInput, BudgetRates, BudgetResult};
