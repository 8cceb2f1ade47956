//! Multi-year research grant budgets.

pub mod calculator;
pub mod error;
pub mod types;


pub use calculator::{
    ACADEMIC_YEAR_MONTHS, BudgetCalculator, GRAD_SUMMER_FRACTION, SUBAWARD_INDIRECT_CAP, calculate,
};
pub use error::BudgetError;
pub use types::{BudgetInput, BudgetRates, BudgetResult, LineItems, YearBreakdown};
