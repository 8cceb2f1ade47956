//! Budget error types.

use grantcalc_shared::AppError;
use rust_decimal::Decimal;
use thiserror::Error;

/// Budget validation errors.
///
/// No partial result is ever returned alongside an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BudgetError {
    /// Number of years must be at least 1.
    #[error("Number of years must be at least 1, got {0}")]
    InvalidYears(u32),

    /// A rate is negative.
    #[error("Rate {name} cannot be negative: {value}")]
    NegativeRate {
        /// Rate name.
        name: &'static str,
        /// Rejected value.
        value: Decimal,
    },

    /// A monetary amount is negative.
    #[error("Amount {name} cannot be negative: {value}")]
    NegativeAmount {
        /// Input name.
        name: &'static str,
        /// Rejected value.
        value: Decimal,
    },

    /// A subaward is negative.
    #[error("Subaward for year {year} cannot be negative: {value}")]
    NegativeSubaward {
        /// 1-based year.
        year: usize,
        /// Rejected value.
        value: Decimal,
    },

    /// More subaward entries than budget years.
    #[error("Subaward schedule has {got} entries but the budget covers {years} years")]
    SubawardScheduleTooLong {
        /// Number of budget years.
        years: u32,
        /// Number of subaward entries.
        got: usize,
    },

    /// An amount grew past the range of `Decimal`.
    #[error("Budget amounts overflow in year {year}; reduce the years, amounts, or inflation rate")]
    AmountOverflow {
        /// 1-based year in which the overflow occurred.
        year: u32,
    },
}

impl From<BudgetError> for AppError {
    fn from(err: BudgetError) -> Self {
        Self::Validation(err.to_string())
    }
}
