//! Dollar formatting with decimal precision.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts stay `rust_decimal::Decimal` until they are displayed.

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A dollar amount rendered as `$1,234.56`.
///
/// Rounding to cents happens only in `Display`; the wrapped amount is never
/// modified. Width and alignment flags are honored, so `{:>16}` right-aligns
/// the whole string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dollars(pub Decimal);

impl Dollars {
    /// Returns the unrounded amount.
    #[must_use]
    pub const fn amount(self) -> Decimal {
        self.0
    }
}

impl From<Decimal> for Dollars {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl fmt::Display for Dollars {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cents = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let sign = if cents.is_sign_negative() && !cents.is_zero() {
            "-"
        } else {
            ""
        };

        let digits = format!("{:.2}", cents.abs());
        let (whole, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

        f.pad(&format!("${sign}{}.{fraction}", group_thousands(whole)))
    }
}

fn group_thousands(whole: &str) -> String {
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
