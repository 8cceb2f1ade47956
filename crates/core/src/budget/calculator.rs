//! Multi-year grant budget calculation.
//!
//! Per year, salaries, stipends, and fees are inflated from the previous
//! year, fringe is charged at the payroll-tax or full-time rate, and indirect
//! costs are charged on MTDC plus the first $25,000 of the subaward.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use super::error::BudgetError;
use super::types::{BudgetInput, BudgetResult, LineItems, YearBreakdown};

/// Share of a 12-month grad stipend paid as summer wages. Grad students are on
/// fellowship during the academic year, so only this share is subject to
/// payroll tax.
pub const GRAD_SUMMER_FRACTION: Decimal = dec!(0.25);

/// Yearly subaward amount that bears indirect costs (NSF policy).
pub const SUBAWARD_INDIRECT_CAP: Decimal = dec!(25000);

/// Months covered by a faculty base salary.
pub const ACADEMIC_YEAR_MONTHS: Decimal = dec!(9);

/// Nominal amounts for one budget year, before headcount multipliers.
#[derive(Debug, Clone, Copy)]
struct NominalAmounts {
    faculty_base_salary: Decimal,
    grad_stipend: Decimal,
    grad_tuition_fees: Decimal,
    grad_health_insurance: Decimal,
    undergrad_salary: Decimal,
    postdoc_salary: Decimal,
    postdoc_health: Decimal,
    travel: Decimal,
    publication_costs: Decimal,
}

impl NominalAmounts {
    const fn baseline(input: &BudgetInput) -> Self {
        Self {
            faculty_base_salary: input.faculty_base_salary_9mo,
            grad_stipend: input.grad_stipend_annual,
            grad_tuition_fees: input.grad_tuition_fees,
            grad_health_insurance: input.grad_health_insurance,
            undergrad_salary: input.undergrad_salary,
            postdoc_salary: input.postdoc_salary,
            postdoc_health: input.postdoc_health,
            travel: input.travel,
            publication_costs: input.publication_costs,
        }
    }

    /// Next year's amounts, compounding on this year's. `None` on overflow.
    fn inflated(self, factor: Decimal, other_costs_inflate: bool) -> Option<Self> {
        let (travel, publication_costs) = if other_costs_inflate {
            (
                self.travel.checked_mul(factor)?,
                self.publication_costs.checked_mul(factor)?,
            )
        } else {
            (self.travel, self.publication_costs)
        };

        Some(Self {
            faculty_base_salary: self.faculty_base_salary.checked_mul(factor)?,
            grad_stipend: self.grad_stipend.checked_mul(factor)?,
            grad_tuition_fees: self.grad_tuition_fees.checked_mul(factor)?,
            grad_health_insurance: self.grad_health_insurance.checked_mul(factor)?,
            undergrad_salary: self.undergrad_salary.checked_mul(factor)?,
            postdoc_salary: self.postdoc_salary.checked_mul(factor)?,
            postdoc_health: self.postdoc_health.checked_mul(factor)?,
            travel,
            publication_costs,
        })
    }
}

/// Stateless budget calculator.
pub struct BudgetCalculator;

impl BudgetCalculator {
    /// Calculate the year-by-year budget.
    ///
    /// Pure and deterministic: no I/O, and identical input always yields an
    /// identical result. Values are returned unrounded.
    ///
    /// # Errors
    ///
    /// Returns a `BudgetError` if the input fails validation, or
    /// `BudgetError::AmountOverflow` if compounding exceeds the `Decimal`
    /// range. No partial result is produced.
    pub fn calculate(input: &BudgetInput) -> Result<BudgetResult, BudgetError> {
        Self::validate(input)?;

        let factor = Decimal::ONE.checked_add(input.rates.inflation);
        let mut amounts = NominalAmounts::baseline(input);
        let mut yearly = Vec::with_capacity(usize::try_from(input.years).unwrap_or_default());
        let mut totals = LineItems::default();

        for year in 1..=input.years {
            let overflow = || BudgetError::AmountOverflow { year };

            if year > 1 {
                amounts = factor
                    .and_then(|factor| amounts.inflated(factor, input.other_costs_inflate))
                    .ok_or_else(overflow)?;
            }
            let items =
                Self::line_items(input, &amounts, input.subaward(year)).ok_or_else(overflow)?;
            totals = totals.checked_add(&items).ok_or_else(overflow)?;
            debug!(
                year,
                mtdc = %items.mtdc,
                indirect = %items.indirect,
                total_budget = %items.total_budget,
                "Calculated budget year"
            );

            yearly.push(YearBreakdown { year, items });
        }

        Ok(BudgetResult { yearly, totals })
    }

    /// Validate budget input.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::InvalidYears` if `years` is 0.
    /// Returns `BudgetError::NegativeRate` if any rate is negative.
    /// Returns `BudgetError::NegativeAmount` if any baseline amount is negative.
    /// Returns `BudgetError::SubawardScheduleTooLong` if there are more
    /// subawards than years.
    /// Returns `BudgetError::NegativeSubaward` if any subaward is negative.
    pub fn validate(input: &BudgetInput) -> Result<(), BudgetError> {
        if input.years < 1 {
            return Err(BudgetError::InvalidYears(input.years));
        }

        if let Some((name, value)) = input
            .rates
            .named()
            .into_iter()
            .find(|(_, rate)| *rate < Decimal::ZERO)
        {
            return Err(BudgetError::NegativeRate { name, value });
        }

        if let Some((name, value)) = input
            .named_amounts()
            .into_iter()
            .find(|(_, amount)| *amount < Decimal::ZERO)
        {
            return Err(BudgetError::NegativeAmount { name, value });
        }

        if usize::try_from(input.years).is_ok_and(|years| input.subawards.len() > years) {
            return Err(BudgetError::SubawardScheduleTooLong {
                years: input.years,
                got: input.subawards.len(),
            });
        }

        if let Some((idx, value)) = input
            .subawards
            .iter()
            .enumerate()
            .find(|(_, amount)| **amount < Decimal::ZERO)
        {
            return Err(BudgetError::NegativeSubaward {
                year: idx + 1,
                value: *value,
            });
        }

        Ok(())
    }

    /// One year's line items. `None` if any amount overflows.
    fn line_items(
        input: &BudgetInput,
        amounts: &NominalAmounts,
        subaward: Decimal,
    ) -> Option<LineItems> {
        let rates = &input.rates;
        let num_faculty = Decimal::from(input.num_faculty);
        let num_grads = Decimal::from(input.num_grad_students);

        let faculty_salary = num_faculty
            .checked_mul(amounts.faculty_base_salary)?
            .checked_div(ACADEMIC_YEAR_MONTHS)?
            .checked_mul(input.faculty_summer_months)?;
        let faculty_fringe = faculty_salary.checked_mul(rates.fringe)?;

        let grad_salary = amounts.grad_stipend.checked_mul(num_grads)?;
        let grad_fringe = GRAD_SUMMER_FRACTION
            .checked_mul(grad_salary)?
            .checked_mul(rates.fringe)?;
        let grad_tuition_health = amounts
            .grad_tuition_fees
            .checked_add(amounts.grad_health_insurance)?
            .checked_mul(num_grads)?;

        let postdoc_salary = amounts.postdoc_salary;
        let postdoc_fringe = postdoc_salary.checked_mul(rates.fulltime_fringe)?;
        let postdoc_health = amounts.postdoc_health;
        let total_postdoc = sum(&[postdoc_salary, postdoc_fringe, postdoc_health])?;

        let undergrad_salary = amounts.undergrad_salary;
        let undergrad_fringe = undergrad_salary.checked_mul(rates.fringe)?;

        // Payroll-tax fringe only; postdoc fringe is carried in total_postdoc.
        let total_fringe = sum(&[faculty_fringe, grad_fringe, undergrad_fringe])?;

        let tdc = sum(&[
            faculty_salary,
            grad_salary,
            undergrad_salary,
            total_fringe,
            total_postdoc,
            grad_tuition_health,
            amounts.travel,
            amounts.publication_costs,
            subaward,
        ])?;
        let mtdc = tdc.checked_sub(grad_tuition_health)?.checked_sub(subaward)?;

        let subaward_indirect_base = subaward.min(SUBAWARD_INDIRECT_CAP);
        let subaward_indirect = rates.indirect.checked_mul(subaward_indirect_base)?;
        let indirect = rates.indirect.checked_mul(mtdc)?.checked_add(subaward_indirect)?;

        let total_direct = tdc.checked_add(indirect)?;

        Some(LineItems {
            faculty_salary,
            faculty_fringe,
            grad_salary,
            grad_fringe,
            postdoc_salary,
            postdoc_fringe,
            postdoc_health,
            total_postdoc,
            undergrad_salary,
            undergrad_fringe,
            total_fringe,
            grad_tuition_health,
            travel: amounts.travel,
            publication_costs: amounts.publication_costs,
            subaward,
            subaward_indirect_base,
            subaward_indirect,
            tdc,
            mtdc,
            indirect,
            total_direct,
            total_budget: total_direct,
        })
    }
}

/// Left-to-right sum, `None` on overflow.
fn sum(amounts: &[Decimal]) -> Option<Decimal> {
    amounts
        .iter()
        .try_fold(Decimal::ZERO, |acc, amount| acc.checked_add(*amount))
}

/// Calculate a budget. Shorthand for [`BudgetCalculator::calculate`].
///
/// # Errors
///
/// Returns a `BudgetError` if the input fails validation.
pub fn calculate(input: &BudgetInput) -> Result<BudgetResult, BudgetError> {
    BudgetCalculator::calculate(input)
}
