//! Budget defaults from the parameter file.

use grantcalc_core::{BudgetInput, BudgetRates};
use grantcalc_shared::{ParameterError, ParameterSet};
use rust_decimal::Decimal;

/// Builds the default budget input from parameter file keys.
///
/// Absent amounts and rates default to zero, `years` to 3, headcounts to 1.
/// The subaward schedule starts as all zero.
pub fn budget_input(params: &ParameterSet) -> Result<BudgetInput, ParameterError> {
    let years = params.count_or("years", 3)?;
    let zero = Decimal::ZERO;

    Ok(BudgetInput {
        years,
        num_faculty: params.count_or("num_faculty", 1)?,
        faculty_base_salary_9mo: params.decimal_or("faculty_base_salary", zero)?,
        faculty_summer_months: params.decimal_or("faculty_months", zero)?,
        grad_stipend_annual: params.decimal_or("grad_stipend", zero)?,
        grad_tuition_fees: params.decimal_or("grad_fees", zero)?,
        grad_health_insurance: params.decimal_or("grad_insurance", zero)?,
        num_grad_students: params.count_or("num_grad_students", 1)?,
        undergrad_salary: params.decimal_or("undergrad_salary", zero)?,
        postdoc_salary: params.decimal_or("postdoc_salary", zero)?,
        postdoc_health: params.decimal_or("postdoc_health", zero)?,
        travel: params.decimal_or("travel", zero)?,
        publication_costs: params.decimal_or("pub_costs", zero)?,
        subawards: Vec::new(),
        rates: BudgetRates {
            indirect: params.decimal_or("indirect_rate", zero)?,
            fringe: params.decimal_or("fringe_rate", zero)?,
            fulltime_fringe: params.decimal_or("fulltime_fringe", zero)?,
            inflation: params.decimal_or("inflation", zero)?,
        },
        other_costs_inflate: params.flag_or("inflate_other_costs", false)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_shipped_parameter_file() {
        let params = ParameterSet::parse(include_str!("../../../budget.par"));
        let input = budget_input(&params).unwrap();

        assert_eq!(input.years, 3);
        assert_eq!(input.num_faculty, 1);
        assert_eq!(input.faculty_base_salary_9mo, dec!(120000));
        assert_eq!(input.rates.indirect, dec!(0.59));
        assert_eq!(input.rates.fringe, dec!(0.0211));
        assert_eq!(input.rates.fulltime_fringe, dec!(0.4531));
        assert_eq!(input.rates.inflation, dec!(0.03));
        assert!(input.subawards.is_empty());
        assert!(!input.other_costs_inflate);
    }

    #[test]
    fn test_missing_keys_default() {
        let input = budget_input(&ParameterSet::default()).unwrap();

        assert_eq!(input.years, 3);
        assert_eq!(input.num_faculty, 1);
        assert_eq!(input.num_grad_students, 1);
        assert_eq!(input.travel, Decimal::ZERO);
        assert_eq!(input.rates, BudgetRates::default());
    }

    #[test]
    fn test_invalid_value_names_key() {
        let params = ParameterSet::parse("travel = lots\n");
        let err = budget_input(&params).unwrap_err();

        assert!(err.to_string().contains("travel"));
    }
}
