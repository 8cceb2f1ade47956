//! Interactive prompts for budget inputs.
//!
//! Each prompt shows its default in brackets; an empty answer (or end of
//! input) accepts it. Unparsable answers are reported and asked again.

use std::fmt::Display;
use std::io::{BufRead, Write};
use std::str::FromStr;

use grantcalc_core::{BudgetInput, BudgetRates};
use grantcalc_shared::{AppError, AppResult};
use rust_decimal::Decimal;
use tracing::debug;

/// Terminal session collecting budget inputs.
pub struct Shell<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    /// Creates a shell reading answers from `input` and writing prompts to `output`.
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Returns the output sink.
    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    /// Prompts for every budget input, starting from `defaults`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` for fewer than 1 year or a negative
    /// headcount, and `AppError::Io` if the terminal fails.
    pub fn collect(&mut self, defaults: &BudgetInput) -> AppResult<BudgetInput> {
        let years = self.prompt_parsed("Enter number of years", i64::from(defaults.years))?;
        if years < 1 {
            return Err(AppError::Validation(format!(
                "number of years must be at least 1, got {years}"
            )));
        }
        let years = to_count("number of years", years)?;

        let num_faculty = self.prompt_count("Enter number of supported faculty", defaults.num_faculty)?;
        let faculty_base_salary_9mo = self.prompt_parsed(
            "Enter base 9-month faculty salary",
            defaults.faculty_base_salary_9mo,
        )?;
        let faculty_summer_months = self.prompt_parsed(
            "Enter number of summer months faculty salary",
            defaults.faculty_summer_months,
        )?;

        let grad_stipend_annual = self.prompt_parsed(
            "Enter graduate student annual stipend",
            defaults.grad_stipend_annual,
        )?;
        let grad_tuition_fees =
            self.prompt_parsed("Enter graduate student tuition + fees", defaults.grad_tuition_fees)?;
        let grad_health_insurance = self.prompt_parsed(
            "Enter graduate student health insurance",
            defaults.grad_health_insurance,
        )?;
        let num_grad_students =
            self.prompt_count("Enter number of graduate students", defaults.num_grad_students)?;

        let undergrad_salary =
            self.prompt_parsed("Enter undergraduate student salary", defaults.undergrad_salary)?;
        let postdoc_salary = self.prompt_parsed("Enter postdoc salary", defaults.postdoc_salary)?;
        let postdoc_health = self.prompt_parsed("Enter postdoc health", defaults.postdoc_health)?;

        let travel = self.prompt_parsed("Enter yearly travel costs", defaults.travel)?;
        let publication_costs =
            self.prompt_parsed("Enter yearly publication costs", defaults.publication_costs)?;

        let subawards = self.prompt_subawards(years)?;

        let rates = BudgetRates {
            indirect: self.prompt_parsed("Enter indirect rate", defaults.rates.indirect)?,
            fringe: self.prompt_parsed("Enter fringe rate", defaults.rates.fringe)?,
            fulltime_fringe: self.prompt_parsed(
                "Enter full time employee fringe rate",
                defaults.rates.fulltime_fringe,
            )?,
            inflation: self.prompt_parsed(
                "Enter annual rate of inflation for salaries, stipends, and fees",
                defaults.rates.inflation,
            )?,
        };

        Ok(BudgetInput {
            years,
            num_faculty,
            faculty_base_salary_9mo,
            faculty_summer_months,
            grad_stipend_annual,
            grad_tuition_fees,
            grad_health_insurance,
            num_grad_students,
            undergrad_salary,
            postdoc_salary,
            postdoc_health,
            travel,
            publication_costs,
            subawards,
            rates,
            other_costs_inflate: defaults.other_costs_inflate,
        })
    }

    /// Writes a line to the output.
    pub fn say(&mut self, message: impl Display) -> AppResult<()> {
        writeln!(self.output, "{message}")?;
        Ok(())
    }

    fn prompt_parsed<T>(&mut self, label: &str, default: T) -> AppResult<T>
    where
        T: FromStr + Display,
    {
        loop {
            let answer = self.ask(&format!("{label} [{default}]: "))?;
            if answer.is_empty() {
                return Ok(default);
            }

            match answer.parse() {
                Ok(value) => return Ok(value),
                Err(_) => self.say(format_args!("Error: '{answer}' is not a valid number. Try again."))?,
            }
        }
    }

    fn prompt_count(&mut self, label: &str, default: u32) -> AppResult<u32> {
        let value = self.prompt_parsed(label, i64::from(default))?;
        to_count(label, value)
    }

    /// Subawards as exactly `years` whitespace-separated amounts, or empty
    /// for all zero.
    fn prompt_subawards(&mut self, years: u32) -> AppResult<Vec<Decimal>> {
        let expected = usize::try_from(years)
            .map_err(|_| AppError::Validation(format!("too many years: {years}")))?;

        loop {
            self.say(format_args!(
                "Enter subaward as {years} amounts, e.g., 1000 2000 ..., or press Enter for all zero:"
            ))?;
            let answer = self.ask("")?;
            if answer.is_empty() {
                return Ok(vec![Decimal::ZERO; expected]);
            }

            let parsed: Result<Vec<Decimal>, _> =
                answer.split_whitespace().map(Decimal::from_str).collect();
            match parsed {
                Ok(amounts) if amounts.len() == expected => return Ok(amounts),
                Ok(_) => self.say(format_args!(
                    "Error: Please enter exactly {years} amounts. Try again."
                ))?,
                Err(err) => self.say(format_args!("Error: {err}. Try again."))?,
            }
        }
    }

    /// Writes a prompt and reads one trimmed answer. End of input reads as
    /// an empty answer.
    fn ask(&mut self, prompt: &str) -> AppResult<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        let read = self.input.read_line(&mut line)?;
        if read == 0 {
            debug!(prompt, "End of input, using default");
        }

        Ok(line.trim().to_string())
    }
}

fn to_count(label: &str, value: i64) -> AppResult<u32> {
    u32::try_from(value).map_err(|_| {
        let what = label.trim_start_matches("Enter ");
        if value < 0 {
            AppError::Validation(format!("{what} cannot be negative, got {value}"))
        } else {
            AppError::Validation(format!("{what} is too large: {value}"))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn defaults() -> BudgetInput {
        BudgetInput {
            years: 3,
            num_faculty: 1,
            faculty_base_salary_9mo: dec!(120000),
            faculty_summer_months: dec!(0.25),
            grad_stipend_annual: dec!(26000),
            travel: dec!(2500),
            rates: BudgetRates {
                indirect: dec!(0.59),
                fringe: dec!(0.0211),
                fulltime_fringe: dec!(0.4531),
                inflation: dec!(0.03),
            },
            ..BudgetInput::default()
        }
    }

    fn run(answers: &str) -> (AppResult<BudgetInput>, String) {
        let mut shell = Shell::new(answers.as_bytes(), Vec::new());
        let result = shell.collect(&defaults());
        let output = String::from_utf8(shell.into_output()).unwrap();
        (result, output)
    }

    #[test]
    fn test_empty_answers_accept_defaults() {
        let (result, output) = run(&"\n".repeat(20));
        let input = result.unwrap();

        assert_eq!(
            input,
            BudgetInput {
                subawards: vec![Decimal::ZERO; 3],
                ..defaults()
            }
        );
        assert!(output.contains("Enter number of years [3]: "));
        assert!(output.contains("Enter indirect rate [0.59]: "));
    }

    #[test]
    fn test_end_of_input_accepts_defaults() {
        let (result, _) = run("");
        assert_eq!(result.unwrap().subawards, vec![Decimal::ZERO; 3]);
    }

    #[test]
    fn test_overrides() {
        let answers = [
            "2", "2", "90000", "1", "30000", "10000", "2000", "3", "4000", "60000", "5000",
            "1500", "800", "10000 20000", "0.5", "0.02", "0.4", "0.04",
        ]
        .join("\n");
        let (result, _) = run(&answers);
        let input = result.unwrap();

        assert_eq!(input.years, 2);
        assert_eq!(input.num_faculty, 2);
        assert_eq!(input.faculty_base_salary_9mo, dec!(90000));
        assert_eq!(input.faculty_summer_months, dec!(1));
        assert_eq!(input.grad_stipend_annual, dec!(30000));
        assert_eq!(input.grad_tuition_fees, dec!(10000));
        assert_eq!(input.grad_health_insurance, dec!(2000));
        assert_eq!(input.num_grad_students, 3);
        assert_eq!(input.undergrad_salary, dec!(4000));
        assert_eq!(input.postdoc_salary, dec!(60000));
        assert_eq!(input.postdoc_health, dec!(5000));
        assert_eq!(input.travel, dec!(1500));
        assert_eq!(input.publication_costs, dec!(800));
        assert_eq!(input.subawards, vec![dec!(10000), dec!(20000)]);
        assert_eq!(input.rates.indirect, dec!(0.5));
        assert_eq!(input.rates.fringe, dec!(0.02));
        assert_eq!(input.rates.fulltime_fringe, dec!(0.4));
        assert_eq!(input.rates.inflation, dec!(0.04));
    }

    #[test]
    fn test_invalid_number_is_asked_again() {
        let (result, output) = run("abc\n5\n");
        assert_eq!(result.unwrap().years, 5);
        assert!(output.contains("Error: 'abc' is not a valid number. Try again."));
    }

    #[test]
    fn test_subaward_count_mismatch_is_asked_again() {
        let answers = format!("2\n{}1000\n1000 2000\n", "\n".repeat(12));
        let (result, output) = run(&answers);

        assert_eq!(result.unwrap().subawards, vec![dec!(1000), dec!(2000)]);
        assert!(output.contains("Please enter exactly 2 amounts"));
    }

    #[test]
    fn test_zero_years_rejected() {
        let (result, _) = run("0\n");
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_negative_faculty_rejected() {
        let (result, _) = run("3\n-1\n");
        let err = result.unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert!(err.to_string().contains("cannot be negative"));
    }
}
