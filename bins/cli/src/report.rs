//! Report rendering: input echo, budget table, and subaward notes.

use std::fmt::Write;

use grantcalc_core::budget::LineItems;
use grantcalc_core::{BudgetInput, BudgetResult};
use grantcalc_shared::Dollars;
use rust_decimal::Decimal;

const LABEL_WIDTH: usize = 32;
const COLUMN_WIDTH: usize = 16;

type Field = fn(&LineItems) -> Decimal;

const LINE_ITEMS: [(&str, Field); 13] = [
    ("Faculty Salary", |items| items.faculty_salary),
    ("Faculty Fringe", |items| items.faculty_fringe),
    ("Graduate Salary", |items| items.grad_salary),
    ("Graduate Fringe", |items| items.grad_fringe),
    ("Postdoc Salary", |items| items.postdoc_salary),
    ("Postdoc Fringe", |items| items.postdoc_fringe),
    ("Total Postdoc", |items| items.total_postdoc),
    ("Undergraduate Salary", |items| items.undergrad_salary),
    ("Total Fringe", |items| items.total_fringe),
    ("Graduate Tuition + Health Ins", |items| items.grad_tuition_health),
    ("Travel", |items| items.travel),
    ("Publication Costs", |items| items.publication_costs),
    ("Subaward", |items| items.subaward),
];

const COST_BASE: [(&str, Field); 2] = [
    ("Modified Total Direct Costs", |items| items.mtdc),
    ("Indirect", |items| items.indirect),
];

const TOTALS: [(&str, Field); 2] = [
    ("Total Direct Costs", |items| items.tdc),
    ("Total Budget", |items| items.total_budget),
];

/// Echo of every input, for the screen and the run log.
pub fn render_inputs(input: &BudgetInput) -> String {
    let subawards = input
        .subawards
        .iter()
        .map(|amount| Dollars(*amount).to_string())
        .collect::<Vec<_>>()
        .join(", ");
    let inflate = if input.other_costs_inflate { "yes" } else { "no" };

    let rows: [(&str, String); 19] = [
        ("Number of years", input.years.to_string()),
        ("Number of faculty", input.num_faculty.to_string()),
        ("Faculty 9-month base salary", Dollars(input.faculty_base_salary_9mo).to_string()),
        ("Faculty summer months", input.faculty_summer_months.to_string()),
        ("Graduate stipend", Dollars(input.grad_stipend_annual).to_string()),
        ("Graduate tuition + fees", Dollars(input.grad_tuition_fees).to_string()),
        ("Graduate health insurance", Dollars(input.grad_health_insurance).to_string()),
        ("Number of graduate students", input.num_grad_students.to_string()),
        ("Undergraduate salary", Dollars(input.undergrad_salary).to_string()),
        ("Postdoc salary", Dollars(input.postdoc_salary).to_string()),
        ("Postdoc health", Dollars(input.postdoc_health).to_string()),
        ("Travel", Dollars(input.travel).to_string()),
        ("Publication costs", Dollars(input.publication_costs).to_string()),
        ("Travel/publications inflate", inflate.to_string()),
        ("Subawards", format!("[{subawards}]")),
        ("Indirect rate", input.rates.indirect.to_string()),
        ("Fringe (payroll tax) rate", input.rates.fringe.to_string()),
        ("Full-time fringe rate", input.rates.fulltime_fringe.to_string()),
        ("Inflation rate", input.rates.inflation.to_string()),
    ];

    let mut out = String::from("Input Parameters\n---------------------------------\n");
    for (label, value) in rows {
        let _ = writeln!(out, "  {label:<29}= {value}");
    }
    let _ = writeln!(out, "  {:<29}= {}", "Total subaward", Dollars(input.total_subaward()));
    out
}

/// Year-by-year table with a total column.
pub fn render_table(result: &BudgetResult) -> String {
    let mut header = format!("{:>LABEL_WIDTH$}", "");
    for year in &result.yearly {
        header.push_str(&format!("{:>COLUMN_WIDTH$}", format!("Year {}", year.year)));
    }
    header.push_str(&format!("{:>COLUMN_WIDTH$}", "Total"));
    let separator = "-".repeat(header.len());

    let mut out = String::new();
    let _ = writeln!(out, "{header}");
    let _ = writeln!(out, "{separator}");
    for group in [&LINE_ITEMS[..], &COST_BASE[..], &TOTALS[..]] {
        for (label, field) in group {
            out.push_str(&table_row(result, label, *field));
        }
        let _ = writeln!(out, "{separator}");
    }
    out
}

fn table_row(result: &BudgetResult, label: &str, field: Field) -> String {
    let mut row = format!("{label:>LABEL_WIDTH$}");
    for value in result.column(field) {
        row.push_str(&format!("{:>COLUMN_WIDTH$}", Dollars(value)));
    }
    row.push_str(&format!("{:>COLUMN_WIDTH$}", Dollars(field(&result.totals))));
    row.push('\n');
    row
}

/// Notes for every year with a subaward, showing the capped indirect.
pub fn render_notes(result: &BudgetResult) -> String {
    let mut out = String::new();
    for year in result.yearly.iter().filter(|year| year.items.subaward_indirect_base > Decimal::ZERO) {
        let _ = writeln!(
            out,
            "  Note: Year {} subaward indirect (on first $25k) = {}",
            year.year,
            Dollars(year.items.subaward_indirect)
        );
    }
    out
}

/// Full text report: inputs, table, and notes.
pub fn render_report(input: &BudgetInput, result: &BudgetResult) -> String {
    let mut out = render_inputs(input);
    out.push('\n');
    out.push_str(&render_table(result));

    let notes = render_notes(result);
    if !notes.is_empty() {
        out.push('\n');
        out.push_str(&notes);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use grantcalc_core::{BudgetCalculator, BudgetRates};
    use rust_decimal_macros::dec;

    fn sample() -> (BudgetInput, BudgetResult) {
        let input = BudgetInput {
            years: 2,
            num_faculty: 1,
            faculty_base_salary_9mo: dec!(25000),
            faculty_summer_months: dec!(1),
            travel: dec!(1234.5),
            subawards: vec![Decimal::ZERO, dec!(40000)],
            rates: BudgetRates {
                indirect: dec!(0.5),
                inflation: dec!(0.03),
                ..BudgetRates::default()
            },
            ..BudgetInput::default()
        };
        let result = BudgetCalculator::calculate(&input).unwrap();
        (input, result)
    }

    #[test]
    fn test_table_layout() {
        let (_, result) = sample();
        let table = render_table(&result);
        let lines: Vec<&str> = table.lines().collect();

        let width = LABEL_WIDTH + 3 * COLUMN_WIDTH;
        assert_eq!(lines[0].len(), width);
        assert!(lines[0].ends_with("Year 1          Year 2           Total"));
        assert_eq!(lines[1], "-".repeat(width));
        assert!(lines.iter().all(|line| line.len() == width));
    }

    #[test]
    fn test_table_rows() {
        let (_, result) = sample();
        let table = render_table(&result);

        let faculty = table.lines().find(|line| line.trim_start().starts_with("Faculty Salary")).unwrap();
        assert!(faculty.contains("$2,777.78"));
        assert!(faculty.contains("$2,861.11"));
        assert!(faculty.ends_with("$5,638.89"));

        let travel = table.lines().find(|line| line.trim_start().starts_with("Travel")).unwrap();
        assert!(travel.ends_with("$2,469.00"));

        for label in ["Modified Total Direct Costs", "Indirect", "Total Direct Costs", "Total Budget"] {
            assert!(table.contains(label), "missing {label}");
        }
    }

    #[test]
    fn test_notes_only_for_subaward_years() {
        let (_, result) = sample();
        let notes = render_notes(&result);

        assert_eq!(
            notes,
            "  Note: Year 2 subaward indirect (on first $25k) = $12,500.00\n"
        );
    }

    #[test]
    fn test_no_notes_without_subawards() {
        let input = BudgetInput::default();
        let result = BudgetCalculator::calculate(&input).unwrap();
        assert!(render_notes(&result).is_empty());
    }

    #[test]
    fn test_inputs_echo() {
        let (input, result) = sample();
        let echo = render_inputs(&input);

        assert!(echo.starts_with("Input Parameters\n"));
        assert!(echo.contains("  Number of years              = 2\n"));
        assert!(echo.contains("Subawards                    = [$0.00, $40,000.00]"));
        assert!(echo.contains("Total subaward               = $40,000.00"));
        assert!(echo.contains("Indirect rate                = 0.5"));

        let report = render_report(&input, &result);
        assert!(report.contains("Input Parameters"));
        assert!(report.contains("Total Budget"));
        assert!(report.contains("Note: Year 2"));
    }
}
