//! Budget data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Institutional rates applied to the budget, as decimal fractions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetRates {
    /// Indirect (F&A) rate applied to MTDC and the capped subaward portion.
    pub indirect: Decimal,
    /// Payroll-tax fringe rate for faculty, grad, and undergrad wages.
    pub fringe: Decimal,
    /// Full-time fringe rate for postdoc salary.
    pub fulltime_fringe: Decimal,
    /// Annual inflation rate for salaries, stipends, and fees.
    pub inflation: Decimal,
}

impl BudgetRates {
    /// Rates by name, in prompt order.
    #[must_use]
    pub const fn named(&self) -> [(&'static str, Decimal); 4] {
        [
            ("indirect_rate", self.indirect),
            ("fringe_rate", self.fringe),
            ("fulltime_fringe", self.fulltime_fringe),
            ("inflation", self.inflation),
        ]
    }

    /// Rates outside `[0, 1]`, usually a percentage typed where a fraction
    /// was expected. The calculation still accepts rates above 1.
    #[must_use]
    pub fn out_of_range(&self) -> Vec<(&'static str, Decimal)> {
        self.named()
            .into_iter()
            .filter(|(_, rate)| *rate < Decimal::ZERO || *rate > Decimal::ONE)
            .collect()
    }
}

/// Fully-specified input to the budget calculation.
///
/// Every amount is a year-1 baseline; inflation for later years is applied
/// by the calculator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetInput {
    /// Number of budget years (at least 1).
    pub years: u32,
    /// Number of supported faculty.
    pub num_faculty: u32,
    /// 9-month academic-year base salary per faculty member.
    pub faculty_base_salary_9mo: Decimal,
    /// Summer months of salary requested per faculty member.
    pub faculty_summer_months: Decimal,
    /// Annual stipend per graduate student.
    pub grad_stipend_annual: Decimal,
    /// Tuition and fees per graduate student.
    pub grad_tuition_fees: Decimal,
    /// Health insurance per graduate student.
    pub grad_health_insurance: Decimal,
    /// Number of graduate students.
    pub num_grad_students: u32,
    /// Undergraduate salary.
    pub undergrad_salary: Decimal,
    /// Postdoc salary.
    pub postdoc_salary: Decimal,
    /// Postdoc health insurance.
    pub postdoc_health: Decimal,
    /// Travel costs.
    pub travel: Decimal,
    /// Publication costs.
    pub publication_costs: Decimal,
    /// Subaward amount per year. Missing trailing years are zero.
    pub subawards: Vec<Decimal>,
    /// Institutional rates.
    pub rates: BudgetRates,
    /// Whether travel and publication costs inflate like salaries.
    #[serde(default)]
    pub other_costs_inflate: bool,
}

impl Default for BudgetInput {
    fn default() -> Self {
        Self {
            years: 1,
            num_faculty: 0,
            faculty_base_salary_9mo: Decimal::ZERO,
            faculty_summer_months: Decimal::ZERO,
            grad_stipend_annual: Decimal::ZERO,
            grad_tuition_fees: Decimal::ZERO,
            grad_health_insurance: Decimal::ZERO,
            num_grad_students: 1,
            undergrad_salary: Decimal::ZERO,
            postdoc_salary: Decimal::ZERO,
            postdoc_health: Decimal::ZERO,
            travel: Decimal::ZERO,
            publication_costs: Decimal::ZERO,
            subawards: Vec::new(),
            rates: BudgetRates::default(),
            other_costs_inflate: false,
        }
    }
}

impl BudgetInput {
    /// Subaward for a 1-based year, zero past the end of the schedule.
    #[must_use]
    pub fn subaward(&self, year: u32) -> Decimal {
        usize::try_from(year.saturating_sub(1))
            .ok()
            .and_then(|idx| self.subawards.get(idx))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Sum of the subaward schedule.
    #[must_use]
    pub fn total_subaward(&self) -> Decimal {
        self.subawards.iter().copied().sum()
    }

    /// Baseline monetary inputs by name.
    #[must_use]
    pub const fn named_amounts(&self) -> [(&'static str, Decimal); 10] {
        [
            ("faculty_base_salary_9mo", self.faculty_base_salary_9mo),
            ("faculty_summer_months", self.faculty_summer_months),
            ("grad_stipend_annual", self.grad_stipend_annual),
            ("grad_tuition_fees", self.grad_tuition_fees),
            ("grad_health_insurance", self.grad_health_insurance),
            ("undergrad_salary", self.undergrad_salary),
            ("postdoc_salary", self.postdoc_salary),
            ("postdoc_health", self.postdoc_health),
            ("travel", self.travel),
            ("publication_costs", self.publication_costs),
        ]
    }
}

/// Every line item of a budget year, also used for the cross-year totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItems {
    /// Faculty summer salary.
    pub faculty_salary: Decimal,
    /// Payroll-tax fringe on faculty salary.
    pub faculty_fringe: Decimal,
    /// Graduate stipend.
    pub grad_salary: Decimal,
    /// Payroll-tax fringe on the summer share of the grad stipend.
    pub grad_fringe: Decimal,
    /// Postdoc salary.
    pub postdoc_salary: Decimal,
    /// Full-time fringe on postdoc salary.
    pub postdoc_fringe: Decimal,
    /// Postdoc health insurance.
    pub postdoc_health: Decimal,
    /// Postdoc salary, fringe, and health.
    pub total_postdoc: Decimal,
    /// Undergraduate salary.
    pub undergrad_salary: Decimal,
    /// Payroll-tax fringe on undergraduate salary.
    pub undergrad_fringe: Decimal,
    /// Payroll-tax fringe only (faculty, grad, undergrad).
    pub total_fringe: Decimal,
    /// Graduate tuition, fees, and health insurance. Excluded from MTDC.
    pub grad_tuition_health: Decimal,
    /// Travel.
    pub travel: Decimal,
    /// Publication costs.
    pub publication_costs: Decimal,
    /// Subaward. Excluded from MTDC.
    pub subaward: Decimal,
    /// Indirect-bearing part of the subaward.
    pub subaward_indirect_base: Decimal,
    /// Indirect charged on the capped subaward.
    pub subaward_indirect: Decimal,
    /// Total direct costs.
    pub tdc: Decimal,
    /// Modified total direct costs.
    pub mtdc: Decimal,
    /// Indirect costs.
    pub indirect: Decimal,
    /// TDC plus indirect.
    pub total_direct: Decimal,
    /// Final reported total.
    pub total_budget: Decimal,
}

impl LineItems {
    /// All fields by name, in declaration order.
    #[must_use]
    pub const fn fields(&self) -> [(&'static str, Decimal); 22] {
        [
            ("faculty_salary", self.faculty_salary),
            ("faculty_fringe", self.faculty_fringe),
            ("grad_salary", self.grad_salary),
            ("grad_fringe", self.grad_fringe),
            ("postdoc_salary", self.postdoc_salary),
            ("postdoc_fringe", self.postdoc_fringe),
            ("postdoc_health", self.postdoc_health),
            ("total_postdoc", self.total_postdoc),
            ("undergrad_salary", self.undergrad_salary),
            ("undergrad_fringe", self.undergrad_fringe),
            ("total_fringe", self.total_fringe),
            ("grad_tuition_health", self.grad_tuition_health),
            ("travel", self.travel),
            ("publication_costs", self.publication_costs),
            ("subaward", self.subaward),
            ("subaward_indirect_base", self.subaward_indirect_base),
            ("subaward_indirect", self.subaward_indirect),
            ("tdc", self.tdc),
            ("mtdc", self.mtdc),
            ("indirect", self.indirect),
            ("total_direct", self.total_direct),
            ("total_budget", self.total_budget),
        ]
    }
}

impl LineItems {
    /// Field-wise sum, or `None` if any field overflows.
    #[must_use]
    pub fn checked_add(&self, rhs: &Self) -> Option<Self> {
        Some(Self {
            faculty_salary: self.faculty_salary.checked_add(rhs.faculty_salary)?,
            faculty_fringe: self.faculty_fringe.checked_add(rhs.faculty_fringe)?,
            grad_salary: self.grad_salary.checked_add(rhs.grad_salary)?,
            grad_fringe: self.grad_fringe.checked_add(rhs.grad_fringe)?,
            postdoc_salary: self.postdoc_salary.checked_add(rhs.postdoc_salary)?,
            postdoc_fringe: self.postdoc_fringe.checked_add(rhs.postdoc_fringe)?,
            postdoc_health: self.postdoc_health.checked_add(rhs.postdoc_health)?,
            total_postdoc: self.total_postdoc.checked_add(rhs.total_postdoc)?,
            undergrad_salary: self.undergrad_salary.checked_add(rhs.undergrad_salary)?,
            undergrad_fringe: self.undergrad_fringe.checked_add(rhs.undergrad_fringe)?,
            total_fringe: self.total_fringe.checked_add(rhs.total_fringe)?,
            grad_tuition_health: self.grad_tuition_health.checked_add(rhs.grad_tuition_health)?,
            travel: self.travel.checked_add(rhs.travel)?,
            publication_costs: self.publication_costs.checked_add(rhs.publication_costs)?,
            subaward: self.subaward.checked_add(rhs.subaward)?,
            subaward_indirect_base: self.subaward_indirect_base.checked_add(rhs.subaward_indirect_base)?,
            subaward_indirect: self.subaward_indirect.checked_add(rhs.subaward_indirect)?,
            tdc: self.tdc.checked_add(rhs.tdc)?,
            mtdc: self.mtdc.checked_add(rhs.mtdc)?,
            indirect: self.indirect.checked_add(rhs.indirect)?,
            total_direct: self.total_direct.checked_add(rhs.total_direct)?,
            total_budget: self.total_budget.checked_add(rhs.total_budget)?,
        })
    }
}

/// Line items for a single budget year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearBreakdown {
    /// 1-based year number.
    pub year: u32,
    /// Dollar figures for the year.
    #[serde(flatten)]
    pub items: LineItems,
}

/// Result of a budget calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetResult {
    /// Per-year breakdown, one entry per budget year.
    pub yearly: Vec<YearBreakdown>,
    /// Sum of every line item across years.
    pub totals: LineItems,
}

impl BudgetResult {
    /// Number of budget years.
    #[must_use]
    pub fn years(&self) -> usize {
        self.yearly.len()
    }

    /// Total direct costs per year.
    #[must_use]
    pub fn tdc(&self) -> Vec<Decimal> {
        self.column(|items| items.tdc)
    }

    /// Modified total direct costs per year.
    #[must_use]
    pub fn mtdc(&self) -> Vec<Decimal> {
        self.column(|items| items.mtdc)
    }

    /// One line item across all years.
    pub fn column(&self, field: impl Fn(&LineItems) -> Decimal) -> Vec<Decimal> {
        self.yearly.iter().map(|year| field(&year.items)).collect()
    }
}
