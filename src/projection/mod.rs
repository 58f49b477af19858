//! Recurrence projection engine: decides in which months an expense bills and
//! aggregates a month-by-month surplus ledger over a multi-year range.
//!
//! The engine is total over validated records and pure: it never mutates its
//! inputs and has no error path of its own.

use chrono::{Datelike, NaiveDate};

use crate::errors::{PlanError, Result};
use crate::plan::{ExpenseRecord, YearMonth};

/// Inclusive iteration range for an overview: months from `start` through
/// December of `end_year`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectionRange {
    pub start: YearMonth,
    pub end_year: i32,
}

impl ProjectionRange {
    pub fn new(start: YearMonth, end_year: i32) -> Result<Self> {
        if end_year < start.year {
            return Err(PlanError::Validation(format!(
                "end year {end_year} lies before start month {start}"
            )));
        }
        Ok(Self { start, end_year })
    }

    /// Default range policy: start at the earliest first-due month (or the
    /// current month when no expenses exist), end with the latest last-due
    /// year (or the current year).
    pub fn default_for(expenses: &[ExpenseRecord], today: NaiveDate) -> Self {
        let start = expenses
            .iter()
            .map(|expense| expense.first_due)
            .min()
            .map(YearMonth::from_date)
            .unwrap_or_else(|| YearMonth::from_date(today));
        let end_year = expenses
            .iter()
            .map(|expense| expense.last_due.year())
            .max()
            .unwrap_or_else(|| today.year());
        // each record's last due is at or after its first due, so the
        // derived range is always well-formed
        Self { start, end_year }
    }

    fn months(&self) -> impl Iterator<Item = YearMonth> + '_ {
        let end_year = self.end_year;
        std::iter::successors(Some(self.start), move |current| {
            let next = current.next();
            (next.year <= end_year).then_some(next)
        })
    }
}

/// Returns true when `expense` bills in `target`. Billing months are anchored
/// to the calendar month of the first due date and recur every period,
/// regardless of day-of-month; the last due date caps the window without
/// having to coincide with a billing month.
pub fn occurs_in(expense: &ExpenseRecord, target: YearMonth) -> bool {
    if target.last_day() < expense.first_due || target.first_day() > expense.last_due {
        return false;
    }
    let months_diff = target.months_since(YearMonth::from_date(expense.first_due));
    if months_diff < 0 {
        return false;
    }
    months_diff % expense.interval.period_months() == 0
}

/// One row of the overview ledger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthRow {
    pub month: YearMonth,
    pub expense_total: f64,
    pub income: f64,
    pub surplus: f64,
}

/// Ordered month rows of a single calendar year.
#[derive(Debug, Clone, PartialEq)]
pub struct YearLedger {
    pub year: i32,
    pub rows: Vec<MonthRow>,
}

/// Complete projection output: per-year tables plus the grand total of
/// surpluses across the whole range.
#[derive(Debug, Clone, PartialEq)]
pub struct Overview {
    pub range: ProjectionRange,
    pub years: Vec<YearLedger>,
    pub total_available: f64,
}

/// Projects `income` against `expenses` over `range`. Surpluses may be
/// negative; nothing is clamped or prorated.
pub fn project(income: f64, expenses: &[ExpenseRecord], range: ProjectionRange) -> Overview {
    let mut years: Vec<YearLedger> = Vec::new();
    let mut total_available = 0.0;

    for month in range.months() {
        let expense_total: f64 = expenses
            .iter()
            .filter(|expense| occurs_in(expense, month))
            .map(|expense| expense.amount)
            .sum();
        let surplus = income - expense_total;
        total_available += surplus;

        let row = MonthRow {
            month,
            expense_total,
            income,
            surplus,
        };
        match years.last_mut() {
            Some(ledger) if ledger.year == month.year => ledger.rows.push(row),
            _ => years.push(YearLedger {
                year: month.year,
                rows: vec![row],
            }),
        }
    }

    Overview {
        range,
        years,
        total_available,
    }
}
