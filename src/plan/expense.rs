use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::interval::BillingInterval;
use crate::errors::{PlanError, Result};

/// Whether an expense is a fixed obligation or varies between billings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ExpenseKind {
    #[serde(rename = "fixed")]
    Fixed,
    #[serde(rename = "variable")]
    Variable,
}

impl ExpenseKind {
    pub fn label(&self) -> &'static str {
        match self {
            ExpenseKind::Fixed => "Fixed",
            ExpenseKind::Variable => "Variable",
        }
    }
}

/// A recurring expense, billed every `interval` months between `first_due`
/// and `last_due`. Built only through [`ExpenseRecord::new`], which enforces
/// the field constraints; invalid input is rejected, never corrected.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpenseRecord {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    pub kind: ExpenseKind,
    pub interval: BillingInterval,
    pub amount: f64,
    pub first_due: NaiveDate,
    pub last_due: NaiveDate,
}

impl ExpenseRecord {
    pub fn new(
        name: impl Into<String>,
        kind: ExpenseKind,
        interval: BillingInterval,
        amount: f64,
        first_due: NaiveDate,
        last_due: NaiveDate,
    ) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(PlanError::Validation("expense name must not be empty".into()));
        }
        if !amount.is_finite() || amount < 0.0 {
            return Err(PlanError::Validation(format!(
                "expense amount must be a non-negative number, got {amount}"
            )));
        }
        if first_due > last_due {
            return Err(PlanError::Validation(format!(
                "first due date {first_due} lies after last due date {last_due}"
            )));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            name,
            kind,
            interval,
            amount,
            first_due,
            last_due,
        })
    }
}

/// Field an expense list can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Name,
    Kind,
    Interval,
    Amount,
    FirstDue,
    LastDue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Sorts expenses in place. Name comparison is case-insensitive; intervals
/// order by cadence (monthly first), dates chronologically.
pub fn sort_expenses(expenses: &mut [ExpenseRecord], field: SortField, direction: SortDirection) {
    expenses.sort_by(|a, b| {
        let ordering = compare_by(a, b, field);
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

fn compare_by(a: &ExpenseRecord, b: &ExpenseRecord, field: SortField) -> Ordering {
    match field {
        SortField::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        SortField::Kind => a.kind.cmp(&b.kind),
        SortField::Interval => a.interval.period_months().cmp(&b.interval.period_months()),
        SortField::Amount => a.amount.total_cmp(&b.amount),
        SortField::FirstDue => a.first_due.cmp(&b.first_due),
        SortField::LastDue => a.last_due.cmp(&b.last_due),
    }
}
