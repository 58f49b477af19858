//! Session state and its mutations. A [`PlanSession`] is a plain value
//! holding the configured income and the expense collection; every mutation
//! validates first and leaves the session untouched on rejection.
//! [`SessionStore`] mirrors the session into a key-value backend after each
//! mutation, making the backend the durability boundary without ever treating
//! it as the source of truth mid-session.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::errors::{PlanError, Result};
use crate::plan::expense::{sort_expenses, SortDirection, SortField};
use crate::plan::ExpenseRecord;
use crate::projection::{project, Overview, ProjectionRange};
use crate::storage::KeyValueStore;

pub const INCOME_KEY: &str = "monthly_income";
pub const EXPENSES_KEY: &str = "expense_list";

/// All user state of one planning session. `income: None` is the valid "not
/// yet configured" state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanSession {
    pub income: Option<f64>,
    pub expenses: Vec<ExpenseRecord>,
}

impl PlanSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_income(&mut self, income: f64) -> Result<()> {
        if !income.is_finite() || income < 0.0 {
            return Err(PlanError::Validation(format!(
                "monthly income must be a non-negative number, got {income}"
            )));
        }
        self.income = Some(income);
        Ok(())
    }

    pub fn clear_income(&mut self) {
        self.income = None;
    }

    /// Appends a validated record. Duplicate logical entries are permitted;
    /// identity is the generated id.
    pub fn add_expense(&mut self, record: ExpenseRecord) -> Uuid {
        let id = record.id;
        self.expenses.push(record);
        id
    }

    /// Full-replacement edit: the old record is removed and the new one
    /// appended under the same id. There is no partial-field mutation.
    pub fn replace_expense(&mut self, id: Uuid, mut record: ExpenseRecord) -> Result<()> {
        let position = self.position_of(id)?;
        record.id = id;
        self.expenses.remove(position);
        self.expenses.push(record);
        Ok(())
    }

    pub fn remove_expense(&mut self, id: Uuid) -> Result<ExpenseRecord> {
        let position = self.position_of(id)?;
        Ok(self.expenses.remove(position))
    }

    pub fn expense(&self, id: Uuid) -> Option<&ExpenseRecord> {
        self.expenses.iter().find(|expense| expense.id == id)
    }

    pub fn sort_expenses(&mut self, field: SortField, direction: SortDirection) {
        sort_expenses(&mut self.expenses, field, direction);
    }

    pub fn clear(&mut self) {
        self.income = None;
        self.expenses.clear();
    }

    /// Projects the overview ledger. Requires configured income; the range
    /// defaults to the policy of [`ProjectionRange::default_for`] relative to
    /// `today`.
    pub fn overview(&self, range: Option<ProjectionRange>, today: NaiveDate) -> Result<Overview> {
        let income = self.income.ok_or(PlanError::IncomeNotConfigured)?;
        let range = range.unwrap_or_else(|| ProjectionRange::default_for(&self.expenses, today));
        Ok(project(income, &self.expenses, range))
    }

    fn position_of(&self, id: Uuid) -> Result<usize> {
        self.expenses
            .iter()
            .position(|expense| expense.id == id)
            .ok_or(PlanError::ExpenseNotFound(id))
    }
}

/// Couples a [`PlanSession`] with a [`KeyValueStore`] and mirrors state after
/// every mutation. Absent keys load as the uninitialized session.
pub struct SessionStore<S: KeyValueStore> {
    session: PlanSession,
    store: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    /// Loads the session from the backend. Missing keys mean "no data yet".
    pub fn open(store: S) -> Result<Self> {
        let mut session = PlanSession::new();
        if let Some(raw) = store.get(INCOME_KEY)? {
            session.income = Some(serde_json::from_str(&raw)?);
        }
        if let Some(raw) = store.get(EXPENSES_KEY)? {
            session.expenses = serde_json::from_str(&raw)?;
        }
        tracing::debug!(
            expenses = session.expenses.len(),
            income_configured = session.income.is_some(),
            "session loaded"
        );
        Ok(Self { session, store })
    }

    pub fn session(&self) -> &PlanSession {
        &self.session
    }

    pub fn set_income(&mut self, income: f64) -> Result<()> {
        self.session.set_income(income)?;
        self.persist_income()
    }

    pub fn clear_income(&mut self) -> Result<()> {
        self.session.clear_income();
        self.store.remove(INCOME_KEY)
    }

    pub fn add_expense(&mut self, record: ExpenseRecord) -> Result<Uuid> {
        let id = self.session.add_expense(record);
        self.persist_expenses()?;
        Ok(id)
    }

    pub fn replace_expense(&mut self, id: Uuid, record: ExpenseRecord) -> Result<()> {
        self.session.replace_expense(id, record)?;
        self.persist_expenses()
    }

    pub fn remove_expense(&mut self, id: Uuid) -> Result<ExpenseRecord> {
        let removed = self.session.remove_expense(id)?;
        self.persist_expenses()?;
        Ok(removed)
    }

    pub fn sort_expenses(&mut self, field: SortField, direction: SortDirection) -> Result<()> {
        self.session.sort_expenses(field, direction);
        self.persist_expenses()
    }

    /// Drops all state, in memory and in the backend.
    pub fn clear_all(&mut self) -> Result<()> {
        self.session.clear();
        self.store.clear()?;
        tracing::info!("session state cleared");
        Ok(())
    }

    pub fn overview(&self, range: Option<ProjectionRange>, today: NaiveDate) -> Result<Overview> {
        self.session.overview(range, today)
    }

    fn persist_income(&mut self) -> Result<()> {
        match self.session.income {
            Some(income) => {
                let raw = serde_json::to_string(&income)?;
                self.store.set(INCOME_KEY, &raw)
            }
            None => self.store.remove(INCOME_KEY),
        }
    }

    fn persist_expenses(&mut self) -> Result<()> {
        let raw = serde_json::to_string(&self.session.expenses)?;
        self.store.set(EXPENSES_KEY, &raw)
    }
}
