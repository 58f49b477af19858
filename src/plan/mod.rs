//! Plan domain models: recurring expenses, billing intervals, and month math.

pub mod expense;
pub mod interval;
pub mod month;

pub use expense::{ExpenseKind, ExpenseRecord, SortDirection, SortField};
pub use interval::BillingInterval;
pub use month::YearMonth;
