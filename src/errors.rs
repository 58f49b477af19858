use std::result::Result as StdResult;

use thiserror::Error;
use uuid::Uuid;

/// Unified error type for the plan/session/storage layers.
#[derive(Error, Debug)]
pub enum PlanError {
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Monthly income is not configured")]
    IncomeNotConfigured,
    #[error("Unknown billing interval: {0}")]
    UnknownInterval(String),
    #[error("Expense not found: {0}")]
    ExpenseNotFound(Uuid),
    #[error("Persistence error: {0}")]
    Storage(String),
}

pub type Result<T> = StdResult<T, PlanError>;

impl From<std::io::Error> for PlanError {
    fn from(err: std::io::Error) -> Self {
        PlanError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for PlanError {
    fn from(err: serde_json::Error) -> Self {
        PlanError::Storage(err.to_string())
    }
}

impl From<dialoguer::Error> for PlanError {
    fn from(err: dialoguer::Error) -> Self {
        PlanError::Storage(err.to_string())
    }
}
