//! Typed failures raised by the domain services.
//!
//! Services return `anyhow::Result`; the REST layer downcasts to these
//! variants to pick a status code.

use shared::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FinanceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },
}

impl FinanceError {
    pub fn user_not_found(id: &str) -> Self {
        FinanceError::NotFound { entity: "User", id: id.to_string() }
    }

    pub fn income_not_found(id: &str) -> Self {
        FinanceError::NotFound { entity: "Income", id: id.to_string() }
    }

    pub fn expense_not_found(id: &str) -> Self {
        FinanceError::NotFound { entity: "Expense", id: id.to_string() }
    }
}
