//! # SQLite Storage
//!
//! sqlx-backed repositories. Months are stored as `YYYY-MM` text so they sort
//! chronologically; timestamps are RFC 3339 text.

pub mod connection;
pub mod user_repository;
pub mod income_repository;
pub mod expense_repository;

pub use connection::SqliteConnection;
pub use user_repository::UserRepository;
pub use income_repository::IncomeRepository;
pub use expense_repository::ExpenseRepository;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use shared::MonthKey;

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    let parsed = DateTime::parse_from_rfc3339(raw)
        .with_context(|| format!("Invalid stored timestamp '{}'", raw))?;
    Ok(parsed.with_timezone(&Utc))
}

fn parse_month(raw: &str) -> Result<MonthKey> {
    raw.parse::<MonthKey>()
        .with_context(|| format!("Invalid stored month '{}'", raw))
}
