//! Domain model for a month's income.
use chrono::{DateTime, Utc};
use shared::MonthKey;

/// Salary recorded for one month. At most one exists per (user, month).
#[derive(Debug, Clone, PartialEq)]
pub struct Income {
    pub id: String,
    pub user_id: String,
    pub month: MonthKey,
    pub month_name: String,
    pub salary: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Income {
    pub fn new(user_id: &str, month: MonthKey, month_name: String, salary: f64) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            month,
            month_name,
            salary,
            created_at: now,
            updated_at: now,
        }
    }
}
