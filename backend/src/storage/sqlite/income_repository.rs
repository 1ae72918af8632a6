use anyhow::Result;
use async_trait::async_trait;
use shared::MonthKey;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::{parse_month, parse_timestamp, SqliteConnection};
use crate::domain::models::income::Income;
use crate::storage::traits::IncomeStorage;

/// Repository for monthly incomes
#[derive(Clone)]
pub struct IncomeRepository {
    db: SqliteConnection,
}

impl IncomeRepository {
    pub fn new(db: SqliteConnection) -> Self {
        Self { db }
    }

    fn row_to_income(row: &SqliteRow) -> Result<Income> {
        let month: String = row.get("month");
        let created_at: String = row.get("created_at");
        let updated_at: String = row.get("updated_at");
        Ok(Income {
            id: row.get("id"),
            user_id: row.get("user_id"),
            month: parse_month(&month)?,
            month_name: row.get("month_name"),
            salary: row.get("salary"),
            created_at: parse_timestamp(&created_at)?,
            updated_at: parse_timestamp(&updated_at)?,
        })
    }
}

#[async_trait]
impl IncomeStorage for IncomeRepository {
    async fn store_income(&self, income: &Income) -> Result<Income> {
        let row = sqlx::query(
            r#"
            INSERT INTO incomes (id, user_id, month, month_name, salary, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(user_id, month) DO UPDATE SET
                month_name = excluded.month_name,
                salary = excluded.salary,
                updated_at = excluded.updated_at
            RETURNING id, user_id, month, month_name, salary, created_at, updated_at
            "#,
        )
        .bind(&income.id)
        .bind(&income.user_id)
        .bind(income.month.to_string())
        .bind(&income.month_name)
        .bind(income.salary)
        .bind(income.created_at.to_rfc3339())
        .bind(income.updated_at.to_rfc3339())
        .fetch_one(self.db.pool())
        .await?;

        Self::row_to_income(&row)
    }

    async fn get_income(&self, income_id: &str) -> Result<Option<Income>> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, month, month_name, salary, created_at, updated_at
            FROM incomes
            WHERE id = ?
            "#,
        )
        .bind(income_id)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(Self::row_to_income).transpose()
    }

    async fn get_income_for_month(&self, user_id: &str, month: MonthKey) -> Result<Option<Income>> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, month, month_name, salary, created_at, updated_at
            FROM incomes
            WHERE user_id = ? AND month = ?
            "#,
        )
        .bind(user_id)
        .bind(month.to_string())
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(Self::row_to_income).transpose()
    }

    async fn list_incomes(&self, user_id: &str) -> Result<Vec<Income>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, month, month_name, salary, created_at, updated_at
            FROM incomes
            WHERE user_id = ?
            ORDER BY month DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::row_to_income).collect()
    }

    async fn update_income(&self, income: &Income) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE incomes
            SET month_name = ?, salary = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&income.month_name)
        .bind(income.salary)
        .bind(income.updated_at.to_rfc3339())
        .bind(&income.id)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn delete_income(&self, income_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM incomes WHERE id = ?")
            .bind(income_id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
