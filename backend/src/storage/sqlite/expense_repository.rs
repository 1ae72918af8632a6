use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use chrono::Utc;
use shared::{ExpenseCategory, MonthKey};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, Sqlite, Transaction};
use std::collections::HashMap;

use super::{parse_month, parse_timestamp, SqliteConnection};
use crate::domain::models::expense::{Expense, ExpenseItem};
use crate::storage::traits::ExpenseStorage;

/// Repository for monthly expenses and their items.
///
/// Every write touching more than one row runs in a single transaction.
#[derive(Clone)]
pub struct ExpenseRepository {
    db: SqliteConnection,
}

impl ExpenseRepository {
    pub fn new(db: SqliteConnection) -> Self {
        Self { db }
    }

    fn row_to_expense(row: &SqliteRow) -> Result<Expense> {
        let month: String = row.get("month");
        let created_at: String = row.get("created_at");
        let updated_at: String = row.get("updated_at");
        Ok(Expense {
            id: row.get("id"),
            user_id: row.get("user_id"),
            month: parse_month(&month)?,
            month_name: row.get("month_name"),
            total_expenses: row.get("total_expenses"),
            items: Vec::new(),
            created_at: parse_timestamp(&created_at)?,
            updated_at: parse_timestamp(&updated_at)?,
        })
    }

    fn row_to_item(row: &SqliteRow) -> Result<ExpenseItem> {
        let category: String = row.get("category");
        Ok(ExpenseItem {
            id: row.get("id"),
            expense_id: row.get("expense_id"),
            label: row.get("label"),
            amount: row.get("amount"),
            category: category.parse::<ExpenseCategory>().map_err(|e| anyhow!(e))?,
        })
    }

    async fn items_for_expense(&self, expense_id: &str) -> Result<Vec<ExpenseItem>> {
        let rows = sqlx::query(
            r#"
            SELECT id, expense_id, label, amount, category
            FROM expense_items
            WHERE expense_id = ?
            ORDER BY position ASC
            "#,
        )
        .bind(expense_id)
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::row_to_item).collect()
    }

    async fn with_items(&self, row: Option<SqliteRow>) -> Result<Option<Expense>> {
        match row {
            Some(r) => {
                let mut expense = Self::row_to_expense(&r)?;
                expense.items = self.items_for_expense(&expense.id).await?;
                Ok(Some(expense))
            }
            None => Ok(None),
        }
    }

    async fn insert_items(
        tx: &mut Transaction<'_, Sqlite>,
        items: &[ExpenseItem],
        first_position: i64,
    ) -> Result<()> {
        for (offset, item) in items.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO expense_items (id, expense_id, label, amount, category, position)
                VALUES (?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&item.id)
            .bind(&item.expense_id)
            .bind(&item.label)
            .bind(item.amount)
            .bind(item.category.as_str())
            .bind(first_position + offset as i64)
            .execute(&mut **tx)
            .await?;
        }
        Ok(())
    }

    async fn replace_items(
        tx: &mut Transaction<'_, Sqlite>,
        expense_id: &str,
        items: &[ExpenseItem],
    ) -> Result<()> {
        sqlx::query("DELETE FROM expense_items WHERE expense_id = ?")
            .bind(expense_id)
            .execute(&mut **tx)
            .await?;

        Self::insert_items(tx, items, 0).await
    }

    /// Set the header total to the sum of the stored items.
    /// Returns false if the expense does not exist
    async fn recompute_total(tx: &mut Transaction<'_, Sqlite>, expense_id: &str) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE expenses
            SET total_expenses = (
                    SELECT COALESCE(SUM(amount), 0) FROM expense_items WHERE expense_id = ?
                ),
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(expense_id)
        .bind(Utc::now().to_rfc3339())
        .bind(expense_id)
        .execute(&mut **tx)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl ExpenseStorage for ExpenseRepository {
    async fn store_expense(&self, expense: &Expense) -> Result<Expense> {
        let mut tx = self.db.pool().begin().await?;

        // an existing row for the month keeps its id and created_at
        let row = sqlx::query(
            r#"
            INSERT INTO expenses (id, user_id, month, month_name, total_expenses, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(user_id, month) DO UPDATE SET
                month_name = excluded.month_name,
                total_expenses = excluded.total_expenses,
                updated_at = excluded.updated_at
            RETURNING id, created_at
            "#,
        )
        .bind(&expense.id)
        .bind(&expense.user_id)
        .bind(expense.month.to_string())
        .bind(&expense.month_name)
        .bind(expense.total_expenses)
        .bind(expense.created_at.to_rfc3339())
        .bind(expense.updated_at.to_rfc3339())
        .fetch_one(&mut *tx)
        .await?;

        let created_at: String = row.get("created_at");
        let mut stored = expense.clone();
        stored.assign_id(row.get("id"));
        stored.created_at = parse_timestamp(&created_at)?;

        Self::replace_items(&mut tx, &stored.id, &stored.items).await?;

        tx.commit().await?;
        Ok(stored)
    }

    async fn get_expense(&self, expense_id: &str) -> Result<Option<Expense>> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, month, month_name, total_expenses, created_at, updated_at
            FROM expenses
            WHERE id = ?
            "#,
        )
        .bind(expense_id)
        .fetch_optional(self.db.pool())
        .await?;

        self.with_items(row).await
    }

    async fn get_expense_for_month(&self, user_id: &str, month: MonthKey) -> Result<Option<Expense>> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, month, month_name, total_expenses, created_at, updated_at
            FROM expenses
            WHERE user_id = ? AND month = ?
            "#,
        )
        .bind(user_id)
        .bind(month.to_string())
        .fetch_optional(self.db.pool())
        .await?;

        self.with_items(row).await
    }

    async fn list_expenses(&self, user_id: &str) -> Result<Vec<Expense>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, month, month_name, total_expenses, created_at, updated_at
            FROM expenses
            WHERE user_id = ?
            ORDER BY month DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.db.pool())
        .await?;

        let item_rows = sqlx::query(
            r#"
            SELECT i.id, i.expense_id, i.label, i.amount, i.category
            FROM expense_items i
            JOIN expenses e ON e.id = i.expense_id
            WHERE e.user_id = ?
            ORDER BY i.expense_id, i.position ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.db.pool())
        .await?;

        let mut items_by_expense: HashMap<String, Vec<ExpenseItem>> = HashMap::new();
        for row in &item_rows {
            let item = Self::row_to_item(row)?;
            items_by_expense
                .entry(item.expense_id.clone())
                .or_default()
                .push(item);
        }

        rows.iter()
            .map(|row| {
                let mut expense = Self::row_to_expense(row)?;
                expense.items = items_by_expense.remove(&expense.id).unwrap_or_default();
                Ok(expense)
            })
            .collect()
    }

    async fn update_expense(&self, expense: &Expense) -> Result<bool> {
        let mut tx = self.db.pool().begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE expenses
            SET month_name = ?, total_expenses = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&expense.month_name)
        .bind(expense.total_expenses)
        .bind(expense.updated_at.to_rfc3339())
        .bind(&expense.id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(false);
        }

        Self::replace_items(&mut tx, &expense.id, &expense.items).await?;

        tx.commit().await?;
        Ok(true)
    }

    async fn delete_expense(&self, expense_id: &str) -> Result<bool> {
        let mut tx = self.db.pool().begin().await?;

        sqlx::query("DELETE FROM expense_items WHERE expense_id = ?")
            .bind(expense_id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM expenses WHERE id = ?")
            .bind(expense_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    async fn store_expense_items(&self, items: &[ExpenseItem]) -> Result<()> {
        let Some(first) = items.first() else {
            return Ok(());
        };
        let expense_id = &first.expense_id;
        if items.iter().any(|item| &item.expense_id != expense_id) {
            bail!("Items belong to more than one expense");
        }

        let mut tx = self.db.pool().begin().await?;

        let next_position: i64 = sqlx::query(
            "SELECT COALESCE(MAX(position) + 1, 0) AS next FROM expense_items WHERE expense_id = ?",
        )
        .bind(expense_id)
        .fetch_one(&mut *tx)
        .await?
        .get("next");

        Self::insert_items(&mut tx, items, next_position).await?;

        if !Self::recompute_total(&mut tx, expense_id).await? {
            bail!("Expense {} does not exist", expense_id);
        }

        tx.commit().await?;
        Ok(())
    }

    async fn replace_expense_items(&self, expense_id: &str, items: &[ExpenseItem]) -> Result<()> {
        let mut tx = self.db.pool().begin().await?;

        Self::replace_items(&mut tx, expense_id, items).await?;

        if !Self::recompute_total(&mut tx, expense_id).await? {
            bail!("Expense {} does not exist", expense_id);
        }

        tx.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::user::User;
    use crate::storage::sqlite::UserRepository;
    use crate::storage::traits::UserStorage;

    async fn setup_test() -> (ExpenseRepository, User) {
        let db = SqliteConnection::init_test().await.expect("Failed to create test database");
        let user = User::new("Test".to_string());
        UserRepository::new(db.clone()).store_user(&user).await.expect("Failed to store user");
        (ExpenseRepository::new(db), user)
    }

    fn expense_with_items(user_id: &str, year: i32, month: u32, amounts: &[(&str, f64)]) -> Expense {
        let key = MonthKey::new(year, month).unwrap();
        let mut expense = Expense::new(user_id, key, key.display_name());
        let items = amounts
            .iter()
            .map(|(label, amount)| {
                ExpenseItem::new(&expense.id, label.to_string(), *amount, ExpenseCategory::suggest_for_label(label))
            })
            .collect();
        expense.set_items(items);
        expense
    }

    #[tokio::test]
    async fn test_store_and_get_expense_with_items_in_order() {
        let (repo, user) = setup_test().await;
        let expense = expense_with_items(&user.id, 2024, 8, &[("Food", 1_200_000.0), ("Tabungan", 800_000.0)]);
        repo.store_expense(&expense).await.unwrap();

        let stored = repo.get_expense(&expense.id).await.unwrap().unwrap();
        assert_eq!(stored.total_expenses, 2_000_000.0);
        assert_eq!(stored.items.len(), 2);
        assert_eq!(stored.items[0].label, "Food");
        assert_eq!(stored.items[1].category, ExpenseCategory::Savings);
        assert_eq!(stored.month.to_string(), "2024-08");
    }

    #[tokio::test]
    async fn test_list_expenses_month_descending() {
        let (repo, user) = setup_test().await;
        for (year, month) in [(2024, 2), (2023, 12), (2024, 10)] {
            let expense = expense_with_items(&user.id, year, month, &[("Rent", 100.0)]);
            repo.store_expense(&expense).await.unwrap();
        }

        let listed = repo.list_expenses(&user.id).await.unwrap();
        let months: Vec<String> = listed.iter().map(|e| e.month.to_string()).collect();
        assert_eq!(months, vec!["2024-10", "2024-02", "2023-12"]);
        assert!(listed.iter().all(|e| e.items.len() == 1));
    }

    #[tokio::test]
    async fn test_delete_expense_cascades_items() {
        let (repo, user) = setup_test().await;
        let expense = expense_with_items(&user.id, 2024, 8, &[("Food", 10.0), ("Fuel", 20.0)]);
        repo.store_expense(&expense).await.unwrap();

        assert!(repo.delete_expense(&expense.id).await.unwrap());
        assert!(repo.get_expense(&expense.id).await.unwrap().is_none());

        let remaining: i64 = sqlx::query("SELECT COUNT(*) AS n FROM expense_items")
            .fetch_one(repo.db.pool())
            .await
            .unwrap()
            .get("n");
        assert_eq!(remaining, 0);

        assert!(!repo.delete_expense(&expense.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_replace_and_append_items_keep_total_in_sync() {
        let (repo, user) = setup_test().await;
        let expense = expense_with_items(&user.id, 2024, 8, &[("Food", 10.0), ("Fuel", 20.0)]);
        repo.store_expense(&expense).await.unwrap();

        let replacement = vec![ExpenseItem::new(&expense.id, "Rent".to_string(), 50.0, ExpenseCategory::Spending)];
        repo.replace_expense_items(&expense.id, &replacement).await.unwrap();
        assert_eq!(repo.get_expense(&expense.id).await.unwrap().unwrap().total_expenses, 50.0);

        let extra = vec![ExpenseItem::new(&expense.id, "Savings".to_string(), 5.0, ExpenseCategory::Savings)];
        repo.store_expense_items(&extra).await.unwrap();

        let stored = repo.get_expense(&expense.id).await.unwrap().unwrap();
        let labels: Vec<&str> = stored.items.iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, vec!["Rent", "Savings"]);
        assert_eq!(stored.total_expenses, 55.0);
    }

    #[tokio::test]
    async fn test_item_batches_for_missing_expense_fail() {
        let (repo, _user) = setup_test().await;
        let item = ExpenseItem::new("missing", "Food".to_string(), 1.0, ExpenseCategory::Spending);

        assert!(repo.replace_expense_items("missing", &[]).await.is_err());
        assert!(repo.replace_expense_items("missing", &[item.clone()]).await.is_err());
        assert!(repo.store_expense_items(&[item]).await.is_err());
    }

    #[tokio::test]
    async fn test_update_expense_writes_header_and_items_together() {
        let (repo, user) = setup_test().await;
        let mut expense = expense_with_items(&user.id, 2024, 8, &[("Food", 10.0), ("Fuel", 20.0)]);
        repo.store_expense(&expense).await.unwrap();

        let items = vec![ExpenseItem::new(&expense.id, "Rent".to_string(), 70.0, ExpenseCategory::Spending)];
        expense.set_items(items);
        expense.month_name = "Gajian Agustus".to_string();
        assert!(repo.update_expense(&expense).await.unwrap());

        let stored = repo.get_expense(&expense.id).await.unwrap().unwrap();
        assert_eq!(stored.total_expenses, 70.0);
        assert_eq!(stored.month_name, "Gajian Agustus");
        assert_eq!(stored.items.len(), 1);
        assert_eq!(stored.items[0].label, "Rent");
    }

    #[tokio::test]
    async fn test_failed_update_leaves_header_and_items_unchanged() {
        let (repo, user) = setup_test().await;
        let mut expense = expense_with_items(&user.id, 2024, 8, &[("Food", 10.0), ("Fuel", 20.0)]);
        repo.store_expense(&expense).await.unwrap();

        // the second insert hits the item primary key and aborts the transaction
        let item = ExpenseItem::new(&expense.id, "Rent".to_string(), 70.0, ExpenseCategory::Spending);
        expense.set_items(vec![item.clone(), item]);
        assert!(repo.update_expense(&expense).await.is_err());

        let stored = repo.get_expense(&expense.id).await.unwrap().unwrap();
        assert_eq!(stored.total_expenses, 30.0);
        let labels: Vec<&str> = stored.items.iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, vec!["Food", "Fuel"]);
    }

    #[tokio::test]
    async fn test_update_missing_expense_returns_false() {
        let (repo, user) = setup_test().await;
        let expense = expense_with_items(&user.id, 2024, 8, &[("Food", 10.0)]);

        assert!(!repo.update_expense(&expense).await.unwrap());
        assert!(repo.get_expense(&expense.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_store_for_existing_month_replaces_in_place() {
        let (repo, user) = setup_test().await;
        let first = expense_with_items(&user.id, 2024, 8, &[("Food", 10.0), ("Fuel", 20.0)]);
        let second = expense_with_items(&user.id, 2024, 8, &[("Rent", 40.0)]);

        let stored_first = repo.store_expense(&first).await.unwrap();
        assert_eq!(stored_first.id, first.id);

        let stored_second = repo.store_expense(&second).await.unwrap();
        assert_eq!(stored_second.id, first.id);
        assert_eq!(stored_second.created_at, stored_first.created_at);
        assert!(stored_second.items.iter().all(|i| i.expense_id == first.id));

        let stored = repo.get_expense_for_month(&user.id, first.month).await.unwrap().unwrap();
        assert_eq!(stored.id, first.id);
        assert_eq!(stored.total_expenses, 40.0);
        assert_eq!(stored.items.len(), 1);
        assert_eq!(stored.items[0].label, "Rent");

        let count: i64 = sqlx::query("SELECT COUNT(*) AS n FROM expense_items")
            .fetch_one(repo.db.pool())
            .await
            .unwrap()
            .get("n");
        assert_eq!(count, 1);
        assert_eq!(repo.list_expenses(&user.id).await.unwrap().len(), 1);
    }
}
