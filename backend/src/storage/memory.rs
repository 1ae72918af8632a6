//! # In-Memory Storage
//!
//! Process-local store for domain service tests. Keeps the same
//! one-record-per-month rule as the SQLite schema: storing a second record
//! for a month overwrites the first under its id.

use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::Utc;
use shared::MonthKey;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::models::expense::{Expense, ExpenseItem};
use crate::domain::models::income::Income;
use crate::domain::models::user::User;
use crate::storage::traits::{Connection, ExpenseStorage, IncomeStorage, UserStorage};

#[derive(Default)]
struct MemoryState {
    users: Vec<User>,
    incomes: HashMap<String, Income>,
    expenses: HashMap<String, Expense>,
}

#[derive(Clone, Default)]
pub struct InMemoryConnection {
    state: Arc<RwLock<MemoryState>>,
}

impl InMemoryConnection {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Connection for InMemoryConnection {
    type UserRepository = InMemoryRepository;
    type IncomeRepository = InMemoryRepository;
    type ExpenseRepository = InMemoryRepository;

    fn create_user_repository(&self) -> Self::UserRepository {
        InMemoryRepository { state: self.state.clone() }
    }

    fn create_income_repository(&self) -> Self::IncomeRepository {
        InMemoryRepository { state: self.state.clone() }
    }

    fn create_expense_repository(&self) -> Self::ExpenseRepository {
        InMemoryRepository { state: self.state.clone() }
    }
}

/// One repository type serves every storage trait over the shared state
#[derive(Clone)]
pub struct InMemoryRepository {
    state: Arc<RwLock<MemoryState>>,
}

#[async_trait]
impl UserStorage for InMemoryRepository {
    async fn store_user(&self, user: &User) -> Result<()> {
        let mut state = self.state.write().await;
        if state.users.iter().any(|u| u.id == user.id) {
            bail!("User {} already exists", user.id);
        }
        state.users.push(user.clone());
        Ok(())
    }

    async fn get_user(&self, user_id: &str) -> Result<Option<User>> {
        let state = self.state.read().await;
        Ok(state.users.iter().find(|u| u.id == user_id).cloned())
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        let state = self.state.read().await;
        // insertion order reversed keeps same-instant users newest first
        let mut users: Vec<User> = state.users.iter().rev().cloned().collect();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(users)
    }
}

#[async_trait]
impl IncomeStorage for InMemoryRepository {
    async fn store_income(&self, income: &Income) -> Result<Income> {
        let mut state = self.state.write().await;
        let existing = state
            .incomes
            .values()
            .find(|i| i.user_id == income.user_id && i.month == income.month)
            .map(|i| (i.id.clone(), i.created_at));

        let mut stored = income.clone();
        if let Some((id, created_at)) = existing {
            stored.id = id;
            stored.created_at = created_at;
        }
        state.incomes.insert(stored.id.clone(), stored.clone());
        Ok(stored)
    }

    async fn get_income(&self, income_id: &str) -> Result<Option<Income>> {
        let state = self.state.read().await;
        Ok(state.incomes.get(income_id).cloned())
    }

    async fn get_income_for_month(&self, user_id: &str, month: MonthKey) -> Result<Option<Income>> {
        let state = self.state.read().await;
        Ok(state
            .incomes
            .values()
            .find(|i| i.user_id == user_id && i.month == month)
            .cloned())
    }

    async fn list_incomes(&self, user_id: &str) -> Result<Vec<Income>> {
        let state = self.state.read().await;
        let mut incomes: Vec<Income> = state
            .incomes
            .values()
            .filter(|i| i.user_id == user_id)
            .cloned()
            .collect();
        incomes.sort_by(|a, b| b.month.cmp(&a.month));
        Ok(incomes)
    }

    async fn update_income(&self, income: &Income) -> Result<()> {
        let mut state = self.state.write().await;
        if let Some(stored) = state.incomes.get_mut(&income.id) {
            stored.month_name = income.month_name.clone();
            stored.salary = income.salary;
            stored.updated_at = income.updated_at;
        }
        Ok(())
    }

    async fn delete_income(&self, income_id: &str) -> Result<bool> {
        let mut state = self.state.write().await;
        Ok(state.incomes.remove(income_id).is_some())
    }
}

#[async_trait]
impl ExpenseStorage for InMemoryRepository {
    async fn store_expense(&self, expense: &Expense) -> Result<Expense> {
        let mut state = self.state.write().await;
        let existing = state
            .expenses
            .values()
            .find(|e| e.user_id == expense.user_id && e.month == expense.month)
            .map(|e| (e.id.clone(), e.created_at));

        let mut stored = expense.clone();
        if let Some((id, created_at)) = existing {
            stored.assign_id(id);
            stored.created_at = created_at;
        }
        state.expenses.insert(stored.id.clone(), stored.clone());
        Ok(stored)
    }

    async fn get_expense(&self, expense_id: &str) -> Result<Option<Expense>> {
        let state = self.state.read().await;
        Ok(state.expenses.get(expense_id).cloned())
    }

    async fn get_expense_for_month(&self, user_id: &str, month: MonthKey) -> Result<Option<Expense>> {
        let state = self.state.read().await;
        Ok(state
            .expenses
            .values()
            .find(|e| e.user_id == user_id && e.month == month)
            .cloned())
    }

    async fn list_expenses(&self, user_id: &str) -> Result<Vec<Expense>> {
        let state = self.state.read().await;
        let mut expenses: Vec<Expense> = state
            .expenses
            .values()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect();
        expenses.sort_by(|a, b| b.month.cmp(&a.month));
        Ok(expenses)
    }

    async fn update_expense(&self, expense: &Expense) -> Result<bool> {
        let mut state = self.state.write().await;
        match state.expenses.get_mut(&expense.id) {
            Some(stored) => {
                stored.month_name = expense.month_name.clone();
                stored.set_items(expense.items.clone());
                stored.updated_at = expense.updated_at;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_expense(&self, expense_id: &str) -> Result<bool> {
        let mut state = self.state.write().await;
        Ok(state.expenses.remove(expense_id).is_some())
    }

    async fn store_expense_items(&self, items: &[ExpenseItem]) -> Result<()> {
        let Some(first) = items.first() else {
            return Ok(());
        };
        if items.iter().any(|item| item.expense_id != first.expense_id) {
            bail!("Items belong to more than one expense");
        }

        let mut state = self.state.write().await;
        match state.expenses.get_mut(&first.expense_id) {
            Some(expense) => {
                let mut all = expense.items.clone();
                all.extend_from_slice(items);
                expense.set_items(all);
                expense.updated_at = Utc::now();
                Ok(())
            }
            None => bail!("Expense {} does not exist", first.expense_id),
        }
    }

    async fn replace_expense_items(&self, expense_id: &str, items: &[ExpenseItem]) -> Result<()> {
        let mut state = self.state.write().await;
        match state.expenses.get_mut(expense_id) {
            Some(expense) => {
                expense.set_items(items.to_vec());
                expense.updated_at = Utc::now();
                Ok(())
            }
            None => bail!("Expense {} does not exist", expense_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ExpenseCategory;

    #[tokio::test]
    async fn test_one_income_per_month() {
        let repo = InMemoryConnection::new().create_income_repository();
        let month = MonthKey::new(2024, 8).unwrap();
        let first = Income::new("u1", month, month.display_name(), 100.0);
        let second = Income::new("u1", month, month.display_name(), 200.0);
        let other_user = Income::new("u2", month, month.display_name(), 300.0);

        repo.store_income(&first).await.unwrap();
        let replaced = repo.store_income(&second).await.unwrap();
        assert_eq!(replaced.id, first.id);
        repo.store_income(&other_user).await.unwrap();

        let listed = repo.list_incomes("u1").await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].salary, 200.0);
    }

    #[tokio::test]
    async fn test_item_batches_keep_total_in_sync() {
        let repo = InMemoryConnection::new().create_expense_repository();
        let month = MonthKey::new(2024, 8).unwrap();
        let expense = Expense::new("u1", month, month.display_name());
        repo.store_expense(&expense).await.unwrap();

        let rent = ExpenseItem::new(&expense.id, "Rent".to_string(), 50.0, ExpenseCategory::Spending);
        repo.replace_expense_items(&expense.id, &[rent]).await.unwrap();
        let savings = ExpenseItem::new(&expense.id, "Savings".to_string(), 5.0, ExpenseCategory::Savings);
        repo.store_expense_items(&[savings]).await.unwrap();

        let stored = repo.get_expense(&expense.id).await.unwrap().unwrap();
        assert_eq!(stored.items.len(), 2);
        assert_eq!(stored.total_expenses, 55.0);
    }

    #[tokio::test]
    async fn test_replace_items_on_missing_expense_fails() {
        let repo = InMemoryConnection::new().create_expense_repository();
        let item = ExpenseItem::new("missing", "Food".to_string(), 1.0, ExpenseCategory::Spending);
        assert!(repo.replace_expense_items("missing", &[item.clone()]).await.is_err());
        assert!(repo.store_expense_items(&[item]).await.is_err());
    }
}
