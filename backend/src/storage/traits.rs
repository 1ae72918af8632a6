//! # Storage Traits
//!
//! Storage abstraction used by the domain services, so the SQLite store can be
//! swapped for the in-memory one (or anything else) without touching them.

use anyhow::Result;
use async_trait::async_trait;
use shared::MonthKey;

use crate::domain::models::expense::{Expense, ExpenseItem};
use crate::domain::models::income::Income;
use crate::domain::models::user::User;

#[async_trait]
pub trait UserStorage: Send + Sync {
    async fn store_user(&self, user: &User) -> Result<()>;

    async fn get_user(&self, user_id: &str) -> Result<Option<User>>;

    /// Newest first
    async fn list_users(&self) -> Result<Vec<User>>;
}

#[async_trait]
pub trait IncomeStorage: Send + Sync {
    /// Insert the income, or overwrite the user's existing income for the
    /// same month in one statement. Returns the row as stored, which keeps
    /// the existing id and `created_at` when one was overwritten.
    async fn store_income(&self, income: &Income) -> Result<Income>;

    async fn get_income(&self, income_id: &str) -> Result<Option<Income>>;

    async fn get_income_for_month(&self, user_id: &str, month: MonthKey) -> Result<Option<Income>>;

    /// Month descending
    async fn list_incomes(&self, user_id: &str) -> Result<Vec<Income>>;

    async fn update_income(&self, income: &Income) -> Result<()>;

    /// Returns true if the income existed
    async fn delete_income(&self, income_id: &str) -> Result<bool>;
}

#[async_trait]
pub trait ExpenseStorage: Send + Sync {
    /// Store the expense together with its items. When the user already has
    /// an expense for that month its header and items are replaced instead,
    /// all in one transaction. Returns the expense as stored, which keeps the
    /// existing id and `created_at` when one was replaced.
    async fn store_expense(&self, expense: &Expense) -> Result<Expense>;

    /// Expense with its items attached
    async fn get_expense(&self, expense_id: &str) -> Result<Option<Expense>>;

    async fn get_expense_for_month(&self, user_id: &str, month: MonthKey) -> Result<Option<Expense>>;

    /// Month descending, items attached
    async fn list_expenses(&self, user_id: &str) -> Result<Vec<Expense>>;

    /// Write the header fields (month name, total, updated_at) and replace the
    /// items in one transaction. Returns false if the expense does not exist
    async fn update_expense(&self, expense: &Expense) -> Result<bool>;

    /// Removes the expense and all of its items atomically.
    /// Returns true if the expense existed
    async fn delete_expense(&self, expense_id: &str) -> Result<bool>;

    /// Batch append: add `items` after the existing items of the expense
    /// named by the first item's `expense_id`, and add them to its total.
    /// Fails if that expense does not exist or the items span several expenses
    async fn store_expense_items(&self, items: &[ExpenseItem]) -> Result<()>;

    /// Delete every item of the expense, insert `items` and recompute the
    /// total, atomically. Fails if the expense does not exist
    async fn replace_expense_items(&self, expense_id: &str, items: &[ExpenseItem]) -> Result<()>;
}

/// Hands out the repositories backing one store
pub trait Connection: Send + Sync + Clone + 'static {
    type UserRepository: UserStorage + Clone;
    type IncomeRepository: IncomeStorage + Clone;
    type ExpenseRepository: ExpenseStorage + Clone;

    fn create_user_repository(&self) -> Self::UserRepository;

    fn create_income_repository(&self) -> Self::IncomeRepository;

    fn create_expense_repository(&self) -> Self::ExpenseRepository;
}
