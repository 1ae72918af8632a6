use anyhow::Result;
use chrono::Utc;
use shared::ValidationError;
use tracing::info;

use crate::domain::commands::expenses::{
    CreateExpenseCommand, ExpenseItemCommand, SaveExpenseResult, UpdateExpenseCommand,
};
use crate::domain::errors::FinanceError;
use crate::domain::models::expense::{Expense, ExpenseItem};
use crate::storage::{Connection, ExpenseStorage, UserStorage};

/// Service for monthly expenses and their items.
///
/// The stored total is always recomputed from the items; no caller can set
/// it directly.
#[derive(Clone)]
pub struct ExpenseService<C: Connection> {
    user_repository: C::UserRepository,
    expense_repository: C::ExpenseRepository,
}

impl<C: Connection> ExpenseService<C> {
    pub fn new(connection: &C) -> Self {
        Self {
            user_repository: connection.create_user_repository(),
            expense_repository: connection.create_expense_repository(),
        }
    }

    pub async fn create_expense(&self, command: CreateExpenseCommand) -> Result<SaveExpenseResult> {
        info!(
            "Creating expense for user {} month {} with {} items",
            command.user_id,
            command.month,
            command.items.len()
        );

        Self::validate_items(&command.items)?;
        let month_name = match &command.month_name {
            Some(name) => shared::validate_name(name).map_err(FinanceError::from)?,
            None => command.month.display_name(),
        };

        if self.user_repository.get_user(&command.user_id).await?.is_none() {
            return Err(FinanceError::user_not_found(&command.user_id).into());
        }

        let mut expense = Expense::new(&command.user_id, command.month, month_name);
        expense.set_items(Self::build_items(&expense.id, command.items));

        let stored = self.expense_repository.store_expense(&expense).await?;
        let replaced = stored.id != expense.id;

        if replaced {
            info!("Replaced expense {} for {}, total {}", stored.id, stored.month, stored.total_expenses);
        } else {
            info!("Created expense {} for {}, total {}", stored.id, stored.month, stored.total_expenses);
        }
        Ok(SaveExpenseResult { expense: stored, replaced })
    }

    pub async fn list_expenses(&self, user_id: &str) -> Result<Vec<Expense>> {
        if self.user_repository.get_user(user_id).await?.is_none() {
            return Err(FinanceError::user_not_found(user_id).into());
        }
        self.expense_repository.list_expenses(user_id).await
    }

    /// Replace the items (and optionally the month name) of an expense
    pub async fn update_expense(&self, command: UpdateExpenseCommand) -> Result<Expense> {
        info!("Updating expense {} with {} items", command.expense_id, command.items.len());

        Self::validate_items(&command.items)?;
        let month_name = command
            .month_name
            .as_deref()
            .map(shared::validate_name)
            .transpose()
            .map_err(FinanceError::from)?;

        let mut expense = self
            .expense_repository
            .get_expense(&command.expense_id)
            .await?
            .ok_or_else(|| FinanceError::expense_not_found(&command.expense_id))?;

        if let Some(month_name) = month_name {
            expense.month_name = month_name;
        }
        expense.set_items(Self::build_items(&expense.id, command.items));
        expense.updated_at = Utc::now();

        if !self.expense_repository.update_expense(&expense).await? {
            return Err(FinanceError::expense_not_found(&expense.id).into());
        }
        Ok(expense)
    }

    pub async fn delete_expense(&self, expense_id: &str) -> Result<()> {
        info!("Deleting expense {} and its items", expense_id);

        if !self.expense_repository.delete_expense(expense_id).await? {
            return Err(FinanceError::expense_not_found(expense_id).into());
        }
        Ok(())
    }

    fn validate_items(items: &[ExpenseItemCommand]) -> Result<()> {
        if items.is_empty() {
            return Err(FinanceError::from(ValidationError::NoExpenseItems).into());
        }

        for item in items {
            let label = item.label.trim();
            if label.is_empty() {
                return Err(FinanceError::from(ValidationError::EmptyLabel).into());
            }
            if label.chars().count() > shared::MAX_NAME_LENGTH {
                return Err(FinanceError::from(ValidationError::LabelTooLong(shared::MAX_NAME_LENGTH)).into());
            }
            shared::validate_amount(item.amount).map_err(FinanceError::from)?;
        }
        Ok(())
    }

    fn build_items(expense_id: &str, items: Vec<ExpenseItemCommand>) -> Vec<ExpenseItem> {
        items
            .into_iter()
            .map(|item| ExpenseItem::new(expense_id, item.label.trim().to_string(), item.amount, item.category))
            .collect()
    }
}
