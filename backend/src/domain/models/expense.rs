//! Domain model for a month's expenses and their line items.
use chrono::{DateTime, Utc};
use shared::{ExpenseCategory, MonthKey};

#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseItem {
    pub id: String,
    pub expense_id: String,
    pub label: String,
    pub amount: f64,
    pub category: ExpenseCategory,
}

impl ExpenseItem {
    pub fn new(expense_id: &str, label: String, amount: f64, category: ExpenseCategory) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            expense_id: expense_id.to_string(),
            label,
            amount,
            category,
        }
    }
}

/// Expenses recorded for one month.
///
/// `total_expenses` is derived from `items` and must be refreshed with
/// [`Expense::set_items`] whenever the items change.
#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    pub id: String,
    pub user_id: String,
    pub month: MonthKey,
    pub month_name: String,
    pub total_expenses: f64,
    pub items: Vec<ExpenseItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Expense {
    pub fn new(user_id: &str, month: MonthKey, month_name: String) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            month,
            month_name,
            total_expenses: 0.0,
            items: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn set_items(&mut self, items: Vec<ExpenseItem>) {
        self.total_expenses = items.iter().map(|item| item.amount).sum();
        self.items = items;
    }

    /// Re-key the expense and every item to `id`
    pub fn assign_id(&mut self, id: String) {
        for item in &mut self.items {
            item.expense_id = id.clone();
        }
        self.id = id;
    }

    /// Sum of the items tagged as savings
    pub fn savings_total(&self) -> f64 {
        self.items
            .iter()
            .filter(|item| item.category == ExpenseCategory::Savings)
            .map(|item| item.amount)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_items_recomputes_total() {
        let month = MonthKey::new(2024, 8).unwrap();
        let mut expense = Expense::new("user-1", month, month.display_name());
        assert_eq!(expense.total_expenses, 0.0);

        let items = vec![
            ExpenseItem::new(&expense.id, "Food".to_string(), 1_200_000.0, ExpenseCategory::Spending),
            ExpenseItem::new(&expense.id, "Savings".to_string(), 800_000.0, ExpenseCategory::Savings),
        ];
        expense.set_items(items);

        assert_eq!(expense.total_expenses, 2_000_000.0);
        assert_eq!(expense.savings_total(), 800_000.0);

        expense.set_items(vec![]);
        assert_eq!(expense.total_expenses, 0.0);
        assert_eq!(expense.savings_total(), 0.0);
    }
}
