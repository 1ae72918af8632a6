//! Per-month aggregate produced by the balance calculation.
use shared::MonthKey;

use super::expense::ExpenseItem;

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyBalance {
    pub month: MonthKey,
    pub month_name: String,
    pub income_id: Option<String>,
    pub expense_id: Option<String>,
    pub income: f64,
    pub total_expenses: f64,
    pub balance: f64,
    pub savings: f64,
    pub carry_over: f64,
    pub closing_balance: f64,
    pub items: Vec<ExpenseItem>,
}
