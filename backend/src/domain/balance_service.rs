//! Monthly balance aggregation.
//!
//! Joins a user's incomes and expenses by month. A month appears when it has
//! an income, an expense, or both; the missing side counts as zero. With
//! carry-over enabled, each month opens with the previous month's closing
//! balance when that balance is positive. Deficits are not carried.

use shared::{FinanceSummary, MonthKey};
use std::collections::BTreeMap;

use crate::domain::models::balance::MonthlyBalance;
use crate::domain::models::expense::Expense;
use crate::domain::models::income::Income;

#[derive(Clone, Default)]
pub struct BalanceService;

impl BalanceService {
    pub fn new() -> Self {
        Self
    }

    /// One entry per recorded month, newest first
    pub fn monthly_balances(
        &self,
        incomes: &[Income],
        expenses: &[Expense],
        with_carry_over: bool,
    ) -> Vec<MonthlyBalance> {
        let mut months: BTreeMap<MonthKey, (Option<&Income>, Option<&Expense>)> = BTreeMap::new();
        for income in incomes {
            months.entry(income.month).or_default().0 = Some(income);
        }
        for expense in expenses {
            months.entry(expense.month).or_default().1 = Some(expense);
        }

        let mut balances = Vec::with_capacity(months.len());
        let mut previous_closing: f64 = 0.0;

        for (month, (income, expense)) in months {
            let salary = income.map_or(0.0, |i| i.salary);
            let total_expenses = expense.map_or(0.0, |e| e.total_expenses);
            let carry_over = if with_carry_over { previous_closing.max(0.0) } else { 0.0 };
            let closing_balance = salary + carry_over - total_expenses;

            let month_name = income
                .map(|i| i.month_name.clone())
                .or_else(|| expense.map(|e| e.month_name.clone()))
                .unwrap_or_else(|| month.display_name());

            balances.push(MonthlyBalance {
                month,
                month_name,
                income_id: income.map(|i| i.id.clone()),
                expense_id: expense.map(|e| e.id.clone()),
                income: salary,
                total_expenses,
                balance: salary - total_expenses,
                savings: expense.map_or(0.0, Expense::savings_total),
                carry_over,
                closing_balance,
                items: expense.map(|e| e.items.clone()).unwrap_or_default(),
            });

            previous_closing = closing_balance;
        }

        balances.reverse();
        balances
    }

    pub fn summary(&self, incomes: &[Income], expenses: &[Expense]) -> FinanceSummary {
        let total_income: f64 = incomes.iter().map(|i| i.salary).sum();
        let total_expenses: f64 = expenses.iter().map(|e| e.total_expenses).sum();
        let total_savings: f64 = expenses.iter().map(Expense::savings_total).sum();

        let average_expenses = if expenses.is_empty() {
            0.0
        } else {
            total_expenses / expenses.len() as f64
        };

        let mut months: Vec<MonthKey> = incomes
            .iter()
            .map(|i| i.month)
            .chain(expenses.iter().map(|e| e.month))
            .collect();
        months.sort();
        months.dedup();

        FinanceSummary {
            total_income,
            total_expenses,
            total_savings,
            balance: total_income - total_expenses,
            average_expenses,
            month_count: months.len(),
        }
    }
}
