//! Domain-level command and query types.
//!
//! Services take these instead of the wire DTOs from the `shared` crate; the
//! REST layer maps one to the other.

pub mod users {
    #[derive(Debug, Clone)]
    pub struct CreateUserCommand {
        pub name: String,
    }
}

pub mod incomes {
    use crate::domain::models::income::Income;
    use shared::MonthKey;

    #[derive(Debug, Clone)]
    pub struct CreateIncomeCommand {
        pub user_id: String,
        pub month: MonthKey,
        pub month_name: Option<String>,
        pub salary: f64,
    }

    /// Fields left as `None` keep their stored value.
    #[derive(Debug, Clone)]
    pub struct UpdateIncomeCommand {
        pub income_id: String,
        pub salary: Option<f64>,
        pub month_name: Option<String>,
    }

    #[derive(Debug, Clone)]
    pub struct SaveIncomeResult {
        pub income: Income,
        /// An income already existed for the month and was overwritten
        pub replaced: bool,
    }
}

pub mod expenses {
    use crate::domain::models::expense::Expense;
    use shared::{ExpenseCategory, MonthKey};

    #[derive(Debug, Clone)]
    pub struct ExpenseItemCommand {
        pub label: String,
        pub amount: f64,
        pub category: ExpenseCategory,
    }

    #[derive(Debug, Clone)]
    pub struct CreateExpenseCommand {
        pub user_id: String,
        pub month: MonthKey,
        pub month_name: Option<String>,
        pub items: Vec<ExpenseItemCommand>,
    }

    /// Replaces every item of the expense.
    #[derive(Debug, Clone)]
    pub struct UpdateExpenseCommand {
        pub expense_id: String,
        pub month_name: Option<String>,
        pub items: Vec<ExpenseItemCommand>,
    }

    #[derive(Debug, Clone)]
    pub struct SaveExpenseResult {
        pub expense: Expense,
        pub replaced: bool,
    }
}

pub mod dashboard {
    use crate::domain::models::balance::MonthlyBalance;
    use shared::{ExpenseAnalytics, FinanceSummary};

    #[derive(Debug, Clone)]
    pub struct DashboardQuery {
        pub user_id: String,
        pub carry_over: bool,
    }

    #[derive(Debug, Clone)]
    pub struct DashboardResult {
        pub summary: FinanceSummary,
        pub monthly_balances: Vec<MonthlyBalance>,
        pub analytics: Option<ExpenseAnalytics>,
    }
}
