pub mod forms;
pub mod notification;
pub mod user_selector;
pub mod summary_cards;
pub mod expense_analytics;
pub mod monthly_balance;
pub mod edit_income_dialog;
pub mod edit_expense_dialog;

pub use edit_expense_dialog::EditExpenseDialog;
pub use edit_income_dialog::EditIncomeDialog;
pub use expense_analytics::ExpenseAnalyticsView;
pub use forms::{ExpenseForm, IncomeForm};
pub use monthly_balance::MonthlyBalanceList;
pub use notification::NotificationToast;
pub use summary_cards::SummaryCards;
pub use user_selector::UserSelector;
