//! # Domain Module
//!
//! Business logic of the finance tracker: users, monthly incomes, monthly
//! expenses with line items, and the aggregations built on top of them.
//!
//! ## Module Organization
//!
//! - **user_service / income_service / expense_service**: validated CRUD over
//!   the storage traits. Income and expense creation replaces any existing
//!   record for the same month.
//! - **balance_service**: per-month balance, savings and carry-over, plus the
//!   overall summary.
//! - **analytics_service**: top categories, monthly trend and suggestions.
//! - **dashboard_service**: runs both aggregations over one user's records.
//!
//! ## Business Rules
//!
//! - One income and one expense per user per month
//! - An expense total is always the sum of its items
//! - Savings are the items tagged `Savings`, counted inside the expense total
//! - Percentage changes against a zero base are reported as 0%

pub mod errors;
pub mod commands;
pub mod models;
pub mod user_service;
pub mod income_service;
pub mod expense_service;
pub mod balance_service;
pub mod analytics_service;
pub mod dashboard_service;

pub use errors::FinanceError;
pub use user_service::UserService;
pub use income_service::IncomeService;
pub use expense_service::ExpenseService;
pub use balance_service::BalanceService;
pub use analytics_service::AnalyticsService;
pub use dashboard_service::DashboardService;
