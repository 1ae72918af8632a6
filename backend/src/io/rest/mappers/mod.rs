//! Conversions between domain models and the wire DTOs in `shared`.

pub mod user_mapper;
pub mod income_mapper;
pub mod expense_mapper;
pub mod dashboard_mapper;

pub use user_mapper::UserMapper;
pub use income_mapper::IncomeMapper;
pub use expense_mapper::ExpenseMapper;
pub use dashboard_mapper::DashboardMapper;
