pub mod month_picker;
pub mod expense_rows;
pub mod income_form;
pub mod expense_form;

pub use expense_form::ExpenseForm;
pub use expense_rows::ExpenseRowsEditor;
pub use income_form::IncomeForm;
