use crate::domain::commands::expenses::{
    CreateExpenseCommand, ExpenseItemCommand, SaveExpenseResult, UpdateExpenseCommand,
};
use crate::domain::models::expense::{Expense as DomainExpense, ExpenseItem as DomainExpenseItem};
use shared::{
    format_rupiah, CreateExpenseRequest, Expense as SharedExpense, ExpenseItem as SharedExpenseItem,
    ExpenseItemInput, ExpenseListResponse, ExpenseResponse, UpdateExpenseRequest,
};

pub struct ExpenseMapper;

impl ExpenseMapper {
    pub fn to_item_dto(domain: DomainExpenseItem) -> SharedExpenseItem {
        SharedExpenseItem {
            id: domain.id,
            expense_id: domain.expense_id,
            label: domain.label,
            amount: domain.amount,
            category: domain.category,
        }
    }

    pub fn to_dto(domain: DomainExpense) -> SharedExpense {
        SharedExpense {
            id: domain.id,
            user_id: domain.user_id,
            month: domain.month,
            month_name: domain.month_name,
            total_expenses: domain.total_expenses,
            items: domain.items.into_iter().map(Self::to_item_dto).collect(),
            created_at: domain.created_at.to_rfc3339(),
            updated_at: domain.updated_at.to_rfc3339(),
        }
    }

    /// A missing category is suggested from the label
    fn to_item_command(input: ExpenseItemInput) -> ExpenseItemCommand {
        let category = input.resolved_category();
        ExpenseItemCommand {
            label: input.label,
            amount: input.amount,
            category,
        }
    }

    pub fn to_create_command(user_id: String, request: CreateExpenseRequest) -> CreateExpenseCommand {
        CreateExpenseCommand {
            user_id,
            month: request.month,
            month_name: request.month_name,
            items: request.items.into_iter().map(Self::to_item_command).collect(),
        }
    }

    pub fn to_update_command(expense_id: String, request: UpdateExpenseRequest) -> UpdateExpenseCommand {
        UpdateExpenseCommand {
            expense_id,
            month_name: request.month_name,
            items: request.items.into_iter().map(Self::to_item_command).collect(),
        }
    }

    pub fn to_save_response(result: SaveExpenseResult) -> ExpenseResponse {
        let verb = if result.replaced { "updated" } else { "saved" };
        let success_message = format!(
            "Expenses for {} {}: {}",
            result.expense.month_name,
            verb,
            format_rupiah(result.expense.total_expenses)
        );
        ExpenseResponse {
            expense: Self::to_dto(result.expense),
            replaced: result.replaced,
            success_message,
        }
    }

    pub fn to_update_response(domain: DomainExpense) -> ExpenseResponse {
        Self::to_save_response(SaveExpenseResult { expense: domain, replaced: true })
    }

    pub fn to_list_response(expenses: Vec<DomainExpense>) -> ExpenseListResponse {
        ExpenseListResponse {
            expenses: expenses.into_iter().map(Self::to_dto).collect(),
        }
    }
}
