use super::ExpenseMapper;
use crate::domain::commands::dashboard::DashboardResult;
use crate::domain::models::balance::MonthlyBalance as DomainMonthlyBalance;
use shared::{DashboardResponse, MonthlyBalance as SharedMonthlyBalance};

pub struct DashboardMapper;

impl DashboardMapper {
    pub fn to_balance_dto(domain: DomainMonthlyBalance) -> SharedMonthlyBalance {
        SharedMonthlyBalance {
            month: domain.month,
            month_name: domain.month_name,
            income_id: domain.income_id,
            expense_id: domain.expense_id,
            income: domain.income,
            total_expenses: domain.total_expenses,
            balance: domain.balance,
            savings: domain.savings,
            carry_over: domain.carry_over,
            closing_balance: domain.closing_balance,
            items: domain.items.into_iter().map(ExpenseMapper::to_item_dto).collect(),
        }
    }

    pub fn to_response(result: DashboardResult) -> DashboardResponse {
        DashboardResponse {
            summary: result.summary,
            monthly_balances: result
                .monthly_balances
                .into_iter()
                .map(Self::to_balance_dto)
                .collect(),
            analytics: result.analytics,
        }
    }
}
