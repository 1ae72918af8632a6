use crate::domain::commands::incomes::{CreateIncomeCommand, SaveIncomeResult, UpdateIncomeCommand};
use crate::domain::models::income::Income as DomainIncome;
use shared::{
    format_rupiah, CreateIncomeRequest, Income as SharedIncome, IncomeListResponse, IncomeResponse,
    UpdateIncomeRequest,
};

pub struct IncomeMapper;

impl IncomeMapper {
    pub fn to_dto(domain: DomainIncome) -> SharedIncome {
        SharedIncome {
            id: domain.id,
            user_id: domain.user_id,
            month: domain.month,
            month_name: domain.month_name,
            salary: domain.salary,
            created_at: domain.created_at.to_rfc3339(),
            updated_at: domain.updated_at.to_rfc3339(),
        }
    }

    pub fn to_create_command(user_id: String, request: CreateIncomeRequest) -> CreateIncomeCommand {
        CreateIncomeCommand {
            user_id,
            month: request.month,
            month_name: request.month_name,
            salary: request.salary,
        }
    }

    pub fn to_update_command(income_id: String, request: UpdateIncomeRequest) -> UpdateIncomeCommand {
        UpdateIncomeCommand {
            income_id,
            salary: request.salary,
            month_name: request.month_name,
        }
    }

    pub fn to_save_response(result: SaveIncomeResult) -> IncomeResponse {
        let verb = if result.replaced { "updated" } else { "saved" };
        let success_message = format!(
            "Income for {} {}: {}",
            result.income.month_name,
            verb,
            format_rupiah(result.income.salary)
        );
        IncomeResponse {
            income: Self::to_dto(result.income),
            replaced: result.replaced,
            success_message,
        }
    }

    pub fn to_update_response(domain: DomainIncome) -> IncomeResponse {
        Self::to_save_response(SaveIncomeResult { income: domain, replaced: true })
    }

    pub fn to_list_response(incomes: Vec<DomainIncome>) -> IncomeListResponse {
        IncomeListResponse {
            incomes: incomes.into_iter().map(Self::to_dto).collect(),
        }
    }
}
