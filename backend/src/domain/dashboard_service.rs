use anyhow::Result;
use tracing::info;

use crate::domain::commands::dashboard::{DashboardQuery, DashboardResult};
use crate::domain::errors::FinanceError;
use crate::domain::{AnalyticsService, BalanceService};
use crate::storage::{Connection, ExpenseStorage, IncomeStorage, UserStorage};

/// Builds every derived view of one user's ledger from the full record set
#[derive(Clone)]
pub struct DashboardService<C: Connection> {
    user_repository: C::UserRepository,
    income_repository: C::IncomeRepository,
    expense_repository: C::ExpenseRepository,
    balance_service: BalanceService,
    analytics_service: AnalyticsService,
}

impl<C: Connection> DashboardService<C> {
    pub fn new(connection: &C) -> Self {
        Self {
            user_repository: connection.create_user_repository(),
            income_repository: connection.create_income_repository(),
            expense_repository: connection.create_expense_repository(),
            balance_service: BalanceService::new(),
            analytics_service: AnalyticsService::new(),
        }
    }

    pub async fn get_dashboard(&self, query: DashboardQuery) -> Result<DashboardResult> {
        if self.user_repository.get_user(&query.user_id).await?.is_none() {
            return Err(FinanceError::user_not_found(&query.user_id).into());
        }

        let incomes = self.income_repository.list_incomes(&query.user_id).await?;
        let expenses = self.expense_repository.list_expenses(&query.user_id).await?;
        info!(
            "Building dashboard for user {} from {} incomes and {} expenses",
            query.user_id,
            incomes.len(),
            expenses.len()
        );

        Ok(DashboardResult {
            summary: self.balance_service.summary(&incomes, &expenses),
            monthly_balances: self
                .balance_service
                .monthly_balances(&incomes, &expenses, query.carry_over),
            analytics: self.analytics_service.analyze(&expenses),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::expenses::{CreateExpenseCommand, ExpenseItemCommand};
    use crate::domain::commands::incomes::CreateIncomeCommand;
    use crate::domain::commands::users::CreateUserCommand;
    use crate::domain::{ExpenseService, IncomeService, UserService};
    use crate::storage::SqliteConnection;
    use shared::{ExpenseCategory, MonthKey};

    struct Fixture {
        dashboard: DashboardService<SqliteConnection>,
        incomes: IncomeService<SqliteConnection>,
        expenses: ExpenseService<SqliteConnection>,
        user_id: String,
    }

    async fn setup_test() -> Fixture {
        let db = SqliteConnection::init_test().await.expect("Failed to create test database");
        let user = UserService::new(&db)
            .create_user(CreateUserCommand { name: "Test".to_string() })
            .await
            .expect("Failed to create user");
        Fixture {
            dashboard: DashboardService::new(&db),
            incomes: IncomeService::new(&db),
            expenses: ExpenseService::new(&db),
            user_id: user.id,
        }
    }

    fn query(user_id: &str) -> DashboardQuery {
        DashboardQuery { user_id: user_id.to_string(), carry_over: false }
    }

    fn august() -> MonthKey {
        MonthKey::new(2024, 8).unwrap()
    }

    #[tokio::test]
    async fn test_empty_ledger() {
        let fixture = setup_test().await;
        let result = fixture.dashboard.get_dashboard(query(&fixture.user_id)).await.unwrap();

        assert!(result.monthly_balances.is_empty());
        assert!(result.analytics.is_none());
        assert_eq!(result.summary.month_count, 0);
    }

    #[tokio::test]
    async fn test_income_and_expense_for_one_month() {
        let fixture = setup_test().await;
        fixture
            .incomes
            .create_income(CreateIncomeCommand {
                user_id: fixture.user_id.clone(),
                month: august(),
                month_name: None,
                salary: 5_000_000.0,
            })
            .await
            .unwrap();
        let expense = fixture
            .expenses
            .create_expense(CreateExpenseCommand {
                user_id: fixture.user_id.clone(),
                month: august(),
                month_name: None,
                items: vec![
                    ExpenseItemCommand { label: "Food".to_string(), amount: 1_200_000.0, category: ExpenseCategory::Spending },
                    ExpenseItemCommand { label: "Savings".to_string(), amount: 800_000.0, category: ExpenseCategory::Savings },
                ],
            })
            .await
            .unwrap();

        let result = fixture.dashboard.get_dashboard(query(&fixture.user_id)).await.unwrap();
        assert_eq!(result.monthly_balances.len(), 1);
        let month = &result.monthly_balances[0];
        assert_eq!(month.total_expenses, 2_000_000.0);
        assert_eq!(month.balance, 3_000_000.0);
        assert_eq!(month.savings, 800_000.0);
        assert_eq!(result.summary.total_savings, 800_000.0);
        assert!(result.analytics.is_some());

        // removing the expense leaves a salary-only month
        fixture.expenses.delete_expense(&expense.expense.id).await.unwrap();
        let result = fixture.dashboard.get_dashboard(query(&fixture.user_id)).await.unwrap();
        assert_eq!(result.monthly_balances.len(), 1);
        assert_eq!(result.monthly_balances[0].balance, 5_000_000.0);
        assert!(result.monthly_balances[0].items.is_empty());
        assert!(result.analytics.is_none());
    }

    #[tokio::test]
    async fn test_deleting_only_record_removes_month() {
        let fixture = setup_test().await;
        let expense = fixture
            .expenses
            .create_expense(CreateExpenseCommand {
                user_id: fixture.user_id.clone(),
                month: august(),
                month_name: None,
                items: vec![ExpenseItemCommand { label: "Food".to_string(), amount: 10.0, category: ExpenseCategory::Spending }],
            })
            .await
            .unwrap();

        fixture.expenses.delete_expense(&expense.expense.id).await.unwrap();
        let result = fixture.dashboard.get_dashboard(query(&fixture.user_id)).await.unwrap();
        assert!(result.monthly_balances.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_user() {
        let fixture = setup_test().await;
        let err = fixture.dashboard.get_dashboard(query("ghost")).await.unwrap_err();
        assert!(matches!(err.downcast_ref::<FinanceError>(), Some(FinanceError::NotFound { .. })));
    }
}
