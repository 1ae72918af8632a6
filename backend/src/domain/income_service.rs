use anyhow::Result;
use chrono::Utc;
use tracing::info;

use crate::domain::commands::incomes::{CreateIncomeCommand, SaveIncomeResult, UpdateIncomeCommand};
use crate::domain::errors::FinanceError;
use crate::domain::models::income::Income;
use crate::storage::{Connection, IncomeStorage, UserStorage};

/// Service for monthly incomes.
///
/// Creating an income for a month that already has one overwrites it, so a
/// user never ends up with two incomes for the same month.
#[derive(Clone)]
pub struct IncomeService<C: Connection> {
    user_repository: C::UserRepository,
    income_repository: C::IncomeRepository,
}

impl<C: Connection> IncomeService<C> {
    pub fn new(connection: &C) -> Self {
        Self {
            user_repository: connection.create_user_repository(),
            income_repository: connection.create_income_repository(),
        }
    }

    pub async fn create_income(&self, command: CreateIncomeCommand) -> Result<SaveIncomeResult> {
        info!("Creating income for user {} month {}", command.user_id, command.month);

        let salary = shared::validate_amount(command.salary).map_err(FinanceError::from)?;
        let month_name = match &command.month_name {
            Some(name) => shared::validate_name(name).map_err(FinanceError::from)?,
            None => command.month.display_name(),
        };

        if self.user_repository.get_user(&command.user_id).await?.is_none() {
            return Err(FinanceError::user_not_found(&command.user_id).into());
        }

        let income = Income::new(&command.user_id, command.month, month_name, salary);
        let stored = self.income_repository.store_income(&income).await?;
        let replaced = stored.id != income.id;

        if replaced {
            info!("Replaced income {} for {}", stored.id, stored.month);
        } else {
            info!("Created income {} for {}", stored.id, stored.month);
        }
        Ok(SaveIncomeResult { income: stored, replaced })
    }

    pub async fn list_incomes(&self, user_id: &str) -> Result<Vec<Income>> {
        if self.user_repository.get_user(user_id).await?.is_none() {
            return Err(FinanceError::user_not_found(user_id).into());
        }
        self.income_repository.list_incomes(user_id).await
    }

    pub async fn update_income(&self, command: UpdateIncomeCommand) -> Result<Income> {
        info!("Updating income {}", command.income_id);

        let salary = command
            .salary
            .map(shared::validate_amount)
            .transpose()
            .map_err(FinanceError::from)?;
        let month_name = command
            .month_name
            .as_deref()
            .map(shared::validate_name)
            .transpose()
            .map_err(FinanceError::from)?;

        let mut income = self
            .income_repository
            .get_income(&command.income_id)
            .await?
            .ok_or_else(|| FinanceError::income_not_found(&command.income_id))?;

        if let Some(salary) = salary {
            income.salary = salary;
        }
        if let Some(month_name) = month_name {
            income.month_name = month_name;
        }
        income.updated_at = Utc::now();

        self.income_repository.update_income(&income).await?;
        Ok(income)
    }

    pub async fn delete_income(&self, income_id: &str) -> Result<()> {
        info!("Deleting income {}", income_id);

        if !self.income_repository.delete_income(income_id).await? {
            return Err(FinanceError::income_not_found(income_id).into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::users::CreateUserCommand;
    use crate::domain::UserService;
    use crate::storage::{InMemoryConnection, SqliteConnection};
    use shared::{MonthKey, ValidationError};

    async fn setup_test<C: Connection>(connection: C) -> (IncomeService<C>, String) {
        let user = UserService::new(&connection)
            .create_user(CreateUserCommand { name: "Test".to_string() })
            .await
            .expect("Failed to create user");
        (IncomeService::new(&connection), user.id)
    }

    fn august() -> MonthKey {
        MonthKey::new(2024, 8).unwrap()
    }

    fn create_command(user_id: &str, month: MonthKey, salary: f64) -> CreateIncomeCommand {
        CreateIncomeCommand {
            user_id: user_id.to_string(),
            month,
            month_name: None,
            salary,
        }
    }

    #[tokio::test]
    async fn test_create_income_defaults_month_name() {
        let (service, user_id) = setup_test(InMemoryConnection::new()).await;
        let result = service.create_income(create_command(&user_id, august(), 5_000_000.0)).await.unwrap();

        assert!(!result.replaced);
        assert_eq!(result.income.month_name, "August 2024");
        assert_eq!(result.income.salary, 5_000_000.0);
    }

    #[tokio::test]
    async fn test_second_income_for_month_replaces_first() {
        let db = SqliteConnection::init_test().await.expect("Failed to create test database");
        let (service, user_id) = setup_test(db).await;

        let first = service.create_income(create_command(&user_id, august(), 5_000_000.0)).await.unwrap();
        let second = service.create_income(create_command(&user_id, august(), 6_000_000.0)).await.unwrap();

        assert!(second.replaced);
        assert_eq!(second.income.id, first.income.id);

        let incomes = service.list_incomes(&user_id).await.unwrap();
        assert_eq!(incomes.len(), 1);
        assert_eq!(incomes[0].salary, 6_000_000.0);
    }

    #[tokio::test]
    async fn test_concurrent_creates_for_same_month_leave_one_income() {
        let db = SqliteConnection::init_test().await.expect("Failed to create test database");
        let (service, user_id) = setup_test(db).await;

        let (first, second) = tokio::join!(
            service.create_income(create_command(&user_id, august(), 1_000.0)),
            service.create_income(create_command(&user_id, august(), 2_000.0)),
        );
        let first = first.unwrap();
        let second = second.unwrap();

        assert_eq!(first.income.id, second.income.id);
        assert!(first.replaced != second.replaced);

        let incomes = service.list_incomes(&user_id).await.unwrap();
        assert_eq!(incomes.len(), 1);
        let winner = if first.replaced { &first.income } else { &second.income };
        assert_eq!(incomes[0].salary, winner.salary);
    }

    #[tokio::test]
    async fn test_invalid_salary_is_not_stored() {
        let (service, user_id) = setup_test(InMemoryConnection::new()).await;
        let err = service.create_income(create_command(&user_id, august(), 0.0)).await.unwrap_err();

        assert!(matches!(
            err.downcast_ref::<FinanceError>(),
            Some(FinanceError::Validation(ValidationError::AmountNotPositive))
        ));
        assert!(service.list_incomes(&user_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_income_for_unknown_user() {
        let (service, _) = setup_test(InMemoryConnection::new()).await;
        let err = service.create_income(create_command("ghost", august(), 1.0)).await.unwrap_err();
        assert!(matches!(err.downcast_ref::<FinanceError>(), Some(FinanceError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_update_and_delete_income() {
        let (service, user_id) = setup_test(InMemoryConnection::new()).await;
        let created = service.create_income(create_command(&user_id, august(), 100.0)).await.unwrap();

        let updated = service
            .update_income(UpdateIncomeCommand {
                income_id: created.income.id.clone(),
                salary: Some(250.0),
                month_name: Some("Agustus 2024".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(updated.salary, 250.0);
        assert_eq!(updated.month_name, "Agustus 2024");
        assert_eq!(updated.month, august());

        service.delete_income(&created.income.id).await.unwrap();
        assert!(service.list_incomes(&user_id).await.unwrap().is_empty());

        let err = service.delete_income(&created.income.id).await.unwrap_err();
        assert!(matches!(err.downcast_ref::<FinanceError>(), Some(FinanceError::NotFound { .. })));
    }
}
