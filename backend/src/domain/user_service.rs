use anyhow::Result;
use tracing::{info, warn};

use crate::domain::commands::users::CreateUserCommand;
use crate::domain::errors::FinanceError;
use crate::domain::models::user::User;
use crate::storage::{Connection, UserStorage};

/// Service for managing ledger owners
#[derive(Clone)]
pub struct UserService<C: Connection> {
    user_repository: C::UserRepository,
}

impl<C: Connection> UserService<C> {
    pub fn new(connection: &C) -> Self {
        Self {
            user_repository: connection.create_user_repository(),
        }
    }

    pub async fn create_user(&self, command: CreateUserCommand) -> Result<User> {
        info!("Creating user: name={}", command.name);

        let name = shared::validate_name(&command.name).map_err(FinanceError::from)?;
        let user = User::new(name);
        self.user_repository.store_user(&user).await?;

        info!("Created user {} with ID {}", user.name, user.id);
        Ok(user)
    }

    pub async fn get_user(&self, user_id: &str) -> Result<Option<User>> {
        let user = self.user_repository.get_user(user_id).await?;
        if user.is_none() {
            warn!("User not found: {}", user_id);
        }
        Ok(user)
    }

    /// Like `get_user`, but a missing user is a `NotFound` error
    pub async fn require_user(&self, user_id: &str) -> Result<User> {
        self.get_user(user_id)
            .await?
            .ok_or_else(|| FinanceError::user_not_found(user_id).into())
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        let users = self.user_repository.list_users().await?;
        info!("Found {} users", users.len());
        Ok(users)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryConnection;
    use shared::ValidationError;

    fn setup_test() -> UserService<InMemoryConnection> {
        UserService::new(&InMemoryConnection::new())
    }

    #[tokio::test]
    async fn test_create_user_trims_name() {
        let service = setup_test();
        let user = service
            .create_user(CreateUserCommand { name: "  Ilham  ".to_string() })
            .await
            .expect("Failed to create user");

        assert_eq!(user.name, "Ilham");
        let fetched = service.get_user(&user.id).await.unwrap().unwrap();
        assert_eq!(fetched, user);
    }

    #[tokio::test]
    async fn test_create_user_rejects_blank_name() {
        let service = setup_test();
        let err = service
            .create_user(CreateUserCommand { name: "   ".to_string() })
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<FinanceError>(),
            Some(FinanceError::Validation(ValidationError::EmptyName))
        ));
        assert!(service.list_users().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_require_user_not_found() {
        let service = setup_test();
        let err = service.require_user("nobody").await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<FinanceError>(),
            Some(FinanceError::NotFound { entity: "User", .. })
        ));
    }
}
