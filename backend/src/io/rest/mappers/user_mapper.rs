use crate::domain::commands::users::CreateUserCommand;
use crate::domain::models::user::User as DomainUser;
use shared::{CreateUserRequest, User as SharedUser, UserListResponse, UserResponse};

pub struct UserMapper;

impl UserMapper {
    pub fn to_dto(domain: DomainUser) -> SharedUser {
        SharedUser {
            id: domain.id,
            name: domain.name,
            created_at: domain.created_at.to_rfc3339(),
        }
    }

    pub fn to_create_command(request: CreateUserRequest) -> CreateUserCommand {
        CreateUserCommand { name: request.name }
    }

    pub fn to_user_response(domain: DomainUser) -> UserResponse {
        UserResponse {
            success_message: format!("User '{}' created", domain.name),
            user: Self::to_dto(domain),
        }
    }

    pub fn to_user_list_response(users: Vec<DomainUser>) -> UserListResponse {
        UserListResponse {
            users: users.into_iter().map(Self::to_dto).collect(),
        }
    }
}
