//! # REST API for Users

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::info;

use super::mappers::UserMapper;
use super::{error_response, rejection_response};
use crate::AppState;
use shared::CreateUserRequest;

pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => return rejection_response(rejection),
    };
    info!("POST /api/users - request: {:?}", request);

    match state.user_service.create_user(UserMapper::to_create_command(request)).await {
        Ok(user) => (StatusCode::CREATED, Json(UserMapper::to_user_response(user))).into_response(),
        Err(e) => error_response(e, "create user"),
    }
}

pub async fn list_users(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/users");

    match state.user_service.list_users().await {
        Ok(users) => (StatusCode::OK, Json(UserMapper::to_user_list_response(users))).into_response(),
        Err(e) => error_response(e, "list users"),
    }
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/users/{}", user_id);

    match state.user_service.require_user(&user_id).await {
        Ok(user) => (StatusCode::OK, Json(UserMapper::to_dto(user))).into_response(),
        Err(e) => error_response(e, "get user"),
    }
}
