//! # REST API for Monthly Incomes

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::info;

use super::mappers::IncomeMapper;
use super::{error_response, rejection_response};
use crate::AppState;
use shared::{CreateIncomeRequest, UpdateIncomeRequest};

pub async fn list_incomes(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/users/{}/incomes", user_id);

    match state.income_service.list_incomes(&user_id).await {
        Ok(incomes) => (StatusCode::OK, Json(IncomeMapper::to_list_response(incomes))).into_response(),
        Err(e) => error_response(e, "list incomes"),
    }
}

/// Create the income for a month, replacing any existing one
pub async fn create_income(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    payload: Result<Json<CreateIncomeRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => return rejection_response(rejection),
    };
    info!("POST /api/users/{}/incomes - request: {:?}", user_id, request);

    let command = IncomeMapper::to_create_command(user_id, request);
    match state.income_service.create_income(command).await {
        Ok(result) => (StatusCode::CREATED, Json(IncomeMapper::to_save_response(result))).into_response(),
        Err(e) => error_response(e, "save income"),
    }
}

pub async fn update_income(
    State(state): State<AppState>,
    Path(income_id): Path<String>,
    payload: Result<Json<UpdateIncomeRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => return rejection_response(rejection),
    };
    info!("PUT /api/incomes/{} - request: {:?}", income_id, request);

    let command = IncomeMapper::to_update_command(income_id, request);
    match state.income_service.update_income(command).await {
        Ok(income) => (StatusCode::OK, Json(IncomeMapper::to_update_response(income))).into_response(),
        Err(e) => error_response(e, "update income"),
    }
}

pub async fn delete_income(
    State(state): State<AppState>,
    Path(income_id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/incomes/{}", income_id);

    match state.income_service.delete_income(&income_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(e, "delete income"),
    }
}
