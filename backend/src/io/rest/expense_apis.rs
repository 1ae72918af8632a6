//! # REST API for Monthly Expenses
//!
//! Expenses always travel with their items; updates replace the full item
//! list and the total is recomputed server side.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::info;

use super::mappers::ExpenseMapper;
use super::{error_response, rejection_response};
use crate::AppState;
use shared::{CreateExpenseRequest, UpdateExpenseRequest};

pub async fn list_expenses(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/users/{}/expenses", user_id);

    match state.expense_service.list_expenses(&user_id).await {
        Ok(expenses) => (StatusCode::OK, Json(ExpenseMapper::to_list_response(expenses))).into_response(),
        Err(e) => error_response(e, "list expenses"),
    }
}

pub async fn create_expense(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    payload: Result<Json<CreateExpenseRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => return rejection_response(rejection),
    };
    info!(
        "POST /api/users/{}/expenses - month {} with {} items",
        user_id,
        request.month,
        request.items.len()
    );

    let command = ExpenseMapper::to_create_command(user_id, request);
    match state.expense_service.create_expense(command).await {
        Ok(result) => (StatusCode::CREATED, Json(ExpenseMapper::to_save_response(result))).into_response(),
        Err(e) => error_response(e, "save expense"),
    }
}

pub async fn update_expense(
    State(state): State<AppState>,
    Path(expense_id): Path<String>,
    payload: Result<Json<UpdateExpenseRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => return rejection_response(rejection),
    };
    info!("PUT /api/expenses/{} - {} items", expense_id, request.items.len());

    let command = ExpenseMapper::to_update_command(expense_id, request);
    match state.expense_service.update_expense(command).await {
        Ok(expense) => (StatusCode::OK, Json(ExpenseMapper::to_update_response(expense))).into_response(),
        Err(e) => error_response(e, "update expense"),
    }
}

pub async fn delete_expense(
    State(state): State<AppState>,
    Path(expense_id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/expenses/{}", expense_id);

    match state.expense_service.delete_expense(&expense_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(e, "delete expense"),
    }
}
