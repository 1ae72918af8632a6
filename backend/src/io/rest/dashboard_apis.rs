//! # REST API for the Dashboard

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use tracing::info;

use super::error_response;
use super::mappers::DashboardMapper;
use crate::domain::commands::dashboard::DashboardQuery;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct DashboardParams {
    /// Falls back to the configured `with_carry_over`
    pub carry_over: Option<bool>,
}

pub async fn get_dashboard(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(params): Query<DashboardParams>,
) -> impl IntoResponse {
    info!("GET /api/users/{}/dashboard - params: {:?}", user_id, params);

    let query = DashboardQuery {
        user_id,
        carry_over: params.carry_over.unwrap_or(state.ui_config.with_carry_over),
    };

    match state.dashboard_service.get_dashboard(query).await {
        Ok(result) => (StatusCode::OK, Json(DashboardMapper::to_response(result))).into_response(),
        Err(e) => error_response(e, "build dashboard"),
    }
}
