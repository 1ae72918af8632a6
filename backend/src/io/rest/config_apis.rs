use axum::{extract::State, response::Json};
use shared::UiConfig;
use tracing::info;

use crate::AppState;

/// Feature flags the frontend uses to pick its layout
pub async fn get_ui_config(State(state): State<AppState>) -> Json<UiConfig> {
    info!("GET /api/config");
    Json(state.ui_config.clone())
}
