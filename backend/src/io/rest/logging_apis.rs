use axum::{http::StatusCode, response::Json};
use tracing::{debug, error, info, warn};

use shared::LogEntry;

/// Re-emit a browser log line through the server's subscriber
pub async fn log_message(Json(entry): Json<LogEntry>) -> StatusCode {
    let component = entry.component.as_deref().unwrap_or("frontend");

    match entry.level.to_lowercase().as_str() {
        "debug" => debug!(target: "frontend", "[{}] {}", component, entry.message),
        "warn" => warn!(target: "frontend", "[{}] {}", component, entry.message),
        "error" => error!(target: "frontend", "[{}] {}", component, entry.message),
        _ => info!(target: "frontend", "[{}] {}", component, entry.message),
    }

    StatusCode::NO_CONTENT
}
