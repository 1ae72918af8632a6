//! # REST API Interface Layer
//!
//! axum handlers for the finance tracker. Handlers translate JSON DTOs into
//! domain commands through the mappers and translate domain errors into
//! status codes:
//!
//! - validation failure (including malformed JSON) → 400 with the message
//! - missing user or record → 404
//! - anything else → 500

pub mod mappers;
pub mod user_apis;
pub mod income_apis;
pub mod expense_apis;
pub mod dashboard_apis;
pub mod config_apis;
pub mod logging_apis;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, warn};

use crate::domain::FinanceError;

/// Map a service error to a response; `action` names what failed for the log
pub fn error_response(e: anyhow::Error, action: &str) -> Response {
    match e.downcast_ref::<FinanceError>() {
        Some(FinanceError::Validation(validation)) => {
            warn!("Rejected {}: {}", action, validation);
            (StatusCode::BAD_REQUEST, validation.to_string()).into_response()
        }
        Some(not_found @ FinanceError::NotFound { .. }) => {
            warn!("Failed to {}: {}", action, not_found);
            (StatusCode::NOT_FOUND, not_found.to_string()).into_response()
        }
        None => {
            error!("Failed to {}: {:#}", action, e);
            (StatusCode::INTERNAL_SERVER_ERROR, format!("Error trying to {}", action)).into_response()
        }
    }
}

/// Malformed or ill-typed request bodies are client errors
pub fn rejection_response(rejection: JsonRejection) -> Response {
    warn!("Rejected request body: {}", rejection.body_text());
    (StatusCode::BAD_REQUEST, rejection.body_text()).into_response()
}
