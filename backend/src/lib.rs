//! # Finance Tracker Backend
//!
//! REST server for recording monthly incomes and expenses and for the
//! aggregated dashboard built from them.
//!
//! ## Architecture
//!
//! ```text
//! Frontend (yew)
//!     ↓  HTTP/JSON
//! IO Layer (axum handlers, DTO mappers)
//!     ↓
//! Domain Layer (services, aggregation)
//!     ↓
//! Storage Layer (SQLite via sqlx, in-memory for tests)
//! ```

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method},
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::info;

use crate::config::AppConfig;
use crate::domain::{DashboardService, ExpenseService, IncomeService, UserService};
use crate::io::rest::{
    config_apis, dashboard_apis, expense_apis, income_apis, logging_apis, user_apis,
};
use crate::storage::SqliteConnection;
use shared::UiConfig;

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub user_service: UserService<SqliteConnection>,
    pub income_service: IncomeService<SqliteConnection>,
    pub expense_service: ExpenseService<SqliteConnection>,
    pub dashboard_service: DashboardService<SqliteConnection>,
    pub ui_config: UiConfig,
}

impl AppState {
    pub fn new(connection: &SqliteConnection, ui_config: UiConfig) -> Self {
        Self {
            user_service: UserService::new(connection),
            income_service: IncomeService::new(connection),
            expense_service: ExpenseService::new(connection),
            dashboard_service: DashboardService::new(connection),
            ui_config,
        }
    }
}

/// Open the database and build the services
pub async fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    info!("Setting up database at {}", config.database_url);
    let connection = SqliteConnection::new(&config.database_url).await?;

    info!("Setting up application state");
    Ok(AppState::new(&connection, config.ui.clone()))
}

/// Create the router with every API route under `/api`
pub fn create_router(app_state: AppState, config: &AppConfig) -> Result<Router> {
    let origin = config
        .frontend_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid frontend origin '{}'", config.frontend_origin))?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/config", get(config_apis::get_ui_config))
        .route("/users", get(user_apis::list_users).post(user_apis::create_user))
        .route("/users/:user_id", get(user_apis::get_user))
        .route(
            "/users/:user_id/incomes",
            get(income_apis::list_incomes).post(income_apis::create_income),
        )
        .route(
            "/incomes/:income_id",
            put(income_apis::update_income).delete(income_apis::delete_income),
        )
        .route(
            "/users/:user_id/expenses",
            get(expense_apis::list_expenses).post(expense_apis::create_expense),
        )
        .route(
            "/expenses/:expense_id",
            put(expense_apis::update_expense).delete(expense_apis::delete_expense),
        )
        .route("/users/:user_id/dashboard", get(dashboard_apis::get_dashboard))
        .route("/logs", post(logging_apis::log_message));

    let mut router = Router::new().nest("/api", api_routes);

    if let Some(static_dir) = &config.static_dir {
        info!("Serving frontend from {}", static_dir.display());
        router = router.fallback_service(ServeDir::new(static_dir));
    }

    Ok(router.layer(cors).with_state(app_state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use axum::response::Response;
    use serde::de::DeserializeOwned;
    use serde_json::json;
    use shared::{DashboardResponse, ExpenseResponse, IncomeListResponse, IncomeResponse, UserResponse};
    use tower::ServiceExt;

    async fn setup_test_router() -> Router {
        let connection = SqliteConnection::init_test().await.expect("Failed to create test database");
        let state = AppState::new(&connection, UiConfig::default());
        create_router(state, &AppConfig::default()).expect("Failed to build router")
    }

    async fn send(router: &Router, method: &str, uri: &str, body: Option<serde_json::Value>) -> Response {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(value) => builder
                .header("content-type", "application/json")
                .body(Body::from(value.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        router.clone().oneshot(request).await.unwrap()
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> T {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn create_user(router: &Router) -> String {
        let response = send(router, "POST", "/api/users", Some(json!({ "name": "Ilham" }))).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let body: UserResponse = read_json(response).await;
        body.user.id
    }

    #[tokio::test]
    async fn test_config_endpoint() {
        let router = setup_test_router().await;
        let response = send(&router, "GET", "/api/config", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let config: UiConfig = read_json(response).await;
        assert_eq!(config, UiConfig::default());
    }

    #[tokio::test]
    async fn test_user_not_found() {
        let router = setup_test_router().await;
        let response = send(&router, "GET", "/api/users/ghost", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = send(&router, "GET", "/api/users/ghost/dashboard", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_validation_errors_are_bad_requests() {
        let router = setup_test_router().await;
        let user_id = create_user(&router).await;

        let blank_name = send(&router, "POST", "/api/users", Some(json!({ "name": "  " }))).await;
        assert_eq!(blank_name.status(), StatusCode::BAD_REQUEST);

        let zero_salary = send(
            &router,
            "POST",
            &format!("/api/users/{}/incomes", user_id),
            Some(json!({ "month": "2024-08", "salary": 0 })),
        )
        .await;
        assert_eq!(zero_salary.status(), StatusCode::BAD_REQUEST);

        let bad_month = send(
            &router,
            "POST",
            &format!("/api/users/{}/incomes", user_id),
            Some(json!({ "month": "2024-13", "salary": 100 })),
        )
        .await;
        assert_eq!(bad_month.status(), StatusCode::BAD_REQUEST);

        let no_items = send(
            &router,
            "POST",
            &format!("/api/users/{}/expenses", user_id),
            Some(json!({ "month": "2024-08", "items": [] })),
        )
        .await;
        assert_eq!(no_items.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_income_replaced_for_same_month() {
        let router = setup_test_router().await;
        let user_id = create_user(&router).await;
        let uri = format!("/api/users/{}/incomes", user_id);

        let first = send(&router, "POST", &uri, Some(json!({ "month": "2024-08", "salary": 5000000 }))).await;
        assert_eq!(first.status(), StatusCode::CREATED);
        let first: IncomeResponse = read_json(first).await;
        assert!(!first.replaced);

        let second = send(&router, "POST", &uri, Some(json!({ "month": "2024-08", "salary": 6000000 }))).await;
        let second: IncomeResponse = read_json(second).await;
        assert!(second.replaced);
        assert_eq!(second.income.id, first.income.id);

        let list: IncomeListResponse = read_json(send(&router, "GET", &uri, None).await).await;
        assert_eq!(list.incomes.len(), 1);
        assert_eq!(list.incomes[0].salary, 6_000_000.0);
    }

    #[tokio::test]
    async fn test_full_month_flow() {
        let router = setup_test_router().await;
        let user_id = create_user(&router).await;

        send(
            &router,
            "POST",
            &format!("/api/users/{}/incomes", user_id),
            Some(json!({ "month": "2024-08", "salary": 5000000 })),
        )
        .await;

        let created = send(
            &router,
            "POST",
            &format!("/api/users/{}/expenses", user_id),
            Some(json!({
                "month": "2024-08",
                "items": [
                    { "label": "Food", "amount": 1200000 },
                    { "label": "Savings", "amount": 800000 }
                ]
            })),
        )
        .await;
        assert_eq!(created.status(), StatusCode::CREATED);
        let created: ExpenseResponse = read_json(created).await;
        assert_eq!(created.expense.total_expenses, 2_000_000.0);
        assert_eq!(created.expense.items[1].category, shared::ExpenseCategory::Savings);

        let dashboard: DashboardResponse =
            read_json(send(&router, "GET", &format!("/api/users/{}/dashboard", user_id), None).await).await;
        let august = &dashboard.monthly_balances[0];
        assert_eq!(august.balance, 3_000_000.0);
        assert_eq!(august.savings, 800_000.0);
        assert_eq!(dashboard.analytics.as_ref().unwrap().top_categories[0].label, "Food");

        let updated = send(
            &router,
            "PUT",
            &format!("/api/expenses/{}", created.expense.id),
            Some(json!({ "items": [{ "label": "Food", "amount": 1000000, "category": "spending" }] })),
        )
        .await;
        assert_eq!(updated.status(), StatusCode::OK);
        let updated: ExpenseResponse = read_json(updated).await;
        assert_eq!(updated.expense.total_expenses, 1_000_000.0);

        let deleted = send(&router, "DELETE", &format!("/api/expenses/{}", created.expense.id), None).await;
        assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

        let again = send(&router, "DELETE", &format!("/api/expenses/{}", created.expense.id), None).await;
        assert_eq!(again.status(), StatusCode::NOT_FOUND);

        let dashboard: DashboardResponse =
            read_json(send(&router, "GET", &format!("/api/users/{}/dashboard", user_id), None).await).await;
        assert_eq!(dashboard.monthly_balances.len(), 1);
        assert_eq!(dashboard.monthly_balances[0].balance, 5_000_000.0);
        assert!(dashboard.analytics.is_none());
    }

    #[tokio::test]
    async fn test_log_forwarding() {
        let router = setup_test_router().await;
        let response = send(
            &router,
            "POST",
            "/api/logs",
            Some(json!({ "level": "warn", "message": "cache miss", "component": "storage" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }
}
