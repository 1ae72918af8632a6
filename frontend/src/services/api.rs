use gloo::net::http::{Request, Response};
use serde::de::DeserializeOwned;
use shared::{
    CreateExpenseRequest, CreateIncomeRequest, CreateUserRequest, DashboardResponse,
    ExpenseListResponse, ExpenseResponse, IncomeListResponse, IncomeResponse, UiConfig,
    UpdateExpenseRequest, UpdateIncomeRequest, UserListResponse, UserResponse,
};

/// API client for communicating with the backend server
#[derive(Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClient {
    /// Create a new API client with the default base URL
    pub fn new() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
        }
    }

    pub async fn get_ui_config(&self) -> Result<UiConfig, String> {
        let url = format!("{}/api/config", self.base_url);
        match Request::get(&url).send().await {
            Ok(response) => read_json(response).await,
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }

    pub async fn list_users(&self) -> Result<UserListResponse, String> {
        let url = format!("{}/api/users", self.base_url);
        match Request::get(&url).send().await {
            Ok(response) => read_json(response).await,
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }

    pub async fn create_user(&self, request: CreateUserRequest) -> Result<UserResponse, String> {
        let url = format!("{}/api/users", self.base_url);
        match Request::post(&url)
            .json(&request)
            .map_err(|e| format!("Failed to serialize request: {}", e))?
            .send()
            .await
        {
            Ok(response) => read_json(response).await,
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }

    pub async fn list_incomes(&self, user_id: &str) -> Result<IncomeListResponse, String> {
        let url = format!("{}/api/users/{}/incomes", self.base_url, user_id);
        match Request::get(&url).send().await {
            Ok(response) => read_json(response).await,
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }

    /// Create the income for a month, replacing any existing one
    pub async fn create_income(
        &self,
        user_id: &str,
        request: CreateIncomeRequest,
    ) -> Result<IncomeResponse, String> {
        let url = format!("{}/api/users/{}/incomes", self.base_url, user_id);
        match Request::post(&url)
            .json(&request)
            .map_err(|e| format!("Failed to serialize request: {}", e))?
            .send()
            .await
        {
            Ok(response) => read_json(response).await,
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }

    pub async fn update_income(
        &self,
        income_id: &str,
        request: UpdateIncomeRequest,
    ) -> Result<IncomeResponse, String> {
        let url = format!("{}/api/incomes/{}", self.base_url, income_id);
        match Request::put(&url)
            .json(&request)
            .map_err(|e| format!("Failed to serialize request: {}", e))?
            .send()
            .await
        {
            Ok(response) => read_json(response).await,
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }

    pub async fn delete_income(&self, income_id: &str) -> Result<(), String> {
        let url = format!("{}/api/incomes/{}", self.base_url, income_id);
        match Request::delete(&url).send().await {
            Ok(response) => read_empty(response).await,
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }

    pub async fn list_expenses(&self, user_id: &str) -> Result<ExpenseListResponse, String> {
        let url = format!("{}/api/users/{}/expenses", self.base_url, user_id);
        match Request::get(&url).send().await {
            Ok(response) => read_json(response).await,
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }

    /// Create the expense for a month, replacing any existing one
    pub async fn create_expense(
        &self,
        user_id: &str,
        request: CreateExpenseRequest,
    ) -> Result<ExpenseResponse, String> {
        let url = format!("{}/api/users/{}/expenses", self.base_url, user_id);
        match Request::post(&url)
            .json(&request)
            .map_err(|e| format!("Failed to serialize request: {}", e))?
            .send()
            .await
        {
            Ok(response) => read_json(response).await,
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }

    pub async fn update_expense(
        &self,
        expense_id: &str,
        request: UpdateExpenseRequest,
    ) -> Result<ExpenseResponse, String> {
        let url = format!("{}/api/expenses/{}", self.base_url, expense_id);
        match Request::put(&url)
            .json(&request)
            .map_err(|e| format!("Failed to serialize request: {}", e))?
            .send()
            .await
        {
            Ok(response) => read_json(response).await,
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }

    pub async fn delete_expense(&self, expense_id: &str) -> Result<(), String> {
        let url = format!("{}/api/expenses/{}", self.base_url, expense_id);
        match Request::delete(&url).send().await {
            Ok(response) => read_empty(response).await,
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }

    /// Dashboard for a user; `carry_over` overrides the server default when set
    pub async fn get_dashboard(
        &self,
        user_id: &str,
        carry_over: Option<bool>,
    ) -> Result<DashboardResponse, String> {
        let query = carry_over
            .map(|flag| format!("?carry_over={}", flag))
            .unwrap_or_default();
        let url = format!("{}/api/users/{}/dashboard{}", self.base_url, user_id, query);
        match Request::get(&url).send().await {
            Ok(response) => read_json(response).await,
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, String> {
    if response.ok() {
        match response.json::<T>().await {
            Ok(data) => Ok(data),
            Err(e) => Err(format!("Failed to parse response: {}", e)),
        }
    } else {
        Err(error_text(response).await)
    }
}

async fn read_empty(response: Response) -> Result<(), String> {
    if response.ok() {
        Ok(())
    } else {
        Err(error_text(response).await)
    }
}

/// Backend errors carry a plain-text message in the body
async fn error_text(response: Response) -> String {
    let status = response.status();
    match response.text().await {
        Ok(body) if !body.trim().is_empty() => body,
        Ok(_) => format!("Request failed with status {}", status),
        Err(_) => "Unknown error".to_string(),
    }
}
