//! Browser local storage: the selected user and the last loaded data per user.
//!
//! Cached data is shown as-is on load until the backend answers, then
//! overwritten. Storage failures are logged and otherwise ignored.

use gloo::storage::{LocalStorage, Storage};
use serde::{Deserialize, Serialize};
use shared::{DashboardResponse, Expense, Income};

const SELECTED_USER_KEY: &str = "finance-tracker.selected-user";
const CACHE_KEY_PREFIX: &str = "finance-tracker.cache.";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CachedFinance {
    pub incomes: Vec<Income>,
    pub expenses: Vec<Expense>,
    pub dashboard: Option<DashboardResponse>,
}

fn cache_key(user_id: &str) -> String {
    format!("{}{}", CACHE_KEY_PREFIX, user_id)
}

pub struct LocalCache;

impl LocalCache {
    pub fn selected_user() -> Option<String> {
        LocalStorage::get::<String>(SELECTED_USER_KEY).ok()
    }

    pub fn set_selected_user(user_id: &str) {
        if let Err(e) = LocalStorage::set(SELECTED_USER_KEY, user_id) {
            gloo::console::warn!(format!("Failed to store selected user: {}", e));
        }
    }

    pub fn clear_selected_user() {
        LocalStorage::delete(SELECTED_USER_KEY);
    }

    pub fn load_finance(user_id: &str) -> Option<CachedFinance> {
        LocalStorage::get::<CachedFinance>(cache_key(user_id)).ok()
    }

    pub fn store_finance(user_id: &str, data: &CachedFinance) {
        if let Err(e) = LocalStorage::set(cache_key(user_id), data) {
            gloo::console::warn!(format!("Failed to cache finance data: {}", e));
        }
    }
}
