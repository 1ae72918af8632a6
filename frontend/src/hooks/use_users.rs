use yew::prelude::*;
use shared::{validate_name, CreateUserRequest, User};
use wasm_bindgen_futures::spawn_local;
use crate::services::api::ApiClient;
use crate::services::logging::Logger;
use crate::services::storage::LocalCache;

/// Name of the user created automatically in single-user mode
const DEFAULT_USER_NAME: &str = "Me";

#[derive(Clone, PartialEq)]
pub struct UsersState {
    pub users: Vec<User>,
    pub selected_user_id: Option<String>,
    pub loading: bool,
    pub error: Option<String>,
}

impl UsersState {
    pub fn selected_user(&self) -> Option<&User> {
        let id = self.selected_user_id.as_ref()?;
        self.users.iter().find(|user| &user.id == id)
    }
}

pub struct UseUsersResult {
    pub state: UsersState,
    pub actions: UseUsersActions,
}

#[derive(Clone, PartialEq)]
pub struct UseUsersActions {
    pub refresh_users: Callback<()>,
    pub select_user: Callback<String>,
    pub create_user: Callback<String>,
    pub clear_user: Callback<()>,
}

#[derive(Debug, PartialEq)]
enum SelectionUpdate {
    Keep,
    Select(String),
    Clear,
}

/// What a finished user refresh does to the selection and the error line
#[derive(Debug, PartialEq)]
struct RefreshOutcome {
    selection: SelectionUpdate,
    error: Option<String>,
}

/// In single-user mode the first user is always selected. In multi-user mode
/// a selection pointing at a user that no longer exists is cleared. A failed
/// default-user creation stays visible until a later refresh succeeds.
fn settle_refresh(
    multi_user: bool,
    current: Option<&str>,
    users: &[User],
    default_user_failure: Option<String>,
) -> RefreshOutcome {
    let selection = if multi_user {
        let still_exists = current.map_or(false, |id| users.iter().any(|user| user.id == id));
        if current.is_some() && !still_exists {
            SelectionUpdate::Clear
        } else {
            SelectionUpdate::Keep
        }
    } else {
        match users.first() {
            Some(first) if Some(first.id.as_str()) == current => SelectionUpdate::Keep,
            Some(first) => SelectionUpdate::Select(first.id.clone()),
            None if current.is_some() => SelectionUpdate::Clear,
            None => SelectionUpdate::Keep,
        }
    };

    let error = default_user_failure
        .map(|e| format!("Could not create the default user: {}. Reload to try again.", e));

    RefreshOutcome { selection, error }
}

/// Users and the selected user.
///
/// In multi-user mode the selection is restored from local storage. Otherwise
/// the first user is always selected, and one is created when none exist.
#[hook]
pub fn use_users(api_client: &ApiClient, multi_user: bool) -> UseUsersResult {
    let users = use_state(Vec::<User>::new);
    let selected_user_id = use_state(LocalCache::selected_user);
    let loading = use_state(|| false);
    let error = use_state(|| Option::<String>::None);

    let select_user = {
        let selected_user_id = selected_user_id.clone();
        use_callback((), move |user_id: String, _| {
            LocalCache::set_selected_user(&user_id);
            selected_user_id.set(Some(user_id));
        })
    };

    let clear_user = {
        let selected_user_id = selected_user_id.clone();
        use_callback((), move |_: (), _| {
            LocalCache::clear_selected_user();
            selected_user_id.set(None);
        })
    };

    let refresh_users = {
        let api_client = api_client.clone();
        let users = users.clone();
        let selected_user_id = selected_user_id.clone();
        let loading = loading.clone();
        let error = error.clone();

        Callback::from(move |_: ()| {
            let api_client = api_client.clone();
            let users = users.clone();
            let selected_user_id = selected_user_id.clone();
            let loading = loading.clone();
            let error = error.clone();

            spawn_local(async move {
                loading.set(true);

                let mut listed = match api_client.list_users().await {
                    Ok(response) => response.users,
                    Err(e) => {
                        Logger::error_with_component("use_users", &format!("Failed to list users: {}", e));
                        error.set(Some(e));
                        loading.set(false);
                        return;
                    }
                };

                let mut failure = None;
                if !multi_user && listed.is_empty() {
                    let request = CreateUserRequest { name: DEFAULT_USER_NAME.to_string() };
                    match api_client.create_user(request).await {
                        Ok(response) => listed.push(response.user),
                        Err(e) => {
                            Logger::error_with_component("use_users", &format!("Failed to create default user: {}", e));
                            failure = Some(e);
                        }
                    }
                }

                let outcome = settle_refresh(multi_user, selected_user_id.as_deref(), &listed, failure);
                match outcome.selection {
                    SelectionUpdate::Keep => {}
                    SelectionUpdate::Select(id) => {
                        LocalCache::set_selected_user(&id);
                        selected_user_id.set(Some(id));
                    }
                    SelectionUpdate::Clear => {
                        LocalCache::clear_selected_user();
                        selected_user_id.set(None);
                    }
                }

                users.set(listed);
                error.set(outcome.error);
                loading.set(false);
            });
        })
    };

    let create_user = {
        let api_client = api_client.clone();
        let users = users.clone();
        let select_user = select_user.clone();
        let error = error.clone();

        Callback::from(move |name: String| {
            if let Err(e) = validate_name(&name) {
                error.set(Some(e.to_string()));
                return;
            }

            let api_client = api_client.clone();
            let users = users.clone();
            let select_user = select_user.clone();
            let error = error.clone();

            spawn_local(async move {
                match api_client.create_user(CreateUserRequest { name }).await {
                    Ok(response) => {
                        Logger::info_with_component("use_users", &response.success_message);
                        let mut updated = (*users).clone();
                        let id = response.user.id.clone();
                        updated.push(response.user);
                        users.set(updated);
                        error.set(None);
                        select_user.emit(id);
                    }
                    Err(e) => {
                        Logger::error_with_component("use_users", &format!("Failed to create user: {}", e));
                        error.set(Some(e));
                    }
                }
            });
        })
    };

    // Load users on mount and whenever the mode changes
    use_effect_with(multi_user, {
        let refresh_users = refresh_users.clone();
        move |_| {
            refresh_users.emit(());
            || ()
        }
    });

    let state = UsersState {
        users: (*users).clone(),
        selected_user_id: (*selected_user_id).clone(),
        loading: *loading,
        error: (*error).clone(),
    };

    let actions = UseUsersActions {
        refresh_users,
        select_user,
        create_user,
        clear_user,
    };

    UseUsersResult { state, actions }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    fn user(id: &str) -> User {
        User {
            id: id.to_string(),
            name: id.to_string(),
            created_at: "2024-08-01T00:00:00Z".to_string(),
        }
    }

    #[wasm_bindgen_test]
    fn test_failed_default_user_keeps_error_visible() {
        let outcome = settle_refresh(false, None, &[], Some("Network error".to_string()));

        assert_eq!(outcome.selection, SelectionUpdate::Keep);
        let error = outcome.error.expect("error should be shown");
        assert!(error.contains("Network error"));
    }

    #[wasm_bindgen_test]
    fn test_successful_refresh_clears_error() {
        let outcome = settle_refresh(false, None, &[user("me")], None);

        assert_eq!(outcome.selection, SelectionUpdate::Select("me".to_string()));
        assert_eq!(outcome.error, None);
    }

    #[wasm_bindgen_test]
    fn test_single_user_keeps_first_user_selected() {
        let users = [user("a"), user("b")];
        assert_eq!(settle_refresh(false, Some("a"), &users, None).selection, SelectionUpdate::Keep);
        assert_eq!(
            settle_refresh(false, Some("b"), &users, None).selection,
            SelectionUpdate::Select("a".to_string())
        );
    }

    #[wasm_bindgen_test]
    fn test_multi_user_clears_missing_selection() {
        let users = [user("a")];
        assert_eq!(settle_refresh(true, Some("gone"), &users, None).selection, SelectionUpdate::Clear);
        assert_eq!(settle_refresh(true, Some("a"), &users, None).selection, SelectionUpdate::Keep);
        assert_eq!(settle_refresh(true, None, &users, None).selection, SelectionUpdate::Keep);
    }
}
