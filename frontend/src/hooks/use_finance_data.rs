use yew::prelude::*;
use shared::{
    CreateExpenseRequest, CreateIncomeRequest, DashboardResponse, Expense, Income,
    UpdateExpenseRequest, UpdateIncomeRequest,
};
use wasm_bindgen_futures::spawn_local;
use crate::hooks::use_notification::Notification;
use crate::services::api::ApiClient;
use crate::services::logging::Logger;
use crate::services::storage::{CachedFinance, LocalCache};

#[derive(Clone, PartialEq, Default)]
pub struct FinanceDataState {
    pub incomes: Vec<Income>,
    pub expenses: Vec<Expense>,
    pub dashboard: Option<DashboardResponse>,
    pub loading: bool,
    /// Data currently shown came from local storage, not the backend
    pub from_cache: bool,
}

pub struct UseFinanceDataResult {
    pub state: FinanceDataState,
    pub actions: UseFinanceDataActions,
}

/// Saves take the request plus a callback told whether the save succeeded, so
/// a form keeps its input when the backend rejects it.
#[derive(Clone, PartialEq)]
pub struct UseFinanceDataActions {
    pub refresh: Callback<()>,
    pub create_income: Callback<(CreateIncomeRequest, Callback<bool>)>,
    pub update_income: Callback<(String, UpdateIncomeRequest, Callback<bool>)>,
    pub delete_income: Callback<String>,
    pub create_expense: Callback<(CreateExpenseRequest, Callback<bool>)>,
    pub update_expense: Callback<(String, UpdateExpenseRequest, Callback<bool>)>,
    pub delete_expense: Callback<String>,
}

/// Numbers refresh requests so a load can tell whether a newer one started
/// while it was waiting on the backend.
#[derive(Debug, Default)]
pub struct LoadGeneration(u64);

impl LoadGeneration {
    /// Begin a new load, superseding every earlier one
    pub fn start(&mut self) -> u64 {
        self.0 += 1;
        self.0
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.0 == ticket
    }
}

#[hook]
pub fn use_finance_data(
    api_client: &ApiClient,
    user_id: Option<String>,
    carry_over: bool,
    notify: Callback<Notification>,
) -> UseFinanceDataResult {
    let data = use_state(CachedFinance::default);
    let loading = use_state(|| false);
    let from_cache = use_state(|| false);
    let generation = use_mut_ref(LoadGeneration::default);

    let refresh = {
        let api_client = api_client.clone();
        let data = data.clone();
        let loading = loading.clone();
        let from_cache = from_cache.clone();
        let generation = generation.clone();
        let user_id = user_id.clone();
        let notify = notify.clone();

        Callback::from(move |_: ()| {
            let ticket = generation.borrow_mut().start();
            let Some(user_id) = user_id.clone() else {
                data.set(CachedFinance::default());
                loading.set(false);
                return;
            };
            let api_client = api_client.clone();
            let data = data.clone();
            let loading = loading.clone();
            let from_cache = from_cache.clone();
            let generation = generation.clone();
            let notify = notify.clone();

            spawn_local(async move {
                loading.set(true);

                let loaded = async {
                    let incomes = api_client.list_incomes(&user_id).await?.incomes;
                    let expenses = api_client.list_expenses(&user_id).await?.expenses;
                    let dashboard = api_client.get_dashboard(&user_id, Some(carry_over)).await?;
                    Ok::<_, String>(CachedFinance { incomes, expenses, dashboard: Some(dashboard) })
                }
                .await;

                // the user or carry-over setting changed while this load was in flight
                if !generation.borrow().is_current(ticket) {
                    Logger::info_with_component(
                        "use_finance_data",
                        &format!("Dropping stale finance data for user {}", user_id),
                    );
                    return;
                }

                match loaded {
                    Ok(fresh) => {
                        LocalCache::store_finance(&user_id, &fresh);
                        data.set(fresh);
                        from_cache.set(false);
                    }
                    Err(e) => {
                        // keep whatever is on screen, cached or not
                        Logger::error_with_component("use_finance_data", &format!("Failed to load finance data: {}", e));
                        notify.emit(Notification::error(format!("Could not load data: {}", e)));
                    }
                }

                loading.set(false);
            });
        })
    };

    let create_income = {
        let api_client = api_client.clone();
        let user_id = user_id.clone();
        let refresh = refresh.clone();
        let notify = notify.clone();

        Callback::from(move |(request, on_done): (CreateIncomeRequest, Callback<bool>)| {
            let Some(user_id) = user_id.clone() else {
                on_done.emit(false);
                return;
            };
            let api_client = api_client.clone();
            let refresh = refresh.clone();
            let notify = notify.clone();

            spawn_local(async move {
                match api_client.create_income(&user_id, request).await {
                    Ok(response) => {
                        notify.emit(Notification::success(response.success_message));
                        on_done.emit(true);
                        refresh.emit(());
                    }
                    Err(e) => {
                        Logger::error_with_component("use_finance_data", &format!("Failed to save income: {}", e));
                        notify.emit(Notification::error(e));
                        on_done.emit(false);
                    }
                }
            });
        })
    };

    let update_income = {
        let api_client = api_client.clone();
        let refresh = refresh.clone();
        let notify = notify.clone();

        Callback::from(move |(income_id, request, on_done): (String, UpdateIncomeRequest, Callback<bool>)| {
            let api_client = api_client.clone();
            let refresh = refresh.clone();
            let notify = notify.clone();

            spawn_local(async move {
                match api_client.update_income(&income_id, request).await {
                    Ok(response) => {
                        notify.emit(Notification::success(response.success_message));
                        on_done.emit(true);
                        refresh.emit(());
                    }
                    Err(e) => {
                        Logger::error_with_component("use_finance_data", &format!("Failed to update income {}: {}", income_id, e));
                        notify.emit(Notification::error(e));
                        on_done.emit(false);
                    }
                }
            });
        })
    };

    let delete_income = {
        let api_client = api_client.clone();
        let refresh = refresh.clone();
        let notify = notify.clone();

        Callback::from(move |income_id: String| {
            let api_client = api_client.clone();
            let refresh = refresh.clone();
            let notify = notify.clone();

            spawn_local(async move {
                match api_client.delete_income(&income_id).await {
                    Ok(()) => {
                        notify.emit(Notification::success("Income deleted"));
                        refresh.emit(());
                    }
                    Err(e) => {
                        Logger::error_with_component("use_finance_data", &format!("Failed to delete income {}: {}", income_id, e));
                        notify.emit(Notification::error(e));
                    }
                }
            });
        })
    };

    let create_expense = {
        let api_client = api_client.clone();
        let user_id = user_id.clone();
        let refresh = refresh.clone();
        let notify = notify.clone();

        Callback::from(move |(request, on_done): (CreateExpenseRequest, Callback<bool>)| {
            let Some(user_id) = user_id.clone() else {
                on_done.emit(false);
                return;
            };
            let api_client = api_client.clone();
            let refresh = refresh.clone();
            let notify = notify.clone();

            spawn_local(async move {
                match api_client.create_expense(&user_id, request).await {
                    Ok(response) => {
                        notify.emit(Notification::success(response.success_message));
                        on_done.emit(true);
                        refresh.emit(());
                    }
                    Err(e) => {
                        Logger::error_with_component("use_finance_data", &format!("Failed to save expense: {}", e));
                        notify.emit(Notification::error(e));
                        on_done.emit(false);
                    }
                }
            });
        })
    };

    let update_expense = {
        let api_client = api_client.clone();
        let refresh = refresh.clone();
        let notify = notify.clone();

        Callback::from(move |(expense_id, request, on_done): (String, UpdateExpenseRequest, Callback<bool>)| {
            let api_client = api_client.clone();
            let refresh = refresh.clone();
            let notify = notify.clone();

            spawn_local(async move {
                match api_client.update_expense(&expense_id, request).await {
                    Ok(response) => {
                        notify.emit(Notification::success(response.success_message));
                        on_done.emit(true);
                        refresh.emit(());
                    }
                    Err(e) => {
                        Logger::error_with_component("use_finance_data", &format!("Failed to update expense {}: {}", expense_id, e));
                        notify.emit(Notification::error(e));
                        on_done.emit(false);
                    }
                }
            });
        })
    };

    let delete_expense = {
        let api_client = api_client.clone();
        let refresh = refresh.clone();
        let notify = notify.clone();

        Callback::from(move |expense_id: String| {
            let api_client = api_client.clone();
            let refresh = refresh.clone();
            let notify = notify.clone();

            spawn_local(async move {
                match api_client.delete_expense(&expense_id).await {
                    Ok(()) => {
                        notify.emit(Notification::success("Expense deleted"));
                        refresh.emit(());
                    }
                    Err(e) => {
                        Logger::error_with_component("use_finance_data", &format!("Failed to delete expense {}: {}", expense_id, e));
                        notify.emit(Notification::error(e));
                    }
                }
            });
        })
    };

    // Show cached data for the user right away, then reload from the backend
    use_effect_with((user_id.clone(), carry_over), {
        let data = data.clone();
        let from_cache = from_cache.clone();
        let refresh = refresh.clone();
        move |(user_id, _): &(Option<String>, bool)| {
            match user_id.as_deref().and_then(LocalCache::load_finance) {
                Some(cached) => {
                    data.set(cached);
                    from_cache.set(true);
                }
                None => {
                    data.set(CachedFinance::default());
                    from_cache.set(false);
                }
            }
            refresh.emit(());
            || ()
        }
    });

    let actions = UseFinanceDataActions {
        refresh,
        create_income,
        update_income,
        delete_income,
        create_expense,
        update_expense,
        delete_expense,
    };

    let state = FinanceDataState {
        incomes: data.incomes.clone(),
        expenses: data.expenses.clone(),
        dashboard: data.dashboard.clone(),
        loading: *loading,
        from_cache: *from_cache,
    };

    UseFinanceDataResult { state, actions }
}
