use yew::prelude::*;
use web_sys::HtmlInputElement;
use wasm_bindgen_futures::spawn_local;
use shared::{Expense, Income, UiConfig};

mod components;
mod hooks;
mod services;

use components::{
    EditExpenseDialog, EditIncomeDialog, ExpenseAnalyticsView, ExpenseForm, IncomeForm,
    MonthlyBalanceList, NotificationToast, SummaryCards, UserSelector,
};
use hooks::{use_finance_data, use_notification, use_users};
use services::api::ApiClient;
use services::logging::Logger;

#[function_component(App)]
fn app() -> Html {
    let ui_config = use_state(|| Option::<UiConfig>::None);

    // The page layout depends on the server's UI flags, so load them first
    {
        let ui_config = ui_config.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match ApiClient::new().get_ui_config().await {
                    Ok(config) => ui_config.set(Some(config)),
                    Err(e) => {
                        Logger::warn_with_component("app", &format!("Using default UI config: {}", e));
                        ui_config.set(Some(UiConfig::default()));
                    }
                }
            });
            || ()
        });
    }

    match (*ui_config).clone() {
        Some(config) => html! { <FinancePage config={config} /> },
        None => html! { <div class="loading">{"Loading..."}</div> },
    }
}

#[derive(Properties, PartialEq)]
struct FinancePageProps {
    config: UiConfig,
}

#[function_component(FinancePage)]
fn finance_page(props: &FinancePageProps) -> Html {
    let api_client = use_memo((), |_| ApiClient::new());
    let notification = use_notification();
    let users = use_users(&api_client, props.config.multi_user);

    let carry_over = use_state(|| props.config.with_carry_over);
    let finance = use_finance_data(
        &api_client,
        users.state.selected_user_id.clone(),
        *carry_over,
        notification.notify.clone(),
    );

    let editing_income = use_state(|| Option::<Income>::None);
    let editing_expense = use_state(|| Option::<Expense>::None);

    let on_edit_income = {
        let incomes = finance.state.incomes.clone();
        let editing_income = editing_income.clone();
        Callback::from(move |income_id: String| {
            editing_income.set(incomes.iter().find(|income| income.id == income_id).cloned());
        })
    };

    let on_edit_expense = {
        let expenses = finance.state.expenses.clone();
        let editing_expense = editing_expense.clone();
        Callback::from(move |expense_id: String| {
            editing_expense.set(expenses.iter().find(|expense| expense.id == expense_id).cloned());
        })
    };

    let close_income_dialog = {
        let editing_income = editing_income.clone();
        Callback::from(move |_| editing_income.set(None))
    };

    let close_expense_dialog = {
        let editing_expense = editing_expense.clone();
        Callback::from(move |_| editing_expense.set(None))
    };

    let on_carry_over_change = {
        let carry_over = carry_over.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            carry_over.set(input.checked());
        })
    };

    let has_user = users.state.selected_user_id.is_some();
    let busy = finance.state.loading && finance.state.dashboard.is_none();

    let on_reload = {
        let refresh_users = users.actions.refresh_users.clone();
        let refresh = finance.actions.refresh.clone();
        Callback::from(move |_: MouseEvent| {
            refresh_users.emit(());
            refresh.emit(());
        })
    };

    html! {
        <div class="app">
            <header class="app-header">
                <h1>{"Finance Tracker"}</h1>
                {if let Some(user) = users.state.selected_user() {
                    html! { <span class="current-user">{&user.name}</span> }
                } else { html! {} }}
                <button class="btn btn-small" onclick={on_reload} disabled={finance.state.loading}>
                    {"Reload"}
                </button>
            </header>

            <NotificationToast
                notification={notification.current.clone()}
                on_dismiss={notification.dismiss.clone()}
            />

            {if props.config.multi_user {
                html! {
                    <UserSelector
                        users={users.state.users.clone()}
                        selected_user_id={users.state.selected_user_id.clone()}
                        error={users.state.error.clone()}
                        on_select={users.actions.select_user.clone()}
                        on_create={users.actions.create_user.clone()}
                        on_clear={users.actions.clear_user.clone()}
                    />
                }
            } else if let Some(error) = users.state.error.as_ref() {
                html! { <div class="form-message error">{error}</div> }
            } else { html! {} }}

            {if !has_user {
                html! {
                    <div class="empty-state">
                        {if users.state.loading { "Loading users..." } else { "Select or add a user to get started." }}
                    </div>
                }
            } else {
                html! {
                    <main class="dashboard">
                        {if finance.state.from_cache {
                            html! { <div class="cache-banner">{"Showing saved data while refreshing..."}</div> }
                        } else { html! {} }}

                        <div class="forms-row">
                            <IncomeForm on_submit={finance.actions.create_income.clone()} />
                            <ExpenseForm on_submit={finance.actions.create_expense.clone()} />
                        </div>

                        <label class="carry-over-toggle">
                            <input type="checkbox" checked={*carry_over} onchange={on_carry_over_change} />
                            {" Carry surplus into the next month"}
                        </label>

                        {if busy {
                            html! { <div class="loading">{"Loading dashboard..."}</div> }
                        } else { html! {} }}

                        {if let Some(dashboard) = finance.state.dashboard.as_ref() {
                            html! {
                                <>
                                    <SummaryCards summary={dashboard.summary.clone()} />
                                    <ExpenseAnalyticsView analytics={dashboard.analytics.clone()} />
                                    <MonthlyBalanceList
                                        balances={dashboard.monthly_balances.clone()}
                                        show_carry_over={*carry_over}
                                        on_edit_income={on_edit_income}
                                        on_edit_expense={on_edit_expense}
                                        on_delete_income={finance.actions.delete_income.clone()}
                                        on_delete_expense={finance.actions.delete_expense.clone()}
                                    />
                                </>
                            }
                        } else { html! {} }}

                        <EditIncomeDialog
                            income={(*editing_income).clone()}
                            on_save={finance.actions.update_income.clone()}
                            on_close={close_income_dialog}
                        />
                        <EditExpenseDialog
                            expense={(*editing_expense).clone()}
                            on_save={finance.actions.update_expense.clone()}
                            on_close={close_expense_dialog}
                        />
                    </main>
                }
            }}
        </div>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
