use yew::prelude::*;
use shared::{format_rupiah, ExpenseCategory, MonthlyBalance};

#[derive(Properties, PartialEq)]
pub struct MonthlyBalanceListProps {
    /// Newest month first
    pub balances: Vec<MonthlyBalance>,
    #[prop_or_default]
    pub show_carry_over: bool,
    pub on_edit_income: Callback<String>,
    pub on_edit_expense: Callback<String>,
    pub on_delete_income: Callback<String>,
    pub on_delete_expense: Callback<String>,
}

/// Ask before deleting anything
fn confirm_delete(what: &str, month_name: &str) -> bool {
    gloo::dialogs::confirm(&format!("Delete the {} for {}?", what, month_name))
}

#[function_component(MonthlyBalanceList)]
pub fn monthly_balance_list(props: &MonthlyBalanceListProps) -> Html {
    if props.balances.is_empty() {
        return html! {
            <section class="monthly-balance-section">
                <h2>{"Monthly Balance"}</h2>
                <div class="empty-state">{"No income or expenses recorded yet."}</div>
            </section>
        };
    }

    html! {
        <section class="monthly-balance-section">
            <h2>{"Monthly Balance"}</h2>
            {for props.balances.iter().map(|balance| html! {
                <MonthlyBalanceCard
                    key={balance.month.to_string()}
                    balance={balance.clone()}
                    show_carry_over={props.show_carry_over}
                    on_edit_income={props.on_edit_income.clone()}
                    on_edit_expense={props.on_edit_expense.clone()}
                    on_delete_income={props.on_delete_income.clone()}
                    on_delete_expense={props.on_delete_expense.clone()}
                />
            })}
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct MonthlyBalanceCardProps {
    balance: MonthlyBalance,
    show_carry_over: bool,
    on_edit_income: Callback<String>,
    on_edit_expense: Callback<String>,
    on_delete_income: Callback<String>,
    on_delete_expense: Callback<String>,
}

#[function_component(MonthlyBalanceCard)]
fn monthly_balance_card(props: &MonthlyBalanceCardProps) -> Html {
    let balance = &props.balance;
    let expanded = use_state(|| false);

    let toggle_details = {
        let expanded = expanded.clone();
        Callback::from(move |_: MouseEvent| expanded.set(!*expanded))
    };

    let income_actions = balance.income_id.clone().map(|income_id| {
        let on_edit = {
            let on_edit_income = props.on_edit_income.clone();
            let income_id = income_id.clone();
            Callback::from(move |_: MouseEvent| on_edit_income.emit(income_id.clone()))
        };
        let on_delete = {
            let on_delete_income = props.on_delete_income.clone();
            let month_name = balance.month_name.clone();
            Callback::from(move |_: MouseEvent| {
                if confirm_delete("income", &month_name) {
                    on_delete_income.emit(income_id.clone());
                }
            })
        };
        html! {
            <div class="card-actions">
                <button class="btn btn-small" onclick={on_edit}>{"Edit income"}</button>
                <button class="btn btn-small btn-danger" onclick={on_delete}>{"Delete income"}</button>
            </div>
        }
    });

    let expense_actions = balance.expense_id.clone().map(|expense_id| {
        let on_edit = {
            let on_edit_expense = props.on_edit_expense.clone();
            let expense_id = expense_id.clone();
            Callback::from(move |_: MouseEvent| on_edit_expense.emit(expense_id.clone()))
        };
        let on_delete = {
            let on_delete_expense = props.on_delete_expense.clone();
            let month_name = balance.month_name.clone();
            Callback::from(move |_: MouseEvent| {
                if confirm_delete("expenses", &month_name) {
                    on_delete_expense.emit(expense_id.clone());
                }
            })
        };
        html! {
            <div class="card-actions">
                <button class="btn btn-small" onclick={on_edit}>{"Edit expenses"}</button>
                <button class="btn btn-small btn-danger" onclick={on_delete}>{"Delete expenses"}</button>
            </div>
        }
    });

    let (badge_class, badge_text) = if balance.is_surplus() {
        ("badge surplus", "Surplus")
    } else {
        ("badge deficit", "Deficit")
    };

    html! {
        <div class="balance-card">
            <div class="balance-card-header">
                <h3>{&balance.month_name}</h3>
                <span class={badge_class}>{badge_text}</span>
            </div>

            <dl class="balance-figures">
                <dt>{"Income"}</dt>
                <dd>{format_rupiah(balance.income)}</dd>
                <dt>{"Expenses"}</dt>
                <dd>{format_rupiah(balance.total_expenses)}</dd>
                <dt>{"Balance"}</dt>
                <dd class={if balance.balance >= 0.0 { "positive" } else { "negative" }}>
                    {format_rupiah(balance.balance)}
                </dd>
                {if balance.savings > 0.0 {
                    html! {
                        <>
                            <dt>{"Savings"}</dt>
                            <dd class="savings">{format_rupiah(balance.savings)}</dd>
                        </>
                    }
                } else { html! {} }}
                {if props.show_carry_over {
                    html! {
                        <>
                            <dt>{"Carried over"}</dt>
                            <dd>{format_rupiah(balance.carry_over)}</dd>
                            <dt>{"Closing balance"}</dt>
                            <dd>{format_rupiah(balance.closing_balance)}</dd>
                        </>
                    }
                } else { html! {} }}
            </dl>

            {if balance.items.is_empty() {
                html! {}
            } else {
                html! {
                    <button class="btn btn-link" onclick={toggle_details}>
                        {if *expanded { "Hide items" } else { "Show items" }}
                    </button>
                }
            }}

            {if *expanded {
                html! {
                    <ul class="expense-items">
                        {for balance.items.iter().map(|item| {
                            let class = if item.category == ExpenseCategory::Savings {
                                "expense-item savings"
                            } else {
                                "expense-item"
                            };
                            html! {
                                <li class={class} key={item.id.clone()}>
                                    <span class="item-label">{&item.label}</span>
                                    <span class="item-amount">{format_rupiah(item.amount)}</span>
                                </li>
                            }
                        })}
                    </ul>
                }
            } else { html! {} }}

            {income_actions.unwrap_or_default()}
            {expense_actions.unwrap_or_default()}
        </div>
    }
}
