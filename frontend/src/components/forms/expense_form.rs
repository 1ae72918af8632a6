use yew::prelude::*;
use shared::{CreateExpenseRequest, ExpenseDraft, MonthKey};
use super::expense_rows::ExpenseRowsEditor;
use super::month_picker::MonthPicker;

#[derive(Properties, PartialEq)]
pub struct ExpenseFormProps {
    /// Receives a validated request and a callback told whether it was saved
    pub on_submit: Callback<(CreateExpenseRequest, Callback<bool>)>,
    #[prop_or_default]
    pub disabled: bool,
}

#[function_component(ExpenseForm)]
pub fn expense_form(props: &ExpenseFormProps) -> Html {
    let month = use_state(MonthKey::current);
    let draft = use_state(ExpenseDraft::default);
    let form_error = use_state(|| Option::<String>::None);

    let on_month_change = {
        let month = month.clone();
        Callback::from(move |key: MonthKey| month.set(key))
    };

    let on_draft_change = {
        let draft = draft.clone();
        let form_error = form_error.clone();
        Callback::from(move |next: ExpenseDraft| {
            draft.set(next);
            form_error.set(None);
        })
    };

    let on_submit = {
        let month = month.clone();
        let draft = draft.clone();
        let form_error = form_error.clone();
        let on_submit = props.on_submit.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let request = match draft.to_create_request(*month) {
                Ok(request) => request,
                Err(error) => {
                    form_error.set(Some(error.to_string()));
                    return;
                }
            };

            let on_done = {
                let draft = draft.clone();
                Callback::from(move |saved: bool| {
                    if saved {
                        draft.set(ExpenseDraft::default());
                    }
                })
            };
            form_error.set(None);
            on_submit.emit((request, on_done));
        })
    };

    html! {
        <section class="expense-section">
            <h2>{"Expenses"}</h2>

            {if let Some(error) = (*form_error).as_ref() {
                html! { <div class="form-message error">{error}</div> }
            } else { html! {} }}

            <form class="expense-form" onsubmit={on_submit}>
                <MonthPicker
                    id_prefix="expense"
                    value={*month}
                    on_change={on_month_change}
                    disabled={props.disabled}
                />

                <ExpenseRowsEditor
                    id_prefix="expense"
                    draft={(*draft).clone()}
                    on_change={on_draft_change}
                    disabled={props.disabled}
                />

                <button type="submit" class="btn btn-primary" disabled={props.disabled}>
                    {"Save Expenses"}
                </button>
            </form>
        </section>
    }
}
