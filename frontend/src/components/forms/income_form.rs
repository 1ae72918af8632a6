use yew::prelude::*;
use web_sys::HtmlInputElement;
use shared::{format_rupiah, parse_amount, CreateIncomeRequest, IncomeDraft, MonthKey};
use super::month_picker::MonthPicker;

#[derive(Properties, PartialEq)]
pub struct IncomeFormProps {
    /// Receives a validated request and a callback told whether it was saved
    pub on_submit: Callback<(CreateIncomeRequest, Callback<bool>)>,
    #[prop_or_default]
    pub disabled: bool,
}

#[function_component(IncomeForm)]
pub fn income_form(props: &IncomeFormProps) -> Html {
    let month = use_state(MonthKey::current);
    let draft = use_state(IncomeDraft::default);
    let form_error = use_state(|| Option::<String>::None);

    let on_month_change = {
        let month = month.clone();
        Callback::from(move |key: MonthKey| month.set(key))
    };

    let on_salary_input = {
        let draft = draft.clone();
        let form_error = form_error.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            draft.set(IncomeDraft { salary: input.value() });
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

            // validation errors never reach the backend
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
                        draft.set(IncomeDraft::default());
                    }
                })
            };
            form_error.set(None);
            on_submit.emit((request, on_done));
        })
    };

    let preview = parse_amount(&draft.salary).ok().map(format_rupiah);

    html! {
        <section class="income-section">
            <h2>{"Income"}</h2>

            {if let Some(error) = (*form_error).as_ref() {
                html! { <div class="form-message error">{error}</div> }
            } else { html! {} }}

            <form class="income-form" onsubmit={on_submit}>
                <MonthPicker
                    id_prefix="income"
                    value={*month}
                    on_change={on_month_change}
                    disabled={props.disabled}
                />

                <div class="form-group">
                    <label for="income-salary">{"Salary"}</label>
                    <input
                        type="text"
                        inputmode="numeric"
                        id="income-salary"
                        placeholder="5000000"
                        value={draft.salary.clone()}
                        oninput={on_salary_input}
                        disabled={props.disabled}
                    />
                    {if let Some(preview) = preview {
                        html! { <span class="amount-preview">{preview}</span> }
                    } else { html! {} }}
                </div>

                <button type="submit" class="btn btn-primary" disabled={props.disabled}>
                    {"Save Income"}
                </button>
            </form>
        </section>
    }
}
