use yew::prelude::*;
use web_sys::HtmlInputElement;
use shared::{Income, IncomeDraft, UpdateIncomeRequest};

#[derive(Properties, PartialEq)]
pub struct EditIncomeDialogProps {
    /// The income being edited; `None` keeps the dialog closed
    pub income: Option<Income>,
    pub on_save: Callback<(String, UpdateIncomeRequest, Callback<bool>)>,
    pub on_close: Callback<()>,
}

#[function_component(EditIncomeDialog)]
pub fn edit_income_dialog(props: &EditIncomeDialogProps) -> Html {
    let draft = use_state(IncomeDraft::default);
    let error_message = use_state(|| Option::<String>::None);
    let is_submitting = use_state(|| false);

    // Reset state whenever a different income is opened
    use_effect_with(props.income.clone(), {
        let draft = draft.clone();
        let error_message = error_message.clone();
        let is_submitting = is_submitting.clone();
        move |income| {
            draft.set(income.as_ref().map(IncomeDraft::from_income).unwrap_or_default());
            error_message.set(None);
            is_submitting.set(false);
            || ()
        }
    });

    let on_salary_input = {
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            draft.set(IncomeDraft { salary: input.value() });
        })
    };

    let on_submit = {
        let income_id = props.income.as_ref().map(|income| income.id.clone());
        let draft = draft.clone();
        let error_message = error_message.clone();
        let is_submitting = is_submitting.clone();
        let on_save = props.on_save.clone();
        let on_close = props.on_close.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let Some(income_id) = income_id.clone() else { return };

            let request = match draft.to_update_request() {
                Ok(request) => request,
                Err(error) => {
                    error_message.set(Some(error.to_string()));
                    return;
                }
            };

            is_submitting.set(true);
            let on_done = {
                let on_close = on_close.clone();
                let is_submitting = is_submitting.clone();
                Callback::from(move |saved: bool| {
                    is_submitting.set(false);
                    if saved {
                        on_close.emit(());
                    }
                })
            };
            on_save.emit((income_id, request, on_done));
        })
    };

    let on_backdrop_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            on_close.emit(());
        })
    };

    let on_modal_click = Callback::from(|e: MouseEvent| {
        e.stop_propagation();
    });

    let on_cancel = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    let Some(income) = props.income.as_ref() else {
        return html! {};
    };

    html! {
        <div class="modal-backdrop" onclick={on_backdrop_click}>
            <div class="modal" onclick={on_modal_click}>
                <h3 class="modal-title">{format!("Edit income for {}", income.month_name)}</h3>

                {if let Some(error) = (*error_message).clone() {
                    html! { <div class="form-message error">{error}</div> }
                } else { html! {} }}

                <form class="edit-income-form" onsubmit={on_submit}>
                    <div class="form-group">
                        <label for="edit-income-salary">{"Salary"}</label>
                        <input
                            id="edit-income-salary"
                            type="text"
                            inputmode="numeric"
                            value={draft.salary.clone()}
                            oninput={on_salary_input}
                            disabled={*is_submitting}
                            autofocus=true
                        />
                    </div>

                    <div class="modal-buttons">
                        <button type="submit" class="btn btn-primary" disabled={*is_submitting}>
                            {if *is_submitting { "Saving..." } else { "Save" }}
                        </button>
                        <button type="button" class="btn btn-secondary" onclick={on_cancel}>
                            {"Cancel"}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
