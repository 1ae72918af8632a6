use yew::prelude::*;
use shared::{Expense, ExpenseDraft, UpdateExpenseRequest};
use crate::components::forms::ExpenseRowsEditor;

#[derive(Properties, PartialEq)]
pub struct EditExpenseDialogProps {
    /// The expense being edited; `None` keeps the dialog closed
    pub expense: Option<Expense>,
    pub on_save: Callback<(String, UpdateExpenseRequest, Callback<bool>)>,
    pub on_close: Callback<()>,
}

#[function_component(EditExpenseDialog)]
pub fn edit_expense_dialog(props: &EditExpenseDialogProps) -> Html {
    let draft = use_state(ExpenseDraft::default);
    let error_message = use_state(|| Option::<String>::None);
    let is_submitting = use_state(|| false);

    use_effect_with(props.expense.clone(), {
        let draft = draft.clone();
        let error_message = error_message.clone();
        let is_submitting = is_submitting.clone();
        move |expense| {
            draft.set(
                expense
                    .as_ref()
                    .map(|expense| ExpenseDraft::from_items(&expense.items))
                    .unwrap_or_default(),
            );
            error_message.set(None);
            is_submitting.set(false);
            || ()
        }
    });

    let on_draft_change = {
        let draft = draft.clone();
        let error_message = error_message.clone();
        Callback::from(move |next: ExpenseDraft| {
            draft.set(next);
            error_message.set(None);
        })
    };

    let on_submit = {
        let expense_id = props.expense.as_ref().map(|expense| expense.id.clone());
        let draft = draft.clone();
        let error_message = error_message.clone();
        let is_submitting = is_submitting.clone();
        let on_save = props.on_save.clone();
        let on_close = props.on_close.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let Some(expense_id) = expense_id.clone() else { return };

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
            on_save.emit((expense_id, request, on_done));
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

    let Some(expense) = props.expense.as_ref() else {
        return html! {};
    };

    html! {
        <div class="modal-backdrop" onclick={on_backdrop_click}>
            <div class="modal modal-wide" onclick={on_modal_click}>
                <h3 class="modal-title">{format!("Edit expenses for {}", expense.month_name)}</h3>

                {if let Some(error) = (*error_message).clone() {
                    html! { <div class="form-message error">{error}</div> }
                } else { html! {} }}

                <form class="edit-expense-form" onsubmit={on_submit}>
                    <ExpenseRowsEditor
                        id_prefix="edit-expense"
                        draft={(*draft).clone()}
                        on_change={on_draft_change}
                        disabled={*is_submitting}
                    />

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
