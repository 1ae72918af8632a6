use yew::prelude::*;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use shared::{format_rupiah, ExpenseCategory, ExpenseDraft};

#[derive(Properties, PartialEq)]
pub struct ExpenseRowsEditorProps {
    pub id_prefix: AttrValue,
    pub draft: ExpenseDraft,
    pub on_change: Callback<ExpenseDraft>,
    #[prop_or_default]
    pub disabled: bool,
}

/// Editable expense item rows with a running total.
///
/// Every edit emits a new draft; the parent owns the state.
#[function_component(ExpenseRowsEditor)]
pub fn expense_rows_editor(props: &ExpenseRowsEditorProps) -> Html {
    let rows = props.draft.rows();
    let single_row = rows.len() == 1;

    let on_add_row = {
        let draft = props.draft.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = draft.clone();
            next.add_row();
            on_change.emit(next);
        })
    };

    html! {
        <div class="expense-rows">
            {for rows.iter().enumerate().map(|(index, row)| {
                let on_label_input = {
                    let draft = props.draft.clone();
                    let on_change = props.on_change.clone();
                    Callback::from(move |e: InputEvent| {
                        let input: HtmlInputElement = e.target_unchecked_into();
                        let mut next = draft.clone();
                        next.set_label(index, input.value());
                        on_change.emit(next);
                    })
                };

                let on_amount_input = {
                    let draft = props.draft.clone();
                    let on_change = props.on_change.clone();
                    Callback::from(move |e: InputEvent| {
                        let input: HtmlInputElement = e.target_unchecked_into();
                        let mut next = draft.clone();
                        next.set_amount(index, input.value());
                        on_change.emit(next);
                    })
                };

                let on_category_change = {
                    let draft = props.draft.clone();
                    let on_change = props.on_change.clone();
                    Callback::from(move |e: Event| {
                        let select: HtmlSelectElement = e.target_unchecked_into();
                        if let Ok(category) = select.value().parse::<ExpenseCategory>() {
                            let mut next = draft.clone();
                            next.set_category(index, category);
                            on_change.emit(next);
                        }
                    })
                };

                let on_remove = {
                    let draft = props.draft.clone();
                    let on_change = props.on_change.clone();
                    Callback::from(move |_: MouseEvent| {
                        let mut next = draft.clone();
                        next.remove_row(index);
                        on_change.emit(next);
                    })
                };

                let row_class = if row.category == ExpenseCategory::Savings {
                    "expense-row savings"
                } else {
                    "expense-row"
                };

                html! {
                    <div class={row_class} key={index}>
                        <input
                            type="text"
                            id={format!("{}-label-{}", props.id_prefix, index)}
                            placeholder="Food, rent, savings..."
                            value={row.label.clone()}
                            oninput={on_label_input}
                            disabled={props.disabled}
                        />
                        <input
                            type="text"
                            inputmode="numeric"
                            id={format!("{}-amount-{}", props.id_prefix, index)}
                            placeholder="1000000"
                            value={row.amount.clone()}
                            oninput={on_amount_input}
                            disabled={props.disabled}
                        />
                        <select onchange={on_category_change} disabled={props.disabled}>
                            {for [ExpenseCategory::Spending, ExpenseCategory::Savings].into_iter().map(|category| html! {
                                <option value={category.as_str()} selected={category == row.category}>
                                    {category.display_name()}
                                </option>
                            })}
                        </select>
                        <button
                            type="button"
                            class="btn btn-remove"
                            onclick={on_remove}
                            disabled={props.disabled || single_row}
                        >
                            {"Remove"}
                        </button>
                    </div>
                }
            })}

            <div class="expense-rows-footer">
                <button type="button" class="btn btn-secondary" onclick={on_add_row} disabled={props.disabled}>
                    {"+ Add Item"}
                </button>
                <span class="running-total">
                    {"Total: "}<strong>{format_rupiah(props.draft.total())}</strong>
                </span>
            </div>
        </div>
    }
}
